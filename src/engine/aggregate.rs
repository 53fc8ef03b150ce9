//! Deriving a club's general standing from its category tables.

use indexmap::IndexMap;

use crate::state::league::{Category, ClubStanding, TeamStats};

/// Compute the general (whole-club) statistics from a category-stats table.
///
/// The Sub12 entry is excluded entirely: its points only reach the general
/// table through the finalization bonus. `played` tracks the most advanced
/// category rather than a total, because every category runs its own
/// round-robin in parallel; the remaining fields are plain sums.
pub fn general_stats(category_stats: &IndexMap<Category, TeamStats>) -> TeamStats {
    let mut general = TeamStats::default();

    for (category, stats) in category_stats {
        if *category == Category::Sub12 {
            continue;
        }
        general.points += stats.points;
        general.played = general.played.max(stats.played);
        general.won += stats.won;
        general.drawn += stats.drawn;
        general.lost += stats.lost;
        general.goals_for += stats.goals_for;
        general.goals_against += stats.goals_against;
    }

    general.goal_difference = general.goals_for - general.goals_against;
    general
}

/// Refresh a club's general block from its category stats. Must run after
/// every mutation of any category table before the general standing is read.
pub fn recompute_general(club: &mut ClubStanding) {
    club.general = general_stats(&club.category_stats);
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::state::league::Division;

    use super::*;

    fn stats(points: i32, played: i32, goals_for: i32, goals_against: i32) -> TeamStats {
        TeamStats {
            points,
            played,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for,
            goals_against,
            goal_difference: goals_for - goals_against,
        }
    }

    #[test]
    fn general_played_is_the_maximum_not_the_sum() {
        let mut club = ClubStanding::new(Uuid::new_v4(), "Ferroviarios", Division::Segunda);
        club.category_stats.insert(Category::Sub14, stats(6, 2, 4, 1));
        club.category_stats.insert(Category::Senior35, stats(7, 5, 9, 6));
        club.category_stats.insert(Category::SerieHonor, stats(4, 3, 3, 3));

        recompute_general(&mut club);

        assert_eq!(club.general.played, 5);
        assert_eq!(club.general.points, 17);
        assert_eq!(club.general.goals_for, 16);
        assert_eq!(club.general.goals_against, 10);
        assert_eq!(club.general.goal_difference, 6);
    }

    #[test]
    fn sub12_is_excluded_from_every_general_field() {
        let mut club = ClubStanding::new(Uuid::new_v4(), "Real Oriente", Division::Segunda);
        club.category_stats.insert(Category::Sub12, stats(30, 12, 40, 2));
        club.category_stats.insert(Category::Sub16, stats(3, 1, 2, 0));

        recompute_general(&mut club);

        assert_eq!(club.general.points, 3);
        assert_eq!(club.general.played, 1);
        assert_eq!(club.general.goals_for, 2);
        assert_eq!(club.general.goals_against, 0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut club = ClubStanding::new(Uuid::new_v4(), "El Sauce", Division::Segunda);
        club.category_stats.insert(Category::Sub18, stats(9, 4, 11, 5));
        club.category_stats.insert(Category::Senior50, stats(2, 2, 1, 3));

        recompute_general(&mut club);
        let once = club.clone();
        recompute_general(&mut club);

        assert_eq!(club, once);
    }
}
