//! Sub12 completion detection and bonus-point distribution.
//!
//! The Sub12 category is a single competition across both divisions. Once
//! every club has played the full double round-robin, the final Sub12 table
//! converts into bonus points added on top of each club's general standing.
//! Finalization is re-entrant: the bonus is recomputed from the current
//! category points whenever the standings change, never incremented.

use std::cmp::Ordering;

use crate::state::league::{Category, ClubStanding};

/// Matches every club must have played for the unified Sub12 round-robin to
/// be complete.
pub fn required_matches(clubs_total: usize) -> i32 {
    (clubs_total.saturating_sub(1) * 2) as i32
}

/// Whether the unified Sub12 round-robin has completed.
///
/// Fewer than two clubs never completes: a degenerate league has no ranking
/// to award bonus points from.
pub fn completion_reached(standings: &[ClubStanding]) -> bool {
    if standings.len() < 2 {
        return false;
    }

    let required = required_matches(standings.len());
    standings
        .iter()
        .all(|club| club.category(Category::Sub12).played >= required)
}

/// Order two clubs for the Sub12 table: points, then goal difference, then
/// goals for, with the club name as the final alphabetical tie-break.
fn sub12_order(a: &ClubStanding, b: &ClubStanding) -> Ordering {
    let sa = a.category(Category::Sub12);
    let sb = b.category(Category::Sub12);
    sb.points
        .cmp(&sa.points)
        .then(sb.goal_difference.cmp(&sa.goal_difference))
        .then(sb.goals_for.cmp(&sa.goals_for))
        .then(a.name.cmp(&b.name))
}

/// The standings sorted into the final Sub12 table.
pub fn sub12_table(standings: &[ClubStanding]) -> Vec<ClubStanding> {
    let mut table: Vec<ClubStanding> = standings.to_vec();
    table.sort_by(sub12_order);
    table
}

/// Sum of a club's category points excluding Sub12.
pub fn non_sub12_points(club: &ClubStanding) -> i32 {
    club.category_stats
        .iter()
        .filter(|(category, _)| **category != Category::Sub12)
        .map(|(_, stats)| stats.points)
        .sum()
}

/// Distribute the rank-based bonus into every club's general points.
///
/// Ranks beyond the distribution table receive the table's last entry. Each
/// club's general points are *set* to non-Sub12 points plus bonus, so calling
/// this again on unchanged data is a no-op.
pub fn apply_bonus(standings: &mut [ClubStanding], distribution: &[i32]) {
    let table = sub12_table(standings);

    for club in standings.iter_mut() {
        let rank = table
            .iter()
            .position(|ranked| ranked.id == club.id)
            .unwrap_or(table.len());
        let bonus = distribution
            .get(rank)
            .or(distribution.last())
            .copied()
            .unwrap_or(0);
        club.general.points = non_sub12_points(club) + bonus;
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::state::league::{Division, TeamStats};

    use super::*;

    const DISTRIBUTION: [i32; 4] = [100, 90, 85, 80];

    fn club_with_sub12(name: &str, points: i32, goal_difference: i32, goals_for: i32) -> ClubStanding {
        let mut club = ClubStanding::new(Uuid::new_v4(), name, Division::Primera);
        club.category_stats.insert(
            Category::Sub12,
            TeamStats {
                points,
                played: 0,
                won: 0,
                drawn: 0,
                lost: 0,
                goals_for,
                goals_against: goals_for - goal_difference,
                goal_difference,
            },
        );
        club
    }

    fn set_sub12_played(club: &mut ClubStanding, played: i32) {
        club.category_stats.entry(Category::Sub12).or_default().played = played;
    }

    #[test]
    fn completion_requires_every_club_at_the_boundary() {
        let mut clubs: Vec<ClubStanding> = (0..4)
            .map(|i| ClubStanding::new(Uuid::new_v4(), format!("Club {i}"), Division::Primera))
            .collect();
        let required = required_matches(clubs.len());
        assert_eq!(required, 6);

        for club in clubs.iter_mut() {
            set_sub12_played(club, required);
        }
        set_sub12_played(&mut clubs[2], required - 1);
        assert!(!completion_reached(&clubs));

        set_sub12_played(&mut clubs[2], required);
        assert!(completion_reached(&clubs));
    }

    #[test]
    fn fewer_than_two_clubs_never_completes() {
        assert!(!completion_reached(&[]));
        let lone = ClubStanding::new(Uuid::new_v4(), "Lone", Division::Primera);
        assert!(!completion_reached(&[lone]));
    }

    #[test]
    fn bonus_follows_the_tie_broken_ranking() {
        let a = club_with_sub12("Andes", 10, 8, 20);
        let b = club_with_sub12("Brisas", 10, 5, 20);
        let c = club_with_sub12("Cumbre", 8, 12, 30);
        let mut standings = vec![c.clone(), a.clone(), b.clone()];

        // Give each club some non-Sub12 points to anchor the general total.
        for (club, points) in standings.iter_mut().zip([4, 6, 2]) {
            club.category_stats
                .entry(Category::SerieHonor)
                .or_default()
                .points = points;
        }

        apply_bonus(&mut standings, &DISTRIBUTION);

        let general = |id: Uuid| standings.iter().find(|club| club.id == id).unwrap().general.points;
        // Ranking: Andes (better GD), Brisas, Cumbre.
        assert_eq!(general(a.id), 6 + 100);
        assert_eq!(general(b.id), 2 + 90);
        assert_eq!(general(c.id), 4 + 85);
    }

    #[test]
    fn equal_records_fall_back_to_alphabetical_order() {
        let x = club_with_sub12("Zaragoza", 7, 0, 5);
        let y = club_with_sub12("Atlanta", 7, 0, 5);
        let table = sub12_table(&[x, y]);
        assert_eq!(table[0].name, "Atlanta");
    }

    #[test]
    fn ranks_beyond_the_table_reuse_the_last_entry() {
        let mut standings: Vec<ClubStanding> = (0..6)
            .map(|i| club_with_sub12(&format!("Club {i}"), (6 - i) as i32, 0, 0))
            .collect();

        apply_bonus(&mut standings, &DISTRIBUTION);

        assert_eq!(standings[4].general.points, 80);
        assert_eq!(standings[5].general.points, 80);
    }

    #[test]
    fn reapplying_the_bonus_is_idempotent() {
        let mut standings = vec![
            club_with_sub12("Norte", 9, 3, 10),
            club_with_sub12("Sur", 6, -3, 4),
        ];
        apply_bonus(&mut standings, &DISTRIBUTION);
        let once = standings.clone();
        apply_bonus(&mut standings, &DISTRIBUTION);
        assert_eq!(standings, once);
    }
}
