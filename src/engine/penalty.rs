//! Disabled-series penalties and full standings rebuilds from match history.

use uuid::Uuid;

use crate::state::league::{Category, ClubStanding, MatchRecord, TeamStats, zeroed_category_stats};

use super::{ScheduleRules, aggregate, match_apply::register_outcome};

/// Recompute one club's stats for one category from the recorded matches,
/// using the same 3/1/0 scoring as the incremental path.
pub fn played_stats_from_history(
    club_id: Uuid,
    category: Category,
    matches: &[MatchRecord],
) -> TeamStats {
    let mut stats = TeamStats::default();

    for record in matches {
        let is_local = record.local_club_id == club_id;
        if !is_local && record.visitor_club_id != club_id {
            continue;
        }
        let Some(score) = record.results.get(&category) else {
            continue;
        };
        let Some((local_goals, visitor_goals)) = score.played_pair() else {
            continue;
        };

        let (scored, conceded) = if is_local {
            (local_goals, visitor_goals)
        } else {
            (visitor_goals, local_goals)
        };
        register_outcome(&mut stats, scored, conceded, 1);
    }

    stats
}

/// Score a disabled series as if the club had played its full schedule and
/// lost every fixture not actually played.
///
/// Fixtures already on the record keep their real outcome; each forfeited
/// fixture counts as a loss with the configured walkover score against and no
/// goals nor points in favor. Recomputed from scratch on every pass, so
/// clearing the disabled flag removes the overlay on the next rebuild.
pub fn resolve_disabled_series(
    club_id: Uuid,
    category: Category,
    matches: &[MatchRecord],
    schedule_len: i32,
    forfeit_goals_against: i32,
) -> TeamStats {
    let played = played_stats_from_history(club_id, category, matches);
    let remaining = (schedule_len - played.played).max(0);

    let goals_against = played.goals_against + remaining * forfeit_goals_against;
    TeamStats {
        points: played.points,
        played: schedule_len,
        won: played.won,
        drawn: played.drawn,
        lost: played.lost + remaining,
        goals_for: played.goals_for,
        goals_against,
        goal_difference: played.goals_for - goals_against,
    }
}

/// Rebuild every club's category tables from the match history, overlaying
/// the forfeit penalty where a series is disabled and the date-3 checkpoint
/// has passed, then refresh the general blocks.
///
/// The caller re-evaluates the Sub12 bonus afterwards; this function only
/// produces raw standings.
pub fn rebuild_standings(
    standings: &[ClubStanding],
    matches: &[MatchRecord],
    date3_passed: bool,
    rules: &ScheduleRules,
) -> Vec<ClubStanding> {
    let clubs_total = standings.len();

    standings
        .iter()
        .map(|club| {
            let mut rebuilt = club.clone();
            rebuilt.category_stats = zeroed_category_stats();

            for category in Category::ALL {
                let penalized = date3_passed && club.disabled_series.contains(&category);
                let stats = if penalized {
                    let schedule_len = if category == Category::Sub12 {
                        rules.unified_schedule(clubs_total)
                    } else {
                        rules.division_schedule()
                    };
                    resolve_disabled_series(
                        club.id,
                        category,
                        matches,
                        schedule_len,
                        rules.forfeit_goals_against,
                    )
                } else {
                    played_stats_from_history(club.id, category, matches)
                };
                rebuilt.category_stats.insert(category, stats);
            }

            aggregate::recompute_general(&mut rebuilt);
            rebuilt
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use time::macros::date;

    use crate::state::league::{CategoryScore, Division};

    use super::*;

    const RULES: ScheduleRules = ScheduleRules {
        teams_per_division: 16,
        forfeit_goals_against: 1,
    };

    fn record(
        local: &ClubStanding,
        visitor: &ClubStanding,
        category: Category,
        goals: (i32, i32),
    ) -> MatchRecord {
        let mut results = IndexMap::new();
        results.insert(
            category,
            CategoryScore {
                local_goals: Some(goals.0),
                visitor_goals: Some(goals.1),
            },
        );
        MatchRecord {
            id: Uuid::new_v4(),
            local_club_id: local.id,
            visitor_club_id: visitor.id,
            date: date!(2025 - 05 - 03),
            results,
            local_points: 0,
            visitor_points: 0,
        }
    }

    #[test]
    fn forfeit_overlay_matches_the_walkover_policy() {
        // 10 fixtures actually played: 4W/3D/3L, 12 goals for, 9 against.
        let club = ClubStanding::new(Uuid::new_v4(), "Irene Frei", Division::Segunda);
        let rival = ClubStanding::new(Uuid::new_v4(), "Rival", Division::Segunda);

        let mut matches = Vec::new();
        for _ in 0..4 {
            matches.push(record(&club, &rival, Category::Senior45, (2, 1)));
        }
        for _ in 0..3 {
            matches.push(record(&club, &rival, Category::Senior45, (1, 1)));
        }
        for _ in 0..3 {
            matches.push(record(&rival, &club, Category::Senior45, (0, 1)));
        }

        let stats =
            resolve_disabled_series(club.id, Category::Senior45, &matches, 30, 1);

        assert_eq!(stats.played, 30);
        assert_eq!(stats.won, 4);
        assert_eq!(stats.drawn, 3);
        assert_eq!(stats.lost, 23);
        assert_eq!(stats.goals_for, 12);
        assert_eq!(stats.goals_against, 29);
        assert_eq!(stats.goal_difference, -17);
        assert_eq!(stats.points, 15);
    }

    #[test]
    fn overplayed_schedule_never_adds_negative_forfeits() {
        let club = ClubStanding::new(Uuid::new_v4(), "Estadio", Division::Segunda);
        let rival = ClubStanding::new(Uuid::new_v4(), "Rival", Division::Segunda);
        let matches = vec![
            record(&club, &rival, Category::Sub16, (1, 0)),
            record(&club, &rival, Category::Sub16, (2, 0)),
            record(&club, &rival, Category::Sub16, (3, 0)),
        ];

        let stats = resolve_disabled_series(club.id, Category::Sub16, &matches, 2, 1);

        assert_eq!(stats.played, 2);
        assert_eq!(stats.lost, 0);
        assert_eq!(stats.goals_against, 0);
        assert_eq!(stats.points, 9);
    }

    #[test]
    fn rebuild_reproduces_incremental_standings() {
        let a = ClubStanding::new(Uuid::new_v4(), "Alfa", Division::Primera);
        let b = ClubStanding::new(Uuid::new_v4(), "Beta", Division::Primera);
        let matches = vec![
            record(&a, &b, Category::SerieHonor, (2, 0)),
            record(&b, &a, Category::SerieHonor, (1, 1)),
            record(&a, &b, Category::Sub12, (0, 3)),
        ];

        let rebuilt = rebuild_standings(&[a.clone(), b.clone()], &matches, false, &RULES);

        let a = rebuilt.iter().find(|c| c.id == a.id).unwrap();
        let honor = a.category(Category::SerieHonor);
        assert_eq!((honor.points, honor.played, honor.won, honor.drawn), (4, 2, 1, 1));
        assert_eq!(a.category(Category::Sub12).lost, 1);
        // General ignores Sub12 but tracks the honor series.
        assert_eq!(a.general.points, 4);
        assert_eq!(a.general.played, 2);
    }

    #[test]
    fn penalty_applies_only_once_date3_has_passed() {
        let mut club = ClubStanding::new(Uuid::new_v4(), "Roberto Mateos", Division::Segunda);
        club.disabled_series.insert(Category::Senior50);
        let rival = ClubStanding::new(Uuid::new_v4(), "Rival", Division::Segunda);
        let matches = vec![record(&club, &rival, Category::Senior50, (2, 0))];
        let standings = vec![club.clone(), rival];

        let before = rebuild_standings(&standings, &matches, false, &RULES);
        let lenient = before.iter().find(|c| c.id == club.id).unwrap();
        assert_eq!(lenient.category(Category::Senior50).played, 1);

        let after = rebuild_standings(&standings, &matches, true, &RULES);
        let punished = after.iter().find(|c| c.id == club.id).unwrap();
        let stats = punished.category(Category::Senior50);
        assert_eq!(stats.played, RULES.division_schedule());
        assert_eq!(stats.lost, RULES.division_schedule() - 1);
        assert_eq!(stats.points, 3);
    }

    #[test]
    fn clearing_the_disabled_flag_removes_the_overlay() {
        let mut club = ClubStanding::new(Uuid::new_v4(), "Buenos Amigos", Division::Segunda);
        club.disabled_series.insert(Category::Sub18);
        let rival = ClubStanding::new(Uuid::new_v4(), "Rival", Division::Segunda);
        let matches = vec![record(&club, &rival, Category::Sub18, (1, 1))];

        let punished = rebuild_standings(&[club.clone(), rival.clone()], &matches, true, &RULES);
        assert_eq!(
            punished[0].category(Category::Sub18).played,
            RULES.division_schedule()
        );

        club.disabled_series.clear();
        let restored = rebuild_standings(&[club, rival], &matches, true, &RULES);
        assert_eq!(restored[0].category(Category::Sub18).played, 1);
    }
}
