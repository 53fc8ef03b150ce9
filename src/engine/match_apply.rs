//! Applying and reverting a single match result against the standings.

use crate::state::league::{Category, ClubStanding, MatchRecord, TeamStats};

use super::{EngineError, EngineResult, outcome_points};

/// Direction of a standings update. Reverting uses the same delta with the
/// sign flipped, which is what lets an edit run as revert-old-then-apply-new
/// without a dedicated update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Count the match into the standings.
    Apply,
    /// Remove a previously applied match from the standings.
    Revert,
}

impl Direction {
    fn factor(self) -> i32 {
        match self {
            Direction::Apply => 1,
            Direction::Revert => -1,
        }
    }
}

/// Non-Sub12 points earned by each side of a match, kept on the record for
/// audit display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchPoints {
    /// Points earned by the home side.
    pub local: i32,
    /// Points earned by the visiting side.
    pub visitor: i32,
}

/// Apply (or revert) one match against a standings snapshot.
///
/// Returns a new standings set plus the per-side non-Sub12 point totals; the
/// input is never modified. Clubs that are not party to the match are
/// untouched. Fails without any effect when either club id is unknown or the
/// clubs play in different divisions.
pub fn apply_match(
    standings: &[ClubStanding],
    record: &MatchRecord,
    direction: Direction,
) -> EngineResult<(Vec<ClubStanding>, MatchPoints)> {
    let local = standings
        .iter()
        .find(|club| club.id == record.local_club_id)
        .ok_or(EngineError::ClubNotFound(record.local_club_id))?;
    let visitor = standings
        .iter()
        .find(|club| club.id == record.visitor_club_id)
        .ok_or(EngineError::ClubNotFound(record.visitor_club_id))?;

    if local.division != visitor.division {
        return Err(EngineError::DivisionMismatch {
            local: local.id,
            visitor: visitor.id,
        });
    }

    let factor = direction.factor();
    let mut points = MatchPoints::default();

    let updated = standings
        .iter()
        .map(|club| {
            if club.id != record.local_club_id && club.id != record.visitor_club_id {
                return club.clone();
            }

            let is_local = club.id == record.local_club_id;
            let mut club = club.clone();

            for (category, score) in &record.results {
                let Some((local_goals, visitor_goals)) = score.played_pair() else {
                    continue;
                };
                let (scored, conceded) = if is_local {
                    (local_goals, visitor_goals)
                } else {
                    (visitor_goals, local_goals)
                };

                let stats = club.category_stats.entry(*category).or_default();
                register_outcome(stats, scored, conceded, factor);

                if *category != Category::Sub12 {
                    let earned = outcome_points(scored, conceded) * factor;
                    if is_local {
                        points.local += earned;
                    } else {
                        points.visitor += earned;
                    }
                }
            }

            club
        })
        .collect();

    Ok((updated, points))
}

/// Fold one category outcome into a stats row. `factor` is +1 to apply and
/// -1 to revert.
pub(crate) fn register_outcome(stats: &mut TeamStats, scored: i32, conceded: i32, factor: i32) {
    stats.played += factor;
    stats.goals_for += scored * factor;
    stats.goals_against += conceded * factor;

    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => stats.won += factor,
        std::cmp::Ordering::Equal => stats.drawn += factor,
        std::cmp::Ordering::Less => stats.lost += factor,
    }

    stats.points += outcome_points(scored, conceded) * factor;
    stats.goal_difference = stats.goals_for - stats.goals_against;
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use time::macros::date;
    use uuid::Uuid;

    use crate::state::league::{CategoryScore, Division};

    use super::*;

    fn club(name: &str, division: Division) -> ClubStanding {
        ClubStanding::new(Uuid::new_v4(), name, division)
    }

    fn match_between(local: &ClubStanding, visitor: &ClubStanding) -> MatchRecord {
        MatchRecord {
            id: Uuid::new_v4(),
            local_club_id: local.id,
            visitor_club_id: visitor.id,
            date: date!(2025 - 04 - 12),
            results: IndexMap::new(),
            local_points: 0,
            visitor_points: 0,
        }
    }

    fn score(local: i32, visitor: i32) -> CategoryScore {
        CategoryScore {
            local_goals: Some(local),
            visitor_goals: Some(visitor),
        }
    }

    #[test]
    fn win_draw_and_loss_are_scored_per_category() {
        let home = club("Estrella", Division::Primera);
        let away = club("Avance", Division::Primera);
        let mut record = match_between(&home, &away);
        record.results.insert(Category::SerieHonor, score(2, 0));
        record.results.insert(Category::Senior35, score(1, 1));
        record.results.insert(Category::Sub14, score(0, 3));

        let (updated, points) =
            apply_match(&[home.clone(), away.clone()], &record, Direction::Apply).unwrap();

        let home = updated.iter().find(|c| c.id == home.id).unwrap();
        let honor = home.category(Category::SerieHonor);
        assert_eq!((honor.points, honor.won, honor.played), (3, 1, 1));
        let senior = home.category(Category::Senior35);
        assert_eq!((senior.points, senior.drawn), (1, 1));
        let sub14 = home.category(Category::Sub14);
        assert_eq!((sub14.points, sub14.lost, sub14.goal_difference), (0, 1, -3));

        let away = updated.iter().find(|c| c.id == away.id).unwrap();
        assert_eq!(away.category(Category::SerieHonor).lost, 1);
        assert_eq!(away.category(Category::Sub14).points, 3);

        assert_eq!(points, MatchPoints { local: 4, visitor: 3 });
    }

    #[test]
    fn sub12_results_do_not_count_toward_match_points() {
        let home = club("Nacional", Division::Segunda);
        let away = club("Atlanta", Division::Segunda);
        let mut record = match_between(&home, &away);
        record.results.insert(Category::Sub12, score(4, 0));

        let (updated, points) =
            apply_match(&[home.clone(), away.clone()], &record, Direction::Apply).unwrap();

        assert_eq!(points, MatchPoints::default());
        let home = updated.iter().find(|c| c.id == home.id).unwrap();
        assert_eq!(home.category(Category::Sub12).points, 3);
    }

    #[test]
    fn unsubmitted_categories_are_skipped() {
        let home = club("Condor", Division::Primera);
        let away = club("Junior", Division::Primera);
        let mut record = match_between(&home, &away);
        record.results.insert(
            Category::Sub16,
            CategoryScore {
                local_goals: Some(2),
                visitor_goals: None,
            },
        );

        let (updated, points) =
            apply_match(&[home.clone(), away.clone()], &record, Direction::Apply).unwrap();

        assert_eq!(points, MatchPoints::default());
        let home = updated.iter().find(|c| c.id == home.id).unwrap();
        assert_eq!(home.category(Category::Sub16), TeamStats::default());
    }

    #[test]
    fn apply_then_revert_restores_the_snapshot() {
        let home = club("San Miguel", Division::Primera);
        let away = club("El Tejar", Division::Primera);
        let bystander = club("Union", Division::Primera);
        let original = vec![home.clone(), away.clone(), bystander];

        let mut record = match_between(&home, &away);
        record.results.insert(Category::SerieHonor, score(3, 1));
        record.results.insert(Category::Sub12, score(0, 2));
        record.results.insert(Category::Senior50, score(2, 2));

        let (applied, _) = apply_match(&original, &record, Direction::Apply).unwrap();
        assert_ne!(applied, original);

        let (reverted, points) = apply_match(&applied, &record, Direction::Revert).unwrap();
        assert_eq!(reverted, original);
        assert_eq!(points, MatchPoints { local: -4, visitor: -1 });
    }

    #[test]
    fn unknown_club_leaves_standings_untouched() {
        let home = club("Lautaro", Division::Segunda);
        let away = club("Zaragoza", Division::Segunda);
        let mut record = match_between(&home, &away);
        record.results.insert(Category::Sub18, score(1, 0));
        record.visitor_club_id = Uuid::new_v4();

        let standings = vec![home, away];
        let err = apply_match(&standings, &record, Direction::Apply).unwrap_err();
        assert_eq!(err, EngineError::ClubNotFound(record.visitor_club_id));
    }

    #[test]
    fn cross_division_match_is_rejected_before_any_scoring() {
        let home = club("Estadio", Division::Segunda);
        let away = club("Barrabases", Division::Primera);
        let mut record = match_between(&home, &away);
        record.results.insert(Category::Sub18, score(1, 0));

        let err = apply_match(&[home.clone(), away.clone()], &record, Direction::Apply)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::DivisionMismatch {
                local: home.id,
                visitor: away.id,
            }
        );
    }

    #[test]
    fn goal_difference_stays_consistent_after_every_operation() {
        let home = club("Cruz azul", Division::Primera);
        let away = club("San Luis", Division::Primera);
        let mut record = match_between(&home, &away);
        record.results.insert(Category::Senior45, score(5, 2));
        record.results.insert(Category::Sub12, score(1, 1));

        let (applied, _) = apply_match(&[home, away], &record, Direction::Apply).unwrap();
        for club in &applied {
            for stats in club.category_stats.values() {
                assert_eq!(stats.goal_difference, stats.goals_for - stats.goals_against);
            }
        }
    }
}
