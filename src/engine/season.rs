//! Season rollover: promotion, relegation, and the stats reset.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::state::league::{ClubStanding, Division, TeamStats, zeroed_category_stats};

use super::{EngineError, EngineResult};

/// Clubs exchanged between divisions at the end of a season.
pub const EXCHANGED_CLUBS: usize = 3;

/// Outcome of a season rollover.
#[derive(Debug, Clone)]
pub struct RolloverOutcome {
    /// New standings: divisions reassigned, every stat reset to zero.
    pub standings: Vec<ClubStanding>,
    /// Clubs moved down from Primera.
    pub relegated: Vec<Uuid>,
    /// Clubs moved up from Segunda.
    pub promoted: Vec<Uuid>,
}

/// Order clubs inside a division for the end-of-season table: points, then
/// goal difference, then goals for. No further tie-break is applied.
fn division_order(a: &ClubStanding, b: &ClubStanding) -> Ordering {
    b.general
        .points
        .cmp(&a.general.points)
        .then(b.general.goal_difference.cmp(&a.general.goal_difference))
        .then(b.general.goals_for.cmp(&a.general.goals_for))
}

/// Roll the season over: relegate the bottom three of Primera, promote the
/// top three of Segunda, and reset every club's general and category stats.
///
/// Fails with [`EngineError::InsufficientClubs`] before any mutation when a
/// division holds fewer than three clubs. The caller resets the Sub12 status
/// to pending alongside this operation.
pub fn rollover(standings: &[ClubStanding]) -> EngineResult<RolloverOutcome> {
    let mut primera: Vec<&ClubStanding> = standings
        .iter()
        .filter(|club| club.division == Division::Primera)
        .collect();
    let mut segunda: Vec<&ClubStanding> = standings
        .iter()
        .filter(|club| club.division == Division::Segunda)
        .collect();

    for (division, clubs) in [(Division::Primera, &primera), (Division::Segunda, &segunda)] {
        if clubs.len() < EXCHANGED_CLUBS {
            return Err(EngineError::InsufficientClubs {
                division,
                required: EXCHANGED_CLUBS,
                found: clubs.len(),
            });
        }
    }

    primera.sort_by(|a, b| division_order(a, b));
    segunda.sort_by(|a, b| division_order(a, b));

    let relegated: Vec<Uuid> = primera[primera.len() - EXCHANGED_CLUBS..]
        .iter()
        .map(|club| club.id)
        .collect();
    let promoted: Vec<Uuid> = segunda[..EXCHANGED_CLUBS].iter().map(|club| club.id).collect();

    let standings = standings
        .iter()
        .map(|club| {
            let division = if relegated.contains(&club.id) {
                Division::Segunda
            } else if promoted.contains(&club.id) {
                Division::Primera
            } else {
                club.division
            };

            ClubStanding {
                id: club.id,
                name: club.name.clone(),
                division,
                general: TeamStats::default(),
                category_stats: zeroed_category_stats(),
                disabled_series: club.disabled_series.clone(),
            }
        })
        .collect();

    Ok(RolloverOutcome {
        standings,
        relegated,
        promoted,
    })
}

#[cfg(test)]
mod tests {
    use crate::state::league::Category;

    use super::*;

    fn club_with_points(name: &str, division: Division, points: i32) -> ClubStanding {
        let mut club = ClubStanding::new(Uuid::new_v4(), name, division);
        club.general.points = points;
        club.category_stats
            .entry(Category::SerieHonor)
            .or_default()
            .points = points;
        club
    }

    fn league(primera: usize, segunda: usize) -> Vec<ClubStanding> {
        let mut clubs = Vec::new();
        for i in 0..primera {
            clubs.push(club_with_points(
                &format!("P{i:02}"),
                Division::Primera,
                (primera - i) as i32 * 3,
            ));
        }
        for i in 0..segunda {
            clubs.push(club_with_points(
                &format!("S{i:02}"),
                Division::Segunda,
                (segunda - i) as i32 * 3,
            ));
        }
        clubs
    }

    #[test]
    fn bottom_three_swap_with_top_three() {
        let clubs = league(16, 16);
        let bottom: Vec<Uuid> = clubs[13..16].iter().map(|c| c.id).collect();
        let top: Vec<Uuid> = clubs[16..19].iter().map(|c| c.id).collect();

        let outcome = rollover(&clubs).unwrap();

        assert_eq!(outcome.relegated, bottom);
        assert_eq!(outcome.promoted, top);
        for id in &bottom {
            let club = outcome.standings.iter().find(|c| c.id == *id).unwrap();
            assert_eq!(club.division, Division::Segunda);
        }
        for id in &top {
            let club = outcome.standings.iter().find(|c| c.id == *id).unwrap();
            assert_eq!(club.division, Division::Primera);
        }
    }

    #[test]
    fn every_stat_resets_to_zero() {
        let clubs = league(4, 4);
        let outcome = rollover(&clubs).unwrap();

        for club in &outcome.standings {
            assert_eq!(club.general, TeamStats::default());
            for stats in club.category_stats.values() {
                assert_eq!(*stats, TeamStats::default());
            }
        }
    }

    #[test]
    fn goal_difference_breaks_point_ties() {
        let mut clubs = league(4, 3);
        // Last two Primera clubs tied on points; worse goal difference goes down.
        clubs[2].general.points = 3;
        clubs[3].general.points = 3;
        clubs[2].general.goal_difference = -1;
        clubs[3].general.goal_difference = 4;
        let expected_bottom = clubs[2].id;

        let outcome = rollover(&clubs).unwrap();
        assert!(outcome.relegated.contains(&expected_bottom));
    }

    #[test]
    fn small_division_aborts_without_mutation() {
        let clubs = league(2, 5);
        let err = rollover(&clubs).unwrap_err();
        assert_eq!(
            err,
            EngineError::InsufficientClubs {
                division: Division::Primera,
                required: EXCHANGED_CLUBS,
                found: 2,
            }
        );
    }

    #[test]
    fn club_order_in_the_stored_list_is_preserved() {
        let clubs = league(5, 5);
        let outcome = rollover(&clubs).unwrap();
        let before: Vec<Uuid> = clubs.iter().map(|c| c.id).collect();
        let after: Vec<Uuid> = outcome.standings.iter().map(|c| c.id).collect();
        assert_eq!(before, after);
    }
}
