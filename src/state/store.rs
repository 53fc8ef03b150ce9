//! Authoritative league snapshot and its coordination operations.
//!
//! [`LeagueSnapshot`] is the in-memory source of truth: standings, match
//! history, registered players, suspensions, and the global flags. Every
//! mutating operation is a synchronous transform over the snapshot; callers
//! serialize writes behind the [`AppState`](super::AppState) write gate and
//! persist whole collections afterwards.

use indexmap::IndexMap;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

use crate::{
    dao::models::LeagueCollections,
    engine::{
        self, EngineError, ScheduleRules,
        match_apply::{Direction, MatchPoints},
    },
    state::league::{
        Category, CategoryScore, ClubStanding, LeagueFlags, MatchRecord, Player, Sub12Status,
        Suspension,
    },
};

/// Engine policy bundle derived from the application configuration.
#[derive(Debug, Clone)]
pub struct LeagueRules {
    /// Schedule sizes and forfeit policy.
    pub schedule: ScheduleRules,
    /// Sub12 bonus points by final rank (index 0 = first place).
    pub sub12_distribution: Vec<i32>,
}

/// Failures raised by snapshot operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The underlying engine transform rejected the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// The referenced match id is not part of the history.
    #[error("match `{0}` is not recorded")]
    MatchNotFound(Uuid),
}

/// Result alias for snapshot operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Payload of a match submission, before ids and audit points are assigned.
#[derive(Debug, Clone)]
pub struct MatchSubmission {
    /// Home club.
    pub local_club_id: Uuid,
    /// Visiting club.
    pub visitor_club_id: Uuid,
    /// Day the fixture was played.
    pub date: Date,
    /// Per-category score sheets.
    pub results: IndexMap<Category, CategoryScore>,
}

/// Whether a match write created a new record or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchWriteKind {
    /// A new fixture was recorded.
    Created,
    /// An existing fixture was edited in place.
    Updated,
}

/// Outcome of a match write, for persistence and event broadcasting.
#[derive(Debug, Clone)]
pub struct MatchWriteOutcome {
    /// The stored match record, audit points included.
    pub record: MatchRecord,
    /// Created or updated.
    pub kind: MatchWriteKind,
    /// True when this write completed the Sub12 round-robin.
    pub sub12_finalized_now: bool,
}

/// In-memory league state: the unit of load, transform, and save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueSnapshot {
    /// Authoritative club standings.
    pub standings: Vec<ClubStanding>,
    /// Recorded fixtures, oldest first.
    pub matches: Vec<MatchRecord>,
    /// Registered players.
    pub players: Vec<Player>,
    /// Disciplinary suspensions.
    pub suspensions: Vec<Suspension>,
    /// Global switches.
    pub flags: LeagueFlags,
}

impl LeagueSnapshot {
    /// Rebuild the runtime snapshot from stored collections, normalizing
    /// older shapes and re-applying the Sub12 bonus when it was finalized.
    pub fn from_collections(collections: LeagueCollections, rules: &LeagueRules) -> Self {
        let mut snapshot = Self {
            standings: collections.standings.into_iter().map(Into::into).collect(),
            matches: collections.matches.into_iter().map(Into::into).collect(),
            players: collections.players.into_iter().map(Into::into).collect(),
            suspensions: collections.suspensions.into_iter().map(Into::into).collect(),
            flags: collections.flags.into(),
        };
        snapshot.refresh_sub12(rules);
        snapshot
    }

    /// Project the snapshot back into its persisted collections.
    pub fn to_collections(&self) -> LeagueCollections {
        LeagueCollections {
            standings: self.standings.iter().cloned().map(Into::into).collect(),
            matches: self.matches.iter().cloned().map(Into::into).collect(),
            players: self.players.iter().cloned().map(Into::into).collect(),
            suspensions: self.suspensions.iter().cloned().map(Into::into).collect(),
            flags: self.flags.into(),
        }
    }

    /// Find a club by id.
    pub fn club(&self, id: Uuid) -> Option<&ClubStanding> {
        self.standings.iter().find(|club| club.id == id)
    }

    /// Find the recorded fixture for a (home, visitor, day) triple.
    pub fn find_fixture(&self, local: Uuid, visitor: Uuid, date: Date) -> Option<&MatchRecord> {
        self.matches.iter().find(|record| {
            record.local_club_id == local
                && record.visitor_club_id == visitor
                && record.date == date
        })
    }

    /// Record a match result. Submitting the same (home, visitor, day)
    /// fixture again routes to the edit path, reverting the stored result
    /// before applying the new one.
    pub fn record_match(
        &mut self,
        submission: MatchSubmission,
        rules: &LeagueRules,
    ) -> StoreResult<MatchWriteOutcome> {
        let existing = self
            .find_fixture(
                submission.local_club_id,
                submission.visitor_club_id,
                submission.date,
            )
            .map(|record| record.id);
        if let Some(id) = existing {
            return self.edit_match(id, submission, rules);
        }

        let record = MatchRecord {
            id: Uuid::new_v4(),
            local_club_id: submission.local_club_id,
            visitor_club_id: submission.visitor_club_id,
            date: submission.date,
            results: submission.results,
            local_points: 0,
            visitor_points: 0,
        };

        let (standings, points) =
            engine::match_apply::apply_match(&self.standings, &record, Direction::Apply)?;
        self.commit_standings(standings, &[record.local_club_id, record.visitor_club_id]);

        let record = stamped(record, points);
        self.matches.push(record.clone());
        let sub12_finalized_now = self.refresh_sub12(rules);

        Ok(MatchWriteOutcome {
            record,
            kind: MatchWriteKind::Created,
            sub12_finalized_now,
        })
    }

    /// Edit a recorded match: revert the stored result, apply the new one,
    /// and update the record in place. The snapshot is only committed once
    /// both transforms have succeeded.
    pub fn edit_match(
        &mut self,
        match_id: Uuid,
        submission: MatchSubmission,
        rules: &LeagueRules,
    ) -> StoreResult<MatchWriteOutcome> {
        let position = self
            .matches
            .iter()
            .position(|record| record.id == match_id)
            .ok_or(StoreError::MatchNotFound(match_id))?;

        let previous = self.matches[position].clone();
        let (reverted, _) =
            engine::match_apply::apply_match(&self.standings, &previous, Direction::Revert)?;

        let record = MatchRecord {
            id: previous.id,
            local_club_id: submission.local_club_id,
            visitor_club_id: submission.visitor_club_id,
            date: submission.date,
            results: submission.results,
            local_points: 0,
            visitor_points: 0,
        };
        let (standings, points) =
            engine::match_apply::apply_match(&reverted, &record, Direction::Apply)?;
        // The edit may repoint the fixture at different clubs; the reverted
        // pair needs its general block refreshed as much as the applied one.
        self.commit_standings(
            standings,
            &[
                previous.local_club_id,
                previous.visitor_club_id,
                record.local_club_id,
                record.visitor_club_id,
            ],
        );

        let record = stamped(record, points);
        self.matches[position] = record.clone();
        let sub12_finalized_now = self.refresh_sub12(rules);

        Ok(MatchWriteOutcome {
            record,
            kind: MatchWriteKind::Updated,
            sub12_finalized_now,
        })
    }

    /// Mark a series as disabled (or re-enabled) for a club, then rebuild the
    /// standings from history since penalty applicability changed.
    pub fn toggle_series_disabled(
        &mut self,
        club_id: Uuid,
        category: Category,
        disabled: bool,
        rules: &LeagueRules,
    ) -> StoreResult<()> {
        let club = self
            .standings
            .iter_mut()
            .find(|club| club.id == club_id)
            .ok_or(EngineError::ClubNotFound(club_id))?;

        if disabled {
            club.disabled_series.insert(category);
        } else {
            club.disabled_series.remove(&category);
        }

        self.rebuild_from_history(rules);
        Ok(())
    }

    /// Flip the date-3 checkpoint and rebuild the standings under the new
    /// penalty regime. Returns the new flag value.
    pub fn toggle_date3_passed(&mut self, rules: &LeagueRules) -> bool {
        self.flags.date3_passed = !self.flags.date3_passed;
        self.rebuild_from_history(rules);
        self.flags.date3_passed
    }

    /// Roll the season over; promotion/relegation plus the full stats reset.
    /// The Sub12 status returns to pending.
    pub fn rollover_season(&mut self) -> StoreResult<engine::season::RolloverOutcome> {
        let outcome = engine::season::rollover(&self.standings)?;
        self.standings = outcome.standings.clone();
        self.flags.sub12 = Sub12Status::Pending;
        Ok(outcome)
    }

    /// Recompute every club's category tables from the match history, with
    /// penalty overlays where applicable, then refresh the Sub12 bonus.
    pub fn rebuild_from_history(&mut self, rules: &LeagueRules) {
        self.standings = engine::penalty::rebuild_standings(
            &self.standings,
            &self.matches,
            self.flags.date3_passed,
            &rules.schedule,
        );
        self.refresh_sub12(rules);
    }

    /// Re-evaluate the Sub12 state machine: finalize once the round-robin
    /// completes, and re-apply the bonus distribution whenever it is already
    /// finalized. Returns true when this call performed the transition.
    pub fn refresh_sub12(&mut self, rules: &LeagueRules) -> bool {
        match self.flags.sub12 {
            Sub12Status::Finalized => {
                engine::sub12::apply_bonus(&mut self.standings, &rules.sub12_distribution);
                false
            }
            Sub12Status::Pending => {
                if !engine::sub12::completion_reached(&self.standings) {
                    return false;
                }
                self.flags.sub12 = Sub12Status::Finalized;
                engine::sub12::apply_bonus(&mut self.standings, &rules.sub12_distribution);
                true
            }
        }
    }

    /// Install a transformed standings set and refresh the general blocks of
    /// the affected clubs.
    fn commit_standings(&mut self, standings: Vec<ClubStanding>, affected: &[Uuid]) {
        self.standings = standings;
        for club in self.standings.iter_mut() {
            if affected.contains(&club.id) {
                engine::aggregate::recompute_general(club);
            }
        }
    }
}

fn stamped(mut record: MatchRecord, points: MatchPoints) -> MatchRecord {
    record.local_points = points.local;
    record.visitor_points = points.visitor;
    record
}

#[cfg(test)]
mod tests {
    use crate::state::league::{Division, TeamStats};

    use super::*;

    fn rules() -> LeagueRules {
        LeagueRules {
            schedule: ScheduleRules {
                teams_per_division: 16,
                forfeit_goals_against: 1,
            },
            sub12_distribution: vec![100, 90, 85, 80],
        }
    }

    fn snapshot_with_clubs(names: &[(&str, Division)]) -> LeagueSnapshot {
        LeagueSnapshot {
            standings: names
                .iter()
                .map(|(name, division)| ClubStanding::new(Uuid::new_v4(), *name, *division))
                .collect(),
            ..Default::default()
        }
    }

    fn submission(
        local: Uuid,
        visitor: Uuid,
        date: Date,
        scores: &[(Category, i32, i32)],
    ) -> MatchSubmission {
        let mut results = IndexMap::new();
        for (category, local_goals, visitor_goals) in scores {
            results.insert(
                *category,
                CategoryScore {
                    local_goals: Some(*local_goals),
                    visitor_goals: Some(*visitor_goals),
                },
            );
        }
        MatchSubmission {
            local_club_id: local,
            visitor_club_id: visitor,
            date,
            results,
        }
    }

    #[test]
    fn recording_a_match_updates_categories_general_and_audit_points() {
        let mut league =
            snapshot_with_clubs(&[("Avance", Division::Primera), ("Estrella", Division::Primera)]);
        let (home, away) = (league.standings[0].id, league.standings[1].id);

        let outcome = league
            .record_match(
                submission(
                    home,
                    away,
                    time::macros::date!(2025 - 04 - 12),
                    &[
                        (Category::SerieHonor, 2, 1),
                        (Category::Senior35, 0, 0),
                        (Category::Sub12, 5, 0),
                    ],
                ),
                &rules(),
            )
            .unwrap();

        assert_eq!(outcome.kind, MatchWriteKind::Created);
        assert_eq!(outcome.record.local_points, 4);
        assert_eq!(outcome.record.visitor_points, 1);

        let club = league.club(home).unwrap();
        assert_eq!(club.general.points, 4);
        assert_eq!(club.general.played, 1);
        assert_eq!(club.category(Category::Sub12).points, 3);
        assert_eq!(league.matches.len(), 1);
    }

    #[test]
    fn resubmitting_the_same_fixture_edits_instead_of_duplicating() {
        let mut league =
            snapshot_with_clubs(&[("Condor", Division::Primera), ("Junior", Division::Primera)]);
        let (home, away) = (league.standings[0].id, league.standings[1].id);
        let day = time::macros::date!(2025 - 06 - 01);

        league
            .record_match(
                submission(home, away, day, &[(Category::Sub18, 1, 0)]),
                &rules(),
            )
            .unwrap();
        let outcome = league
            .record_match(
                submission(home, away, day, &[(Category::Sub18, 0, 2)]),
                &rules(),
            )
            .unwrap();

        assert_eq!(outcome.kind, MatchWriteKind::Updated);
        assert_eq!(league.matches.len(), 1);

        let club = league.club(home).unwrap();
        let stats = club.category(Category::Sub18);
        assert_eq!((stats.played, stats.won, stats.lost, stats.points), (1, 0, 1, 0));
        let rival = league.club(away).unwrap();
        assert_eq!(rival.category(Category::Sub18).points, 3);
    }

    #[test]
    fn editing_an_unknown_match_fails_without_mutation() {
        let mut league =
            snapshot_with_clubs(&[("Lautaro", Division::Segunda), ("Nacional", Division::Segunda)]);
        let (home, away) = (league.standings[0].id, league.standings[1].id);
        let before = league.clone();

        let missing = Uuid::new_v4();
        let err = league
            .edit_match(
                missing,
                submission(
                    home,
                    away,
                    time::macros::date!(2025 - 06 - 08),
                    &[(Category::Sub14, 1, 1)],
                ),
                &rules(),
            )
            .unwrap_err();

        assert_eq!(err, StoreError::MatchNotFound(missing));
        assert_eq!(league, before);
    }

    #[test]
    fn repointing_an_edit_refreshes_both_club_pairs() {
        let mut league = snapshot_with_clubs(&[
            ("Avance", Division::Primera),
            ("Estrella", Division::Primera),
            ("Union", Division::Primera),
        ]);
        let (a, b, c) = (
            league.standings[0].id,
            league.standings[1].id,
            league.standings[2].id,
        );
        let day = time::macros::date!(2025 - 07 - 06);

        let outcome = league
            .record_match(
                submission(a, b, day, &[(Category::SerieHonor, 2, 0)]),
                &rules(),
            )
            .unwrap();
        assert_eq!(league.club(a).unwrap().general.points, 3);

        // Repoint the fixture at a different visitor with a reversed result.
        league
            .edit_match(
                outcome.record.id,
                submission(a, c, day, &[(Category::SerieHonor, 0, 1)]),
                &rules(),
            )
            .unwrap();

        assert_eq!(league.club(b).unwrap().general, TeamStats::default());
        assert_eq!(league.club(a).unwrap().general.points, 0);
        assert_eq!(league.club(a).unwrap().general.lost, 1);
        assert_eq!(league.club(c).unwrap().general.points, 3);
    }

    #[test]
    fn completing_the_sub12_round_robin_finalizes_and_awards_the_bonus() {
        let mut league =
            snapshot_with_clubs(&[("Andes", Division::Primera), ("Brisas", Division::Primera)]);
        let (a, b) = (league.standings[0].id, league.standings[1].id);
        let league_rules = rules();

        // Two clubs need (2 - 1) * 2 = 2 Sub12 fixtures each.
        let first = league
            .record_match(
                submission(
                    a,
                    b,
                    time::macros::date!(2025 - 03 - 01),
                    &[(Category::Sub12, 2, 0)],
                ),
                &league_rules,
            )
            .unwrap();
        assert!(!first.sub12_finalized_now);
        assert_eq!(league.flags.sub12, Sub12Status::Pending);

        let second = league
            .record_match(
                submission(
                    b,
                    a,
                    time::macros::date!(2025 - 03 - 08),
                    &[(Category::Sub12, 1, 1)],
                ),
                &league_rules,
            )
            .unwrap();

        assert!(second.sub12_finalized_now);
        assert_eq!(league.flags.sub12, Sub12Status::Finalized);
        // Andes tops the Sub12 table; both clubs have zero non-Sub12 points.
        assert_eq!(league.club(a).unwrap().general.points, 100);
        assert_eq!(league.club(b).unwrap().general.points, 90);
    }

    #[test]
    fn bonus_is_recomputed_after_later_standings_changes() {
        let mut league =
            snapshot_with_clubs(&[("Andes", Division::Primera), ("Brisas", Division::Primera)]);
        let (a, b) = (league.standings[0].id, league.standings[1].id);
        let league_rules = rules();

        league
            .record_match(
                submission(
                    a,
                    b,
                    time::macros::date!(2025 - 03 - 01),
                    &[(Category::Sub12, 2, 0)],
                ),
                &league_rules,
            )
            .unwrap();
        league
            .record_match(
                submission(
                    b,
                    a,
                    time::macros::date!(2025 - 03 - 08),
                    &[(Category::Sub12, 0, 1)],
                ),
                &league_rules,
            )
            .unwrap();
        assert_eq!(league.club(a).unwrap().general.points, 100);

        // A non-Sub12 result keeps the bonus on top of the category points.
        league
            .record_match(
                submission(
                    b,
                    a,
                    time::macros::date!(2025 - 04 - 05),
                    &[(Category::SerieHonor, 3, 0)],
                ),
                &league_rules,
            )
            .unwrap();

        assert_eq!(league.club(b).unwrap().general.points, 3 + 90);
        assert_eq!(league.club(a).unwrap().general.points, 100);
    }

    #[test]
    fn date3_toggle_rebuilds_with_penalties() {
        let mut league = snapshot_with_clubs(&[
            ("Ferroviarios", Division::Segunda),
            ("Atlanta", Division::Segunda),
        ]);
        let (home, away) = (league.standings[0].id, league.standings[1].id);
        let league_rules = rules();

        league
            .record_match(
                submission(
                    home,
                    away,
                    time::macros::date!(2025 - 05 - 10),
                    &[(Category::Senior45, 3, 1)],
                ),
                &league_rules,
            )
            .unwrap();
        league
            .toggle_series_disabled(home, Category::Senior45, true, &league_rules)
            .unwrap();

        // Penalty inactive until the checkpoint passes.
        assert_eq!(
            league.club(home).unwrap().category(Category::Senior45).played,
            1
        );

        assert!(league.toggle_date3_passed(&league_rules));
        let punished = league.club(home).unwrap().category(Category::Senior45);
        assert_eq!(punished.played, league_rules.schedule.division_schedule());
        assert_eq!(punished.points, 3);
        assert_eq!(punished.lost, league_rules.schedule.division_schedule() - 1);

        // Toggling back lifts the overlay on the next rebuild.
        assert!(!league.toggle_date3_passed(&league_rules));
        assert_eq!(
            league.club(home).unwrap().category(Category::Senior45).played,
            1
        );
    }

    #[test]
    fn rollover_resets_stats_and_sub12_status() {
        let mut league = snapshot_with_clubs(
            &[
                ("P1", Division::Primera),
                ("P2", Division::Primera),
                ("P3", Division::Primera),
                ("S1", Division::Segunda),
                ("S2", Division::Segunda),
                ("S3", Division::Segunda),
            ],
        );
        league.flags.sub12 = Sub12Status::Finalized;
        for club in league.standings.iter_mut() {
            club.general.points = 10;
        }

        let outcome = league.rollover_season().unwrap();

        assert_eq!(outcome.relegated.len(), 3);
        assert_eq!(outcome.promoted.len(), 3);
        assert_eq!(league.flags.sub12, Sub12Status::Pending);
        for club in &league.standings {
            assert_eq!(club.general.points, 0);
        }
    }
}
