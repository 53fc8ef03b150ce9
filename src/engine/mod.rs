//! Standings recalculation engine.
//!
//! Pure, synchronous transforms over [`ClubStanding`] snapshots: applying and
//! reverting match results, deriving general standings from category tables,
//! overlaying disabled-series penalties, closing the Sub12 bonus round, and
//! rolling the season over. Nothing here performs I/O or touches shared
//! state; callers own persistence and write serialization.

pub mod aggregate;
pub mod match_apply;
pub mod penalty;
pub mod season;
pub mod sub12;

use thiserror::Error;
use uuid::Uuid;

use crate::state::league::Division;

/// Schedule and penalty policy the engine needs beyond the standings data.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleRules {
    /// Clubs per division; fixes the divisional round-robin length.
    pub teams_per_division: usize,
    /// Goals conceded per forfeited fixture when a disabled series is scored.
    pub forfeit_goals_against: i32,
}

impl ScheduleRules {
    /// Fixtures each club plays in a divisional double round-robin.
    pub fn division_schedule(&self) -> i32 {
        (self.teams_per_division.saturating_sub(1) * 2) as i32
    }

    /// Fixtures each club plays in the unified cross-division Sub12
    /// round-robin, given the total number of clubs.
    pub fn unified_schedule(&self, clubs_total: usize) -> i32 {
        (clubs_total.saturating_sub(1) * 2) as i32
    }
}

/// Failures raised by engine transforms. All of them indicate a caller
/// contract violation; the input snapshot is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A referenced club id is absent from the standings set.
    #[error("club `{0}` is not part of the standings")]
    ClubNotFound(Uuid),
    /// The two clubs of a match belong to different divisions.
    #[error("clubs `{local}` and `{visitor}` play in different divisions")]
    DivisionMismatch {
        /// Home club id.
        local: Uuid,
        /// Visiting club id.
        visitor: Uuid,
    },
    /// A division is too small for promotion/relegation.
    #[error("division {division:?} has {found} clubs; promotion/relegation needs at least {required}")]
    InsufficientClubs {
        /// Division that failed the check.
        division: Division,
        /// Minimum clubs required.
        required: usize,
        /// Clubs actually present.
        found: usize,
    },
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Points awarded for a single category outcome: 3 for a win, 1 for a draw.
pub(crate) fn outcome_points(scored: i32, conceded: i32) -> i32 {
    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => 3,
        std::cmp::Ordering::Equal => 1,
        std::cmp::Ordering::Less => 0,
    }
}
