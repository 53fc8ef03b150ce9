use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::state::league::{Category, Division, SuspensionUnit};

/// Stats row persisted for one table (general or per category).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamStatsEntity {
    /// Ranking points.
    pub points: i32,
    /// Fixtures counted.
    pub played: i32,
    /// Matches won.
    pub won: i32,
    /// Matches drawn.
    pub drawn: i32,
    /// Matches lost.
    pub lost: i32,
    /// Goals scored.
    pub goals_for: i32,
    /// Goals conceded.
    pub goals_against: i32,
    /// Goals scored minus goals conceded.
    pub goal_difference: i32,
}

/// Club standing persisted by the storage layer.
///
/// `category_stats` may be partial in documents written by older builds; the
/// runtime conversion fills the missing categories and recomputes the general
/// block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClubEntity {
    /// Stable identifier for the club.
    pub id: Uuid,
    /// Club display name.
    pub name: String,
    /// Division the club plays in.
    pub division: Division,
    /// Aggregate standing across non-Sub12 categories.
    #[serde(default)]
    pub general: TeamStatsEntity,
    /// Per-category statistics.
    #[serde(default)]
    pub category_stats: IndexMap<Category, TeamStatsEntity>,
    /// Categories the club has forfeited.
    #[serde(default)]
    pub disabled_series: Vec<Category>,
}

/// Score sheet persisted for one category of a fixture.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryScoreEntity {
    /// Home goals, when submitted.
    pub local_goals: Option<i32>,
    /// Visitor goals, when submitted.
    pub visitor_goals: Option<i32>,
}

/// Fixture persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEntity {
    /// Stable identifier for the fixture.
    pub id: Uuid,
    /// Home club.
    pub local_club_id: Uuid,
    /// Visiting club.
    pub visitor_club_id: Uuid,
    /// Day the fixture was played.
    pub date: Date,
    /// Per-category score sheets.
    #[serde(default)]
    pub results: IndexMap<Category, CategoryScoreEntity>,
    /// Audit total of non-Sub12 points for the home side.
    #[serde(default)]
    pub local_points: i32,
    /// Audit total of non-Sub12 points for the visiting side.
    #[serde(default)]
    pub visitor_points: i32,
}

/// Registered player persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Stable identifier.
    pub id: Uuid,
    /// Normalized RUT.
    pub rut: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub birth_date: Date,
    /// Club the player is registered with.
    pub club_id: Uuid,
    /// Category the player is registered in.
    pub category: Category,
    /// Age in full years at registration time.
    pub age: i32,
    /// Day the registration was recorded.
    pub registration_date: Date,
}

/// Disciplinary suspension persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuspensionEntity {
    /// Stable identifier.
    pub id: Uuid,
    /// Normalized RUT of the sanctioned player.
    pub player_rut: String,
    /// First day of the ban.
    pub start_date: Date,
    /// Length expressed in `unit`.
    pub duration: i32,
    /// Unit for `duration`.
    pub unit: SuspensionUnit,
    /// Optional sanction motive.
    pub reason: Option<String>,
    /// First day the player is eligible again (exclusive bound).
    pub end_date: Date,
}

/// Global switches persisted alongside the standings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueFlagsEntity {
    /// Whether the Sub12 bonus has been folded into the general standings.
    #[serde(default)]
    pub sub12_finalized: bool,
    /// Whether the date-3 penalty checkpoint has passed.
    #[serde(default)]
    pub date3_passed: bool,
}

/// The full persisted dataset, loaded and saved as whole collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueCollections {
    /// Club standings.
    pub standings: Vec<ClubEntity>,
    /// Recorded fixtures.
    pub matches: Vec<MatchEntity>,
    /// Registered players.
    pub players: Vec<PlayerEntity>,
    /// Disciplinary suspensions.
    pub suspensions: Vec<SuspensionEntity>,
    /// Global switches.
    pub flags: LeagueFlagsEntity,
}
