use indexmap::IndexMap;
use std::collections::BTreeSet;
use time::Date;
use uuid::Uuid;

use crate::dao::models::{
    CategoryScoreEntity, ClubEntity, LeagueFlagsEntity, MatchEntity, PlayerEntity,
    SuspensionEntity, TeamStatsEntity,
};

/// Age/skill bracket fielding its own round-robin. `Sub12` is special: it
/// never feeds general points directly, only through the end-of-season bonus.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
pub enum Category {
    /// Unified cross-division youth competition feeding the bonus mechanism.
    Sub12,
    /// Under-14 bracket.
    Sub14,
    /// Under-16 bracket.
    Sub16,
    /// Under-18 bracket.
    Sub18,
    /// Senior 45 bracket.
    #[serde(rename = "Senior 45")]
    Senior45,
    /// Senior 35 bracket.
    #[serde(rename = "Senior 35")]
    Senior35,
    /// Senior 50 bracket.
    #[serde(rename = "Senior 50")]
    Senior50,
    /// Second adult series.
    #[serde(rename = "Serie Segunda")]
    SerieSegunda,
    /// First adult series.
    #[serde(rename = "Serie Primera")]
    SeriePrimera,
    /// Honor adult series.
    #[serde(rename = "Serie Honor")]
    SerieHonor,
}

impl Category {
    /// Every category, in fixture-sheet display order.
    pub const ALL: [Category; 10] = [
        Category::Sub12,
        Category::Sub14,
        Category::Sub16,
        Category::Sub18,
        Category::Senior45,
        Category::Senior35,
        Category::Senior50,
        Category::SerieSegunda,
        Category::SeriePrimera,
        Category::SerieHonor,
    ];

    /// Human-readable label, matching the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Category::Sub12 => "Sub12",
            Category::Sub14 => "Sub14",
            Category::Sub16 => "Sub16",
            Category::Sub18 => "Sub18",
            Category::Senior45 => "Senior 45",
            Category::Senior35 => "Senior 35",
            Category::Senior50 => "Senior 50",
            Category::SerieSegunda => "Serie Segunda",
            Category::SeriePrimera => "Serie Primera",
            Category::SerieHonor => "Serie Honor",
        }
    }

    /// Parse a label as produced by [`Category::label`].
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Top-level league tier. Clubs belong to exactly one division at a time and
/// only move at season rollover.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
pub enum Division {
    /// First division.
    Primera,
    /// Second division.
    Segunda,
}

impl Division {
    /// Both divisions, first division first.
    pub const ALL: [Division; 2] = [Division::Primera, Division::Segunda];
}

/// Per-table statistics for one club, either for a single category or for the
/// general (whole-club) standing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamStats {
    /// Ranking points (3 per win, 1 per draw; bonus included once Sub12 closes).
    pub points: i32,
    /// Fixtures counted for this table.
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
    /// `goals_for - goals_against`, kept in sync by every transform.
    pub goal_difference: i32,
}

/// Authoritative standing record for one club.
#[derive(Debug, Clone, PartialEq)]
pub struct ClubStanding {
    /// Stable identifier, assigned at creation, never reused.
    pub id: Uuid,
    /// Club display name.
    pub name: String,
    /// Division the club currently plays in.
    pub division: Division,
    /// Aggregate standing across all non-Sub12 categories.
    pub general: TeamStats,
    /// Per-category statistics; always holds every category.
    pub category_stats: IndexMap<Category, TeamStats>,
    /// Categories the club has forfeited for the season.
    pub disabled_series: BTreeSet<Category>,
}

impl ClubStanding {
    /// Create a club with zeroed statistics in every category.
    pub fn new(id: Uuid, name: impl Into<String>, division: Division) -> Self {
        Self {
            id,
            name: name.into(),
            division,
            general: TeamStats::default(),
            category_stats: zeroed_category_stats(),
            disabled_series: BTreeSet::new(),
        }
    }

    /// Stats for one category. Missing entries read as zeroed, which only
    /// happens transiently for records loaded from an older stored shape.
    pub fn category(&self, category: Category) -> TeamStats {
        self.category_stats.get(&category).copied().unwrap_or_default()
    }
}

/// A fresh category-stats table with every category present and zeroed.
pub fn zeroed_category_stats() -> IndexMap<Category, TeamStats> {
    Category::ALL
        .into_iter()
        .map(|category| (category, TeamStats::default()))
        .collect()
}

/// Goals entered for one category of a fixture. A side left at `None` means
/// the category sheet was not submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryScore {
    /// Goals scored by the home side, when submitted.
    pub local_goals: Option<i32>,
    /// Goals scored by the visiting side, when submitted.
    pub visitor_goals: Option<i32>,
}

impl CategoryScore {
    /// The `(local, visitor)` goal pair when both sides were submitted.
    pub fn played_pair(&self) -> Option<(i32, i32)> {
        match (self.local_goals, self.visitor_goals) {
            (Some(local), Some(visitor)) => Some((local, visitor)),
            _ => None,
        }
    }
}

/// A recorded fixture between two clubs of the same division, carrying one
/// score sheet per category.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Stable identifier for the fixture.
    pub id: Uuid,
    /// Home club.
    pub local_club_id: Uuid,
    /// Visiting club.
    pub visitor_club_id: Uuid,
    /// Day the fixture was played.
    pub date: Date,
    /// Per-category score sheets; always holds every category.
    pub results: IndexMap<Category, CategoryScore>,
    /// Audit total of non-Sub12 points earned by the home side.
    pub local_points: i32,
    /// Audit total of non-Sub12 points earned by the visiting side.
    pub visitor_points: i32,
}

impl MatchRecord {
    /// True when at least one category has a complete score pair.
    pub fn has_any_result(&self) -> bool {
        self.results.values().any(|score| score.played_pair().is_some())
    }
}

/// Registered player, keyed by their national ID (RUT).
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Stable identifier.
    pub id: Uuid,
    /// Normalized RUT (`12.345.678-5`).
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

/// Unit used to express a suspension length.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SuspensionUnit {
    /// Calendar days.
    Days,
    /// Match dates (one per week).
    Dates,
    /// Calendar months.
    Months,
}

/// Disciplinary suspension for a player. `end_date` is exclusive: it is the
/// first day the player is free again.
#[derive(Debug, Clone, PartialEq)]
pub struct Suspension {
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
    /// First day the player is eligible again.
    pub end_date: Date,
}

impl Suspension {
    /// Whether the player is still banned on `date`.
    pub fn is_active_on(&self, date: Date) -> bool {
        date < self.end_date
    }
}

/// Lifecycle of the Sub12 bonus mechanism. `Finalized` means "bonus active":
/// the distribution is recomputed from current data after every standings
/// change, and only a season rollover returns the flag to `Pending`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Sub12Status {
    /// The unified round-robin has not completed yet.
    Pending,
    /// Bonus points are part of the general standings.
    Finalized,
}

// ---------------------------------------------------------------------------
// Entity conversions
// ---------------------------------------------------------------------------

impl From<TeamStatsEntity> for TeamStats {
    fn from(value: TeamStatsEntity) -> Self {
        Self {
            points: value.points,
            played: value.played,
            won: value.won,
            drawn: value.drawn,
            lost: value.lost,
            goals_for: value.goals_for,
            goals_against: value.goals_against,
            goal_difference: value.goal_difference,
        }
    }
}

impl From<TeamStats> for TeamStatsEntity {
    fn from(value: TeamStats) -> Self {
        Self {
            points: value.points,
            played: value.played,
            won: value.won,
            drawn: value.drawn,
            lost: value.lost,
            goals_for: value.goals_for,
            goals_against: value.goals_against,
            goal_difference: value.goal_difference,
        }
    }
}

impl From<ClubEntity> for ClubStanding {
    fn from(value: ClubEntity) -> Self {
        // Stored shapes may predate some categories; fill the gaps with
        // zeroed stats so the engine always sees the full table.
        let mut category_stats = zeroed_category_stats();
        for (category, stats) in value.category_stats {
            category_stats.insert(category, stats.into());
        }

        let mut club = Self {
            id: value.id,
            name: value.name,
            division: value.division,
            general: value.general.into(),
            category_stats,
            disabled_series: value.disabled_series.into_iter().collect(),
        };
        crate::engine::aggregate::recompute_general(&mut club);
        club
    }
}

impl From<ClubStanding> for ClubEntity {
    fn from(value: ClubStanding) -> Self {
        Self {
            id: value.id,
            name: value.name,
            division: value.division,
            general: value.general.into(),
            category_stats: value
                .category_stats
                .into_iter()
                .map(|(category, stats)| (category, stats.into()))
                .collect(),
            disabled_series: value.disabled_series.into_iter().collect(),
        }
    }
}

impl From<CategoryScoreEntity> for CategoryScore {
    fn from(value: CategoryScoreEntity) -> Self {
        Self {
            local_goals: value.local_goals,
            visitor_goals: value.visitor_goals,
        }
    }
}

impl From<CategoryScore> for CategoryScoreEntity {
    fn from(value: CategoryScore) -> Self {
        Self {
            local_goals: value.local_goals,
            visitor_goals: value.visitor_goals,
        }
    }
}

impl From<MatchEntity> for MatchRecord {
    fn from(value: MatchEntity) -> Self {
        let mut results: IndexMap<Category, CategoryScore> = Category::ALL
            .into_iter()
            .map(|category| (category, CategoryScore::default()))
            .collect();
        for (category, score) in value.results {
            results.insert(category, score.into());
        }

        Self {
            id: value.id,
            local_club_id: value.local_club_id,
            visitor_club_id: value.visitor_club_id,
            date: value.date,
            results,
            local_points: value.local_points,
            visitor_points: value.visitor_points,
        }
    }
}

impl From<MatchRecord> for MatchEntity {
    fn from(value: MatchRecord) -> Self {
        Self {
            id: value.id,
            local_club_id: value.local_club_id,
            visitor_club_id: value.visitor_club_id,
            date: value.date,
            results: value
                .results
                .into_iter()
                .map(|(category, score)| (category, score.into()))
                .collect(),
            local_points: value.local_points,
            visitor_points: value.visitor_points,
        }
    }
}

impl From<PlayerEntity> for Player {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            rut: value.rut,
            first_name: value.first_name,
            last_name: value.last_name,
            birth_date: value.birth_date,
            club_id: value.club_id,
            category: value.category,
            age: value.age,
            registration_date: value.registration_date,
        }
    }
}

impl From<Player> for PlayerEntity {
    fn from(value: Player) -> Self {
        Self {
            id: value.id,
            rut: value.rut,
            first_name: value.first_name,
            last_name: value.last_name,
            birth_date: value.birth_date,
            club_id: value.club_id,
            category: value.category,
            age: value.age,
            registration_date: value.registration_date,
        }
    }
}

impl From<SuspensionEntity> for Suspension {
    fn from(value: SuspensionEntity) -> Self {
        Self {
            id: value.id,
            player_rut: value.player_rut,
            start_date: value.start_date,
            duration: value.duration,
            unit: value.unit,
            reason: value.reason,
            end_date: value.end_date,
        }
    }
}

impl From<Suspension> for SuspensionEntity {
    fn from(value: Suspension) -> Self {
        Self {
            id: value.id,
            player_rut: value.player_rut,
            start_date: value.start_date,
            duration: value.duration,
            unit: value.unit,
            reason: value.reason,
            end_date: value.end_date,
        }
    }
}

impl From<LeagueFlagsEntity> for LeagueFlags {
    fn from(value: LeagueFlagsEntity) -> Self {
        Self {
            sub12: if value.sub12_finalized {
                Sub12Status::Finalized
            } else {
                Sub12Status::Pending
            },
            date3_passed: value.date3_passed,
        }
    }
}

impl From<LeagueFlags> for LeagueFlagsEntity {
    fn from(value: LeagueFlags) -> Self {
        Self {
            sub12_finalized: value.sub12 == Sub12Status::Finalized,
            date3_passed: value.date3_passed,
        }
    }
}

/// Global switches persisted alongside the standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeagueFlags {
    /// Lifecycle of the Sub12 bonus mechanism.
    pub sub12: Sub12Status,
    /// Activates disabled-series penalties once the season checkpoint passes.
    pub date3_passed: bool,
}

impl Default for LeagueFlags {
    fn default() -> Self {
        Self {
            sub12: Sub12Status::Pending,
            date3_passed: false,
        }
    }
}
