use indexmap::IndexMap;
use serde::Serialize;
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::state::league::{
    Category, CategoryScore, ClubStanding, Division, MatchRecord, TeamStats,
};

/// Snapshot of one stats row for DTO use.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct TeamStatsSnapshot {
    pub points: i32,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
}

impl From<TeamStats> for TeamStatsSnapshot {
    fn from(stats: TeamStats) -> Self {
        Self {
            points: stats.points,
            played: stats.played,
            won: stats.won,
            drawn: stats.drawn,
            lost: stats.lost,
            goals_for: stats.goals_for,
            goals_against: stats.goals_against,
            goal_difference: stats.goal_difference,
        }
    }
}

/// One row of a ranking table (general, per-category, or Sub12).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingsRow {
    pub id: Uuid,
    pub name: String,
    pub division: Division,
    pub stats: TeamStatsSnapshot,
}

impl StandingsRow {
    /// Row showing the club's general standing.
    pub fn general(club: &ClubStanding) -> Self {
        Self {
            id: club.id,
            name: club.name.clone(),
            division: club.division,
            stats: club.general.into(),
        }
    }

    /// Row showing the club's standing in one category.
    pub fn for_category(club: &ClubStanding, category: Category) -> Self {
        Self {
            id: club.id,
            name: club.name.clone(),
            division: club.division,
            stats: club.category(category).into(),
        }
    }
}

/// Full projection of a club, category tables included.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClubSummary {
    pub id: Uuid,
    pub name: String,
    pub division: Division,
    pub general: TeamStatsSnapshot,
    #[schema(value_type = std::collections::HashMap<String, TeamStatsSnapshot>)]
    pub category_stats: IndexMap<Category, TeamStatsSnapshot>,
    pub disabled_series: Vec<Category>,
}

impl From<&ClubStanding> for ClubSummary {
    fn from(club: &ClubStanding) -> Self {
        Self {
            id: club.id,
            name: club.name.clone(),
            division: club.division,
            general: club.general.into(),
            category_stats: club
                .category_stats
                .iter()
                .map(|(category, stats)| (*category, (*stats).into()))
                .collect(),
            disabled_series: club.disabled_series.iter().copied().collect(),
        }
    }
}

/// Snapshot of one category score sheet.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CategoryScoreSnapshot {
    pub local_goals: Option<i32>,
    pub visitor_goals: Option<i32>,
}

impl From<CategoryScore> for CategoryScoreSnapshot {
    fn from(score: CategoryScore) -> Self {
        Self {
            local_goals: score.local_goals,
            visitor_goals: score.visitor_goals,
        }
    }
}

/// Snapshot of a recorded fixture, audit points included.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MatchSnapshot {
    pub id: Uuid,
    pub local_club_id: Uuid,
    pub visitor_club_id: Uuid,
    #[schema(value_type = String)]
    pub date: Date,
    #[schema(value_type = std::collections::HashMap<String, CategoryScoreSnapshot>)]
    pub results: IndexMap<Category, CategoryScoreSnapshot>,
    pub local_points: i32,
    pub visitor_points: i32,
}

impl From<&MatchRecord> for MatchSnapshot {
    fn from(record: &MatchRecord) -> Self {
        Self {
            id: record.id,
            local_club_id: record.local_club_id,
            visitor_club_id: record.visitor_club_id,
            date: record.date,
            results: record
                .results
                .iter()
                .map(|(category, score)| (*category, (*score).into()))
                .collect(),
            local_points: record.local_points,
            visitor_points: record.visitor_points,
        }
    }
}
