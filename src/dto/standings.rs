//! DTO definitions for the public standings API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::common::{ClubSummary, MatchSnapshot, StandingsRow},
    state::league::{Category, Division, Sub12Status},
};

/// Query parameters accepted by the category table endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CategoryTableQuery {
    /// Restrict the table to one division when present.
    #[serde(default)]
    pub division: Option<Division>,
}

/// General standings of one division, best club first.
#[derive(Debug, Serialize, ToSchema)]
pub struct DivisionTableResponse {
    pub division: Division,
    pub table: Vec<StandingsRow>,
}

/// Standings of one category across both divisions, best club first.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryTableResponse {
    pub category: Category,
    pub table: Vec<StandingsRow>,
}

/// Full club projections, category tables included.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClubsResponse {
    pub clubs: Vec<ClubSummary>,
}

/// Recorded fixtures, oldest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchesResponse {
    pub matches: Vec<MatchSnapshot>,
}

/// Progress of the unified Sub12 competition.
#[derive(Debug, Serialize, ToSchema)]
pub struct Sub12StatusResponse {
    /// Pending or finalized.
    pub status: Sub12Status,
    /// Matches every club must play for the round-robin to complete.
    pub required_matches: i32,
    /// Whether every club has reached the required count.
    pub completed: bool,
    /// Current Sub12 table, leader first.
    pub table: Vec<StandingsRow>,
}
