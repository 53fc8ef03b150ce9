//! DTO definitions used by the admin REST API and documentation layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dto::common::MatchSnapshot,
    state::{
        league::{Category, CategoryScore},
        store::{MatchSubmission, MatchWriteKind},
    },
};

/// Goals entered for one category of a fixture. Leaving both sides empty
/// skips the category.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct CategoryScoreInput {
    pub local_goals: Option<i32>,
    pub visitor_goals: Option<i32>,
}

/// Payload recording (or editing) the result sheets of a fixture.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordMatchRequest {
    pub local_club_id: Uuid,
    pub visitor_club_id: Uuid,
    #[schema(value_type = String)]
    pub date: Date,
    /// Score sheet per category; omitted categories count as not played.
    #[schema(value_type = std::collections::HashMap<String, CategoryScoreInput>)]
    pub results: IndexMap<Category, CategoryScoreInput>,
}

impl Validate for RecordMatchRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.local_club_id == self.visitor_club_id {
            let mut err = ValidationError::new("same_club");
            err.message = Some("home and visiting club must differ".into());
            errors.add("visitor_club_id", err);
        }

        let mut any_complete = false;
        for score in self.results.values() {
            for goals in [score.local_goals, score.visitor_goals].into_iter().flatten() {
                if goals < 0 {
                    let mut err = ValidationError::new("negative_goals");
                    err.message = Some("goal counts must not be negative".into());
                    errors.add("results", err);
                }
            }
            if score.local_goals.is_some() && score.visitor_goals.is_some() {
                any_complete = true;
            }
        }

        if !any_complete {
            let mut err = ValidationError::new("no_results");
            err.message = Some("at least one category needs both goal values".into());
            errors.add("results", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl RecordMatchRequest {
    /// Convert the request into an engine submission, filling the categories
    /// the client omitted.
    pub fn into_submission(self) -> MatchSubmission {
        let mut results: IndexMap<Category, CategoryScore> = Category::ALL
            .into_iter()
            .map(|category| (category, CategoryScore::default()))
            .collect();
        for (category, score) in self.results {
            results.insert(
                category,
                CategoryScore {
                    local_goals: score.local_goals,
                    visitor_goals: score.visitor_goals,
                },
            );
        }

        MatchSubmission {
            local_club_id: self.local_club_id,
            visitor_club_id: self.visitor_club_id,
            date: self.date,
            results,
        }
    }
}

/// Whether a match write created a new fixture or replaced an existing one.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WriteKind {
    Created,
    Updated,
}

impl From<MatchWriteKind> for WriteKind {
    fn from(kind: MatchWriteKind) -> Self {
        match kind {
            MatchWriteKind::Created => WriteKind::Created,
            MatchWriteKind::Updated => WriteKind::Updated,
        }
    }
}

/// Response for a recorded or edited match.
#[derive(Debug, Serialize, ToSchema)]
pub struct MatchWriteResponse {
    pub record: MatchSnapshot,
    pub kind: WriteKind,
    /// True when this write completed the Sub12 round-robin.
    pub sub12_finalized: bool,
}

/// Request to mark a club's series as disabled or re-enabled.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleSeriesRequest {
    pub disabled: bool,
}

/// Response confirming the new state of a club's series.
#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesToggleResponse {
    pub club_id: Uuid,
    pub category: Category,
    pub disabled: bool,
}

/// Response exposing the date-3 penalty checkpoint flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct Date3Response {
    pub date3_passed: bool,
}

/// Response summarising a season rollover.
#[derive(Debug, Serialize, ToSchema)]
pub struct RolloverResponse {
    /// Clubs moved down from Primera.
    pub relegated: Vec<Uuid>,
    /// Clubs moved up from Segunda.
    pub promoted: Vec<Uuid>,
}

/// Generic action acknowledgement used by admin endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub message: String,
}
