//! DTO definitions for player registration and suspensions.

use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dto::validation::validate_rut,
    state::league::{Category, Player, Suspension, SuspensionUnit},
};

/// Query parameters accepted by the player listing endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PlayersQuery {
    /// Restrict the listing to one club when present.
    #[serde(default)]
    pub club_id: Option<Uuid>,
}

/// Query parameters accepted by the suspension listing endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SuspensionsQuery {
    /// When true, only suspensions still running today are returned.
    #[serde(default)]
    pub active: Option<bool>,
}

/// Payload registering a player with a club and category.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterPlayerRequest {
    /// National ID; accepted formatted or bare.
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = String)]
    pub birth_date: Date,
    pub club_id: Uuid,
    pub category: Category,
}

impl Validate for RegisterPlayerRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(err) = validate_rut(&self.rut) {
            errors.add("rut", err);
        }
        if self.first_name.trim().is_empty() {
            errors.add("first_name", required_error("first name"));
        }
        if self.last_name.trim().is_empty() {
            errors.add("last_name", required_error("last name"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Public projection of a registered player.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlayerSummary {
    pub id: Uuid,
    pub rut: String,
    pub first_name: String,
    pub last_name: String,
    #[schema(value_type = String)]
    pub birth_date: Date,
    pub age: i32,
    pub club_id: Uuid,
    pub category: Category,
    #[schema(value_type = String)]
    pub registration_date: Date,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            rut: player.rut.clone(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            birth_date: player.birth_date,
            age: player.age,
            club_id: player.club_id,
            category: player.category,
            registration_date: player.registration_date,
        }
    }
}

/// Response listing registered players.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayersResponse {
    pub players: Vec<PlayerSummary>,
}

/// Payload creating a suspension for a player.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSuspensionRequest {
    /// National ID of the sanctioned player.
    pub rut: String,
    #[schema(value_type = String)]
    pub start_date: Date,
    /// Length expressed in `unit`; must be at least one.
    pub duration: i32,
    pub unit: SuspensionUnit,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Validate for CreateSuspensionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(err) = validate_rut(&self.rut) {
            errors.add("rut", err);
        }
        if self.duration < 1 {
            let mut err = ValidationError::new("duration_range");
            err.message = Some("duration must be at least one".into());
            errors.add("duration", err);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Public projection of a suspension, with its activity on the query date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuspensionSummary {
    pub id: Uuid,
    pub player_rut: String,
    #[schema(value_type = String)]
    pub start_date: Date,
    pub duration: i32,
    pub unit: SuspensionUnit,
    pub reason: Option<String>,
    /// First day the player is eligible again.
    #[schema(value_type = String)]
    pub end_date: Date,
    /// Whether the ban is still running on the reference date.
    pub active: bool,
}

impl SuspensionSummary {
    /// Project a suspension, computing its activity against `reference`.
    pub fn with_reference(suspension: &Suspension, reference: Date) -> Self {
        Self {
            id: suspension.id,
            player_rut: suspension.player_rut.clone(),
            start_date: suspension.start_date,
            duration: suspension.duration,
            unit: suspension.unit,
            reason: suspension.reason.clone(),
            end_date: suspension.end_date,
            active: suspension.is_active_on(reference),
        }
    }
}

/// Response listing suspensions.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuspensionsResponse {
    pub suspensions: Vec<SuspensionSummary>,
}

fn required_error(field: &str) -> ValidationError {
    let mut err = ValidationError::new("required");
    err.message = Some(format!("{field} must not be empty").into());
    err
}
