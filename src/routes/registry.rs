use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::registry::{PlayersQuery, PlayersResponse, SuspensionsQuery, SuspensionsResponse},
    error::AppError,
    services::registry_service,
    state::SharedState,
};

/// Public read-only endpoints for registered players and suspensions.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/players", get(list_players))
        .route("/suspensions", get(list_suspensions))
}

#[utoipa::path(
    get,
    path = "/players",
    tag = "registry",
    params(("club_id" = Option<String>, Query, description = "Restrict the listing to one club")),
    responses((status = 200, description = "Registered players", body = PlayersResponse))
)]
/// Return the registered players, optionally filtered by club.
pub async fn list_players(
    State(state): State<SharedState>,
    Query(query): Query<PlayersQuery>,
) -> Result<Json<PlayersResponse>, AppError> {
    Ok(Json(
        registry_service::list_players(&state, query.club_id).await,
    ))
}

#[utoipa::path(
    get,
    path = "/suspensions",
    tag = "registry",
    params(("active" = Option<bool>, Query, description = "Only suspensions still running today")),
    responses((status = 200, description = "Suspensions", body = SuspensionsResponse))
)]
/// Return the suspensions, optionally restricted to active ones.
pub async fn list_suspensions(
    State(state): State<SharedState>,
    Query(query): Query<SuspensionsQuery>,
) -> Result<Json<SuspensionsResponse>, AppError> {
    Ok(Json(
        registry_service::list_suspensions(&state, query.active.unwrap_or(false)).await,
    ))
}
