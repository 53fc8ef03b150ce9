use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::standings::{
        CategoryTableQuery, CategoryTableResponse, ClubsResponse, DivisionTableResponse,
        MatchesResponse, Sub12StatusResponse,
    },
    error::AppError,
    services::public_service,
    state::{
        SharedState,
        league::{Category, Division},
    },
};

/// Public read-only endpoints exposing the standings and match history.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/standings/divisions/{division}", get(get_division_table))
        .route("/standings/categories/{category}", get(get_category_table))
        .route("/standings/clubs", get(get_clubs))
        .route("/matches", get(get_matches))
        .route("/sub12", get(get_sub12_status))
}

#[utoipa::path(
    get,
    path = "/standings/divisions/{division}",
    tag = "standings",
    params(("division" = String, Path, description = "Division name (`Primera` or `Segunda`)")),
    responses((status = 200, description = "General division table", body = DivisionTableResponse))
)]
/// Return the general standings of one division, best club first.
pub async fn get_division_table(
    State(state): State<SharedState>,
    Path(division): Path<Division>,
) -> Result<Json<DivisionTableResponse>, AppError> {
    Ok(Json(public_service::division_table(&state, division).await))
}

#[utoipa::path(
    get,
    path = "/standings/categories/{category}",
    tag = "standings",
    params(
        ("category" = String, Path, description = "Category label (e.g. `Sub12`, `Senior 45`)"),
        ("division" = Option<String>, Query, description = "Restrict the table to one division")
    ),
    responses((status = 200, description = "Category table", body = CategoryTableResponse))
)]
/// Return the standings of one category, optionally filtered by division.
pub async fn get_category_table(
    State(state): State<SharedState>,
    Path(category): Path<Category>,
    Query(query): Query<CategoryTableQuery>,
) -> Result<Json<CategoryTableResponse>, AppError> {
    Ok(Json(
        public_service::category_table(&state, category, query.division).await,
    ))
}

#[utoipa::path(
    get,
    path = "/standings/clubs",
    tag = "standings",
    responses((status = 200, description = "Every club with its category tables", body = ClubsResponse))
)]
/// Return the full projection of every club.
pub async fn get_clubs(
    State(state): State<SharedState>,
) -> Result<Json<ClubsResponse>, AppError> {
    Ok(Json(public_service::clubs(&state).await))
}

#[utoipa::path(
    get,
    path = "/matches",
    tag = "standings",
    responses((status = 200, description = "Recorded fixtures", body = MatchesResponse))
)]
/// Return the recorded fixtures, oldest first.
pub async fn get_matches(
    State(state): State<SharedState>,
) -> Result<Json<MatchesResponse>, AppError> {
    Ok(Json(public_service::matches(&state).await))
}

#[utoipa::path(
    get,
    path = "/sub12",
    tag = "standings",
    responses((status = 200, description = "Sub12 progress and table", body = Sub12StatusResponse))
)]
/// Return the progress of the unified Sub12 competition.
pub async fn get_sub12_status(
    State(state): State<SharedState>,
) -> Result<Json<Sub12StatusResponse>, AppError> {
    Ok(Json(public_service::sub12_status(&state).await))
}
