use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{post, put},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        admin::{
            Date3Response, MatchWriteResponse, RecordMatchRequest, RolloverResponse,
            SeriesToggleResponse, ToggleSeriesRequest,
        },
        registry::{CreateSuspensionRequest, PlayerSummary, RegisterPlayerRequest, SuspensionSummary},
    },
    error::AppError,
    services::{registry_service, standings_service},
    state::{SharedState, league::Category},
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin-only management endpoints for standings writes and registrations.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/matches", post(record_match))
        .route("/admin/matches/{id}", put(edit_match))
        .route(
            "/admin/clubs/{id}/series/{category}",
            put(toggle_series),
        )
        .route("/admin/flags/date3/toggle", post(toggle_date3))
        .route("/admin/season/rollover", post(rollover_season))
        .route("/admin/players", post(register_player))
        .route("/admin/suspensions", post(create_suspension))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

/// Record the result sheets of a fixture; resubmitting the same fixture
/// (same clubs and day) edits the stored sheets instead.
#[utoipa::path(
    post,
    path = "/admin/matches",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    request_body = RecordMatchRequest,
    responses(
        (status = 200, description = "Match recorded or updated", body = MatchWriteResponse),
        (status = 400, description = "Invalid submission"),
        (status = 404, description = "Unknown club")
    )
)]
pub async fn record_match(
    State(state): State<SharedState>,
    Json(payload): Json<RecordMatchRequest>,
) -> Result<Json<MatchWriteResponse>, AppError> {
    payload.validate()?;
    let response = standings_service::record_match(&state, payload).await?;
    Ok(Json(response))
}

/// Edit a recorded match by id, reverting the stored result first.
#[utoipa::path(
    put,
    path = "/admin/matches/{id}",
    tag = "admin",
    params(
        ("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream"),
        ("id" = String, Path, description = "Identifier of the match to edit")
    ),
    request_body = RecordMatchRequest,
    responses(
        (status = 200, description = "Match updated", body = MatchWriteResponse),
        (status = 404, description = "Unknown match or club")
    )
)]
pub async fn edit_match(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordMatchRequest>,
) -> Result<Json<MatchWriteResponse>, AppError> {
    payload.validate()?;
    let response = standings_service::edit_match(&state, id, payload).await?;
    Ok(Json(response))
}

/// Disable or re-enable a club's series, rebuilding the standings.
#[utoipa::path(
    put,
    path = "/admin/clubs/{id}/series/{category}",
    tag = "admin",
    params(
        ("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream"),
        ("id" = String, Path, description = "Identifier of the club"),
        ("category" = String, Path, description = "Category label (e.g. `Senior 45`)")
    ),
    request_body = ToggleSeriesRequest,
    responses(
        (status = 200, description = "Series toggled", body = SeriesToggleResponse),
        (status = 404, description = "Unknown club")
    )
)]
pub async fn toggle_series(
    State(state): State<SharedState>,
    Path((id, category)): Path<(Uuid, Category)>,
    Json(payload): Json<ToggleSeriesRequest>,
) -> Result<Json<SeriesToggleResponse>, AppError> {
    let response =
        standings_service::toggle_series(&state, id, category, payload.disabled).await?;
    Ok(Json(response))
}

/// Flip the date-3 penalty checkpoint, rebuilding the standings.
#[utoipa::path(
    post,
    path = "/admin/flags/date3/toggle",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    responses((status = 200, description = "Checkpoint toggled", body = Date3Response))
)]
pub async fn toggle_date3(
    State(state): State<SharedState>,
) -> Result<Json<Date3Response>, AppError> {
    let response = standings_service::toggle_date3(&state).await?;
    Ok(Json(response))
}

/// Process the end-of-season promotion/relegation and stats reset.
#[utoipa::path(
    post,
    path = "/admin/season/rollover",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    responses(
        (status = 200, description = "Season rolled over", body = RolloverResponse),
        (status = 409, description = "A division is too small for promotion/relegation")
    )
)]
pub async fn rollover_season(
    State(state): State<SharedState>,
) -> Result<Json<RolloverResponse>, AppError> {
    let response = standings_service::rollover_season(&state).await?;
    Ok(Json(response))
}

/// Register a player with a club and category.
#[utoipa::path(
    post,
    path = "/admin/players",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    request_body = RegisterPlayerRequest,
    responses(
        (status = 200, description = "Player registered", body = PlayerSummary),
        (status = 400, description = "Invalid RUT or duplicate registration")
    )
)]
pub async fn register_player(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterPlayerRequest>,
) -> Result<Json<PlayerSummary>, AppError> {
    payload.validate()?;
    let response = registry_service::register_player(&state, payload).await?;
    Ok(Json(response))
}

/// Record a disciplinary suspension for a registered player.
#[utoipa::path(
    post,
    path = "/admin/suspensions",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Admin token issued by the /sse/admin stream")),
    request_body = CreateSuspensionRequest,
    responses(
        (status = 200, description = "Suspension recorded", body = SuspensionSummary),
        (status = 404, description = "No registered player with that RUT")
    )
)]
pub async fn create_suspension(
    State(state): State<SharedState>,
    Json(payload): Json<CreateSuspensionRequest>,
) -> Result<Json<SuspensionSummary>, AppError> {
    payload.validate()?;
    let response = registry_service::create_suspension(&state, payload).await?;
    Ok(Json(response))
}

/// Reject requests that do not carry the token negotiated by the admin SSE
/// stream.
async fn require_admin_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    let expected = {
        let guard = state.admin_token().lock().await;
        guard.clone()
    };

    match expected {
        Some(token) if token == provided => Ok(next.run(req).await),
        Some(_) => Err(AppError::Unauthorized("invalid admin token".into())),
        None => Err(AppError::Unauthorized(
            "no admin session is active; connect to /sse/admin first".into(),
        )),
    }
}
