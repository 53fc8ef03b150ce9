use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the league tracker backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::sse::admin_stream,
        crate::routes::standings::get_division_table,
        crate::routes::standings::get_category_table,
        crate::routes::standings::get_clubs,
        crate::routes::standings::get_matches,
        crate::routes::standings::get_sub12_status,
        crate::routes::registry::list_players,
        crate::routes::registry::list_suspensions,
        crate::routes::admin::record_match,
        crate::routes::admin::edit_match,
        crate::routes::admin::toggle_series,
        crate::routes::admin::toggle_date3,
        crate::routes::admin::rollover_season,
        crate::routes::admin::register_player,
        crate::routes::admin::create_suspension,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::sse::AdminHandshake,
            crate::dto::common::TeamStatsSnapshot,
            crate::dto::common::StandingsRow,
            crate::dto::common::ClubSummary,
            crate::dto::common::CategoryScoreSnapshot,
            crate::dto::common::MatchSnapshot,
            crate::state::league::Category,
            crate::state::league::Division,
            crate::state::league::Sub12Status,
            crate::state::league::SuspensionUnit,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "standings", description = "Public standings and match history"),
        (name = "registry", description = "Players and suspensions"),
        (name = "admin", description = "Standings writes and registrations"),
    )
)]
pub struct ApiDoc;
