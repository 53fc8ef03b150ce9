//! Futbol Tracker Back binary entrypoint wiring REST, SSE, and storage layers.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use futbol_tracker_back::{
    config::AppConfig,
    dao::{league_store::LeagueStore, storage::StorageError},
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new(config);

    tokio::spawn(storage_supervisor::run(app_state.clone(), connect_store));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Pick the storage backend: CouchDB when `COUCH_BASE_URL` is set and the
/// feature is compiled in, the file-backed JSON store otherwise.
async fn connect_store() -> Result<Arc<dyn LeagueStore>, StorageError> {
    #[cfg(feature = "couch-store")]
    if env::var_os("COUCH_BASE_URL").is_some() {
        use futbol_tracker_back::dao::league_store::couchdb::{CouchConfig, CouchLeagueStore};

        let config = CouchConfig::from_env()?;
        let store = CouchLeagueStore::connect(config).await?;
        return Ok(Arc::new(store) as Arc<dyn LeagueStore>);
    }

    connect_default_store().await
}

#[cfg(feature = "json-store")]
async fn connect_default_store() -> Result<Arc<dyn LeagueStore>, StorageError> {
    use futbol_tracker_back::dao::league_store::jsonfile::{JsonFileConfig, JsonFileStore};

    let store = JsonFileStore::connect(JsonFileConfig::from_env()).await?;
    Ok(Arc::new(store) as Arc<dyn LeagueStore>)
}

#[cfg(not(feature = "json-store"))]
async fn connect_default_store() -> Result<Arc<dyn LeagueStore>, StorageError> {
    Err(StorageError::unavailable(
        "no storage backend is enabled".into(),
        std::io::Error::new(std::io::ErrorKind::Unsupported, "missing storage feature"),
    ))
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
