pub mod league;
mod sse;
pub mod store;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock, watch};

use crate::{
    config::AppConfig,
    dao::league_store::LeagueStore,
    state::store::{LeagueRules, LeagueSnapshot},
};

pub use self::sse::SseHub;
use self::sse::SseState;

/// Shared handle to the central application state.
pub type SharedState = Arc<AppState>;

/// Central application state: the in-memory league snapshot, the storage
/// backend handle, and the SSE fan-out hubs.
pub struct AppState {
    league_store: RwLock<Option<Arc<dyn LeagueStore>>>,
    league: RwLock<LeagueSnapshot>,
    rules: LeagueRules,
    config: AppConfig,
    sse: SseState,
    degraded: watch::Sender<bool>,
    write_gate: Mutex<()>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            league_store: RwLock::new(None),
            league: RwLock::new(LeagueSnapshot::default()),
            rules: config.league_rules(),
            config,
            sse: SseState::new(16, 16),
            degraded: degraded_tx,
            write_gate: Mutex::new(()),
        })
    }

    /// Engine policy derived from the loaded configuration.
    pub fn rules(&self) -> &LeagueRules {
        &self.rules
    }

    /// The loaded application configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current league store, if one is installed.
    pub async fn league_store(&self) -> Option<Arc<dyn LeagueStore>> {
        let guard = self.league_store.read().await;
        guard.as_ref().cloned()
    }

    /// Install a new league store implementation and leave degraded mode.
    pub async fn install_league_store(&self, store: Arc<dyn LeagueStore>) {
        {
            let mut guard = self.league_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current league store and enter degraded mode.
    pub async fn clear_league_store(&self) {
        {
            let mut guard = self.league_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.league_store.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        if self.is_degraded().await == value {
            return;
        }

        let _ = self.degraded.send(value);
    }

    /// Read the league snapshot through a projection closure.
    pub async fn read_league<F, T>(&self, read: F) -> T
    where
        F: FnOnce(&LeagueSnapshot) -> T,
    {
        let guard = self.league.read().await;
        read(&guard)
    }

    /// Mutate the league snapshot through a closure.
    ///
    /// Callers performing a logical write must hold the write gate
    /// ([`AppState::lock_writes`]) across the whole transform-persist cycle;
    /// this method only scopes the in-memory borrow.
    pub async fn with_league_mut<F, T>(&self, mutate: F) -> T
    where
        F: FnOnce(&mut LeagueSnapshot) -> T,
    {
        let mut guard = self.league.write().await;
        mutate(&mut guard)
    }

    /// Replace the in-memory league snapshot wholesale (hydration path).
    pub async fn replace_league(&self, snapshot: LeagueSnapshot) {
        let mut guard = self.league.write().await;
        *guard = snapshot;
    }

    /// Serialize mutating operations: standings transforms read the entire
    /// club set, so concurrent partial writes would produce torn reads.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        self.sse.public()
    }

    /// Broadcast hub used for the admin SSE stream.
    pub fn admin_sse(&self) -> &SseHub {
        self.sse.admin().hub()
    }

    /// Token guard that ensures a single admin SSE subscriber at a time.
    pub fn admin_token(&self) -> &Mutex<Option<String>> {
        self.sse.admin().token()
    }
}
