#[cfg(feature = "couch-store")]
pub mod couchdb;
#[cfg(feature = "json-store")]
pub mod jsonfile;

use futures::future::BoxFuture;

use crate::dao::models::{
    ClubEntity, LeagueCollections, LeagueFlagsEntity, MatchEntity, PlayerEntity, SuspensionEntity,
};
use crate::dao::storage::StorageResult;

/// Collection name for the club standings.
pub const COLLECTION_RANKINGS: &str = "rankings";
/// Collection name for the match history.
pub const COLLECTION_MATCHES: &str = "matches";
/// Collection name for registered players.
pub const COLLECTION_PLAYERS: &str = "players";
/// Collection name for suspensions.
pub const COLLECTION_SUSPENSIONS: &str = "suspensions";
/// Collection name for the global flags.
pub const COLLECTION_FLAGS: &str = "flags";

/// Abstraction over the persistence layer for the league collections.
///
/// Every collection is loaded and saved wholesale under a stable key; a
/// `load_*` returning `None` means the collection has never been written.
pub trait LeagueStore: Send + Sync {
    /// Replace the stored club standings.
    fn save_standings(&self, standings: Vec<ClubEntity>) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the stored club standings.
    fn load_standings(&self) -> BoxFuture<'static, StorageResult<Option<Vec<ClubEntity>>>>;
    /// Replace the stored match history.
    fn save_matches(&self, matches: Vec<MatchEntity>) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the stored match history.
    fn load_matches(&self) -> BoxFuture<'static, StorageResult<Option<Vec<MatchEntity>>>>;
    /// Replace the stored players.
    fn save_players(&self, players: Vec<PlayerEntity>) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the stored players.
    fn load_players(&self) -> BoxFuture<'static, StorageResult<Option<Vec<PlayerEntity>>>>;
    /// Replace the stored suspensions.
    fn save_suspensions(
        &self,
        suspensions: Vec<SuspensionEntity>,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the stored suspensions.
    fn load_suspensions(&self) -> BoxFuture<'static, StorageResult<Option<Vec<SuspensionEntity>>>>;
    /// Replace the stored global flags.
    fn save_flags(&self, flags: LeagueFlagsEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the stored global flags.
    fn load_flags(&self) -> BoxFuture<'static, StorageResult<Option<LeagueFlagsEntity>>>;
    /// Verify the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish the backend after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Load every collection, mapping absent ones to their empty defaults.
pub async fn load_collections(store: &dyn LeagueStore) -> StorageResult<LeagueCollections> {
    Ok(LeagueCollections {
        standings: store.load_standings().await?.unwrap_or_default(),
        matches: store.load_matches().await?.unwrap_or_default(),
        players: store.load_players().await?.unwrap_or_default(),
        suspensions: store.load_suspensions().await?.unwrap_or_default(),
        flags: store.load_flags().await?.unwrap_or_default(),
    })
}

/// Save every collection of a full dataset.
pub async fn save_collections(
    store: &dyn LeagueStore,
    collections: LeagueCollections,
) -> StorageResult<()> {
    store.save_standings(collections.standings).await?;
    store.save_matches(collections.matches).await?;
    store.save_players(collections.players).await?;
    store.save_suspensions(collections.suspensions).await?;
    store.save_flags(collections.flags).await?;
    Ok(())
}
