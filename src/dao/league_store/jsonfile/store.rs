use std::path::PathBuf;

use futures::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::dao::{
    league_store::{
        COLLECTION_FLAGS, COLLECTION_MATCHES, COLLECTION_PLAYERS, COLLECTION_RANKINGS,
        COLLECTION_SUSPENSIONS, LeagueStore,
    },
    models::{ClubEntity, LeagueFlagsEntity, MatchEntity, PlayerEntity, SuspensionEntity},
    storage::StorageResult,
};

use super::{
    config::JsonFileConfig,
    error::{JsonDaoError, JsonFileResult},
};

/// File-backed store keeping one JSON document per collection, the service
/// equivalent of the browser local-storage keys the league data started in.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open the store, creating the data directory when missing.
    pub async fn connect(config: JsonFileConfig) -> JsonFileResult<Self> {
        fs::create_dir_all(&config.data_dir)
            .await
            .map_err(|source| JsonDaoError::CreateRoot {
                path: config.data_dir.clone(),
                source,
            })?;

        Ok(Self {
            root: config.data_dir,
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    async fn read_collection<T>(&self, collection: &'static str) -> JsonFileResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let path = self.collection_path(collection);
        let contents = match fs::read(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(JsonDaoError::Io { path, source }),
        };

        serde_json::from_slice(&contents)
            .map(Some)
            .map_err(|source| JsonDaoError::Decode {
                collection,
                path,
                source,
            })
    }

    /// Write through a sibling temp file and rename, so a crash mid-write
    /// never leaves a truncated collection behind.
    async fn write_collection<T>(&self, collection: &'static str, value: &T) -> JsonFileResult<()>
    where
        T: Serialize,
    {
        let payload = serde_json::to_vec_pretty(value)
            .map_err(|source| JsonDaoError::Encode { collection, source })?;

        let path = self.collection_path(collection);
        let tmp = self.collection_path(&format!("{collection}.tmp"));

        fs::write(&tmp, payload).await.map_err(|source| JsonDaoError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|source| JsonDaoError::Io { path, source })
    }

    async fn probe(&self) -> JsonFileResult<()> {
        fs::metadata(&self.root)
            .await
            .map_err(|source| JsonDaoError::Io {
                path: self.root.clone(),
                source,
            })?;
        Ok(())
    }
}

macro_rules! collection_accessors {
    ($save:ident, $load:ident, $entity:ty, $collection:expr) => {
        fn $save(&self, value: Vec<$entity>) -> BoxFuture<'static, StorageResult<()>> {
            let store = self.clone();
            Box::pin(async move {
                store
                    .write_collection($collection, &value)
                    .await
                    .map_err(Into::into)
            })
        }

        fn $load(&self) -> BoxFuture<'static, StorageResult<Option<Vec<$entity>>>> {
            let store = self.clone();
            Box::pin(async move { store.read_collection($collection).await.map_err(Into::into) })
        }
    };
}

impl LeagueStore for JsonFileStore {
    collection_accessors!(save_standings, load_standings, ClubEntity, COLLECTION_RANKINGS);
    collection_accessors!(save_matches, load_matches, MatchEntity, COLLECTION_MATCHES);
    collection_accessors!(save_players, load_players, PlayerEntity, COLLECTION_PLAYERS);
    collection_accessors!(
        save_suspensions,
        load_suspensions,
        SuspensionEntity,
        COLLECTION_SUSPENSIONS
    );

    fn save_flags(&self, flags: LeagueFlagsEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .write_collection(COLLECTION_FLAGS, &flags)
                .await
                .map_err(Into::into)
        })
    }

    fn load_flags(&self) -> BoxFuture<'static, StorageResult<Option<LeagueFlagsEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .read_collection(COLLECTION_FLAGS)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.probe().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            fs::create_dir_all(&store.root)
                .await
                .map_err(|source| JsonDaoError::CreateRoot {
                    path: store.root.clone(),
                    source,
                })?;
            Ok(())
        })
    }
}
