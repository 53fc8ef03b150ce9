use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::dao::{
    league_store::{
        COLLECTION_FLAGS, COLLECTION_MATCHES, COLLECTION_PLAYERS, COLLECTION_RANKINGS,
        COLLECTION_SUSPENSIONS, LeagueStore,
    },
    models::{ClubEntity, LeagueFlagsEntity, MatchEntity, PlayerEntity, SuspensionEntity},
    storage::StorageResult,
};

use super::{
    config::CouchConfig,
    error::{CouchDaoError, CouchResult},
    models::{CouchCollectionDocument, collection_doc_id},
};

/// CouchDB-backed league store keeping one document per collection.
#[derive(Clone)]
pub struct CouchLeagueStore {
    client: Client,
    base_url: Arc<str>,
    database: Arc<str>,
    auth: Option<(Arc<str>, Arc<str>)>,
}

impl CouchLeagueStore {
    /// Establish a connection to CouchDB and ensure the database exists.
    pub async fn connect(config: CouchConfig) -> CouchResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| CouchDaoError::ClientBuilder { source })?;

        let base_url = Arc::<str>::from(config.base_url.trim_end_matches('/'));
        let database = Arc::<str>::from(config.database);
        let auth = config
            .username
            .zip(config.password)
            .map(|(user, pass)| (Arc::<str>::from(user), Arc::<str>::from(pass)));

        let store = Self {
            client,
            base_url,
            database,
            auth,
        };

        store.ensure_database().await?;
        Ok(store)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}/{}", self.base_url, self.database, path);
        let builder = self.client.request(method, url);
        if let Some((ref user, ref pass)) = self.auth {
            builder.basic_auth(user.as_ref(), Some(pass.as_ref()))
        } else {
            builder
        }
    }

    async fn ensure_database(&self) -> CouchResult<()> {
        let database = self.database.to_string();
        let url = format!("{}/{}", self.base_url, self.database);
        let mut builder = self.client.get(&url);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user.as_ref(), Some(pass.as_ref()));
        }

        let response = builder
            .send()
            .await
            .map_err(|source| CouchDaoError::DatabaseQuery {
                database: database.clone(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => {
                let mut builder = self.client.put(&url);
                if let Some((ref user, ref pass)) = self.auth {
                    builder = builder.basic_auth(user.as_ref(), Some(pass.as_ref()));
                }
                let create =
                    builder
                        .send()
                        .await
                        .map_err(|source| CouchDaoError::DatabaseCreate {
                            database: database.clone(),
                            source,
                        })?;
                if create.status().is_success() {
                    Ok(())
                } else {
                    Err(CouchDaoError::DatabaseStatus {
                        database,
                        status: create.status(),
                    })
                }
            }
            other => Err(CouchDaoError::DatabaseStatus {
                database,
                status: other,
            }),
        }
    }

    async fn get_document<T>(&self, doc_id: &str) -> CouchResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, doc_id)
            .send()
            .await
            .map_err(|source| CouchDaoError::RequestSend {
                path: doc_id.to_string(),
                source,
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                response.json::<T>().await.map(Some).map_err(|source| {
                    CouchDaoError::DecodeResponse {
                        path: doc_id.to_string(),
                        source,
                    }
                })
            }
            other => Err(CouchDaoError::RequestStatus {
                path: doc_id.to_string(),
                status: other,
            }),
        }
    }

    async fn put_document<T>(&self, doc_id: &str, document: &T) -> CouchResult<()>
    where
        T: ?Sized + Serialize,
    {
        let response = self
            .request(Method::PUT, doc_id)
            .json(document)
            .send()
            .await
            .map_err(|source| CouchDaoError::RequestSend {
                path: doc_id.to_string(),
                source,
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(CouchDaoError::RequestStatus {
                path: doc_id.to_string(),
                status: response.status(),
            })
        }
    }

    /// Upsert one collection document, carrying over the stored `_rev`.
    async fn save_collection<T>(&self, collection: &str, data: T) -> CouchResult<()>
    where
        T: Serialize + DeserializeOwned,
    {
        let doc_id = collection_doc_id(collection);
        let mut doc = CouchCollectionDocument::new(collection, data);
        if let Some(existing) = self
            .get_document::<CouchCollectionDocument<serde_json::Value>>(&doc_id)
            .await?
        {
            doc.rev = existing.rev;
        }
        self.put_document(&doc_id, &doc).await
    }

    async fn load_collection<T>(&self, collection: &str) -> CouchResult<Option<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let doc_id = collection_doc_id(collection);
        let maybe_doc = self
            .get_document::<CouchCollectionDocument<T>>(&doc_id)
            .await?;
        Ok(maybe_doc.map(|doc| doc.data))
    }
}

macro_rules! collection_accessors {
    ($save:ident, $load:ident, $entity:ty, $collection:expr) => {
        fn $save(&self, value: Vec<$entity>) -> BoxFuture<'static, StorageResult<()>> {
            let store = self.clone();
            Box::pin(async move {
                store
                    .save_collection($collection, value)
                    .await
                    .map_err(Into::into)
            })
        }

        fn $load(&self) -> BoxFuture<'static, StorageResult<Option<Vec<$entity>>>> {
            let store = self.clone();
            Box::pin(async move { store.load_collection($collection).await.map_err(Into::into) })
        }
    };
}

impl LeagueStore for CouchLeagueStore {
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
                .save_collection(COLLECTION_FLAGS, flags)
                .await
                .map_err(Into::into)
        })
    }

    fn load_flags(&self) -> BoxFuture<'static, StorageResult<Option<LeagueFlagsEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .load_collection(COLLECTION_FLAGS)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let url = format!("{}/{}", store.base_url, store.database);
            let mut builder = store.client.get(&url);
            if let Some((ref user, ref pass)) = store.auth {
                builder = builder.basic_auth(user.as_ref(), Some(pass.as_ref()));
            }

            let response = builder
                .send()
                .await
                .map_err(|source| CouchDaoError::RequestSend {
                    path: url.clone(),
                    source,
                })?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(CouchDaoError::RequestStatus {
                    path: url,
                    status: response.status(),
                }
                .into())
            }
        })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ensure_database().await.map_err(Into::into) })
    }
}
