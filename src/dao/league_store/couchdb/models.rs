use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Prefix shared by every league collection document.
pub const LEAGUE_PREFIX: &str = "league::";

/// CouchDB document wrapping one whole collection.
///
/// The league persists entire collections per write, so each collection maps
/// to a single document whose `_rev` is carried across upserts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchCollectionDocument<T> {
    /// Document identifier (`league::<collection>`).
    #[serde(rename = "_id")]
    pub id: String,
    /// Revision marker required by CouchDB on updates.
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    /// The collection payload.
    pub data: T,
}

impl<T> CouchCollectionDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Wrap a collection payload into a fresh document without a revision.
    pub fn new(collection: &str, data: T) -> Self {
        Self {
            id: collection_doc_id(collection),
            rev: None,
            data,
        }
    }
}

/// Document identifier for a collection name.
pub fn collection_doc_id(collection: &str) -> String {
    format!("{LEAGUE_PREFIX}{collection}")
}
