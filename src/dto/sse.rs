use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::{
    admin::WriteKind,
    common::{ClubSummary, MatchSnapshot, StandingsRow},
};
use crate::state::league::Category;

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// Optional event name for the SSE frame.
    pub event: Option<String>,
    /// Serialized data field.
    pub data: String,
}

impl ServerEvent {
    /// Build an event carrying a pre-rendered data string.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an admin SSE client when it connects.
pub struct AdminHandshake {
    /// Token the client must echo in `X-Admin-Token` on admin routes.
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast after any write that changed the standings.
pub struct StandingsChangedEvent {
    pub clubs: Vec<ClubSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a match result has been recorded or edited.
pub struct MatchRecordedEvent {
    pub record: MatchSnapshot,
    pub kind: WriteKind,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the Sub12 round-robin completes and the bonus is applied.
pub struct Sub12FinalizedEvent {
    /// Final Sub12 table, champion first.
    pub table: Vec<StandingsRow>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a club's series is disabled or re-enabled.
pub struct SeriesToggledEvent {
    pub club_id: Uuid,
    pub category: Category,
    pub disabled: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when the date-3 penalty checkpoint flips.
pub struct Date3ChangedEvent {
    pub date3_passed: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a season rollover has been processed.
pub struct SeasonRolledOverEvent {
    /// Clubs moved down from Primera.
    pub relegated: Vec<Uuid>,
    /// Clubs moved up from Segunda.
    pub promoted: Vec<Uuid>,
}
