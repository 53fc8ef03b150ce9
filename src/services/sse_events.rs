use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::{
        common::{ClubSummary, StandingsRow},
        sse::{
            Date3ChangedEvent, MatchRecordedEvent, SeasonRolledOverEvent, SeriesToggledEvent,
            ServerEvent, StandingsChangedEvent, Sub12FinalizedEvent,
        },
    },
    engine::sub12,
    state::{SharedState, league::Category, store::MatchWriteOutcome},
};

const EVENT_STANDINGS_CHANGED: &str = "standings.changed";
const EVENT_MATCH_RECORDED: &str = "match.recorded";
const EVENT_SUB12_FINALIZED: &str = "sub12.finalized";
const EVENT_SERIES_TOGGLED: &str = "series.toggled";
const EVENT_DATE3_CHANGED: &str = "date3.changed";
const EVENT_SEASON_ROLLED_OVER: &str = "season.rolled_over";

/// Broadcast the full standings snapshot after a write.
pub async fn broadcast_standings_changed(state: &SharedState) {
    let clubs = state
        .read_league(|league| league.standings.iter().map(ClubSummary::from).collect())
        .await;
    let payload = StandingsChangedEvent { clubs };
    send_public_event(state, EVENT_STANDINGS_CHANGED, &payload);
}

/// Broadcast a recorded or edited match result.
pub fn broadcast_match_recorded(state: &SharedState, outcome: &MatchWriteOutcome) {
    let payload = MatchRecordedEvent {
        record: (&outcome.record).into(),
        kind: outcome.kind.into(),
    };
    send_public_event(state, EVENT_MATCH_RECORDED, &payload);
}

/// Broadcast the final Sub12 table once the bonus has been applied.
pub async fn broadcast_sub12_finalized(state: &SharedState) {
    let table = state
        .read_league(|league| {
            sub12::sub12_table(&league.standings)
                .iter()
                .map(|club| StandingsRow::for_category(club, Category::Sub12))
                .collect()
        })
        .await;
    let payload = Sub12FinalizedEvent { table };
    send_public_event(state, EVENT_SUB12_FINALIZED, &payload);
    send_admin_event(state, EVENT_SUB12_FINALIZED, &payload);
}

/// Broadcast a series toggle to public and admin subscribers.
pub fn broadcast_series_toggled(
    state: &SharedState,
    club_id: Uuid,
    category: Category,
    disabled: bool,
) {
    let payload = SeriesToggledEvent {
        club_id,
        category,
        disabled,
    };
    send_public_event(state, EVENT_SERIES_TOGGLED, &payload);
    send_admin_event(state, EVENT_SERIES_TOGGLED, &payload);
}

/// Broadcast the new date-3 checkpoint value.
pub fn broadcast_date3_changed(state: &SharedState, date3_passed: bool) {
    let payload = Date3ChangedEvent { date3_passed };
    send_public_event(state, EVENT_DATE3_CHANGED, &payload);
    send_admin_event(state, EVENT_DATE3_CHANGED, &payload);
}

/// Broadcast the promoted and relegated clubs of a season rollover.
pub fn broadcast_season_rolled_over(state: &SharedState, relegated: &[Uuid], promoted: &[Uuid]) {
    let payload = SeasonRolledOverEvent {
        relegated: relegated.to_vec(),
        promoted: promoted.to_vec(),
    };
    send_public_event(state, EVENT_SEASON_ROLLED_OVER, &payload);
    send_admin_event(state, EVENT_SEASON_ROLLED_OVER, &payload);
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}

fn send_admin_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.admin_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize admin SSE payload"),
    }
}
