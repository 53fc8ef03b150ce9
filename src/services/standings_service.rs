//! Business logic powering the standings write operations. These helpers
//! coordinate the pure engine transforms, whole-collection persistence, and
//! SSE broadcasts while honouring the single-writer requirement.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::league_store::{self, LeagueStore},
    dto::admin::{
        Date3Response, MatchWriteResponse, RecordMatchRequest, RolloverResponse,
        SeriesToggleResponse,
    },
    error::ServiceError,
    state::{
        SharedState,
        league::{Category, ClubStanding},
        store::{LeagueSnapshot, MatchWriteOutcome},
    },
    services::sse_events,
};

/// Record a match result, or edit the stored sheets when the same fixture is
/// submitted again.
pub async fn record_match(
    state: &SharedState,
    request: RecordMatchRequest,
) -> Result<MatchWriteResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = require_store(state).await?;

    let outcome = state
        .with_league_mut(|league| league.record_match(request.into_submission(), state.rules()))
        .await?;

    persist_league(state, store.as_ref()).await?;
    broadcast_match_write(state, &outcome).await;

    Ok(into_write_response(outcome))
}

/// Edit a recorded match by id: revert the stored result and apply the new one.
pub async fn edit_match(
    state: &SharedState,
    match_id: Uuid,
    request: RecordMatchRequest,
) -> Result<MatchWriteResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = require_store(state).await?;

    let outcome = state
        .with_league_mut(|league| {
            league.edit_match(match_id, request.into_submission(), state.rules())
        })
        .await?;

    persist_league(state, store.as_ref()).await?;
    broadcast_match_write(state, &outcome).await;

    Ok(into_write_response(outcome))
}

/// Mark a club's series as disabled or re-enabled and rebuild the standings
/// under the new penalty configuration.
pub async fn toggle_series(
    state: &SharedState,
    club_id: Uuid,
    category: Category,
    disabled: bool,
) -> Result<SeriesToggleResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = require_store(state).await?;

    state
        .with_league_mut(|league| {
            league.toggle_series_disabled(club_id, category, disabled, state.rules())
        })
        .await?;

    persist_league(state, store.as_ref()).await?;
    info!(%club_id, category = category.label(), disabled, "series toggled");
    sse_events::broadcast_series_toggled(state, club_id, category, disabled);
    sse_events::broadcast_standings_changed(state).await;

    Ok(SeriesToggleResponse {
        club_id,
        category,
        disabled,
    })
}

/// Flip the date-3 penalty checkpoint and rebuild the standings.
pub async fn toggle_date3(state: &SharedState) -> Result<Date3Response, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = require_store(state).await?;

    let date3_passed = state
        .with_league_mut(|league| league.toggle_date3_passed(state.rules()))
        .await;

    persist_league(state, store.as_ref()).await?;
    info!(date3_passed, "date-3 checkpoint toggled");
    sse_events::broadcast_date3_changed(state, date3_passed);
    sse_events::broadcast_standings_changed(state).await;

    Ok(Date3Response { date3_passed })
}

/// Process the season rollover: promotion, relegation, and the stats reset.
pub async fn rollover_season(state: &SharedState) -> Result<RolloverResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = require_store(state).await?;

    let outcome = state
        .with_league_mut(|league| league.rollover_season())
        .await?;

    persist_league(state, store.as_ref()).await?;
    info!(
        relegated = outcome.relegated.len(),
        promoted = outcome.promoted.len(),
        "season rolled over"
    );
    sse_events::broadcast_season_rolled_over(state, &outcome.relegated, &outcome.promoted);
    sse_events::broadcast_standings_changed(state).await;

    Ok(RolloverResponse {
        relegated: outcome.relegated,
        promoted: outcome.promoted,
    })
}

/// Load the stored collections into memory, seeding the standings with the
/// configured clubs when storage has never been written.
pub async fn hydrate_from_store(state: &SharedState) -> Result<(), ServiceError> {
    let _gate = state.lock_writes().await;
    let store = require_store(state).await?;

    let collections = league_store::load_collections(store.as_ref()).await?;
    let mut snapshot = LeagueSnapshot::from_collections(collections, state.rules());

    if snapshot.standings.is_empty() {
        snapshot.standings = seeded_standings(state);
        info!(clubs = snapshot.standings.len(), "seeded standings with configured clubs");
        league_store::save_collections(store.as_ref(), snapshot.to_collections()).await?;
    }

    state.replace_league(snapshot).await;
    Ok(())
}

fn seeded_standings(state: &SharedState) -> Vec<ClubStanding> {
    state
        .config()
        .seed_clubs()
        .iter()
        .map(|seed| ClubStanding::new(Uuid::new_v4(), seed.name.clone(), seed.division))
        .collect()
}

async fn require_store(state: &SharedState) -> Result<Arc<dyn LeagueStore>, ServiceError> {
    state.league_store().await.ok_or(ServiceError::Degraded)
}

/// Persist the whole snapshot; one logical write maps to one full save cycle.
async fn persist_league(state: &SharedState, store: &dyn LeagueStore) -> Result<(), ServiceError> {
    let collections = state.read_league(LeagueSnapshot::to_collections).await;
    league_store::save_collections(store, collections).await?;
    Ok(())
}

async fn broadcast_match_write(state: &SharedState, outcome: &MatchWriteOutcome) {
    sse_events::broadcast_match_recorded(state, outcome);
    sse_events::broadcast_standings_changed(state).await;
    if outcome.sub12_finalized_now {
        info!("Sub12 round-robin completed; bonus points applied");
        sse_events::broadcast_sub12_finalized(state).await;
    }
}

fn into_write_response(outcome: MatchWriteOutcome) -> MatchWriteResponse {
    MatchWriteResponse {
        record: (&outcome.record).into(),
        kind: outcome.kind.into(),
        sub12_finalized: outcome.sub12_finalized_now,
    }
}
