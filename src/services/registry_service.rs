//! Player registration and suspension management.

use time::{Date, Duration, Month, OffsetDateTime};
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::{
        registry::{
            CreateSuspensionRequest, PlayerSummary, PlayersResponse, RegisterPlayerRequest,
            SuspensionSummary, SuspensionsResponse,
        },
        validation::normalize_rut,
    },
    error::ServiceError,
    state::{
        SharedState,
        league::{Player, Suspension, SuspensionUnit},
    },
};

/// Register a player with a club, normalizing their RUT and deriving the age.
pub async fn register_player(
    state: &SharedState,
    request: RegisterPlayerRequest,
) -> Result<PlayerSummary, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.league_store().await.ok_or(ServiceError::Degraded)?;

    let rut = normalize_rut(&request.rut)
        .ok_or_else(|| ServiceError::InvalidInput(format!("invalid RUT `{}`", request.rut)))?;
    let today = today();

    let player = Player {
        id: Uuid::new_v4(),
        rut,
        first_name: request.first_name,
        last_name: request.last_name,
        birth_date: request.birth_date,
        club_id: request.club_id,
        category: request.category,
        age: age_on(request.birth_date, today),
        registration_date: today,
    };

    let stored = state
        .with_league_mut(|league| {
            if league.club(player.club_id).is_none() {
                return Err(ServiceError::NotFound(format!(
                    "club `{}` not found",
                    player.club_id
                )));
            }
            if league.players.iter().any(|existing| existing.rut == player.rut) {
                return Err(ServiceError::InvalidInput(format!(
                    "a player with RUT `{}` is already registered",
                    player.rut
                )));
            }
            league.players.push(player.clone());
            Ok(player.clone())
        })
        .await?;

    let players = state
        .read_league(|league| league.players.iter().cloned().map(Into::into).collect())
        .await;
    store.save_players(players).await?;

    info!(rut = %stored.rut, club = %stored.club_id, "player registered");
    Ok(PlayerSummary::from(&stored))
}

/// List registered players, optionally filtered by club.
pub async fn list_players(state: &SharedState, club_id: Option<Uuid>) -> PlayersResponse {
    state
        .read_league(|league| PlayersResponse {
            players: league
                .players
                .iter()
                .filter(|player| club_id.is_none_or(|club| player.club_id == club))
                .map(PlayerSummary::from)
                .collect(),
        })
        .await
}

/// Create a suspension for a player, computing the exclusive end date from
/// the duration unit.
pub async fn create_suspension(
    state: &SharedState,
    request: CreateSuspensionRequest,
) -> Result<SuspensionSummary, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.league_store().await.ok_or(ServiceError::Degraded)?;

    let rut = normalize_rut(&request.rut)
        .ok_or_else(|| ServiceError::InvalidInput(format!("invalid RUT `{}`", request.rut)))?;

    let suspension = Suspension {
        id: Uuid::new_v4(),
        player_rut: rut,
        start_date: request.start_date,
        duration: request.duration,
        unit: request.unit,
        reason: request.reason,
        end_date: suspension_end_date(request.start_date, request.duration, request.unit),
    };

    let stored = state
        .with_league_mut(|league| {
            if !league
                .players
                .iter()
                .any(|player| player.rut == suspension.player_rut)
            {
                return Err(ServiceError::NotFound(format!(
                    "no registered player with RUT `{}`",
                    suspension.player_rut
                )));
            }
            league.suspensions.push(suspension.clone());
            Ok(suspension.clone())
        })
        .await?;

    let suspensions = state
        .read_league(|league| league.suspensions.iter().cloned().map(Into::into).collect())
        .await;
    store.save_suspensions(suspensions).await?;

    info!(rut = %stored.player_rut, until = %stored.end_date, "suspension recorded");
    Ok(SuspensionSummary::with_reference(&stored, today()))
}

/// List suspensions, optionally restricted to the ones still running today.
pub async fn list_suspensions(state: &SharedState, active_only: bool) -> SuspensionsResponse {
    let reference = today();
    state
        .read_league(|league| SuspensionsResponse {
            suspensions: league
                .suspensions
                .iter()
                .filter(|suspension| !active_only || suspension.is_active_on(reference))
                .map(|suspension| SuspensionSummary::with_reference(suspension, reference))
                .collect(),
        })
        .await
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Age in full years on `reference`.
fn age_on(birth_date: Date, reference: Date) -> i32 {
    let mut age = reference.year() - birth_date.year();
    let before_birthday = (reference.month() as u8, reference.day())
        < (birth_date.month() as u8, birth_date.day());
    if before_birthday {
        age -= 1;
    }
    age
}

/// Exclusive end date of a suspension: the first day the player is free.
/// A "date" is one match date per week.
fn suspension_end_date(start: Date, duration: i32, unit: SuspensionUnit) -> Date {
    match unit {
        SuspensionUnit::Days => start.saturating_add(Duration::days(i64::from(duration))),
        SuspensionUnit::Dates => start.saturating_add(Duration::weeks(i64::from(duration))),
        SuspensionUnit::Months => add_months(start, duration),
    }
}

/// Calendar-month addition, clamping the day to the target month's length.
fn add_months(date: Date, months: i32) -> Date {
    let zero_based = date.year() * 12 + i32::from(date.month() as u8) - 1 + months;
    let year = zero_based.div_euclid(12);
    let month = Month::try_from((zero_based.rem_euclid(12) + 1) as u8)
        .unwrap_or(Month::January);

    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn age_counts_full_years_only() {
        assert_eq!(age_on(date!(2010 - 06 - 15), date!(2025 - 06 - 14)), 14);
        assert_eq!(age_on(date!(2010 - 06 - 15), date!(2025 - 06 - 15)), 15);
        assert_eq!(age_on(date!(2010 - 06 - 15), date!(2025 - 12 - 01)), 15);
    }

    #[test]
    fn day_suspension_frees_the_player_the_next_morning() {
        let end = suspension_end_date(date!(2025 - 03 - 10), 1, SuspensionUnit::Days);
        assert_eq!(end, date!(2025 - 03 - 11));
    }

    #[test]
    fn date_suspension_spans_whole_weeks() {
        let end = suspension_end_date(date!(2025 - 03 - 10), 2, SuspensionUnit::Dates);
        assert_eq!(end, date!(2025 - 03 - 24));
    }

    #[test]
    fn month_suspension_clamps_to_shorter_months() {
        let end = suspension_end_date(date!(2025 - 01 - 31), 1, SuspensionUnit::Months);
        assert_eq!(end, date!(2025 - 02 - 28));

        let year_cross = suspension_end_date(date!(2024 - 11 - 30), 3, SuspensionUnit::Months);
        assert_eq!(year_cross, date!(2025 - 02 - 28));
    }
}
