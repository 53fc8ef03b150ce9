//! Read-only projections of the league state for public consumers.

use std::cmp::Ordering;

use crate::{
    dto::{
        common::{ClubSummary, MatchSnapshot, StandingsRow},
        standings::{
            CategoryTableResponse, ClubsResponse, DivisionTableResponse, MatchesResponse,
            Sub12StatusResponse,
        },
    },
    engine::sub12,
    state::{
        SharedState,
        league::{Category, ClubStanding, Division, TeamStats},
    },
};

/// Order two clubs by a stats projection: points, goal difference, goals
/// for, with the club name as the final tie-break for stable display.
fn table_order(a: &ClubStanding, b: &ClubStanding, stats: impl Fn(&ClubStanding) -> TeamStats) -> Ordering {
    let sa = stats(a);
    let sb = stats(b);
    sb.points
        .cmp(&sa.points)
        .then(sb.goal_difference.cmp(&sa.goal_difference))
        .then(sb.goals_for.cmp(&sa.goals_for))
        .then(a.name.cmp(&b.name))
}

/// General standings of one division, best club first.
pub async fn division_table(state: &SharedState, division: Division) -> DivisionTableResponse {
    state
        .read_league(|league| {
            let mut clubs: Vec<&ClubStanding> = league
                .standings
                .iter()
                .filter(|club| club.division == division)
                .collect();
            clubs.sort_by(|a, b| table_order(a, b, |club| club.general));

            DivisionTableResponse {
                division,
                table: clubs.into_iter().map(StandingsRow::general).collect(),
            }
        })
        .await
}

/// Standings of one category, optionally filtered by division.
pub async fn category_table(
    state: &SharedState,
    category: Category,
    division: Option<Division>,
) -> CategoryTableResponse {
    state
        .read_league(|league| {
            let mut clubs: Vec<&ClubStanding> = league
                .standings
                .iter()
                .filter(|club| division.is_none_or(|division| club.division == division))
                .collect();
            clubs.sort_by(|a, b| table_order(a, b, |club| club.category(category)));

            CategoryTableResponse {
                category,
                table: clubs
                    .into_iter()
                    .map(|club| StandingsRow::for_category(club, category))
                    .collect(),
            }
        })
        .await
}

/// Full projections of every club, category tables included.
pub async fn clubs(state: &SharedState) -> ClubsResponse {
    state
        .read_league(|league| ClubsResponse {
            clubs: league.standings.iter().map(ClubSummary::from).collect(),
        })
        .await
}

/// Recorded fixtures, oldest first.
pub async fn matches(state: &SharedState) -> MatchesResponse {
    state
        .read_league(|league| MatchesResponse {
            matches: league.matches.iter().map(MatchSnapshot::from).collect(),
        })
        .await
}

/// Progress of the unified Sub12 competition.
pub async fn sub12_status(state: &SharedState) -> Sub12StatusResponse {
    state.read_league(sub12_status_snapshot).await
}

/// Build the Sub12 progress snapshot from a league reference.
pub(crate) fn sub12_status_snapshot(
    league: &crate::state::store::LeagueSnapshot,
) -> Sub12StatusResponse {
    let table = sub12::sub12_table(&league.standings);
    Sub12StatusResponse {
        status: league.flags.sub12,
        required_matches: sub12::required_matches(league.standings.len()),
        completed: sub12::completion_reached(&league.standings),
        table: table
            .iter()
            .map(|club| StandingsRow::for_category(club, Category::Sub12))
            .collect(),
    }
}
