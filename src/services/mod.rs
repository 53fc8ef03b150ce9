/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Public read-only projections of the league state.
pub mod public_service;
/// Player registration and suspension management.
pub mod registry_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Standings write operations: match results, penalties, season rollover.
pub mod standings_service;
/// Storage persistence coordinator with reconnect backoff.
pub mod storage_supervisor;
