//! Application services
//!
//! Each service wraps one slice of the backend API. Services depend on port
//! traits, not concrete infrastructure implementations.

pub mod action_service;
pub mod action_status_service;
pub mod alliance_service;
pub mod player_stats_service;

pub use action_service::ActionService;
pub use action_status_service::{ActionStatusService, FetchedSnapshot, RefreshOutcome};
pub use alliance_service::AllianceService;
pub use player_stats_service::{PlayerStatsService, StatDelta, StatSnapshot};
