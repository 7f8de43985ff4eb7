//! Service bundle for the presentation layer.
//!
//! Built once from a `RawApiPort` so screens depend on application services,
//! never on infrastructure adapter types.

use std::sync::Arc;
use std::time::Duration;

use crate::application::api::Api;
use crate::application::services::{
    ActionService, ActionStatusService, AllianceService, PlayerStatsService,
};
use crate::application::CommandDispatcher;
use crate::ports::outbound::{ClockPort, RawApiPort};

#[derive(Clone)]
pub struct Services {
    pub status: Arc<ActionStatusService>,
    pub stats: Arc<PlayerStatsService>,
    pub dispatcher: Arc<CommandDispatcher>,
}

impl Services {
    /// Create all services over one raw API port.
    ///
    /// `refresh_debounce` is the snapshot freshness window for non-forced loads.
    pub fn new(
        raw_api: Arc<dyn RawApiPort>,
        clock: Arc<dyn ClockPort>,
        refresh_debounce: Duration,
    ) -> Self {
        let api = Api::new(raw_api);
        let status = Arc::new(ActionStatusService::new(
            api.clone(),
            clock,
            refresh_debounce,
        ));
        let stats = Arc::new(PlayerStatsService::new(api.clone()));
        let dispatcher = Arc::new(CommandDispatcher::new(
            ActionService::new(api.clone()),
            AllianceService::new(api),
            Arc::clone(&status),
            Arc::clone(&stats),
        ));
        Self {
            status,
            stats,
            dispatcher,
        }
    }
}
