//! Fixed backend routes, relative to the configured API base URL.
//!
//! Generic actions carry their own endpoint in `ActionStatus::endpoint`; only
//! the routes below are known to the client ahead of time.

pub const ACTION_STATUS: &str = "/actions/status";
pub const PLAYER_STATE: &str = "/player/state";
pub const INITIATE_BATTLE: &str = "/battles/initiate";
pub const PROPOSE_ALLIANCE: &str = "/alliances/propose";
pub const ACCEPT_ALLIANCE: &str = "/alliances/accept";
pub const DECLINE_ALLIANCE: &str = "/alliances/decline";
