//! Application layer - Use cases and orchestration

pub mod api;
pub mod command_dispatcher;
pub mod error;
pub mod services;
pub mod throttle;

pub use api::Api;
pub use command_dispatcher::{CommandDispatcher, CommandReport};
pub use error::{CommandError, PreconditionError};
pub use throttle::{FetchPhase, FetchThrottle, SuppressReason};
