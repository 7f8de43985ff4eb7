//! Presentation layer: the Actions screen controller and its timers.
//!
//! Everything here is UI-toolkit agnostic. A front-end reads `ScreenModel`
//! values and forwards user intents back as `ActionCommand`s.

pub mod actions_screen;
pub mod countdown;
pub mod services;

pub use actions_screen::{ActionsScreen, RewardPopup, ScreenModel};
pub use countdown::CountdownTicker;
pub use services::Services;
