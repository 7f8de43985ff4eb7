//! Kingdom Player crate.
//!
//! Client core for the server-driven Actions screen: application services over
//! the backend API, infrastructure adapters, and a toolkit-agnostic screen
//! controller.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod presentation;

pub use config::ClientConfig;
pub use presentation::{ActionsScreen, CountdownTicker, RewardPopup, ScreenModel};
