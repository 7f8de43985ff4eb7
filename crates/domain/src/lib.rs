//! Kingdom domain: the action status snapshot and the pure logic that turns it
//! into a server-driven Actions screen.
//!
//! Nothing here performs I/O. Game rules live behind the backend API; this crate
//! only decides what the client shows for whatever the backend returned.

pub mod cooldown;
pub mod display;
pub mod ids;
pub mod layout;
pub mod ordering;
pub mod render;
pub mod slots;
pub mod snapshot;

pub use cooldown::{format_countdown, Cooldown};
pub use display::{ActionDisplay, SlotDisplay};
pub use ids::{AllianceId, BattleId, ContractId, EmpireId, KingdomId};
pub use layout::{
    render_alliance_requests, render_slots, ActionGroup, AllianceRequestCard, ContractCard,
    RenderedSlot, SlotBody,
};
pub use ordering::{ActionEntry, DEFAULT_DISPLAY_ORDER};
pub use render::{
    render, ActionCard, ActionCommand, ActionHandler, ConfirmationPrompt, Interaction,
    KingdomContext, LockedCard, NavigationTarget, RenderContext, RenderedAction,
};
pub use slots::{content, has_content, resolve_slots, SlotContent};
pub use snapshot::{
    ActionCost, ActionStatus, ActionStatusSnapshot, AllianceRequest, Contract, ContractStatus,
    Rewards, SlotContentType, SlotInfo,
};
