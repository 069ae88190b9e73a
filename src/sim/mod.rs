//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per driver interval, never fractional steps
//! - Seeded RNG only
//! - Stable item iteration order (first match wins)
//! - No rendering or platform dependencies

pub mod spawn;
pub mod state;
pub mod tick;

pub use spawn::{random_cell, regenerate_items, safe_cell};
pub use state::{
    Cell, Direction, EndReason, GameEvent, GamePhase, Item, ItemKind, Milestone, RoundState, Trail,
};
pub use tick::tick;
