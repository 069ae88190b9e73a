//! Water Run - a grid arcade game about hauling clean water
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, item spawning)
//! - `modes`: Difficulty profiles and round tuning
//! - `game`: Round lifecycle and host-facing API
//! - `highscores`: Best-score persistence

pub mod game;
pub mod highscores;
pub mod modes;
pub mod sim;

pub use game::{GameLifecycle, Snapshot};
pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreStore};
pub use modes::{DifficultyProfile, GameMode, PollutionPolicy, TuningOverrides};

/// Game configuration constants
pub mod consts {
    /// The playfield is a fixed GRID_SIZE x GRID_SIZE board
    pub const GRID_SIZE: i32 = 20;
    /// Milliseconds per tick before mode scaling (lower = faster)
    pub const BASE_TICK_INTERVAL_MS: u64 = 150;
    /// Fastest allowed tick interval
    pub const MIN_TICK_INTERVAL_MS: u64 = 50;

    /// Truck start cell (board center)
    pub const START_X: i32 = 10;
    pub const START_Y: i32 = 10;

    /// Water drops placed on every item regeneration
    pub const WATER_ITEMS_PER_SPAWN: usize = 3;
    /// Points per collected water drop
    pub const WATER_SCORE: u32 = 10;
    /// People served per collected jerry can
    pub const PEOPLE_PER_JERRY_CAN: u32 = 5;

    /// Placement retries before accepting an overlapping cell
    pub const PLACEMENT_ATTEMPT_CAP: u32 = 50;
}
