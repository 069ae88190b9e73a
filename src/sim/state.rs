//! Round state and core simulation types
//!
//! Everything a round mutates lives in [`RoundState`]; there is no ambient
//! module state. A fresh instance is built per round and discarded on restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on mode selection and a start command
    Idle,
    /// Active gameplay, periodic ticks enabled
    Running,
    /// Round over, only restart is accepted
    Ended,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// Only under [`crate::modes::PollutionPolicy::EndRound`]
    PollutionContact,
}

impl EndReason {
    pub fn message(&self) -> &'static str {
        match self {
            EndReason::WallCollision => "Truck crashed into a wall! Game Over.",
            EndReason::SelfCollision => "Truck crashed into its trail! Game Over.",
            EndReason::PollutionContact => "Truck drove into pollution! Game Over.",
        }
    }
}

/// A grid coordinate, valid when 0 <= x,y < GRID_SIZE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the cell lies on the playfield
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE && self.y >= 0 && self.y < GRID_SIZE
    }

    /// The neighboring cell one step in `dir`
    pub fn step(&self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell::new(self.x + dx, self.y + dy)
    }
}

/// Truck heading, as a unit cell delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (dx, dy) with y growing downward, matching grid row order
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The heading that would reverse this one into the trail
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What touching an item does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Water,
    Pollution,
}

/// An item on the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Cell,
    pub kind: ItemKind,
}

/// The truck's body: head at index 0, insertion order = body order.
///
/// Length is at least 1 for the whole life of a round. No duplicate cells
/// in a non-terminal state (a duplicate head is a self collision and ends
/// the round before it is inserted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trail {
    segments: Vec<Cell>,
}

impl Trail {
    pub fn starting_at(head: Cell) -> Self {
        Self {
            segments: vec![head],
        }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        debug_assert!(!cells.is_empty(), "a trail always has a head");
        Self { segments: cells }
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.segments
    }

    /// Prepend a new head without touching the tail (net growth of 1)
    pub fn grow(&mut self, head: Cell) {
        self.segments.insert(0, head);
    }

    /// Drop the tail cell
    pub fn shrink(&mut self) {
        self.segments.pop();
    }
}

/// Collection badges keyed off the jerry can count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Milestone {
    GoodStart,
    MakingADifference,
    WaterChampion,
    WaterHero,
}

impl Milestone {
    /// Highest threshold met among {5, 10, 25, 50}; below 5 there is no badge
    pub fn for_jerry_cans(count: u32) -> Option<Milestone> {
        if count >= 50 {
            Some(Milestone::WaterHero)
        } else if count >= 25 {
            Some(Milestone::WaterChampion)
        } else if count >= 10 {
            Some(Milestone::MakingADifference)
        } else if count >= 5 {
            Some(Milestone::GoodStart)
        } else {
            None
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Milestone::GoodStart => "Good start! 5+ jerry cans collected!",
            Milestone::MakingADifference => "Making a difference! 10+ jerry cans!",
            Milestone::WaterChampion => "Water Champion! 25+ jerry cans!",
            Milestone::WaterHero => "Water Hero! 50+ jerry cans collected!",
        }
    }
}

/// Events the sim emits for the presentation layer to render
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Transient feedback line (collect / penalty / crash)
    Feedback(String),
    /// The milestone badge changed; `None` clears it
    Milestone(Option<Milestone>),
    /// The round is over
    RoundEnded { reason: EndReason, final_score: u32 },
}

/// Complete state of one round (deterministic given seed + inputs)
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    /// Round seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving all item placement
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub trail: Trail,
    pub direction: Direction,
    pub items: Vec<Item>,
    pub score: u32,
    pub jerry_cans: u32,
    pub people_served: u32,
    pub pollution_hits: u32,
    pub end_reason: Option<EndReason>,
    pub milestone: Option<Milestone>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events, drained by the host after each tick
    pub events: Vec<GameEvent>,
}

impl RoundState {
    /// Fresh round: truck at board center, heading right, nothing scored
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            trail: Trail::starting_at(Cell::new(START_X, START_Y)),
            direction: Direction::Right,
            items: Vec::new(),
            score: 0,
            jerry_cans: 0,
            people_served: 0,
            pollution_hits: 0,
            end_reason: None,
            milestone: None,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Index of the item at `cell`, first match in iteration order
    pub fn item_at(&self, cell: Cell) -> Option<usize> {
        self.items.iter().position(|item| item.pos == cell)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bounds() {
        assert!(Cell::new(0, 0).in_bounds());
        assert!(Cell::new(GRID_SIZE - 1, GRID_SIZE - 1).in_bounds());
        assert!(!Cell::new(-1, 5).in_bounds());
        assert!(!Cell::new(5, GRID_SIZE).in_bounds());
    }

    #[test]
    fn test_direction_deltas_are_units() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((ox, oy), (-dx, -dy));
        }
    }

    #[test]
    fn test_trail_grow_shrink() {
        let mut trail = Trail::starting_at(Cell::new(10, 10));
        trail.grow(Cell::new(11, 10));
        assert_eq!(trail.head(), Cell::new(11, 10));
        assert_eq!(trail.len(), 2);
        trail.shrink();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_milestone_thresholds() {
        assert_eq!(Milestone::for_jerry_cans(0), None);
        assert_eq!(Milestone::for_jerry_cans(4), None);
        assert_eq!(Milestone::for_jerry_cans(5), Some(Milestone::GoodStart));
        assert_eq!(Milestone::for_jerry_cans(9), Some(Milestone::GoodStart));
        assert_eq!(
            Milestone::for_jerry_cans(10),
            Some(Milestone::MakingADifference)
        );
        assert_eq!(Milestone::for_jerry_cans(25), Some(Milestone::WaterChampion));
        assert_eq!(Milestone::for_jerry_cans(49), Some(Milestone::WaterChampion));
        assert_eq!(Milestone::for_jerry_cans(50), Some(Milestone::WaterHero));
        assert_eq!(Milestone::for_jerry_cans(1000), Some(Milestone::WaterHero));
    }

    #[test]
    fn test_fresh_round_state() {
        let state = RoundState::new(42);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.trail.len(), 1);
        assert_eq!(state.trail.head(), Cell::new(START_X, START_Y));
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(state.items.is_empty());
        assert!(state.milestone.is_none());
    }
}
