//! Round lifecycle
//!
//! Owns the single mutable [`RoundState`], gates input by phase, and exposes
//! the host-facing API: start/restart/set_direction/tick plus a read-only
//! snapshot and drained events.
//!
//! The periodic driver is host-owned: the lifecycle publishes
//! [`GameLifecycle::tick_interval`] and guarantees that `tick()` outside the
//! Running phase is a no-op, so a timer that outlives a round can never
//! mutate a discarded state. Execution is single-threaded and cooperative;
//! a host using real threads must serialize tick, input, and restart calls.

use std::time::Duration;

use rand::RngCore;
use serde::Serialize;

use crate::highscores::{ScoreStore, record_if_best};
use crate::modes::{DifficultyProfile, GameMode, TuningOverrides};
use crate::sim;
use crate::sim::state::{
    Cell, Direction, GameEvent, GamePhase, Item, Milestone, RoundState,
};

/// Read-only view of the round for renderers and HUDs
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub jerry_cans: u32,
    pub people_served: u32,
    pub pollution_hits: u32,
    pub trail: &'a [Cell],
    pub items: &'a [Item],
    pub direction: Direction,
    pub milestone: Option<Milestone>,
    pub high_score: u32,
}

/// The three-state round machine: Idle -> Running -> Ended -> Idle
pub struct GameLifecycle<S: ScoreStore> {
    profile: DifficultyProfile,
    overrides: TuningOverrides,
    state: RoundState,
    store: S,
}

impl<S: ScoreStore> GameLifecycle<S> {
    pub fn new(store: S) -> Self {
        Self {
            profile: DifficultyProfile::for_mode(GameMode::Easy),
            overrides: TuningOverrides::default(),
            state: RoundState::new(0),
            store,
        }
    }

    /// Pre-round tuning adjustments; applied at the next start
    pub fn set_overrides(&mut self, overrides: TuningOverrides) {
        self.overrides = overrides;
    }

    /// Idle -> Running with a random seed
    pub fn start(&mut self, mode: GameMode) {
        let seed = rand::rng().next_u64();
        self.start_seeded(mode, seed);
    }

    /// Start from a raw mode name; unknown names fall back to Easy
    pub fn start_named(&mut self, mode: &str) {
        self.start(GameMode::from_str_lossy(mode));
    }

    /// Fixed-seed start for deterministic replays and tests.
    ///
    /// Accepted from Idle or Ended (restart-with-same-mode shortcut); a
    /// running round must end before it can be replaced.
    pub fn start_seeded(&mut self, mode: GameMode, seed: u64) {
        if self.state.phase == GamePhase::Running {
            log::warn!("start ignored: round already running");
            return;
        }
        self.profile = DifficultyProfile::for_mode(mode).with_overrides(&self.overrides);

        // Fresh state; the previous round is discarded, not reused
        let mut state = RoundState::new(seed);
        state.items = sim::regenerate_items(&mut state.rng, &state.trail, &self.profile);
        state.phase = GamePhase::Running;
        self.state = state;

        log::info!(
            "Round started: mode={} interval={}ms seed={seed}",
            mode.as_str(),
            self.profile.tick_interval_ms
        );
    }

    /// Ended -> Idle: tear down the round and return to mode selection
    pub fn restart(&mut self) {
        if self.state.phase != GamePhase::Ended {
            return;
        }
        self.state = RoundState::new(self.state.seed);
        log::info!("Round reset to mode selection");
    }

    /// Direction input, last-writer-wins until the next tick reads it.
    /// Ignored outside Running and for reversals of the current heading.
    pub fn set_direction(&mut self, dir: Direction) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        if dir == self.state.direction.opposite() {
            return;
        }
        self.state.direction = dir;
    }

    /// One driver tick. Records the high score when the round just ended.
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        sim::tick(&mut self.state, &self.profile);
        if self.state.phase == GamePhase::Ended
            && record_if_best(&mut self.store, self.state.score)
        {
            log::info!("New high score: {}", self.state.score);
        }
    }

    /// How fast the host should fire `tick()` for the current profile
    pub fn tick_interval(&self) -> Duration {
        self.profile.tick_interval()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    pub fn high_score(&self) -> u32 {
        self.store.get()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.state.phase,
            score: self.state.score,
            jerry_cans: self.state.jerry_cans,
            people_served: self.state.people_served,
            pollution_hits: self.state.pollution_hits,
            trail: self.state.trail.cells(),
            items: &self.state.items,
            direction: self.state.direction,
            milestone: self.state.milestone,
            high_score: self.store.get(),
        }
    }

    /// Hand pending events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::sim::state::EndReason;
    use proptest::prelude::*;

    fn lifecycle() -> GameLifecycle<MemoryScoreStore> {
        GameLifecycle::new(MemoryScoreStore::default())
    }

    /// Drive straight up from center until the truck hits the wall
    fn crash_into_wall(game: &mut GameLifecycle<MemoryScoreStore>) {
        game.set_direction(Direction::Up);
        // Items along the way only change score, never the phase under the
        // default penalize policy, so the wall is always reached.
        while game.phase() == GamePhase::Running {
            game.tick();
        }
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = lifecycle();
        assert_eq!(game.phase(), GamePhase::Idle);

        // Ticks and input before start are no-ops
        game.tick();
        game.set_direction(Direction::Up);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.snapshot().direction, Direction::Right);

        game.start_seeded(GameMode::Easy, 1);
        assert_eq!(game.phase(), GamePhase::Running);
        let snap = game.snapshot();
        assert_eq!(snap.trail.len(), 1);
        assert!(snap.items.len() >= 3);
    }

    #[test]
    fn test_start_named_falls_back_to_easy() {
        let mut game = lifecycle();
        game.start_named("definitely-not-a-mode");
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.profile().mode, GameMode::Easy);
        assert_eq!(game.profile().pollution_penalty, 5);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut game = lifecycle();
        game.start_seeded(GameMode::Easy, 2);
        assert_eq!(game.snapshot().direction, Direction::Right);

        game.set_direction(Direction::Left);
        assert_eq!(game.snapshot().direction, Direction::Right);

        game.set_direction(Direction::Up);
        assert_eq!(game.snapshot().direction, Direction::Up);
        game.set_direction(Direction::Down);
        assert_eq!(game.snapshot().direction, Direction::Up);
    }

    #[test]
    fn test_wall_crash_ends_and_restart_returns_to_idle() {
        let mut game = lifecycle();
        game.start_seeded(GameMode::Easy, 3);
        crash_into_wall(&mut game);

        assert_eq!(game.phase(), GamePhase::Ended);
        let events = game.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::RoundEnded {
                reason: EndReason::WallCollision,
                ..
            }
        )));

        // Stale driver ticks against the ended round do nothing
        let snap_score = game.snapshot().score;
        game.tick();
        assert_eq!(game.phase(), GamePhase::Ended);
        assert_eq!(game.snapshot().score, snap_score);

        game.restart();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.snapshot().trail.len(), 1);
        assert_eq!(game.snapshot().score, 0);
    }

    #[test]
    fn test_restart_only_from_ended() {
        let mut game = lifecycle();
        game.restart();
        assert_eq!(game.phase(), GamePhase::Idle);

        game.start_seeded(GameMode::Medium, 4);
        game.restart();
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut game = lifecycle();
        game.start_seeded(GameMode::Hard, 5);
        let interval = game.tick_interval();

        game.start_seeded(GameMode::Easy, 6);
        assert_eq!(game.profile().mode, GameMode::Hard);
        assert_eq!(game.tick_interval(), interval);
    }

    #[test]
    fn test_high_score_recorded_at_round_end() {
        let mut game = lifecycle();
        game.start_seeded(GameMode::Easy, 7);
        crash_into_wall(&mut game);
        let final_score = game.snapshot().score;
        assert_eq!(game.high_score(), final_score);

        // A worse follow-up round does not lower the stored best
        game.start_seeded(GameMode::Easy, 8);
        crash_into_wall(&mut game);
        assert!(game.high_score() >= final_score);
    }

    #[test]
    fn test_mode_selects_tick_interval() {
        let mut game = lifecycle();
        game.start_seeded(GameMode::Easy, 9);
        assert_eq!(game.tick_interval(), Duration::from_millis(150));
        crash_into_wall(&mut game);

        game.start_seeded(GameMode::Hard, 10);
        assert_eq!(game.tick_interval(), Duration::from_millis(75));
    }

    proptest! {
        #[test]
        fn prop_reversal_never_changes_direction(seed in any::<u64>()) {
            let mut game = lifecycle();
            game.start_seeded(GameMode::Easy, seed);
            let before = game.snapshot().direction;
            game.set_direction(before.opposite());
            prop_assert_eq!(game.snapshot().direction, before);
        }
    }
}
