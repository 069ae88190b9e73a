//! Per-tick simulation step
//!
//! Advances the truck one cell, resolves wall/self/item collisions, and
//! recomputes the milestone badge. Must stay deterministic: seeded RNG only,
//! stable item iteration order, no platform or rendering dependencies.

use super::spawn::regenerate_items;
use super::state::{EndReason, GameEvent, GamePhase, ItemKind, Milestone, RoundState};
use crate::consts::*;
use crate::modes::{DifficultyProfile, PollutionPolicy};

/// Advance the round by one tick. No-op unless the round is Running, so a
/// stale timer can never mutate a discarded or finished round.
pub fn tick(state: &mut RoundState, profile: &DifficultyProfile) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    let new_head = state.trail.head().step(state.direction);

    if !new_head.in_bounds() {
        end_round(state, EndReason::WallCollision);
        return;
    }

    // Checked against the pre-move trail: clipping the tail cell that is
    // about to be vacated still counts as a crash (grow-then-shrink model).
    if state.trail.contains(new_head) {
        end_round(state, EndReason::SelfCollision);
        return;
    }

    state.trail.grow(new_head);

    match state.item_at(new_head) {
        Some(index) => {
            let item = state.items.remove(index);
            match item.kind {
                ItemKind::Water => collect_water(state),
                ItemKind::Pollution => hit_pollution(state, profile),
            }
            if state.phase == GamePhase::Ended {
                return;
            }
            // Synchronous regeneration: the whole set is rebuilt before the
            // tick returns, never mid-tick from a delayed callback.
            state.items = regenerate_items(&mut state.rng, &state.trail, profile);
        }
        None => state.trail.shrink(),
    }

    update_milestone(state);
}

fn collect_water(state: &mut RoundState) {
    state.score += WATER_SCORE;
    state.jerry_cans += 1;
    state.people_served += PEOPLE_PER_JERRY_CAN;
    state.push_event(GameEvent::Feedback(format!(
        "Water collected! +{WATER_SCORE} points"
    )));
}

fn hit_pollution(state: &mut RoundState, profile: &DifficultyProfile) {
    state.pollution_hits += 1;
    match profile.pollution_policy {
        PollutionPolicy::Penalize { shrink_tail } => {
            state.score = state.score.saturating_sub(profile.pollution_penalty);
            state.push_event(GameEvent::Feedback(format!(
                "Pollution hit! -{} points",
                profile.pollution_penalty
            )));
            if shrink_tail {
                state.trail.shrink();
            }
        }
        PollutionPolicy::EndRound => {
            end_round(state, EndReason::PollutionContact);
        }
    }
}

fn end_round(state: &mut RoundState, reason: EndReason) {
    state.phase = GamePhase::Ended;
    state.end_reason = Some(reason);
    log::info!("Round ended: {reason:?}, final score {}", state.score);
    state.push_event(GameEvent::Feedback(reason.message().to_string()));
    state.push_event(GameEvent::RoundEnded {
        reason,
        final_score: state.score,
    });
}

fn update_milestone(state: &mut RoundState) {
    let badge = Milestone::for_jerry_cans(state.jerry_cans);
    if badge != state.milestone {
        state.milestone = badge;
        state.push_event(GameEvent::Milestone(badge));
    }
}
