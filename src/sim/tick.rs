//! Simulation step
//!
//! Order within a step: fish swims, hook moves, collision test, then the
//! catch/expiry lifecycle.

use super::state::{CatchEvent, GameState};

/// What happened to the fish this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Fish still swimming
    Swimming,
    /// Hook touched the fish; a new fish has spawned
    Caught,
    /// Fish outlived its species lifetime; a new fish has spawned
    Expired,
}

/// Advance the game state by one step of `dt_ms` simulated milliseconds
pub fn tick(state: &mut GameState, dt_ms: f64) -> StepOutcome {
    state.time_ticks += 1;
    state.time_ms += dt_ms;
    let now = state.time_ms;

    state.swim_fish();

    let viewport = state.viewport;
    let target_x = state.input.hook_target_x;
    state.hook.update(&viewport, target_x);

    if state.hook.rect().overlaps(&state.fish.rect()) {
        let species = state.fish.species;
        state.catches += 1;
        log::info!(
            "Caught {} (#{}) at {:.0} ms, hook {:?}",
            species.def().name,
            state.catches,
            now,
            state.hook.phase()
        );
        state.last_catch = Some(CatchEvent {
            species,
            message: species.catch_message(),
            caught_at_ms: now,
        });
        state.respawn_fish();
        return StepOutcome::Caught;
    }

    if state.fish.expired(now) {
        log::debug!("{} swam away", state.fish.species.def().name);
        state.respawn_fish();
        return StepOutcome::Expired;
    }

    StepOutcome::Swimming
}
