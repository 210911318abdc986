//! Per-frame simulation step
//!
//! Advances the character, rolls the spawner, then drifts and retires shapes.

use rand::Rng;

use super::spawn::try_spawn;
use super::state::GameState;
use crate::config::GameConfig;

/// Advance the game state by one frame
///
/// No-op unless the round is running.
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, config: &GameConfig, rng: &mut R) {
    if !state.is_running() {
        return;
    }

    state.frames += 1;

    let playfield = state.playfield;
    state.character.advance(&playfield);

    try_spawn(state, config, rng);

    for shape in &mut state.shapes {
        shape.pos.x -= shape.speed;
    }
    let before = state.shapes.len();
    state.shapes.retain(|s| !s.is_past_left_edge());
    let retired = before - state.shapes.len();
    if retired > 0 {
        log::trace!("Retired {} shape(s) past the left edge", retired);
    }
}
