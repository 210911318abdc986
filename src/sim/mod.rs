//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One step per frame, no wall-clock reads
//! - Seeded RNG only, passed in by the caller
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod hit;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use hit::{point_in_shape, resolve_click};
pub use scoring::{ClickOutcome, apply_click, points_for_combo};
pub use spawn::try_spawn;
pub use state::{
    Character, Feedback, GameEvent, GamePhase, GameState, HudUpdate, Playfield, Shape, ShapeKind,
    ShapeView, Snapshot,
};
pub use tick::tick;
