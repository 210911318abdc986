//! Shape Collector - a shape-clicking arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, hit testing, scoring)
//! - `round`: Round lifecycle, countdown timer and target selection
//! - `driver`: Frame/interval scheduling around a round
//! - `config`: Tunable game constants

pub mod config;
pub mod driver;
pub mod round;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig};
pub use driver::{FrameId, IntervalId, ManualScheduler, Scheduler, Session};
pub use round::Round;

/// Default tuning constants
pub mod consts {
    /// Round length in seconds
    pub const INITIAL_TIME: u32 = 30;

    /// Scoring
    pub const CORRECT_SHAPE_POINTS: u32 = 10;
    pub const WRONG_SHAPE_PENALTY: u32 = 5;
    /// Each consecutive correct click multiplies points by this
    pub const COMBO_MULTIPLIER: f64 = 1.5;

    /// Power meter
    pub const CORRECT_SHAPE_POWER: f32 = 10.0;
    pub const WRONG_SHAPE_POWER_LOSS: f32 = 15.0;
    pub const MAX_POWER: f32 = 100.0;

    /// Character defaults (pixels, pixels per frame)
    pub const CHARACTER_SPEED: f32 = 2.0;
    pub const CHARACTER_SIZE: f32 = 60.0;
    pub const CHARACTER_START_X: f32 = 50.0;

    /// Shape defaults
    /// Probability per frame (0-1)
    pub const SHAPE_SPAWN_RATE: f64 = 0.02;
    pub const SHAPE_SPEED: f32 = 3.0;
    pub const SHAPE_SIZE: f32 = 50.0;
    /// Minimum distance between a new shape and every existing one
    pub const MIN_SHAPE_DISTANCE: f32 = 100.0;

    /// Rectangles are this much wider than tall
    pub const RECTANGLE_ASPECT: f32 = 1.5;

    /// Countdown interval
    pub const TIMER_PERIOD_MS: u32 = 1000;

    /// Default playfield before the host reports a real size
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Feedback text is drawn this far above the clicked shape
    pub const FEEDBACK_OFFSET_Y: f32 = 30.0;
    pub const FEEDBACK_COLOR_CORRECT: &str = "#40e0d0";
    pub const FEEDBACK_COLOR_WRONG: &str = "#ff6b6b";
}
