//! Round lifecycle: Idle -> Running -> Ended
//!
//! A [`Round`] owns the only [`GameState`], the seeded RNG and the pending
//! display notifications. Starting always rebuilds the state from scratch.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{ConfigError, GameConfig};
use crate::sim::{
    ClickOutcome, GameEvent, GamePhase, GameState, Playfield, ShapeKind, Snapshot, apply_click,
    resolve_click, tick,
};

/// One game at a time: state, RNG and undelivered notifications
///
/// Notifications queue until [`Round::drain_events`]; hosts drain once per frame.
pub struct Round {
    config: GameConfig,
    state: GameState,
    rng: Pcg32,
    seed: u64,
    events: Vec<GameEvent>,
}

impl Round {
    /// Create an idle round with a validated config
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let target = config.shape_types[0];
        let state = GameState::new(&config, Playfield::default(), target);
        Ok(Self {
            config,
            state,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Seed the RNG was last seeded with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the random stream (takes effect from the next draw)
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Begin a new round, discarding whatever came before
    pub fn start(&mut self) {
        let target = self.pick_target();
        self.state = GameState::new(&self.config, self.state.playfield, target);
        self.state.phase = GamePhase::Running;

        self.events.clear();
        self.events.push(GameEvent::TargetAssigned {
            target,
            banner: target.task_banner(),
        });
        self.push_hud();

        log::info!(
            "Round started: target={}, time={}s, seed={}",
            target.as_str(),
            self.state.time_left,
            self.seed
        );
    }

    /// Force the round back to Idle from any phase
    pub fn stop(&mut self) {
        if self.state.phase != GamePhase::Idle {
            log::info!(
                "Round stopped: score={}, time left={}s",
                self.state.score,
                self.state.time_left
            );
        }
        self.state.phase = GamePhase::Idle;
    }

    /// Run one simulation step (no-op unless running)
    pub fn frame(&mut self) {
        tick(&mut self.state, &self.config, &mut self.rng);
    }

    /// Count down one second; returns true if this tick ended the round
    pub fn tick_second(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        self.state.time_left = self.state.time_left.saturating_sub(1);
        self.push_hud();

        if self.state.time_left == 0 {
            self.state.phase = GamePhase::Ended;
            self.events.push(GameEvent::RoundEnded {
                final_score: self.state.score,
                final_combo: self.state.combo,
            });
            log::info!(
                "Round over: score={}, combo={}x",
                self.state.score,
                self.state.combo
            );
            return true;
        }
        false
    }

    /// Resolve a click in playfield coordinates
    ///
    /// The newest shape under the point is removed and scored. Misses,
    /// points outside the playfield and clicks outside a running round do
    /// nothing.
    pub fn click(&mut self, point: Vec2) -> Option<ClickOutcome> {
        if !self.state.is_running() {
            return None;
        }
        let index = resolve_click(point, &self.state.shapes, &self.state.playfield)?;
        let shape = self.state.shapes.remove(index);
        let (outcome, feedback) = apply_click(&mut self.state, &self.config, &shape);

        self.events.push(GameEvent::Feedback(feedback));
        self.push_hud();
        Some(outcome)
    }

    /// Track a new playfield size (the character re-centers next frame)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.playfield = Playfield::new(width, height);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.config.max_power)
    }

    /// Take all notifications emitted since the last drain
    ///
    /// Nothing is dropped on the producer side; a host that never drains
    /// grows the queue for the life of the round.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn pick_target(&mut self) -> ShapeKind {
        let types = &self.config.shape_types;
        types[self.rng.random_range(0..types.len())]
    }

    fn push_hud(&mut self) {
        self.events
            .push(GameEvent::Hud(self.state.hud(self.config.max_power)));
    }
}
