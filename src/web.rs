//! Browser binding
//!
//! JavaScript owns the canvas, the DOM and the real `requestAnimationFrame` /
//! `setInterval` handles. Each callback is tagged with the id the session
//! handed out (`frameId()` / `timerId()`); callbacks carrying an id from an
//! earlier round are rejected, so a leaked interval can never tick twice.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::driver::{FrameId, IntervalId, ManualScheduler, Scheduler, Session};
use crate::sim::ClickOutcome;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Already initialized if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct ShapeCollector {
    session: Session<ManualScheduler>,
}

#[wasm_bindgen]
impl ShapeCollector {
    /// Create a game; `config_json` may override any subset of tunables
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ShapeCollector, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json),
            None => Ok(GameConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(config, seed, ManualScheduler::new())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Shape Collector initialized with seed: {}", seed);
        Ok(Self { session })
    }

    pub fn start(&mut self) {
        let seed = js_sys::Date::now() as u64;
        self.session.reseed(seed);
        self.session.start();
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    /// Id to tag the next animation frame with, if the loop wants one
    #[wasm_bindgen(js_name = frameId)]
    pub fn frame_id(&self) -> Option<f64> {
        self.session.pending_frame_id().map(|id| id.0 as f64)
    }

    /// Id to tag the countdown interval with, if the round is live
    #[wasm_bindgen(js_name = timerId)]
    pub fn timer_id(&self) -> Option<f64> {
        self.session.timer_id().map(|id| id.0 as f64)
    }

    /// Animation frame callback; returns false once the loop should end or
    /// the id is stale. On true, request the next frame with `frameId()`.
    pub fn frame(&mut self, id: f64, now_ms: f64) -> bool {
        let id = FrameId(id as u64);
        // Frames are one-shot
        self.session.scheduler_mut().cancel_frame(id);
        self.session.on_frame(id, now_ms)
    }

    /// Interval callback; returns false once this interval should be cleared
    pub fn second(&mut self, id: f64) -> bool {
        let id = IntervalId(id as u64);
        self.session.on_interval(id) && self.session.timer_id() == Some(id)
    }

    /// Click in canvas-local pixels: "correct", "incorrect" or "" for a miss
    pub fn click(&mut self, x: f32, y: f32) -> String {
        match self.session.click(Vec2::new(x, y)) {
            Some(ClickOutcome::Correct { .. }) => "correct".to_string(),
            Some(ClickOutcome::Incorrect { .. }) => "incorrect".to_string(),
            None => String::new(),
        }
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Notifications since the last call (HUD, feedback, round end)
    ///
    /// Call once per frame; undrained notifications accumulate.
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
