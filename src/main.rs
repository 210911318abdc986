//! Shape Collector entry point
//!
//! The browser build is driven from JavaScript through `shape_collector::web`.
//! Natively this runs one headless round with a simple autoplay bot.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(12345);
    log::info!("Shape Collector (native) starting with seed {}", seed);

    if let Err(e) = demo::run(seed) {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use shape_collector::sim::{GameEvent, Snapshot};
    use shape_collector::{ConfigError, GameConfig, ManualScheduler, Session};

    /// Simulated display rate
    const FPS: u32 = 60;
    /// Bot reaction time in frames
    const CLICK_EVERY: u32 = 20;

    pub fn run(seed: u64) -> Result<(), ConfigError> {
        let mut session = Session::new(GameConfig::default(), seed, ManualScheduler::new())?;
        session.start();

        let frame_ms = 1000.0 / FPS as f64;
        let mut frame: u32 = 0;

        while session.round().is_running() {
            session.advance_frame(frame as f64 * frame_ms);
            frame += 1;

            if frame % CLICK_EVERY == 0 {
                if let Some(point) = pick_target(&session.snapshot()) {
                    session.click(point);
                }
            }
            if frame % FPS == 0 {
                session.advance_second();
            }

            for event in session.drain_events() {
                report(&event);
            }
        }

        let state = session.round().state();
        println!(
            "Game Over! Final Score: {}  Final Combo: {}x  ({} frames)",
            state.score, state.combo, state.frames
        );
        Ok(())
    }

    /// Oldest visible collectible, the one about to leave the screen
    fn pick_target(snapshot: &Snapshot) -> Option<glam::Vec2> {
        snapshot
            .shapes
            .iter()
            .filter(|s| s.is_target && snapshot.playfield.contains(s.pos))
            .map(|s| s.pos)
            .next()
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::TargetAssigned { banner, .. } => log::info!("{}", banner),
            GameEvent::Hud(hud) => log::debug!(
                "score={} time={} combo={}x power={:.0}%",
                hud.score,
                hud.time_left,
                hud.combo,
                hud.power_percent
            ),
            GameEvent::Feedback(feedback) => log::info!("{}", feedback.text),
            GameEvent::RoundEnded {
                final_score,
                final_combo,
            } => log::info!("Round ended: {} points, {}x combo", final_score, final_combo),
        }
    }
}
