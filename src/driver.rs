//! Game loop driver
//!
//! A [`Session`] ties a [`Round`] to two host callbacks: a one-shot frame
//! request that re-arms itself while the round runs, and a one-second
//! interval for the countdown. Both are owned through [`Scheduler`] so the
//! browser, a headless runner and tests can all drive the same loop.

use glam::Vec2;

use crate::config::{ConfigError, GameConfig};
use crate::consts::TIMER_PERIOD_MS;
use crate::round::Round;
use crate::sim::{ClickOutcome, GameEvent, GamePhase, Snapshot};

/// Handle to a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Handle to a repeating interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalId(pub u64);

/// Host callback scheduling
pub trait Scheduler {
    /// Ask for one callback on the next display frame
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
    /// Ask for a callback every `period_ms` until cleared
    fn start_interval(&mut self, period_ms: u32) -> IntervalId;
    fn clear_interval(&mut self, id: IntervalId);
}

/// Scheduler that only records requests; the caller fires them by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    frames: Vec<FrameId>,
    intervals: Vec<(IntervalId, u32)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_frames(&self) -> &[FrameId] {
        &self.frames
    }

    pub fn active_intervals(&self) -> Vec<IntervalId> {
        self.intervals.iter().map(|(id, _)| *id).collect()
    }

    /// Period of an active interval
    pub fn interval_period(&self, id: IntervalId) -> Option<u32> {
        self.intervals
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, period)| *period)
    }

    /// Remove and return the oldest pending frame (frames are one-shot)
    pub fn take_frame(&mut self) -> Option<FrameId> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.remove(0))
        }
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.allocate());
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }

    fn start_interval(&mut self, period_ms: u32) -> IntervalId {
        let id = IntervalId(self.allocate());
        self.intervals.push((id, period_ms));
        id
    }

    fn clear_interval(&mut self, id: IntervalId) {
        self.intervals.retain(|(i, _)| *i != id);
    }
}

/// A round plus the callbacks that drive it
pub struct Session<S: Scheduler> {
    round: Round,
    scheduler: S,
    pending_frame: Option<FrameId>,
    timer: Option<IntervalId>,
    last_frame_time: Option<f64>,
    last_frame_delta_ms: f64,
}

impl<S: Scheduler> Session<S> {
    pub fn new(config: GameConfig, seed: u64, scheduler: S) -> Result<Self, ConfigError> {
        Ok(Self {
            round: Round::new(config, seed)?,
            scheduler,
            pending_frame: None,
            timer: None,
            last_frame_time: None,
            last_frame_delta_ms: 0.0,
        })
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn phase(&self) -> GamePhase {
        self.round.phase()
    }

    /// Milliseconds between the last two frames (bookkeeping only)
    pub fn last_frame_delta_ms(&self) -> f64 {
        self.last_frame_delta_ms
    }

    /// Frame callback the session is waiting for, if any
    pub fn pending_frame_id(&self) -> Option<FrameId> {
        self.pending_frame
    }

    /// Countdown interval owned by the current round, if any
    pub fn timer_id(&self) -> Option<IntervalId> {
        self.timer
    }

    /// Reseed the round RNG before the next start
    pub fn reseed(&mut self, seed: u64) {
        self.round.reseed(seed);
    }

    /// Start a fresh round, replacing any round and callbacks in flight
    pub fn start(&mut self) {
        self.halt();
        self.round.start();
        self.last_frame_time = None;
        self.last_frame_delta_ms = 0.0;
        self.pending_frame = Some(self.scheduler.request_frame());
        self.timer = Some(self.scheduler.start_interval(TIMER_PERIOD_MS));
    }

    /// Return to Idle, cancelling the frame and the timer
    pub fn stop(&mut self) {
        self.halt();
        self.round.stop();
    }

    /// Frame callback; returns true if a simulation step ran
    pub fn on_frame(&mut self, id: FrameId, now_ms: f64) -> bool {
        if self.pending_frame != Some(id) {
            log::warn!("Ignoring stale frame callback {:?}", id);
            return false;
        }
        self.pending_frame = None;

        if !self.round.is_running() {
            return false;
        }

        if let Some(last) = self.last_frame_time {
            self.last_frame_delta_ms = (now_ms - last).max(0.0);
        }
        self.last_frame_time = Some(now_ms);

        self.round.frame();
        self.pending_frame = Some(self.scheduler.request_frame());
        true
    }

    /// Interval callback; one call per elapsed second. Returns false for a
    /// stale id, which the host should clear.
    pub fn on_interval(&mut self, id: IntervalId) -> bool {
        if self.timer != Some(id) {
            log::warn!("Ignoring stale timer callback {:?}", id);
            return false;
        }
        if self.round.tick_second() {
            self.halt();
        }
        true
    }

    pub fn click(&mut self, point: Vec2) -> Option<ClickOutcome> {
        self.round.click(point)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.round.resize(width, height);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.round.snapshot()
    }

    /// Take queued notifications. The queue is unbounded, so hosts call this
    /// every frame.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.round.drain_events()
    }

    fn halt(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
        if let Some(id) = self.timer.take() {
            self.scheduler.clear_interval(id);
        }
    }
}

impl Session<ManualScheduler> {
    /// Fire the pending frame, if any
    pub fn advance_frame(&mut self, now_ms: f64) -> bool {
        match self.scheduler.take_frame() {
            Some(id) => self.on_frame(id, now_ms),
            None => false,
        }
    }

    /// Fire every active interval once
    pub fn advance_second(&mut self) {
        for id in self.scheduler.active_intervals() {
            self.on_interval(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<ManualScheduler> {
        Session::new(GameConfig::default(), 77, ManualScheduler::new()).unwrap()
    }

    #[test]
    fn test_start_arms_one_frame_and_one_timer() {
        let mut s = session();
        s.start();
        assert_eq!(s.scheduler().pending_frames().len(), 1);
        let timers = s.scheduler().active_intervals();
        assert_eq!(timers.len(), 1);
        assert_eq!(s.scheduler().interval_period(timers[0]), Some(1000));
    }

    #[test]
    fn test_double_start_does_not_stack_callbacks() {
        let mut s = session();
        s.start();
        s.advance_second();
        s.start();
        s.start();
        assert_eq!(s.scheduler().pending_frames().len(), 1);
        assert_eq!(s.scheduler().active_intervals().len(), 1);

        // One second ticks exactly once
        s.advance_second();
        assert_eq!(s.round().state().time_left, 29);
    }

    #[test]
    fn test_frames_rearm_while_running() {
        let mut s = session();
        s.start();
        for i in 0..10 {
            assert!(s.advance_frame(i as f64 * 16.0));
            assert_eq!(s.scheduler().pending_frames().len(), 1);
        }
        assert_eq!(s.round().state().frames, 10);
        assert_eq!(s.last_frame_delta_ms(), 16.0);
    }

    #[test]
    fn test_stop_cancels_everything() {
        let mut s = session();
        s.start();
        s.stop();
        assert_eq!(s.phase(), GamePhase::Idle);
        assert!(s.scheduler().pending_frames().is_empty());
        assert!(s.scheduler().active_intervals().is_empty());
        assert!(!s.advance_frame(0.0));
    }

    #[test]
    fn test_stale_callbacks_are_ignored() {
        let mut s = session();
        s.start();
        let old_frame = s.scheduler().pending_frames()[0];
        let old_timer = s.scheduler().active_intervals()[0];

        s.start();
        assert!(!s.on_frame(old_frame, 0.0));
        s.on_interval(old_timer);
        assert_eq!(s.round().state().frames, 0);
        assert_eq!(s.round().state().time_left, 30);
    }

    #[test]
    fn test_restart_with_old_timer_still_firing_ticks_once() {
        let mut s = session();
        s.start();
        let old_timer = s.timer_id().unwrap();
        s.advance_second();
        assert_eq!(s.round().state().time_left, 29);

        // Host restarts but its old interval handle keeps firing
        s.start();
        let new_timer = s.timer_id().unwrap();
        assert_ne!(old_timer, new_timer);
        assert!(!s.on_interval(old_timer));
        assert!(s.on_interval(new_timer));
        assert_eq!(s.round().state().time_left, 29);
    }

    #[test]
    fn test_pending_frame_id_tracks_rearm() {
        let mut s = session();
        assert_eq!(s.pending_frame_id(), None);
        s.start();
        let first = s.pending_frame_id().unwrap();
        assert!(s.on_frame(first, 0.0));
        let second = s.pending_frame_id().unwrap();
        assert_ne!(first, second);
        assert!(!s.on_frame(first, 16.0));
        assert_eq!(s.round().state().frames, 1);
        s.stop();
        assert_eq!(s.pending_frame_id(), None);
        assert_eq!(s.timer_id(), None);
    }

    #[test]
    fn test_round_end_clears_callbacks() {
        let mut s = session();
        s.start();
        for _ in 0..30 {
            s.advance_second();
        }
        assert_eq!(s.phase(), GamePhase::Ended);
        assert!(s.scheduler().pending_frames().is_empty());
        assert!(s.scheduler().active_intervals().is_empty());
    }
}
