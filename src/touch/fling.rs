//! Fling detection over the pointer samples of one gesture.
//!
//! Velocity comes from the newest samples inside a short horizon; a fling is
//! reported on release when the pointer moved faster than the configured
//! minimum. The tap region only applies to gestures the detector saw go down.

use super::config::OverlayTouchConfig;
use super::types::{MotionAction, MotionEvent};

const HISTORY_SIZE: usize = 20;
const HORIZON_MS: u64 = 100;
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    pub raw_x: f32,
    pub raw_y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingThresholds {
    pub touch_slop_px: f32,
    pub min_velocity_px_s: f32,
    pub max_velocity_px_s: f32,
}

impl FlingThresholds {
    pub fn from_config(config: &OverlayTouchConfig) -> Self {
        Self {
            touch_slop_px: config.touch_slop_px,
            min_velocity_px_s: config.min_fling_velocity_px_s,
            max_velocity_px_s: config.max_fling_velocity_px_s,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct TrackedSample {
    t_ms: u64,
    x: f32,
    y: f32,
}

#[derive(Clone, Debug)]
struct VelocityTracker {
    samples: [TrackedSample; HISTORY_SIZE],
    newest: usize,
    len: usize,
}

impl VelocityTracker {
    fn new() -> Self {
        Self {
            samples: [TrackedSample::default(); HISTORY_SIZE],
            newest: 0,
            len: 0,
        }
    }

    fn clear(&mut self) {
        self.newest = 0;
        self.len = 0;
    }

    fn add(&mut self, t_ms: u64, x: f32, y: f32) {
        if self.len > 0 {
            self.newest = (self.newest + 1) % HISTORY_SIZE;
        }
        self.samples[self.newest] = TrackedSample { t_ms, x, y };
        self.len = (self.len + 1).min(HISTORY_SIZE);
    }

    /// Velocity in px/s between the newest sample and the oldest one that is
    /// still inside the horizon without a stop gap in between.
    fn velocity(&self) -> (f32, f32) {
        if self.len < 2 {
            return (0.0, 0.0);
        }
        let newest = self.samples[self.newest];
        let mut oldest = newest;
        let mut previous = newest;
        for step in 1..self.len {
            let index = (self.newest + HISTORY_SIZE - step) % HISTORY_SIZE;
            let sample = self.samples[index];
            if newest.t_ms.saturating_sub(sample.t_ms) > HORIZON_MS
                || previous.t_ms.saturating_sub(sample.t_ms) > ASSUME_STOPPED_MS
            {
                break;
            }
            oldest = sample;
            previous = sample;
        }

        let dt_ms = newest.t_ms.saturating_sub(oldest.t_ms);
        if dt_ms == 0 {
            return (0.0, 0.0);
        }
        let scale = 1_000.0 / dt_ms as f32;
        ((newest.x - oldest.x) * scale, (newest.y - oldest.y) * scale)
    }
}

#[derive(Clone, Debug)]
pub struct FlingDetector {
    thresholds: FlingThresholds,
    tracker: VelocityTracker,
    tap_origin: Option<(f32, f32)>,
    in_tap_region: bool,
}

impl FlingDetector {
    pub fn new(thresholds: FlingThresholds) -> Self {
        Self {
            thresholds,
            tracker: VelocityTracker::new(),
            tap_origin: None,
            in_tap_region: false,
        }
    }

    pub fn set_thresholds(&mut self, thresholds: FlingThresholds) {
        self.thresholds = thresholds;
    }

    pub fn reset(&mut self) {
        self.tracker.clear();
        self.tap_origin = None;
        self.in_tap_region = false;
    }

    pub fn on_motion(&mut self, event: &MotionEvent) -> Option<Fling> {
        match event.action {
            MotionAction::Down => {
                self.reset();
                self.tap_origin = Some((event.raw_x, event.raw_y));
                self.in_tap_region = true;
                self.observe(event);
                None
            }
            MotionAction::Move => {
                self.observe(event);
                None
            }
            MotionAction::Up => {
                self.observe(event);
                let fling = self.release(event);
                self.reset();
                fling
            }
            MotionAction::Cancel => {
                self.reset();
                None
            }
        }
    }

    fn observe(&mut self, event: &MotionEvent) {
        if let Some((origin_x, origin_y)) = self.tap_origin {
            let dx = event.raw_x - origin_x;
            let dy = event.raw_y - origin_y;
            let slop = self.thresholds.touch_slop_px;
            if dx * dx + dy * dy > slop * slop {
                self.in_tap_region = false;
            }
        }
        self.tracker.add(event.t_ms, event.raw_x, event.raw_y);
    }

    fn release(&self, event: &MotionEvent) -> Option<Fling> {
        // Without a down there is no tap region; velocity alone decides.
        if self.in_tap_region {
            return None;
        }
        let max = self.thresholds.max_velocity_px_s;
        let (vx, vy) = self.tracker.velocity();
        let velocity_x = vx.clamp(-max, max);
        let velocity_y = vy.clamp(-max, max);
        if velocity_x.abs().max(velocity_y.abs()) <= self.thresholds.min_velocity_px_s {
            return None;
        }
        Some(Fling {
            raw_x: event.raw_x,
            raw_y: event.raw_y,
            velocity_x,
            velocity_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> FlingDetector {
        FlingDetector::new(FlingThresholds {
            touch_slop_px: 16.0,
            min_velocity_px_s: 100.0,
            max_velocity_px_s: 8_000.0,
        })
    }

    #[test]
    fn fast_horizontal_release_is_a_fling() {
        let mut detector = detector();
        assert_eq!(detector.on_motion(&MotionEvent::moved(0, 300.0, 50.0)), None);
        assert_eq!(detector.on_motion(&MotionEvent::moved(16, 260.0, 50.0)), None);
        assert_eq!(detector.on_motion(&MotionEvent::moved(32, 220.0, 51.0)), None);

        let fling = detector
            .on_motion(&MotionEvent::up(48, 180.0, 51.0))
            .expect("fast release should fling");
        assert_eq!(fling.raw_x, 180.0);
        assert!(fling.velocity_x < -2_000.0);
    }

    #[test]
    fn release_inside_tap_region_is_not_a_fling() {
        let mut detector = detector();
        detector.on_motion(&MotionEvent::down(0, 100.0, 100.0));
        detector.on_motion(&MotionEvent::moved(5, 105.0, 100.0));
        assert_eq!(detector.on_motion(&MotionEvent::up(10, 110.0, 100.0)), None);
    }

    #[test]
    fn short_fast_steps_without_down_still_fling() {
        let mut detector = detector();
        assert_eq!(detector.on_motion(&MotionEvent::moved(16, 380.0, 400.0)), None);

        let fling = detector
            .on_motion(&MotionEvent::up(24, 370.0, 400.0))
            .expect("fast release should fling");
        assert_eq!(fling.velocity_x, -1_250.0);
    }

    #[test]
    fn slow_drag_is_not_a_fling() {
        let mut detector = detector();
        detector.on_motion(&MotionEvent::down(0, 100.0, 100.0));
        detector.on_motion(&MotionEvent::moved(400, 140.0, 100.0));
        detector.on_motion(&MotionEvent::moved(430, 141.0, 100.0));
        assert_eq!(detector.on_motion(&MotionEvent::up(460, 142.0, 100.0)), None);
    }

    #[test]
    fn pause_before_release_drops_stale_samples() {
        let mut detector = detector();
        detector.on_motion(&MotionEvent::down(0, 400.0, 100.0));
        detector.on_motion(&MotionEvent::moved(10, 300.0, 100.0));
        // Pointer rests before lifting; the earlier burst must not count.
        assert_eq!(detector.on_motion(&MotionEvent::up(200, 300.0, 100.0)), None);
    }

    #[test]
    fn velocity_is_clamped() {
        let mut detector = detector();
        detector.on_motion(&MotionEvent::down(0, 0.0, 0.0));
        let fling = detector
            .on_motion(&MotionEvent::up(1, 500.0, 0.0))
            .expect("fast release should fling");
        assert_eq!(fling.velocity_x, 8_000.0);
    }

    #[test]
    fn cancel_forgets_the_gesture() {
        let mut detector = detector();
        detector.on_motion(&MotionEvent::down(0, 0.0, 0.0));
        detector.on_motion(&MotionEvent::moved(10, 200.0, 0.0));
        detector.on_motion(&MotionEvent::cancel(12, 210.0, 0.0));
        assert_eq!(detector.on_motion(&MotionEvent::up(20, 211.0, 0.0)), None);
    }
}
