//! Turns a hand-landmark sample into a smoothed pointer and a debounced
//! trigger.
//!
//! The pointer follows the index fingertip with exponential smoothing.  A
//! shot fires on a pinch (thumb tip touching index tip) or, when enabled, a
//! closed fist, and never more often than the configured cooldown.

use crate::config::GestureConfig;
use crate::geometry::{Point, Viewport};
use crate::perception::{HandLandmarks, FINGERS, INDEX_TIP, THUMB_TIP, WRIST};

/// Pinch distance at which the feedback ring is fully open.
pub const PINCH_RING_MAX_DIST: f32 = 0.2;

// ── Pose tests (pure) ─────────────────────────────────────────────────────────

/// Thumb-tip to index-tip distance in normalized space.
pub fn pinch_distance(hand: &HandLandmarks) -> f32 {
    hand.span(THUMB_TIP, INDEX_TIP)
}

pub fn is_pinching(hand: &HandLandmarks, threshold: f32) -> bool {
    pinch_distance(hand) < threshold
}

/// A finger is curled when its tip sits closer to the wrist than its
/// proximal joint does.
pub fn is_curled(hand: &HandLandmarks, tip: usize, pip: usize) -> bool {
    hand.span(tip, WRIST) < hand.span(pip, WRIST)
}

/// All four non-thumb fingers curled.
pub fn is_fist(hand: &HandLandmarks) -> bool {
    FINGERS.iter().all(|&(tip, pip)| is_curled(hand, tip, pip))
}

/// 0 when the fingertips touch, 1 when they are `PINCH_RING_MAX_DIST` or
/// further apart.
pub fn pinch_openness(pinch_distance: f32) -> f32 {
    (pinch_distance / PINCH_RING_MAX_DIST).clamp(0.0, 1.0)
}

// ── Interpreter ───────────────────────────────────────────────────────────────

/// What the interpreter concluded from one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureReading {
    /// Smoothed pointer in screen pixels.
    pub pointer: Point,
    pub pinch_distance: f32,
    pub pinching: bool,
    pub fist: bool,
    /// A shot should be fired at `pointer` this tick.
    pub fire: bool,
}

#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    config: GestureConfig,
    pointer: Option<Point>,
    last_fire_ms: Option<u64>,
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pointer: None,
            last_fire_ms: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Current smoothed pointer, `None` until the first sample.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn last_fire_ms(&self) -> Option<u64> {
        self.last_fire_ms
    }

    /// Forget the pointer and the cooldown (new session).
    pub fn reset(&mut self) {
        self.pointer = None;
        self.last_fire_ms = None;
    }

    /// Move the pointer a fixed fraction toward `raw`.  The first sample
    /// seeds the pointer so it does not sweep in from the origin.
    pub fn smooth(&mut self, raw: Point) -> Point {
        let current = self.pointer.unwrap_or(raw);
        let next = current.lerp(raw, self.config.smoothing_factor);
        self.pointer = Some(next);
        next
    }

    /// True if the cooldown has elapsed at `now_ms`; records the shot if so.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        let ready = match self.last_fire_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.config.shot_cooldown_ms,
        };
        if ready {
            self.last_fire_ms = Some(now_ms);
        }
        ready
    }

    /// Process one landmark sample.
    pub fn update(
        &mut self,
        hand: &HandLandmarks,
        viewport: Viewport,
        now_ms: u64,
    ) -> GestureReading {
        let raw = viewport.to_screen(hand.get(INDEX_TIP).point());
        let pointer = self.smooth(raw);

        let pinch_distance = pinch_distance(hand);
        let pinching = pinch_distance < self.config.pinch_threshold;
        let fist = self.config.fist_trigger && is_fist(hand);

        let fire = (pinching || fist) && self.try_fire(now_ms);

        GestureReading {
            pointer,
            pinch_distance,
            pinching,
            fist,
            fire,
        }
    }
}
