//! Hand-landmark input boundary.
//!
//! A hand tracker yields 21 normalized 2-D points per hand, or nothing when
//! no hand is visible.  Results arrive whenever the tracker finishes a frame
//! and land in a single last-write-wins slot that the game reads once per tick.

use crate::error::GameError;
use crate::geometry::Point;

// ── Landmark indices ──────────────────────────────────────────────────────────

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// (tip, proximal joint) for the four non-thumb fingers.
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

// ── Data ──────────────────────────────────────────────────────────────────────

/// One joint, normalized to the camera frame (`[0, 1]` on both axes).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Exactly one tracked hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a tracker result; anything but 21 points is rejected.
    pub fn from_slice(points: &[Landmark]) -> Result<Self, GameError> {
        let points: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| GameError::LandmarkCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            })?;
        Ok(Self { points })
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn set(&mut self, index: usize, landmark: Landmark) {
        self.points[index] = landmark;
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Distance between two joints in normalized space.
    pub fn span(&self, a: usize, b: usize) -> f32 {
        self.points[a].point().distance(self.points[b].point())
    }
}

// ── Latest-result slot ────────────────────────────────────────────────────────

/// Holds the most recent tracker result.  Each `publish` overwrites the
/// previous value; there is no queue, so a stale or dropped frame just means
/// the game sees a slightly older sample.
#[derive(Clone, Debug, Default)]
pub struct LandmarkSlot {
    latest: Option<HandLandmarks>,
    published: u64,
}

impl LandmarkSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, hand: Option<HandLandmarks>) {
        self.latest = hand;
        self.published += 1;
    }

    pub fn latest(&self) -> Option<&HandLandmarks> {
        self.latest.as_ref()
    }

    /// Number of results written so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}

// ── Source trait ──────────────────────────────────────────────────────────────

/// The camera + hand tracker pair.  `start` may fail (no camera, permission
/// denied); once started, `latest` is polled at the top of every tick.
pub trait PerceptionSource {
    fn start(&mut self) -> Result<(), GameError>;

    fn stop(&mut self) {}

    fn latest(&self) -> Option<&HandLandmarks>;
}
