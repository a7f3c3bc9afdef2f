#![allow(dead_code)]

use gesture_shooter::config::{GameConfig, RulesConfig};
use gesture_shooter::geometry::Viewport;
use gesture_shooter::perception::*;
use gesture_shooter::state::GameState;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub const VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Default rules with random spawning switched off.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        rules: RulesConfig::default().without_spawns(),
        ..GameConfig::default()
    }
}

/// A running session on an empty, quiet field.
pub fn running_state() -> GameState {
    let mut state = gesture_shooter::compute::init_state(&quiet_config(), VIEWPORT);
    gesture_shooter::compute::start_session(&mut state);
    state
}

/// Open hand with the index tip at `(x, y)` (normalized); thumb well away.
pub fn open_hand(x: f32, y: f32) -> HandLandmarks {
    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[WRIST] = Landmark::new(x, y + 0.30);
    for (i, (tip, pip)) in FINGERS.iter().enumerate() {
        let dx = i as f32 * 0.03;
        points[*tip] = Landmark::new(x + dx, y);
        points[*pip] = Landmark::new(x + dx, y + 0.09);
        points[*pip - 1] = Landmark::new(x + dx, y + 0.15);
        points[*pip + 1] = Landmark::new(x + dx, y + 0.045);
    }
    points[THUMB_CMC] = Landmark::new(x - 0.02, y + 0.27);
    points[THUMB_MCP] = Landmark::new(x - 0.05, y + 0.23);
    points[THUMB_IP] = Landmark::new(x - 0.08, y + 0.19);
    points[THUMB_TIP] = Landmark::new(x - 0.12, y + 0.14);
    HandLandmarks::new(points)
}

/// Open hand with the thumb tip touching the index tip.
pub fn pinching_hand(x: f32, y: f32) -> HandLandmarks {
    let mut hand = open_hand(x, y);
    hand.set(THUMB_TIP, Landmark::new(x + 0.01, y));
    hand
}

/// All four fingers folded: tips closer to the wrist than the PIP joints.
pub fn fist_hand(x: f32, y: f32) -> HandLandmarks {
    let mut hand = open_hand(x, y);
    hand.set(WRIST, Landmark::new(x, y + 0.12));
    for (i, (_, pip)) in FINGERS.iter().enumerate() {
        let dx = i as f32 * 0.03;
        hand.set(*pip, Landmark::new(x + dx, y - 0.03));
    }
    hand
}
