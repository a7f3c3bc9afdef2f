mod common;

use approx::assert_abs_diff_eq;

use gesture_shooter::config::GestureConfig;
use gesture_shooter::error::GameError;
use gesture_shooter::geometry::{distance, lerp, Point};
use gesture_shooter::gesture::*;
use gesture_shooter::perception::{HandLandmarks, Landmark, LandmarkSlot, LANDMARK_COUNT};

use common::{fist_hand, open_hand, pinching_hand, VIEWPORT};

fn interpreter() -> GestureInterpreter {
    GestureInterpreter::new(GestureConfig::default())
}

// ── geometry helpers ──────────────────────────────────────────────────────────

#[test]
fn distance_is_euclidean() {
    assert_abs_diff_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    assert_abs_diff_eq!(Point::new(1.0, 1.0).distance(Point::new(1.0, 1.0)), 0.0);
}

#[test]
fn lerp_endpoints_and_midpoint() {
    assert_abs_diff_eq!(lerp(10.0, 20.0, 0.0), 10.0);
    assert_abs_diff_eq!(lerp(10.0, 20.0, 1.0), 20.0);
    assert_abs_diff_eq!(lerp(10.0, 20.0, 0.5), 15.0);
}

// ── pose tests ────────────────────────────────────────────────────────────────

#[test]
fn pinch_detected_below_threshold() {
    let hand = pinching_hand(0.5, 0.5);
    assert!(pinch_distance(&hand) < 0.05);
    assert!(is_pinching(&hand, 0.05));
}

#[test]
fn open_hand_is_neither_pinch_nor_fist() {
    let hand = open_hand(0.5, 0.5);
    assert!(!is_pinching(&hand, 0.05));
    assert!(!is_fist(&hand));
}

#[test]
fn fist_requires_all_four_fingers_curled() {
    let hand = fist_hand(0.5, 0.5);
    assert!(is_fist(&hand));

    // Straighten only the pinky: no longer a fist.
    let mut partial = hand.clone();
    partial.set(gesture_shooter::perception::PINKY_PIP, Landmark::new(0.59, 0.55));
    assert!(!is_fist(&partial));
}

#[test]
fn pinch_openness_is_clamped() {
    assert_abs_diff_eq!(pinch_openness(0.0), 0.0);
    assert_abs_diff_eq!(pinch_openness(0.1), 0.5);
    assert_abs_diff_eq!(pinch_openness(0.9), 1.0);
}

// ── pointer smoothing ─────────────────────────────────────────────────────────

#[test]
fn first_sample_seeds_pointer() {
    let mut g = interpreter();
    assert_eq!(g.pointer(), None);
    let r = g.update(&open_hand(0.5, 0.5), VIEWPORT, 0);
    assert_abs_diff_eq!(r.pointer.x, 640.0, epsilon = 1e-3);
    assert_abs_diff_eq!(r.pointer.y, 360.0, epsilon = 1e-3);
}

#[test]
fn pointer_moves_smoothing_fraction_per_tick() {
    let mut g = interpreter();
    g.update(&open_hand(0.5, 0.5), VIEWPORT, 0);
    // raw jumps to x = 960; 20% of the 320 px gap is 64 px
    let r = g.update(&open_hand(0.75, 0.5), VIEWPORT, 16);
    assert_abs_diff_eq!(r.pointer.x, 704.0, epsilon = 1e-3);
    assert_abs_diff_eq!(r.pointer.y, 360.0, epsilon = 1e-3);
}

#[test]
fn pointer_converges_without_overshoot() {
    let mut g = interpreter();
    g.update(&open_hand(0.1, 0.1), VIEWPORT, 0);
    let raw = Point::new(0.8 * VIEWPORT.width, 0.7 * VIEWPORT.height);
    let hand = open_hand(0.8, 0.7);

    let mut prev = distance(g.pointer().unwrap(), raw);
    for t in 1..200 {
        let r = g.update(&hand, VIEWPORT, t * 16);
        let d = distance(r.pointer, raw);
        // moves exactly factor × remaining distance, never past the target
        assert!(d <= prev * (1.0 - 0.2) + 1e-3);
        prev = d;
    }
    assert!(prev < 1e-2);
}

// ── trigger & debounce ────────────────────────────────────────────────────────

#[test]
fn open_hand_never_fires() {
    let mut g = interpreter();
    for t in 0..50 {
        assert!(!g.update(&open_hand(0.5, 0.5), VIEWPORT, t * 100).fire);
    }
}

#[test]
fn first_pinch_fires_immediately() {
    let mut g = interpreter();
    let r = g.update(&pinching_hand(0.5, 0.5), VIEWPORT, 5);
    assert!(r.pinching);
    assert!(r.fire);
    assert_eq!(g.last_fire_ms(), Some(5));
}

#[test]
fn triggers_inside_cooldown_fire_once() {
    let mut g = interpreter();
    let shots = [0, 100, 200, 299]
        .iter()
        .filter(|&&t| g.update(&pinching_hand(0.5, 0.5), VIEWPORT, t).fire)
        .count();
    assert_eq!(shots, 1);
}

#[test]
fn triggers_past_cooldown_fire_twice() {
    let mut g = interpreter();
    assert!(g.update(&pinching_hand(0.5, 0.5), VIEWPORT, 1000).fire);
    assert!(g.update(&pinching_hand(0.5, 0.5), VIEWPORT, 1400).fire);
}

#[test]
fn cooldown_boundary_is_inclusive() {
    let mut g = interpreter();
    assert!(g.try_fire(1000));
    assert!(!g.try_fire(1299));
    assert!(g.try_fire(1300));
}

#[test]
fn fist_fires_when_enabled() {
    let mut g = interpreter();
    let r = g.update(&fist_hand(0.5, 0.5), VIEWPORT, 0);
    assert!(r.fist);
    assert!(!r.pinching);
    assert!(r.fire);
}

#[test]
fn fist_ignored_when_disabled() {
    let mut g = GestureInterpreter::new(GestureConfig {
        fist_trigger: false,
        ..GestureConfig::default()
    });
    let r = g.update(&fist_hand(0.5, 0.5), VIEWPORT, 0);
    assert!(!r.fist);
    assert!(!r.fire);
}

#[test]
fn reset_forgets_pointer_and_cooldown() {
    let mut g = interpreter();
    g.update(&pinching_hand(0.5, 0.5), VIEWPORT, 0);
    g.reset();
    assert_eq!(g.pointer(), None);
    assert!(g.update(&pinching_hand(0.5, 0.5), VIEWPORT, 10).fire);
}

// ── landmark input ────────────────────────────────────────────────────────────

#[test]
fn landmarks_require_exactly_21_points() {
    let short = vec![Landmark::default(); 20];
    match HandLandmarks::from_slice(&short) {
        Err(GameError::LandmarkCount { expected, got }) => {
            assert_eq!(expected, LANDMARK_COUNT);
            assert_eq!(got, 20);
        }
        other => panic!("expected LandmarkCount error, got {other:?}"),
    }
    assert!(HandLandmarks::from_slice(&[Landmark::default(); LANDMARK_COUNT]).is_ok());
}

#[test]
fn slot_keeps_only_latest_result() {
    let mut slot = LandmarkSlot::new();
    assert!(slot.latest().is_none());

    slot.publish(Some(open_hand(0.2, 0.2)));
    slot.publish(Some(open_hand(0.6, 0.6)));
    assert_eq!(slot.latest(), Some(&open_hand(0.6, 0.6)));

    slot.publish(None);
    assert!(slot.latest().is_none());
    assert_eq!(slot.published(), 3);
}
