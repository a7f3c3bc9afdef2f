//! Game-logic functions.
//!
//! These mutate the `GameState` in place through `&mut`; nothing here is a
//! pure state-to-state transition.  Randomness comes only from the injected
//! RNG and time only from `now_ms`, so a seeded RNG and a fake clock give
//! reproducible runs.  Each call returns the events it produced for the UI
//! layer to consume.

use rand::Rng;

use crate::audio::Sound;
use crate::canvas::{Canvas, Color};
use crate::config::GameConfig;
use crate::entities::{Particle, PowerUp, PowerUpKind, Target, TargetStep};
use crate::geometry::{Point, Viewport};
use crate::gesture::{pinch_openness, GestureReading};
use crate::perception::HandLandmarks;
use crate::state::{GameEvent, GameState, GameStatus, TargetId};

const SHOT_FLASH_RADIUS: f32 = 20.0;
const CROSSHAIR_ARM: f32 = 20.0;
const CROSSHAIR_RING: f32 = 15.0;
const CROSSHAIR_WIDTH: f32 = 3.0;
const PINCH_RING_MIN: f32 = 10.0;
const PINCH_RING_GROWTH: f32 = 40.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build an idle state; call `start_session` to begin play.
pub fn init_state(config: &GameConfig, viewport: Viewport) -> GameState {
    GameState::new(config, viewport)
}

/// Reset score, level, lives, entities and gesture state, then start running.
pub fn start_session(state: &mut GameState) -> Vec<GameEvent> {
    state.status = GameStatus::Running;
    state.score = 0;
    state.level = 1;
    state.lives = state.rules.initial_lives;
    state.targets.clear();
    state.powerups.clear();
    state.particles.clear();
    state.screen_shake = 0.0;
    state.gesture.reset();
    state.frame = 0;

    log::info!("session started with {} lives", state.lives);
    vec![
        GameEvent::SessionStarted,
        GameEvent::ScoreChanged { score: state.score },
        GameEvent::LivesChanged { lives: state.lives },
    ]
}

/// The drawing surface changed size.
pub fn resize(state: &mut GameState, viewport: Viewport) {
    state.viewport = viewport;
}

// ── Spawning ──────────────────────────────────────────────────────────────────

pub fn spawn_target(state: &mut GameState, rng: &mut impl Rng) -> TargetId {
    let target = Target::spawn(state.level, state.viewport, rng);
    state.targets.insert(target)
}

pub fn spawn_powerup(state: &mut GameState, rng: &mut impl Rng) {
    let powerup = PowerUp::spawn(state.viewport, rng);
    state.powerups.insert(powerup);
}

/// Chance per tick of a new target; grows linearly with level.
pub fn target_spawn_chance(state: &GameState) -> f32 {
    let rules = &state.rules;
    (rules.target_spawn_base + state.level as f32 * rules.target_spawn_per_level).min(1.0)
}

pub fn spawn_burst(state: &mut GameState, at: Point, color: Color, rng: &mut impl Rng) {
    for _ in 0..state.rules.particles_per_burst {
        state.particles.insert(Particle::spawn(at, color, rng));
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Add points and bump the level once for every `level_step` boundary the
/// score crosses.
pub fn award(state: &mut GameState, points: u32, events: &mut Vec<GameEvent>) {
    let step = state.rules.level_step;
    let before = state.score;
    state.score += points;
    events.push(GameEvent::ScoreChanged { score: state.score });

    let crossed = state.score / step - before / step;
    for _ in 0..crossed {
        state.level += 1;
        log::debug!("level up → {} at score {}", state.level, state.score);
        events.push(GameEvent::LevelUp { level: state.level });
    }
}

/// One target got away.  Lives never go below zero and game-over fires once.
pub fn lose_life(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.status != GameStatus::Running || state.lives == 0 {
        return;
    }
    state.lives -= 1;
    events.push(GameEvent::LivesChanged { lives: state.lives });
    events.push(GameEvent::Sound(Sound::Hit));

    if state.lives == 0 {
        state.status = GameStatus::GameOver;
        log::info!("game over, final score {}", state.score);
        events.push(GameEvent::GameOver { final_score: state.score });
    }
}

// ── Shots ─────────────────────────────────────────────────────────────────────

/// Fire at `at`: play the shot sound, kick the screen, then resolve hits.
pub fn shoot(state: &mut GameState, at: Point, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = vec![GameEvent::ShotFired { at }, GameEvent::Sound(Sound::Shoot)];
    state.screen_shake = state.rules.shot_shake;
    resolve_shot(state, at, rng, &mut events);
    events
}

/// Test every live target and power-up against a shot.  One shot can hit
/// any number of them.
pub fn resolve_shot(
    state: &mut GameState,
    at: Point,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) {
    let margin = state.rules.hit_margin;

    let hit_targets: Vec<TargetId> = state
        .targets
        .iter()
        .filter(|(_, t)| t.is_hit_by(at, margin))
        .map(|(id, _)| id)
        .collect();

    for id in hit_targets {
        if let Some(target) = state.targets.remove(id) {
            events.push(GameEvent::TargetHit { at: target.pos });
            events.push(GameEvent::Sound(Sound::Hit));
            spawn_burst(state, target.pos, target.color, rng);
            let points = state.rules.target_score;
            award(state, points, events);
        }
    }

    let hit_powerups: Vec<_> = state
        .powerups
        .iter()
        .filter(|(_, p)| p.is_hit_by(at, margin))
        .map(|(id, _)| id)
        .collect();

    for id in hit_powerups {
        if let Some(powerup) = state.powerups.remove(id) {
            events.push(GameEvent::PowerUpCollected { kind: powerup.kind });
            match powerup.kind {
                PowerUpKind::Nuke => nuke(state, rng, events),
            }
        }
    }
}

/// Clear every target, paying the nuke bonus and a burst for each.
pub fn nuke(state: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    let cleared: Vec<(Point, Color)> = state.targets.values().map(|t| (t.pos, t.color)).collect();
    state.targets.clear();

    for &(pos, color) in &cleared {
        spawn_burst(state, pos, color, rng);
    }
    let bonus = state.rules.nuke_score * cleared.len() as u32;
    award(state, bonus, events);

    log::debug!("nuke cleared {} targets", cleared.len());
    events.push(GameEvent::Sound(Sound::Hit));
    state.screen_shake = state.rules.nuke_shake;
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Advance the simulation by one frame and draw it.
///
/// `hand` is whatever the tracker last produced; `now_ms` is a monotonic
/// clock used for the shot cooldown.  Does nothing unless running.
pub fn tick(
    state: &mut GameState,
    hand: Option<&HandLandmarks>,
    now_ms: u64,
    rng: &mut impl Rng,
    canvas: &mut impl Canvas,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }
    state.frame += 1;
    canvas.clear();

    // ── 1. Screen shake ──────────────────────────────────────────────────────
    let shaking = state.screen_shake > 0.0;
    if shaking {
        let dx = (rng.gen::<f32>() - 0.5) * state.screen_shake;
        let dy = (rng.gen::<f32>() - 0.5) * state.screen_shake;
        canvas.set_offset(Point::new(dx, dy));
        state.screen_shake *= state.rules.shake_decay;
        if state.screen_shake < state.rules.shake_cutoff {
            state.screen_shake = 0.0;
        }
    }

    // ── 2. Spawn ─────────────────────────────────────────────────────────────
    if rng.gen::<f32>() < target_spawn_chance(state) {
        spawn_target(state, rng);
    }
    if rng.gen::<f32>() < state.rules.powerup_spawn_chance {
        spawn_powerup(state, rng);
    }

    // ── 3. Advance, draw, then sweep ─────────────────────────────────────────
    let viewport = state.viewport;
    let mut escaped = 0;
    for (_, target) in state.targets.iter_mut() {
        if target.advance(viewport) == TargetStep::Escaped {
            escaped += 1;
        }
        target.render(canvas);
    }
    state.targets.retain(|_, t| !t.marked_for_deletion);
    for _ in 0..escaped {
        lose_life(state, &mut events);
    }

    for (_, powerup) in state.powerups.iter_mut() {
        powerup.advance();
        powerup.render(canvas);
    }
    state.powerups.retain(|_, p| !p.marked_for_deletion);

    for (_, particle) in state.particles.iter_mut() {
        particle.advance();
        particle.render(canvas);
    }
    state.particles.retain(|_, p| !p.is_dead());

    if shaking {
        canvas.set_offset(Point::default());
    }

    // ── 4. Gesture input ─────────────────────────────────────────────────────
    if let Some(hand) = hand {
        if state.is_running() {
            let reading = state.gesture.update(hand, viewport, now_ms);
            draw_pinch_ring(canvas, &reading);
            if reading.fire {
                events.extend(shoot(state, reading.pointer, rng));
                canvas.fill_circle(reading.pointer, SHOT_FLASH_RADIUS, Color::SHOT_FLASH);
            }
            draw_crosshair(canvas, reading.pointer);
        }
    }

    events
}

// ── Cursor drawing ────────────────────────────────────────────────────────────

/// Ring that shrinks and brightens as the fingertips close.
fn draw_pinch_ring(canvas: &mut impl Canvas, reading: &GestureReading) {
    let openness = pinch_openness(reading.pinch_distance);
    let radius = PINCH_RING_MIN + openness * PINCH_RING_GROWTH;
    canvas.stroke_circle(reading.pointer, radius, Color::WHITE.with_alpha(1.0 - openness), 2.0);
}

fn draw_crosshair(canvas: &mut impl Canvas, at: Point) {
    let c = Color::CROSSHAIR;
    canvas.stroke_line(
        at.offset(-CROSSHAIR_ARM, 0.0),
        at.offset(CROSSHAIR_ARM, 0.0),
        c,
        CROSSHAIR_WIDTH,
    );
    canvas.stroke_line(
        at.offset(0.0, -CROSSHAIR_ARM),
        at.offset(0.0, CROSSHAIR_ARM),
        c,
        CROSSHAIR_WIDTH,
    );
    canvas.stroke_circle(at, CROSSHAIR_RING, c, CROSSHAIR_WIDTH);
}
