//! Game entities: targets, power-ups and explosion particles.
//!
//! Each entity owns its own per-tick update (`advance`) and its own drawing
//! (`render`).  The simulation loop only reads position, radius and colour
//! for collision and scoring.

use rand::Rng;

use crate::canvas::{Canvas, Color};
use crate::geometry::{Point, Viewport};

// ── Tuning ────────────────────────────────────────────────────────────────────

const TARGET_MIN_RADIUS: f32 = 30.0;
const TARGET_RADIUS_SPREAD: f32 = 20.0;
const TARGET_MIN_SPEED: f32 = 2.0;
const TARGET_SPEED_SPREAD: f32 = 2.0;
const TARGET_SPEED_PER_LEVEL: f32 = 0.5;
/// Targets spawn in `[TOP_MARGIN, height - BOTTOM_MARGIN)`.
const TARGET_TOP_MARGIN: f32 = 100.0;
const TARGET_BOTTOM_MARGIN: f32 = 200.0;
const TARGET_ANGLE_STEP: f32 = 0.05;

/// Half-width of the band around the centre where divers drop.
const DIVER_BAND: f32 = 200.0;
const DIVER_DROP: f32 = 3.0;

const POWERUP_RADIUS: f32 = 25.0;
const POWERUP_SPEED_Y: f32 = -2.0;
const POWERUP_EDGE_MARGIN: f32 = 50.0;

const PARTICLE_MIN_SIZE: f32 = 2.0;
const PARTICLE_SIZE_SPREAD: f32 = 5.0;
const PARTICLE_MAX_SPEED: f32 = 3.0;
const PARTICLE_LIFE_STEP: f32 = 0.05;

// ── Target ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// Gentle sine drift.
    Normal,
    /// Fast vertical oscillation.  Unlocks above level 1.
    Zigzag,
    /// Drops while crossing the middle of the screen.  Unlocks above level 3.
    Diver,
    /// 1.5× horizontal speed.  Unlocks above level 2.
    Fast,
}

impl TargetKind {
    /// Pick a kind from a uniform roll in `[0, 1)`.  Each band is only open
    /// once `level` is high enough; a closed band falls through to the next.
    pub fn from_roll(roll: f32, level: u32) -> Self {
        if roll < 0.1 && level > 2 {
            TargetKind::Fast
        } else if roll < 0.2 && level > 1 {
            TargetKind::Zigzag
        } else if roll < 0.3 && level > 3 {
            TargetKind::Diver
        } else {
            TargetKind::Normal
        }
    }

    pub fn color(self, rng: &mut impl Rng) -> Color {
        match self {
            TargetKind::Fast => Color::hex(0xFF4081),
            TargetKind::Zigzag => Color::hex(0x7C4DFF),
            TargetKind::Diver => Color::hex(0x536DFE),
            // yellow → orange
            TargetKind::Normal => Color::from_hsl(rng.gen::<f32>() * 60.0 + 30.0, 1.0, 0.5),
        }
    }
}

/// Whether a target is still on screen after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetStep {
    Moving,
    /// Crossed the far edge; costs the player a life.
    Escaped,
}

#[derive(Clone, Debug)]
pub struct Target {
    pub pos: Point,
    pub radius: f32,
    pub speed: f32,
    pub direction: Direction,
    pub color: Color,
    pub kind: TargetKind,
    /// Animation phase, advanced every tick.
    pub angle: f32,
    pub marked_for_deletion: bool,
}

impl Target {
    pub fn new(
        pos: Point,
        radius: f32,
        speed: f32,
        direction: Direction,
        kind: TargetKind,
        color: Color,
    ) -> Self {
        Self {
            pos,
            radius,
            speed,
            direction,
            color,
            kind,
            angle: 0.0,
            marked_for_deletion: false,
        }
    }

    /// Create a target just outside the edge it will enter from.
    pub fn spawn(level: u32, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let radius = TARGET_MIN_RADIUS + rng.gen::<f32>() * TARGET_RADIUS_SPREAD;
        let band = (viewport.height - TARGET_TOP_MARGIN - TARGET_BOTTOM_MARGIN).max(0.0);
        let y = rng.gen::<f32>() * band + TARGET_TOP_MARGIN;
        let speed = TARGET_MIN_SPEED
            + rng.gen::<f32>() * TARGET_SPEED_SPREAD
            + level as f32 * TARGET_SPEED_PER_LEVEL;
        let direction = if rng.gen_bool(0.5) { Direction::Right } else { Direction::Left };
        let x = match direction {
            Direction::Right => -radius,
            Direction::Left => viewport.width + radius,
        };
        let kind = TargetKind::from_roll(rng.gen::<f32>(), level);
        let color = kind.color(rng);

        Self::new(Point::new(x, y), radius, speed, direction, kind, color)
    }

    pub fn advance(&mut self, viewport: Viewport) -> TargetStep {
        let sign = self.direction.sign();
        self.pos.x += self.speed * sign;
        self.angle += TARGET_ANGLE_STEP;

        match self.kind {
            TargetKind::Normal => self.pos.y += (self.pos.x / 100.0).sin() * 2.0,
            TargetKind::Zigzag => self.pos.y += (self.angle * 5.0).sin() * 5.0,
            TargetKind::Diver => {
                if (self.pos.x - viewport.center_x()).abs() < DIVER_BAND {
                    self.pos.y += DIVER_DROP;
                }
            }
            TargetKind::Fast => self.pos.x += self.speed * 0.5 * sign,
        }

        let escaped = match self.direction {
            Direction::Right => self.pos.x > viewport.width + self.radius,
            Direction::Left => self.pos.x < -self.radius,
        };
        if escaped {
            self.marked_for_deletion = true;
            TargetStep::Escaped
        } else {
            TargetStep::Moving
        }
    }

    /// Disc with a single eye looking the way it travels.
    pub fn render(&self, canvas: &mut impl Canvas) {
        let sign = self.direction.sign();
        canvas.fill_circle(self.pos, self.radius, self.color);
        canvas.fill_circle(self.pos.offset(10.0 * sign, -10.0), 8.0, Color::WHITE);
        canvas.fill_circle(self.pos.offset(12.0 * sign, -10.0), 3.0, Color::BLACK);
    }

    /// Shot at `at` lands within radius + margin.
    pub fn is_hit_by(&self, at: Point, margin: f32) -> bool {
        self.pos.distance(at) < self.radius + margin
    }
}

// ── Power-up ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Clears every target on screen.
    Nuke,
}

impl PowerUpKind {
    pub fn glyph(self) -> &'static str {
        match self {
            PowerUpKind::Nuke => "💣",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub pos: Point,
    pub radius: f32,
    pub speed_y: f32,
    pub kind: PowerUpKind,
    pub color: Color,
    pub marked_for_deletion: bool,
}

impl PowerUp {
    pub fn new(pos: Point, kind: PowerUpKind) -> Self {
        Self {
            pos,
            radius: POWERUP_RADIUS,
            speed_y: POWERUP_SPEED_Y,
            kind,
            color: Color::hex(0x00E676),
            marked_for_deletion: false,
        }
    }

    /// Create a power-up below the bottom edge; it rises into view.
    pub fn spawn(viewport: Viewport, rng: &mut impl Rng) -> Self {
        let band = (viewport.width - 2.0 * POWERUP_EDGE_MARGIN).max(0.0);
        let x = rng.gen::<f32>() * band + POWERUP_EDGE_MARGIN;
        let y = viewport.height + POWERUP_EDGE_MARGIN;
        Self::new(Point::new(x, y), PowerUpKind::Nuke)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed_y;
        if self.pos.y < -POWERUP_EDGE_MARGIN {
            self.marked_for_deletion = true;
        }
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.fill_circle(self.pos, self.radius, self.color);
        canvas.fill_text(self.kind.glyph(), self.pos.offset(-10.0, 7.0), Color::WHITE);
    }

    pub fn is_hit_by(&self, at: Point, margin: f32) -> bool {
        self.pos.distance(at) < self.radius + margin
    }
}

// ── Particle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Point,
    pub size: f32,
    pub velocity: Point,
    pub color: Color,
    /// Doubles as opacity; the particle is gone once this reaches 0.
    pub life: f32,
}

impl Particle {
    pub fn spawn(at: Point, color: Color, rng: &mut impl Rng) -> Self {
        let vx = rng.gen::<f32>() * 2.0 * PARTICLE_MAX_SPEED - PARTICLE_MAX_SPEED;
        let vy = rng.gen::<f32>() * 2.0 * PARTICLE_MAX_SPEED - PARTICLE_MAX_SPEED;
        Self {
            pos: at,
            size: rng.gen::<f32>() * PARTICLE_SIZE_SPREAD + PARTICLE_MIN_SIZE,
            velocity: Point::new(vx, vy),
            color,
            life: 1.0,
        }
    }

    pub fn advance(&mut self) {
        self.pos.x += self.velocity.x;
        self.pos.y += self.velocity.y;
        self.life -= PARTICLE_LIFE_STEP;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.set_alpha(self.life.max(0.0));
        canvas.fill_circle(self.pos, self.size, self.color);
        canvas.set_alpha(1.0);
    }
}
