//! Session state and the events it emits.

use slotmap::{new_key_type, SlotMap};

use crate::audio::Sound;
use crate::config::{GameConfig, RulesConfig};
use crate::entities::{Particle, PowerUp, PowerUpKind, Target};
use crate::geometry::{Point, Viewport};
use crate::gesture::GestureInterpreter;

new_key_type! {
    pub struct TargetId;
    pub struct PowerUpId;
    pub struct ParticleId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Before the first session.
    Idle,
    Running,
    /// Lives ran out.  Stays here until the next session start.
    GameOver,
}

/// Everything the surrounding UI needs to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    ShotFired { at: Point },
    TargetHit { at: Point },
    PowerUpCollected { kind: PowerUpKind },
    ScoreChanged { score: u32 },
    LevelUp { level: u32 },
    LivesChanged { lives: u32 },
    GameOver { final_score: u32 },
    Sound(Sound),
}

/// Read-only view for HUD drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub status: GameStatus,
}

/// The whole session.  The simulation loop is its only writer.
#[derive(Clone, Debug)]
pub struct GameState {
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub targets: SlotMap<TargetId, Target>,
    pub powerups: SlotMap<PowerUpId, PowerUp>,
    pub particles: SlotMap<ParticleId, Particle>,
    /// Current shake magnitude in pixels; decays every tick.
    pub screen_shake: f32,
    pub gesture: GestureInterpreter,
    pub rules: RulesConfig,
    pub viewport: Viewport,
    pub frame: u64,
}

impl GameState {
    pub fn new(config: &GameConfig, viewport: Viewport) -> Self {
        Self {
            status: GameStatus::Idle,
            score: 0,
            level: 1,
            lives: config.rules.initial_lives,
            targets: SlotMap::with_key(),
            powerups: SlotMap::with_key(),
            particles: SlotMap::with_key(),
            screen_shake: 0.0,
            gesture: GestureInterpreter::new(config.gesture.clone()),
            rules: config.rules.clone(),
            viewport,
            frame: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            level: self.level,
            lives: self.lives,
            status: self.status,
        }
    }
}
