//! Tunable gameplay constants, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Gesture ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Fraction of the remaining distance the pointer moves each tick.
    pub smoothing_factor: f32,
    /// Thumb-tip to index-tip distance (normalized) below which we call it a pinch.
    pub pinch_threshold: f32,
    /// Minimum time between two shots.
    pub shot_cooldown_ms: u64,
    /// Whether a closed fist also fires.
    pub fist_trigger: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.2,
            pinch_threshold: 0.05,
            shot_cooldown_ms: 300,
            fist_trigger: true,
        }
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub initial_lives: u32,
    /// Extra pixels added to a target's radius when testing a shot.
    pub hit_margin: f32,
    pub target_score: u32,
    /// Per-target bonus when a nuke clears the field.
    pub nuke_score: u32,
    /// Points per level.
    pub level_step: u32,
    pub particles_per_burst: usize,
    pub target_spawn_base: f32,
    pub target_spawn_per_level: f32,
    pub powerup_spawn_chance: f32,
    pub shot_shake: f32,
    pub nuke_shake: f32,
    pub shake_decay: f32,
    pub shake_cutoff: f32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_lives: 3,
            hit_margin: 15.0,
            target_score: 10,
            nuke_score: 5,
            level_step: 50,
            particles_per_burst: 10,
            target_spawn_base: 0.02,
            target_spawn_per_level: 0.005,
            powerup_spawn_chance: 0.002,
            shot_shake: 5.0,
            nuke_shake: 20.0,
            shake_decay: 0.9,
            shake_cutoff: 0.5,
        }
    }
}

impl RulesConfig {
    /// Same rules with every random spawn switched off.
    pub fn without_spawns(self) -> Self {
        Self {
            target_spawn_base: 0.0,
            target_spawn_per_level: 0.0,
            powerup_spawn_chance: 0.0,
            ..self
        }
    }
}

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gesture: GestureConfig,
    pub rules: RulesConfig,
}

impl GameConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        let r = &self.rules;

        if !(g.smoothing_factor > 0.0 && g.smoothing_factor <= 1.0) {
            return Err(invalid("gesture.smoothing_factor", "must be in (0, 1]"));
        }
        if !(g.pinch_threshold > 0.0) {
            return Err(invalid("gesture.pinch_threshold", "must be positive"));
        }
        if r.initial_lives == 0 {
            return Err(invalid("rules.initial_lives", "must be at least 1"));
        }
        if r.level_step == 0 {
            return Err(invalid("rules.level_step", "must be at least 1"));
        }
        if !(r.hit_margin >= 0.0) {
            return Err(invalid("rules.hit_margin", "must not be negative"));
        }
        for (name, p) in [
            ("rules.target_spawn_base", r.target_spawn_base),
            ("rules.target_spawn_per_level", r.target_spawn_per_level),
            ("rules.powerup_spawn_chance", r.powerup_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(name, "must be a probability in [0, 1]"));
            }
        }
        for (name, shake) in [
            ("rules.shot_shake", r.shot_shake),
            ("rules.nuke_shake", r.nuke_shake),
        ] {
            if !(shake >= 0.0) {
                return Err(invalid(name, "must not be negative"));
            }
        }
        if !(0.0..1.0).contains(&r.shake_decay) {
            return Err(invalid("rules.shake_decay", "must be in [0, 1)"));
        }
        if !(r.shake_cutoff > 0.0) {
            return Err(invalid("rules.shake_cutoff", "must be positive"));
        }
        Ok(())
    }
}

fn invalid(key: &str, why: &str) -> ConfigError {
    ConfigError::Invalid(format!("{key} {why}"))
}
