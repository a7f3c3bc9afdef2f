//! Error types for configuration loading and session start-up.
//!
//! The per-frame simulation never fails; only acquiring the perception
//! stream and reading configuration can.

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value parsed but is outside its usable range
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// The camera / hand tracker could not be started (e.g. permission denied).
    #[error("perception stream unavailable: {0}")]
    PerceptionUnavailable(String),

    #[error("expected {expected} hand landmarks, got {got}")]
    LandmarkCount { expected: usize, got: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
