use thiserror::Error;

use crate::models::{Depth, Direction, PlayerId, Position};

/// Configuration / rules loading failures. Fatal at load time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Missing table entry: {table}[{key}]")]
    MissingTable { table: &'static str, key: String },

    #[error("Invalid probability in {table}[{key}]: {value}")]
    InvalidProbability { table: &'static str, key: String, value: f32 },

    #[error("Distribution {table}[{key}] has no positive weight")]
    EmptyDistribution { table: &'static str, key: String },

    #[error("Invalid rules: {0}")]
    InvalidRules(String),
}

impl ConfigError {
    pub fn is_recoverable(&self) -> bool {
        // Only a missing/unreadable file can be fixed by retrying with another path.
        matches!(self, ConfigError::Io { .. } | ConfigError::UnsupportedFormat(_))
    }
}

/// Per-game simulation failures. Abort only the game that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid team {team}: {reason}")]
    InvalidTeam { team: String, reason: String },

    #[error("Unknown player id {0}")]
    UnknownPlayer(PlayerId),

    #[error("No defensive assignment for {position} on team {team}")]
    MissingPosition { team: String, position: Position },

    #[error("No fielder mapping for {depth:?} / {direction:?}")]
    NoFielderMapping { depth: Depth, direction: Direction },

    #[error("Pitcher {0} has no pitching ratings")]
    NotAPitcher(PlayerId),

    #[error("Game exceeded {0} pitch cycles without ending")]
    CycleLimitExceeded(u32),

    #[error("Game ended tied at {0}")]
    NoWinner(u16),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        SimError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
