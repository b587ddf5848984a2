//! Config / rules / roster loading
//!
//! YAML 또는 JSON 파일에서 설정을 로드합니다. Format is picked from the
//! file extension (`.yaml`, `.yml`, `.json`). Everything loaded here is
//! validated before it is returned; failures are [`ConfigError`]s and are
//! fatal for the caller.
//!
//! ```rust
//! use bb_core::data::{load_config_str, DataFormat};
//!
//! let cfg = load_config_str("batted_ball:\n  error_rate: 0.03\n", DataFormat::Yaml).unwrap();
//! assert!((cfg.batted_ball.error_rate - 0.03).abs() < 1e-6);
//! ```

use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::engine::config::BaselineConfig;
use crate::error::ConfigError;
use crate::models::{Rules, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Yaml,
    Json,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
            Some("json") => Ok(DataFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

// =============================================================================
// Generic parsing
// =============================================================================

fn parse<T: DeserializeOwned>(text: &str, format: DataFormat) -> Result<T, ConfigError> {
    Ok(match format {
        DataFormat::Yaml => serde_yaml::from_str(text)?,
        DataFormat::Json => serde_json::from_str(text)?,
    })
}

fn read(path: &Path) -> Result<(String, DataFormat), ConfigError> {
    let format = DataFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
    debug!(path = %path.display(), ?format, bytes = text.len(), "loaded data file");
    Ok((text, format))
}

// =============================================================================
// Baseline config
// =============================================================================

static DEFAULT_CONFIG: OnceLock<Arc<BaselineConfig>> = OnceLock::new();

/// Shared default tables. Built once, then cloned by reference count.
pub fn default_config() -> Arc<BaselineConfig> {
    DEFAULT_CONFIG.get_or_init(|| Arc::new(BaselineConfig::default())).clone()
}

/// Missing keys fall back to the baseline values.
pub fn load_config_str(text: &str, format: DataFormat) -> Result<BaselineConfig, ConfigError> {
    let config: BaselineConfig = parse(text, format)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config_file(path: impl AsRef<Path>) -> Result<BaselineConfig, ConfigError> {
    let (text, format) = read(path.as_ref())?;
    load_config_str(&text, format)
}

pub fn config_to_string(config: &BaselineConfig, format: DataFormat) -> Result<String, ConfigError> {
    Ok(match format {
        DataFormat::Yaml => serde_yaml::to_string(config)?,
        DataFormat::Json => serde_json::to_string_pretty(config)?,
    })
}

// =============================================================================
// Rules
// =============================================================================

pub fn load_rules_str(text: &str, format: DataFormat) -> Result<Rules, ConfigError> {
    let rules: Rules = parse(text, format)?;
    rules.validate()?;
    Ok(rules)
}

pub fn load_rules_file(path: impl AsRef<Path>) -> Result<Rules, ConfigError> {
    let (text, format) = read(path.as_ref())?;
    load_rules_str(&text, format)
}

// =============================================================================
// Rosters
// =============================================================================

/// Parse a team. Roster consistency is checked by the engine at game start.
pub fn load_team_str(text: &str, format: DataFormat) -> Result<Team, ConfigError> {
    parse(text, format)
}

pub fn load_team_file(path: impl AsRef<Path>) -> Result<Team, ConfigError> {
    let (text, format) = read(path.as_ref())?;
    load_team_str(&text, format)
}
