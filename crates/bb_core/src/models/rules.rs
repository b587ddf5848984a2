use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_innings() -> u8 {
    9
}
fn default_outs() -> u8 {
    3
}
fn default_balls() -> u8 {
    4
}
fn default_strikes() -> u8 {
    3
}
fn default_max_cycles() -> u32 {
    20_000
}

/// Game rules. Immutable for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Regulation innings
    #[serde(default = "default_innings")]
    pub innings: u8,
    #[serde(default = "default_outs")]
    pub outs_per_half: u8,
    #[serde(default = "default_balls")]
    pub balls_for_walk: u8,
    #[serde(default = "default_strikes")]
    pub strikes_for_strikeout: u8,
    /// End the game as soon as the home side leads in a bottom half at or
    /// past the regulation inning count.
    #[serde(default)]
    pub walk_off: bool,
    /// Upper bound on pitch cycles; exceeding it is a per-game error.
    #[serde(default = "default_max_cycles")]
    pub max_pitch_cycles: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            innings: default_innings(),
            outs_per_half: default_outs(),
            balls_for_walk: default_balls(),
            strikes_for_strikeout: default_strikes(),
            walk_off: false,
            max_pitch_cycles: default_max_cycles(),
        }
    }
}

impl Rules {
    /// Seven-inning game, e.g. doubleheaders.
    pub fn seven_innings() -> Self {
        Self { innings: 7, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("innings", self.innings),
            ("outs_per_half", self.outs_per_half),
            ("balls_for_walk", self.balls_for_walk),
            ("strikes_for_strikeout", self.strikes_for_strikeout),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(ConfigError::InvalidRules(format!("{name} must be > 0")));
            }
        }
        if self.max_pitch_cycles == 0 {
            return Err(ConfigError::InvalidRules("max_pitch_cycles must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = Rules::default();
        assert_eq!(rules.innings, 9);
        assert_eq!(rules.outs_per_half, 3);
        assert_eq!(rules.balls_for_walk, 4);
        assert_eq!(rules.strikes_for_strikeout, 3);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_zero_rule_rejected() {
        let rules = Rules { balls_for_walk: 0, ..Rules::default() };
        assert!(matches!(rules.validate(), Err(ConfigError::InvalidRules(_))));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let rules: Rules = serde_yaml::from_str("innings: 7\nwalk_off: true\n").unwrap();
        assert_eq!(rules.innings, 7);
        assert_eq!(rules.outs_per_half, 3);
        assert!(rules.walk_off);
    }
}
