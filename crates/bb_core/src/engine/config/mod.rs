//! # Baseline Configuration
//!
//! Every probability table the resolvers read. One immutable value per game,
//! passed explicitly; batches share it behind an `Arc`.
//!
//! ## 사용법
//! ```rust
//! use bb_core::engine::config::BaselineConfig;
//!
//! let config = BaselineConfig::default();
//! assert!(config.validate().is_ok());
//! let lively = BaselineConfig::high_offense();
//! assert!(lively.validate().is_ok());
//! ```

mod batted_ball_config;
mod pitch_config;
mod running_config;

pub use batted_ball_config::{AlignmentEntry, BattedBallConfig, FreeHit};
pub use pitch_config::PitchConfig;
pub use running_config::{BaseRates, BatteryWeights, RunningConfig};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::ConfigError;
use crate::models::{ContactQuality, Situation};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BaselineConfig {
    pub pitch: PitchConfig,
    pub batted_ball: BattedBallConfig,
    pub running: RunningConfig,
}

impl BaselineConfig {
    /// Livelier ball: more contact, fewer catches.
    pub fn high_offense() -> Self {
        let mut cfg = Self::default();
        cfg.pitch.zone_contact_rate = 0.88;
        cfg.pitch.contact_quality.insert(ContactQuality::Barrel, 0.10);
        for row in cfg.batted_ball.catch_rates.values_mut() {
            for rate in row.values_mut() {
                *rate *= 0.9;
            }
        }
        cfg
    }

    /// Baseline tables without steal/pickoff attempts.
    pub fn station_to_station() -> Self {
        Self { running: RunningConfig::station_to_station(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pitch = &self.pitch;
        check_distribution("arsenal_weights", "*", pitch.arsenal_weights.iter().copied())?;
        for (key, value) in [
            ("zone_rate", pitch.zone_rate),
            ("hit_by_pitch_rate", pitch.hit_by_pitch_rate),
            ("framing_rate", pitch.framing_rate),
            ("fatigue_floor", pitch.fatigue_floor),
            ("zone_swing_rate", pitch.zone_swing_rate),
            ("chase_rate", pitch.chase_rate),
            ("zone_contact_rate", pitch.zone_contact_rate),
            ("chase_contact_rate", pitch.chase_contact_rate),
            ("foul_rate", pitch.foul_rate),
        ] {
            check_probability("pitch", key, value)?;
        }
        check_distribution("contact_quality", "*", pitch.contact_quality.values().copied())?;
        check_distribution("direction_weights", "*", pitch.direction_weights.values().copied())?;

        let bb = &self.batted_ball;
        for quality in ContactQuality::ALL {
            let distance = require(&bb.distance_weights, "distance_weights", quality)?;
            check_distribution("distance_weights", &key(quality), distance.values().copied())?;

            let difficulty = require(&bb.difficulty_weights, "difficulty_weights", quality)?;
            check_distribution("difficulty_weights", &key(quality), difficulty.values().copied())?;

            let catch = require(&bb.catch_rates, "catch_rates", quality)?;
            for situation in Situation::ROLLED {
                require(catch, "catch_rates", situation)?;
            }
            for (situation, rate) in catch {
                check_probability("catch_rates", &format!("{quality:?}/{situation:?}"), *rate)?;
            }
        }
        for (key, value) in [
            ("error_rate", bb.error_rate),
            ("triple_rate", bb.triple_rate),
            ("extra_base_rate", bb.extra_base_rate),
            ("double_play_rate", bb.double_play_rate),
            ("sac_fly_rate", bb.sac_fly_rate),
        ] {
            check_probability("batted_ball", key, value)?;
        }

        let run = &self.running;
        for (base_key, rates) in [
            ("pickoff_attempt_rates", run.pickoff_attempt_rates),
            ("steal_attempt_rates", run.steal_attempt_rates),
        ] {
            for value in rates.values() {
                check_probability("running", base_key, value)?;
            }
        }
        for (key, value) in [
            ("pickoff_success_rate", run.pickoff_success_rate),
            ("pickoff_error_rate", run.pickoff_error_rate),
            ("steal_success_rate", run.steal_success_rate),
            ("steal_error_rate", run.steal_error_rate),
            ("speed_weight", run.speed_weight),
        ] {
            check_probability("running", key, value)?;
        }

        Ok(())
    }
}

fn key<K: Debug>(k: K) -> String {
    format!("{k:?}")
}

fn require<'a, K: Ord + Debug + Copy, V>(
    map: &'a BTreeMap<K, V>,
    table: &'static str,
    k: K,
) -> Result<&'a V, ConfigError> {
    map.get(&k).ok_or_else(|| ConfigError::MissingTable { table, key: key(k) })
}

fn check_probability(table: &'static str, key: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability { table, key: key.to_string(), value });
    }
    Ok(())
}

fn check_distribution(
    table: &'static str,
    key: &str,
    weights: impl Iterator<Item = f32>,
) -> Result<(), ConfigError> {
    let mut total = 0.0;
    for w in weights {
        if !w.is_finite() || w < 0.0 {
            return Err(ConfigError::InvalidProbability { table, key: key.to_string(), value: w });
        }
        total += w;
    }
    if total <= 0.0 {
        return Err(ConfigError::EmptyDistribution { table, key: key.to_string() });
    }
    Ok(())
}

// ========== Tests ==========
