//! Steal / pickoff configuration

use serde::{Deserialize, Serialize};

use crate::models::Base;

/// One rate per base, keyed by the runner's current base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseRates {
    pub first: f32,
    pub second: f32,
    pub third: f32,
}

impl BaseRates {
    pub fn get(&self, base: Base) -> f32 {
        match base {
            Base::First => self.first,
            Base::Second => self.second,
            Base::Third => self.third,
        }
    }

    pub fn values(&self) -> [f32; 3] {
        [self.first, self.second, self.third]
    }

    pub fn zero() -> Self {
        Self { first: 0.0, second: 0.0, third: 0.0 }
    }
}

/// Catcher + pitcher ratings that oppose a base stealer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryWeights {
    pub throw_power: f32,
    pub throw_accuracy: f32,
    pub catch_sequence: f32,
    pub pitcher_sequencing: f32,
}

impl Default for BatteryWeights {
    fn default() -> Self {
        Self { throw_power: 0.35, throw_accuracy: 0.30, catch_sequence: 0.20, pitcher_sequencing: 0.15 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunningConfig {
    // === Pickoff ===
    /// Per-pitch attempt chance at an average pickoff rating
    pub pickoff_attempt_rates: BaseRates,
    pub pickoff_success_rate: f32,
    /// Throw/catch error chance on any pickoff throw
    pub pickoff_error_rate: f32,

    // === Steal ===
    /// Per-pitch attempt chance for a runner with steal_tendency 100
    pub steal_attempt_rates: BaseRates,
    pub steal_success_rate: f32,
    pub steal_error_rate: f32,
    pub battery_weights: BatteryWeights,

    /// Speed share of the runner composite (the rest is baserunning)
    pub speed_weight: f32,
}

impl Default for RunningConfig {
    fn default() -> Self {
        Self {
            pickoff_attempt_rates: BaseRates { first: 0.035, second: 0.012, third: 0.004 },
            pickoff_success_rate: 0.10,
            pickoff_error_rate: 0.015,

            steal_attempt_rates: BaseRates { first: 0.07, second: 0.02, third: 0.002 },
            steal_success_rate: 0.75,
            steal_error_rate: 0.025,
            battery_weights: BatteryWeights::default(),

            speed_weight: 0.6,
        }
    }
}

impl RunningConfig {
    /// No steals, no pickoffs.
    pub fn station_to_station() -> Self {
        Self {
            pickoff_attempt_rates: BaseRates::zero(),
            steal_attempt_rates: BaseRates::zero(),
            ..Self::default()
        }
    }
}
