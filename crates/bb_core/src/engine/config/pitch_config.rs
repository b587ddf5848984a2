//! Plate discipline / contact configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ContactQuality, Direction};

/// Zone, swing and contact rates plus the rating blend weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    // === Pitch selection ===
    /// Fixed descending weights over the arsenal, best pitch first.
    /// Pitches past the end keep halving the last weight; normalized when
    /// sampling.
    pub arsenal_weights: Vec<f32>,

    // === Location ===
    /// League-average share of pitches in the zone (기본: 0.50)
    pub zone_rate: f32,
    /// Control → zone rate blend weight
    pub control_weight: f32,
    /// Share of out-of-zone pitches that hit the batter at average accuracy
    pub hit_by_pitch_rate: f32,
    /// Accuracy → HBP suppression weight
    pub accuracy_weight: f32,
    /// Chance a taken ball is framed into a called strike by an average catcher
    pub framing_rate: f32,

    // === Fatigue ===
    /// Energy spent per pitch at average stamina
    pub energy_per_pitch: f32,
    /// Effective control never drops below this share of the rating
    pub fatigue_floor: f32,

    // === Swing decision ===
    pub zone_swing_rate: f32,
    pub chase_rate: f32,
    /// Eye → in-zone swing blend weight
    pub eye_weight: f32,
    /// Discipline → chase suppression blend weight
    pub discipline_weight: f32,

    // === Contact ===
    pub zone_contact_rate: f32,
    pub chase_contact_rate: f32,
    pub contact_weight: f32,
    pub stuff_weight: f32,
    /// Share of contact that goes foul
    pub foul_rate: f32,

    // === Batted ball ===
    /// Contact-quality odds (need not sum to 1)
    pub contact_quality: BTreeMap<ContactQuality, f32>,
    /// Power → hard-contact blend weight
    pub power_weight: f32,
    /// Spray weights for a right-handed batter; mirrored for left-handed
    pub direction_weights: BTreeMap<Direction, f32>,
}

impl Default for PitchConfig {
    fn default() -> Self {
        let contact_quality = BTreeMap::from([
            (ContactQuality::Barrel, 0.07),
            (ContactQuality::Solid, 0.15),
            (ContactQuality::Flare, 0.20),
            (ContactQuality::Burner, 0.12),
            (ContactQuality::Under, 0.20),
            (ContactQuality::Topped, 0.18),
            (ContactQuality::Weak, 0.08),
        ]);
        let direction_weights = BTreeMap::from([
            (Direction::Left, 0.26),
            (Direction::LeftCenter, 0.21),
            (Direction::Center, 0.20),
            (Direction::RightCenter, 0.17),
            (Direction::Right, 0.16),
        ]);

        Self {
            arsenal_weights: vec![0.40, 0.25, 0.15, 0.12, 0.08],

            zone_rate: 0.50,
            control_weight: 0.30,
            hit_by_pitch_rate: 0.02,
            accuracy_weight: 1.0,
            framing_rate: 0.08,

            energy_per_pitch: 0.007,
            fatigue_floor: 0.7,

            zone_swing_rate: 0.66,
            chase_rate: 0.30,
            eye_weight: 0.20,
            discipline_weight: 0.40,

            zone_contact_rate: 0.85,
            chase_contact_rate: 0.60,
            contact_weight: 0.25,
            stuff_weight: 0.20,
            foul_rate: 0.45,

            contact_quality,
            power_weight: 0.8,
            direction_weights,
        }
    }
}
