//! Batted ball / defense configuration
//!
//! All tables are keyed by enum, so YAML/JSON files use the snake_case names
//! (`barrel`, `deep_of`, `routine_if`, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ContactQuality, Depth, Difficulty, Direction, Position, Situation};

/// Which fielder(s) own a landing zone. `direction: None` matches any
/// direction; an exact direction entry wins over a wildcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentEntry {
    pub depth: Depth,
    #[serde(default)]
    pub direction: Option<Direction>,
    pub fielders: Vec<Position>,
}

/// Landing zone that always drops in. Empty `categories` = every category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeHit {
    pub depth: Depth,
    pub direction: Direction,
    #[serde(default)]
    pub categories: Vec<ContactQuality>,
}

impl FreeHit {
    pub fn matches(&self, quality: ContactQuality, depth: Depth, direction: Direction) -> bool {
        self.depth == depth
            && self.direction == direction
            && (self.categories.is_empty() || self.categories.contains(&quality))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattedBallConfig {
    /// Depth-bucket weights per contact category (normalized at draw time)
    pub distance_weights: BTreeMap<ContactQuality, BTreeMap<Depth, f32>>,
    /// Base catch probability per category × situation
    pub catch_rates: BTreeMap<ContactQuality, BTreeMap<Situation, f32>>,
    /// Difficulty-bucket weights per category
    pub difficulty_weights: BTreeMap<ContactQuality, BTreeMap<Difficulty, f32>>,
    /// Catch probability multiplier per difficulty
    pub difficulty_modifiers: BTreeMap<Difficulty, f32>,
    /// Fielder range → difficulty shift
    pub range_weight: f32,
    /// Fielder rating → catch probability blend
    pub fielder_weight: f32,
    pub alignment: Vec<AlignmentEntry>,
    pub free_hits: Vec<FreeHit>,

    /// Error chance on a made play for an average fielder
    pub error_rate: f32,
    /// Deep-gap hit that becomes a triple for an average runner
    pub triple_rate: f32,
    /// Runner takes an extra base (1st→3rd on a single, 1st→home on a double)
    pub extra_base_rate: f32,
    pub double_play_rate: f32,
    pub sac_fly_rate: f32,
}

fn depth_row(values: [f32; 9]) -> BTreeMap<Depth, f32> {
    Depth::ALL.iter().copied().zip(values).filter(|(_, w)| *w > 0.0).collect()
}

fn situation_row(values: [f32; 8]) -> BTreeMap<Situation, f32> {
    Situation::ROLLED.iter().copied().zip(values).collect()
}

fn difficulty_row(values: [f32; 4]) -> BTreeMap<Difficulty, f32> {
    Difficulty::ROLLED.iter().copied().zip(values).collect()
}

fn default_alignment() -> Vec<AlignmentEntry> {
    use Direction::*;
    use Position::*;

    let entry = |depth: Depth, direction: Option<Direction>, fielders: &[Position]| {
        AlignmentEntry { depth, direction, fielders: fielders.to_vec() }
    };

    let mut alignment = Vec::new();
    for depth in [Depth::DeepOf, Depth::MiddleOf] {
        alignment.push(entry(depth, Some(Left), &[LeftField]));
        alignment.push(entry(depth, Some(LeftCenter), &[LeftField, CenterField]));
        alignment.push(entry(depth, Some(Center), &[CenterField]));
        alignment.push(entry(depth, Some(RightCenter), &[CenterField, RightField]));
        alignment.push(entry(depth, Some(Right), &[RightField]));
    }

    alignment.push(entry(Depth::ShallowOf, Some(Left), &[LeftField, ThirdBase]));
    alignment.push(entry(Depth::ShallowOf, Some(LeftCenter), &[Shortstop, LeftField]));
    alignment.push(entry(Depth::ShallowOf, Some(Center), &[CenterField, SecondBase]));
    alignment.push(entry(Depth::ShallowOf, Some(RightCenter), &[SecondBase, RightField]));
    alignment.push(entry(Depth::ShallowOf, Some(Right), &[RightField, FirstBase]));

    for depth in [Depth::DeepIf, Depth::MiddleIf] {
        alignment.push(entry(depth, Some(Left), &[ThirdBase]));
        alignment.push(entry(depth, Some(LeftCenter), &[Shortstop]));
        alignment.push(entry(depth, Some(Center), &[Shortstop, SecondBase]));
        alignment.push(entry(depth, Some(RightCenter), &[SecondBase]));
        alignment.push(entry(depth, Some(Right), &[FirstBase]));
    }

    alignment.push(entry(Depth::ShallowIf, Some(Left), &[ThirdBase, Catcher]));
    alignment.push(entry(Depth::ShallowIf, Some(LeftCenter), &[Pitcher, ThirdBase]));
    alignment.push(entry(Depth::ShallowIf, Some(Center), &[Pitcher]));
    alignment.push(entry(Depth::ShallowIf, Some(RightCenter), &[Pitcher, FirstBase]));
    alignment.push(entry(Depth::ShallowIf, Some(Right), &[FirstBase, Catcher]));

    alignment.push(entry(Depth::Mound, None, &[Pitcher]));
    alignment.push(entry(Depth::Catcher, None, &[Catcher]));
    alignment
}

impl Default for BattedBallConfig {
    fn default() -> Self {
        use ContactQuality::*;

        //                                  HR    DeepOF MidOF ShalOF DeepIF MidIF ShalIF Mound Catch
        let distance_weights = BTreeMap::from([
            (Barrel, depth_row([0.35, 0.40, 0.20, 0.05, 0.00, 0.00, 0.00, 0.00, 0.00])),
            (Solid, depth_row([0.04, 0.30, 0.35, 0.15, 0.10, 0.06, 0.00, 0.00, 0.00])),
            (Flare, depth_row([0.00, 0.02, 0.18, 0.55, 0.15, 0.10, 0.00, 0.00, 0.00])),
            (Burner, depth_row([0.00, 0.00, 0.05, 0.15, 0.40, 0.35, 0.05, 0.00, 0.00])),
            (Under, depth_row([0.01, 0.15, 0.30, 0.15, 0.10, 0.14, 0.05, 0.02, 0.08])),
            (Topped, depth_row([0.00, 0.00, 0.00, 0.02, 0.25, 0.45, 0.18, 0.07, 0.03])),
            (Weak, depth_row([0.00, 0.00, 0.00, 0.05, 0.05, 0.30, 0.35, 0.15, 0.10])),
        ]);

        //                                 DGap  DeepOF MGap  MidOF ShalOF DeepIF Rout  ShalIF
        let catch_rates = BTreeMap::from([
            (Barrel, situation_row([0.30, 0.45, 0.45, 0.60, 0.40, 0.25, 0.45, 0.60])),
            (Solid, situation_row([0.45, 0.60, 0.60, 0.75, 0.45, 0.40, 0.65, 0.70])),
            (Flare, situation_row([0.60, 0.70, 0.55, 0.65, 0.35, 0.70, 0.85, 0.85])),
            (Burner, situation_row([0.50, 0.60, 0.55, 0.70, 0.40, 0.45, 0.70, 0.75])),
            (Under, situation_row([0.85, 0.92, 0.88, 0.95, 0.75, 0.95, 0.98, 0.97])),
            (Topped, situation_row([0.70, 0.80, 0.75, 0.85, 0.60, 0.60, 0.85, 0.55])),
            (Weak, situation_row([0.80, 0.85, 0.80, 0.90, 0.65, 0.80, 0.92, 0.60])),
        ]);

        //                                      At    One   Two   Three
        let difficulty_weights = BTreeMap::from([
            (Barrel, difficulty_row([0.15, 0.30, 0.30, 0.25])),
            (Solid, difficulty_row([0.20, 0.35, 0.30, 0.15])),
            (Flare, difficulty_row([0.10, 0.25, 0.35, 0.30])),
            (Burner, difficulty_row([0.25, 0.35, 0.25, 0.15])),
            (Under, difficulty_row([0.45, 0.35, 0.15, 0.05])),
            (Topped, difficulty_row([0.35, 0.40, 0.20, 0.05])),
            (Weak, difficulty_row([0.50, 0.35, 0.12, 0.03])),
        ]);

        let difficulty_modifiers = BTreeMap::from([
            (Difficulty::DirectlyAt, 1.15),
            (Difficulty::OneStep, 1.0),
            (Difficulty::TwoStep, 0.8),
            (Difficulty::ThreeStep, 0.55),
            (Difficulty::AutomaticHit, 0.0),
        ]);

        let free_hits = vec![
            FreeHit {
                depth: Depth::ShallowOf,
                direction: Direction::LeftCenter,
                categories: vec![Flare],
            },
            FreeHit {
                depth: Depth::ShallowOf,
                direction: Direction::RightCenter,
                categories: vec![Flare],
            },
        ];

        Self {
            distance_weights,
            catch_rates,
            difficulty_weights,
            difficulty_modifiers,
            range_weight: 0.8,
            fielder_weight: 0.3,
            alignment: default_alignment(),
            free_hits,
            error_rate: 0.018,
            triple_rate: 0.22,
            extra_base_rate: 0.35,
            double_play_rate: 0.50,
            sac_fly_rate: 0.75,
        }
    }
}
