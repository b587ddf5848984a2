//! Pitch Resolution
//!
//! One pitch from the mound to the outcome at the plate:
//! pitch type → location → (HBP) → swing decision → contact → foul/fair →
//! contact quality + spray direction.
//!
//! The resolver never touches game state. Fatigue is read from the pitcher's
//! `energy`; the caller spends the energy afterwards via [`pitch_cost`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::PitchConfig;
use super::probability::{blend, normalized, roll, scale, weighted_pick};
use crate::models::{ContactQuality, Direction, Hand, PitchType, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchZone {
    InZone,
    OutOfZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeKind {
    Swinging,
    Called,
    Foul,
}

/// Fair ball off the bat, before the defense gets involved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattedBall {
    pub quality: ContactQuality,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchResult {
    Ball,
    Strike(StrikeKind),
    HitByPitch,
    InPlay(BattedBall),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchOutcome {
    pub pitch: PitchType,
    pub zone: PitchZone,
    pub result: PitchResult,
}

/// Energy a pitcher spends on one pitch. Higher stamina spends less.
pub fn pitch_cost(config: &PitchConfig, pitcher: &Player) -> f32 {
    let stamina = pitcher.pitching.as_ref().map(|p| p.stamina).unwrap_or(50);
    config.energy_per_pitch * (1.5 - normalized(stamina))
}

pub struct PitchResolver<'a> {
    config: &'a PitchConfig,
}

impl<'a> PitchResolver<'a> {
    pub fn new(config: &'a PitchConfig) -> Self {
        Self { config }
    }

    pub fn resolve<R: Rng + ?Sized>(
        &self,
        batter: &Player,
        pitcher: &Player,
        catcher: &Player,
        rng: &mut R,
    ) -> PitchOutcome {
        let cfg = self.config;
        let ratings = pitcher.pitching.as_ref();
        let control = ratings.map(|p| p.control).unwrap_or(50);
        let accuracy = ratings.map(|p| p.accuracy).unwrap_or(50);
        let stuff_n = normalized(ratings.map(|p| p.stuff).unwrap_or(50));

        let pitch = self.select_pitch(ratings.map(|p| p.arsenal.as_slice()).unwrap_or(&[]), rng);

        // 1. Location
        let control_n = normalized(control) * self.fatigue_factor(pitcher);
        let in_zone = roll(rng, blend(cfg.zone_rate, control_n, cfg.control_weight));
        let zone = if in_zone { PitchZone::InZone } else { PitchZone::OutOfZone };

        if !in_zone {
            let hbp = scale(cfg.hit_by_pitch_rate, 1.0 - normalized(accuracy), cfg.accuracy_weight);
            if roll(rng, hbp) {
                return PitchOutcome { pitch, zone, result: PitchResult::HitByPitch };
            }
        }

        // 2. Swing decision
        let swing_p = if in_zone {
            blend(cfg.zone_swing_rate, normalized(batter.batting.eye), cfg.eye_weight)
        } else {
            blend(cfg.chase_rate, 1.0 - normalized(batter.batting.discipline), cfg.discipline_weight)
        };

        if !roll(rng, swing_p) {
            let result = if in_zone {
                PitchResult::Strike(StrikeKind::Called)
            } else if roll(rng, scale(cfg.framing_rate, normalized(catcher.fielding.fielding), 1.0)) {
                PitchResult::Strike(StrikeKind::Called)
            } else {
                PitchResult::Ball
            };
            return PitchOutcome { pitch, zone, result };
        }

        // 3. Contact
        let base_contact = if in_zone { cfg.zone_contact_rate } else { cfg.chase_contact_rate };
        let contact_p = blend(
            blend(base_contact, normalized(batter.batting.contact), cfg.contact_weight),
            1.0 - stuff_n,
            cfg.stuff_weight,
        );
        if !roll(rng, contact_p) {
            return PitchOutcome { pitch, zone, result: PitchResult::Strike(StrikeKind::Swinging) };
        }

        if roll(rng, cfg.foul_rate) {
            return PitchOutcome { pitch, zone, result: PitchResult::Strike(StrikeKind::Foul) };
        }

        // 4. Ball in play
        let quality = self.contact_quality(batter, stuff_n, rng);
        let direction = self.spray_direction(batter, pitcher.throws, rng);
        PitchOutcome { pitch, zone, result: PitchResult::InPlay(BattedBall { quality, direction }) }
    }

    /// Pick from the arsenal with the fixed descending weights. An empty
    /// arsenal throws fastballs.
    pub fn select_pitch<R: Rng + ?Sized>(&self, arsenal: &[PitchType], rng: &mut R) -> PitchType {
        let items: Vec<(PitchType, f32)> = arsenal
            .iter()
            .enumerate()
            .map(|(slot, pitch)| (*pitch, self.arsenal_weight(slot)))
            .collect();
        weighted_pick(rng, &items)
            .or_else(|| arsenal.first().copied())
            .unwrap_or(PitchType::Fastball)
    }

    /// Weight of the `slot`-th listed pitch. Slots past the configured list
    /// halve the last weight once per extra pitch.
    pub fn arsenal_weight(&self, slot: usize) -> f32 {
        let weights = &self.config.arsenal_weights;
        match (weights.get(slot), weights.last()) {
            (Some(w), _) => *w,
            (None, Some(last)) => last * 0.5f32.powi((slot + 1 - weights.len()) as i32),
            (None, None) => 1.0,
        }
    }

    /// Control multiplier from remaining energy, never below the floor.
    pub fn fatigue_factor(&self, pitcher: &Player) -> f32 {
        let floor = self.config.fatigue_floor;
        floor + (1.0 - floor) * pitcher.energy.clamp(0.0, 1.0)
    }

    /// Power pushes toward barrel/solid, stuff pushes back; contact skill
    /// trims the topped/weak share.
    pub fn contact_quality<R: Rng + ?Sized>(
        &self,
        batter: &Player,
        stuff_n: f32,
        rng: &mut R,
    ) -> ContactQuality {
        let cfg = self.config;
        let power_mod = 1.0 + (normalized(batter.batting.power) - 0.5) * cfg.power_weight;
        let stuff_mod = 1.0 - (stuff_n - 0.5) * cfg.stuff_weight;
        let contact_mod = 1.0 - (normalized(batter.batting.contact) - 0.5) * cfg.contact_weight;

        let items: Vec<(ContactQuality, f32)> = cfg
            .contact_quality
            .iter()
            .map(|(quality, weight)| {
                let w = match quality {
                    ContactQuality::Barrel | ContactQuality::Solid => weight * power_mod * stuff_mod,
                    ContactQuality::Topped | ContactQuality::Weak => weight * contact_mod,
                    _ => *weight,
                };
                (*quality, w)
            })
            .collect();
        weighted_pick(rng, &items).unwrap_or(ContactQuality::Weak)
    }

    /// Spray weights are written for a right-handed batter and mirrored for
    /// a left-handed one.
    pub fn spray_direction<R: Rng + ?Sized>(
        &self,
        batter: &Player,
        pitcher_throws: Hand,
        rng: &mut R,
    ) -> Direction {
        let lefty = batter.batting_side(pitcher_throws) == Hand::Left;
        let items: Vec<(Direction, f32)> = self
            .config
            .direction_weights
            .iter()
            .map(|(d, w)| (if lefty { d.mirrored() } else { *d }, *w))
            .collect();
        weighted_pick(rng, &items).unwrap_or(Direction::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PitchingRatings, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;

    fn trio() -> (Player, Player, Player) {
        let batter = Player::new(1, "Batter", Position::CenterField);
        let pitcher =
            Player::new(2, "Pitcher", Position::Pitcher).with_pitching(PitchingRatings::default());
        let catcher = Player::new(3, "Catcher", Position::Catcher);
        (batter, pitcher, catcher)
    }

    #[test]
    fn test_pitch_results_are_well_mixed() {
        let cfg = PitchConfig::default();
        let resolver = PitchResolver::new(&cfg);
        let (batter, pitcher, catcher) = trio();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut balls = 0;
        let mut strikes = 0;
        let mut in_play = 0;
        for _ in 0..5000 {
            match resolver.resolve(&batter, &pitcher, &catcher, &mut rng).result {
                PitchResult::Ball => balls += 1,
                PitchResult::Strike(_) => strikes += 1,
                PitchResult::InPlay(_) => in_play += 1,
                PitchResult::HitByPitch => {}
            }
        }
        assert!(balls > 1000, "balls: {}", balls);
        assert!(strikes > 1500, "strikes: {}", strikes);
        assert!(in_play > 500, "in play: {}", in_play);
    }

    #[test]
    fn test_select_pitch_prefers_best_pitch() {
        let cfg = PitchConfig::default();
        let resolver = PitchResolver::new(&cfg);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let arsenal = [PitchType::Sinker, PitchType::Curveball];

        let sinkers =
            (0..2000).filter(|_| resolver.select_pitch(&arsenal, &mut rng) == PitchType::Sinker).count();
        // 0.40 / (0.40 + 0.25)
        assert!((1100..1350).contains(&sinkers), "sinkers: {}", sinkers);
        assert_eq!(resolver.select_pitch(&[], &mut rng), PitchType::Fastball);
    }

    #[test]
    fn test_long_arsenal_throws_every_pitch() {
        let cfg = PitchConfig::default();
        let resolver = PitchResolver::new(&cfg);
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let arsenal = [
            PitchType::Fastball,
            PitchType::Sinker,
            PitchType::Cutter,
            PitchType::Slider,
            PitchType::Curveball,
            PitchType::Changeup,
            PitchType::Splitter,
        ];

        assert!((resolver.arsenal_weight(5) - 0.04).abs() < 1e-6);
        assert!((resolver.arsenal_weight(6) - 0.02).abs() < 1e-6);

        let mut thrown = [0usize; 7];
        for _ in 0..20000 {
            let pitch = resolver.select_pitch(&arsenal, &mut rng);
            if let Some(slot) = arsenal.iter().position(|p| *p == pitch) {
                thrown[slot] += 1;
            }
        }
        for (pitch, count) in arsenal.iter().zip(thrown) {
            assert!(count > 0, "{pitch:?} never thrown");
        }
        // Changeup (slot 5) outweighs Splitter (slot 6)
        assert!(thrown[5] > thrown[6]);
    }

    #[test]
    fn test_fatigue_floor() {
        let cfg = PitchConfig::default();
        let resolver = PitchResolver::new(&cfg);
        let (_, mut pitcher, _) = trio();
        assert!((resolver.fatigue_factor(&pitcher) - 1.0).abs() < 1e-6);
        pitcher.energy = 0.0;
        assert!((resolver.fatigue_factor(&pitcher) - cfg.fatigue_floor).abs() < 1e-6);
    }

    #[test]
    fn test_left_handed_spray_is_mirrored() {
        let mut cfg = PitchConfig::default();
        cfg.direction_weights = BTreeMap::from([(Direction::Left, 1.0)]);
        let resolver = PitchResolver::new(&cfg);
        let (mut batter, _, _) = trio();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        assert_eq!(resolver.spray_direction(&batter, Hand::Right, &mut rng), Direction::Left);
        batter.bats = Hand::Left;
        assert_eq!(resolver.spray_direction(&batter, Hand::Right, &mut rng), Direction::Right);
        batter.bats = Hand::Switch;
        // Switch hitter bats left against a right-hander
        assert_eq!(resolver.spray_direction(&batter, Hand::Right, &mut rng), Direction::Right);
        assert_eq!(resolver.spray_direction(&batter, Hand::Left, &mut rng), Direction::Left);
    }

    #[test]
    fn test_power_raises_hard_contact() {
        let cfg = PitchConfig::default();
        let resolver = PitchResolver::new(&cfg);
        let (mut slugger, _, _) = trio();
        let (mut slap, _, _) = trio();
        slugger.batting.power = 100;
        slap.batting.power = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let hard = |p: &Player, rng: &mut ChaCha8Rng| {
            (0..4000).filter(|_| resolver.contact_quality(p, 0.5, rng).is_hard()).count()
        };
        assert!(hard(&slugger, &mut rng) > hard(&slap, &mut rng));
    }

    #[test]
    fn test_pitch_cost_scales_with_stamina() {
        let cfg = PitchConfig::default();
        let (_, mut pitcher, _) = trio();
        let average = pitch_cost(&cfg, &pitcher);
        if let Some(p) = pitcher.pitching.as_mut() {
            p.stamina = 100;
        }
        assert!(pitch_cost(&cfg, &pitcher) < average);
    }
}
