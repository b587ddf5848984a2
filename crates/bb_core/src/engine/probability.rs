//! Probability calculation utilities for the resolvers
//!
//! All functions are pure apart from the RNG they are handed. Ratings are
//! 0-100 and normalized to 0.0-1.0 before blending.

use rand::Rng;

use super::config::BatteryWeights;
use crate::models::Player;

// ============================================================================
// Ratings
// ============================================================================

/// 0-100 rating → 0.0-1.0
#[inline]
pub fn normalized(rating: u8) -> f32 {
    rating.min(100) as f32 / 100.0
}

/// Shift `base` by how far a normalized rating sits from average.
/// An average (0.5) rating returns `base` unchanged.
#[inline]
pub fn blend(base: f32, rating_n: f32, weight: f32) -> f32 {
    (base + (rating_n - 0.5) * weight).clamp(0.0, 1.0)
}

/// Multiplicative version of [`blend`]: `base * (1 + (rating - 0.5) * weight)`.
#[inline]
pub fn scale(base: f32, rating_n: f32, weight: f32) -> f32 {
    (base * (1.0 + (rating_n - 0.5) * weight)).clamp(0.0, 1.0)
}

/// Speed/baserunning composite for a runner
pub fn runner_composite(runner: &Player, speed_weight: f32) -> f32 {
    let speed = normalized(runner.batting.speed);
    let baserunning = normalized(runner.batting.baserunning);
    speed * speed_weight + baserunning * (1.0 - speed_weight)
}

/// Catcher arm/transfer + pitcher sequencing composite that opposes a stealer.
/// Weights are normalized here; they need not sum to 1 in config.
pub fn battery_composite(catcher: &Player, pitcher: &Player, weights: &BatteryWeights) -> f32 {
    let sequencing = pitcher.pitching.as_ref().map(|p| p.sequencing).unwrap_or(50);
    let parts = [
        (normalized(catcher.fielding.throw_power), weights.throw_power),
        (normalized(catcher.fielding.throw_accuracy), weights.throw_accuracy),
        (normalized(catcher.fielding.catch_sequence), weights.catch_sequence),
        (normalized(sequencing), weights.pitcher_sequencing),
    ];
    let total: f32 = parts.iter().map(|(_, w)| w.max(0.0)).sum();
    if total <= 0.0 {
        return 0.5;
    }
    parts.iter().map(|(v, w)| v * w.max(0.0)).sum::<f32>() / total
}

/// Error chance for a fielder: better ratings shrink it, worse grow it.
#[inline]
pub fn error_chance(base_rate: f32, fielder_rating_n: f32) -> f32 {
    (base_rate * (1.5 - fielder_rating_n)).clamp(0.0, 1.0)
}

// ============================================================================
// Sampling
// ============================================================================

#[inline]
pub fn roll<R: Rng + ?Sized>(rng: &mut R, p: f32) -> bool {
    p > 0.0 && rng.gen::<f32>() < p
}

/// Categorical draw over `(item, weight)` pairs.
///
/// Weights need not sum to 1; they are normalized here. Non-positive
/// weights are skipped. Returns `None` when nothing has positive weight.
pub fn weighted_pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[(T, f32)]) -> Option<T> {
    let total: f32 = items.iter().filter(|(_, w)| *w > 0.0).map(|(_, w)| *w).sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let target = rng.gen::<f32>();
    let mut cumulative = 0.0;
    let mut last = None;
    for (item, weight) in items.iter().filter(|(_, w)| *w > 0.0) {
        cumulative += weight / total;
        last = Some(*item);
        if target < cumulative {
            return last;
        }
    }
    // Float rounding can leave cumulative a hair under 1.0
    last
}
