//! Batch simulation
//!
//! Games share nothing mutable: each plan owns its teams and its seed, and
//! the baseline tables sit behind an `Arc`. A failing game is reported in
//! its own slot and never aborts the rest of the batch.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::config::BaselineConfig;
use super::game::{GameEngine, GamePlan};
use crate::error::Result;
use crate::models::{GameResult, PlayRecord, Rules, Team};

/// Per-game slot in a batch report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GameOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Run one game start to finish and hand back its play log.
pub fn simulate_game(plan: GamePlan) -> Result<(GameResult, Vec<PlayRecord>)> {
    let mut engine = GameEngine::new(plan)?;
    let result = engine.run_to_completion()?;
    Ok((result, engine.into_plays()))
}

/// Simulate many independent games in parallel. Output order matches input.
pub fn simulate_batch(plans: Vec<GamePlan>) -> Vec<GameOutcome> {
    plans
        .into_par_iter()
        .map(|plan| {
            let seed = plan.seed;
            match GameEngine::new(plan).and_then(|mut engine| engine.run_to_completion()) {
                Ok(result) => GameOutcome { seed, result: Some(result), error: None },
                Err(err) => {
                    warn!(seed, error = %err, "game failed");
                    GameOutcome { seed, result: None, error: Some(err.to_string()) }
                }
            }
        })
        .collect()
}

/// `count` plans for the same matchup with seeds `base_seed..base_seed + count`.
pub fn seeded_plans(
    home: &Team,
    away: &Team,
    rules: &Rules,
    config: Arc<BaselineConfig>,
    base_seed: u64,
    count: usize,
) -> Vec<GamePlan> {
    (0..count as u64)
        .map(|i| GamePlan {
            home: home.clone(),
            away: away.clone(),
            rules: rules.clone(),
            config: Arc::clone(&config),
            seed: base_seed.wrapping_add(i),
        })
        .collect()
}

/// Aggregate view of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: usize,
    pub failed: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    pub avg_home_runs: f32,
    pub avg_away_runs: f32,
    pub extra_inning_games: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[GameOutcome], regulation_innings: u8) -> Self {
        let mut summary = Self { games: outcomes.len(), ..Self::default() };
        let mut home_total = 0u32;
        let mut away_total = 0u32;
        let mut finished = 0u32;

        for result in outcomes.iter().filter_map(|o| o.result.as_ref()) {
            finished += 1;
            home_total += result.home.score as u32;
            away_total += result.away.score as u32;
            if result.winner == result.home.id {
                summary.home_wins += 1;
            } else {
                summary.away_wins += 1;
            }
            if result.innings > regulation_innings {
                summary.extra_inning_games += 1;
            }
        }

        summary.failed = outcomes.len() - finished as usize;
        if finished > 0 {
            summary.avg_home_runs = home_total as f32 / finished as f32;
            summary.avg_away_runs = away_total as f32 / finished as f32;
        }
        summary
    }
}
