//! Test Fixtures Module
//!
//! Centralized test helpers for the resolver and engine tests.
//!
//! ## Usage
//! ```rust
//! #[cfg(test)]
//! use crate::engine::test_fixtures::*;
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::config::BaselineConfig;
use super::game::GamePlan;
use crate::models::{PitchingRatings, Player, PlayerId, Position, Rules, Team};

// =============================================================================
// Team Creation Helpers
// =============================================================================

/// Nine-man team where every rating is league average (50).
///
/// Player ids are `id_base + 1 ..= id_base + 9`; the batting order follows
/// the fielding positions P, C, 1B, 2B, 3B, SS, LF, CF, RF.
pub fn create_test_team(id: &str, id_base: u32) -> Team {
    let mut players = Vec::with_capacity(9);
    let mut defense = BTreeMap::new();

    for (i, &pos) in Position::FIELDING.iter().enumerate() {
        let pid = id_base + i as u32 + 1;
        let mut player = Player::new(pid, format!("{} Player {}", id, i + 1), pos);
        if pos == Position::Pitcher {
            player = player.with_pitching(PitchingRatings::default());
        } else {
            defense.insert(pos, PlayerId(pid));
        }
        players.push(player);
    }

    let batting_order = players.iter().map(|p| p.id).collect();
    Team {
        id: id.to_string(),
        name: format!("{} Test Club", id),
        players,
        batting_order,
        order_index: 0,
        pitcher: PlayerId(id_base + 1),
        defense,
    }
}

/// (away, home)
pub fn fixture_teams() -> (Team, Team) {
    (create_test_team("AWY", 100), create_test_team("HOM", 200))
}

pub fn fixture_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

// =============================================================================
// Game Helpers
// =============================================================================

pub fn fixture_plan(seed: u64) -> GamePlan {
    fixture_plan_with(seed, BaselineConfig::default())
}

pub fn fixture_plan_with(seed: u64, config: BaselineConfig) -> GamePlan {
    let (away, home) = fixture_teams();
    GamePlan { home, away, rules: Rules::default(), config: Arc::new(config), seed }
}
