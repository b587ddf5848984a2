//! # bb_core - Deterministic Pitch-by-Pitch Baseball Simulation Engine
//!
//! Two nine-man teams in, a finished game and its play log out.
//!
//! ## Features
//! - 100% deterministic simulation (same plan + seed = same play log)
//! - Probability tables in one validated, shareable `BaselineConfig`
//! - YAML / JSON loading for config, rules and rosters
//! - Parallel batches where one failing game never sinks the rest
//!
//! ```rust
//! use bb_core::{data::demo_matchup, GameEngine, GamePlan};
//!
//! let (away, home) = demo_matchup();
//! let mut engine = GameEngine::new(GamePlan::new(home, away, 42)).unwrap();
//! let result = engine.run_to_completion().unwrap();
//! assert!(result.innings >= 9);
//! ```

// Game engine APIs often require many parameters for state, rosters, etc.
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Complex types are sometimes necessary for generic APIs
#![allow(clippy::type_complexity)]

pub mod data;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::{
    simulate_batch, simulate_game, BaselineConfig, GameEngine, GameOutcome, GamePlan, Transition,
};
pub use error::{ConfigError, Result, SimError};
pub use models::{GameResult, PlayRecord, Rules, Team, TeamSide};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
