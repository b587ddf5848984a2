//! Simulation engine
//!
//! Bottom-up: config tables → pure probability helpers → resolvers
//! (pitch, batted ball, base running) → count / runner advancement →
//! game state machine → pitch-cycle driver → parallel batches.

pub mod advance;
pub mod base_running;
pub mod batch;
pub mod batted_ball;
pub mod config;
pub mod count;
pub mod game;
pub mod game_state;
pub mod injury;
pub mod pitch;
pub mod probability;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use base_running::{BaseRunningOutcome, BaseRunningResolver, PickoffResult, RunningEvent, StealResult};
pub use batch::{seeded_plans, simulate_batch, simulate_game, BatchSummary, GameOutcome};
pub use batted_ball::{BattedBallResolver, FieldingAssignment, PlayContext};
pub use config::BaselineConfig;
pub use count::{process_pitch, AtBatVerdict, CountUpdate};
pub use game::{GameEngine, GamePlan};
pub use game_state::{Count, CycleFlags, GamePhase, GameState, Transition};
pub use injury::{ActionKind, FatigueInjuries, InjuryCheckpoint, InjuryHook, NoInjuries};
pub use pitch::{BattedBall, PitchOutcome, PitchResolver, PitchResult, PitchZone, StrikeKind};
