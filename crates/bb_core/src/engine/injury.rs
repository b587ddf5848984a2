//! Injury checkpoints
//!
//! The engine calls an [`InjuryHook`] at two points of every at-bat: when the
//! at-bat starts and after the play resolves. Whatever the hook returns is
//! stored on the player in place. The default hook never injures anyone.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::models::{InjuryReport, InjurySeverity, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryCheckpoint {
    AtBatStart,
    PostResolution,
}

/// What the player was doing at the checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Batting,
    Pitching,
    Running,
}

pub trait InjuryHook: Send {
    fn check(
        &mut self,
        checkpoint: InjuryCheckpoint,
        action: ActionKind,
        player: &mut Player,
        rng: &mut dyn RngCore,
    ) -> Option<InjuryReport>;
}

/// No-op hook
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInjuries;

impl InjuryHook for NoInjuries {
    fn check(
        &mut self,
        _checkpoint: InjuryCheckpoint,
        _action: ActionKind,
        _player: &mut Player,
        _rng: &mut dyn RngCore,
    ) -> Option<InjuryReport> {
        None
    }
}

/// Flat per-checkpoint injury chance, scaled up as energy drains.
#[derive(Debug, Clone, Copy)]
pub struct FatigueInjuries {
    pub base_rate: f32,
}

impl Default for FatigueInjuries {
    fn default() -> Self {
        Self { base_rate: 0.0005 }
    }
}

impl InjuryHook for FatigueInjuries {
    fn check(
        &mut self,
        checkpoint: InjuryCheckpoint,
        action: ActionKind,
        player: &mut Player,
        rng: &mut dyn RngCore,
    ) -> Option<InjuryReport> {
        if player.is_injured() || checkpoint != InjuryCheckpoint::PostResolution {
            return None;
        }
        let p = self.base_rate * (2.0 - player.energy.clamp(0.0, 1.0));
        if rng.gen::<f32>() >= p {
            return None;
        }
        let severity = if rng.gen::<f32>() < 0.8 { InjurySeverity::Minor } else { InjurySeverity::Moderate };
        player.energy = (player.energy - 0.2).max(0.0);
        Some(InjuryReport { description: format!("{action:?} strain"), severity })
    }
}
