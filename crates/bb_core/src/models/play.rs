//! Play Records
//!
//! Output side of the engine. Every resolved pitch cycle appends one
//! `PlayRecord` to the game's log; box-score and replay builders read the log
//! after the game (or stream it through a `PlayRecorder`).

use serde::{Deserialize, Serialize};

use super::field::{Base, Bases, Depth, Direction, HitType, OutKind};
use super::player::{PitchType, PlayerId, Position};
use super::result::Score;
use super::team::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    pub fn batting_side(self) -> TeamSide {
        match self {
            Half::Top => TeamSide::Away,
            Half::Bottom => TeamSide::Home,
        }
    }
}

/// What happened in one pitch cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayKind {
    // ========== Pitch, at-bat continues ==========
    Ball,
    CalledStrike,
    SwingingStrike,
    Foul,

    // ========== At-bat ending without a batted ball ==========
    Strikeout { swinging: bool },
    Walk,
    HitByPitch,

    // ========== Ball in play ==========
    Hit { hit: HitType, depth: Depth, direction: Direction },
    Out { out: OutKind, depth: Depth, direction: Direction },
    DoublePlay { depth: Depth, direction: Direction },
    SacrificeFly { depth: Depth, direction: Direction },
    ReachedOnError { depth: Depth, direction: Direction },

    // ========== Base running (pitch skipped) ==========
    StolenBase { from: Base },
    CaughtStealing { from: Base },
    StealError { from: Base },
    PickedOff { base: Base },
    PickoffError { base: Base },
    PickoffSafe { base: Base },
}

impl PlayKind {
    /// Runs on this play are charged to the batter as RBI.
    pub fn credits_rbi(&self) -> bool {
        matches!(
            self,
            PlayKind::Walk
                | PlayKind::HitByPitch
                | PlayKind::Hit { .. }
                | PlayKind::Out { .. }
                | PlayKind::SacrificeFly { .. }
        )
    }

    /// Counts as an official at-bat for the batter.
    pub fn is_at_bat(&self) -> bool {
        matches!(
            self,
            PlayKind::Strikeout { .. }
                | PlayKind::Hit { .. }
                | PlayKind::Out { .. }
                | PlayKind::DoublePlay { .. }
                | PlayKind::ReachedOnError { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credit {
    Putout,
    Assist,
    Error,
}

/// Fielding credit for one defender on a play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensiveAction {
    pub fielder: Position,
    pub credit: Credit,
}

impl DefensiveAction {
    pub fn putout(fielder: Position) -> Self {
        Self { fielder, credit: Credit::Putout }
    }

    pub fn assist(fielder: Position) -> Self {
        Self { fielder, credit: Credit::Assist }
    }

    pub fn error(fielder: Position) -> Self {
        Self { fielder, credit: Credit::Error }
    }
}

/// Transient result of a defensive/base-running resolution.
///
/// `bases` is the complete placement after the play; it replaces the
/// current occupancy wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct DefensiveOutcome {
    pub kind: PlayKind,
    pub bases: Bases,
    pub scored: Vec<PlayerId>,
    pub outs: u8,
    pub errors: u8,
    pub actions: Vec<DefensiveAction>,
}

impl DefensiveOutcome {
    pub fn new(kind: PlayKind, bases: Bases) -> Self {
        Self { kind, bases, scored: Vec::new(), outs: 0, errors: 0, actions: Vec::new() }
    }

    pub fn runs(&self) -> u8 {
        self.scored.len() as u8
    }
}

/// Immutable snapshot of one resolved pitch cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub seq: u32,
    pub inning: u8,
    pub half: Half,
    pub batter: PlayerId,
    pub pitcher: PlayerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<PitchType>,
    pub play: PlayKind,
    /// Count after the pitch (reset to 0-0 when the at-bat ends)
    pub balls: u8,
    pub strikes: u8,
    /// Outs after the play, before any half-inning flip
    pub outs: u8,
    pub bases: Bases,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub scored: Vec<PlayerId>,
    pub score: Score,
    #[serde(skip_serializing_if = "is_zero", default)]
    pub errors: u8,
}

fn is_zero(v: &u8) -> bool {
    *v == 0
}

/// External consumer of resolved plays (box score, replay, streaming).
pub trait PlayRecorder: Send {
    fn record(&mut self, play: &PlayRecord);
}

/// Append-only in-memory log; the engine always keeps one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayLog {
    plays: Vec<PlayRecord>,
}

impl PlayLog {
    pub fn push(&mut self, play: PlayRecord) {
        self.plays.push(play);
    }

    pub fn plays(&self) -> &[PlayRecord] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn into_plays(self) -> Vec<PlayRecord> {
        self.plays
    }
}

impl PlayRecorder for PlayLog {
    fn record(&mut self, play: &PlayRecord) {
        self.push(play.clone());
    }
}
