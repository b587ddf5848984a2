//! Game State Machine
//!
//! Owns the per-game mutable state (inning, half, outs, count, bases, score)
//! and the explicit phase machine:
//!
//! ```text
//! PreAtBat ──(no steal/pickoff)──► AwaitingPitch ──(ball/strike/foul)──┐
//!    ▲                                   │  ▲─────────────────────────────┘
//!    │                    (K / BB / HBP / in play)
//!    │                                   ▼
//!    └──────(outs < limit)──────── AtBatResolved
//!                                        │ (outs >= limit)
//!                                        ▼
//!                                 InningBoundary ──► PreAtBat | GameOver
//! ```
//!
//! Outs from a play are added before the boundary check and never clipped,
//! so `outs` can read past the half-inning limit until the flip.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Bases, DefensiveOutcome, Half, HitType, Rules, Score, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    PreAtBat,
    AwaitingPitch,
    AtBatResolved,
    InningBoundary,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    pub fn new(balls: u8, strikes: u8) -> Self {
        Self { balls, strikes }
    }
}

/// Transient per-cycle flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleFlags {
    pub walk: bool,
    pub strikeout: bool,
    pub hit: Option<HitType>,
    pub hbp: bool,
    pub steal_attempt: bool,
    pub pickoff_attempt: bool,
    pub ab_over: bool,
}

/// Result of evaluating transitions after a play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same half continues (next pitch or next batter)
    Continue,
    /// Half-inning flipped, game goes on
    HalfInningOver,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    rules: Rules,
    pub inning: u8,
    pub half: Half,
    pub outs: u8,
    pub count: Count,
    pub bases: Bases,
    pub score: Score,
    pub flags: CycleFlags,
    phase: GamePhase,
    /// Inning in which the last completed half was played
    final_inning: u8,
}

impl GameState {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            inning: 1,
            half: Half::Top,
            outs: 0,
            count: Count::default(),
            bases: Bases::empty(),
            score: Score::default(),
            flags: CycleFlags::default(),
            phase: GamePhase::PreAtBat,
            final_inning: 1,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn batting_side(&self) -> TeamSide {
        self.half.batting_side()
    }

    pub fn pitching_side(&self) -> TeamSide {
        self.batting_side().opponent()
    }

    pub fn final_inning(&self) -> u8 {
        if self.is_game_over() {
            self.final_inning
        } else {
            self.inning
        }
    }

    // ========== Cycle bookkeeping ==========

    /// Clear the transient flags at the top of a pitch cycle.
    pub fn begin_cycle(&mut self) {
        self.flags = CycleFlags::default();
    }

    /// PreAtBat → AwaitingPitch once base running lets the pitch through.
    pub fn mark_awaiting_pitch(&mut self) {
        if self.phase == GamePhase::PreAtBat {
            self.phase = GamePhase::AwaitingPitch;
        }
    }

    /// Outs are added as-is; the boundary check happens in [`Self::finish_play`].
    pub fn add_outs(&mut self, outs: u8) {
        self.outs = self.outs.saturating_add(outs);
    }

    pub fn add_runs(&mut self, runs: u8) {
        self.score.add(self.batting_side(), runs as u16);
    }

    /// Replace base occupancy wholesale and book outs/runs.
    pub fn apply_outcome(&mut self, outcome: &DefensiveOutcome) {
        self.bases = outcome.bases;
        self.add_outs(outcome.outs);
        self.add_runs(outcome.runs());
    }

    /// AwaitingPitch → AtBatResolved. Resets the count for the next batter.
    pub fn resolve_at_bat(&mut self) {
        self.flags.ab_over = true;
        self.count = Count::default();
        self.phase = GamePhase::AtBatResolved;
    }

    // ========== Transitions ==========

    /// Evaluate transitions after a play (at-bat or base-running event).
    pub fn finish_play(&mut self) -> Transition {
        if self.is_game_over() {
            return Transition::GameOver;
        }

        if self.is_walk_off() {
            info!(inning = self.inning, home = self.score.home, away = self.score.away, "walk-off");
            self.final_inning = self.inning;
            self.phase = GamePhase::GameOver;
            return Transition::GameOver;
        }

        if self.outs >= self.rules.outs_per_half {
            self.phase = GamePhase::InningBoundary;
            let (completed_inning, completed_half) = (self.inning, self.half);
            self.flip_half();

            if self.game_over_after(completed_inning, completed_half) {
                info!(
                    inning = completed_inning,
                    home = self.score.home,
                    away = self.score.away,
                    "game over"
                );
                self.final_inning = completed_inning;
                self.phase = GamePhase::GameOver;
                return Transition::GameOver;
            }
            self.phase = GamePhase::PreAtBat;
            return Transition::HalfInningOver;
        }

        if self.phase == GamePhase::AtBatResolved {
            self.phase = GamePhase::PreAtBat;
        }
        Transition::Continue
    }

    /// Clear bases, reset outs/count, swap batting/pitching. The inning
    /// counter only moves on the bottom → top flip.
    pub fn flip_half(&mut self) {
        debug!(
            inning = self.inning,
            half = ?self.half,
            outs = self.outs,
            left_on_base = self.bases.count(),
            "half-inning over"
        );
        self.bases = Bases::empty();
        self.outs = 0;
        self.count = Count::default();
        self.half = match self.half {
            Half::Top => Half::Bottom,
            Half::Bottom => {
                self.inning = self.inning.saturating_add(1);
                Half::Top
            }
        };
    }

    /// Game-over rule evaluated once a half completes.
    ///
    /// After a top half the home side only needs to bat if it is not already
    /// ahead; after a bottom half any unequal score ends it.
    pub fn game_over_after(&self, inning: u8, half: Half) -> bool {
        if inning < self.rules.innings {
            return false;
        }
        match half {
            Half::Top => self.score.home > self.score.away,
            Half::Bottom => self.score.home != self.score.away,
        }
    }

    fn is_walk_off(&self) -> bool {
        self.rules.walk_off
            && self.half == Half::Bottom
            && self.inning >= self.rules.innings
            && self.score.home > self.score.away
    }

    #[cfg(test)]
    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerId;

    fn state() -> GameState {
        GameState::new(Rules::default())
    }

    #[test]
    fn test_new_game_starts_top_first() {
        let s = state();
        assert_eq!(s.inning, 1);
        assert_eq!(s.half, Half::Top);
        assert_eq!(s.batting_side(), TeamSide::Away);
        assert_eq!(s.pitching_side(), TeamSide::Home);
        assert_eq!(s.phase(), GamePhase::PreAtBat);
    }

    #[test]
    fn test_third_out_flips_half() {
        let mut s = state();
        s.bases.first = Some(PlayerId(4));
        s.count = Count::new(2, 1);
        s.outs = 2;
        s.add_outs(1);
        s.resolve_at_bat();

        assert_eq!(s.finish_play(), Transition::HalfInningOver);
        assert_eq!(s.outs, 0);
        assert!(s.bases.is_empty());
        assert_eq!(s.count, Count::default());
        assert_eq!(s.half, Half::Bottom);
        assert_eq!(s.inning, 1, "inning only moves on bottom → top");
        assert_eq!(s.batting_side(), TeamSide::Home);
        assert_eq!(s.phase(), GamePhase::PreAtBat);
    }

    #[test]
    fn test_bottom_flip_increments_inning() {
        let mut s = state();
        s.half = Half::Bottom;
        s.add_outs(3);
        s.resolve_at_bat();
        assert_eq!(s.finish_play(), Transition::HalfInningOver);
        assert_eq!(s.inning, 2);
        assert_eq!(s.half, Half::Top);
        assert_eq!(s.batting_side(), TeamSide::Away);
    }

    #[test]
    fn test_outs_not_clipped_before_boundary() {
        let mut s = state();
        s.outs = 2;
        s.add_outs(2);
        assert_eq!(s.outs, 4);
        s.resolve_at_bat();
        assert_eq!(s.finish_play(), Transition::HalfInningOver);
        assert_eq!(s.outs, 0);
    }

    #[test]
    fn test_at_bat_resolved_returns_to_pre_at_bat() {
        let mut s = state();
        s.mark_awaiting_pitch();
        assert_eq!(s.phase(), GamePhase::AwaitingPitch);
        s.add_outs(1);
        s.resolve_at_bat();
        assert_eq!(s.phase(), GamePhase::AtBatResolved);
        assert_eq!(s.finish_play(), Transition::Continue);
        assert_eq!(s.phase(), GamePhase::PreAtBat);
    }

    #[test]
    fn test_bottom_of_final_inning_home_leading_third_out_ends_game() {
        let mut s = state();
        s.inning = 9;
        s.half = Half::Bottom;
        s.score = Score { away: 1, home: 3 };
        s.outs = 2;
        s.add_outs(1);
        s.resolve_at_bat();

        assert_eq!(s.finish_play(), Transition::GameOver);
        assert!(s.is_game_over());
        assert_eq!(s.final_inning(), 9);
        // Further finish calls are inert
        assert_eq!(s.finish_play(), Transition::GameOver);
    }

    #[test]
    fn test_home_leading_after_top_of_ninth_ends_game() {
        let mut s = state();
        s.inning = 9;
        s.score = Score { away: 2, home: 5 };
        s.add_outs(3);
        assert_eq!(s.finish_play(), Transition::GameOver);
        assert_eq!(s.final_inning(), 9);
    }

    #[test]
    fn test_away_leading_after_top_of_ninth_home_still_bats() {
        let mut s = state();
        s.inning = 9;
        s.score = Score { away: 5, home: 2 };
        s.add_outs(3);
        assert_eq!(s.finish_play(), Transition::HalfInningOver);
        assert_eq!(s.half, Half::Bottom);
    }

    #[test]
    fn test_no_game_over_before_regulation() {
        let mut s = state();
        s.inning = 8;
        s.half = Half::Bottom;
        s.score = Score { away: 0, home: 9 };
        s.add_outs(3);
        assert_eq!(s.finish_play(), Transition::HalfInningOver);
        assert_eq!(s.inning, 9);
    }

    #[test]
    fn test_tie_goes_to_extra_innings() {
        let mut s = state();
        s.inning = 9;
        s.half = Half::Bottom;
        s.score = Score { away: 4, home: 4 };
        s.add_outs(3);
        assert_eq!(s.finish_play(), Transition::HalfInningOver);
        assert_eq!(s.inning, 10);

        // Away scores in the 10th, home fails to answer
        s.score.away = 5;
        s.add_outs(3);
        assert_eq!(s.finish_play(), Transition::HalfInningOver);
        s.add_outs(3);
        assert_eq!(s.finish_play(), Transition::GameOver);
        assert_eq!(s.final_inning(), 10);
    }

    #[test]
    fn test_walk_off_only_when_enabled() {
        let mut s = GameState::new(Rules { walk_off: true, ..Rules::default() });
        s.inning = 9;
        s.half = Half::Bottom;
        s.score = Score { away: 3, home: 3 };
        s.add_runs(1);
        s.resolve_at_bat();
        assert_eq!(s.finish_play(), Transition::GameOver);

        let mut s = state();
        s.inning = 9;
        s.half = Half::Bottom;
        s.score = Score { away: 3, home: 4 };
        s.resolve_at_bat();
        assert_eq!(s.finish_play(), Transition::Continue);
    }

    #[test]
    fn test_apply_outcome_replaces_bases() {
        use crate::models::PlayKind;
        let mut s = state();
        s.bases.first = Some(PlayerId(1));
        let mut outcome = DefensiveOutcome::new(
            PlayKind::Walk,
            Bases { first: Some(PlayerId(2)), second: Some(PlayerId(1)), third: None },
        );
        outcome.scored.push(PlayerId(9));
        s.apply_outcome(&outcome);
        assert_eq!(s.bases.second, Some(PlayerId(1)));
        assert_eq!(s.score.away, 1);
    }
}
