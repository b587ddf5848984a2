//! Game Engine
//!
//! Drives one game pitch cycle by pitch cycle:
//!
//! 1. pre-pitch base running (pickoff / steal), which may consume the cycle
//! 2. pitch resolution and count update
//! 3. at-bat resolution (K / BB / HBP / batted ball) applied to the state
//! 4. stat crediting, play recording, injury checkpoints
//! 5. half-inning / game-over transitions
//!
//! All randomness comes from one `ChaCha8Rng` seeded from the plan, so a
//! (plan, seed) pair always replays the same play log.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

use super::base_running::{BaseRunningResolver, RunningEvent};
use super::batted_ball::{BattedBallResolver, PlayContext};
use super::config::BaselineConfig;
use super::count::{process_pitch, AtBatVerdict};
use super::game_state::{GameState, Transition};
use super::injury::{ActionKind, InjuryCheckpoint, InjuryHook, NoInjuries};
use super::pitch::{pitch_cost, PitchResolver, PitchResult, StrikeKind};
use super::advance::award_first;
use crate::error::{Result, SimError};
use crate::models::{
    Credit, DefensiveAction, DefensiveOutcome, GameResult, HitType, PitchType, PlayKind, PlayLog,
    PlayRecord, PlayRecorder, PlayerId, Position, Rules, Team, TeamScore, TeamSide,
};

/// Everything needed to start a game
#[derive(Debug, Clone)]
pub struct GamePlan {
    pub home: Team,
    pub away: Team,
    pub rules: Rules,
    pub config: Arc<BaselineConfig>,
    pub seed: u64,
}

impl GamePlan {
    /// Default rules and baseline tables.
    pub fn new(home: Team, away: Team, seed: u64) -> Self {
        Self { home, away, rules: Rules::default(), config: Arc::new(BaselineConfig::default()), seed }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_config(mut self, config: Arc<BaselineConfig>) -> Self {
        self.config = config;
        self
    }
}

pub struct GameEngine {
    state: GameState,
    /// Indexed by `TeamSide::index` (away = 0, home = 1)
    teams: [Team; 2],
    config: Arc<BaselineConfig>,
    rng: ChaCha8Rng,
    seed: u64,
    log: PlayLog,
    recorders: Vec<Box<dyn PlayRecorder>>,
    injury_hook: Box<dyn InjuryHook>,
    cycles: u32,
    /// The current batter's at-bat-start checkpoint has run
    at_bat_open: bool,
}

impl GameEngine {
    pub fn new(plan: GamePlan) -> Result<Self> {
        let GamePlan { mut home, mut away, rules, config, seed } = plan;

        rules.validate()?;
        config.validate()?;
        away.validate()?;
        home.validate()?;

        away.reset_for_game();
        home.reset_for_game();

        debug!(home = %home.id, away = %away.id, seed, innings = rules.innings, "game created");

        Ok(Self {
            state: GameState::new(rules),
            teams: [away, home],
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            log: PlayLog::default(),
            recorders: Vec::new(),
            injury_hook: Box::new(NoInjuries),
            cycles: 0,
            at_bat_open: false,
        })
    }

    pub fn with_injury_hook(mut self, hook: impl InjuryHook + 'static) -> Self {
        self.injury_hook = Box::new(hook);
        self
    }

    /// Extra play consumer; the engine keeps its own log regardless.
    pub fn with_recorder(mut self, recorder: impl PlayRecorder + 'static) -> Self {
        self.recorders.push(Box::new(recorder));
        self
    }

    // ========== Accessors ==========

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        &self.teams[side.index()]
    }

    pub fn plays(&self) -> &[PlayRecord] {
        self.log.plays()
    }

    pub fn into_plays(self) -> Vec<PlayRecord> {
        self.log.into_plays()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Terminal result; `None` until the game is over.
    pub fn result(&self) -> Option<GameResult> {
        if !self.state.is_game_over() {
            return None;
        }
        let winner = self.state.score.leader()?;
        let (away, home) = (&self.teams[0], &self.teams[1]);
        Some(GameResult {
            home: TeamScore { id: home.id.clone(), score: self.state.score.home },
            away: TeamScore { id: away.id.clone(), score: self.state.score.away },
            winner: self.teams[winner.index()].id.clone(),
            innings: self.state.final_inning(),
        })
    }

    // ========== Driver ==========

    pub fn run_to_completion(&mut self) -> Result<GameResult> {
        while self.run_pitch_cycle()? != Transition::GameOver {}

        let result = self.result().ok_or(SimError::NoWinner(self.state.score.home))?;
        info!(
            home = %result.home.id,
            home_score = result.home.score,
            away = %result.away.id,
            away_score = result.away.score,
            innings = result.innings,
            plays = self.log.len(),
            "game finished"
        );
        Ok(result)
    }

    /// One pitch cycle. Returns the transition it caused.
    pub fn run_pitch_cycle(&mut self) -> Result<Transition> {
        if self.state.is_game_over() {
            return Ok(Transition::GameOver);
        }

        let limit = self.state.rules().max_pitch_cycles;
        self.cycles += 1;
        if self.cycles > limit {
            warn!(seed = self.seed, limit, "pitch cycle limit exceeded");
            return Err(SimError::CycleLimitExceeded(limit));
        }

        self.state.begin_cycle();
        let batting = self.state.batting_side();
        let pitching = self.state.pitching_side();
        let batter_id = self.teams[batting.index()].current_batter();
        let pitcher_id = self.teams[pitching.index()].pitcher;

        if !self.at_bat_open {
            self.at_bat_open = true;
            self.check_injury(InjuryCheckpoint::AtBatStart, batting, batter_id, ActionKind::Batting)?;
            self.check_injury(InjuryCheckpoint::AtBatStart, pitching, pitcher_id, ActionKind::Pitching)?;
        }

        // 1. Pre-pitch base running
        let running = BaseRunningResolver::new(&self.config.running).resolve(
            self.state.bases,
            &self.teams[batting.index()],
            &self.teams[pitching.index()],
            &mut self.rng,
        )?;
        if let (true, Some(event), Some(outcome)) = (running.skip_pitch, running.event, running.outcome) {
            return self.finish_running_event(event, outcome, batter_id, pitcher_id);
        }

        // 2. Pitch
        self.state.mark_awaiting_pitch();
        let pitch = {
            let offense = &self.teams[batting.index()];
            let defense = &self.teams[pitching.index()];
            PitchResolver::new(&self.config.pitch).resolve(
                offense.get(batter_id)?,
                defense.get(pitcher_id)?,
                defense.catcher()?,
                &mut self.rng,
            )
        };
        self.spend_pitch(pitching, pitcher_id)?;

        let update = process_pitch(self.state.count, &pitch.result, self.state.rules());
        self.state.count = update.count;

        // 3. At-bat resolution
        let bases = self.state.bases;
        let outcome = match update.verdict {
            AtBatVerdict::Continue => {
                let kind = match pitch.result {
                    PitchResult::Strike(StrikeKind::Called) => PlayKind::CalledStrike,
                    PitchResult::Strike(StrikeKind::Swinging) => PlayKind::SwingingStrike,
                    PitchResult::Strike(StrikeKind::Foul) => PlayKind::Foul,
                    _ => PlayKind::Ball,
                };
                let outcome = DefensiveOutcome::new(kind, bases);
                self.record(batter_id, pitcher_id, Some(pitch.pitch), &outcome);
                return Ok(self.state.finish_play());
            }
            AtBatVerdict::Strikeout { swinging } => {
                self.state.flags.strikeout = true;
                let mut outcome = DefensiveOutcome::new(PlayKind::Strikeout { swinging }, bases);
                outcome.outs = 1;
                outcome.actions.push(DefensiveAction::putout(Position::Catcher));
                outcome
            }
            AtBatVerdict::Walk => {
                self.state.flags.walk = true;
                award_first(bases, batter_id, PlayKind::Walk)
            }
            AtBatVerdict::HitByPitch => {
                self.state.flags.hbp = true;
                award_first(bases, batter_id, PlayKind::HitByPitch)
            }
            AtBatVerdict::InPlay(ball) => {
                let offense = &self.teams[batting.index()];
                let ctx = PlayContext {
                    batter: offense.get(batter_id)?,
                    offense,
                    defense: &self.teams[pitching.index()],
                    bases,
                    outs: self.state.outs,
                    outs_per_half: self.state.rules().outs_per_half,
                    speed_weight: self.config.running.speed_weight,
                };
                BattedBallResolver::new(&self.config.batted_ball).resolve(ball, &ctx, &mut self.rng)?
            }
        };
        if let PlayKind::Hit { hit, .. } = outcome.kind {
            self.state.flags.hit = Some(hit);
        }

        self.state.apply_outcome(&outcome);
        self.state.resolve_at_bat();

        // 4. Bookkeeping
        self.credit_plate_appearance(batting, batter_id, pitcher_id, &outcome)?;
        self.credit_fielding(pitching, &outcome)?;
        self.record(batter_id, pitcher_id, Some(pitch.pitch), &outcome);
        self.check_injury(InjuryCheckpoint::PostResolution, batting, batter_id, ActionKind::Batting)?;
        self.check_injury(InjuryCheckpoint::PostResolution, pitching, pitcher_id, ActionKind::Pitching)?;
        self.teams[batting.index()].advance_order();
        self.at_bat_open = false;

        // 5. Transitions
        Ok(self.state.finish_play())
    }

    /// Pickoff or steal consumed the cycle; the at-bat stays open.
    fn finish_running_event(
        &mut self,
        event: RunningEvent,
        outcome: DefensiveOutcome,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
    ) -> Result<Transition> {
        let batting = self.state.batting_side();
        let pitching = self.state.pitching_side();
        match event {
            RunningEvent::Pickoff { .. } => self.state.flags.pickoff_attempt = true,
            RunningEvent::Steal { .. } => self.state.flags.steal_attempt = true,
        }

        self.state.apply_outcome(&outcome);
        self.credit_running(event.runner(), pitcher_id, &outcome)?;
        self.credit_fielding(pitching, &outcome)?;
        self.record(batter_id, pitcher_id, None, &outcome);
        self.check_injury(InjuryCheckpoint::PostResolution, batting, event.runner(), ActionKind::Running)?;

        let transition = self.state.finish_play();
        if transition == Transition::HalfInningOver {
            // Same batter leads off next time; his at-bat starts over.
            self.at_bat_open = false;
        }
        Ok(transition)
    }

    // ========== Bookkeeping ==========

    fn record(
        &mut self,
        batter: PlayerId,
        pitcher: PlayerId,
        pitch: Option<PitchType>,
        outcome: &DefensiveOutcome,
    ) {
        let record = PlayRecord {
            seq: self.log.len() as u32 + 1,
            inning: self.state.inning,
            half: self.state.half,
            batter,
            pitcher,
            pitch,
            play: outcome.kind.clone(),
            balls: self.state.count.balls,
            strikes: self.state.count.strikes,
            outs: self.state.outs,
            bases: self.state.bases,
            scored: outcome.scored.clone(),
            score: self.state.score,
            errors: outcome.errors,
        };
        trace!(seq = record.seq, inning = record.inning, play = ?record.play, "play");
        for recorder in &mut self.recorders {
            recorder.record(&record);
        }
        self.log.push(record);
    }

    fn spend_pitch(&mut self, side: TeamSide, pitcher_id: PlayerId) -> Result<()> {
        let pitcher = self.teams[side.index()].get_mut(pitcher_id)?;
        let cost = pitch_cost(&self.config.pitch, pitcher);
        pitcher.energy = (pitcher.energy - cost).max(0.0);
        pitcher.stats.pitching.pitches += 1;
        Ok(())
    }

    fn credit_runs(&mut self, side: TeamSide, scored: &[PlayerId]) -> Result<()> {
        for id in scored {
            self.teams[side.index()].get_mut(*id)?.stats.batting.runs += 1;
        }
        Ok(())
    }

    fn credit_plate_appearance(
        &mut self,
        batting: TeamSide,
        batter_id: PlayerId,
        pitcher_id: PlayerId,
        outcome: &DefensiveOutcome,
    ) -> Result<()> {
        let kind = &outcome.kind;
        let runs = outcome.scored.len() as u16;

        let line = &mut self.teams[batting.index()].get_mut(batter_id)?.stats.batting;
        line.plate_appearances += 1;
        if kind.is_at_bat() {
            line.at_bats += 1;
        }
        if kind.credits_rbi() {
            line.rbi += runs;
        }
        match kind {
            PlayKind::Hit { hit, .. } => {
                line.hits += 1;
                match hit {
                    HitType::Single => {}
                    HitType::Double => line.doubles += 1,
                    HitType::Triple => line.triples += 1,
                    HitType::HomeRun => line.home_runs += 1,
                }
            }
            PlayKind::Walk => line.walks += 1,
            PlayKind::HitByPitch => line.hit_by_pitch += 1,
            PlayKind::Strikeout { .. } => line.strikeouts += 1,
            PlayKind::SacrificeFly { .. } => line.sacrifice_flies += 1,
            PlayKind::DoublePlay { .. } => line.grounded_into_dp += 1,
            PlayKind::ReachedOnError { .. } => line.reached_on_error += 1,
            _ => {}
        }

        self.credit_runs(batting, &outcome.scored)?;

        let line = &mut self.teams[batting.opponent().index()].get_mut(pitcher_id)?.stats.pitching;
        line.batters_faced += 1;
        line.outs += outcome.outs as u16;
        line.runs += runs;
        match kind {
            PlayKind::Hit { hit, .. } => {
                line.hits += 1;
                if *hit == HitType::HomeRun {
                    line.home_runs += 1;
                }
            }
            PlayKind::Walk => line.walks += 1,
            PlayKind::HitByPitch => line.hit_batters += 1,
            PlayKind::Strikeout { .. } => line.strikeouts += 1,
            _ => {}
        }
        Ok(())
    }

    fn credit_running(
        &mut self,
        runner_id: PlayerId,
        pitcher_id: PlayerId,
        outcome: &DefensiveOutcome,
    ) -> Result<()> {
        let batting = self.state.batting_side();
        let line = &mut self.teams[batting.index()].get_mut(runner_id)?.stats.batting;
        match outcome.kind {
            PlayKind::StolenBase { .. } => line.stolen_bases += 1,
            PlayKind::CaughtStealing { .. } => line.caught_stealing += 1,
            PlayKind::PickedOff { .. } => line.picked_off += 1,
            _ => {}
        }

        self.credit_runs(batting, &outcome.scored)?;

        let line = &mut self.teams[batting.opponent().index()].get_mut(pitcher_id)?.stats.pitching;
        line.outs += outcome.outs as u16;
        line.runs += outcome.scored.len() as u16;
        if matches!(outcome.kind, PlayKind::PickedOff { .. }) {
            line.pickoffs += 1;
        }
        Ok(())
    }

    fn credit_fielding(&mut self, defense: TeamSide, outcome: &DefensiveOutcome) -> Result<()> {
        let team = &mut self.teams[defense.index()];
        for action in &outcome.actions {
            let id = team.fielder(action.fielder)?;
            let line = &mut team.get_mut(id)?.stats.fielding;
            match action.credit {
                Credit::Putout => line.putouts += 1,
                Credit::Assist => line.assists += 1,
                Credit::Error => line.errors += 1,
            }
        }
        Ok(())
    }

    fn check_injury(
        &mut self,
        checkpoint: InjuryCheckpoint,
        side: TeamSide,
        player_id: PlayerId,
        action: ActionKind,
    ) -> Result<()> {
        let player = self.teams[side.index()].get_mut(player_id)?;
        if let Some(report) = self.injury_hook.check(checkpoint, action, player, &mut self.rng) {
            info!(player = %player_id, severity = ?report.severity, "{}", report.description);
            player.injury = Some(report);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
