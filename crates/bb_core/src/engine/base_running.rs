//! Base Running (pre-pitch)
//!
//! Before every pitch: pickoff attempts are checked for occupied bases
//! 1st → 2nd → 3rd, then steal attempts 3rd → 2nd → 1st (only into an open
//! base). The first attempt that fires consumes the cycle; the pitch is
//! skipped.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::advance::force_from;
use super::config::RunningConfig;
use super::probability::{
    battery_composite, error_chance, normalized, roll, runner_composite,
};
use crate::error::Result;
use crate::models::{Base, Bases, DefensiveAction, DefensiveOutcome, PlayKind, Player, PlayerId, Position, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickoffResult {
    PickedOff,
    Error,
    Safe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StealResult {
    Stolen,
    CaughtStealing,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunningEvent {
    Pickoff { base: Base, runner: PlayerId, result: PickoffResult },
    Steal { from: Base, runner: PlayerId, result: StealResult },
}

impl RunningEvent {
    pub fn runner(&self) -> PlayerId {
        match self {
            RunningEvent::Pickoff { runner, .. } | RunningEvent::Steal { runner, .. } => *runner,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseRunningOutcome {
    /// The cycle was consumed by a base-running event
    pub skip_pitch: bool,
    pub event: Option<RunningEvent>,
    pub outcome: Option<DefensiveOutcome>,
}

impl BaseRunningOutcome {
    pub fn none() -> Self {
        Self { skip_pitch: false, event: None, outcome: None }
    }
}

/// Fielder taking the throw at a base (`None` = home plate).
pub fn covering_fielder(base: Option<Base>) -> Position {
    match base {
        Some(Base::First) => Position::FirstBase,
        Some(Base::Second) => Position::Shortstop,
        Some(Base::Third) => Position::ThirdBase,
        None => Position::Catcher,
    }
}

pub struct BaseRunningResolver<'a> {
    config: &'a RunningConfig,
}

impl<'a> BaseRunningResolver<'a> {
    pub fn new(config: &'a RunningConfig) -> Self {
        Self { config }
    }

    pub fn resolve<R: Rng + ?Sized>(
        &self,
        bases: Bases,
        offense: &Team,
        defense: &Team,
        rng: &mut R,
    ) -> Result<BaseRunningOutcome> {
        if bases.is_empty() {
            return Ok(BaseRunningOutcome::none());
        }
        let pitcher = defense.current_pitcher()?;

        // 1. Pickoffs, trailing base first
        for base in Base::ALL {
            let Some(runner_id) = bases.get(base) else { continue };
            if roll(rng, self.pickoff_attempt_probability(base, pitcher)) {
                let runner = offense.get(runner_id)?;
                let (result, outcome) = self.resolve_pickoff(base, bases, runner, pitcher, defense, rng)?;
                debug!(?base, runner = %runner_id, ?result, "pickoff attempt");
                return Ok(BaseRunningOutcome {
                    skip_pitch: true,
                    event: Some(RunningEvent::Pickoff { base, runner: runner_id, result }),
                    outcome: Some(outcome),
                });
            }
        }

        // 2. Steals, lead runner first
        for base in Base::ALL.into_iter().rev() {
            let Some(runner_id) = bases.get(base) else { continue };
            if base.next().is_some_and(|target| bases.is_occupied(target)) {
                continue;
            }
            let runner = offense.get(runner_id)?;
            if roll(rng, self.steal_attempt_probability(base, runner)) {
                let (result, outcome) = self.resolve_steal(base, bases, runner, defense, rng)?;
                debug!(from = ?base, runner = %runner_id, ?result, "steal attempt");
                return Ok(BaseRunningOutcome {
                    skip_pitch: true,
                    event: Some(RunningEvent::Steal { from: base, runner: runner_id, result }),
                    outcome: Some(outcome),
                });
            }
        }

        Ok(BaseRunningOutcome::none())
    }

    // ========== Pickoffs ==========

    /// Average pickoff rating throws at the configured rate.
    pub fn pickoff_attempt_probability(&self, base: Base, pitcher: &Player) -> f32 {
        let pickoff = pitcher.pitching.as_ref().map(|p| p.pickoff).unwrap_or(50);
        (self.config.pickoff_attempt_rates.get(base) * (0.5 + normalized(pickoff))).clamp(0.0, 1.0)
    }

    pub fn resolve_pickoff<R: Rng + ?Sized>(
        &self,
        base: Base,
        bases: Bases,
        runner: &Player,
        pitcher: &Player,
        defense: &Team,
        rng: &mut R,
    ) -> Result<(PickoffResult, DefensiveOutcome)> {
        let cfg = self.config;
        let receiver_pos = covering_fielder(Some(base));
        let receiver = defense.get(defense.fielder(receiver_pos)?)?;

        let pickoff_n = normalized(pitcher.pitching.as_ref().map(|p| p.pickoff).unwrap_or(50));
        let runner_n = runner_composite(runner, cfg.speed_weight);
        let success_p = (cfg.pickoff_success_rate * (1.0 + pickoff_n - runner_n)).clamp(0.0, 1.0);
        let success = roll(rng, success_p);

        // One throw/catch error roll; charged to whichever end is weaker.
        let throw_n = normalized(pitcher.fielding.throw_accuracy);
        let glove_n = normalized(receiver.fielding.fielding);
        let error = roll(rng, error_chance(cfg.pickoff_error_rate, (throw_n + glove_n) / 2.0));

        if error {
            let charged = if throw_n < glove_n { Position::Pitcher } else { receiver_pos };
            let (next, scored) = force_from(bases, base);
            let mut outcome = DefensiveOutcome::new(PlayKind::PickoffError { base }, next);
            outcome.scored = scored;
            outcome.errors = 1;
            outcome.actions.push(DefensiveAction::error(charged));
            return Ok((PickoffResult::Error, outcome));
        }

        if success {
            let mut next = bases;
            next.set(base, None);
            let mut outcome = DefensiveOutcome::new(PlayKind::PickedOff { base }, next);
            outcome.outs = 1;
            outcome.actions.push(DefensiveAction::assist(Position::Pitcher));
            outcome.actions.push(DefensiveAction::putout(receiver_pos));
            return Ok((PickoffResult::PickedOff, outcome));
        }

        Ok((PickoffResult::Safe, DefensiveOutcome::new(PlayKind::PickoffSafe { base }, bases)))
    }

    // ========== Steals ==========

    /// `steal_tendency` 100 attempts at the configured rate.
    pub fn steal_attempt_probability(&self, from: Base, runner: &Player) -> f32 {
        (self.config.steal_attempt_rates.get(from) * normalized(runner.batting.steal_tendency))
            .clamp(0.0, 1.0)
    }

    pub fn resolve_steal<R: Rng + ?Sized>(
        &self,
        from: Base,
        bases: Bases,
        runner: &Player,
        defense: &Team,
        rng: &mut R,
    ) -> Result<(StealResult, DefensiveOutcome)> {
        let cfg = self.config;
        let catcher = defense.catcher()?;
        let pitcher = defense.current_pitcher()?;
        let target = from.next();

        let runner_n = runner_composite(runner, cfg.speed_weight);
        let battery_n = battery_composite(catcher, pitcher, &cfg.battery_weights);
        let success_p = (cfg.steal_success_rate * (1.0 + runner_n - battery_n)).clamp(0.0, 1.0);
        let success = roll(rng, success_p);
        let error =
            roll(rng, error_chance(cfg.steal_error_rate, normalized(catcher.fielding.throw_accuracy)));

        if error {
            // Runner takes the base plus one, pushing anyone ahead of him;
            // runners behind move up if they can.
            let mut next = bases;
            next.set(from, None);
            let (mut next, scored) = match target {
                Some(base) => {
                    next.set(base, Some(runner.id));
                    force_from(next, base)
                }
                None => (next, vec![runner.id]),
            };
            for trailing in Base::ALL.into_iter().rev().filter(|b| *b < from) {
                if let (Some(trail), Some(ahead)) = (next.get(trailing), trailing.next()) {
                    if !next.is_occupied(ahead) {
                        next.set(trailing, None);
                        next.set(ahead, Some(trail));
                    }
                }
            }
            let mut outcome = DefensiveOutcome::new(PlayKind::StealError { from }, next);
            outcome.scored = scored;
            outcome.errors = 1;
            outcome.actions.push(DefensiveAction::error(Position::Catcher));
            return Ok((StealResult::Error, outcome));
        }

        let mut next = bases;
        next.set(from, None);
        if success {
            let mut outcome = DefensiveOutcome::new(PlayKind::StolenBase { from }, next);
            match target {
                Some(base) => outcome.bases.set(base, Some(runner.id)),
                None => outcome.scored.push(runner.id),
            }
            return Ok((StealResult::Stolen, outcome));
        }

        let mut outcome = DefensiveOutcome::new(PlayKind::CaughtStealing { from }, next);
        outcome.outs = 1;
        match target {
            None => {
                outcome.actions.push(DefensiveAction::assist(Position::Pitcher));
                outcome.actions.push(DefensiveAction::putout(Position::Catcher));
            }
            Some(base) => {
                outcome.actions.push(DefensiveAction::assist(Position::Catcher));
                outcome.actions.push(DefensiveAction::putout(covering_fielder(Some(base))));
            }
        }
        Ok((StealResult::CaughtStealing, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{BaseRates, RunningConfig};
    use crate::engine::test_fixtures::{fixture_rng, fixture_teams};

    fn certain_steals() -> RunningConfig {
        RunningConfig {
            pickoff_attempt_rates: BaseRates::zero(),
            steal_attempt_rates: BaseRates { first: 1.0, second: 1.0, third: 1.0 },
            steal_success_rate: 1.0,
            steal_error_rate: 0.0,
            ..RunningConfig::default()
        }
    }

    #[test]
    fn test_empty_bases_never_skip() {
        let cfg = RunningConfig::default();
        let (away, home) = fixture_teams();
        let out = BaseRunningResolver::new(&cfg)
            .resolve(Bases::empty(), &away, &home, &mut fixture_rng())
            .unwrap();
        assert_eq!(out, BaseRunningOutcome::none());
    }

    #[test]
    fn test_successful_steal_of_second() {
        let cfg = certain_steals();
        let (mut away, home) = fixture_teams();
        let runner = away.batting_order[0];
        {
            let p = away.get_mut(runner).unwrap();
            p.batting.steal_tendency = 100;
            p.batting.speed = 100;
            p.batting.baserunning = 100;
        }
        let bases = Bases { first: Some(runner), ..Bases::empty() };
        let out = BaseRunningResolver::new(&cfg).resolve(bases, &away, &home, &mut fixture_rng()).unwrap();

        assert!(out.skip_pitch);
        assert_eq!(
            out.event,
            Some(RunningEvent::Steal { from: Base::First, runner, result: StealResult::Stolen })
        );
        let outcome = out.outcome.unwrap();
        assert_eq!(outcome.bases, Bases { second: Some(runner), ..Bases::empty() });
        assert_eq!(outcome.outs, 0);
    }

    #[test]
    fn test_no_steal_into_occupied_base() {
        let cfg = certain_steals();
        let (mut away, home) = fixture_teams();
        let (r1, r2) = (away.batting_order[0], away.batting_order[1]);
        for id in [r1, r2] {
            away.get_mut(id).unwrap().batting.steal_tendency = 100;
        }
        // Runner on 2nd goes first; runner on 1st is blocked by him.
        let bases = Bases { first: Some(r1), second: Some(r2), third: None };
        let out = BaseRunningResolver::new(&cfg).resolve(bases, &away, &home, &mut fixture_rng()).unwrap();
        assert!(matches!(out.event, Some(RunningEvent::Steal { from: Base::Second, .. })));

        let tendency_zero = RunningConfig { steal_attempt_rates: BaseRates { first: 1.0, second: 0.0, third: 0.0 }, ..certain_steals() };
        let out = BaseRunningResolver::new(&tendency_zero).resolve(bases, &away, &home, &mut fixture_rng()).unwrap();
        assert!(!out.skip_pitch, "runner on first is blocked");
    }

    #[test]
    fn test_pickoff_checked_before_steal() {
        let cfg = RunningConfig {
            pickoff_attempt_rates: BaseRates { first: 1.0, second: 1.0, third: 1.0 },
            pickoff_success_rate: 1.0,
            pickoff_error_rate: 0.0,
            ..certain_steals()
        };
        let (away, home) = fixture_teams();
        let runner = away.batting_order[3];
        let bases = Bases { first: Some(runner), ..Bases::empty() };
        let out = BaseRunningResolver::new(&cfg).resolve(bases, &away, &home, &mut fixture_rng()).unwrap();
        assert_eq!(
            out.event,
            Some(RunningEvent::Pickoff { base: Base::First, runner, result: PickoffResult::PickedOff })
        );
        let outcome = out.outcome.unwrap();
        assert_eq!(outcome.outs, 1);
        assert!(outcome.bases.is_empty());
        assert_eq!(
            outcome.actions,
            vec![DefensiveAction::assist(Position::Pitcher), DefensiveAction::putout(Position::FirstBase)]
        );
    }

    #[test]
    fn test_pickoff_error_forces_chain() {
        let cfg = RunningConfig { pickoff_error_rate: 1.0, ..RunningConfig::default() };
        let (away, home) = fixture_teams();
        let (r1, r2) = (away.batting_order[0], away.batting_order[1]);
        let bases = Bases { first: Some(r1), second: Some(r2), third: None };
        let pitcher = home.current_pitcher().unwrap();
        let (result, outcome) = BaseRunningResolver::new(&cfg)
            .resolve_pickoff(Base::First, bases, away.get(r1).unwrap(), pitcher, &home, &mut fixture_rng())
            .unwrap();
        assert_eq!(result, PickoffResult::Error);
        assert_eq!(outcome.bases, Bases { first: None, second: Some(r1), third: Some(r2) });
        assert_eq!(outcome.errors, 1);
    }

    #[test]
    fn test_steal_error_takes_extra_base() {
        let cfg = RunningConfig { steal_error_rate: 1.0, ..RunningConfig::default() };
        let (away, mut home) = fixture_teams();
        let catcher = home.fielder(Position::Catcher).unwrap();
        home.get_mut(catcher).unwrap().fielding.throw_accuracy = 0;
        let (r1, r2) = (away.batting_order[0], away.batting_order[1]);

        // Runner on 2nd steals third, error: scores; runner on 1st moves up.
        let bases = Bases { first: Some(r1), second: Some(r2), third: None };
        let (result, outcome) = BaseRunningResolver::new(&cfg)
            .resolve_steal(Base::Second, bases, away.get(r2).unwrap(), &home, &mut fixture_rng())
            .unwrap();
        assert_eq!(result, StealResult::Error);
        assert_eq!(outcome.scored, vec![r2]);
        assert_eq!(outcome.bases, Bases { first: None, second: Some(r1), third: None });

        // Lone runner on 1st ends up on 3rd
        let bases = Bases { first: Some(r1), ..Bases::empty() };
        let (_, outcome) = BaseRunningResolver::new(&cfg)
            .resolve_steal(Base::First, bases, away.get(r1).unwrap(), &home, &mut fixture_rng())
            .unwrap();
        assert_eq!(outcome.bases, Bases { third: Some(r1), ..Bases::empty() });
    }

    #[test]
    fn test_steal_error_pushes_runner_on_third_home() {
        let cfg = RunningConfig { steal_error_rate: 1.0, ..RunningConfig::default() };
        let (away, mut home) = fixture_teams();
        let catcher = home.fielder(Position::Catcher).unwrap();
        home.get_mut(catcher).unwrap().fielding.throw_accuracy = 0;
        let (r1, r3) = (away.batting_order[0], away.batting_order[2]);
        let bases = Bases { first: Some(r1), second: None, third: Some(r3) };

        let (_, outcome) = BaseRunningResolver::new(&cfg)
            .resolve_steal(Base::First, bases, away.get(r1).unwrap(), &home, &mut fixture_rng())
            .unwrap();
        assert_eq!(outcome.scored, vec![r3]);
        assert_eq!(outcome.bases, Bases { third: Some(r1), ..Bases::empty() });
    }

    #[test]
    fn test_each_cycle_has_exactly_one_running_result() {
        let cfg = RunningConfig {
            pickoff_attempt_rates: BaseRates::zero(),
            steal_attempt_rates: BaseRates { first: 0.5, second: 0.5, third: 0.5 },
            steal_success_rate: 0.6,
            steal_error_rate: 0.3,
            ..RunningConfig::default()
        };
        let resolver = BaseRunningResolver::new(&cfg);
        let (mut away, home) = fixture_teams();
        let (r1, r3) = (away.batting_order[0], away.batting_order[2]);
        for id in [r1, r3] {
            away.get_mut(id).unwrap().batting.steal_tendency = 100;
        }
        let bases = Bases { first: Some(r1), second: None, third: Some(r3) };
        let mut rng = fixture_rng();
        // no attempt, stolen, caught, error
        let mut seen = [0usize; 4];

        for _ in 0..2000 {
            let out = resolver.resolve(bases, &away, &home, &mut rng).unwrap();
            let (event, outcome) = match (out.event, out.outcome) {
                (None, None) => {
                    assert!(!out.skip_pitch);
                    seen[0] += 1;
                    continue;
                }
                (Some(event), Some(outcome)) => (event, outcome),
                other => panic!("event and outcome disagree: {other:?}"),
            };
            assert!(out.skip_pitch);
            let RunningEvent::Steal { from, runner, result } = event else {
                panic!("pickoffs are disabled: {event:?}");
            };
            assert_eq!(bases.get(from), Some(runner));

            match result {
                StealResult::Stolen => {
                    seen[1] += 1;
                    assert_eq!(outcome.kind, PlayKind::StolenBase { from });
                    assert_eq!((outcome.outs, outcome.errors), (0, 0));
                }
                StealResult::CaughtStealing => {
                    seen[2] += 1;
                    assert_eq!(outcome.kind, PlayKind::CaughtStealing { from });
                    assert_eq!((outcome.outs, outcome.errors), (1, 0));
                    assert!(outcome.scored.is_empty());
                }
                StealResult::Error => {
                    seen[3] += 1;
                    assert_eq!(outcome.kind, PlayKind::StealError { from });
                    assert_eq!((outcome.outs, outcome.errors), (0, 1));
                }
            }
            // Every runner is still on base, scored, or out exactly once
            let accounted = outcome.bases.count() + outcome.scored.len() + outcome.outs as usize;
            assert_eq!(accounted, bases.count(), "{result:?} from {from:?}");
        }
        assert!(seen.iter().all(|n| *n > 0), "{seen:?}");
    }

    #[test]
    fn test_caught_stealing_credits() {
        let cfg = RunningConfig { steal_success_rate: 0.0, steal_error_rate: 0.0, ..RunningConfig::default() };
        let (away, home) = fixture_teams();
        let r1 = away.batting_order[0];
        let bases = Bases { first: Some(r1), ..Bases::empty() };
        let (result, outcome) = BaseRunningResolver::new(&cfg)
            .resolve_steal(Base::First, bases, away.get(r1).unwrap(), &home, &mut fixture_rng())
            .unwrap();
        assert_eq!(result, StealResult::CaughtStealing);
        assert_eq!(outcome.outs, 1);
        assert!(outcome.bases.is_empty());
        assert_eq!(
            outcome.actions,
            vec![DefensiveAction::assist(Position::Catcher), DefensiveAction::putout(Position::Shortstop)]
        );
    }
}
