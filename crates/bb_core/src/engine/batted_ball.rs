//! Batted Ball Resolution
//!
//! Contact category + spray direction → landing depth → responsible fielder
//! → difficulty → catch / error roll → hit type or out type → runner
//! placement. Produces a [`DefensiveOutcome`] the state machine applies.
//!
//! ## Placement on hits
//! - Home run: everyone scores.
//! - Triple: runners score, batter to third.
//! - Double: runners on 2nd/3rd score; runner on 1st scores on an
//!   extra-base roll, otherwise stops at third.
//! - Outfield single: runners on 2nd/3rd score; runner on 1st goes to
//!   third on an extra-base roll, otherwise second.
//! - Infield single: forced runners only.

use rand::Rng;
use tracing::trace;

use super::advance::{advance_all, batter_takes, force_batter};
use super::config::BattedBallConfig;
use super::pitch::BattedBall;
use super::probability::{error_chance, normalized, roll, runner_composite, scale, weighted_pick};
use crate::error::{Result, SimError};
use crate::models::{
    Base, Bases, ContactQuality, DefensiveAction, DefensiveOutcome, Depth, Difficulty, Direction,
    HitType, OutKind, PlayKind, Player, PlayerId, Position, Situation, Team,
};

/// Everything the defense needs to know about the moment of contact
pub struct PlayContext<'a> {
    pub batter: &'a Player,
    pub offense: &'a Team,
    pub defense: &'a Team,
    pub bases: Bases,
    pub outs: u8,
    pub outs_per_half: u8,
    /// Speed share of the runner composite
    pub speed_weight: f32,
}

impl PlayContext<'_> {
    fn runner_speed(&self, runner: PlayerId) -> f32 {
        self.offense
            .player(runner)
            .map(|p| runner_composite(p, self.speed_weight))
            .unwrap_or(0.5)
    }

    /// A play that records `outs` more would end the half.
    fn ends_half(&self, outs: u8) -> bool {
        self.outs.saturating_add(outs) >= self.outs_per_half
    }
}

/// Fielders responsible for a landing zone: primary first, then backups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldingAssignment {
    pub primary: Position,
    pub backups: Vec<Position>,
}

pub struct BattedBallResolver<'a> {
    config: &'a BattedBallConfig,
}

impl<'a> BattedBallResolver<'a> {
    pub fn new(config: &'a BattedBallConfig) -> Self {
        Self { config }
    }

    pub fn resolve<R: Rng + ?Sized>(
        &self,
        ball: BattedBall,
        ctx: &PlayContext<'_>,
        rng: &mut R,
    ) -> Result<DefensiveOutcome> {
        let depth = self.sample_depth(ball.quality, rng)?;
        self.resolve_landing(ball.quality, depth, ball.direction, ctx, rng)
    }

    /// Resolve a ball that has already landed at `depth` / `direction`.
    pub fn resolve_landing<R: Rng + ?Sized>(
        &self,
        quality: ContactQuality,
        depth: Depth,
        direction: Direction,
        ctx: &PlayContext<'_>,
        rng: &mut R,
    ) -> Result<DefensiveOutcome> {
        let Some(situation) = Situation::from_landing(depth, direction) else {
            return Ok(self.hit_outcome(HitType::HomeRun, depth, direction, ctx, rng));
        };

        let assignment = self.assignment(depth, direction, ctx.defense)?;
        let primary = ctx.defense.get(ctx.defense.fielder(assignment.primary)?)?;
        let fielding_n = normalized(primary.fielding.fielding);

        let difficulty = if self.is_free_hit(quality, depth, direction) {
            Difficulty::AutomaticHit
        } else if depth.is_battery() {
            Difficulty::DirectlyAt
        } else {
            self.sample_difficulty(quality, fielding_n, rng)?
        };

        trace!(?quality, ?depth, ?direction, ?difficulty, fielder = %assignment.primary, "batted ball");

        let caught = match difficulty {
            Difficulty::AutomaticHit => false,
            // Mound and plate balls are always reached; the error roll still applies
            _ if depth.is_battery() => true,
            _ => roll(rng, self.catch_probability(quality, situation, difficulty, fielding_n)),
        };

        if !caught {
            let hit = self.hit_type(depth, situation, ctx.runner_speed(ctx.batter.id), rng);
            return Ok(self.hit_outcome(hit, depth, direction, ctx, rng));
        }

        if roll(rng, error_chance(self.config.error_rate, fielding_n)) {
            return Ok(self.error_outcome(assignment.primary, depth, direction, ctx));
        }

        Ok(self.out_outcome(quality, depth, direction, assignment.primary, ctx, rng))
    }

    // ========== Landing ==========

    pub fn sample_depth<R: Rng + ?Sized>(&self, quality: ContactQuality, rng: &mut R) -> Result<Depth> {
        let row = self
            .config
            .distance_weights
            .get(&quality)
            .ok_or_else(|| SimError::Config(format!("no distance weights for {quality:?}")))?;
        let items: Vec<(Depth, f32)> = row.iter().map(|(d, w)| (*d, *w)).collect();
        weighted_pick(rng, &items)
            .ok_or_else(|| SimError::Config(format!("empty distance weights for {quality:?}")))
    }

    /// Alignment lookup. Exact direction entries beat wildcard entries; the
    /// best-fielding candidate becomes primary (ties keep table order).
    pub fn assignment(&self, depth: Depth, direction: Direction, defense: &Team) -> Result<FieldingAssignment> {
        let entries = &self.config.alignment;
        let entry = entries
            .iter()
            .find(|e| e.depth == depth && e.direction == Some(direction))
            .or_else(|| entries.iter().find(|e| e.depth == depth && e.direction.is_none()))
            .filter(|e| !e.fielders.is_empty())
            .ok_or(SimError::NoFielderMapping { depth, direction })?;

        let mut best = 0;
        let mut best_rating = None;
        for (idx, position) in entry.fielders.iter().enumerate() {
            let rating = defense.get(defense.fielder(*position)?)?.fielding.fielding;
            if best_rating.map_or(true, |r| rating > r) {
                best = idx;
                best_rating = Some(rating);
            }
        }

        let primary = entry.fielders[best];
        let backups = entry.fielders.iter().copied().filter(|p| *p != primary).collect();
        Ok(FieldingAssignment { primary, backups })
    }

    pub fn is_free_hit(&self, quality: ContactQuality, depth: Depth, direction: Direction) -> bool {
        self.config.free_hits.iter().any(|f| f.matches(quality, depth, direction))
    }

    /// Fielder range shifts weight toward the easier buckets.
    pub fn sample_difficulty<R: Rng + ?Sized>(
        &self,
        quality: ContactQuality,
        fielding_n: f32,
        rng: &mut R,
    ) -> Result<Difficulty> {
        let row = self
            .config
            .difficulty_weights
            .get(&quality)
            .ok_or_else(|| SimError::Config(format!("no difficulty weights for {quality:?}")))?;

        let shift = (fielding_n - 0.5) * self.config.range_weight;
        let items: Vec<(Difficulty, f32)> = row
            .iter()
            .map(|(d, w)| {
                let factor = match d {
                    Difficulty::DirectlyAt | Difficulty::OneStep => 1.0 + shift,
                    _ => 1.0 - shift,
                };
                (*d, w * factor.max(0.0))
            })
            .collect();
        weighted_pick(rng, &items)
            .ok_or_else(|| SimError::Config(format!("empty difficulty weights for {quality:?}")))
    }

    pub fn catch_probability(
        &self,
        quality: ContactQuality,
        situation: Situation,
        difficulty: Difficulty,
        fielding_n: f32,
    ) -> f32 {
        let base = self
            .config
            .catch_rates
            .get(&quality)
            .and_then(|row| row.get(&situation))
            .copied()
            .unwrap_or(0.0);
        let modifier = self.config.difficulty_modifiers.get(&difficulty).copied().unwrap_or(1.0);
        scale(base * modifier, fielding_n, self.config.fielder_weight)
    }

    // ========== Hits ==========

    pub fn hit_type<R: Rng + ?Sized>(
        &self,
        depth: Depth,
        situation: Situation,
        batter_speed: f32,
        rng: &mut R,
    ) -> HitType {
        match (depth, situation) {
            (Depth::HomeRun, _) => HitType::HomeRun,
            (_, Situation::DeepGap) => {
                if roll(rng, scale(self.config.triple_rate, batter_speed, 1.0)) {
                    HitType::Triple
                } else {
                    HitType::Double
                }
            }
            (_, Situation::DeepOf | Situation::MiddleGap) => HitType::Double,
            _ => HitType::Single,
        }
    }

    fn hit_outcome<R: Rng + ?Sized>(
        &self,
        hit: HitType,
        depth: Depth,
        direction: Direction,
        ctx: &PlayContext<'_>,
        rng: &mut R,
    ) -> DefensiveOutcome {
        let batter = ctx.batter.id;
        let bases = ctx.bases;
        let extra_base =
            |runner: PlayerId, rng: &mut R| roll(rng, scale(self.config.extra_base_rate, ctx.runner_speed(runner), 1.0));

        let (next, scored) = match hit {
            HitType::HomeRun | HitType::Triple => batter_takes(bases, batter, hit.bases()),
            HitType::Double => {
                let mut scored: Vec<PlayerId> = [bases.third, bases.second].into_iter().flatten().collect();
                let mut next = Bases { second: Some(batter), ..Bases::empty() };
                if let Some(runner) = bases.first {
                    if extra_base(runner, rng) {
                        scored.push(runner);
                    } else {
                        next.third = Some(runner);
                    }
                }
                (next, scored)
            }
            HitType::Single if depth.is_outfield() => {
                let scored: Vec<PlayerId> = [bases.third, bases.second].into_iter().flatten().collect();
                let mut next = Bases { first: Some(batter), ..Bases::empty() };
                if let Some(runner) = bases.first {
                    let target = if extra_base(runner, rng) { Base::Third } else { Base::Second };
                    next.set(target, Some(runner));
                }
                (next, scored)
            }
            HitType::Single => force_batter(bases, batter),
        };

        let mut outcome = DefensiveOutcome::new(PlayKind::Hit { hit, depth, direction }, next);
        outcome.scored = scored;
        outcome
    }

    // ========== Errors ==========

    /// Batter reaches; everyone moves one base on an infield error, two on
    /// an outfield error.
    fn error_outcome(
        &self,
        fielder: Position,
        depth: Depth,
        direction: Direction,
        ctx: &PlayContext<'_>,
    ) -> DefensiveOutcome {
        let extra = if depth.is_outfield() { 2 } else { 1 };
        let (next, scored) = batter_takes(ctx.bases, ctx.batter.id, extra);
        let mut outcome = DefensiveOutcome::new(PlayKind::ReachedOnError { depth, direction }, next);
        outcome.scored = scored;
        outcome.errors = 1;
        outcome.actions.push(DefensiveAction::error(fielder));
        outcome
    }

    // ========== Outs ==========

    pub fn out_kind(quality: ContactQuality, depth: Depth) -> OutKind {
        if depth.is_outfield() {
            return match quality {
                q if q.is_hard() || q == ContactQuality::Burner => OutKind::Lineout,
                _ => OutKind::Flyout,
            };
        }
        match quality {
            q if q.is_ground_ball() => OutKind::Groundout,
            q if q.is_hard() || q == ContactQuality::Flare => OutKind::Lineout,
            _ => OutKind::Popout,
        }
    }

    fn out_outcome<R: Rng + ?Sized>(
        &self,
        quality: ContactQuality,
        depth: Depth,
        direction: Direction,
        fielder: Position,
        ctx: &PlayContext<'_>,
        rng: &mut R,
    ) -> DefensiveOutcome {
        let out = Self::out_kind(quality, depth);
        match out {
            OutKind::Groundout => self.ground_out(depth, direction, fielder, ctx, rng),
            OutKind::Flyout => self.fly_out(depth, direction, fielder, ctx, rng),
            OutKind::Lineout | OutKind::Popout => {
                let mut outcome = DefensiveOutcome::new(PlayKind::Out { out, depth, direction }, ctx.bases);
                outcome.outs = 1;
                outcome.actions.push(DefensiveAction::putout(fielder));
                outcome
            }
        }
    }

    /// Groundout. With a runner on first it may turn two, even with two out.
    fn ground_out<R: Rng + ?Sized>(
        &self,
        depth: Depth,
        direction: Direction,
        fielder: Position,
        ctx: &PlayContext<'_>,
        rng: &mut R,
    ) -> DefensiveOutcome {
        let bases = ctx.bases;
        let batter_speed = ctx.runner_speed(ctx.batter.id);

        if bases.first.is_some()
            && roll(rng, scale(self.config.double_play_rate, 1.0 - batter_speed, 1.0))
        {
            let mut lead = Bases { first: None, ..bases };
            let mut scored = Vec::new();
            if !ctx.ends_half(2) {
                (lead, scored) = advance_all(lead, 1);
            }
            let pivot = if fielder == Position::Shortstop { Position::SecondBase } else { Position::Shortstop };

            let mut outcome = DefensiveOutcome::new(PlayKind::DoublePlay { depth, direction }, lead);
            outcome.scored = scored;
            outcome.outs = 2;
            outcome.actions.extend([
                DefensiveAction::assist(fielder),
                DefensiveAction::putout(pivot),
                DefensiveAction::assist(pivot),
                DefensiveAction::putout(Position::FirstBase),
            ]);
            return outcome;
        }

        let kind = PlayKind::Out { out: OutKind::Groundout, depth, direction };
        let mut outcome = if ctx.ends_half(1) {
            DefensiveOutcome::new(kind, bases)
        } else {
            // Batter is retired at first; runners he forced move up.
            let (mut next, scored) = force_batter(bases, ctx.batter.id);
            next.first = None;
            let mut outcome = DefensiveOutcome::new(kind, next);
            outcome.scored = scored;
            outcome
        };
        outcome.outs = 1;
        if fielder == Position::FirstBase {
            outcome.actions.push(DefensiveAction::putout(fielder));
        } else {
            outcome.actions.push(DefensiveAction::assist(fielder));
            outcome.actions.push(DefensiveAction::putout(Position::FirstBase));
        }
        outcome
    }

    /// Fly ball caught. A deep or mid-depth fly scores a tagging runner from
    /// third with fewer than two out.
    fn fly_out<R: Rng + ?Sized>(
        &self,
        depth: Depth,
        direction: Direction,
        fielder: Position,
        ctx: &PlayContext<'_>,
        rng: &mut R,
    ) -> DefensiveOutcome {
        let mut outcome =
            DefensiveOutcome::new(PlayKind::Out { out: OutKind::Flyout, depth, direction }, ctx.bases);
        outcome.outs = 1;
        outcome.actions.push(DefensiveAction::putout(fielder));

        let deep_enough = matches!(depth, Depth::DeepOf | Depth::MiddleOf);
        if let Some(runner) = ctx.bases.third {
            if deep_enough
                && !ctx.ends_half(1)
                && roll(rng, scale(self.config.sac_fly_rate, ctx.runner_speed(runner), 1.0))
            {
                outcome.kind = PlayKind::SacrificeFly { depth, direction };
                outcome.bases.third = None;
                outcome.scored.push(runner);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::BaselineConfig;
    use crate::engine::test_fixtures::{fixture_teams, fixture_rng};
    use crate::models::Credit;
    use std::collections::BTreeMap;

    fn ctx<'a>(batter: &'a Player, offense: &'a Team, defense: &'a Team, bases: Bases, outs: u8) -> PlayContext<'a> {
        PlayContext { batter, offense, defense, bases, outs, outs_per_half: 3, speed_weight: 0.6 }
    }

    #[test]
    fn test_barrel_deep_of_uncatchable_scores_runners_with_two_out() {
        let mut cfg = BaselineConfig::default().batted_ball;
        cfg.catch_rates.insert(ContactQuality::Barrel, BTreeMap::new());
        let resolver = BattedBallResolver::new(&cfg);
        let (away, home) = fixture_teams();
        let batter = away.get(away.current_batter()).unwrap();
        let (r2, r3) = (away.batting_order[1], away.batting_order[2]);
        let bases = Bases { first: None, second: Some(r2), third: Some(r3) };
        let mut rng = fixture_rng();

        for _ in 0..50 {
            let outcome = resolver
                .resolve_landing(ContactQuality::Barrel, Depth::DeepOf, Direction::Center, &ctx(batter, &away, &home, bases, 2), &mut rng)
                .unwrap();
            assert!(matches!(outcome.kind, PlayKind::Hit { hit: HitType::Double, .. }));
            assert_eq!(outcome.scored, vec![r3, r2]);
            assert_eq!(outcome.bases, Bases { first: None, second: Some(batter.id), third: None });
            assert_eq!(outcome.outs, 0);
        }
    }

    #[test]
    fn test_home_run_depth_skips_fielding() {
        let cfg = BaselineConfig::default().batted_ball;
        let resolver = BattedBallResolver::new(&cfg);
        let (away, home) = fixture_teams();
        let batter = away.get(away.current_batter()).unwrap();
        let runner = away.batting_order[3];
        let bases = Bases { first: Some(runner), ..Bases::empty() };
        let outcome = resolver
            .resolve_landing(ContactQuality::Barrel, Depth::HomeRun, Direction::Left, &ctx(batter, &away, &home, bases, 1), &mut fixture_rng())
            .unwrap();
        assert_eq!(outcome.scored, vec![runner, batter.id]);
        assert!(outcome.bases.is_empty());
        assert!(outcome.actions.is_empty());
    }

    #[test]
    fn test_primary_is_best_fielder() {
        let cfg = BaselineConfig::default().batted_ball;
        let resolver = BattedBallResolver::new(&cfg);
        let (_, mut home) = fixture_teams();

        // Tie keeps table order: LF listed first at deep left-center
        let tie = resolver.assignment(Depth::DeepOf, Direction::LeftCenter, &home).unwrap();
        assert_eq!(tie.primary, Position::LeftField);
        assert_eq!(tie.backups, vec![Position::CenterField]);

        let cf = home.fielder(Position::CenterField).unwrap();
        home.get_mut(cf).unwrap().fielding.fielding = 90;
        let better = resolver.assignment(Depth::DeepOf, Direction::LeftCenter, &home).unwrap();
        assert_eq!(better.primary, Position::CenterField);
    }

    #[test]
    fn test_wildcard_alignment_and_missing_mapping() {
        let mut cfg = BaselineConfig::default().batted_ball;
        let (_, home) = fixture_teams();
        let resolver = BattedBallResolver::new(&cfg);
        let mound = resolver.assignment(Depth::Mound, Direction::Right, &home).unwrap();
        assert_eq!(mound.primary, Position::Pitcher);

        cfg.alignment.retain(|e| e.depth != Depth::DeepIf);
        let resolver = BattedBallResolver::new(&cfg);
        assert_eq!(
            resolver.assignment(Depth::DeepIf, Direction::Left, &home),
            Err(SimError::NoFielderMapping { depth: Depth::DeepIf, direction: Direction::Left })
        );
    }

    #[test]
    fn test_free_hit_always_drops() {
        let mut cfg = BaselineConfig::default().batted_ball;
        for row in cfg.catch_rates.values_mut() {
            for rate in row.values_mut() {
                *rate = 1.0;
            }
        }
        let resolver = BattedBallResolver::new(&cfg);
        let (away, home) = fixture_teams();
        let batter = away.get(away.current_batter()).unwrap();
        let mut rng = fixture_rng();
        for _ in 0..20 {
            let outcome = resolver
                .resolve_landing(ContactQuality::Flare, Depth::ShallowOf, Direction::LeftCenter, &ctx(batter, &away, &home, Bases::empty(), 0), &mut rng)
                .unwrap();
            assert!(matches!(outcome.kind, PlayKind::Hit { hit: HitType::Single, .. }));
        }
    }

    #[test]
    fn test_battery_ball_is_out_unless_error() {
        let mut cfg = BaselineConfig::default().batted_ball;
        cfg.error_rate = 0.0;
        cfg.double_play_rate = 0.0;
        let (away, home) = fixture_teams();
        let batter = away.get(away.current_batter()).unwrap();
        let mut rng = fixture_rng();

        let clean = BattedBallResolver::new(&cfg);
        for _ in 0..20 {
            let outcome = clean
                .resolve_landing(ContactQuality::Topped, Depth::Mound, Direction::Center, &ctx(batter, &away, &home, Bases::empty(), 0), &mut rng)
                .unwrap();
            assert!(matches!(outcome.kind, PlayKind::Out { out: OutKind::Groundout, .. }));
            assert_eq!(outcome.outs, 1);
            assert_eq!(
                outcome.actions,
                vec![DefensiveAction::assist(Position::Pitcher), DefensiveAction::putout(Position::FirstBase)]
            );
        }

        // Average fielders with a certain base rate always misplay
        cfg.error_rate = 1.0;
        let sloppy = BattedBallResolver::new(&cfg);
        for (depth, fielder) in [(Depth::Mound, Position::Pitcher), (Depth::Catcher, Position::Catcher)] {
            for _ in 0..20 {
                let outcome = sloppy
                    .resolve_landing(ContactQuality::Weak, depth, Direction::Center, &ctx(batter, &away, &home, Bases::empty(), 0), &mut rng)
                    .unwrap();
                assert!(matches!(outcome.kind, PlayKind::ReachedOnError { .. }), "{depth:?}: {:?}", outcome.kind);
                assert_eq!(outcome.outs, 0);
                assert_eq!(outcome.errors, 1);
                assert_eq!(outcome.bases, Bases { first: Some(batter.id), ..Bases::empty() });
                assert_eq!(outcome.actions, vec![DefensiveAction::error(fielder)]);
            }
        }
    }

    #[test]
    fn test_double_play_with_two_out_overshoots() {
        let mut cfg = BaselineConfig::default().batted_ball;
        cfg.double_play_rate = 1.0;
        cfg.error_rate = 0.0;
        let resolver = BattedBallResolver::new(&cfg);
        let (mut away, home) = fixture_teams();
        let batter_id = away.current_batter();
        away.get_mut(batter_id).unwrap().batting.speed = 0;
        away.get_mut(batter_id).unwrap().batting.baserunning = 0;
        let batter = away.get(batter_id).unwrap();
        let runner = away.batting_order[4];
        let bases = Bases { first: Some(runner), ..Bases::empty() };

        let outcome = resolver
            .resolve_landing(ContactQuality::Topped, Depth::Mound, Direction::Center, &ctx(batter, &away, &home, bases, 2), &mut fixture_rng())
            .unwrap();
        assert!(matches!(outcome.kind, PlayKind::DoublePlay { .. }));
        assert_eq!(outcome.outs, 2);
        assert!(outcome.bases.is_empty());
        assert!(outcome.scored.is_empty());
        let putouts = outcome.actions.iter().filter(|a| a.credit == Credit::Putout).count();
        assert_eq!(putouts, 2);
    }

    #[test]
    fn test_groundout_moves_forced_runner() {
        let mut cfg = BaselineConfig::default().batted_ball;
        cfg.double_play_rate = 0.0;
        cfg.error_rate = 0.0;
        let resolver = BattedBallResolver::new(&cfg);
        let (away, home) = fixture_teams();
        let batter = away.get(away.current_batter()).unwrap();
        let (r1, r3) = (away.batting_order[5], away.batting_order[6]);
        let bases = Bases { first: Some(r1), second: None, third: Some(r3) };
        let outcome = resolver
            .resolve_landing(ContactQuality::Weak, Depth::Catcher, Direction::Center, &ctx(batter, &away, &home, bases, 0), &mut fixture_rng())
            .unwrap();
        assert_eq!(outcome.bases, Bases { first: None, second: Some(r1), third: Some(r3) });
        assert!(outcome.scored.is_empty());
    }

    #[test]
    fn test_sac_fly_scores_runner_from_third() {
        let mut cfg = BaselineConfig::default().batted_ball;
        cfg.sac_fly_rate = 1.0;
        cfg.error_rate = 0.0;
        for row in cfg.catch_rates.values_mut() {
            for rate in row.values_mut() {
                *rate = 1.0;
            }
        }
        cfg.difficulty_modifiers.insert(Difficulty::ThreeStep, 1.0);
        cfg.difficulty_modifiers.insert(Difficulty::TwoStep, 1.0);
        let resolver = BattedBallResolver::new(&cfg);
        let (mut away, home) = fixture_teams();
        let runner = away.batting_order[2];
        away.get_mut(runner).unwrap().batting.speed = 100;
        away.get_mut(runner).unwrap().batting.baserunning = 100;
        let batter = away.get(away.current_batter()).unwrap();
        let bases = Bases { third: Some(runner), ..Bases::empty() };

        let outcome = resolver
            .resolve_landing(ContactQuality::Under, Depth::DeepOf, Direction::Center, &ctx(batter, &away, &home, bases, 1), &mut fixture_rng())
            .unwrap();
        assert!(matches!(outcome.kind, PlayKind::SacrificeFly { .. }));
        assert_eq!(outcome.scored, vec![runner]);
        assert_eq!(outcome.outs, 1);

        // No sac fly on the third out
        let outcome = resolver
            .resolve_landing(ContactQuality::Under, Depth::DeepOf, Direction::Center, &ctx(batter, &away, &home, bases, 2), &mut fixture_rng())
            .unwrap();
        assert!(matches!(outcome.kind, PlayKind::Out { out: OutKind::Flyout, .. }));
        assert!(outcome.scored.is_empty());
    }

    #[test]
    fn test_outfield_error_moves_everyone_two() {
        let mut cfg = BaselineConfig::default().batted_ball;
        cfg.error_rate = 1.0;
        for row in cfg.catch_rates.values_mut() {
            for rate in row.values_mut() {
                *rate = 1.0;
            }
        }
        for d in Difficulty::ROLLED {
            cfg.difficulty_modifiers.insert(d, 1.0);
        }
        let resolver = BattedBallResolver::new(&cfg);
        let (away, mut home) = fixture_teams();
        let cf = home.fielder(Position::CenterField).unwrap();
        home.get_mut(cf).unwrap().fielding.fielding = 0;
        let batter = away.get(away.current_batter()).unwrap();
        let r1 = away.batting_order[7];
        let bases = Bases { first: Some(r1), ..Bases::empty() };

        let outcome = resolver
            .resolve_landing(ContactQuality::Under, Depth::MiddleOf, Direction::Center, &ctx(batter, &away, &home, bases, 0), &mut fixture_rng())
            .unwrap();
        assert!(matches!(outcome.kind, PlayKind::ReachedOnError { .. }));
        assert_eq!(outcome.bases, Bases { first: None, second: Some(batter.id), third: Some(r1) });
        assert_eq!(outcome.errors, 1);
        assert_eq!(outcome.actions, vec![DefensiveAction::error(Position::CenterField)]);
    }

    #[test]
    fn test_out_kinds() {
        assert_eq!(BattedBallResolver::out_kind(ContactQuality::Under, Depth::DeepOf), OutKind::Flyout);
        assert_eq!(BattedBallResolver::out_kind(ContactQuality::Solid, Depth::MiddleOf), OutKind::Lineout);
        assert_eq!(BattedBallResolver::out_kind(ContactQuality::Topped, Depth::MiddleIf), OutKind::Groundout);
        assert_eq!(BattedBallResolver::out_kind(ContactQuality::Under, Depth::Catcher), OutKind::Popout);
    }

    #[test]
    fn test_catch_probability_respects_difficulty() {
        let cfg = BaselineConfig::default().batted_ball;
        let resolver = BattedBallResolver::new(&cfg);
        let easy = resolver.catch_probability(ContactQuality::Solid, Situation::MiddleOf, Difficulty::DirectlyAt, 0.5);
        let hard = resolver.catch_probability(ContactQuality::Solid, Situation::MiddleOf, Difficulty::ThreeStep, 0.5);
        let auto = resolver.catch_probability(ContactQuality::Solid, Situation::MiddleOf, Difficulty::AutomaticHit, 0.5);
        assert!(easy > hard);
        assert_eq!(auto, 0.0);
    }
}
