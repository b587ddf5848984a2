//! Field vocabulary: bases, batted-ball landing zones and contact categories.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

// ============================================================================
// Bases
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    pub const ALL: [Base; 3] = [Base::First, Base::Second, Base::Third];

    /// Next base toward home. `None` means the runner scores.
    pub fn next(self) -> Option<Base> {
        match self {
            Base::First => Some(Base::Second),
            Base::Second => Some(Base::Third),
            Base::Third => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Base::First => 0,
            Base::Second => 1,
            Base::Third => 2,
        }
    }

    pub fn from_index(idx: usize) -> Option<Base> {
        Base::ALL.get(idx).copied()
    }
}

/// Base occupancy. One slot per base, so at most one runner per base holds
/// by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bases {
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
    pub third: Option<PlayerId>,
}

impl Bases {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, base: Base) -> Option<PlayerId> {
        match base {
            Base::First => self.first,
            Base::Second => self.second,
            Base::Third => self.third,
        }
    }

    pub fn set(&mut self, base: Base, runner: Option<PlayerId>) {
        match base {
            Base::First => self.first = runner,
            Base::Second => self.second = runner,
            Base::Third => self.third = runner,
        }
    }

    pub fn take(&mut self, base: Base) -> Option<PlayerId> {
        let runner = self.get(base);
        self.set(base, None);
        runner
    }

    pub fn is_occupied(&self, base: Base) -> bool {
        self.get(base).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none()
    }

    pub fn count(&self) -> usize {
        Base::ALL.iter().filter(|b| self.is_occupied(**b)).count()
    }

    /// Occupied bases, lead runner first.
    pub fn runners_lead_first(&self) -> Vec<(Base, PlayerId)> {
        Base::ALL.iter().rev().filter_map(|b| self.get(*b).map(|id| (*b, id))).collect()
    }
}

// ============================================================================
// Batted balls
// ============================================================================

/// Quality of contact on a ball put in play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ContactQuality {
    Barrel,
    Solid,
    Flare,
    Burner,
    Under,
    Topped,
    Weak,
}

impl ContactQuality {
    pub const ALL: [ContactQuality; 7] = [
        ContactQuality::Barrel,
        ContactQuality::Solid,
        ContactQuality::Flare,
        ContactQuality::Burner,
        ContactQuality::Under,
        ContactQuality::Topped,
        ContactQuality::Weak,
    ];

    pub fn is_hard(self) -> bool {
        matches!(self, ContactQuality::Barrel | ContactQuality::Solid)
    }

    pub fn is_ground_ball(self) -> bool {
        matches!(self, ContactQuality::Burner | ContactQuality::Topped | ContactQuality::Weak)
    }
}

/// Spray direction, described for the defense (left field = third-base side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    LeftCenter,
    Center,
    RightCenter,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Left,
        Direction::LeftCenter,
        Direction::Center,
        Direction::RightCenter,
        Direction::Right,
    ];

    pub fn is_gap(self) -> bool {
        matches!(self, Direction::LeftCenter | Direction::RightCenter)
    }

    /// Mirror image across the center line (pull side of a left-handed batter).
    pub fn mirrored(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::LeftCenter => Direction::RightCenter,
            Direction::Center => Direction::Center,
            Direction::RightCenter => Direction::LeftCenter,
            Direction::Right => Direction::Left,
        }
    }
}

/// Effective landing zone of a batted ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    HomeRun,
    DeepOf,
    MiddleOf,
    ShallowOf,
    DeepIf,
    MiddleIf,
    ShallowIf,
    Mound,
    Catcher,
}

impl Depth {
    pub const ALL: [Depth; 9] = [
        Depth::HomeRun,
        Depth::DeepOf,
        Depth::MiddleOf,
        Depth::ShallowOf,
        Depth::DeepIf,
        Depth::MiddleIf,
        Depth::ShallowIf,
        Depth::Mound,
        Depth::Catcher,
    ];

    pub fn is_outfield(self) -> bool {
        matches!(self, Depth::DeepOf | Depth::MiddleOf | Depth::ShallowOf)
    }

    pub fn is_battery(self) -> bool {
        matches!(self, Depth::Mound | Depth::Catcher)
    }
}

/// Composite depth+direction key for catch-rate lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    DeepGap,
    DeepOf,
    MiddleGap,
    MiddleOf,
    ShallowOf,
    DeepIf,
    RoutineIf,
    ShallowIf,
    Mound,
    Catcher,
}

impl Situation {
    /// Situations with a catch roll. Balls at the mound or plate are always
    /// fielded; only the error roll applies to them.
    pub const ROLLED: [Situation; 8] = [
        Situation::DeepGap,
        Situation::DeepOf,
        Situation::MiddleGap,
        Situation::MiddleOf,
        Situation::ShallowOf,
        Situation::DeepIf,
        Situation::RoutineIf,
        Situation::ShallowIf,
    ];

    /// `None` for home runs, which never reach a fielder.
    pub fn from_landing(depth: Depth, direction: Direction) -> Option<Situation> {
        let situation = match depth {
            Depth::HomeRun => return None,
            Depth::DeepOf if direction.is_gap() => Situation::DeepGap,
            Depth::DeepOf => Situation::DeepOf,
            Depth::MiddleOf if direction.is_gap() => Situation::MiddleGap,
            Depth::MiddleOf => Situation::MiddleOf,
            Depth::ShallowOf => Situation::ShallowOf,
            Depth::DeepIf => Situation::DeepIf,
            Depth::MiddleIf => Situation::RoutineIf,
            Depth::ShallowIf => Situation::ShallowIf,
            Depth::Mound => Situation::Mound,
            Depth::Catcher => Situation::Catcher,
        };
        Some(situation)
    }
}

/// How far the fielder has to go to make the play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    DirectlyAt,
    OneStep,
    TwoStep,
    ThreeStep,
    AutomaticHit,
}

impl Difficulty {
    /// Buckets that are rolled; `AutomaticHit` only comes from the free-hit table.
    pub const ROLLED: [Difficulty; 4] =
        [Difficulty::DirectlyAt, Difficulty::OneStep, Difficulty::TwoStep, Difficulty::ThreeStep];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitType {
    Single,
    Double,
    Triple,
    HomeRun,
}

impl HitType {
    pub fn bases(self) -> u8 {
        match self {
            HitType::Single => 1,
            HitType::Double => 2,
            HitType::Triple => 3,
            HitType::HomeRun => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutKind {
    Groundout,
    Flyout,
    Lineout,
    Popout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_base_next_walks_home() {
        assert_eq!(Base::First.next(), Some(Base::Second));
        assert_eq!(Base::Second.next(), Some(Base::Third));
        assert_eq!(Base::Third.next(), None);
    }

    #[test]
    fn test_bases_runners_lead_first() {
        let bases = Bases { first: Some(PlayerId(1)), second: None, third: Some(PlayerId(3)) };
        assert_eq!(
            bases.runners_lead_first(),
            vec![(Base::Third, PlayerId(3)), (Base::First, PlayerId(1))]
        );
        assert_eq!(bases.count(), 2);
    }

    #[test]
    fn test_situation_covers_every_fieldable_depth() {
        for depth in Depth::iter() {
            for direction in Direction::iter() {
                let situation = Situation::from_landing(depth, direction);
                assert_eq!(situation.is_none(), depth == Depth::HomeRun);
            }
        }
        assert_eq!(
            Situation::from_landing(Depth::DeepOf, Direction::LeftCenter),
            Some(Situation::DeepGap)
        );
        assert_eq!(
            Situation::from_landing(Depth::MiddleIf, Direction::Center),
            Some(Situation::RoutineIf)
        );
    }

    #[test]
    fn test_direction_mirror_is_involution() {
        for d in Direction::iter() {
            assert_eq!(d.mirrored().mirrored(), d);
        }
    }

    #[test]
    fn test_situation_serde_names() {
        assert_eq!(serde_json::to_string(&Situation::DeepGap).unwrap(), "\"deep_gap\"");
        assert_eq!(serde_json::to_string(&Situation::RoutineIf).unwrap(), "\"routine_if\"");
        assert_eq!(serde_json::to_string(&Depth::DeepOf).unwrap(), "\"deep_of\"");
    }
}
