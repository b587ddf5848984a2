//! Ball/strike count processing
//!
//! Pure function of (count, pitch result, rules). Fouls only add a strike
//! while strikes < limit - 1.

use serde::{Deserialize, Serialize};

use super::game_state::Count;
use super::pitch::{BattedBall, PitchResult, StrikeKind};
use crate::models::Rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatVerdict {
    Continue,
    Strikeout { swinging: bool },
    Walk,
    HitByPitch,
    InPlay(BattedBall),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountUpdate {
    /// Count after the pitch (not reset; the state machine does that)
    pub count: Count,
    pub verdict: AtBatVerdict,
}

pub fn process_pitch(count: Count, result: &PitchResult, rules: &Rules) -> CountUpdate {
    let mut next = count;
    let verdict = match result {
        PitchResult::Ball => {
            next.balls += 1;
            if next.balls >= rules.balls_for_walk {
                AtBatVerdict::Walk
            } else {
                AtBatVerdict::Continue
            }
        }
        PitchResult::Strike(StrikeKind::Foul) => {
            if next.strikes.saturating_add(1) < rules.strikes_for_strikeout {
                next.strikes += 1;
            }
            AtBatVerdict::Continue
        }
        PitchResult::Strike(kind) => {
            next.strikes += 1;
            if next.strikes >= rules.strikes_for_strikeout {
                AtBatVerdict::Strikeout { swinging: *kind == StrikeKind::Swinging }
            } else {
                AtBatVerdict::Continue
            }
        }
        PitchResult::HitByPitch => AtBatVerdict::HitByPitch,
        PitchResult::InPlay(ball) => AtBatVerdict::InPlay(*ball),
    };
    CountUpdate { count: next, verdict }
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_pitch() -> impl Strategy<Value = PitchResult> {
        prop_oneof![
            Just(PitchResult::Ball),
            Just(PitchResult::Strike(StrikeKind::Called)),
            Just(PitchResult::Strike(StrikeKind::Swinging)),
            Just(PitchResult::Strike(StrikeKind::Foul)),
        ]
    }

    proptest! {
        /// An unresolved at-bat never reaches either limit.
        #[test]
        fn prop_continuing_count_stays_below_limits(pitches in prop::collection::vec(any_pitch(), 1..40)) {
            let rules = Rules::default();
            let mut count = Count::default();
            for pitch in &pitches {
                let update = process_pitch(count, pitch, &rules);
                if update.verdict != AtBatVerdict::Continue {
                    break;
                }
                prop_assert!(update.count.balls < rules.balls_for_walk);
                prop_assert!(update.count.strikes < rules.strikes_for_strikeout);
                count = update.count;
            }
        }

        /// Fouls never end an at-bat.
        #[test]
        fn prop_foul_never_ends_at_bat(balls in 0u8..4, strikes in 0u8..3) {
            let update = process_pitch(
                Count::new(balls, strikes),
                &PitchResult::Strike(StrikeKind::Foul),
                &Rules::default(),
            );
            prop_assert_eq!(update.verdict, AtBatVerdict::Continue);
        }
    }
}
