pub mod field;
pub mod play;
pub mod player;
pub mod result;
pub mod rules;
pub mod team;

pub use field::{
    Base, Bases, ContactQuality, Depth, Difficulty, Direction, HitType, OutKind, Situation,
};
pub use play::{
    Credit, DefensiveAction, DefensiveOutcome, Half, PlayKind, PlayLog, PlayRecord, PlayRecorder,
};
pub use player::{
    BattingLine, BattingRatings, FieldingLine, FieldingRatings, Hand, InjuryReport,
    InjurySeverity, Leash, PitchType, PitchingLine, PitchingRatings, Player, PlayerId,
    PlayerStats, Position,
};
pub use result::{GameResult, Score, TeamScore};
pub use rules::Rules;
pub use team::{Team, TeamSide};
