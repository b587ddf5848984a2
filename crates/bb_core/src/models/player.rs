use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable player identifier. Base slots and lineups refer to players by id,
/// the `Team` roster owns the actual `Player`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Defensive position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
    #[serde(rename = "DH")]
    DesignatedHitter,
}

impl Position {
    /// The nine positions that take the field.
    pub const FIELDING: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::DesignatedHitter => "DH",
        }
    }

    pub fn is_outfield(&self) -> bool {
        matches!(self, Position::LeftField | Position::CenterField | Position::RightField)
    }

    pub fn is_battery(&self) -> bool {
        matches!(self, Position::Pitcher | Position::Catcher)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    #[default]
    Right,
    Left,
    /// Bats from the side opposite the pitcher's throwing hand
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchType {
    Fastball,
    Sinker,
    Cutter,
    Slider,
    Curveball,
    Changeup,
    Splitter,
    Knuckleball,
}

/// Pitcher removal tendency. Read by fatigue management outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Leash {
    Short,
    #[default]
    Normal,
    Long,
}

fn average() -> u8 {
    50
}

fn full_energy() -> f32 {
    1.0
}

/// Hitting and running ratings (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingRatings {
    #[serde(default = "average")]
    pub contact: u8,
    #[serde(default = "average")]
    pub power: u8,
    #[serde(default = "average")]
    pub discipline: u8,
    #[serde(default = "average")]
    pub eye: u8,
    #[serde(default = "average")]
    pub speed: u8,
    #[serde(default = "average")]
    pub baserunning: u8,
    /// How often the runner tries to steal
    #[serde(default = "average")]
    pub steal_tendency: u8,
}

impl Default for BattingRatings {
    fn default() -> Self {
        Self {
            contact: 50,
            power: 50,
            discipline: 50,
            eye: 50,
            speed: 50,
            baserunning: 50,
            steal_tendency: 50,
        }
    }
}

/// Glove and arm ratings (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldingRatings {
    /// Range and glove work
    #[serde(default = "average")]
    pub fielding: u8,
    #[serde(default = "average")]
    pub throw_power: u8,
    #[serde(default = "average")]
    pub throw_accuracy: u8,
    /// Catcher transfer / pop time
    #[serde(default = "average")]
    pub catch_sequence: u8,
}

impl Default for FieldingRatings {
    fn default() -> Self {
        Self { fielding: 50, throw_power: 50, throw_accuracy: 50, catch_sequence: 50 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchingRatings {
    #[serde(default = "average")]
    pub control: u8,
    #[serde(default = "average")]
    pub accuracy: u8,
    /// Velocity + movement; suppresses contact and hard contact
    #[serde(default = "average")]
    pub stuff: u8,
    #[serde(default = "average")]
    pub pickoff: u8,
    #[serde(default = "average")]
    pub sequencing: u8,
    #[serde(default = "average")]
    pub stamina: u8,
    /// Ordered best pitch first; earlier entries are thrown more often.
    pub arsenal: Vec<PitchType>,
    #[serde(default)]
    pub leash: Leash,
}

impl Default for PitchingRatings {
    fn default() -> Self {
        Self {
            control: 50,
            accuracy: 50,
            stuff: 50,
            pickoff: 50,
            sequencing: 50,
            stamina: 50,
            arsenal: vec![PitchType::Fastball, PitchType::Slider, PitchType::Changeup],
            leash: Leash::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    Minor,
    Moderate,
    Severe,
}

/// Produced by an external injury collaborator and stored on the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryReport {
    pub description: String,
    pub severity: InjurySeverity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    pub plate_appearances: u16,
    pub at_bats: u16,
    pub hits: u16,
    pub doubles: u16,
    pub triples: u16,
    pub home_runs: u16,
    pub runs: u16,
    pub rbi: u16,
    pub walks: u16,
    pub hit_by_pitch: u16,
    pub strikeouts: u16,
    pub sacrifice_flies: u16,
    pub grounded_into_dp: u16,
    pub reached_on_error: u16,
    pub stolen_bases: u16,
    pub caught_stealing: u16,
    pub picked_off: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingLine {
    pub pitches: u16,
    pub batters_faced: u16,
    pub outs: u16,
    pub hits: u16,
    pub runs: u16,
    pub walks: u16,
    pub hit_batters: u16,
    pub strikeouts: u16,
    pub home_runs: u16,
    pub pickoffs: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldingLine {
    pub putouts: u16,
    pub assists: u16,
    pub errors: u16,
}

/// Per-game accumulators, read once at game end by the box-score layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub batting: BattingLine,
    pub pitching: PitchingLine,
    pub fielding: FieldingLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    #[serde(default)]
    pub bats: Hand,
    #[serde(default)]
    pub throws: Hand,
    #[serde(default)]
    pub batting: BattingRatings,
    #[serde(default)]
    pub fielding: FieldingRatings,
    #[serde(default)]
    pub pitching: Option<PitchingRatings>,

    // Mutable per-game state
    #[serde(default = "full_energy")]
    pub energy: f32,
    #[serde(default)]
    pub injury: Option<InjuryReport>,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: PlayerId(id),
            name: name.into(),
            position,
            bats: Hand::Right,
            throws: Hand::Right,
            batting: BattingRatings::default(),
            fielding: FieldingRatings::default(),
            pitching: None,
            energy: 1.0,
            injury: None,
            stats: PlayerStats::default(),
        }
    }

    pub fn with_pitching(mut self, pitching: PitchingRatings) -> Self {
        self.pitching = Some(pitching);
        self
    }

    pub fn is_pitcher(&self) -> bool {
        self.pitching.is_some()
    }

    pub fn is_injured(&self) -> bool {
        self.injury.is_some()
    }

    /// Side of the plate the batter stands on against `pitcher_throws`.
    pub fn batting_side(&self, pitcher_throws: Hand) -> Hand {
        match self.bats {
            Hand::Switch => match pitcher_throws {
                Hand::Left => Hand::Right,
                _ => Hand::Left,
            },
            side => side,
        }
    }

    /// Wipe the mutable per-game state before a new game.
    pub fn reset_game_state(&mut self) {
        self.energy = 1.0;
        self.stats = PlayerStats::default();
    }
}
