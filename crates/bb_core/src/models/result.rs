use serde::{Deserialize, Serialize};

use super::team::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub away: u16,
    pub home: u16,
}

impl Score {
    pub fn get(&self, side: TeamSide) -> u16 {
        match side {
            TeamSide::Away => self.away,
            TeamSide::Home => self.home,
        }
    }

    pub fn add(&mut self, side: TeamSide, runs: u16) {
        match side {
            TeamSide::Away => self.away += runs,
            TeamSide::Home => self.home += runs,
        }
    }

    pub fn leader(&self) -> Option<TeamSide> {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScore {
    pub id: String,
    pub score: u16,
}

/// Terminal result of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub home: TeamScore,
    pub away: TeamScore,
    /// Winning team id
    pub winner: String,
    pub innings: u8,
}
