use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::player::{Player, PlayerId, Position};
use crate::error::{Result, SimError};

/// Home/away label. Batting and pitching sides are derived from the half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Away,
    Home,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Away => TeamSide::Home,
            TeamSide::Home => TeamSide::Away,
        }
    }

    pub fn index(self) -> usize {
        match self {
            TeamSide::Away => 0,
            TeamSide::Home => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub players: Vec<Player>,
    pub batting_order: Vec<PlayerId>,
    /// Index into `batting_order` of the current/next batter
    #[serde(default)]
    pub order_index: usize,
    pub pitcher: PlayerId,
    /// Fixed defensive assignments; the pitcher slot is taken from `pitcher`.
    pub defense: BTreeMap<Position, PlayerId>,
}

impl Team {
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| SimError::InvalidTeam { team: self.id.clone(), reason };

        if self.batting_order.is_empty() {
            return Err(invalid("batting order is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for p in &self.players {
            if !seen.insert(p.id) {
                return Err(invalid(format!("duplicate player id {}", p.id)));
            }
        }

        for id in &self.batting_order {
            if !seen.contains(id) {
                return Err(invalid(format!("batting order references unknown player {id}")));
            }
        }

        let pitcher = self.get(self.pitcher)?;
        if !pitcher.is_pitcher() {
            return Err(SimError::NotAPitcher(self.pitcher));
        }

        for pos in Position::FIELDING.iter().filter(|p| **p != Position::Pitcher) {
            let id = self.defense.get(pos).ok_or_else(|| SimError::MissingPosition {
                team: self.id.clone(),
                position: *pos,
            })?;
            self.get(*id)?;
        }

        Ok(())
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn get(&self, id: PlayerId) -> Result<&Player> {
        self.player(id).ok_or(SimError::UnknownPlayer(id))
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.player_mut(id).ok_or(SimError::UnknownPlayer(id))
    }

    pub fn current_batter(&self) -> PlayerId {
        self.batting_order[self.order_index % self.batting_order.len()]
    }

    pub fn advance_order(&mut self) {
        self.order_index = (self.order_index + 1) % self.batting_order.len();
    }

    /// Player id at a defensive position.
    pub fn fielder(&self, position: Position) -> Result<PlayerId> {
        if position == Position::Pitcher {
            return Ok(self.pitcher);
        }
        self.defense
            .get(&position)
            .copied()
            .ok_or_else(|| SimError::MissingPosition { team: self.id.clone(), position })
    }

    pub fn catcher(&self) -> Result<&Player> {
        self.get(self.fielder(Position::Catcher)?)
    }

    pub fn current_pitcher(&self) -> Result<&Player> {
        self.get(self.pitcher)
    }

    /// Reset lineup pointer and per-game player state.
    pub fn reset_for_game(&mut self) {
        self.order_index = 0;
        for p in &mut self.players {
            p.reset_game_state();
        }
    }
}
