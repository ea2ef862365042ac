//! Team types and ledger errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::TeamSeed;
use crate::player::{Player, PlayerId, Position, PositionCounts};

/// Errors returned by roster mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("team not found: {0}")]
    TeamNotFound(String),

    #[error("player not found: {0}")]
    PlayerNotFound(String),

    #[error("player already drafted: {0}")]
    AlreadyDrafted(String),

    #[error("team {team_id} has no open {position} slot")]
    PositionFull { team_id: String, position: Position },

    #[error("player {player_id} is not on team {team_id}")]
    NotOnRoster { team_id: String, player_id: String },
}

/// A fantasy team and its roster.
///
/// The roster holds player ids in pick order. `position_counts` always sums
/// to the roster length and never exceeds `max_positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub roster: Vec<PlayerId>,
    pub position_counts: PositionCounts,
    pub max_positions: PositionCounts,
}

impl Team {
    /// Empty team built from its league declaration.
    pub fn from_seed(seed: &TeamSeed, max_positions: PositionCounts) -> Self {
        Self {
            id: seed.id.clone(),
            name: seed.name.clone(),
            owner: seed.owner.clone(),
            roster: Vec::new(),
            position_counts: PositionCounts::default(),
            max_positions,
        }
    }

    pub fn roster_size(&self) -> usize {
        self.roster.len()
    }

    /// Remaining slots for a position.
    pub fn open_slots(&self, position: Position) -> u32 {
        self.max_positions
            .get(position)
            .saturating_sub(self.position_counts.get(position))
    }

    pub fn has_room_for(&self, position: Position) -> bool {
        self.position_counts.get(position) < self.max_positions.get(position)
    }
}

/// Team snapshot with roster ids resolved into players.
#[derive(Debug, Clone, Serialize)]
pub struct TeamView {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub roster: Vec<Player>,
    pub position_counts: PositionCounts,
    pub max_positions: PositionCounts,
}
