//! Types for the draft orchestrator.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::{LedgerError, TeamView};
use crate::player::Position;

/// Draft lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Pending,
    Active,
    Completed,
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DraftStatus::Pending => "pending",
            DraftStatus::Active => "active",
            DraftStatus::Completed => "completed",
        })
    }
}

/// A completed selection. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    /// 0-based, increasing within a draft.
    pub pick_number: u32,
    pub team_id: String,
    pub player_id: String,
    /// Player name at the time of the pick.
    pub player_name: String,
    pub timestamp: DateTime<Utc>,
    /// Whether the system made this pick on the team's behalf.
    pub is_automatic: bool,
}

/// One run of the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    pub status: DraftStatus,
    pub current_pick: u32,
    /// Turn order, cyclic.
    pub draft_order: Vec<String>,
    pub seconds_per_pick: u64,
    pub current_pick_start_time: DateTime<Utc>,
    pub picks: Vec<Pick>,
}

impl Draft {
    /// A fresh active draft with no picks.
    pub fn new(draft_order: Vec<String>, seconds_per_pick: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            status: DraftStatus::Active,
            current_pick: 0,
            draft_order,
            seconds_per_pick,
            current_pick_start_time: Utc::now(),
            picks: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DraftStatus::Active
    }

    /// Team whose turn it is in the rotation.
    pub fn team_on_the_clock(&self) -> Option<&str> {
        if self.draft_order.is_empty() {
            return None;
        }
        let idx = self.current_pick as usize % self.draft_order.len();
        Some(self.draft_order[idx].as_str())
    }
}

/// Broad error category, for callers mapping failures to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    RuleViolation,
    EmptyPool,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::RuleViolation => "rule_violation",
            ErrorKind::EmptyPool => "empty_pool",
        }
    }
}

/// Errors returned by draft operations.
///
/// None of these leave partial state behind: validation runs before any
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// No draft has been started (or it was reset).
    #[error("no draft has been started")]
    NoDraft,

    /// Draft exists but does not accept picks.
    #[error("draft is not active (status: {status})")]
    NotActive { status: DraftStatus },

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

    /// Automatic selection found nobody left to pick.
    #[error("no players available")]
    EmptyPool,
}

impl DraftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DraftError::NoDraft | DraftError::NotActive { .. } => ErrorKind::InvalidState,
            DraftError::TeamNotFound(_) | DraftError::PlayerNotFound(_) => ErrorKind::NotFound,
            DraftError::AlreadyDrafted(_)
            | DraftError::PositionFull { .. }
            | DraftError::NotOnRoster { .. } => ErrorKind::RuleViolation,
            DraftError::EmptyPool => ErrorKind::EmptyPool,
        }
    }
}

impl From<LedgerError> for DraftError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::TeamNotFound(id) => DraftError::TeamNotFound(id),
            LedgerError::PlayerNotFound(id) => DraftError::PlayerNotFound(id),
            LedgerError::AlreadyDrafted(id) => DraftError::AlreadyDrafted(id),
            LedgerError::PositionFull { team_id, position } => {
                DraftError::PositionFull { team_id, position }
            }
            LedgerError::NotOnRoster { team_id, player_id } => {
                DraftError::NotOnRoster { team_id, player_id }
            }
        }
    }
}

/// Everything a client needs to render the draft room.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSnapshot {
    pub draft: Option<Draft>,
    pub teams: Vec<TeamView>,
    pub current_team: Option<TeamView>,
    pub available_players: usize,
}
