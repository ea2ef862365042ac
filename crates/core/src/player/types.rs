//! Player, position and statistics types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Player identifier as it appears in the catalog.
pub type PlayerId = String;

/// Roster category a player is eligible for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "IF")]
    Infield,
    #[serde(rename = "OF")]
    Outfield,
    #[serde(rename = "P")]
    Pitcher,
}

impl Position {
    /// All positions in canonical order.
    pub const ALL: [Position; 4] = [
        Position::Catcher,
        Position::Infield,
        Position::Outfield,
        Position::Pitcher,
    ];

    /// Short code used on the wire ("C", "IF", "OF", "P").
    pub fn code(&self) -> &'static str {
        match self {
            Position::Catcher => "C",
            Position::Infield => "IF",
            Position::Outfield => "OF",
            Position::Pitcher => "P",
        }
    }

    pub fn is_pitcher(&self) -> bool {
        matches!(self, Position::Pitcher)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A count per position.
///
/// Used both for a team's current position counts and for the league's
/// per-position maximums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionCounts {
    #[serde(rename = "C", default)]
    pub catcher: u32,
    #[serde(rename = "IF", default)]
    pub infield: u32,
    #[serde(rename = "OF", default)]
    pub outfield: u32,
    #[serde(rename = "P", default)]
    pub pitcher: u32,
}

impl PositionCounts {
    pub fn new(catcher: u32, infield: u32, outfield: u32, pitcher: u32) -> Self {
        Self {
            catcher,
            infield,
            outfield,
            pitcher,
        }
    }

    pub fn get(&self, position: Position) -> u32 {
        match position {
            Position::Catcher => self.catcher,
            Position::Infield => self.infield,
            Position::Outfield => self.outfield,
            Position::Pitcher => self.pitcher,
        }
    }

    pub fn get_mut(&mut self, position: Position) -> &mut u32 {
        match position {
            Position::Catcher => &mut self.catcher,
            Position::Infield => &mut self.infield,
            Position::Outfield => &mut self.outfield,
            Position::Pitcher => &mut self.pitcher,
        }
    }

    pub fn total(&self) -> u32 {
        Position::ALL.iter().map(|p| self.get(*p)).sum()
    }
}

/// Season statistics. Missing fields deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    #[serde(alias = "battingAverage")]
    pub batting_average: f64,
    #[serde(alias = "homeRuns")]
    pub home_runs: f64,
    pub rbi: f64,
    #[serde(alias = "stolenBases")]
    pub stolen_bases: f64,
    pub era: f64,
    pub strikeouts: f64,
    pub wins: f64,
}

/// A draftable player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    /// Real-world club, informational only.
    #[serde(default)]
    pub mlb_team: String,
    #[serde(default)]
    pub stats: PlayerStats,
    /// Precomputed projection used to rank draft candidates.
    #[serde(default)]
    pub projected_points: f64,
    #[serde(default)]
    pub is_drafted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drafted_by: Option<String>,
}

impl Player {
    /// Create an undrafted player with empty stats.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        projected_points: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            mlb_team: String::new(),
            stats: PlayerStats::default(),
            projected_points,
            is_drafted: false,
            drafted_by: None,
        }
    }

    pub fn with_stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_mlb_team(mut self, team: impl Into<String>) -> Self {
        self.mlb_team = team.into();
        self
    }
}
