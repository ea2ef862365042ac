//! League configuration: the fixed set of teams and position limits.

use serde::{Deserialize, Serialize};

use crate::player::PositionCounts;

/// A team as declared in the league configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeed {
    pub id: String,
    pub name: String,
    pub owner: String,
}

impl TeamSeed {
    pub fn new(id: impl Into<String>, name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: owner.into(),
        }
    }
}

/// League layout. Teams are listed in draft order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default = "default_teams")]
    pub teams: Vec<TeamSeed>,

    /// Maximum players per position on any roster.
    #[serde(default = "default_max_positions")]
    pub max_positions: PositionCounts,
}

fn default_teams() -> Vec<TeamSeed> {
    ["Alpha", "Beta", "Gamma", "Delta"]
        .iter()
        .enumerate()
        .map(|(i, name)| {
            TeamSeed::new(
                format!("team-{}", i + 1),
                format!("Team {}", name),
                format!("User {}", i + 1),
            )
        })
        .collect()
}

fn default_max_positions() -> PositionCounts {
    PositionCounts::new(1, 4, 3, 3)
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            teams: default_teams(),
            max_positions: default_max_positions(),
        }
    }
}
