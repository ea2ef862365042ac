//! Draft orchestrator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the draft orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Default time limit per pick (seconds) when a start request gives none.
    #[serde(default = "default_seconds_per_pick")]
    pub seconds_per_pick: u64,

    /// Period of the pick timer tick (milliseconds).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Pause between a pick timing out and the automatic selection (milliseconds).
    #[serde(default = "default_autodraft_delay")]
    pub autodraft_delay_ms: u64,

    /// Roster size at which the draft completes.
    #[serde(default = "default_roster_capacity")]
    pub roster_capacity: usize,

    /// Team driven by the pick timer and picked for on timeout.
    #[serde(default = "default_designated_team")]
    pub designated_team_id: String,
}

fn default_seconds_per_pick() -> u64 {
    60
}

fn default_tick_interval() -> u64 {
    1000 // 1 second
}

fn default_autodraft_delay() -> u64 {
    1000 // 1 second
}

fn default_roster_capacity() -> usize {
    11
}

fn default_designated_team() -> String {
    "team-1".to_string()
}

impl DraftConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn autodraft_delay(&self) -> Duration {
        Duration::from_millis(self.autodraft_delay_ms)
    }
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            seconds_per_pick: default_seconds_per_pick(),
            tick_interval_ms: default_tick_interval(),
            autodraft_delay_ms: default_autodraft_delay(),
            roster_capacity: default_roster_capacity(),
            designated_team_id: default_designated_team(),
        }
    }
}
