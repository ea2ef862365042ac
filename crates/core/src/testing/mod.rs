//! Testing utilities for draft scenarios.
//!
//! Provides a recording event sink and fixtures for building a league,
//! a player pool and a ready-to-use orchestrator without any I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use draftroom_core::testing::fixtures;
//!
//! let (orchestrator, sink) = fixtures::orchestrator(fixtures::player_pool(2, 5, 4, 4));
//! orchestrator.start_draft(60).await;
//! ```

mod recording_sink;

pub use recording_sink::RecordingEventSink;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::sync::Arc;

    use super::RecordingEventSink;
    use crate::draft::{DraftConfig, DraftOrchestrator};
    use crate::ledger::{LeagueConfig, RosterLedger};
    use crate::player::{Player, Position};
    use crate::selection::NeedBasedPolicy;

    /// Create a player with reasonable defaults.
    pub fn player(id: &str, position: Position, projected_points: f64) -> Player {
        Player::new(id, format!("Player {}", id), position, projected_points)
    }

    /// A pool with the given number of players per position.
    ///
    /// Ids are `<code>-<n>` in lowercase (`c-1`, `if-3`, ...). Within a
    /// position, projections decrease with `n`, so `c-1` is the best catcher.
    pub fn player_pool(
        catchers: usize,
        infield: usize,
        outfield: usize,
        pitchers: usize,
    ) -> Vec<Player> {
        let mut players = Vec::new();
        for (position, count, base) in [
            (Position::Catcher, catchers, 200.0),
            (Position::Infield, infield, 300.0),
            (Position::Outfield, outfield, 250.0),
            (Position::Pitcher, pitchers, 280.0),
        ] {
            for n in 1..=count {
                let id = format!("{}-{}", position.code().to_lowercase(), n);
                players.push(player(&id, position, base - n as f64 * 10.0));
            }
        }
        players
    }

    /// Draft config with the given pick time and default pacing.
    pub fn draft_config(seconds_per_pick: u64) -> DraftConfig {
        DraftConfig {
            seconds_per_pick,
            ..DraftConfig::default()
        }
    }

    /// Orchestrator over the default four-team league with a recording sink.
    pub fn orchestrator(players: Vec<Player>) -> (DraftOrchestrator, Arc<RecordingEventSink>) {
        orchestrator_with(players, LeagueConfig::default(), DraftConfig::default())
    }

    /// Orchestrator with explicit league and draft configuration.
    pub fn orchestrator_with(
        players: Vec<Player>,
        league: LeagueConfig,
        config: DraftConfig,
    ) -> (DraftOrchestrator, Arc<RecordingEventSink>) {
        let sink = Arc::new(RecordingEventSink::new());
        let ledger = RosterLedger::new(players, league).shared();
        let orchestrator =
            DraftOrchestrator::new(config, ledger, Arc::new(NeedBasedPolicy), sink.clone());
        (orchestrator, sink)
    }
}
