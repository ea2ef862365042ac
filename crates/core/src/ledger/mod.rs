//! Roster ledger: owner of player and team state during a draft session.

mod config;
#[allow(clippy::module_inception)]
mod ledger;
mod types;

pub use config::{LeagueConfig, TeamSeed};
pub use ledger::{RosterLedger, SharedLedger};
pub use types::{LedgerError, Team, TeamView};
