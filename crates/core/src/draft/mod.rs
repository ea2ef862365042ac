//! Draft orchestration.
//!
//! The orchestrator owns the draft lifecycle (pending -> active ->
//! completed), the per-pick countdown and the pick transaction against the
//! roster ledger. When the designated team's clock runs out it picks on the
//! team's behalf through the selection policy.

mod config;
mod events;
mod runner;
mod timer;
mod types;

pub use config::DraftConfig;
pub use events::{DraftEvent, DraftEventSink, NoopEventSink};
pub use runner::DraftOrchestrator;
pub use types::{Draft, DraftError, DraftSnapshot, DraftStatus, ErrorKind, Pick};
