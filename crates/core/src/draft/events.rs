//! Draft event notification.

use serde::Serialize;

use super::types::{Draft, Pick};
use crate::ledger::Team;

/// Receiver of draft state transitions.
///
/// Called while the orchestrator holds its state lock, so implementations
/// must not block: hand the event off (channel, broadcast) and return.
pub trait DraftEventSink: Send + Sync {
    fn on_pick(&self, pick: &Pick, draft: &Draft);

    fn on_timer_tick(&self, remaining_secs: u64, team: &Team);

    fn on_time_expired(&self, team: &Team);

    fn on_completed(&self, draft: &Draft);
}

/// Owned form of a sink notification.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftEvent {
    Pick { pick: Pick, draft: Draft },
    TimerTick { remaining_secs: u64, team: Team },
    TimeExpired { team: Team },
    Completed { draft: Draft },
}

impl DraftEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            DraftEvent::Pick { .. } => "pick",
            DraftEvent::TimerTick { .. } => "timer_tick",
            DraftEvent::TimeExpired { .. } => "time_expired",
            DraftEvent::Completed { .. } => "completed",
        }
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl DraftEventSink for NoopEventSink {
    fn on_pick(&self, _pick: &Pick, _draft: &Draft) {}
    fn on_timer_tick(&self, _remaining_secs: u64, _team: &Team) {}
    fn on_time_expired(&self, _team: &Team) {}
    fn on_completed(&self, _draft: &Draft) {}
}
