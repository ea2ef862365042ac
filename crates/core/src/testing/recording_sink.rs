//! Event sink that records every notification.

use std::sync::Mutex;

use crate::draft::{Draft, DraftEvent, DraftEventSink, Pick};
use crate::ledger::Team;

/// Recording implementation of the DraftEventSink trait.
///
/// Uses a blocking mutex since sink callbacks are synchronous.
///
/// # Example
///
/// ```rust,ignore
/// use draftroom_core::testing::RecordingEventSink;
///
/// let sink = Arc::new(RecordingEventSink::new());
/// let orchestrator = DraftOrchestrator::new(config, ledger, policy, sink.clone());
///
/// orchestrator.start_draft(60).await;
/// orchestrator.attempt_pick("team-1", "c-1").await?;
///
/// assert_eq!(sink.picks().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<DraftEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: DraftEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Every event received so far, oldest first.
    pub fn events(&self) -> Vec<DraftEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Event type names, oldest first.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events().iter().map(DraftEvent::event_type).collect()
    }

    pub fn picks(&self) -> Vec<Pick> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DraftEvent::Pick { pick, .. } => Some(pick),
                _ => None,
            })
            .collect()
    }

    /// Remaining seconds reported by each timer tick.
    pub fn ticks(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                DraftEvent::TimerTick { remaining_secs, .. } => Some(remaining_secs),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event_type: &str) -> usize {
        self.event_types()
            .into_iter()
            .filter(|t| *t == event_type)
            .count()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl DraftEventSink for RecordingEventSink {
    fn on_pick(&self, pick: &Pick, draft: &Draft) {
        self.push(DraftEvent::Pick {
            pick: pick.clone(),
            draft: draft.clone(),
        });
    }

    fn on_timer_tick(&self, remaining_secs: u64, team: &Team) {
        self.push(DraftEvent::TimerTick {
            remaining_secs,
            team: team.clone(),
        });
    }

    fn on_time_expired(&self, team: &Team) {
        self.push(DraftEvent::TimeExpired { team: team.clone() });
    }

    fn on_completed(&self, draft: &Draft) {
        self.push(DraftEvent::Completed {
            draft: draft.clone(),
        });
    }
}
