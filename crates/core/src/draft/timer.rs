//! Bookkeeping for the pick timer and the post-timeout autodraft.
//!
//! Every spawned callback captures the generation current at spawn time and
//! checks it again under the draft lock before acting. Cancelling bumps the
//! generation, so a callback that slipped past `abort` still becomes a no-op.

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    generation: u64,
    ticker: Option<JoinHandle<()>>,
    pending_autodraft: Option<JoinHandle<()>>,
}

impl TimerSlot {
    /// Abort any live ticker or pending autodraft and invalidate their
    /// generation. Returns the new generation.
    pub(crate) fn cancel(&mut self) -> u64 {
        self.generation += 1;
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
        if let Some(handle) = self.pending_autodraft.take() {
            handle.abort();
        }
        self.generation
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub(crate) fn set_ticker(&mut self, handle: JoinHandle<()>) {
        self.ticker = Some(handle);
    }

    pub(crate) fn set_pending_autodraft(&mut self, handle: JoinHandle<()>) {
        self.pending_autodraft = Some(handle);
    }

    /// Forget the ticker handle without aborting it. Called by the ticker
    /// task itself before it exits or triggers a cancel.
    pub(crate) fn detach_ticker(&mut self) {
        self.ticker.take();
    }

    /// Same as `detach_ticker`, for the delayed autodraft task.
    pub(crate) fn detach_autodraft(&mut self) {
        self.pending_autodraft.take();
    }

    pub(crate) fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub(crate) fn has_pending_autodraft(&self) -> bool {
        self.pending_autodraft.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_bumps_generation_and_aborts() {
        let mut slot = TimerSlot::default();
        let first = slot.cancel();

        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        slot.set_ticker(handle);
        assert!(slot.is_ticking());
        assert!(slot.is_current(first));

        let second = slot.cancel();
        assert_ne!(first, second);
        assert!(!slot.is_current(first));
        assert!(!slot.is_ticking());
    }

    #[tokio::test]
    async fn test_detach_keeps_generation() {
        let mut slot = TimerSlot::default();
        let generation = slot.cancel();
        slot.set_pending_autodraft(tokio::spawn(async {}));

        slot.detach_autodraft();
        assert!(!slot.has_pending_autodraft());
        assert!(slot.is_current(generation));
    }
}
