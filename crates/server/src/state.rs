use std::sync::Arc;

use draftroom_core::{
    Config, DraftOrchestrator, NeedBasedPolicy, Player, RosterLedger, Scorer, StatLineScorer,
};

use crate::api::WsBroadcaster;

/// Shared application state
pub struct AppState {
    config: Config,
    orchestrator: DraftOrchestrator,
    scorer: Arc<dyn Scorer>,
    ws_broadcaster: WsBroadcaster,
}

impl AppState {
    pub fn new(
        config: Config,
        orchestrator: DraftOrchestrator,
        scorer: Arc<dyn Scorer>,
        ws_broadcaster: WsBroadcaster,
    ) -> Self {
        Self {
            config,
            orchestrator,
            scorer,
            ws_broadcaster,
        }
    }

    /// Wire a ledger, orchestrator and WebSocket sink around a loaded player pool.
    pub fn build(config: Config, players: Vec<Player>) -> Self {
        let ws_broadcaster = WsBroadcaster::default();
        let ledger = RosterLedger::new(players, config.league.clone()).shared();
        let orchestrator = DraftOrchestrator::new(
            config.draft.clone(),
            ledger,
            Arc::new(NeedBasedPolicy),
            Arc::new(ws_broadcaster.clone()),
        );
        Self::new(config, orchestrator, Arc::new(StatLineScorer), ws_broadcaster)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> &DraftOrchestrator {
        &self.orchestrator
    }

    pub fn scorer(&self) -> &dyn Scorer {
        self.scorer.as_ref()
    }

    pub fn ws_broadcaster(&self) -> &WsBroadcaster {
        &self.ws_broadcaster
    }
}
