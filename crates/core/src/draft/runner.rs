//! Draft orchestrator implementation.
//!
//! All draft and ledger mutations happen while holding the single draft
//! state lock, so API-triggered picks, timer ticks and the delayed autodraft
//! are serialized against each other. The ledger lock is only ever taken
//! after the draft lock.

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::ledger::{SharedLedger, Team};
use crate::metrics::{
    DRAFTS_COMPLETED, DRAFTS_STARTED, PICKS_TOTAL, PICK_DURATION, PICK_REJECTIONS,
    TIMER_EXPIRATIONS,
};
use crate::player::Player;
use crate::selection::{can_draft_position, SelectionPolicy, DEFAULT_SUGGESTIONS};

use super::config::DraftConfig;
use super::events::DraftEventSink;
use super::timer::TimerSlot;
use super::types::{Draft, DraftError, DraftSnapshot, DraftStatus, Pick};

/// Mutable draft state, guarded by the orchestrator lock.
#[derive(Default)]
struct DraftState {
    /// `None` while pending.
    draft: Option<Draft>,
    /// Monotonic start of the current pick.
    pick_started: Option<Instant>,
    timer: TimerSlot,
}

struct Inner {
    config: DraftConfig,
    ledger: SharedLedger,
    policy: Arc<dyn SelectionPolicy>,
    sink: Arc<dyn DraftEventSink>,
    state: Mutex<DraftState>,
}

enum Tick {
    Continue,
    Stop,
}

/// The draft state machine: lifecycle, pick timer and pick validation.
///
/// Cheap to clone; clones share the same draft.
#[derive(Clone)]
pub struct DraftOrchestrator {
    inner: Arc<Inner>,
}

impl DraftOrchestrator {
    /// Create an orchestrator over an existing ledger. No draft is started.
    pub fn new(
        config: DraftConfig,
        ledger: SharedLedger,
        policy: Arc<dyn SelectionPolicy>,
        sink: Arc<dyn DraftEventSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                ledger,
                policy,
                sink,
                state: Mutex::new(DraftState::default()),
            }),
        }
    }

    pub fn config(&self) -> &DraftConfig {
        &self.inner.config
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.inner.ledger
    }

    /// Reset the ledger and start a new active draft with a running timer.
    ///
    /// Valid from any state; a running draft is discarded along with its
    /// timer and any pending autodraft.
    pub async fn start_draft(&self, seconds_per_pick: u64) -> Draft {
        let inner = &self.inner;
        let mut state = inner.state.lock().await;
        let mut ledger = inner.ledger.write().await;

        state.timer.cancel();
        ledger.reset_all();
        let draft = Draft::new(ledger.team_ids(), seconds_per_pick);
        drop(ledger);

        state.draft = Some(draft.clone());
        state.pick_started = Some(Instant::now());
        inner.start_timer(&mut state);

        DRAFTS_STARTED.inc();
        info!(
            draft_id = %draft.id,
            seconds_per_pick,
            teams = draft.draft_order.len(),
            "Draft started"
        );
        draft
    }

    /// Draft `player_id` onto `team_id`.
    pub async fn attempt_pick(&self, team_id: &str, player_id: &str) -> Result<Pick, DraftError> {
        let mut state = self.inner.state.lock().await;
        self.inner
            .pick_locked(&mut state, team_id, player_id, false)
            .await
            .inspect_err(record_rejection)
    }

    /// Let the selection policy pick for the designated team.
    pub async fn autodraft(&self) -> Result<Pick, DraftError> {
        let mut state = self.inner.state.lock().await;
        self.inner
            .autodraft_locked(&mut state)
            .await
            .inspect_err(record_rejection)
    }

    /// Stop the timer, drop the draft and reset the ledger.
    pub async fn reset_draft(&self) {
        let inner = &self.inner;
        let mut state = inner.state.lock().await;
        let mut ledger = inner.ledger.write().await;

        state.timer.cancel();
        state.draft = None;
        state.pick_started = None;
        ledger.reset_all();

        info!("Draft reset");
    }

    /// Return a rostered player to the pool.
    pub async fn release_player(&self, team_id: &str, player_id: &str) -> Result<(), DraftError> {
        let _state = self.inner.state.lock().await;
        let mut ledger = self.inner.ledger.write().await;
        ledger.unassign_player_from_team(team_id, player_id)?;
        info!("Released {} from {}", player_id, team_id);
        Ok(())
    }

    /// Current draft, or `None` while pending.
    pub async fn status(&self) -> Option<Draft> {
        self.inner.state.lock().await.draft.clone()
    }

    /// Team whose turn it is, while the draft is active.
    pub async fn current_team(&self) -> Option<Team> {
        let state = self.inner.state.lock().await;
        let draft = state.draft.as_ref().filter(|d| d.is_active())?;
        let team_id = draft.team_on_the_clock()?;
        self.inner.ledger.read().await.get_team(team_id).cloned()
    }

    /// Recommended picks for a team.
    pub async fn suggest(&self, team_id: &str) -> Result<Vec<Player>, DraftError> {
        let ledger = self.inner.ledger.read().await;
        let team = ledger
            .get_team(team_id)
            .ok_or_else(|| DraftError::TeamNotFound(team_id.to_string()))?;
        let available = ledger.list_available();
        Ok(self.inner.policy.suggest(team, &available, DEFAULT_SUGGESTIONS))
    }

    /// Consistent view of the draft and every roster.
    pub async fn snapshot(&self) -> DraftSnapshot {
        let state = self.inner.state.lock().await;
        let ledger = self.inner.ledger.read().await;
        let current_team = state
            .draft
            .as_ref()
            .filter(|d| d.is_active())
            .and_then(|d| d.team_on_the_clock())
            .and_then(|id| ledger.team_view(id));

        DraftSnapshot {
            draft: state.draft.clone(),
            teams: ledger.team_views(),
            current_team,
            available_players: ledger.available_count(),
        }
    }

    /// Whether a timer tick or a post-timeout autodraft is scheduled.
    pub async fn is_timer_running(&self) -> bool {
        let state = self.inner.state.lock().await;
        state.timer.is_ticking() || state.timer.has_pending_autodraft()
    }

    /// Cancel scheduled work without touching draft or ledger state.
    pub async fn shutdown(&self) {
        self.inner.state.lock().await.timer.cancel();
        debug!("Draft timer cancelled for shutdown");
    }
}

fn record_rejection(err: &DraftError) {
    debug!("Pick rejected: {}", err);
    PICK_REJECTIONS.with_label_values(&[err.kind().as_str()]).inc();
}

impl Inner {
    /// Replace any running timer with a fresh one for the current pick.
    fn start_timer(self: &Arc<Self>, state: &mut DraftState) {
        let generation = state.timer.cancel();
        let handle = tokio::spawn(run_ticker(
            Arc::downgrade(self),
            generation,
            self.config.tick_interval(),
        ));
        state.timer.set_ticker(handle);
    }

    fn complete_locked(&self, state: &mut DraftState) {
        state.timer.cancel();
        if let Some(draft) = state.draft.as_mut() {
            draft.status = DraftStatus::Completed;
            DRAFTS_COMPLETED.inc();
            info!(draft_id = %draft.id, picks = draft.picks.len(), "Draft completed");
            self.sink.on_completed(draft);
        }
    }

    async fn pick_locked(
        self: &Arc<Self>,
        state: &mut DraftState,
        team_id: &str,
        player_id: &str,
        automatic: bool,
    ) -> Result<Pick, DraftError> {
        match state.draft.as_ref() {
            None => return Err(DraftError::NoDraft),
            Some(d) if !d.is_active() => return Err(DraftError::NotActive { status: d.status }),
            Some(_) => {}
        }

        let (player_name, roster_size) = {
            let mut ledger = self.ledger.write().await;
            let team = ledger
                .get_team(team_id)
                .ok_or_else(|| DraftError::TeamNotFound(team_id.to_string()))?;
            let player = ledger
                .get_player(player_id)
                .ok_or_else(|| DraftError::PlayerNotFound(player_id.to_string()))?;
            if player.is_drafted {
                return Err(DraftError::AlreadyDrafted(player_id.to_string()));
            }
            if !can_draft_position(team, player.position) {
                return Err(DraftError::PositionFull {
                    team_id: team_id.to_string(),
                    position: player.position,
                });
            }
            let player_name = player.name.clone();

            ledger.assign_player_to_team(team_id, player_id)?;
            let roster_size = ledger.get_team(team_id).map(Team::roster_size).unwrap_or(0);
            (player_name, roster_size)
        };

        let on_clock = state.pick_started.map(|s| s.elapsed()).unwrap_or_default();
        let now = Utc::now();
        let Some(draft) = state.draft.as_mut() else {
            return Err(DraftError::NoDraft);
        };
        let pick = Pick {
            pick_number: draft.current_pick,
            team_id: team_id.to_string(),
            player_id: player_id.to_string(),
            player_name,
            timestamp: now,
            is_automatic: automatic,
        };
        draft.picks.push(pick.clone());
        draft.current_pick += 1;
        draft.current_pick_start_time = now;
        state.pick_started = Some(Instant::now());

        let mode = if automatic { "automatic" } else { "manual" };
        PICKS_TOTAL.with_label_values(&[mode]).inc();
        PICK_DURATION
            .with_label_values(&[mode])
            .observe(on_clock.as_secs_f64());
        info!(
            pick_number = pick.pick_number,
            team_id = %pick.team_id,
            player = %pick.player_name,
            automatic,
            "Pick made"
        );
        self.sink.on_pick(&pick, draft);

        if roster_size >= self.config.roster_capacity {
            self.complete_locked(state);
        } else {
            self.start_timer(state);
        }

        Ok(pick)
    }

    async fn autodraft_locked(self: &Arc<Self>, state: &mut DraftState) -> Result<Pick, DraftError> {
        match state.draft.as_ref() {
            None => return Err(DraftError::NoDraft),
            Some(d) if !d.is_active() => return Err(DraftError::NotActive { status: d.status }),
            Some(_) => {}
        }

        let team_id = self.config.designated_team_id.as_str();
        let candidate = {
            let ledger = self.ledger.read().await;
            let team = ledger
                .get_team(team_id)
                .ok_or_else(|| DraftError::TeamNotFound(team_id.to_string()))?;
            let available = ledger.list_available();
            self.policy.select_best(team, &available)
        };

        let Some(player) = candidate else {
            debug!("Autodraft found no available players");
            return Err(DraftError::EmptyPool);
        };

        info!("Autodrafting {} for {}", player.name, team_id);
        self.pick_locked(state, team_id, &player.id, true).await
    }

    async fn on_tick(self: &Arc<Self>, state: &mut DraftState, generation: u64) -> Tick {
        let (seconds_per_pick, expected_pick) = match state.draft.as_ref() {
            Some(d) if d.is_active() => (d.seconds_per_pick, d.current_pick),
            _ => {
                state.timer.detach_ticker();
                return Tick::Stop;
            }
        };

        let team = self
            .ledger
            .read()
            .await
            .get_team(&self.config.designated_team_id)
            .cloned();
        let Some(team) = team else {
            warn!(
                "Designated team {} not in league, stopping pick timer",
                self.config.designated_team_id
            );
            state.timer.detach_ticker();
            return Tick::Stop;
        };

        if team.roster_size() >= self.config.roster_capacity {
            state.timer.detach_ticker();
            self.complete_locked(state);
            return Tick::Stop;
        }

        let elapsed = state.pick_started.map(|s| s.elapsed()).unwrap_or_default();
        let remaining = Duration::from_secs(seconds_per_pick).saturating_sub(elapsed);
        debug!(remaining_secs = remaining.as_secs(), "Pick timer tick");
        self.sink.on_timer_tick(remaining.as_secs(), &team);

        if !remaining.is_zero() {
            return Tick::Continue;
        }

        state.timer.detach_ticker();
        TIMER_EXPIRATIONS.inc();
        info!(
            "Time expired for {}, autodraft in {:?}",
            team.id,
            self.config.autodraft_delay()
        );
        self.sink.on_time_expired(&team);

        let handle = tokio::spawn(run_delayed_autodraft(
            Arc::downgrade(self),
            generation,
            expected_pick,
            self.config.autodraft_delay(),
        ));
        state.timer.set_pending_autodraft(handle);
        Tick::Stop
    }
}

async fn run_ticker(weak: Weak<Inner>, generation: u64, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let mut state = inner.state.lock().await;
        if !state.timer.is_current(generation) {
            return;
        }
        if let Tick::Stop = inner.on_tick(&mut state, generation).await {
            return;
        }
    }
}

async fn run_delayed_autodraft(
    weak: Weak<Inner>,
    generation: u64,
    expected_pick: u32,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut state = inner.state.lock().await;
    if !state.timer.is_current(generation) {
        debug!("Discarding stale autodraft");
        return;
    }
    state.timer.detach_autodraft();

    let still_on_clock = state
        .draft
        .as_ref()
        .is_some_and(|d| d.is_active() && d.current_pick == expected_pick);
    if !still_on_clock {
        debug!("Pick {} already made, skipping autodraft", expected_pick);
        return;
    }

    match inner.autodraft_locked(&mut state).await {
        Ok(pick) => debug!("Timeout autodraft made pick {}", pick.pick_number),
        Err(e) => debug!("Timeout autodraft made no pick: {}", e),
    }
}
