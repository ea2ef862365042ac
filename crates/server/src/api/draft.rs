//! Draft API handlers.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use draftroom_core::{Draft, Pick, Player, Team, TeamView};

use super::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for starting a draft. The body itself is optional.
#[derive(Debug, Default, Deserialize)]
pub struct StartDraftBody {
    /// Falls back to the configured default.
    pub seconds_per_pick: Option<u64>,
}

/// Request body for a manual pick
#[derive(Debug, Deserialize)]
pub struct PickBody {
    pub team_id: String,
    pub player_id: String,
}

/// Response for starting a draft
#[derive(Debug, Serialize)]
pub struct StartDraftResponse {
    pub draft: Draft,
    pub current_team: Option<Team>,
    pub teams: Vec<TeamView>,
}

/// Response for draft status
#[derive(Debug, Serialize)]
pub struct DraftStatusResponse {
    pub draft: Draft,
    pub current_team: Option<Team>,
    pub available_players: usize,
}

/// Response for manual and automatic picks
#[derive(Debug, Serialize)]
pub struct PickResponse {
    pub pick: Pick,
    pub draft: Option<Draft>,
    pub current_team: Option<Team>,
}

/// Simple message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Start a new draft, discarding any draft in progress
pub async fn start_draft(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<StartDraftResponse>, ApiError> {
    let body: StartDraftBody = if body.is_empty() {
        StartDraftBody::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("invalid request body: {}", e)))?
    };

    let seconds_per_pick = body
        .seconds_per_pick
        .unwrap_or(state.config().draft.seconds_per_pick);
    if seconds_per_pick == 0 {
        return Err(ApiError::bad_request(
            "seconds_per_pick must be greater than 0",
        ));
    }

    let orchestrator = state.orchestrator();
    let draft = orchestrator.start_draft(seconds_per_pick).await;
    let current_team = orchestrator.current_team().await;
    let teams = orchestrator.ledger().read().await.team_views();

    Ok(Json(StartDraftResponse {
        draft,
        current_team,
        teams,
    }))
}

/// Get the current draft
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DraftStatusResponse>, ApiError> {
    let snapshot = state.orchestrator().snapshot().await;
    let draft = snapshot
        .draft
        .ok_or_else(|| ApiError::not_found("no draft has been started"))?;
    let current_team = state.orchestrator().current_team().await;

    Ok(Json(DraftStatusResponse {
        draft,
        current_team,
        available_players: snapshot.available_players,
    }))
}

/// Make a manual pick
pub async fn make_pick(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PickBody>, JsonRejection>,
) -> Result<Json<PickResponse>, ApiError> {
    let Json(body) = body?;
    let orchestrator = state.orchestrator();
    let pick = orchestrator
        .attempt_pick(&body.team_id, &body.player_id)
        .await?;
    pick_response(&state, pick).await
}

/// Let the selection policy pick for the designated team
pub async fn autodraft(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PickResponse>, ApiError> {
    let pick = state.orchestrator().autodraft().await?;
    pick_response(&state, pick).await
}

async fn pick_response(state: &AppState, pick: Pick) -> Result<Json<PickResponse>, ApiError> {
    let orchestrator = state.orchestrator();
    Ok(Json(PickResponse {
        pick,
        draft: orchestrator.status().await,
        current_team: orchestrator.current_team().await,
    }))
}

/// Get suggested players for a team
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<Player>>, ApiError> {
    Ok(Json(state.orchestrator().suggest(&team_id).await?))
}

/// Reset the draft back to pending
pub async fn reset_draft(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.orchestrator().reset_draft().await;
    info!("Draft reset via API");
    Json(MessageResponse {
        message: "Draft reset successfully".to_string(),
    })
}
