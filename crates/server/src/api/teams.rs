//! Team API handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use draftroom_core::{
    scoring::{team_points, top_players},
    PlayerWithPoints, TeamView,
};

use super::error::ApiError;
use crate::state::AppState;

/// Size of a team's highlight list.
const TOP_PLAYERS: usize = 5;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Team with its roster and current points
#[derive(Debug, Serialize)]
pub struct TeamDetailResponse {
    #[serde(flatten)]
    pub team: TeamView,
    pub total_points: f64,
    pub calculated_at: DateTime<Utc>,
}

/// Points summary for a team
#[derive(Debug, Serialize)]
pub struct TeamPointsResponse {
    pub team_id: String,
    pub team_name: String,
    pub total_points: f64,
    pub player_count: usize,
}

/// Request body for removing a player from a roster
#[derive(Debug, Deserialize)]
pub struct RemovePlayerBody {
    pub player_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn team_view(state: &AppState, id: &str) -> Result<TeamView, ApiError> {
    let ledger = state.orchestrator().ledger().read().await;
    ledger
        .team_view(id)
        .ok_or_else(|| ApiError::not_found(format!("team not found: {}", id)))
}

/// List all teams in draft order
pub async fn list_teams(State(state): State<Arc<AppState>>) -> Json<Vec<TeamView>> {
    let ledger = state.orchestrator().ledger().read().await;
    Json(ledger.team_views())
}

/// Get a team with roster and points
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeamDetailResponse>, ApiError> {
    let team = team_view(&state, &id).await?;
    let total_points = team_points(state.scorer(), &team.roster);
    Ok(Json(TeamDetailResponse {
        team,
        total_points,
        calculated_at: Utc::now(),
    }))
}

/// Get a team's best players by points
pub async fn top_five(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<PlayerWithPoints>>, ApiError> {
    let team = team_view(&state, &id).await?;
    Ok(Json(top_players(state.scorer(), &team.roster, TOP_PLAYERS)))
}

/// Get a team's point total
pub async fn get_points(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TeamPointsResponse>, ApiError> {
    let team = team_view(&state, &id).await?;
    Ok(Json(TeamPointsResponse {
        total_points: team_points(state.scorer(), &team.roster),
        player_count: team.roster.len(),
        team_id: team.id,
        team_name: team.name,
    }))
}

/// Return a rostered player to the pool
pub async fn remove_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<RemovePlayerBody>, JsonRejection>,
) -> Result<Json<TeamView>, ApiError> {
    let Json(body) = body?;
    state
        .orchestrator()
        .release_player(&id, &body.player_id)
        .await?;
    Ok(Json(team_view(&state, &id).await?))
}
