//! Player API handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use draftroom_core::{scoring::with_points, Player, PlayerWithPoints};

use super::error::ApiError;
use crate::state::AppState;

/// List every player in catalog order.
pub async fn list_players(State(state): State<Arc<AppState>>) -> Json<Vec<Player>> {
    let ledger = state.orchestrator().ledger().read().await;
    Json(ledger.list_players().to_vec())
}

/// List undrafted players with their computed points.
pub async fn list_available(State(state): State<Arc<AppState>>) -> Json<Vec<PlayerWithPoints>> {
    let ledger = state.orchestrator().ledger().read().await;
    Json(with_points(state.scorer(), &ledger.list_available()))
}

/// Get a single player
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let ledger = state.orchestrator().ledger().read().await;
    ledger
        .get_player(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("player not found: {}", id)))
}
