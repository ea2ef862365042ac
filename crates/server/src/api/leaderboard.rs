//! Leaderboard API handler.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use draftroom_core::{scoring::team_points, Player, TeamView};

use crate::state::AppState;

/// One leaderboard row
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub team_id: String,
    pub team_name: String,
    pub owner: String,
    pub total_points: f64,
    pub player_count: usize,
    pub roster: Vec<Player>,
}

/// Rank teams by total points. Ties keep draft order.
pub fn rank_teams(scored: Vec<(TeamView, f64)>) -> Vec<LeaderboardEntry> {
    let mut scored = scored;
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, (team, total_points))| LeaderboardEntry {
            rank: i + 1,
            player_count: team.roster.len(),
            team_id: team.id,
            team_name: team.name,
            owner: team.owner,
            total_points,
            roster: team.roster,
        })
        .collect()
}

/// Get teams ranked by points
pub async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Json<Vec<LeaderboardEntry>> {
    let teams = state.orchestrator().ledger().read().await.team_views();
    let scored = teams
        .into_iter()
        .map(|t| {
            let points = team_points(state.scorer(), &t.roster);
            (t, points)
        })
        .collect();
    Json(rank_teams(scored))
}
