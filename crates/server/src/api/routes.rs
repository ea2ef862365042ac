use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{draft, handlers, leaderboard, middleware::metrics_middleware, players, teams, ws};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Players
        .route("/players", get(players::list_players))
        .route("/players/available", get(players::list_available))
        .route("/players/{id}", get(players::get_player))
        // Teams
        .route("/teams", get(teams::list_teams))
        .route("/teams/{id}", get(teams::get_team))
        .route("/teams/{id}/top5", get(teams::top_five))
        .route("/teams/{id}/points", get(teams::get_points))
        .route("/teams/{id}/remove-player", post(teams::remove_player))
        // Leaderboard
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        // Draft
        .route("/draft/start", post(draft::start_draft))
        .route("/draft/status", get(draft::get_status))
        .route("/draft/pick", post(draft::make_pick))
        .route("/draft/autodraft", post(draft::autodraft))
        .route("/draft/suggestions/{team_id}", get(draft::suggestions))
        .route("/draft/reset", post(draft::reset_draft))
        .route_layer(middleware::from_fn(metrics_middleware))
        .with_state(state.clone());

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
