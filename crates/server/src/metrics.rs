//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the draft server:
//! - HTTP request metrics (latency, counts)
//! - WebSocket connection metrics
//! - Draft progress gauges (collected dynamically)
//!
//! Draft counters owned by the core crate are registered here as well.

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

use draftroom_core::DraftStatus;

use crate::state::AppState;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "draftroom_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("draftroom_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "draftroom_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// WebSocket Metrics
// =============================================================================

/// Active WebSocket connections.
pub static WS_CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "draftroom_ws_connections_active",
        "Number of active WebSocket connections",
    )
    .unwrap()
});

/// Total WebSocket connections (cumulative).
pub static WS_CONNECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "draftroom_ws_connections_total",
        "Total WebSocket connections since startup",
    )
    .unwrap()
});

/// WebSocket messages sent by type.
pub static WS_MESSAGES_SENT: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("draftroom_ws_messages_sent_total", "WebSocket messages sent"),
        &["type"],
    )
    .unwrap()
});

/// WebSocket lag events (when client falls behind).
pub static WS_LAG_EVENTS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "draftroom_ws_lag_events_total",
        "WebSocket lag events (client fell behind)",
    )
    .unwrap()
});

// =============================================================================
// Draft Metrics (collected dynamically)
// =============================================================================

/// Whether a draft is active (1) or not (0).
pub static DRAFT_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("draftroom_draft_active", "Whether a draft is active (1) or not (0)").unwrap()
});

/// Current pick number of the draft.
pub static DRAFT_CURRENT_PICK: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("draftroom_draft_current_pick", "Current pick number").unwrap()
});

/// Undrafted players left in the pool.
pub static PLAYERS_AVAILABLE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "draftroom_players_available",
        "Number of players not yet drafted",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // WebSocket
    registry
        .register(Box::new(WS_CONNECTIONS_ACTIVE.clone()))
        .unwrap();
    registry
        .register(Box::new(WS_CONNECTIONS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(WS_MESSAGES_SENT.clone()))
        .unwrap();
    registry.register(Box::new(WS_LAG_EVENTS.clone())).unwrap();

    // Draft
    registry.register(Box::new(DRAFT_ACTIVE.clone())).unwrap();
    registry
        .register(Box::new(DRAFT_CURRENT_PICK.clone()))
        .unwrap();
    registry
        .register(Box::new(PLAYERS_AVAILABLE.clone()))
        .unwrap();

    // Core metrics (picks, timer)
    for metric in draftroom_core::metrics::collectors() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the draft gauges reflect the live draft.
pub async fn collect_dynamic_metrics(state: &AppState) {
    let snapshot = state.orchestrator().snapshot().await;
    match snapshot.draft {
        Some(draft) => {
            DRAFT_ACTIVE.set(i64::from(draft.status == DraftStatus::Active));
            DRAFT_CURRENT_PICK.set(i64::from(draft.current_pick));
        }
        None => {
            DRAFT_ACTIVE.set(0);
            DRAFT_CURRENT_PICK.set(0);
        }
    }
    PLAYERS_AVAILABLE.set(snapshot.available_players as i64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_includes_core_metrics() {
        draftroom_core::metrics::PICKS_TOTAL
            .with_label_values(&["manual"])
            .inc_by(0);
        let text = encode_metrics();
        assert!(text.contains("draftroom_http_requests_in_flight"));
        assert!(text.contains("draftroom_picks_total"));
    }
}
