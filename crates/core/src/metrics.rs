//! Prometheus metrics for the draft engine.
//!
//! Registered into the server's registry at start-up.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Draft lifecycle
// =============================================================================

/// Drafts started since start-up.
pub static DRAFTS_STARTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("draftroom_drafts_started_total", "Total drafts started").unwrap()
});

/// Drafts that reached completion.
pub static DRAFTS_COMPLETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "draftroom_drafts_completed_total",
        "Total drafts that reached roster capacity",
    )
    .unwrap()
});

// =============================================================================
// Picks
// =============================================================================

/// Accepted picks by mode.
pub static PICKS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("draftroom_picks_total", "Total accepted picks"),
        &["mode"], // "manual", "automatic"
    )
    .unwrap()
});

/// Rejected pick attempts by error kind.
pub static PICK_REJECTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("draftroom_pick_rejections_total", "Rejected pick attempts"),
        &["kind"],
    )
    .unwrap()
});

/// Time spent on the clock before a pick was made.
pub static PICK_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "draftroom_pick_duration_seconds",
            "Time between a pick opening and being made",
        )
        .buckets(vec![1.0, 5.0, 10.0, 20.0, 30.0, 45.0, 60.0, 90.0, 120.0]),
        &["mode"],
    )
    .unwrap()
});

// =============================================================================
// Timer
// =============================================================================

/// Picks that ran out of time.
pub static TIMER_EXPIRATIONS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "draftroom_timer_expirations_total",
        "Picks whose timer expired",
    )
    .unwrap()
});

/// Metrics exported by this crate, for registration.
pub fn collectors() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(DRAFTS_STARTED.clone()),
        Box::new(DRAFTS_COMPLETED.clone()),
        Box::new(PICKS_TOTAL.clone()),
        Box::new(PICK_REJECTIONS.clone()),
        Box::new(PICK_DURATION.clone()),
        Box::new(TIMER_EXPIRATIONS.clone()),
    ]
}
