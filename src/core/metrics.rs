//! Metrics collection for the carousel bot using Prometheus
//!
//! Tracks the collection flow (slides, rejections), publishing and paging.

// Registration fails only on a duplicate metric name
#![allow(clippy::unwrap_used)]

use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

// ======================
// COLLECTION METRICS
// ======================

lazy_static! {
    /// Slides stored in user sessions
    pub static ref SLIDES_COLLECTED_TOTAL: Counter = register_counter!(
        "carousel_slides_collected_total",
        "Total number of photo+caption pairs accepted"
    )
    .unwrap();

    /// Rejected user input
    /// Labels: reason (not_collecting/album/caption_pending/max_slides/photo_missing/no_slides)
    pub static ref REJECTIONS_TOTAL: CounterVec = register_counter_vec!(
        "carousel_rejections_total",
        "Total number of rejected user inputs by reason",
        &["reason"]
    )
    .unwrap();

    /// Command usage
    /// Labels: command (start/new/cancel/done)
    pub static ref COMMAND_USAGE_TOTAL: CounterVec = register_counter_vec!(
        "carousel_command_usage_total",
        "Total number of commands received",
        &["command"]
    )
    .unwrap();
}

// ======================
// PAGING METRICS
// ======================

lazy_static! {
    /// Carousels posted to the channel
    pub static ref CAROUSELS_PUBLISHED_TOTAL: Counter = register_counter!(
        "carousel_published_total",
        "Total number of carousels posted to the channel"
    )
    .unwrap();

    /// Carousels stored but not posted
    pub static ref PUBLISH_FAILURES_TOTAL: Counter = register_counter!(
        "carousel_publish_failures_total",
        "Total number of carousels that could not be posted"
    )
    .unwrap();

    /// Page flips by viewers
    /// Labels: outcome (rendered/not_found/edit_failed)
    pub static ref NAVIGATIONS_TOTAL: CounterVec = register_counter_vec!(
        "carousel_navigations_total",
        "Total number of navigation button presses by outcome",
        &["outcome"]
    )
    .unwrap();
}

/// Initialize metrics (call this at startup to register all metrics)
pub fn init_metrics() {
    log::info!("Initializing metrics registry...");

    let _ = &*SLIDES_COLLECTED_TOTAL;
    let _ = &*CAROUSELS_PUBLISHED_TOTAL;
    let _ = &*PUBLISH_FAILURES_TOTAL;

    // Pre-create label sets so they appear in /metrics with 0 values
    for outcome in ["rendered", "not_found", "edit_failed"] {
        NAVIGATIONS_TOTAL.with_label_values(&[outcome]);
    }
    for command in ["start", "new", "cancel", "done"] {
        COMMAND_USAGE_TOTAL.with_label_values(&[command]);
    }
    log::info!("Metrics registry initialized successfully");
}

/// Helper function to record a rejected input
pub fn record_rejection(reason: &str) {
    REJECTIONS_TOTAL.with_label_values(&[reason]).inc();
}

/// Helper function to record command usage
pub fn record_command(command: &str) {
    COMMAND_USAGE_TOTAL.with_label_values(&[command]).inc();
}
