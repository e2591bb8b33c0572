//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Store (adds, updates, imports, document saves)
//! - View pipeline (refresh cycles by trigger)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Store Metrics
// =============================================================================

/// Torrents added total.
pub static TORRENTS_ADDED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("torrentbay_torrents_added_total", "Total torrents added").unwrap()
});

/// Torrents updated total.
pub static TORRENTS_UPDATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "torrentbay_torrents_updated_total",
        "Total torrent updates applied",
    )
    .unwrap()
});

/// Imports total by payload shape.
pub static IMPORTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("torrentbay_imports_total", "Total snapshot imports"),
        &["shape"], // "legacy", "full"
    )
    .unwrap()
});

/// Exports total.
pub static EXPORTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("torrentbay_exports_total", "Total snapshot exports").unwrap()
});

/// Document save duration in seconds.
pub static DOCUMENT_SAVE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "torrentbay_document_save_duration_seconds",
            "Duration of full-document writes to storage",
        )
        .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
    )
    .unwrap()
});

/// Document save failures total.
pub static DOCUMENT_SAVE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "torrentbay_document_save_failures_total",
        "Total failed full-document writes",
    )
    .unwrap()
});

// =============================================================================
// View Pipeline Metrics
// =============================================================================

/// View recompute cycles by trigger.
pub static VIEW_CYCLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("torrentbay_view_cycles_total", "View recompute cycles"),
        &["trigger"], // "search", "controls", "refresh"
    )
    .unwrap()
});

/// View cycles that were superseded before publishing.
pub static VIEW_CYCLES_SUPERSEDED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "torrentbay_view_cycles_superseded_total",
        "View cycles discarded because a newer cycle published first",
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Store
        Box::new(TORRENTS_ADDED.clone()),
        Box::new(TORRENTS_UPDATED.clone()),
        Box::new(IMPORTS_TOTAL.clone()),
        Box::new(EXPORTS_TOTAL.clone()),
        Box::new(DOCUMENT_SAVE_DURATION.clone()),
        Box::new(DOCUMENT_SAVE_FAILURES.clone()),
        // View
        Box::new(VIEW_CYCLES.clone()),
        Box::new(VIEW_CYCLES_SUPERSEDED.clone()),
    ]
}
