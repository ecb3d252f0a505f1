//! Cleaning stage metrics
//!
//! Per-field validity counters, geocoder latency and whole-run totals.

use crate::metrics::stage_metric;

/// Metrics collection for the cleaning stages
pub struct CleaningMetrics;

impl CleaningMetrics {
    /// Record the outcome of one cleaner applied to one record
    pub fn record_field_outcome(stage: &'static str, valid: bool) {
        if valid {
            ::metrics::counter!(stage_metric!(counter, "field", "valid"), "stage" => stage)
                .increment(1);
        } else {
            ::metrics::counter!(stage_metric!(counter, "field", "invalid"), "stage" => stage)
                .increment(1);
        }
    }

    /// Record how long a single geocoder request took
    pub fn record_geocode_duration(duration_secs: f64, ok: bool) {
        ::metrics::histogram!(stage_metric!(histogram, "address", "geocode_duration_seconds"))
            .record(duration_secs);
        if !ok {
            ::metrics::counter!(stage_metric!(counter, "address", "geocode_errors")).increment(1);
        }
    }

    /// Record a completed batch run
    pub fn record_run(records: usize, duration_secs: f64) {
        ::metrics::counter!(stage_metric!(counter, "pipeline", "runs")).increment(1);
        ::metrics::counter!(stage_metric!(counter, "pipeline", "records"))
            .increment(records as u64);
        ::metrics::histogram!(stage_metric!(histogram, "pipeline", "duration_seconds"))
            .record(duration_secs);
    }

    /// Pre-register all metrics so they show up in the exporter before the first run
    pub fn register_metrics() {
        use ::metrics::{counter, histogram};

        let _ = counter!(stage_metric!(counter, "field", "valid"));
        let _ = counter!(stage_metric!(counter, "field", "invalid"));
        let _ = counter!(stage_metric!(counter, "address", "geocode_errors"));
        let _ = counter!(stage_metric!(counter, "pipeline", "runs"));
        let _ = counter!(stage_metric!(counter, "pipeline", "records"));
        let _ = histogram!(stage_metric!(histogram, "address", "geocode_duration_seconds"));
        let _ = histogram!(stage_metric!(histogram, "pipeline", "duration_seconds"));
    }
}
