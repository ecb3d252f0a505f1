//! Metrics for the cleaning pipeline
//!
//! Counters and histograms are always recorded through the `metrics` facade. They
//! are only exported when a Prometheus recorder is installed, which happens when
//! `CLEANER_METRICS_ADDR` is set.

pub mod cleaning;

pub use cleaning::CleaningMetrics;

use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

/// Install the Prometheus exporter if `CLEANER_METRICS_ADDR` is configured.
///
/// Idempotent. Returns without installing anything when the variable is unset.
pub fn init_metrics() {
    INIT.call_once(|| {
        let addr_str = match std::env::var("CLEANER_METRICS_ADDR") {
            Ok(v) if !v.trim().is_empty() => v,
            _ => return,
        };

        let addr = match addr_str.parse::<std::net::SocketAddr>() {
            Ok(addr) => addr,
            Err(e) => {
                warn!("Invalid metrics addr '{}': {}", addr_str, e);
                return;
            }
        };

        let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
        match builder.install() {
            Ok(()) => {
                info!("Prometheus exporter listening on http://{}/metrics", addr);
                CleaningMetrics::register_metrics();
            }
            Err(e) => {
                warn!("Failed to install Prometheus exporter: {}", e);
            }
        }
    });
}

/// Builds metric names following the convention:
/// contact_cleaner_{stage}_{metric_name}[_total]
macro_rules! stage_metric {
    (counter, $stage:literal, $name:literal) => {
        concat!("contact_cleaner_", $stage, "_", $name, "_total")
    };
    (histogram, $stage:literal, $name:literal) => {
        concat!("contact_cleaner_", $stage, "_", $name)
    };
}

pub(crate) use stage_metric;
