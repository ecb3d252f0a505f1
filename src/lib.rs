pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod report;

// Ports for external capabilities and the adapters that implement them
pub mod app;
pub mod infra;
