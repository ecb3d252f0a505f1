use async_trait::async_trait;

use crate::domain::ContactRecord;
use crate::error::Result;
use crate::metrics::CleaningMetrics;
use crate::pipeline::outcome::CleanResult;

/// Base trait for field cleaners.
///
/// Each cleaner owns one field domain: it reads its raw input from the record,
/// cleans and validates it, and fills in its own output columns. `apply` never
/// fails; an uncleanable value only marks that field invalid.
#[async_trait]
pub trait FieldCleaner: Send + Sync {
    /// Clean this cleaner's field and annotate the record. Returns the validity flag written.
    async fn apply(&self, record: &mut ContactRecord) -> bool;

    /// Stage name, also used for dependency declarations and metric labels
    fn stage_name(&self) -> &'static str;

    /// Stages that must run before this one because it reads their output columns
    fn dependencies(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// A wrapper that records per-field outcome metrics around any cleaner
pub struct MetricsCleaner<C: FieldCleaner> {
    inner: C,
}

impl<C: FieldCleaner> MetricsCleaner<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: FieldCleaner> FieldCleaner for MetricsCleaner<C> {
    async fn apply(&self, record: &mut ContactRecord) -> bool {
        let valid = self.inner.apply(record).await;
        CleaningMetrics::record_field_outcome(self.inner.stage_name(), valid);
        valid
    }

    fn stage_name(&self) -> &'static str {
        self.inner.stage_name()
    }

    fn dependencies(&self) -> Vec<&'static str> {
        self.inner.dependencies()
    }
}

/// Shared helpers for cleaner implementations
pub struct CleanerUtils;

impl CleanerUtils {
    /// Turn the internal outcome of a cleaning attempt into a `CleanResult`.
    ///
    /// Every error collapses to failure carrying `empty`; the reason is only logged.
    pub fn settle<T>(stage: &'static str, outcome: Result<T>, empty: Option<T>) -> CleanResult<T> {
        match outcome {
            Ok(value) => CleanResult::success(value),
            Err(e) => {
                tracing::debug!(stage, error = %e, "value rejected");
                CleanResult::failure(empty)
            }
        }
    }

    /// A domain with at least two labels whose top-level label is two or more
    /// characters and has no digits ("example.com", not "localhost" or "host.123")
    pub fn is_dotted_domain(domain: &str) -> bool {
        match domain.rsplit_once('.') {
            Some((rest, tld)) => {
                !rest.is_empty() && tld.len() >= 2 && !tld.chars().any(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }

    /// Reject blank input before handing it to a parser
    pub fn require_input<'a>(raw: &'a str, field: &str) -> Result<&'a str> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(crate::error::CleanerError::MissingField(field.to_string()))
        } else {
            Ok(trimmed)
        }
    }
}
