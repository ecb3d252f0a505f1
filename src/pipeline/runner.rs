use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, Instrument};

use super::cleaners::{
    AddressCleaner, EmailCleaner, FieldCleaner, MetricsCleaner, NameCleaner, NumberCleaner,
    UrlCleaner,
};
use crate::app::ports::GeocoderPort;
use crate::config::CleaningConfig;
use crate::domain::ContactRecord;
use crate::error::{CleanerError, Result};
use crate::infra::CountryReference;
use crate::metrics::CleaningMetrics;

/// Valid/invalid counts for one stage over a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: &'static str,
    pub valid: usize,
    pub invalid: usize,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub total_records: usize,
    pub stages: Vec<StageSummary>,
    pub duration: Duration,
}

impl PipelineResult {
    pub fn seconds_per_record(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.duration.as_secs_f64() / self.total_records as f64
        }
    }

    pub fn stage(&self, name: &str) -> Option<&StageSummary> {
        self.stages.iter().find(|s| s.stage == name)
    }
}

/// Ordered list of field cleaners applied to a batch of records.
///
/// Stages run breadth-first: one stage over every record before the next
/// stage starts. A stage that reads another stage's output declares it in
/// `dependencies`, and construction fails if that stage is missing or later in
/// the list.
pub struct CleaningPipeline {
    stages: Vec<Box<dyn FieldCleaner>>,
}

impl CleaningPipeline {
    pub fn new(stages: Vec<Box<dyn FieldCleaner>>) -> Result<Self> {
        let positions: HashMap<&'static str, usize> = stages
            .iter()
            .enumerate()
            .map(|(i, stage)| (stage.stage_name(), i))
            .collect();

        if positions.len() != stages.len() {
            return Err(CleanerError::InvalidPipeline(
                "stage names must be unique".to_string(),
            ));
        }

        for (i, stage) in stages.iter().enumerate() {
            for dependency in stage.dependencies() {
                match positions.get(dependency) {
                    Some(&pos) if pos < i => {}
                    Some(_) => {
                        return Err(CleanerError::InvalidPipeline(format!(
                            "stage '{}' must run after '{}'",
                            stage.stage_name(),
                            dependency
                        )))
                    }
                    None => {
                        return Err(CleanerError::InvalidPipeline(format!(
                            "stage '{}' depends on missing stage '{}'",
                            stage.stage_name(),
                            dependency
                        )))
                    }
                }
            }
        }

        Ok(Self { stages })
    }

    /// The five standard cleaners: name, email, url, address, number
    pub fn standard(
        config: &CleaningConfig,
        geocoder: Arc<dyn GeocoderPort>,
        countries: Arc<CountryReference>,
    ) -> Result<Self> {
        config.validate()?;

        Self::new(vec![
            Box::new(MetricsCleaner::new(NameCleaner::new(&config.name_format))),
            Box::new(MetricsCleaner::new(EmailCleaner::new())),
            Box::new(MetricsCleaner::new(UrlCleaner::new())),
            Box::new(MetricsCleaner::new(AddressCleaner::new(
                geocoder,
                countries,
                config.confidence_threshold,
            ))),
            Box::new(MetricsCleaner::new(NumberCleaner::new(
                &config.default_region,
                config.number_format,
            ))),
        ])
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.stage_name()).collect()
    }

    /// Apply every stage to every record. Never fails: an uncleanable field only
    /// marks that field invalid on that record.
    pub async fn run(&self, records: &mut [ContactRecord]) -> PipelineResult {
        let started = Instant::now();
        let mut stages = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let span = tracing::info_span!("stage", stage = stage.stage_name());
            let summary = async {
                let mut valid = 0;
                for record in records.iter_mut() {
                    if stage.apply(record).await {
                        valid += 1;
                    }
                }
                let summary = StageSummary {
                    stage: stage.stage_name(),
                    valid,
                    invalid: records.len() - valid,
                };
                info!(valid = summary.valid, invalid = summary.invalid, "Stage finished");
                summary
            }
            .instrument(span)
            .await;
            stages.push(summary);
        }

        let duration = started.elapsed();
        CleaningMetrics::record_run(records.len(), duration.as_secs_f64());

        PipelineResult {
            total_records: records.len(),
            stages,
            duration,
        }
    }
}
