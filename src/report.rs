use chrono::{DateTime, Local};
use std::fmt::Write;
use std::time::Duration;

use crate::pipeline::PipelineResult;

/// Timing and validity summary printed after a batch run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub output_file: String,
    /// Wall-clock time for load, clean and write
    pub elapsed: Duration,
    pub result: PipelineResult,
}

impl RunReport {
    pub fn time_per_row(&self) -> f64 {
        if self.result.total_records == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() / self.result.total_records as f64
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n📊 Cleaning results ({})", self.started_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "   Records: {}", self.result.total_records);
        for stage in &self.result.stages {
            let _ = writeln!(out, "   {:<8} valid: {:>6}  invalid: {:>6}", stage.stage, stage.valid, stage.invalid);
        }
        let _ = writeln!(out, "   Output file: {}", self.output_file);
        let _ = writeln!(out, "Total run time (s): {}", self.elapsed.as_secs_f64());
        let _ = writeln!(out, "Time per row (s):   {}", self.time_per_row());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StageSummary;

    fn report(records: usize, elapsed_ms: u64) -> RunReport {
        RunReport {
            started_at: Local::now(),
            output_file: "data_clean.csv".to_string(),
            elapsed: Duration::from_millis(elapsed_ms),
            result: PipelineResult {
                total_records: records,
                stages: vec![StageSummary {
                    stage: "email",
                    valid: records,
                    invalid: 0,
                }],
                duration: Duration::from_millis(elapsed_ms),
            },
        }
    }

    #[test]
    fn test_time_per_row() {
        assert_eq!(report(4, 2000).time_per_row(), 0.5);
        assert_eq!(report(0, 2000).time_per_row(), 0.0);
    }

    #[test]
    fn test_render_includes_timing_lines() {
        let text = report(4, 2000).render();
        assert!(text.contains("Total run time (s): 2"));
        assert!(text.contains("Time per row (s):   0.5"));
        assert!(text.contains("email"));
        assert!(text.contains("data_clean.csv"));
    }
}
