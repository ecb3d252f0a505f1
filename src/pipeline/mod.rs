// Field-cleaning pipeline: outcome type, cleaners and the batch runner

pub mod cleaners;
pub mod outcome;
pub mod runner;

// Re-export key types
pub use cleaners::FieldCleaner;
pub use outcome::CleanResult;
pub use runner::{CleaningPipeline, PipelineResult, StageSummary};
