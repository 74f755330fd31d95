pub mod cli;
pub mod core;
pub mod engine;
pub mod generator;
pub mod services;

pub use crate::core::{
    BatchOutcome, DegenerateBatch, EntropyError, EntropyProvider, EntropySource, Parameters,
    PipelineConfig, PipelineError, PipelineResult, ReportSink, RunReport, Summary, Task,
    VALUE_BOUND,
};
pub use engine::Pipeline;
