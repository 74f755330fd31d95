use crate::cli::Cli;
use crate::core::{EntropyProvider, PipelineConfig, RunReport};
use crate::engine::Pipeline;
use crate::generator::{OsEntropyProvider, SeededEntropyProvider};
use crate::services::ConsoleReportSink;
use anyhow::{Context, Result};

/// Execute the pipeline described by the command line
///
/// Blocks the calling thread on a multi-threaded runtime sized from the config.
pub fn execute_run(cli: &Cli) -> Result<RunReport> {
    let config = cli
        .pipeline_config()
        .context("invalid command line parameters")?;

    let sink = if cli.quiet {
        ConsoleReportSink::quiet(cli.format)
    } else {
        ConsoleReportSink::new(cli.format)
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads())
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async {
        match config.seed() {
            Some(seed) => run_pipeline(config, SeededEntropyProvider::new(seed), sink).await,
            None => run_pipeline(config, OsEntropyProvider::new(), sink).await,
        }
    })
}

async fn run_pipeline<P>(
    config: PipelineConfig,
    provider: P,
    sink: ConsoleReportSink,
) -> Result<RunReport>
where
    P: EntropyProvider,
{
    let pipeline = Pipeline::new(config, provider, sink);
    let report = pipeline
        .run_with_signal_handling()
        .await
        .context("pipeline run failed")?;
    Ok(report)
}
