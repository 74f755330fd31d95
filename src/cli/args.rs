use crate::core::{Parameters, PipelineConfig, PipelineResult};
use crate::services::OutputFormat;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "batch_pipeline")]
#[command(about = "Generate random batches in parallel producers and summarize them in a single consumer")]
#[command(version)]
pub struct Cli {
    /// Length of each generated batch
    #[arg(long = "arr-size", default_value_t = 0, allow_negative_numbers = true)]
    pub arr_size: i64,

    /// Number of concurrent producers
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub writers: i64,

    /// Number of batches each producer generates
    #[arg(long = "iter-count", default_value_t = 0, allow_negative_numbers = true)]
    pub iter_count: i64,

    /// Seed for reproducible batches (OS entropy when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format for generated and summary lines
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of runtime worker threads (defaults to the CPU count)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Do not print a line for every generated batch
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// 入力値を検証してパラメータを構築
    pub fn parameters(&self) -> PipelineResult<Parameters> {
        Parameters::new(self.arr_size, self.writers, self.iter_count)
    }

    /// 実行設定を構築
    pub fn pipeline_config(&self) -> PipelineResult<PipelineConfig> {
        let mut config = PipelineConfig::new(self.parameters()?).with_seed(self.seed);
        if let Some(threads) = self.threads {
            config = config.with_worker_threads(threads);
        }
        Ok(config)
    }
}
