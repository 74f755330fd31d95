// 実行設定
// 設定ファイルや環境変数は持たず、CLIから一度だけ構築される

use super::types::Parameters;

/// 生成する乱数の上限（この値は含まない）
pub const VALUE_BOUND: u32 = 100_000;

/// パイプラインの実行設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    parameters: Parameters,
    value_bound: u32,
    seed: Option<u64>,
    worker_threads: usize,
}

impl PipelineConfig {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            value_bound: VALUE_BOUND,
            seed: None,
            worker_threads: num_cpus::get().max(1),
        }
    }

    pub fn with_value_bound(mut self, value_bound: u32) -> Self {
        self.value_bound = value_bound;
        self
    }

    /// シードを指定するとProducerごとの配列が再現可能になる
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads.max(1);
        self
    }

    pub fn parameters(&self) -> Parameters {
        self.parameters
    }

    pub fn value_bound(&self) -> u32 {
        self.value_bound
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn worker_threads(&self) -> usize {
        self.worker_threads
    }
}
