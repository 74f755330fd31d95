// パイプラインで受け渡すデータ型定義

use super::error::{PipelineError, PipelineResult};
use chrono::{DateTime, Local};
use std::time::Duration;

/// 起動時に一度だけ構築される実行パラメータ
///
/// 値の検証は[`Parameters::new`]で行うため、構築後のインスタンスは常に有効。
/// `Copy`なので各ワーカーへ値渡しする。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    arr_size: usize,
    writers: usize,
    iterations: usize,
    total_tasks: usize,
}

impl Parameters {
    /// 符号付きの入力値からパラメータを構築
    pub fn new(arr_size: i64, writers: i64, iterations: i64) -> PipelineResult<Self> {
        let arr_size = non_negative("arr-size", arr_size)?;
        let writers = non_negative("writers", writers)?;
        let iterations = non_negative("iter-count", iterations)?;

        let total_tasks = writers.checked_mul(iterations).ok_or_else(|| {
            PipelineError::invalid_parameters(
                "writers",
                format!("{writers} writers x {iterations} iterations overflows the task count"),
            )
        })?;

        Ok(Self {
            arr_size,
            writers,
            iterations,
            total_tasks,
        })
    }

    pub fn arr_size(&self) -> usize {
        self.arr_size
    }

    pub fn writers(&self) -> usize {
        self.writers
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// 実行全体のタスク数（writers × iterations）
    pub fn total_tasks(&self) -> usize {
        self.total_tasks
    }
}

fn non_negative(field: &str, value: i64) -> PipelineResult<usize> {
    usize::try_from(value).map_err(|_| {
        PipelineError::invalid_parameters(field, format!("must be non-negative, got {value}"))
    })
}

/// Producerが生成する1単位の仕事
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub producer_id: usize,
    pub iteration: usize,
    /// 生成直後の未ソート配列
    pub payload: Vec<u32>,
    /// キュー投入時刻
    pub created_at: DateTime<Local>,
}

impl Task {
    pub fn new(producer_id: usize, iteration: usize, payload: Vec<u32>) -> Self {
        Self {
            producer_id,
            iteration,
            payload,
            created_at: Local::now(),
        }
    }
}

/// 1バッチ分の集計結果
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Summary {
    pub producer_id: usize,
    pub iteration: usize,
    pub created_at: DateTime<Local>,
    pub min: u32,
    pub median: u32,
    pub max: u32,
}

/// 空配列のため集計できなかったバッチ
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DegenerateBatch {
    pub producer_id: usize,
    pub iteration: usize,
    pub created_at: DateTime<Local>,
    pub len: usize,
}

impl DegenerateBatch {
    pub fn to_error(&self) -> PipelineError {
        PipelineError::DegenerateBatch {
            producer_id: self.producer_id,
            iteration: self.iteration,
            len: self.len,
        }
    }
}

/// 個別バッチの処理結果（完了シグナルの中身）
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BatchOutcome {
    Summarized(Summary),
    Degenerate(DegenerateBatch),
}

impl BatchOutcome {
    pub fn producer_id(&self) -> usize {
        match self {
            Self::Summarized(summary) => summary.producer_id,
            Self::Degenerate(batch) => batch.producer_id,
        }
    }

    pub fn iteration(&self) -> usize {
        match self {
            Self::Summarized(summary) => summary.iteration,
            Self::Degenerate(batch) => batch.iteration,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Self::Summarized(summary) => Some(summary),
            Self::Degenerate(_) => None,
        }
    }
}

/// 実行全体のレポート
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub total_tasks: usize,
    pub summarized: usize,
    pub degenerate: usize,
    pub elapsed: Duration,
}

impl RunReport {
    /// 完了シグナルを受け取った件数
    pub fn completed(&self) -> usize {
        self.summarized + self.degenerate
    }
}
