// パイプライン用のカスタムエラー型定義
// 致命的なエラーと、バッチ単位で回復できるエラーを区別する

use thiserror::Error;

/// 乱数源のエラー
#[derive(Error, Debug)]
pub enum EntropyError {
    #[error("entropy source failed: {source}")]
    Source {
        #[source]
        source: rand::Error,
    },

    #[error("entropy bound must be positive")]
    ZeroBound,

    #[error("entropy source exhausted after {produced} values")]
    Exhausted { produced: usize },
}

impl From<rand::Error> for EntropyError {
    fn from(source: rand::Error) -> Self {
        Self::Source { source }
    }
}

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameters { field: String, reason: String },

    #[error("array generation failed: {0}")]
    Entropy(#[from] EntropyError),

    #[error("producer {producer_id} task {iteration} has an empty batch (len {len}), no summary")]
    DegenerateBatch {
        producer_id: usize,
        iteration: usize,
        len: usize,
    },

    #[error("task channel is closed")]
    ChannelClosed,

    #[error("task count mismatch: expected {expected}, received {received}")]
    TaskCountMismatch { expected: usize, received: usize },

    #[error("pipeline cancelled")]
    Cancelled,

    #[error("worker task failed: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl PipelineError {
    /// パラメータエラーの作成
    pub fn invalid_parameters(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 件数不一致エラーの作成
    pub fn task_count_mismatch(expected: usize, received: usize) -> Self {
        Self::TaskCountMismatch { expected, received }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DegenerateBatch { .. } => ErrorSeverity::Low,
            Self::Cancelled => ErrorSeverity::Medium,
            Self::InvalidParameters { .. } | Self::ChannelClosed => ErrorSeverity::High,
            Self::Entropy(_) | Self::TaskCountMismatch { .. } | Self::Join { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// 回復可能なのは空バッチのみ。それ以外は実行全体を中断する。
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateBatch { .. })
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 警告を出して処理継続
    Low,
    Medium,
    High,
    /// 実行停止レベル
    Critical,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// ログ出力時のレベル
    pub fn level(&self) -> tracing::Level {
        match self {
            Self::Low | Self::Medium => tracing::Level::WARN,
            Self::High | Self::Critical => tracing::Level::ERROR,
        }
    }
}

/// パイプラインの結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
