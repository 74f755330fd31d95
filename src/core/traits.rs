// パイプラインのトレイト定義
// 乱数源と出力先（ログシンク）を抽象化する

use super::error::EntropyError;
use super::types::{BatchOutcome, RunReport, Task};
use async_trait::async_trait;
use mockall::automock;

/// `[0, bound)`の一様乱数を返す乱数源
#[automock]
pub trait EntropySource: Send {
    /// 一様分布の整数を1つ取り出す
    ///
    /// 失敗は回復不能として扱われ、実行全体が中断される。
    fn next_below(&mut self, bound: u32) -> Result<u32, EntropyError>;
}

/// Producerごとに独立した乱数源を払い出すトレイト
#[automock(type Source = MockEntropySource;)]
pub trait EntropyProvider: Send + Sync {
    type Source: EntropySource + 'static;

    fn source_for(&self, producer_id: usize) -> Self::Source;
}

/// 生成・集計結果の出力先を抽象化するトレイト
#[automock]
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Producerがタスクを生成した時の報告
    async fn report_generated(&self, task: &Task);

    /// Consumerが1バッチを処理し終えた時の報告
    async fn report_outcome(&self, outcome: &BatchOutcome);

    /// 実行完了時の報告
    async fn report_completed(&self, report: &RunReport);
}

// ReportSink for Box<dyn ReportSink>
#[async_trait]
impl ReportSink for Box<dyn ReportSink> {
    async fn report_generated(&self, task: &Task) {
        self.as_ref().report_generated(task).await
    }

    async fn report_outcome(&self, outcome: &BatchOutcome) {
        self.as_ref().report_outcome(outcome).await
    }

    async fn report_completed(&self, report: &RunReport) {
        self.as_ref().report_completed(report).await
    }
}
