// Pipeline - Producer/Consumerのオーケストレーション
// Consumer起動 → Producer起動 → 完了シグナル待機 → 全ワーカーのjoin

use super::{
    channel::{completion_channel, task_channel},
    consumer::spawn_consumer,
    producer::spawn_producer,
};
use crate::core::{
    BatchOutcome, EntropyProvider, PipelineConfig, PipelineError, PipelineResult, ReportSink,
    RunReport,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::Level;

/// 複数Producer・単一Consumerのパイプライン
///
/// 乱数源と出力先はコンストラクタで注入する。
pub struct Pipeline<P, S> {
    config: PipelineConfig,
    provider: P,
    sink: Arc<S>,
}

impl<P, S> Pipeline<P, S>
where
    P: EntropyProvider,
    S: ReportSink + 'static,
{
    pub fn new(config: PipelineConfig, provider: P, sink: S) -> Self {
        Self {
            config,
            provider,
            sink: Arc::new(sink),
        }
    }

    pub fn sink(&self) -> &S {
        self.sink.as_ref()
    }

    /// 全タスクが集計されるまで実行
    pub async fn run(&self) -> PipelineResult<RunReport> {
        self.run_with_cancel(CancellationToken::new()).await
    }

    /// Ctrl+Cでキャンセルできる形で実行
    pub async fn run_with_signal_handling(&self) -> PipelineResult<RunReport> {
        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();

        let signal_handle = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("received Ctrl+C, cancelling pipeline");
                    signal_cancel.cancel();
                }
                Err(error) => tracing::error!(error = %error, "failed to listen for Ctrl+C"),
            }
        });

        let result = self.run_with_cancel(cancel).await;
        signal_handle.abort();
        result
    }

    /// 外部から渡されたトークンでキャンセル可能な実行
    ///
    /// 完了シグナルを`writers × iterations`個受け取るまで待機し、
    /// その後すべてのワーカーをjoinする。いずれかのワーカーが失敗した場合は
    /// キャンセル以外の最初のエラーを返す。
    pub async fn run_with_cancel(&self, cancel: CancellationToken) -> PipelineResult<RunReport> {
        let start = Instant::now();
        let params = self.config.parameters();
        let total_tasks = params.total_tasks();

        tracing::info!(
            arr_size = params.arr_size(),
            writers = params.writers(),
            iterations = params.iterations(),
            total_tasks,
            "starting pipeline"
        );

        let (task_tx, task_rx) = task_channel();
        let (done_tx, mut done_rx) = completion_channel();

        // Consumerを先に起動
        let consumer = spawn_consumer(
            total_tasks,
            task_rx,
            done_tx,
            Arc::clone(&self.sink),
            cancel.clone(),
        );

        let producers: Vec<_> = (0..params.writers())
            .map(|producer_id| {
                spawn_producer(
                    producer_id,
                    params,
                    self.config.value_bound(),
                    self.provider.source_for(producer_id),
                    task_tx.clone(),
                    Arc::clone(&self.sink),
                    cancel.clone(),
                )
            })
            .collect();
        // 送信側はProducerだけが持つ
        drop(task_tx);

        let mut summarized = 0;
        let mut degenerate = 0;
        while summarized + degenerate < total_tasks {
            match done_rx.recv().await {
                Some(BatchOutcome::Summarized(_)) => summarized += 1,
                Some(BatchOutcome::Degenerate(_)) => degenerate += 1,
                // Consumerが途中で終了した
                None => break,
            }
        }

        let mut failure = None;
        for (producer_id, handle) in producers.into_iter().enumerate() {
            if let Err(error) = flatten(handle.await) {
                tracing::debug!(producer_id, error = %error, "producer returned error");
                keep_root_cause(&mut failure, error);
            }
        }
        if let Err(error) = flatten(consumer.await) {
            keep_root_cause(&mut failure, error);
        }
        if let Some(error) = failure {
            log_failure(&error);
            return Err(error);
        }

        let completed = summarized + degenerate;
        if completed != total_tasks {
            let error = PipelineError::task_count_mismatch(total_tasks, completed);
            log_failure(&error);
            return Err(error);
        }

        let report = RunReport {
            total_tasks,
            summarized,
            degenerate,
            elapsed: start.elapsed(),
        };
        tracing::info!(
            total_tasks,
            summarized,
            degenerate,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "pipeline completed"
        );
        self.sink.report_completed(&report).await;

        Ok(report)
    }
}

fn flatten<T>(
    joined: Result<PipelineResult<T>, tokio::task::JoinError>,
) -> PipelineResult<T> {
    joined.map_err(PipelineError::from).and_then(|result| result)
}

/// 重要度に応じたレベルで失敗を記録（キャンセルは警告止まり）
fn log_failure(error: &PipelineError) {
    let severity = error.severity();
    if severity.level() == Level::ERROR {
        tracing::error!(severity = severity.as_str(), error = %error, "pipeline failed");
    } else {
        tracing::warn!(severity = severity.as_str(), error = %error, "pipeline stopped");
    }
}

/// キャンセルより根本原因のエラーを優先して保持
fn keep_root_cause(slot: &mut Option<PipelineError>, error: PipelineError) {
    match slot {
        None => *slot = Some(error),
        Some(PipelineError::Cancelled) if !matches!(error, PipelineError::Cancelled) => {
            *slot = Some(error)
        }
        Some(_) => {}
    }
}
