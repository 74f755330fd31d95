// Consumer - 単一の集計ワーカー

use super::channel::{CompletionSender, TaskReceiver};
use crate::{
    core::{BatchOutcome, PipelineError, PipelineResult, ReportSink},
    services::summary::summarize,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Consumer: `expected`個のタスクを受信して集計
///
/// 1タスクごとに結果をシンクへ出力し、完了シグナルを1つ送る。
/// 規定数に達したらチャンネルをcloseして終了し、処理件数を返す。
/// 規定数に達する前に全Producerが消えた場合、またはclose後に
/// 余分なタスクが残っていた場合は件数不一致エラー。
pub fn spawn_consumer<S>(
    expected: usize,
    mut tasks: TaskReceiver,
    completions: CompletionSender,
    sink: Arc<S>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<PipelineResult<usize>>
where
    S: ReportSink + 'static,
{
    tokio::spawn(async move {
        let mut remaining = expected;

        while remaining > 0 {
            let received = tokio::select! {
                _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
                received = tasks.recv() => received,
            };
            let Some(task) = received else {
                tracing::error!(expected, remaining, "all producers finished early");
                return Err(PipelineError::task_count_mismatch(
                    expected,
                    expected - remaining,
                ));
            };

            // ソートはCPUバウンドなのでブロッキングプールで実行
            let outcome = tokio::task::spawn_blocking(move || summarize(task)).await?;
            if let BatchOutcome::Degenerate(batch) = &outcome {
                let error = batch.to_error();
                tracing::warn!(
                    producer_id = batch.producer_id,
                    iteration = batch.iteration,
                    severity = error.severity().as_str(),
                    recoverable = error.is_recoverable(),
                    "degenerate batch, skipping summary"
                );
            }
            sink.report_outcome(&outcome).await;

            tokio::select! {
                _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
                sent = completions.send(outcome) => {
                    sent.map_err(|_| PipelineError::ChannelClosed)?
                }
            }
            remaining -= 1;
        }

        tasks.close();
        let leftover = tasks.drain();
        if leftover > 0 {
            tracing::error!(expected, leftover, "tasks left in channel after close");
            return Err(PipelineError::task_count_mismatch(
                expected,
                expected + leftover,
            ));
        }

        tracing::debug!(processed = expected, "consumer finished");
        Ok(expected)
    })
}
