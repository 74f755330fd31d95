// Producer - タスク生成と送信

use super::channel::TaskSender;
use crate::{
    core::{EntropySource, Parameters, PipelineError, PipelineResult, ReportSink, Task},
    generator::generate_array,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Producer: `iterations`個のタスクを順に生成して送信
///
/// 失敗した場合はトークンをキャンセルし、実行全体を中断させる。
pub fn spawn_producer<E, S>(
    producer_id: usize,
    params: Parameters,
    value_bound: u32,
    source: E,
    tasks: TaskSender,
    sink: Arc<S>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<PipelineResult<()>>
where
    E: EntropySource + 'static,
    S: ReportSink + 'static,
{
    tokio::spawn(async move {
        let result = produce(
            producer_id,
            params,
            value_bound,
            source,
            &tasks,
            sink.as_ref(),
            &cancel,
        )
        .await;

        match &result {
            Ok(()) => tracing::debug!(producer_id, "producer finished"),
            Err(PipelineError::Cancelled) => tracing::debug!(producer_id, "producer cancelled"),
            Err(error) => {
                tracing::error!(producer_id, error = %error, "producer failed, aborting run");
                cancel.cancel();
            }
        }
        result
    })
}

async fn produce<E, S>(
    producer_id: usize,
    params: Parameters,
    value_bound: u32,
    mut source: E,
    tasks: &TaskSender,
    sink: &S,
    cancel: &CancellationToken,
) -> PipelineResult<()>
where
    E: EntropySource,
    S: ReportSink + ?Sized,
{
    for iteration in 0..params.iterations() {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let payload = generate_array(params.arr_size(), value_bound, &mut source)?;
        let task = Task::new(producer_id, iteration, payload);
        sink.report_generated(&task).await;

        tokio::select! {
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            sent = tasks.send(task) => sent?,
        }
    }
    Ok(())
}
