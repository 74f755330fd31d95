// TaskChannel - Producer/Consumer間のランデブー型チャンネル
// 全Producerが送信側、単一Consumerが受信側を持つ

use crate::core::{BatchOutcome, PipelineError, PipelineResult, Task};
use tokio::sync::{mpsc, oneshot};

/// タスク本体と受領通知をまとめた受け渡し単位
struct Handoff {
    task: Task,
    ack: oneshot::Sender<()>,
}

/// ランデブー型のタスクチャンネルを作成
///
/// `send`はConsumerが`recv`でタスクを受け取るまで戻らない。
/// キューに積まれるのは送信待ちのタスクだけで、受領前に次を送ることはできない。
pub fn task_channel() -> (TaskSender, TaskReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (TaskSender { tx }, TaskReceiver { rx })
}

/// 送信側（Producerごとにclone）
#[derive(Clone)]
pub struct TaskSender {
    tx: mpsc::Sender<Handoff>,
}

impl TaskSender {
    /// タスクを渡し、Consumerが受け取るまで待機
    pub async fn send(&self, task: Task) -> PipelineResult<()> {
        let (ack, acked) = oneshot::channel();
        self.tx
            .send(Handoff { task, ack })
            .await
            .map_err(|_| PipelineError::ChannelClosed)?;

        // 受領前にcloseされた場合はackが破棄される
        acked.await.map_err(|_| PipelineError::ChannelClosed)
    }
}

/// 受信側（Consumer専用）
pub struct TaskReceiver {
    rx: mpsc::Receiver<Handoff>,
}

impl TaskReceiver {
    /// 次のタスクを受信
    ///
    /// 全送信側がドロップされるか、close後にキューが空になると`None`。
    pub async fn recv(&mut self) -> Option<Task> {
        let Handoff { task, ack } = self.rx.recv().await?;
        // 送信側が既に諦めていても受け取ったタスクは処理する
        let _ = ack.send(());
        Some(task)
    }

    /// 以降の送信を拒否する
    pub fn close(&mut self) {
        self.rx.close();
    }

    /// close後に残っていたタスクを受領せずに破棄し、その件数を返す
    pub fn drain(&mut self) -> usize {
        let mut leftover = 0;
        while let Ok(handoff) = self.rx.try_recv() {
            drop(handoff);
            leftover += 1;
        }
        leftover
    }
}

/// Consumerからオーケストレータへの完了シグナル
pub type CompletionSender = mpsc::Sender<BatchOutcome>;
pub type CompletionReceiver = mpsc::Receiver<BatchOutcome>;

/// 完了シグナル用チャンネルを作成（容量1）
pub fn completion_channel() -> (CompletionSender, CompletionReceiver) {
    mpsc::channel(1)
}
