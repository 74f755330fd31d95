// エンジン層 - 並行処理とオーケストレーション
// チャンネル・Producer・Consumerを組み合わせてパイプラインを構成

pub mod channel;
pub mod consumer;
pub mod pipeline;
pub mod producer;

// 公開API
pub use channel::{completion_channel, task_channel, TaskReceiver, TaskSender};
pub use pipeline::Pipeline;
