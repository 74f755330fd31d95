// サービス層 - 機能別のビジネスロジック
// 集計処理と出力先の実装

pub mod monitoring;
pub mod summary;

// 公開API
pub use monitoring::{ConsoleReportSink, MemoryReportSink, NoOpReportSink, OutputFormat};
pub use summary::summarize;
