// 出力監視機能
// 生成行・集計行・完了行の出力先

pub mod implementations;

// 公開API
pub use implementations::{
    format_completed, format_degenerate, format_generated, format_summary, ConsoleReportSink,
    MemoryReportSink, NoOpReportSink, OutputFormat,
};
