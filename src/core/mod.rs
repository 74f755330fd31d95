// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// 公開API
pub use config::{PipelineConfig, VALUE_BOUND};
pub use error::{EntropyError, ErrorSeverity, PipelineError, PipelineResult};
pub use traits::{EntropyProvider, EntropySource, ReportSink};
pub use types::{BatchOutcome, DegenerateBatch, Parameters, RunReport, Summary, Task};
