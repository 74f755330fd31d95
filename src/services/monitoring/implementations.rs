// 出力先（ログシンク）の具象実装

use crate::core::{BatchOutcome, DegenerateBatch, ReportSink, RunReport, Summary, Task};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// 1行ごとの出力形式
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 人が読むためのテキスト
    #[default]
    Text,
    /// 1行1オブジェクトのJSON
    Json,
}

/// コンソール出力による実装
///
/// 生成・集計行は標準出力、空バッチの警告は標準エラーへ出す。
#[derive(Debug, Default, Clone)]
pub struct ConsoleReportSink {
    format: OutputFormat,
    quiet: bool,
}

impl ConsoleReportSink {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quiet: false,
        }
    }

    /// 生成行を出さないモード（集計行と完了行は出す）
    pub fn quiet(format: OutputFormat) -> Self {
        Self {
            format,
            quiet: true,
        }
    }
}

#[async_trait]
impl ReportSink for ConsoleReportSink {
    async fn report_generated(&self, task: &Task) {
        if !self.quiet {
            println!("{}", format_generated(task, self.format));
        }
    }

    async fn report_outcome(&self, outcome: &BatchOutcome) {
        match outcome {
            BatchOutcome::Summarized(summary) => {
                println!("{}", format_summary(summary, self.format))
            }
            BatchOutcome::Degenerate(batch) => {
                eprintln!("{}", format_degenerate(batch, self.format))
            }
        }
    }

    async fn report_completed(&self, report: &RunReport) {
        println!("{}", format_completed(report, self.format));
    }
}

/// 生成行: `producer <id> pushed task <iteration> [..]`
pub fn format_generated(task: &Task, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "producer {} pushed task {} {:?}",
            task.producer_id, task.iteration, task.payload
        ),
        OutputFormat::Json => serde_json::json!({
            "event": "generated",
            "producer_id": task.producer_id,
            "iteration": task.iteration,
            "created_at": task.created_at,
            "payload": task.payload,
        })
        .to_string(),
    }
}

/// 集計行
pub fn format_summary(summary: &Summary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "{{producer id: {}}} {{iteration: {}}} {{queueInsertionTime: {}}} {{min: {}}} {{median: {}}} {{max: {}}}",
            summary.producer_id,
            summary.iteration,
            summary.created_at.format("%Y-%m-%d %H:%M:%S%.6f %:z"),
            summary.min,
            summary.median,
            summary.max
        ),
        OutputFormat::Json => to_json_line(&BatchOutcome::Summarized(summary.clone())),
    }
}

pub fn format_degenerate(batch: &DegenerateBatch, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("warning: {}", batch.to_error()),
        OutputFormat::Json => to_json_line(&BatchOutcome::Degenerate(batch.clone())),
    }
}

pub fn format_completed(report: &RunReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!(
            "done: {} tasks ({} summarized, {} degenerate) in {:.2}ms",
            report.total_tasks,
            report.summarized,
            report.degenerate,
            report.elapsed.as_secs_f64() * 1000.0
        ),
        OutputFormat::Json => serde_json::json!({
            "event": "completed",
            "total_tasks": report.total_tasks,
            "summarized": report.summarized,
            "degenerate": report.degenerate,
            "elapsed_ms": report.elapsed.as_millis() as u64,
        })
        .to_string(),
    }
}

fn to_json_line(outcome: &BatchOutcome) -> String {
    serde_json::to_string(outcome).unwrap_or_else(|error| {
        tracing::error!(error = %error, "failed to serialize outcome");
        String::from("{}")
    })
}

/// 何もしない実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpReportSink;

impl NoOpReportSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportSink for NoOpReportSink {
    async fn report_generated(&self, _task: &Task) {}

    async fn report_outcome(&self, _outcome: &BatchOutcome) {}

    async fn report_completed(&self, _report: &RunReport) {}
}

/// メモリ内に記録する実装（テスト用）
/// Cloneしたインスタンス同士で記録を共有する
#[derive(Debug, Default, Clone)]
pub struct MemoryReportSink {
    generated: Arc<Mutex<Vec<Task>>>,
    outcomes: Arc<Mutex<Vec<BatchOutcome>>>,
    completed: Arc<Mutex<Option<RunReport>>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成されたタスク（報告順）
    pub fn generated(&self) -> Vec<Task> {
        self.generated.lock().unwrap().clone()
    }

    /// 処理結果（Consumerが処理した順）
    pub fn outcomes(&self) -> Vec<BatchOutcome> {
        self.outcomes.lock().unwrap().clone()
    }

    pub fn summaries(&self) -> Vec<Summary> {
        self.outcomes
            .lock()
            .unwrap()
            .iter()
            .filter_map(|outcome| outcome.summary().cloned())
            .collect()
    }

    pub fn completed(&self) -> Option<RunReport> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSink for MemoryReportSink {
    async fn report_generated(&self, task: &Task) {
        self.generated.lock().unwrap().push(task.clone());
    }

    async fn report_outcome(&self, outcome: &BatchOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }

    async fn report_completed(&self, report: &RunReport) {
        *self.completed.lock().unwrap() = Some(report.clone());
    }
}
