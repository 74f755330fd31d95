// バッチ集計 - ソートして最小値・中央値・最大値を取り出す

use crate::core::{BatchOutcome, DegenerateBatch, Summary, Task};

/// タスクの配列をソートして集計
///
/// 中央値は`len / 2`（切り捨て）番目の要素。
/// 空配列は添字が存在しないため`Degenerate`として返す。
pub fn summarize(task: Task) -> BatchOutcome {
    let Task {
        producer_id,
        iteration,
        mut payload,
        created_at,
    } = task;

    payload.sort_unstable();

    match (
        payload.first(),
        payload.get(payload.len() / 2),
        payload.last(),
    ) {
        (Some(&min), Some(&median), Some(&max)) => BatchOutcome::Summarized(Summary {
            producer_id,
            iteration,
            created_at,
            min,
            median,
            max,
        }),
        _ => BatchOutcome::Degenerate(DegenerateBatch {
            producer_id,
            iteration,
            created_at,
            len: payload.len(),
        }),
    }
}
