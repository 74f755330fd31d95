// テスト用の乱数源スタブ
// 決められた値を順に返し、尽きたらエラーを返す

use batch_pipeline::{EntropyError, EntropyProvider, EntropySource};
use std::collections::{HashMap, VecDeque};

/// 用意した値を順番に返す乱数源
pub struct ScriptedEntropy {
    values: VecDeque<u32>,
    produced: usize,
}

impl ScriptedEntropy {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            produced: 0,
        }
    }
}

impl EntropySource for ScriptedEntropy {
    fn next_below(&mut self, bound: u32) -> Result<u32, EntropyError> {
        let value = self.values.pop_front().ok_or(EntropyError::Exhausted {
            produced: self.produced,
        })?;
        self.produced += 1;
        Ok(value % bound)
    }
}

/// Producerごとに固定の値列を払い出す
#[derive(Default)]
pub struct ScriptedEntropyProvider {
    scripts: HashMap<usize, Vec<u32>>,
    fallback: Vec<u32>,
}

impl ScriptedEntropyProvider {
    /// 全Producerに同じ値列を渡す
    pub fn shared(values: Vec<u32>) -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: values,
        }
    }

    /// 特定のProducerだけ値列を差し替える
    pub fn with_script(mut self, producer_id: usize, values: Vec<u32>) -> Self {
        self.scripts.insert(producer_id, values);
        self
    }
}

impl EntropyProvider for ScriptedEntropyProvider {
    type Source = ScriptedEntropy;

    fn source_for(&self, producer_id: usize) -> Self::Source {
        let values = self.scripts.get(&producer_id).unwrap_or(&self.fallback);
        ScriptedEntropy::new(values.clone())
    }
}

/// 値を無限に返す乱数源（`producer_id * 1000 + 連番`）
pub struct CountingEntropyProvider;

pub struct CountingEntropy {
    base: u32,
    next: u32,
}

impl EntropySource for CountingEntropy {
    fn next_below(&mut self, bound: u32) -> Result<u32, EntropyError> {
        let value = (self.base + self.next) % bound;
        self.next += 1;
        Ok(value)
    }
}

impl EntropyProvider for CountingEntropyProvider {
    type Source = CountingEntropy;

    fn source_for(&self, producer_id: usize) -> Self::Source {
        CountingEntropy {
            base: producer_id as u32 * 1_000,
            next: 0,
        }
    }
}
