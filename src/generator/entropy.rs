// 乱数源の具象実装

use crate::core::{EntropyError, EntropyProvider, EntropySource};
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// `RngCore`を失敗可能な乱数源として扱うアダプタ
///
/// `try_fill_bytes`で値を取り出し、棄却サンプリングで`[0, bound)`へ写す。
#[derive(Debug, Clone)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: RngCore> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RngCore + Send> EntropySource for RngEntropy<R> {
    fn next_below(&mut self, bound: u32) -> Result<u32, EntropyError> {
        if bound == 0 {
            return Err(EntropyError::ZeroBound);
        }

        // boundの倍数に収まる範囲だけを採用（modulo bias回避）
        let span = 1u64 << 32;
        let limit = span - span % u64::from(bound);
        let mut buf = [0u8; 4];
        loop {
            self.rng.try_fill_bytes(&mut buf)?;
            let value = u64::from(u32::from_le_bytes(buf));
            if value < limit {
                return Ok((value % u64::from(bound)) as u32);
            }
        }
    }
}

/// OSの暗号論的乱数を使う既定の乱数源
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropyProvider;

impl OsEntropyProvider {
    pub fn new() -> Self {
        Self
    }
}

impl EntropyProvider for OsEntropyProvider {
    type Source = RngEntropy<OsRng>;

    fn source_for(&self, _producer_id: usize) -> Self::Source {
        RngEntropy::new(OsRng)
    }
}

/// シード付きの再現可能な乱数源
///
/// Producerごとに`seed + producer_id`で初期化するため、
/// 同じシードなら各Producerの配列列は毎回同じになる。
#[derive(Debug, Clone, Copy)]
pub struct SeededEntropyProvider {
    seed: u64,
}

impl SeededEntropyProvider {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl EntropyProvider for SeededEntropyProvider {
    type Source = RngEntropy<StdRng>;

    fn source_for(&self, producer_id: usize) -> Self::Source {
        RngEntropy::new(StdRng::seed_from_u64(
            self.seed.wrapping_add(producer_id as u64),
        ))
    }
}
