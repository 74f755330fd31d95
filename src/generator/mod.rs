// 配列生成
// 乱数源から指定長の整数列を作る。状態も並行性も持たない

pub mod entropy;

pub use entropy::{OsEntropyProvider, RngEntropy, SeededEntropyProvider};

use crate::core::{EntropyError, EntropySource};

/// `[0, bound)`の乱数を`len`個並べた配列を生成
///
/// 乱数源が1回でも失敗した場合は配列を返さずにエラーとする。
pub fn generate_array<E>(len: usize, bound: u32, source: &mut E) -> Result<Vec<u32>, EntropyError>
where
    E: EntropySource + ?Sized,
{
    (0..len).map(|_| source.next_below(bound)).collect()
}
