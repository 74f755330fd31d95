// テストユーティリティ
// 乱数源のスタブ実装

pub mod entropy;

// 公開API
pub use entropy::*;
