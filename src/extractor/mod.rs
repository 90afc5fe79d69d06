//! フィールド抽出モジュール
//!
//! スコア・ハンディキャップ・名前それぞれの抽出器と、
//! マッチング戦略が共有する抽出器バンドルを提供する。

pub mod handicap;
pub mod name;
pub mod score;

pub use handicap::HandicapExtractor;
pub use name::NameExtractor;
pub use score::{ScoreExtractor, ScoreMatch};

use crate::config::Config;

/// マッチング戦略へ渡す抽出器バンドル
///
/// 各戦略は継承ではなくこのバンドルの借用で抽出器を共有する。
#[derive(Debug, Clone, Default)]
pub struct Extractors {
    pub score: ScoreExtractor,
    pub handicap: HandicapExtractor,
    pub name: NameExtractor,
}

impl Extractors {
    pub fn new(config: &Config) -> Self {
        Self {
            score: ScoreExtractor::new(),
            handicap: HandicapExtractor::new(),
            name: NameExtractor::new(config.proximity.clone()),
        }
    }
}

/// バイト位置を直前のUTF-8文字境界へ丸める
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// バイト位置を直後のUTF-8文字境界へ丸める
pub(crate) fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}
