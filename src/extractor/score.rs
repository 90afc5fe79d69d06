//! グロススコアの検出と検証

use crate::patterns::{self, MAX_GROSS_SCORE, MIN_GROSS_SCORE};

/// スコアの一致結果（値とテキスト内のバイト範囲）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreMatch {
    pub value: u32,
    pub start: usize,
    pub end: usize,
}

/// グロススコア抽出器
///
/// "38(+2)" のような 2〜3桁 + 括弧付き符号差分 の形を検出する。
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreExtractor;

impl ScoreExtractor {
    pub fn new() -> Self {
        Self
    }

    /// `start_pos` 以降で最初のスコアを探す
    pub fn find_score(&self, text: &str, start_pos: usize) -> Option<ScoreMatch> {
        let start_pos = super::ceil_char_boundary(text, start_pos);
        let search_text = &text[start_pos..];

        for caps in patterns::SCORE_PATTERN.captures_iter(search_text) {
            let whole = caps.get(0).expect("group 0");
            if let Ok(value) = caps[1].parse::<u32>() {
                if self.is_valid_score(value) {
                    return Some(ScoreMatch {
                        value,
                        start: start_pos + whole.start(),
                        end: start_pos + whole.end(),
                    });
                }
            }
        }

        None
    }

    /// テキスト中の全スコアを出現順で返す
    pub fn find_all_scores(&self, text: &str) -> Vec<ScoreMatch> {
        patterns::SCORE_PATTERN
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0).expect("group 0");
                let value: u32 = caps[1].parse().ok()?;
                if self.is_valid_score(value) {
                    Some(ScoreMatch {
                        value,
                        start: whole.start(),
                        end: whole.end(),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// スコアが有効範囲内か
    pub fn is_valid_score(&self, score: u32) -> bool {
        (MIN_GROSS_SCORE..=MAX_GROSS_SCORE).contains(&score)
    }

    /// 文字列をスコアとして解釈する（範囲外はNone）
    pub fn parse_score(&self, score_str: &str) -> Option<u32> {
        let score: u32 = score_str.trim().parse().ok()?;
        if self.is_valid_score(score) {
            Some(score)
        } else {
            None
        }
    }
}
