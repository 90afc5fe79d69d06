//! 表形式のマッチング戦略
//!
//! パイプ等の区切りグリフに挟まれた行を解析単位とする。
//! OCRが表の罫線だけをうまく拾った場合に強い。

use super::{Matcher, PlayerCandidate};
use crate::extractor::{ceil_char_boundary, floor_char_boundary, Extractors};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// 行の前後に取る文脈窓（バイト）
const CONTEXT_BEFORE: usize = 100;
const CONTEXT_AFTER: usize = 200;

lazy_static! {
    /// 区切りグリフに挟まれた行から大文字始まりのトークンを取り出す
    static ref TABLE_ROW_PATTERN: Regex = Regex::new(r"\|.*?([A-Z][a-z0-9]{2,}).*?\|").unwrap();
    /// 括弧付きスコアがない場合の素の2〜3桁数値
    static ref BARE_NUMBER_PATTERN: Regex = Regex::new(r"\d{2,3}").unwrap();
}

pub struct TableAnchorMatcher<'a> {
    extractors: &'a Extractors,
}

impl<'a> TableAnchorMatcher<'a> {
    pub fn new(extractors: &'a Extractors) -> Self {
        Self { extractors }
    }

    /// 表の1行からプレイヤーを取り出す
    fn process_row(
        &self,
        name_raw: &str,
        row_start: usize,
        row_end: usize,
        text: &str,
    ) -> Option<PlayerCandidate> {
        let name = self.extractors.name.clean_name(name_raw);
        if !self.extractors.name.is_valid_name(&name) {
            return None;
        }

        // 行の前後に文脈窓を取り、その中でスコアとハンディキャップを探す
        let context_start = ceil_char_boundary(text, row_start.saturating_sub(CONTEXT_BEFORE));
        let context_end = floor_char_boundary(text, (row_end + CONTEXT_AFTER).min(text.len()));
        let context = &text[context_start..context_end];

        let gross_score = match self.extractors.score.find_score(context, 0) {
            Some(m) => m.value,
            // 括弧付きスコアがなければ素の2〜3桁数値で代用する
            None => self.find_bare_score(context)?,
        };

        let handicap = self.extractors.handicap.find_and_normalize(context, 0)?;

        Some(PlayerCandidate::new(name, gross_score, handicap))
    }

    /// 小数の一部ではない素の2〜3桁数値を探す
    fn find_bare_score(&self, context: &str) -> Option<u32> {
        for m in BARE_NUMBER_PATTERN.find_iter(context) {
            let next = context[m.end()..].chars().next();
            let part_of_decimal = matches!(next, Some(c) if c == '.' || c.is_ascii_digit());
            if part_of_decimal {
                continue;
            }
            if let Some(score) = self.extractors.score.parse_score(m.as_str()) {
                return Some(score);
            }
        }
        None
    }
}

impl Matcher for TableAnchorMatcher<'_> {
    fn find_players(&self, text: &str) -> Vec<PlayerCandidate> {
        let mut players: Vec<PlayerCandidate> = Vec::new();
        let mut seen_names: HashSet<String> = HashSet::new();

        for caps in TABLE_ROW_PATTERN.captures_iter(text) {
            let whole = caps.get(0).expect("group 0");
            let name_raw = caps.get(1).expect("group 1").as_str();

            if let Some(player) = self.process_row(name_raw, whole.start(), whole.end(), text) {
                if seen_names.insert(player.name.to_lowercase()) {
                    players.push(player);
                }
            }
        }

        players
    }
}
