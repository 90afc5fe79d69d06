//! 行単位のマッチング戦略
//!
//! 各行を独立に処理し、特異度の高いパターンから順に試す。
//! プレイヤーデータが1行に収まっている（または数行に跨る）場合に強い。

use super::{Matcher, PlayerCandidate, RawMatch};
use crate::extractor::Extractors;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// 行パターン（特異度降順）。名前はgroup(1)、スコアはgroup(2)、
    /// ハンディキャップは存在すればgroup(3)。
    static ref LINE_PATTERNS: Vec<Regex> = vec![
        // 完全な小数ハンディキャップまで同一行にある
        Regex::new(r"([A-Z][a-z0-9]+(?:[A-Z][a-z0-9]+)*).*?(\d{2,3})\(.*?([+\-]\d+\.\d+)")
            .unwrap(),
        // ハンディキャップがドットで途切れている
        Regex::new(r"([A-Z][a-z0-9]+(?:[A-Z][a-z0-9]+)*).*?(\d{2,3})\(.*?([+\-]\d+\.)").unwrap(),
        // 括弧が消えたスコア + 数値列
        Regex::new(r"([A-Z][a-z0-9]+(?:[A-Z][a-z0-9]+)*).*?(\d{2,3})\s+[+\-]?\d+\s+([+\-]\d+\.?\d*)")
            .unwrap(),
        // 名前と数値だけの緩い形
        Regex::new(r"([A-Z][a-z0-9]+(?:[A-Z][a-z0-9]+)*).*?(\d{2,3})\s*([+\-]\d+)").unwrap(),
        // スコアのみ。ハンディキャップは別途探す
        Regex::new(r"([A-Z][a-z0-9]+(?:[A-Z][a-z0-9]+)*).*?(\d{2,3})\s*\([+\-]?\d+\)?").unwrap(),
    ];
}

pub struct LineAnchorMatcher<'a> {
    extractors: &'a Extractors,
}

impl<'a> LineAnchorMatcher<'a> {
    pub fn new(extractors: &'a Extractors) -> Self {
        Self { extractors }
    }

    /// 1行からプレイヤーを取り出す。最初に成立したパターンを採用する
    fn process_line(&self, line: &str, all_lines: &[&str], line_idx: usize) -> Option<PlayerCandidate> {
        for pattern in LINE_PATTERNS.iter() {
            for caps in pattern.captures_iter(line) {
                let raw = RawMatch {
                    name: caps[1].trim().to_string(),
                    score_text: caps[2].to_string(),
                    handicap_text: caps.get(3).map(|g| g.as_str().to_string()),
                };
                if let Some(player) = self.resolve(raw, line, all_lines, line_idx) {
                    return Some(player);
                }
            }
        }

        None
    }

    /// 生マッチを検証済みの候補レコードへ解決する
    fn resolve(
        &self,
        raw: RawMatch,
        line: &str,
        all_lines: &[&str],
        line_idx: usize,
    ) -> Option<PlayerCandidate> {
        let name = self.extractors.name.clean_name(&raw.name);
        if !self.extractors.name.is_valid_name(&name) {
            return None;
        }

        let gross_score = self.extractors.score.parse_score(&raw.score_text)?;

        // まず捕捉されたハンディキャップを試す
        let mut handicap = raw
            .handicap_text
            .as_deref()
            .and_then(|h| self.extractors.handicap.normalize(h).ok());

        // なければ同じ行を探す
        if handicap.is_none() {
            handicap = self.extractors.handicap.find_and_normalize(line, 0);
        }

        // それでもなければ続く2行まで探す
        if handicap.is_none() {
            for next_line in all_lines.iter().skip(line_idx + 1).take(2) {
                handicap = self.extractors.handicap.find_and_normalize(next_line, 0);
                if handicap.is_some() {
                    break;
                }
            }
        }

        // ハンディキャップのないレコードは作らない
        let handicap = handicap?;

        Some(PlayerCandidate::new(name, gross_score, handicap))
    }
}

impl Matcher for LineAnchorMatcher<'_> {
    fn find_players(&self, text: &str) -> Vec<PlayerCandidate> {
        let mut players: Vec<PlayerCandidate> = Vec::new();
        let mut seen_names: HashSet<String> = HashSet::new();
        let lines: Vec<&str> = text.split('\n').collect();

        for (line_idx, line) in lines.iter().enumerate() {
            if let Some(player) = self.process_line(line, &lines, line_idx) {
                if seen_names.insert(player.name.to_lowercase()) {
                    players.push(player);
                }
            }
        }

        players
    }
}
