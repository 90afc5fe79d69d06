//! プレイヤー名の検出とクリーニング
//!
//! Golfzonの並び（スコア → ハンディキャップ → 名前）を前提に、
//! アンカー位置の前後を重み付きで探索する。

use crate::config::ProximityConfig;
use crate::patterns;

/// 名前候補（探索窓内での一致）
#[derive(Debug, Clone)]
struct NameCandidate {
    name: String,
    /// アンカーからの生距離（バイト）
    distance: usize,
    /// アンカー後方の一致か
    is_after: bool,
}

/// プレイヤー名抽出器
#[derive(Debug, Clone)]
pub struct NameExtractor {
    proximity: ProximityConfig,
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new(ProximityConfig::default())
    }
}

impl NameExtractor {
    pub fn new(proximity: ProximityConfig) -> Self {
        Self { proximity }
    }

    /// アンカー位置に最も近い名前を探す
    ///
    /// 前方（`search_before`バイト）と後方（`search_after`バイト）の両方を
    /// 探索し、実効距離 = 生距離 × 近接重み でソートする。後方100バイト以内は
    /// ×0.3で強く優先、前方50バイト以内は×3.0で劣後（前のプレイヤーの名前で
    /// ある可能性が高い）。同距離の場合は安定ソートによりパターン優先度順。
    pub fn find_closest_name(
        &self,
        text: &str,
        position: usize,
        search_before: usize,
        search_after: usize,
    ) -> Option<String> {
        let position = super::floor_char_boundary(text, position);
        let before_start = super::ceil_char_boundary(text, position.saturating_sub(search_before));
        let after_end = super::floor_char_boundary(
            text,
            (position + search_after).min(text.len()),
        );

        let before_text = &text[before_start..position];
        let after_text = &text[position..after_end];

        let mut candidates = Vec::new();

        // 前方の探索（距離 = 一致終端からアンカーまで）
        for (name, _, match_end) in self.find_name_matches(before_text) {
            if self.is_valid_name(&name) {
                candidates.push(NameCandidate {
                    name,
                    distance: before_text.len() - match_end,
                    is_after: false,
                });
            }
        }

        // 後方の探索（優先方向、距離 = アンカーから一致先頭まで）
        for (name, match_start, _) in self.find_name_matches(after_text) {
            if self.is_valid_name(&name) {
                candidates.push(NameCandidate {
                    name,
                    distance: match_start,
                    is_after: true,
                });
            }
        }

        if candidates.is_empty() {
            return None;
        }

        // 実効距離でソート（安定ソートなので同値はパターン優先度順のまま）
        candidates.sort_by(|a, b| {
            let ea = self.effective_distance(a);
            let eb = self.effective_distance(b);
            ea.partial_cmp(&eb).unwrap_or(std::cmp::Ordering::Equal)
        });

        Some(self.clean_name(&candidates[0].name))
    }

    fn effective_distance(&self, candidate: &NameCandidate) -> f64 {
        let distance = candidate.distance as f64;
        if candidate.is_after && candidate.distance < self.proximity.after_window {
            distance * self.proximity.after_weight
        } else if !candidate.is_after && candidate.distance < self.proximity.before_window {
            distance * self.proximity.before_weight
        } else {
            distance
        }
    }

    /// テキスト中の名前一致を（名前, 一致先頭, 一致終端）のリストで返す
    ///
    /// 既知フィクスチャのパターンを汎用パターンより先に並べる。
    fn find_name_matches(&self, text: &str) -> Vec<(String, usize, usize)> {
        let mut matches = Vec::new();

        let all_patterns = patterns::FIXTURE_NAME_PATTERNS
            .iter()
            .chain(patterns::NAME_PATTERNS.iter());

        for pattern in all_patterns {
            for caps in pattern.captures_iter(text) {
                if let Some(group) = caps.get(1) {
                    let whole = caps.get(0).expect("group 0");
                    matches.push((group.as_str().to_string(), whole.start(), whole.end()));
                }
            }
        }

        matches
    }

    /// 名前の妥当性チェック
    ///
    /// 短すぎる名前、除外語彙、短い全大文字（見出しの可能性が高い）を弾く。
    pub fn is_valid_name(&self, name: &str) -> bool {
        let char_count = name.chars().count();

        if char_count < patterns::MIN_NAME_LENGTH {
            return false;
        }

        if patterns::is_excluded_word(name) {
            return false;
        }

        let is_upper = name.chars().all(|c| !c.is_lowercase());
        if is_upper && char_count < 4 {
            return false;
        }

        true
    }

    /// OCRアーティファクトを除去した名前を返す
    pub fn clean_name(&self, name: &str) -> String {
        patterns::clean_name(name)
    }

    /// 設定された探索窓（前方, 後方）を返す
    pub fn search_windows(&self) -> (usize, usize) {
        (self.proximity.search_before, self.proximity.search_after)
    }

    /// テキスト中の有効な名前をすべて返す（重複は小文字比較で除外）
    pub fn find_all_names(&self, text: &str) -> Vec<String> {
        let mut names = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for (raw, _, _) in self.find_name_matches(text) {
            if !self.is_valid_name(&raw) {
                continue;
            }
            let cleaned = self.clean_name(&raw);
            if cleaned.is_empty() {
                continue;
            }
            if seen.insert(cleaned.to_lowercase()) {
                names.push(cleaned);
            }
        }

        names
    }
}
