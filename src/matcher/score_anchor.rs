//! スコア起点のマッチング戦略
//!
//! まずスコアを全て列挙し、それぞれの近傍からハンディキャップと名前を探す。
//! スコア → ハンディキャップ → 名前 という典型的なGolfzonレイアウトに強い。

use super::{Matcher, PlayerCandidate};
use crate::extractor::{Extractors, ScoreMatch};
use std::collections::HashSet;

pub struct ScoreAnchorMatcher<'a> {
    extractors: &'a Extractors,
}

impl<'a> ScoreAnchorMatcher<'a> {
    pub fn new(extractors: &'a Extractors) -> Self {
        Self { extractors }
    }

    /// 現在のスコアの次に現れるスコアの先頭位置を返す
    ///
    /// ハンディキャップ探索を次のプレイヤーのデータ手前で打ち切るために使う。
    fn next_score_start(&self, text: &str, current_end: usize, all_scores: &[ScoreMatch]) -> usize {
        all_scores
            .iter()
            .find(|s| s.start > current_end)
            .map(|s| s.start)
            .unwrap_or(text.len())
    }
}

impl Matcher for ScoreAnchorMatcher<'_> {
    fn find_players(&self, text: &str) -> Vec<PlayerCandidate> {
        let mut players = Vec::new();
        let mut seen: HashSet<(u32, i64)> = HashSet::new();

        let all_scores = self.extractors.score.find_all_scores(text);

        for score in &all_scores {
            // ハンディキャップはこのスコアと次のスコアの間だけを探す
            let search_end = self.next_score_start(text, score.end, &all_scores);
            let between = &text[score.end..search_end];

            let handicap = match self.extractors.handicap.find_and_normalize(between, 0) {
                Some(h) => h,
                // ハンディキャップのないレコードはネットスコアを計算できず無意味
                None => continue,
            };

            let (before, after) = self.extractors.name.search_windows();
            let name = self
                .extractors
                .name
                .find_closest_name(text, score.start, before, after)
                .unwrap_or_default();

            let candidate = PlayerCandidate::new(name, score.value, handicap);
            if seen.insert(candidate.dedup_key()) {
                players.push(candidate);
            }
        }

        players
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractors() -> Extractors {
        Extractors::default()
    }

    #[test]
    fn test_finds_players_with_names() {
        let ex = extractors();
        let matcher = ScoreAnchorMatcher::new(&ex);
        let players =
            matcher.find_players("Acorm 38(+2) -2.2\nCjdyer 41(+5) +16.1\nLcrostarosa 43(+7) +11.4");

        assert_eq!(players.len(), 3);
        assert_eq!(players[0].name, "Acorm");
        assert_eq!(players[0].gross_score, 38);
        assert!((players[0].handicap - (-2.2)).abs() < 1e-9);
        assert_eq!(players[1].name, "Cjdyer");
        assert_eq!(players[2].name, "Lcrostarosa");
    }

    #[test]
    fn test_skips_score_without_handicap() {
        let ex = extractors();
        let matcher = ScoreAnchorMatcher::new(&ex);
        // 38(+2) の後ろ（次のスコアまで）にハンディキャップがない
        let players = matcher.find_players("Acorm 38(+2) text\nCjdyer 41(+5) +16.1");

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].gross_score, 41);
    }

    #[test]
    fn test_handicap_search_does_not_cross_next_score() {
        let ex = extractors();
        let matcher = ScoreAnchorMatcher::new(&ex);
        // 最初のスコアのハンディキャップ探索は 41(+5) の手前で止まる。
        // +16.1 は2人目のものであり、1人目に割り当ててはいけない
        let players = matcher.find_players("38(+2) noise 41(+5) +16.1");

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].gross_score, 41);
        assert!((players[0].handicap - 16.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_name_when_none_nearby() {
        let ex = extractors();
        let matcher = ScoreAnchorMatcher::new(&ex);
        let players = matcher.find_players("38(+2) -2.2");

        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "");
    }

    #[test]
    fn test_in_strategy_dedup() {
        let ex = extractors();
        let matcher = ScoreAnchorMatcher::new(&ex);
        let players = matcher.find_players("Acorm 38(+2) -2.2\nAcorm 38(+2) -2.2");

        assert_eq!(players.len(), 1);
    }

    #[test]
    fn test_no_scores_returns_empty() {
        let ex = extractors();
        let matcher = ScoreAnchorMatcher::new(&ex);
        assert!(matcher.find_players("nothing to see here").is_empty());
    }
}
