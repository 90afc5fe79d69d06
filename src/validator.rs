//! 候補レコードの統合と検証
//!
//! 全戦略の候補リストを結合した後の、重複排除・名前補完・
//! プレースホルダー作成・件数上限を担当する。

use crate::config::Config;
use crate::extractor::Extractors;
use crate::matcher::PlayerCandidate;
use crate::patterns::{MAX_GROSS_SCORE, MAX_HANDICAP, MIN_GROSS_SCORE, MIN_HANDICAP};
use std::collections::HashSet;

/// 候補レコードが数値不変条件を満たすか
pub fn is_valid_player(player: &PlayerCandidate) -> bool {
    (MIN_GROSS_SCORE..=MAX_GROSS_SCORE).contains(&player.gross_score)
        && (MIN_HANDICAP..=MAX_HANDICAP).contains(&player.handicap)
}

/// 全戦略の候補を統合して最終リストを作る
///
/// 1. 数値範囲外の候補を捨てる
/// 2. 重複キー (スコア, ハンディキャップ小数1桁) で統合。
///    先勝ちだが、空名のレコードは後から来た名前付きで上書きされる
/// 3. どの候補にも拾われなかったスコアを再走査し、後方100バイト以内に
///    ハンディキャップがあれば空名のプレースホルダーとして追加する
///    （人間が後から名前を埋められるように、捨てずに残す）
/// 4. 上限（6件）を超えたら名前付きを優先して切り詰める
///
/// 出力はネットスコア順には並べない。最終的な並び替えは呼び出し側の責務。
pub fn validate_and_merge(
    candidates: Vec<PlayerCandidate>,
    cleaned_text: &str,
    extractors: &Extractors,
    config: &Config,
) -> Vec<PlayerCandidate> {
    let mut players = merge_by_key(candidates);

    add_placeholders(&mut players, cleaned_text, extractors, config);

    limit_to_max(&mut players, config.max_players);

    players
}

/// 重複キーで統合する。名前付きレコードが常に空名レコードに勝つ
fn merge_by_key(candidates: Vec<PlayerCandidate>) -> Vec<PlayerCandidate> {
    let mut players: Vec<PlayerCandidate> = Vec::new();

    for candidate in candidates {
        if !is_valid_player(&candidate) {
            continue;
        }

        let key = candidate.dedup_key();
        match players.iter_mut().find(|p| p.dedup_key() == key) {
            Some(existing) => {
                if !existing.has_name() && candidate.has_name() {
                    existing.name = candidate.name;
                }
            }
            None => players.push(candidate),
        }
    }

    players
}

/// 未使用のスコアからプレースホルダーを作る
fn add_placeholders(
    players: &mut Vec<PlayerCandidate>,
    cleaned_text: &str,
    extractors: &Extractors,
    config: &Config,
) {
    let mut existing: HashSet<(u32, i64)> = players.iter().map(|p| p.dedup_key()).collect();

    for score in extractors.score.find_all_scores(cleaned_text) {
        if players.len() >= config.max_players {
            break;
        }

        let window_end = score.end + config.placeholder_window;
        let after = &cleaned_text
            [score.end..crate::extractor::floor_char_boundary(cleaned_text, window_end.min(cleaned_text.len()))];

        let handicap = match extractors.handicap.find_and_normalize(after, 0) {
            Some(h) => h,
            None => continue,
        };

        let placeholder = PlayerCandidate::new("", score.value, handicap);
        if existing.insert(placeholder.dedup_key()) {
            players.push(placeholder);
        }
    }
}

/// 上限を超えた場合、(空名か, スコア) の昇順で安定ソートして切り詰める
fn limit_to_max(players: &mut Vec<PlayerCandidate>, max_players: usize) {
    if players.len() <= max_players {
        return;
    }

    players.sort_by_key(|p| (!p.has_name(), p.gross_score));
    players.truncate(max_players);
}
