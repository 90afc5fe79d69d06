//! プレイヤーデータのマッチング戦略
//!
//! OCRの劣化は一様ではない。行がそのまま残ることもあれば、
//! 表の区切りだけ、あるいは孤立したスコアトークンだけが残ることもある。
//! 構造仮定の異なる3戦略を同じテキストに独立に適用し、
//! 結果を結合してからバリデータで統合する方が、単一戦略より頑健になる。

pub mod line_anchor;
pub mod score_anchor;
pub mod table_anchor;

pub use line_anchor::LineAnchorMatcher;
pub use score_anchor::ScoreAnchorMatcher;
pub use table_anchor::TableAnchorMatcher;

use serde::{Deserialize, Serialize};

/// プレイヤー候補レコード
///
/// 1回の解析で作られ、このサブシステムからは永続化されない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCandidate {
    /// プレイヤー名（検出できなければ空文字列）
    pub name: String,
    /// グロススコア
    pub gross_score: u32,
    /// ハンディキャップ
    pub handicap: f64,
}

impl PlayerCandidate {
    pub fn new(name: impl Into<String>, gross_score: u32, handicap: f64) -> Self {
        Self {
            name: name.into(),
            gross_score,
            handicap,
        }
    }

    /// 重複判定キー: (グロススコア, ハンディキャップの小数1桁丸め)
    ///
    /// このキーが一致する2レコードは物理的に同じプレイヤー行とみなす。
    pub fn dedup_key(&self) -> (u32, i64) {
        (self.gross_score, (self.handicap * 10.0).round() as i64)
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// 捕捉グループを統一形に正規化した生マッチ
///
/// 各戦略が正規表現の捕捉結果をフィールド解釈へ渡すための不変値型。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub name: String,
    pub score_text: String,
    pub handicap_text: Option<String>,
}

/// マッチング戦略のインターフェース
///
/// 各戦略はクリーニング済みテキストを走査し、候補レコードのリストを返す。
/// 見つからなければ空リスト（エラーではない）。
pub trait Matcher {
    fn find_players(&self, text: &str) -> Vec<PlayerCandidate>;
}
