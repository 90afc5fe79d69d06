//! OCRテキストのクリーニング
//!
//! マッチング前にテキスト全体のノイズを落とし、典型的なOCR誤読を直す。
//! 決定的な純関数（任意の修正ストアを除く）で、失敗しない。
//! 直せない断片はそのまま残し、抽出器側の再試行に委ねる。

use crate::corrections::{self, CorrectionCategory, CorrectionStore};
use crate::patterns;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPACE_RUN: Regex = Regex::new(r"[ \t]+").unwrap();
    // 符号付き2桁（小数点欠落の疑い）
    static ref SIGNED_TWO_DIGITS: Regex = Regex::new(r"[+\-]\d\d").unwrap();
    // 4桁+閉じ括弧（"4347)" → "43(+47)" の疑い）
    static ref FOUR_DIGITS_PAREN: Regex = Regex::new(r"\d{4}\)").unwrap();
}

/// テキストクリーナー
///
/// 修正ストアが与えられた場合、学習済み修正の書き換えも行う。
pub struct TextCleaner<'a> {
    store: Option<&'a dyn CorrectionStore>,
}

impl<'a> TextCleaner<'a> {
    pub fn new(store: Option<&'a dyn CorrectionStore>) -> Self {
        Self { store }
    }

    /// OCRテキストをクリーニングする
    ///
    /// 処理順:
    /// 1. ノイズ行の除去
    /// 2. OCR文字置換（汎用テーブル → 既知フィクスチャテーブル）
    /// 3. 学習済み修正の適用（ストアがある場合）
    /// 4. 数値パターンの第二修正パス（部分クリーニング後の文脈に依存）
    /// 5. 同一文字繰り返し行の除去
    /// 6. スペース・タブ連続の圧縮（改行は保持）
    pub fn clean(&self, text: &str) -> String {
        let mut result = remove_noise_lines(text);

        result = patterns::apply_text_fixes(&result);
        result = patterns::apply_fixture_fixes(&result);

        if let Some(store) = self.store {
            result = corrections::apply_corrections(store, &result, CorrectionCategory::Name);
        }

        result = fix_handicap_patterns(&result);
        result = fix_score_patterns(&result);

        result = remove_repeated_char_lines(&result);

        SPACE_RUN.replace_all(&result, " ").to_string()
    }
}

/// 意味のある文字（英数字）が少なすぎる行を落とす
///
/// 比率30%未満でも英数字が3文字以上あれば短い有効行として残す。
fn remove_noise_lines(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .filter(|line| {
            let meaningful = line.chars().filter(|c| c.is_alphanumeric()).count();
            let total = line.trim().chars().count();

            if total == 0 {
                return false;
            }

            meaningful as f64 / total as f64 > 0.3 || meaningful >= 3
        })
        .collect();

    lines.join("\n")
}

/// 小数点が欠けたハンディキャップを直す: "-22" → "-2.2"
///
/// 適用条件:
/// - 2桁の値が50以下（50超はハンディキャップではない）
/// - 符号の直前が `(` でない（"43(+13)" のスコア差分を壊さない）
/// - 直後が数字・ドットでない（既に正しい小数の一部を壊さない）
fn fix_handicap_patterns(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for m in SIGNED_TWO_DIGITS.find_iter(text) {
        if m.start() < last_end {
            continue;
        }

        let preceded_by_paren = text[..m.start()].chars().next_back() == Some('(');
        let next = text[m.end()..].chars().next();
        let followed_by_fraction = matches!(next, Some(c) if c == '.' || c.is_ascii_digit());

        let digits = &m.as_str()[1..];
        let value: u32 = digits.parse().unwrap_or(u32::MAX);

        result.push_str(&text[last_end..m.start()]);
        if !preceded_by_paren && !followed_by_fraction && value <= 50 {
            let sign = &m.as_str()[..1];
            result.push_str(sign);
            result.push_str(&digits[..1]);
            result.push('.');
            result.push_str(&digits[1..]);
        } else {
            result.push_str(m.as_str());
        }
        last_end = m.end();
    }

    result.push_str(&text[last_end..]);
    result
}

/// 括弧が潰れたスコアを直す: "4347)" → "43(+47)"
///
/// 4桁+閉じ括弧のうち、後ろ2桁を差分と解釈して50以下の場合のみ書き換える。
/// 先頭が `(` の直後なら既に正しい差分トークンなので触らない。
fn fix_score_patterns(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for m in FOUR_DIGITS_PAREN.find_iter(text) {
        if m.start() < last_end {
            continue;
        }

        let preceded_by_paren = text[..m.start()].chars().next_back() == Some('(');
        let next = text[m.end()..].chars().next();
        let followed_by_digit = matches!(next, Some(c) if c.is_ascii_digit());

        let digits = &m.as_str()[..4];
        let differential: u32 = digits[2..].parse().unwrap_or(u32::MAX);

        result.push_str(&text[last_end..m.start()]);
        if !preceded_by_paren && !followed_by_digit && differential <= 50 {
            result.push_str(&digits[..2]);
            result.push_str("(+");
            result.push_str(&digits[2..]);
            result.push(')');
        } else {
            result.push_str(m.as_str());
        }
        last_end = m.end();
    }

    result.push_str(&text[last_end..]);
    result
}

/// ほぼ同一文字の繰り返しでできた行（罫線など）を落とす
fn remove_repeated_char_lines(text: &str) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            let unique: std::collections::HashSet<char> =
                trimmed.chars().filter(|c| *c != ' ').collect();
            unique.len() >= 2 || trimmed.chars().count() >= 5
        })
        .collect();

    lines.join("\n")
}
