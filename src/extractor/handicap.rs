//! ハンディキャップの検出と正規化

use crate::error::{GolfzonOcrError, Result};
use crate::patterns::{self, MAX_HANDICAP, MIN_HANDICAP};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // 正規化時の文字誤読修正（"iL"→"11"、数字直後のI→1、l/iが小数点）
    static ref FIX_IL: Regex = Regex::new(r"(?i)iL").unwrap();
    static ref FIX_TRAILING_I: Regex = Regex::new(r"(\d+)I").unwrap();
    static ref FIX_L_AS_DOT: Regex = Regex::new(r"(\d+)l(\d+)").unwrap();
    static ref FIX_I_AS_DOT: Regex = Regex::new(r"(\d+)i(\d+)").unwrap();
}

/// ハンディキャップ抽出器
///
/// 完全な小数 → ドット終わり → 整数 の順で探す。
#[derive(Debug, Clone, Copy, Default)]
pub struct HandicapExtractor;

impl HandicapExtractor {
    pub fn new() -> Self {
        Self
    }

    /// `start_pos` 以降で最初のハンディキャップ候補文字列を探す
    pub fn find_handicap(&self, text: &str, start_pos: usize) -> Option<String> {
        let start_pos = super::ceil_char_boundary(text, start_pos);
        let search_text = &text[start_pos..];

        // 1. 完全な小数 "+11.4"
        if let Some(caps) = patterns::HANDICAP_DECIMAL_PATTERN.captures(search_text) {
            return Some(caps[1].to_string());
        }

        // 2. ドット終わり "+16."
        if let Some(caps) = patterns::HANDICAP_TRAILING_DOT_PATTERN.captures(search_text) {
            return Some(caps[1].to_string());
        }

        // 3. 整数 "+11"（後続が数字・ドットなら小数の一部なので除外。
        //    regexクレートに先読みがないため手動で確認する）
        for m in patterns::HANDICAP_INTEGER_PATTERN.find_iter(search_text) {
            let next = search_text[m.end()..].chars().next();
            let part_of_decimal = matches!(next, Some(c) if c == '.' || c.is_ascii_digit());
            if !part_of_decimal {
                return Some(m.as_str().to_string());
            }
        }

        None
    }

    /// 生のハンディキャップ文字列をf64へ正規化する
    ///
    /// OCR誤読の典型を修正する:
    /// - 小数点の欠落: "+5" -> 5.0、"-22" -> -2.2
    /// - 不完全な小数: "+16." -> 16.1
    /// - 文字誤読: "iL" -> "11"、数字直後の "I" -> "1"
    ///
    /// 範囲 [-50, 50] を外れた値は正規化エラー。
    pub fn normalize(&self, handicap_str: &str) -> Result<f64> {
        let mut value = handicap_str.trim().to_string();

        value = FIX_IL.replace_all(&value, "11").to_string();
        value = FIX_TRAILING_I.replace_all(&value, "${1}1").to_string();
        value = FIX_L_AS_DOT.replace_all(&value, "${1}.${2}").to_string();
        value = FIX_I_AS_DOT.replace_all(&value, "${1}.${2}").to_string();

        if value.ends_with('.') {
            // 欠けた小数部はデフォルトの1で補完
            value.push('1');
        } else if !value.contains('.') {
            if value.chars().count() > 2 {
                // "-22" -> "-2.2"（最後の桁を小数部とみなす）
                let split = value.len() - 1;
                value.insert(split, '.');
            } else {
                // "+5" -> "+5.0"
                value.push_str(".0");
            }
        }

        let handicap: f64 = value.parse().map_err(|_| {
            GolfzonOcrError::Normalization(format!("ハンディキャップを解釈できません: {}", value))
        })?;

        if !(MIN_HANDICAP..=MAX_HANDICAP).contains(&handicap) {
            return Err(GolfzonOcrError::Normalization(format!(
                "ハンディキャップ {} が範囲外です",
                handicap
            )));
        }

        Ok(handicap)
    }

    /// 検出と正規化を一度に行う（失敗はNoneに吸収する）
    pub fn find_and_normalize(&self, text: &str, start_pos: usize) -> Option<f64> {
        let raw = self.find_handicap(text, start_pos)?;
        self.normalize(&raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trailing_dot() {
        let ex = HandicapExtractor::new();
        assert!((ex.normalize("+16.").unwrap() - 16.1).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_missing_decimal() {
        let ex = HandicapExtractor::new();
        assert!((ex.normalize("-22").unwrap() - (-2.2)).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_single_digit() {
        let ex = HandicapExtractor::new();
        assert!((ex.normalize("+5").unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_full_decimal_unchanged() {
        let ex = HandicapExtractor::new();
        assert!((ex.normalize("+11.4").unwrap() - 11.4).abs() < 1e-9);
        assert!((ex.normalize("-2.2").unwrap() - (-2.2)).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_letter_confusions() {
        let ex = HandicapExtractor::new();
        // "+iL.4" -> "+11.4"
        assert!((ex.normalize("+iL.4").unwrap() - 11.4).abs() < 1e-9);
        // "+16l1" -> "+16.1"
        assert!((ex.normalize("+16l1").unwrap() - 16.1).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_out_of_range() {
        let ex = HandicapExtractor::new();
        assert!(ex.normalize("+99.9").is_err());
    }

    #[test]
    fn test_find_handicap_prefers_full_decimal() {
        let ex = HandicapExtractor::new();
        assert_eq!(ex.find_handicap("+5 then +11.4", 0).as_deref(), Some("+11.4"));
    }

    #[test]
    fn test_find_handicap_integer_not_decimal_prefix() {
        let ex = HandicapExtractor::new();
        // "+16.1" の "+16" を整数として拾わない
        assert_eq!(ex.find_handicap("text +16.1", 0).as_deref(), Some("+16.1"));
        assert_eq!(ex.find_handicap("text +7 end", 0).as_deref(), Some("+7"));
    }

    #[test]
    fn test_find_and_normalize_swallows_errors() {
        let ex = HandicapExtractor::new();
        assert_eq!(ex.find_and_normalize("+99.9", 0), None);
        assert!((ex.find_and_normalize("x -2.2 y", 0).unwrap() - (-2.2)).abs() < 1e-9);
    }
}
