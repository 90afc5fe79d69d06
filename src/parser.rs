//! OCRテキスト解析のファサード
//!
//! パイプライン全体の配線だけを担当する:
//! 1. テキストクリーニング（OCR誤読修正）
//! 2. 3つのマッチング戦略を同じテキストへ独立適用
//! 3. 統合・重複排除・プレースホルダー追加・上限
//!
//! 期待する並び: `PlayerName GrossScore(+/-X) Handicap`
//! 例: `Acorm 38(+2) -2.2`

use crate::cleaner::TextCleaner;
use crate::config::Config;
use crate::corrections::CorrectionStore;
use crate::error::{GolfzonOcrError, Result};
use crate::extractor::Extractors;
use crate::matcher::{
    LineAnchorMatcher, Matcher, PlayerCandidate, ScoreAnchorMatcher, TableAnchorMatcher,
};
use crate::validator;

/// OCRテキストをクリーニングする（単体利用向けの薄いラッパ）
pub fn clean_ocr_text(text: &str, store: Option<&dyn CorrectionStore>) -> String {
    TextCleaner::new(store).clean(text)
}

/// OCRテキストからプレイヤーデータを解析する
///
/// スコアは検出できたが名前が見つからない場合、空名のプレースホルダーを
/// 作る（手動編集を前提に捨てない）。
///
/// `backup_ocr_text` には別のセグメンテーション設定で実行したOCR結果を
/// 渡せる。主テキストから1人も取れなかった場合のフォールバックとして
/// 同じパイプラインにかけられる。
///
/// # Errors
/// 入力が空または空白のみの場合 `GolfzonOcrError::EmptyInput`。
pub fn parse_players(
    ocr_text: &str,
    backup_ocr_text: Option<&str>,
    store: Option<&dyn CorrectionStore>,
    config: &Config,
) -> Result<Vec<PlayerCandidate>> {
    if ocr_text.trim().is_empty() {
        return Err(GolfzonOcrError::EmptyInput);
    }

    let players = run_pipeline(ocr_text, store, config);

    // 主テキストが全滅ならバックアップOCRで再試行する
    if players.is_empty() {
        if let Some(backup) = backup_ocr_text {
            if !backup.trim().is_empty() {
                return Ok(run_pipeline(backup, store, config));
            }
        }
    }

    Ok(players)
}

fn run_pipeline(
    ocr_text: &str,
    store: Option<&dyn CorrectionStore>,
    config: &Config,
) -> Vec<PlayerCandidate> {
    let cleaner = TextCleaner::new(store);
    let cleaned_text = cleaner.clean(ocr_text);

    let extractors = Extractors::new(config);

    let mut all_candidates = Vec::new();

    // 戦略1: スコア起点（スコアを先に見つけ、名前とハンディキャップを近傍から）
    all_candidates.extend(ScoreAnchorMatcher::new(&extractors).find_players(&cleaned_text));

    // 戦略2: 行単位
    all_candidates.extend(LineAnchorMatcher::new(&extractors).find_players(&cleaned_text));

    // 戦略3: 表形式
    all_candidates.extend(TableAnchorMatcher::new(&extractors).find_players(&cleaned_text));

    validator::validate_and_merge(all_candidates, &cleaned_text, &extractors, config)
}
