//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use golfzon_ocr_rust::config::Config;
use golfzon_ocr_rust::error::GolfzonOcrError;
use golfzon_ocr_rust::extractor::HandicapExtractor;
use golfzon_ocr_rust::parser::parse_players;

/// 空入力は部分出力なしで即エラー
#[test]
fn test_empty_input() {
    let result = parse_players("", None, None, &Config::default());
    assert!(matches!(result, Err(GolfzonOcrError::EmptyInput)));
}

/// 空白のみの入力も空扱い
#[test]
fn test_blank_input() {
    let result = parse_players(" \t \n ", None, None, &Config::default());
    assert!(matches!(result, Err(GolfzonOcrError::EmptyInput)));
}

/// 範囲外のハンディキャップは正規化エラー
#[test]
fn test_handicap_out_of_range_is_normalization_error() {
    let ex = HandicapExtractor::new();
    let err = ex.normalize("+99.9").unwrap_err();
    assert!(matches!(err, GolfzonOcrError::Normalization(_)));
}

/// 正規化エラーは該当候補だけに閉じ、実行全体を止めない
#[test]
fn test_normalization_error_confined_to_candidate() {
    // +99.9 は範囲外だが、残りのプレイヤーは復元される
    let players = parse_players(
        "Acorm 38(+2) +99.9\nCjdyer 41(+5) +16.1",
        None,
        None,
        &Config::default(),
    )
    .unwrap();

    assert!(players.iter().any(|p| p.gross_score == 41));
    assert!(players.iter().all(|p| p.handicap.abs() <= 50.0));
}

/// GolfzonOcrErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        GolfzonOcrError::EmptyInput,
        GolfzonOcrError::Normalization("テスト".to_string()),
        GolfzonOcrError::Config("テスト設定エラー".to_string()),
        GolfzonOcrError::FileNotFound("scorecard.txt".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty());
    }
}
