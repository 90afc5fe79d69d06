//! 解析パイプラインの結合テスト
//!
//! クリーニング → 3戦略 → 統合 までを実テキストで検証する

use golfzon_ocr_rust::config::Config;
use golfzon_ocr_rust::error::GolfzonOcrError;
use golfzon_ocr_rust::parser::parse_players;

fn parse(text: &str) -> Vec<golfzon_ocr_rust::PlayerCandidate> {
    parse_players(text, None, None, &Config::default()).unwrap()
}

/// 典型的な3人のスコアカード
#[test]
fn test_three_player_scorecard() {
    let players = parse("Acorm 38(+2) -2.2\nCjdyer 41(+5) +16.1\nLcrostarosa 43(+7) +11.4");

    assert_eq!(players.len(), 3);

    let mut scores: Vec<u32> = players.iter().map(|p| p.gross_score).collect();
    scores.sort();
    assert_eq!(scores, vec![38, 41, 43]);

    let mut handicaps: Vec<f64> = players.iter().map(|p| p.handicap).collect();
    handicaps.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((handicaps[0] - (-2.2)).abs() < 0.05);
    assert!((handicaps[1] - 11.4).abs() < 0.05);
    assert!((handicaps[2] - 16.1).abs() < 0.05);

    // 少なくとも2人は名前付き（多少の誤読は許容）
    let named = players.iter().filter(|p| !p.name.is_empty()).count();
    assert!(named >= 2, "named players: {}", named);
}

/// 名前が全く読めなかったスコアカード: 空名のプレースホルダーになる
#[test]
fn test_scores_without_names() {
    let players = parse("38(+2) -2.2\n41(+5) +16.1\n43(+7) +11.4");

    assert_eq!(players.len(), 3);
    assert!(players.iter().all(|p| p.name.is_empty()));
}

/// 8人分の行があっても出力は6件まで。名前付きが優先される
#[test]
fn test_overflow_capped_at_six() {
    let text = "\
Aaron 38(+2) -2.2
Brian 41(+5) +16.1
Casey 43(+7) +11.4
Devon 44(+8) +3.0
Elias 45(+9) +4.0
Felix 46(+10) +5.0
Gavin 47(+11) +6.0
Henry 48(+12) +7.0";

    let players = parse(text);

    assert_eq!(players.len(), 6);
    assert!(players.iter().all(|p| !p.name.is_empty()));
}

/// 空入力は即エラー。部分出力は返さない
#[test]
fn test_empty_input_raises() {
    let result = parse_players("", None, None, &Config::default());
    assert!(matches!(result, Err(GolfzonOcrError::EmptyInput)));
}

/// 何も見つからない入力は空リスト（エラーではない）
#[test]
fn test_no_players_found_is_recoverable() {
    let players = parse("GOLFZON PAR TOTAL RANK\nHOLE 1 2 3 4 5");
    assert!(players.is_empty());
}

/// 出力に重複キーはない
#[test]
fn test_output_has_no_duplicate_keys() {
    // 同じプレイヤー行が2回OCRされたケース
    let players = parse("Acorm 38(+2) -2.2\nAcorm 38(+2) -2.2\nCjdyer 41(+5) +16.1");

    let mut keys: Vec<(u32, i64)> = players.iter().map(|p| p.dedup_key()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), players.len());
}

/// OCR誤読を含むテキストも復元できる
#[test]
fn test_ocr_misreads_are_fixed() {
    // "4I(+5" は "41(+5"、"+16l1" は "+16.1" に直される
    let players = parse("Cjdyer 4I(+5) +16l1");

    assert_eq!(players.len(), 1);
    assert_eq!(players[0].gross_score, 41);
    assert!((players[0].handicap - 16.1).abs() < 0.05);
}

/// 表形式のOCR出力
#[test]
fn test_table_format_scorecard() {
    let players = parse("| Acorm | 38(+2) | -2.2 |\n| Cjdyer | 41(+5) | +16.1 |");

    assert_eq!(players.len(), 2);
    let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&"Acorm"));
    assert!(names.contains(&"Cjdyer"));
}

/// ノイズ行と罫線に挟まれたスコアカード
#[test]
fn test_noisy_scorecard() {
    let text = "\
~~~~~~~~~~~
Acorm 38(+2) -2.2
!!..!!..!!..
Cjdyer 41(+5) +16.1
-----------";

    let players = parse(text);
    assert_eq!(players.len(), 2);
}

/// 1人でも壊れた断片があっても他のプレイヤーは復元される
#[test]
fn test_corrupted_fragment_does_not_abort() {
    let players = parse("Acorm 38(+2) -2.2\n?? 999(+9) +99.9 ??\nCjdyer 41(+5) +16.1");

    let mut scores: Vec<u32> = players.iter().map(|p| p.gross_score).collect();
    scores.sort();
    assert_eq!(scores, vec![38, 41]);
}
