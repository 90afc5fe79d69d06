//! GolfzonスコアカードOCR解析ライブラリ
//!
//! 外部OCRエンジンが出力したノイズだらけのテキストから、
//! 構造化されたプレイヤーレコード（名前・グロススコア・ハンディキャップ）
//! を決定的に復元する。
//!
//! ## 処理フロー
//! 1. テキストクリーニング（ノイズ行除去・OCR誤読修正・学習済み修正）
//! 2. 3つの独立したマッチング戦略（スコア起点・行単位・表形式）
//! 3. 統合・重複排除・プレースホルダー追加・最大6件への制限

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod corrections;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod parser;
pub mod patterns;
pub mod validator;

pub use cleaner::TextCleaner;
pub use config::{Config, ProximityConfig};
pub use corrections::{Correction, CorrectionCategory, CorrectionStore, InMemoryCorrectionStore};
pub use error::{GolfzonOcrError, Result};
pub use extractor::{Extractors, HandicapExtractor, NameExtractor, ScoreExtractor};
pub use matcher::{Matcher, PlayerCandidate};
pub use parser::{clean_ocr_text, parse_players};
