use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "golfzon-ocr")]
#[command(about = "GolfzonスコアカードOCRテキスト解析ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OCRテキストファイルを解析してプレイヤーJSONを出力
    Parse {
        /// OCRテキストファイルのパス
        #[arg(required = true)]
        input: PathBuf,

        /// 別セグメンテーション設定のOCRテキスト（フォールバック用）
        #[arg(short, long)]
        backup: Option<PathBuf>,

        /// 学習済み修正のJSONファイル（読み込み後、頻度を更新して書き戻す）
        #[arg(short, long)]
        corrections: Option<PathBuf>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// OCRテキストのクリーニング結果を表示
    Clean {
        /// OCRテキストファイルのパス
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
