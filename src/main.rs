use clap::Parser;
use golfzon_ocr_rust::{cli, config, corrections, error, parser};

use cli::{Cli, Commands};
use config::Config;
use corrections::{CorrectionStore, InMemoryCorrectionStore};
use error::{GolfzonOcrError, Result};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Parse {
            input,
            backup,
            corrections: corrections_path,
            output,
        } => {
            println!("⛳ golfzon-ocr - スコアカード解析\n");

            // 1. 入力読み込み
            println!("[1/3] OCRテキストを読み込み中...");
            let ocr_text = read_input(&input)?;
            let backup_text = match &backup {
                Some(path) => Some(read_input(path)?),
                None => None,
            };

            // 2. 学習済み修正の読み込み
            let store = match &corrections_path {
                Some(path) if path.exists() => {
                    let store = InMemoryCorrectionStore::load(path)?;
                    println!("✔ 学習済み修正を読み込み: {}件\n", store.len());
                    Some(store)
                }
                Some(_) => Some(InMemoryCorrectionStore::new()),
                None => None,
            };

            // 3. 解析
            println!("[2/3] プレイヤーデータを解析中...");
            let players = parser::parse_players(
                &ocr_text,
                backup_text.as_deref(),
                store.as_ref().map(|s| s as &dyn CorrectionStore),
                &config,
            )?;
            println!("✔ {}人のプレイヤーを検出\n", players.len());

            if cli.verbose {
                for player in &players {
                    let name = if player.name.is_empty() {
                        "(名前未検出)"
                    } else {
                        player.name.as_str()
                    };
                    println!(
                        "  {} スコア: {} ハンディキャップ: {:+.1}",
                        name, player.gross_score, player.handicap
                    );
                }
            }

            // 4. 結果保存と頻度の書き戻し
            println!("[3/3] 結果を保存中...");
            let json = serde_json::to_string_pretty(&players)?;
            match &output {
                Some(path) => {
                    std::fs::write(path, json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }

            if let (Some(store), Some(path)) = (&store, &corrections_path) {
                store.save(path)?;
            }

            println!("\n✅ 解析完了");
        }

        Commands::Clean { input, output } => {
            println!("🧹 golfzon-ocr - テキストクリーニング\n");

            let ocr_text = read_input(&input)?;
            let cleaned = parser::clean_ocr_text(&ocr_text, None);

            match &output {
                Some(path) => {
                    std::fs::write(path, cleaned)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", cleaned),
            }
        }

        Commands::Config { show } => {
            if show {
                println!("設定:");
                println!("  最大プレイヤー数: {}", config.max_players);
                println!("  後方重み: {}", config.proximity.after_weight);
                println!("  前方重み: {}", config.proximity.before_weight);
                println!(
                    "  探索窓: 前方{}バイト / 後方{}バイト",
                    config.proximity.search_before, config.proximity.search_after
                );
            }
        }
    }

    Ok(())
}

fn read_input(path: &std::path::Path) -> Result<String> {
    if !path.exists() {
        return Err(GolfzonOcrError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}
