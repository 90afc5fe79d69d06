use crate::error::{GolfzonOcrError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 名前探索の近接重み設定
///
/// Golfzonスコアカードの並び（スコア → ハンディキャップ → 名前）を前提に、
/// アンカー後方の名前を優遇し、前方の名前（前のプレイヤーのもの）を抑制する。
/// 係数は経験的なチューニング値であり、導出根拠はない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityConfig {
    /// アンカー後方の一致に掛ける重み（小さいほど優先）
    pub after_weight: f64,
    /// アンカー前方の一致に掛ける重み（大きいほど劣後）
    pub before_weight: f64,
    /// 後方重みを適用する距離の上限（バイト）
    pub after_window: usize,
    /// 前方重みを適用する距離の上限（バイト）
    pub before_window: usize,
    /// 名前をアンカー前方に探す範囲（バイト）
    pub search_before: usize,
    /// 名前をアンカー後方に探す範囲（バイト）
    pub search_after: usize,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            after_weight: 0.3,
            before_weight: 3.0,
            after_window: 100,
            before_window: 50,
            search_before: 100,
            search_after: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 名前探索の近接重み
    pub proximity: ProximityConfig,
    /// 1枚のスコアカードに載る最大プレイヤー数
    pub max_players: usize,
    /// プレースホルダー作成時にスコア後方を探す範囲（バイト）
    pub placeholder_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proximity: ProximityConfig::default(),
            max_players: 6,
            placeholder_window: 100,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GolfzonOcrError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("golfzon-ocr").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_players, 6);
        assert_eq!(config.placeholder_window, 100);
        assert!((config.proximity.after_weight - 0.3).abs() < f64::EPSILON);
        assert!((config.proximity.before_weight - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.max_players, config.max_players);
        assert_eq!(restored.proximity.after_window, config.proximity.after_window);
    }
}
