//! 学習済みOCR修正の外部インターフェース
//!
//! 修正データの永続化はこのクレートの責務ではない。
//! コアは「カテゴリCの修正でテキストを書き換える」「適用を報告する」
//! だけを行い、保存先は `CorrectionStore` の実装に委ねる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;

use crate::error::Result;

/// 修正のカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionCategory {
    Name,
    Score,
    Handicap,
}

impl std::fmt::Display for CorrectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionCategory::Name => write!(f, "name"),
            CorrectionCategory::Score => write!(f, "score"),
            CorrectionCategory::Handicap => write!(f, "handicap"),
        }
    }
}

/// 学習済み修正1件
///
/// 適用されるたびに頻度カウンタが増え、より信頼されるようになる。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    pub id: u64,
    /// 誤読されたOCRテキスト
    pub ocr_text: String,
    /// 正しいテキスト
    pub corrected_text: String,
    pub category: CorrectionCategory,
    pub frequency: u32,
    pub last_used_at: DateTime<Utc>,
}

/// 修正リポジトリのインターフェース
///
/// 読み（頻度降順のリスト）と書き（カウンタ増分）だけの小さな契約。
/// 並行呼び出しに対する読みの鮮度は保証しない（last-write-winsで十分）。
pub trait CorrectionStore {
    /// 指定カテゴリの修正を頻度降順で返す
    fn corrections(&self, category: CorrectionCategory) -> Vec<Correction>;

    /// 修正が適用されたことを報告する（頻度カウンタを増やす）
    fn record_usage(&self, id: u64);
}

/// 格納された修正をテキストへ適用する
///
/// 完全一致の部分文字列置換。頻度の高いもの、同頻度なら長いものから試し、
/// 適用した修正ごとに `record_usage` を呼ぶ。
pub fn apply_corrections(
    store: &dyn CorrectionStore,
    text: &str,
    category: CorrectionCategory,
) -> String {
    let mut corrections = store.corrections(category);
    corrections.sort_by(|a, b| {
        b.frequency
            .cmp(&a.frequency)
            .then(b.ocr_text.len().cmp(&a.ocr_text.len()))
    });

    let mut result = text.to_string();
    for correction in &corrections {
        if correction.ocr_text.is_empty() {
            continue;
        }
        if result.contains(&correction.ocr_text) {
            result = result.replace(&correction.ocr_text, &correction.corrected_text);
            store.record_usage(correction.id);
        }
    }

    result
}

/// メモリ上の修正ストア
///
/// CLIからのJSON読み書きとテストのモックを兼ねる。
#[derive(Debug, Default)]
pub struct InMemoryCorrectionStore {
    inner: Mutex<Vec<Correction>>,
}

impl InMemoryCorrectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 修正を登録する。同じ内容が既にあれば頻度を増やす
    pub fn upsert(
        &self,
        ocr_text: &str,
        corrected_text: &str,
        category: CorrectionCategory,
    ) -> u64 {
        let mut entries = self.inner.lock().unwrap();

        if let Some(existing) = entries.iter_mut().find(|c| {
            c.ocr_text == ocr_text && c.corrected_text == corrected_text && c.category == category
        }) {
            existing.frequency += 1;
            existing.last_used_at = Utc::now();
            return existing.id;
        }

        let id = entries.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        entries.push(Correction {
            id,
            ocr_text: ocr_text.to_string(),
            corrected_text: corrected_text.to_string(),
            category,
            frequency: 1,
            last_used_at: Utc::now(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: u64) -> Option<Correction> {
        self.inner.lock().unwrap().iter().find(|c| c.id == id).cloned()
    }

    /// JSONファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<Correction> = serde_json::from_str(&content)?;
        Ok(Self {
            inner: Mutex::new(entries),
        })
    }

    /// JSONファイルへ保存する
    pub fn save(&self, path: &Path) -> Result<()> {
        let entries = self.inner.lock().unwrap();
        let content = serde_json::to_string_pretty(&*entries)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl CorrectionStore for InMemoryCorrectionStore {
    fn corrections(&self, category: CorrectionCategory) -> Vec<Correction> {
        let mut entries: Vec<Correction> = self
            .inner
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.category == category)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        entries
    }

    fn record_usage(&self, id: u64) {
        let mut entries = self.inner.lock().unwrap();
        if let Some(correction) = entries.iter_mut().find(|c| c.id == id) {
            correction.frequency += 1;
            correction.last_used_at = Utc::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_increments_frequency() {
        let store = InMemoryCorrectionStore::new();
        let id = store.upsert("Acorrn", "Acorm", CorrectionCategory::Name);
        let id2 = store.upsert("Acorrn", "Acorm", CorrectionCategory::Name);
        assert_eq!(id, id2);
        assert_eq!(store.get(id).unwrap().frequency, 2);
    }

    #[test]
    fn test_apply_corrections_rewrites_and_records() {
        let store = InMemoryCorrectionStore::new();
        let id = store.upsert("Acorrn", "Acorm", CorrectionCategory::Name);

        let result = apply_corrections(&store, "Acorrn 38(+2)", CorrectionCategory::Name);
        assert_eq!(result, "Acorm 38(+2)");
        // 適用で頻度が増える
        assert_eq!(store.get(id).unwrap().frequency, 2);
    }

    #[test]
    fn test_apply_corrections_most_frequent_first() {
        let store = InMemoryCorrectionStore::new();
        store.upsert("Cjdyer2", "Wrong", CorrectionCategory::Name);
        let frequent = store.upsert("Cjdyer2", "Cjdyer", CorrectionCategory::Name);
        store.record_usage(frequent);
        store.record_usage(frequent);

        // 同じ誤読に複数の候補がある場合は頻度の高い方が勝つ
        let result = apply_corrections(&store, "Cjdyer2 41(+5)", CorrectionCategory::Name);
        assert_eq!(result, "Cjdyer 41(+5)");
    }

    #[test]
    fn test_category_filter() {
        let store = InMemoryCorrectionStore::new();
        store.upsert("4I", "41", CorrectionCategory::Score);
        assert!(store.corrections(CorrectionCategory::Name).is_empty());
        assert_eq!(store.corrections(CorrectionCategory::Score).len(), 1);
    }
}
