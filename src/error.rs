use thiserror::Error;

#[derive(Error, Debug)]
pub enum GolfzonOcrError {
    #[error("OCRテキストが空です")]
    EmptyInput,

    #[error("正規化エラー: {0}")]
    Normalization(String),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GolfzonOcrError>;
