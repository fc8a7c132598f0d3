use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarkodxError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("保存エラー: {0}")]
    Store(#[from] barkodx_common::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("出力するデータがありません: {0}")]
    NothingToExport(String),

    #[error("不正な入力: {0}")]
    InvalidInput(String),

    #[error("不明なコマンド: {0}")]
    UnknownCommand(String),
}

pub type Result<T> = std::result::Result<T, BarkodxError>;
