use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteRouterError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("無法讀取檔案: {0}")]
    UnreadableFile(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] site_router_common::Error),
}

pub type Result<T> = std::result::Result<T, SiteRouterError>;
