//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("找不到{0}欄位")]
    MissingAddressColumn(String),

    #[error("「{0}」沒有任何地址，無法產生路線")]
    EmptyBucket(String),

    #[error("未知的分類: {0}")]
    UnknownBucket(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_address_column() {
        let error = Error::MissingAddressColumn("工程地址".to_string());
        assert_eq!(format!("{}", error), "找不到工程地址欄位");
    }

    #[test]
    fn test_error_display_empty_bucket() {
        let error = Error::EmptyBucket("台中市南區".to_string());
        let display = format!("{}", error);
        assert!(display.contains("台中市南區"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("分類鍵重複".to_string());
        assert_eq!(format!("{}", error), "Config error: 分類鍵重複");
    }

    #[test]
    fn test_error_display_unknown_bucket() {
        let error = Error::UnknownBucket("台東".to_string());
        assert_eq!(format!("{}", error), "未知的分類: 台東");
    }
}
