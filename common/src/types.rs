//! 入力行・地址レコードの型定義
//!
//! - SourceRow: スプレッドシート1行（列名 → 値）
//! - AddressRecord: 元の地址と清理後の地址の組

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// スプレッドシートの1行
///
/// 空セルはマップに含めない（シートをJSONに射影した時と同じ扱い）。
/// 列名はヘッダーの文字列そのままで、空白や大文字小文字の正規化はしない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRow {
    cells: HashMap<String, String>,
}

impl SourceRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// (列名, 値) の組から生成
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// 列の値を取得（列が無ければ None）
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(|s| s.as_str())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// 分類済みの地址
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRecord {
    /// 元の地址（前後の空白のみ除去）
    pub original: String,
    /// 門牌號まで切り詰めた地址
    pub cleaned: String,
}

impl AddressRecord {
    pub fn new(original: impl Into<String>, cleaned: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            cleaned: cleaned.into(),
        }
    }

    /// 重複判定: original同士 または cleaned同士 が一致すれば重複
    pub fn is_duplicate_of(&self, other: &AddressRecord) -> bool {
        self.original == other.original || self.cleaned == other.cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_row_missing_column() {
        let row = SourceRow::from_pairs([("工程地址", "台中市南區復興路100號")]);
        assert_eq!(row.get("工程地址"), Some("台中市南區復興路100號"));
        assert_eq!(row.get("工程名稱"), None);
        assert!(!row.contains_column("備註"));
    }

    #[test]
    fn test_source_row_column_name_is_literal() {
        let row = SourceRow::from_pairs([("工程地址 ", "彰化縣彰化市中正路1號")]);
        assert_eq!(row.get("工程地址"), None);
    }

    #[test]
    fn test_source_row_json_is_flat_object() {
        let row = SourceRow::from_pairs([("工程地址", "南投縣南投市中興路5號")]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"工程地址":"南投縣南投市中興路5號"}"#);
    }

    #[test]
    fn test_is_duplicate_of() {
        let a = AddressRecord::new("台中市南區復興路100號3樓", "台中市南區復興路100號");
        let b = AddressRecord::new("台中市南區復興路100號", "台中市南區復興路100號");
        let c = AddressRecord::new("台中市南區復興路101號", "台中市南區復興路101號");
        assert!(a.is_duplicate_of(&b));
        assert!(!a.is_duplicate_of(&c));
    }
}
