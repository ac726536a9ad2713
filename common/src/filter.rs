//! 除外フィルタ
//!
//! 工程名稱・備註の列に除外キーワードが含まれる行を分類前に落とす。

use crate::types::SourceRow;
use serde::{Deserialize, Serialize};

/// 除外設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// 名稱の列名
    pub name_column: String,
    /// 名稱にこれらのいずれかを含む行を除外
    pub name_keywords: Vec<String>,
    /// 備註の列名
    pub notes_column: String,
    /// 備註にこれらのいずれかを含む行を除外
    pub notes_keywords: Vec<String>,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            name_column: "工程名稱".into(),
            name_keywords: Vec::new(),
            notes_column: "備註".into(),
            notes_keywords: Vec::new(),
        }
    }
}

/// 除外フィルタ
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    config: ExclusionConfig,
}

impl ExclusionFilter {
    pub fn new(config: ExclusionConfig) -> Self {
        Self { config }
    }

    /// 行を除外すべきか
    pub fn should_exclude(&self, row: &SourceRow) -> bool {
        self.exclusion_reason(row).is_some()
    }

    /// 除外理由（ヒットした列とキーワード）を返す
    pub fn exclusion_reason(&self, row: &SourceRow) -> Option<String> {
        let checks = [
            (&self.config.name_column, &self.config.name_keywords),
            (&self.config.notes_column, &self.config.notes_keywords),
        ];

        for (column, keywords) in checks {
            // 列が無い行は除外しない
            let Some(value) = row.get(column) else {
                continue;
            };
            if let Some(keyword) = find_keyword(value, keywords) {
                return Some(format!("{}に「{}」を含む", column, keyword));
            }
        }

        None
    }
}

/// 値に含まれる最初のキーワード（空キーワードは無視）
fn find_keyword<'a>(value: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .map(|k| k.as_str())
        .find(|k| !k.is_empty() && value.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ExclusionFilter {
        ExclusionFilter::new(ExclusionConfig {
            name_keywords: vec!["測試".into(), "取消".into()],
            notes_keywords: vec!["已完工".into()],
            ..Default::default()
        })
    }

    #[test]
    fn test_exclude_by_name() {
        let row = SourceRow::from_pairs([("工程名稱", "南區測試工程"), ("工程地址", "台中市南區復興路1號")]);
        assert!(filter().should_exclude(&row));
    }

    #[test]
    fn test_exclude_by_notes() {
        let row = SourceRow::from_pairs([("備註", "本案已完工"), ("工程地址", "台中市南區復興路1號")]);
        assert!(filter().should_exclude(&row));
        assert_eq!(
            filter().exclusion_reason(&row).as_deref(),
            Some("備註に「已完工」を含む")
        );
    }

    #[test]
    fn test_missing_columns_never_exclude() {
        let row = SourceRow::from_pairs([("工程地址", "台中市南區復興路1號測試")]);
        assert!(!filter().should_exclude(&row));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let filter = ExclusionFilter::new(ExclusionConfig {
            name_keywords: vec!["TEST".into()],
            ..Default::default()
        });
        let row = SourceRow::from_pairs([("工程名稱", "test site")]);
        assert!(!filter.should_exclude(&row));
    }

    #[test]
    fn test_empty_keyword_ignored() {
        let filter = ExclusionFilter::new(ExclusionConfig {
            name_keywords: vec![String::new()],
            ..Default::default()
        });
        let row = SourceRow::from_pairs([("工程名稱", "南區工程")]);
        assert!(!filter.should_exclude(&row));
    }

    #[test]
    fn test_default_config_excludes_nothing() {
        let filter = ExclusionFilter::new(ExclusionConfig::default());
        let row = SourceRow::from_pairs([("工程名稱", "測試"), ("備註", "取消")]);
        assert!(!filter.should_exclude(&row));
    }
}
