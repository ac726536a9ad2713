//! 分類ごとの地址リスト（重複除去付き）
//!
//! 既存エントリの original / cleaned のいずれかと一致する地址は追加しない。
//! cleaned が同じなら別の門牌でも同一扱いになる（樓層違いを1件にまとめるため）。

use crate::classifier::BucketDef;
use crate::types::AddressRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 分類1つ分の地址リスト
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionBucket {
    pub key: String,
    pub title: String,
    records: Vec<AddressRecord>,
    /// original と cleaned の両方を登録したインデックス
    #[serde(skip)]
    seen: HashSet<String>,
}

impl RegionBucket {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn from_def(def: &BucketDef) -> Self {
        Self::new(def.key.clone(), def.title.clone())
    }

    /// 重複でなければ末尾に追加し、追加したかを返す
    pub fn add(&mut self, record: AddressRecord) -> bool {
        if self.seen.is_empty() && !self.records.is_empty() {
            self.rebuild_index();
        }
        if self.is_duplicate(&record) {
            return false;
        }
        self.seen.insert(record.original.clone());
        self.seen.insert(record.cleaned.clone());
        self.records.push(record);
        true
    }

    /// 既存エントリと重複するか
    pub fn is_duplicate(&self, record: &AddressRecord) -> bool {
        if self.seen.is_empty() && !self.records.is_empty() {
            // デシリアライズ直後はインデックスが空なので線形探索
            return self.records.iter().any(|existing| {
                existing.is_duplicate_of(record)
                    || existing.original == record.cleaned
                    || existing.cleaned == record.original
            });
        }
        self.seen.contains(&record.original) || self.seen.contains(&record.cleaned)
    }

    fn rebuild_index(&mut self) {
        self.seen = self
            .records
            .iter()
            .flat_map(|r| [r.original.clone(), r.cleaned.clone()])
            .collect();
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
