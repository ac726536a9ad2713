//! 分類パイプライン
//!
//! 除外フィルタ → 地址清理 → 地域分類 → 重複除去 を全行に適用し、
//! 分類ごとの地址リストを作る。入力も出力も値で受け渡し、状態は持たない。

use crate::bucket::RegionBucket;
use crate::classifier::{RegionClassifier, RegionConfig};
use crate::cleaner::clean_address;
use crate::error::{Error, Result};
use crate::filter::{ExclusionConfig, ExclusionFilter};
use crate::types::{AddressRecord, SourceRow};
use serde::{Deserialize, Serialize};

/// 既定の地址列名
pub const DEFAULT_ADDRESS_COLUMN: &str = "工程地址";

/// パイプライン設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 地址の列名
    pub address_column: String,
    pub exclusion: ExclusionConfig,
    pub regions: RegionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            address_column: DEFAULT_ADDRESS_COLUMN.into(),
            exclusion: ExclusionConfig::default(),
            regions: RegionConfig::default(),
        }
    }
}

/// 実行統計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// 入力行数
    pub total_rows: usize,
    /// 除外キーワードで落とした行数
    pub excluded_rows: usize,
    /// 地址が空の行数
    pub missing_address_rows: usize,
    /// いずれかの分類に振り分けた行数
    pub classified_rows: usize,
    /// どの地域にも当てはまらなかった行数
    pub unclassified_rows: usize,
    /// 重複で追加しなかった件数（分類ごとに数える）
    pub duplicates_skipped: usize,
}

/// 分類結果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// 設定順の分類リスト（空の分類も含む）
    pub buckets: Vec<RegionBucket>,
    /// どの地域にも当てはまらなかった地址（重複除去済み）
    pub unclassified: RegionBucket,
    pub stats: RunStats,
}

impl ClassificationResult {
    /// キーで分類を取得
    pub fn get(&self, key: &str) -> Option<&RegionBucket> {
        self.buckets.iter().find(|b| b.key == key)
    }

    /// キーまたは表示名で分類を取得
    pub fn find(&self, name: &str) -> Result<&RegionBucket> {
        self.buckets
            .iter()
            .find(|b| b.key == name || b.title == name)
            .ok_or_else(|| Error::UnknownBucket(name.to_string()))
    }

    /// 空でない分類
    pub fn non_empty(&self) -> impl Iterator<Item = &RegionBucket> {
        self.buckets.iter().filter(|b| !b.is_empty())
    }
}

/// 分類パイプライン
#[derive(Debug, Clone)]
pub struct ClassificationPipeline {
    address_column: String,
    filter: ExclusionFilter,
    classifier: RegionClassifier,
}

impl ClassificationPipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        config.regions.validate()?;
        Ok(Self {
            address_column: config.address_column.clone(),
            filter: ExclusionFilter::new(config.exclusion.clone()),
            classifier: RegionClassifier::new(config.regions.clone()),
        })
    }

    pub fn classifier(&self) -> &RegionClassifier {
        &self.classifier
    }

    /// 全行を分類する
    ///
    /// 1行目に地址列が無い場合は `MissingAddressColumn` で中断し、部分結果は返さない。
    pub fn run(&self, rows: &[SourceRow]) -> Result<ClassificationResult> {
        match rows.first() {
            Some(first) if first.contains_column(&self.address_column) => {}
            _ => return Err(Error::MissingAddressColumn(self.address_column.clone())),
        }

        let mut buckets: Vec<RegionBucket> = self
            .classifier
            .config()
            .buckets
            .iter()
            .map(RegionBucket::from_def)
            .collect();
        let mut unclassified = RegionBucket::new("unclassified", "未分類");
        let mut stats = RunStats {
            total_rows: rows.len(),
            ..Default::default()
        };

        for (index, row) in rows.iter().enumerate() {
            // ヘッダー行を1行目として数える
            let line = index + 2;

            if let Some(reason) = self.filter.exclusion_reason(row) {
                tracing::debug!(line, %reason, "除外");
                stats.excluded_rows += 1;
                continue;
            }

            let address = match row.get(&self.address_column).map(str::trim) {
                Some(a) if !a.is_empty() => a,
                _ => {
                    tracing::debug!(line, "地址が空のためスキップ");
                    stats.missing_address_rows += 1;
                    continue;
                }
            };

            let record = AddressRecord::new(address, clean_address(address));
            let targets = self.classifier.classify(address);

            if targets.is_empty() {
                tracing::debug!(line, address, "どの地域にも該当しない");
                stats.unclassified_rows += 1;
                unclassified.add(record);
                continue;
            }

            stats.classified_rows += 1;
            for key in targets {
                if let Some(bucket) = buckets.iter_mut().find(|b| b.key == key) {
                    if !bucket.add(record.clone()) {
                        tracing::debug!(line, address, bucket = key, "重複");
                        stats.duplicates_skipped += 1;
                    }
                }
            }
        }

        tracing::info!(
            total = stats.total_rows,
            excluded = stats.excluded_rows,
            classified = stats.classified_rows,
            unclassified = stats.unclassified_rows,
            "分類完了"
        );

        Ok(ClassificationResult {
            buckets,
            unclassified,
            stats,
        })
    }
}
