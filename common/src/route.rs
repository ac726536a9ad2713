//! 路線網址の生成
//!
//! 起點 + 分類内の清理後地址を Google Maps の dir パスに並べる。
//! 地点数は `max_stops` まで（起點は数えない）。

use crate::bucket::RegionBucket;
use crate::error::{Error, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use url::Url;

/// 経由地1つ分のエンコード対象（英数字と `-_.!~*'()` 以外すべて）
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Google Maps の経由地上限
pub const DEFAULT_MAX_STOPS: usize = 10;

/// 路線網址の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub base_url: String,
    pub max_stops: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.google.com/maps/dir/".into(),
            max_stops: DEFAULT_MAX_STOPS,
        }
    }
}

/// 生成した路線
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// 起點（未入力なら空）
    pub start_point: String,
    /// 経由地（清理後地址、最大 max_stops 件）
    pub stops: Vec<String>,
    /// 分類の件数が上限を超えて切り捨てたか
    pub truncated: bool,
    /// 切り捨て前の件数
    pub total_records: usize,
    pub url: String,
}

impl RouteQuery {
    /// 切り捨て時の注意文
    pub fn warning(&self) -> Option<String> {
        self.truncated.then(|| {
            format!(
                "注意：由於 Google Maps 限制，只能顯示前 {} 個地點",
                self.stops.len()
            )
        })
    }
}

/// 路線網址ビルダー
#[derive(Debug, Clone)]
pub struct RouteUrlBuilder {
    base: Url,
    max_stops: usize,
}

impl RouteUrlBuilder {
    pub fn new(config: &RouteConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| Error::Config(format!("base_url が不正: {} ({})", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("base_url にパスを追加できません: {}", config.base_url)));
        }
        if config.max_stops == 0 {
            return Err(Error::Config("max_stops は1以上にしてください".into()));
        }
        Ok(Self {
            base,
            max_stops: config.max_stops,
        })
    }

    /// 分類から路線を作る
    pub fn build(&self, start_point: &str, bucket: &RegionBucket) -> Result<RouteQuery> {
        if bucket.is_empty() {
            return Err(Error::EmptyBucket(bucket.title.clone()));
        }

        let start_point = start_point.trim();
        let stops: Vec<String> = bucket
            .records()
            .iter()
            .take(self.max_stops)
            .map(|r| r.cleaned.clone())
            .collect();
        let truncated = bucket.len() > self.max_stops;

        let mut url = self.base.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        for segment in std::iter::once(start_point)
            .filter(|s| !s.is_empty())
            .chain(stops.iter().map(|s| s.as_str()))
        {
            url.extend(utf8_percent_encode(segment, SEGMENT));
            url.push('/');
        }

        if truncated {
            tracing::warn!(
                bucket = %bucket.title,
                total = bucket.len(),
                max = self.max_stops,
                "経由地が上限を超えたため切り捨て"
            );
        }

        Ok(RouteQuery {
            start_point: start_point.to_string(),
            stops,
            truncated,
            total_records: bucket.len(),
            url,
        })
    }
}
