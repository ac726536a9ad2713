//! 地域分類
//!
//! 地址に含まれる地名から地域（region）を1つ決め、
//! その地域をメンバーに持つすべての分類（bucket）へ振り分ける。
//!
//! ## 処理フロー
//! 1. `rules` を上から評価し、キーワードを含む最初のルールを採用
//! 2. ルールに `districts` があれば、その中で最初にヒットした區の地域を採用
//!    （どの區にもヒットしなければ未分類）
//! 3. `districts` が無ければルールの `region` を採用
//! 4. `buckets` のうち `members` にその地域を含むものすべてが振り分け先
//!
//! 地名リストと優先順位はすべて `RegionConfig` のデータで、
//! 地域を増やす時にこのモジュールを変更する必要はない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 區（行政区）単位の下位ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictRule {
    /// 割り当てる地域キー
    pub region: String,
    /// 區名
    pub keywords: Vec<String>,
}

/// 縣市単位のルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRule {
    /// 表示名（ログ用）
    pub name: String,
    /// 縣市名（いずれかを含めばこのルールを採用）
    pub keywords: Vec<String>,
    /// 下位ルールが無い場合に割り当てる地域キー
    #[serde(default)]
    pub region: Option<String>,
    /// 區ごとの下位ルール（上から評価）
    #[serde(default)]
    pub districts: Vec<DistrictRule>,
}

/// 分類の定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDef {
    pub key: String,
    /// 表示名（Excelのシート名にも使用）
    pub title: String,
    /// この分類に入る地域キー
    pub members: Vec<String>,
}

/// 地域分類の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub rules: Vec<RegionRule>,
    pub buckets: Vec<BucketDef>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for RegionConfig {
    fn default() -> Self {
        let rules = vec![
            RegionRule {
                name: "台中市".into(),
                keywords: strings(&["台中", "臺中"]),
                region: None,
                districts: vec![
                    // 南區側を先に評価（北區側の地名を含む南區の地址を南に振る）
                    DistrictRule {
                        region: "taichung_south".into(),
                        keywords: strings(&[
                            "南區", "南屯區", "大里區", "太平區", "烏日區", "大肚區", "龍井區", "霧峰區",
                        ]),
                    },
                    DistrictRule {
                        region: "taichung_north".into(),
                        keywords: strings(&[
                            "北區", "西區", "北屯區", "西屯區", "中區", "東區", "清水區", "梧棲區",
                            "大甲區", "大安區",
                        ]),
                    },
                ],
            },
            RegionRule {
                name: "彰化縣".into(),
                keywords: strings(&["彰化"]),
                region: Some("changhua".into()),
                districts: Vec::new(),
            },
            RegionRule {
                name: "南投縣".into(),
                keywords: strings(&["南投"]),
                region: Some("nantou".into()),
                districts: Vec::new(),
            },
            RegionRule {
                name: "台中以北".into(),
                keywords: strings(&["苗栗", "新竹", "桃園", "台北", "臺北", "新北", "基隆", "宜蘭"]),
                region: Some("north".into()),
                districts: Vec::new(),
            },
            RegionRule {
                name: "台中以南".into(),
                keywords: strings(&["雲林", "嘉義", "台南", "臺南", "高雄", "屏東"]),
                region: Some("south".into()),
                districts: Vec::new(),
            },
        ];

        let bucket = |key: &str, title: &str, members: &[&str]| BucketDef {
            key: key.into(),
            title: title.into(),
            members: strings(members),
        };

        let buckets = vec![
            bucket("taichung_north", "台中市北區", &["taichung_north"]),
            bucket("taichung_south", "台中市南區", &["taichung_south"]),
            bucket("general_north", "台中以北", &["north"]),
            bucket("general_south", "台中以南", &["south"]),
            bucket("south_changhua", "台中南區+彰化", &["taichung_south", "changhua"]),
            bucket("south_nantou", "台中南區+南投", &["taichung_south", "nantou"]),
            bucket(
                "south_all",
                "台中南區+彰化+南投",
                &["taichung_south", "changhua", "nantou"],
            ),
        ];

        Self { rules, buckets }
    }
}

impl RegionConfig {
    /// 設定の整合性を検証
    pub fn validate(&self) -> Result<()> {
        let mut regions = HashSet::new();
        for rule in &self.rules {
            if rule.keywords.iter().all(|k| k.is_empty()) {
                return Err(Error::Config(format!("ルール「{}」にキーワードがありません", rule.name)));
            }
            if rule.districts.is_empty() {
                match &rule.region {
                    Some(region) => {
                        regions.insert(region.as_str());
                    }
                    None => {
                        return Err(Error::Config(format!(
                            "ルール「{}」に region も districts もありません",
                            rule.name
                        )))
                    }
                }
            }
            for district in &rule.districts {
                regions.insert(district.region.as_str());
            }
        }

        let mut keys = HashSet::new();
        for bucket in &self.buckets {
            if !keys.insert(bucket.key.as_str()) {
                return Err(Error::Config(format!("分類キー「{}」が重複しています", bucket.key)));
            }
            for member in &bucket.members {
                if !regions.contains(member.as_str()) {
                    return Err(Error::Config(format!(
                        "分類「{}」のメンバー「{}」はどのルールにも存在しません",
                        bucket.key, member
                    )));
                }
            }
        }

        Ok(())
    }
}

/// 地域分類器
#[derive(Debug, Clone)]
pub struct RegionClassifier {
    config: RegionConfig,
}

impl RegionClassifier {
    pub fn new(config: RegionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    /// 地址の地域キーを決める
    pub fn region_of(&self, address: &str) -> Option<&str> {
        let rule = self
            .config
            .rules
            .iter()
            .find(|rule| contains_any(address, &rule.keywords))?;

        if rule.districts.is_empty() {
            return rule.region.as_deref();
        }

        rule.districts
            .iter()
            .find(|district| contains_any(address, &district.keywords))
            .map(|district| district.region.as_str())
    }

    /// 地址の振り分け先の分類キー（設定順、重複なし）
    pub fn classify(&self, address: &str) -> Vec<&str> {
        let Some(region) = self.region_of(address) else {
            return Vec::new();
        };

        self.config
            .buckets
            .iter()
            .filter(|bucket| bucket.members.iter().any(|m| m == region))
            .map(|bucket| bucket.key.as_str())
            .collect()
    }
}

fn contains_any(address: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| !k.is_empty() && address.contains(k.as_str()))
}
