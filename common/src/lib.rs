//! Site Router Common Library
//!
//! 工程地址の清理・地域分類・重複除去・路線網址生成のコア。
//! ファイルや端末の入出力は持たず、CLIや画面側から値で呼び出す。

pub mod types;
pub mod error;
pub mod cleaner;
pub mod filter;
pub mod classifier;
pub mod bucket;
pub mod pipeline;
pub mod route;
pub mod session;
pub mod export;

pub use types::{AddressRecord, SourceRow};
pub use error::{Error, Result};
pub use cleaner::{clean_address, parse_house_number, HouseNumber};
pub use filter::{ExclusionConfig, ExclusionFilter};
pub use classifier::{BucketDef, DistrictRule, RegionClassifier, RegionConfig, RegionRule};
pub use bucket::RegionBucket;
pub use pipeline::{ClassificationPipeline, ClassificationResult, PipelineConfig, RunStats};
pub use route::{RouteConfig, RouteQuery, RouteUrlBuilder};
pub use session::{RunTicket, Session};
