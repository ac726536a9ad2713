//! ファイル読み込みから分類までの一括処理

use crate::config::Config;
use crate::error::Result;
use crate::reader;
use site_router_common::{ClassificationPipeline, ClassificationResult};
use std::path::Path;

/// Excelを読み込んで分類する
pub fn classify_file(input: &Path, config: &Config) -> Result<ClassificationResult> {
    let pipeline = ClassificationPipeline::new(&config.pipeline)?;
    let rows = reader::read_rows(input)?;
    tracing::debug!(input = %input.display(), rows = rows.len(), "分類開始");
    Ok(pipeline.run(&rows)?)
}

/// 分類ごとの件数（と詳細時は地址）を表示
pub fn print_summary(result: &ClassificationResult, verbose: bool) {
    for bucket in &result.buckets {
        println!("  {} ({})", bucket.title, bucket.len());
        if verbose {
            for record in bucket.records() {
                if record.original == record.cleaned {
                    println!("    - {}", record.original);
                } else {
                    println!("    - {}  →  {}", record.original, record.cleaned);
                }
            }
        }
    }

    let stats = &result.stats;
    if !result.unclassified.is_empty() {
        println!("  未分類 ({})", result.unclassified.len());
        if verbose {
            for record in result.unclassified.records() {
                println!("    - {}", record.original);
            }
        }
    }
    if stats.excluded_rows > 0 {
        println!("  排除 ({})", stats.excluded_rows);
    }
}
