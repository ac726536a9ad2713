//! 分類結果のファイル出力

use crate::error::{Result, SiteRouterError};
use site_router_common::export::excel_core::{generate_excel_buffer, ExportOptions};
use site_router_common::ClassificationResult;
use std::path::{Path, PathBuf};

/// 既定の出力先: 入力と同じフォルダの `<入力名>_分類結果.xlsx`
pub fn default_output_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("工程地址");
    parent.join(format!("{}_分類結果.xlsx", stem))
}

/// 出力先がフォルダまたは拡張子なしなら既定のファイル名を付ける
fn resolve_output_path(output: &Path, input: &Path) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        let file_name = default_output_path(input)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "分類結果.xlsx".into());
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// 分類結果をExcelに書き出し、書き出したパスを返す
pub fn export_result(
    result: &ClassificationResult,
    input: &Path,
    output: Option<&Path>,
    options: &ExportOptions,
) -> Result<PathBuf> {
    let output_path = match output {
        Some(o) => resolve_output_path(o, input),
        None => default_output_path(input),
    };

    let buffer = generate_excel_buffer(result, options).map_err(SiteRouterError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, buffer)?;

    tracing::info!(path = %output_path.display(), sheets = result.non_empty().count(), "Excel出力");
    Ok(output_path)
}

/// 分類結果をJSONで書き出す
pub fn export_json(result: &ClassificationResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json)?;
    Ok(())
}
