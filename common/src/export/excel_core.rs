//! Excel生成（共通ライブラリ）
//!
//! 空でない分類ごとに1シートを作り、原始地址・清理後地址の2列を書き出す。

use crate::bucket::RegionBucket;
use crate::pipeline::ClassificationResult;
use rust_xlsxwriter::*;
use std::collections::HashSet;

/// Excelのシート名の最大文字数
const MAX_SHEET_NAME_CHARS: usize = 31;

/// シート名に使えない文字
const INVALID_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

const HEADER_ORIGINAL: &str = "原始地址";
const HEADER_CLEANED: &str = "清理後地址";

/// 出力オプション
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// 未分類シートを追加
    pub include_unclassified: bool,
    /// 摘要シート（件数・統計）を先頭に追加
    pub include_summary: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_unclassified: false,
            include_summary: true,
        }
    }
}

/// シート名をExcelの制約に合わせる（禁止文字の置換、31文字、重複回避）
pub fn sanitize_sheet_name(title: &str, used: &HashSet<String>) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if INVALID_SHEET_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim();
    let base: String = if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned.chars().take(MAX_SHEET_NAME_CHARS).collect()
    };

    if !used.contains(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let suffix = format!("({})", n);
        let keep = MAX_SHEET_NAME_CHARS - suffix.chars().count();
        let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// 分類結果からExcelをバッファに生成
pub fn generate_excel_buffer(
    result: &ClassificationResult,
    options: &ExportOptions,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let mut used_names = HashSet::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    if options.include_summary {
        let name = sanitize_sheet_name("摘要", &used_names);
        write_summary_sheet(&mut workbook, &name, result, &header_format)?;
        used_names.insert(name);
    }

    let mut sheets: Vec<&RegionBucket> = result.non_empty().collect();
    if options.include_unclassified && !result.unclassified.is_empty() {
        sheets.push(&result.unclassified);
    }

    for bucket in sheets {
        let name = sanitize_sheet_name(&bucket.title, &used_names);
        write_bucket_sheet(&mut workbook, &name, bucket, &header_format)?;
        used_names.insert(name);
    }

    // シートが1枚も無いとExcelで開けないため空シートを置く
    if used_names.is_empty() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("無資料")
            .map_err(|e| format!("シート名設定エラー: {}", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

fn write_bucket_sheet(
    workbook: &mut Workbook,
    name: &str,
    bucket: &RegionBucket,
    header_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    worksheet
        .set_column_width(0, 48)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet
        .set_column_width(1, 40)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    worksheet
        .write_string_with_format(0, 0, HEADER_ORIGINAL, header_format)
        .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    worksheet
        .write_string_with_format(0, 1, HEADER_CLEANED, header_format)
        .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;

    for (i, record) in bucket.records().iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, &record.original)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet
            .write_string(row, 1, &record.cleaned)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
    }

    Ok(())
}

fn write_summary_sheet(
    workbook: &mut Workbook,
    name: &str,
    result: &ClassificationResult,
    header_format: &Format,
) -> Result<(), String> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    worksheet
        .set_column_width(0, 28)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    worksheet
        .set_column_width(1, 24)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;

    worksheet
        .write_string_with_format(0, 0, "分類", header_format)
        .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    worksheet
        .write_string_with_format(0, 1, "件數", header_format)
        .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;

    let stats = &result.stats;
    let mut rows: Vec<(String, usize)> = result
        .buckets
        .iter()
        .map(|b| (b.title.clone(), b.len()))
        .collect();
    rows.push(("未分類".into(), result.unclassified.len()));
    rows.push(("總列數".into(), stats.total_rows));
    rows.push(("排除列數".into(), stats.excluded_rows));
    rows.push(("無地址列數".into(), stats.missing_address_rows));
    rows.push(("重複略過".into(), stats.duplicates_skipped));

    let mut row: u32 = 1;
    for (label, count) in &rows {
        worksheet
            .write_string(row, 0, label)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet
            .write_number(row, 1, *count as f64)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        row += 1;
    }

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    worksheet
        .write_string(row + 1, 0, "產生時間")
        .map_err(|e| format!("値書き込みエラー: {}", e))?;
    worksheet
        .write_string(row + 1, 1, &generated_at)
        .map_err(|e| format!("値書き込みエラー: {}", e))?;

    Ok(())
}
