//! スプレッドシート読み込み
//!
//! 先頭シートの1行目をヘッダーとして、2行目以降を SourceRow に変換する。

use crate::error::{Result, SiteRouterError};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use site_router_common::SourceRow;
use std::io::Cursor;
use std::path::Path;

/// ファイルから行を読み込む（xlsx / xls / ods）
pub fn read_rows(path: &Path) -> Result<Vec<SourceRow>> {
    if !path.exists() {
        return Err(SiteRouterError::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    read_rows_from_bytes(bytes)
}

/// バイト列から行を読み込む
pub fn read_rows_from_bytes(bytes: Vec<u8>) -> Result<Vec<SourceRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| SiteRouterError::UnreadableFile(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SiteRouterError::UnreadableFile("ワークシートがありません".into()))?
        .map_err(|e| SiteRouterError::UnreadableFile(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<Option<String>> = header_row.iter().map(cell_text).collect();

    let mut result = Vec::new();
    for cells in rows {
        let mut row = SourceRow::new();
        for (header, cell) in headers.iter().zip(cells) {
            let (Some(column), Some(value)) = (header, cell_text(cell)) else {
                continue;
            };
            row.insert(column.clone(), value);
        }
        // 全セルが空の行は読み飛ばす
        if !row.is_empty() {
            result.push(row);
        }
    }

    tracing::debug!(rows = result.len(), columns = headers.len(), "シート読み込み完了");
    Ok(result)
}

/// セルを文字列に変換（空セル・空文字列は None）
///
/// 空白だけのセルは値として残す。地址が空白だけの行は分類側で数えて読み飛ばす。
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
