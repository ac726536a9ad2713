//! 統合テスト用ヘルパー

use rust_xlsxwriter::Workbook;
use std::path::Path;

/// ヘッダーと行からxlsxを作る（空文字のセルは書かない）
pub fn write_xlsx(path: &Path, headers: &[&str], rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string((r + 1) as u32, col as u16, *value).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}
