//! Excel読み込みから分類までの統合テスト

mod common;

use common::write_xlsx;
use site_router::classify::classify_file;
use site_router::config::Config;
use site_router::error::SiteRouterError;
use site_router::reader::read_rows;
use site_router_common::{Error, RouteUrlBuilder};
use tempfile::tempdir;

fn originals(result: &site_router_common::ClassificationResult, key: &str) -> Vec<String> {
    result
        .get(key)
        .expect("分類が見つからない")
        .records()
        .iter()
        .map(|r| r.original.clone())
        .collect()
}

#[test]
fn test_three_row_file_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("sites.xlsx");
    write_xlsx(
        &input,
        &["工程名稱", "工程地址", "備註"],
        &[
            vec!["A案", "台中市西屯區中清路三段225巷12弄58號", ""],
            vec!["B案", "彰化縣員林市中山路100號", ""],
            vec!["C案", "南投縣草屯鎮中正路5號", ""],
        ],
    );

    let result = classify_file(&input, &Config::default()).expect("分類に失敗");

    assert_eq!(originals(&result, "taichung_north"), vec!["台中市西屯區中清路三段225巷12弄58號"]);
    assert_eq!(originals(&result, "south_changhua"), vec!["彰化縣員林市中山路100號"]);
    assert_eq!(originals(&result, "south_nantou"), vec!["南投縣草屯鎮中正路5號"]);
    assert_eq!(
        originals(&result, "south_all"),
        vec!["彰化縣員林市中山路100號", "南投縣草屯鎮中正路5號"]
    );
    assert!(result.get("taichung_south").unwrap().is_empty());
}

#[test]
fn test_reader_omits_empty_cells() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("sites.xlsx");
    write_xlsx(
        &input,
        &["工程名稱", "工程地址"],
        &[vec!["A案", "台中市南區復興路1號"], vec!["B案", ""], vec!["", ""]],
    );

    let rows = read_rows(&input).expect("読み込み失敗");
    // 全セルが空の行は含まない
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("工程地址"), Some("台中市南區復興路1號"));
    assert_eq!(rows[1].get("工程地址"), None);
    assert_eq!(rows[1].get("工程名稱"), Some("B案"));
}

#[test]
fn test_missing_address_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("no_address.xlsx");
    write_xlsx(&input, &["工程名稱", "地點"], &[vec!["A案", "台中市南區復興路1號"]]);

    let err = classify_file(&input, &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        SiteRouterError::Common(Error::MissingAddressColumn(_))
    ));
    assert_eq!(err.to_string(), "找不到工程地址欄位");
}

#[test]
fn test_first_row_blank_address_aborts() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("blank_first.xlsx");
    write_xlsx(
        &input,
        &["工程名稱", "工程地址"],
        &[vec!["A案", ""], vec!["B案", "台中市南區復興路1號"]],
    );

    let err = classify_file(&input, &Config::default()).unwrap_err();
    assert!(matches!(err, SiteRouterError::Common(Error::MissingAddressColumn(_))));
}

#[test]
fn test_whitespace_first_address_is_skipped_not_fatal() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("blank_spaces.xlsx");
    write_xlsx(
        &input,
        &["工程名稱", "工程地址"],
        &[vec!["A案", " "], vec!["B案", "台中市南區復興路1號"]],
    );

    let rows = read_rows(&input).expect("読み込み失敗");
    assert_eq!(rows[0].get("工程地址"), Some(" "));

    let result = classify_file(&input, &Config::default()).expect("分類に失敗");
    assert_eq!(result.stats.missing_address_rows, 1);
    assert_eq!(originals(&result, "taichung_south"), vec!["台中市南區復興路1號"]);
}

#[test]
fn test_whitespace_only_first_row_without_other_cells() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("spaces_only.xlsx");
    write_xlsx(&input, &["工程地址"], &[vec![" "], vec!["台中市南區復興路1號"]]);

    let result = classify_file(&input, &Config::default()).expect("分類に失敗");
    assert_eq!(result.stats.total_rows, 2);
    assert_eq!(result.stats.missing_address_rows, 1);
    assert_eq!(result.get("taichung_south").unwrap().len(), 1);
}

#[test]
fn test_exclusion_from_config_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &config_path,
        r#"{
            "exclusion": {
                "name_column": "工程名稱",
                "name_keywords": ["測試"],
                "notes_column": "備註",
                "notes_keywords": ["暫停"]
            }
        }"#,
    )
    .unwrap();
    let config = Config::load(Some(&config_path)).expect("設定読み込み失敗");

    let input = dir.path().join("sites.xlsx");
    write_xlsx(
        &input,
        &["工程名稱", "工程地址", "備註"],
        &[
            vec!["測試工程", "台中市南區復興路1號", ""],
            vec!["正式工程", "台中市南區復興路2號", "工程暫停中"],
            vec!["正式工程", "台中市南區復興路3號", ""],
        ],
    );

    let result = classify_file(&input, &config).expect("分類に失敗");
    assert_eq!(originals(&result, "taichung_south"), vec!["台中市南區復興路3號"]);
    assert_eq!(result.stats.excluded_rows, 2);
    for bucket in &result.buckets {
        assert!(bucket.records().iter().all(|r| r.original != "台中市南區復興路1號"));
    }
}

#[test]
fn test_route_from_file_truncates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("many.xlsx");
    let addresses: Vec<String> = (1..=15).map(|i| format!("台中市大里區中興路{}號2樓", i)).collect();
    let rows: Vec<Vec<&str>> = addresses.iter().map(|a| vec![a.as_str()]).collect();
    write_xlsx(&input, &["工程地址"], &rows);

    let config = Config::default();
    let result = classify_file(&input, &config).expect("分類に失敗");
    let bucket = result.find("台中市南區").unwrap();
    assert_eq!(bucket.len(), 15);

    let route = RouteUrlBuilder::new(&config.route)
        .unwrap()
        .build("台中市南屯區公益路二段1號", bucket)
        .unwrap();
    assert!(route.truncated);
    assert_eq!(route.stops.len(), 10);
    assert_eq!(route.stops[0], "台中市大里區中興路1號");

    let segments: Vec<&str> = route
        .url
        .trim_start_matches("https://www.google.com/maps/dir/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(segments.len(), 11);
}

#[test]
fn test_unreadable_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, "this is not a workbook").unwrap();

    let err = classify_file(&input, &Config::default()).unwrap_err();
    assert!(matches!(err, SiteRouterError::UnreadableFile(_)));
}
