//! 対話式路線規劃モジュール
//!
//! 分類を選ぶたびに路線網址を表示する。ファイルを再読み込みした場合は
//! Session に新しい結果を確定し、失敗時は直前の結果を使い続ける。

use crate::classify::classify_file;
use crate::config::Config;
use crate::error::{Result, SiteRouterError};
use dialoguer::{Input, Select};
use site_router_common::{ClassificationResult, RouteUrlBuilder, Session};
use std::path::Path;

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// 分類を選んで路線を生成（buckets のインデックス）
    Route(usize),
    /// 起點を変更
    ChangeStart,
    /// ファイルを再読み込み
    Reload,
    /// 終了
    Quit,
}

/// メニュー項目を組み立てる（空の分類には「無地址」を付ける）
pub fn menu_items(result: &ClassificationResult) -> (Vec<String>, Vec<PlanAction>) {
    let mut labels = Vec::new();
    let mut actions = Vec::new();

    for (i, bucket) in result.buckets.iter().enumerate() {
        if bucket.is_empty() {
            labels.push(format!("{} (0) - 無地址", bucket.title));
        } else {
            labels.push(format!("{} ({})", bucket.title, bucket.len()));
        }
        actions.push(PlanAction::Route(i));
    }

    labels.push("變更起點".into());
    actions.push(PlanAction::ChangeStart);
    labels.push("重新讀取檔案".into());
    actions.push(PlanAction::Reload);
    labels.push("結束".into());
    actions.push(PlanAction::Quit);

    (labels, actions)
}

/// 1回分の分類を実行して Session に確定する
pub fn run_and_commit(session: &Session, input: &Path, config: &Config) -> Result<bool> {
    let ticket = session.begin_run();
    let result = classify_file(input, config)?;
    Ok(session.commit(ticket, result))
}

/// 対話式で路線を生成
pub fn run_interactive_plan(input: &Path, config: &Config, start: &str) -> Result<()> {
    let builder = RouteUrlBuilder::new(&config.route)?;
    let session = Session::new();
    run_and_commit(&session, input, config)?;

    let mut start_point = start.trim().to_string();
    println!("起點: {}", if start_point.is_empty() { "(未設定)" } else { start_point.as_str() });

    loop {
        let Some(result) = session.latest() else {
            return Ok(());
        };
        let (labels, actions) = menu_items(&result);

        let selection = Select::new()
            .with_prompt("選擇分類以產生路線網址")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| SiteRouterError::CliExecution(e.to_string()))?;

        match &actions[selection] {
            PlanAction::Route(index) => {
                let bucket = &result.buckets[*index];
                match builder.build(&start_point, bucket) {
                    Ok(route) => {
                        println!("\n路線規劃網址：\n{}\n", route.url);
                        if let Some(warning) = route.warning() {
                            println!("⚠ {}\n", warning);
                        }
                    }
                    // 空の分類は通知のみで続行
                    Err(e) => println!("⚠ {}\n", e),
                }
            }
            PlanAction::ChangeStart => {
                start_point = Input::<String>::new()
                    .with_prompt("起點地址（例如：公司地址）")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(|e| SiteRouterError::CliExecution(e.to_string()))?
                    .trim()
                    .to_string();
            }
            PlanAction::Reload => match run_and_commit(&session, input, config) {
                Ok(_) => println!("✔ 重新讀取完成\n"),
                Err(e) => println!("⚠ 重新讀取失敗，沿用上次結果: {}\n", e),
            },
            PlanAction::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_router_common::{ClassificationPipeline, PipelineConfig, SourceRow};

    fn sample_result() -> ClassificationResult {
        let rows = vec![SourceRow::from_pairs([("工程地址", "台中市南區復興路1號")])];
        ClassificationPipeline::new(&PipelineConfig::default())
            .unwrap()
            .run(&rows)
            .unwrap()
    }

    #[test]
    fn test_menu_items_cover_all_buckets() {
        let result = sample_result();
        let (labels, actions) = menu_items(&result);
        assert_eq!(labels.len(), actions.len());
        assert_eq!(actions.len(), result.buckets.len() + 3);
        assert_eq!(actions.last(), Some(&PlanAction::Quit));
        assert!(labels.contains(&"台中市南區 (1)".to_string()));
        assert!(labels.contains(&"台中市北區 (0) - 無地址".to_string()));
    }

    #[test]
    fn test_run_and_commit_failure_keeps_previous() {
        let session = Session::new();
        let ticket = session.begin_run();
        session.commit(ticket, sample_result());

        let result = run_and_commit(&session, Path::new("/nonexistent/sites.xlsx"), &Config::default());
        assert!(result.is_err());
        assert_eq!(session.latest().unwrap().stats.total_rows, 1);
    }
}
