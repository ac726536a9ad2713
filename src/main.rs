use clap::Parser;
use site_router::{classify, cli, config, error, export, logging, plan};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use site_router_common::export::excel_core::ExportOptions;
use site_router_common::RouteUrlBuilder;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("✘ {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Classify { input, output, include_unclassified, no_summary, json } => {
            let config = Config::load(config_path)?;
            println!("📍 site-router - 工程地址分類\n");

            println!("[1/2] 讀取並分類中...");
            let result = classify::classify_file(&input, &config)?;
            println!("✔ {}列を処理\n", result.stats.total_rows);
            classify::print_summary(&result, cli.verbose);

            println!("\n[2/2] エクスポート中...");
            let options = ExportOptions {
                include_unclassified,
                include_summary: !no_summary,
            };
            let path = export::export_result(&result, &input, output.as_deref(), &options)?;
            println!("✔ Excel出力: {}", path.display());

            if let Some(json_path) = json {
                export::export_json(&result, &json_path)?;
                println!("✔ JSON出力: {}", json_path.display());
            }

            println!("\n✅ 完了");
        }

        Commands::Route { input, bucket, start } => {
            let config = Config::load(config_path)?;
            let builder = RouteUrlBuilder::new(&config.route)?;

            let result = classify::classify_file(&input, &config)?;
            let bucket = result.find(&bucket)?;
            let route = builder.build(&start, bucket)?;

            println!("{} ({}):", bucket.title, bucket.len());
            println!("{}", route.url);
            if let Some(warning) = route.warning() {
                eprintln!("⚠ {}", warning);
            }
        }

        Commands::Plan { input, start } => {
            let config = Config::load(config_path)?;
            println!("🗺 site-router - 路線規劃\n");
            plan::run_interactive_plan(&input, &config, &start)?;
        }

        Commands::Config { show, init } => {
            if init {
                let path = Config::default().save(config_path)?;
                println!("✔ 設定ファイルを作成しました: {}", path.display());
            }

            if show || !init {
                let config = Config::load(config_path)?;
                let path = match config_path {
                    Some(p) => p.to_path_buf(),
                    None => Config::config_path()?,
                };
                println!("設定ファイル: {}{}", path.display(), if path.exists() { "" } else { " (未作成、既定値)" });
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
