use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "site-router")]
#[command(about = "工程地址分類與路線規劃工具", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（省略時: ~/.config/site-router/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Excelを分類して分類結果Excelを出力
    Classify {
        /// 入力Excelファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ファイル/ディレクトリ（デフォルト: 入力名_分類結果.xlsx）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 未分類シートも出力
        #[arg(long)]
        include_unclassified: bool,

        /// 摘要シートを出力しない
        #[arg(long)]
        no_summary: bool,

        /// 分類結果をJSONでも保存
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// 分類を1つ選んで路線網址を出力
    Route {
        /// 入力Excelファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 分類（キーまたは表示名、例: taichung_south / 台中市南區）
        #[arg(short, long)]
        bucket: String,

        /// 起點地址（例：公司地址）
        #[arg(short, long, default_value = "")]
        start: String,
    },

    /// 対話的に分類を選んで路線網址を出力
    Plan {
        /// 入力Excelファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 起點地址
        #[arg(short, long, default_value = "")]
        start: String,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定値で設定ファイルを作成（既存ファイルは上書き）
        #[arg(long)]
        init: bool,
    },
}
