//! ログ初期化（stderr）
//!
//! `RUST_LOG` があればそれを優先し、無ければ warn、`--verbose` 時は debug。

use tracing_subscriber::EnvFilter;

/// 既定のフィルタ文字列
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,site_router=debug,site_router_common=debug"
    } else {
        "warn"
    }
}

pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // テストなどで二重に初期化された場合は既存の設定を使う
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
