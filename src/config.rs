use crate::error::{Result, SiteRouterError};
use serde::{Deserialize, Serialize};
use site_router_common::{PipelineConfig, RouteConfig, RouteUrlBuilder};
use std::path::{Path, PathBuf};

/// 設定ファイル（~/.config/site-router/config.json）
///
/// 各セクションは省略可能で、省略時は組み込みの既定値を使う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 地址列・除外キーワード・地域ルール
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
    /// 路線網址
    pub route: RouteConfig,
}

impl Config {
    /// 設定を読み込む
    ///
    /// `path` 指定時はそのファイルが必須。未指定時は既定パスを探し、無ければ既定値。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(SiteRouterError::FileNotFound(p.display().to_string()));
                }
                p.to_path_buf()
            }
            None => Self::config_path()?,
        };

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "設定を読み込み");
            config
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SiteRouterError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("site-router").join("config.json"))
    }

    /// 地域ルールと路線設定の整合性を検証
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.address_column.trim().is_empty() {
            return Err(SiteRouterError::Config("address_column が空です".into()));
        }
        self.pipeline.regions.validate()?;
        RouteUrlBuilder::new(&self.route)?;
        Ok(())
    }
}
