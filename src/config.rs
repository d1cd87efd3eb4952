//! # 服务配置模块
//!
//! HTTP 服务的全部配置都集中在 [`ServerConfig`] 中，由入口函数显式传入，
//! 不使用任何全局可变状态。

use crate::cli::ServeArgs;
use crate::constants::{DEFAULT_ADDRESS, DEFAULT_ASSETS_DIR, DEFAULT_BODY_LIMIT, DEFAULT_PORT};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP 服务配置。
///
/// 配置文件中省略的字段使用默认值，例如：
///
/// ```toml
/// address = "127.0.0.1"
/// port = 3000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub address: String,
    /// 监听端口
    pub port: u16,
    /// 存放 `index.html` 的目录
    pub assets_dir: PathBuf,
    /// JSON 请求体的最大字节数
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    /// 从 TOML 文件加载配置。
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read config file: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
        toml::from_str(&content).with_context(|| {
            format!(
                "Invalid config file: {}",
                path.to_string_lossy().red().bold()
            )
        })
    }

    /// 根据命令行参数构建配置：先读取配置文件 (如果有)，再应用命令行覆盖项。
    pub fn from_args(args: &ServeArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(address) = &args.addr {
            config.address = address.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        if let Some(assets) = &args.assets {
            config.assets_dir = assets.clone();
        }

        Ok(config)
    }

    /// `地址:端口` 形式的监听地址。
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// 首页文件的路径，即静态资源目录下的 `index.html`。
    pub fn index_file(&self) -> PathBuf {
        self.assets_dir.join("index.html")
    }
}
