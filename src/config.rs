//! 配置管理模块
//! 支持从环境变量和配置文件加载配置
//!
//! 配置只服务于嵌入引擎的应用层；派生函数本身不读取任何配置，网络等参数必须显式传入。

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::chain_config::Network;
use crate::domain::derivation_path::{DeriveOptions, HARDENED_OFFSET};
use crate::domain::multi_chain_wallet::{MultiChainWalletService, DEFAULT_SCAN_LIMIT};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub derivation: DerivationConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
    pub include_target: bool,
    pub ansi: bool,
}

/// 派生默认参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    pub network: Network,
    pub account: u32,
    pub change: u32,
    /// 单次地址扫描的最大数量
    pub scan_limit: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
            include_target: std::env::var("LOG_INCLUDE_TARGET")
                .ok()
                .map(|v| v == "1")
                .unwrap_or(true),
            ansi: std::env::var("LOG_ANSI")
                .ok()
                .map(|v| v == "1")
                .unwrap_or(true),
        }
    }
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            network: std::env::var("HDFORGE_NETWORK")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            account: std::env::var("HDFORGE_ACCOUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            change: std::env::var("HDFORGE_CHANGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            scan_limit: std::env::var("HDFORGE_SCAN_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SCAN_LIMIT),
        }
    }
}

impl DerivationConfig {
    /// 按配置生成派生参数（index 0，无路径覆盖）
    pub fn default_options(&self) -> DeriveOptions {
        DeriveOptions::new(self.account, self.change, 0)
    }

    /// 按配置的扫描上限创建多链服务
    pub fn wallet_service(&self) -> MultiChainWalletService {
        MultiChainWalletService::new().with_scan_limit(self.scan_limit)
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            logging: LoggingConfig::default(),
            derivation: DerivationConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                // 文件中缺失的字段由 serde(default) 回落到环境变量
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        // 验证日志级别
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        // 验证日志格式
        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        if self.derivation.account >= HARDENED_OFFSET {
            anyhow::bail!("HDFORGE_ACCOUNT must be below 2^31");
        }

        if self.derivation.change > 1 {
            anyhow::bail!("HDFORGE_CHANGE must be 0 or 1");
        }

        if self.derivation.scan_limit == 0 {
            anyhow::bail!("HDFORGE_SCAN_LIMIT must be greater than 0");
        }

        Ok(())
    }
}
