//! 日志系统配置模块
//! 基于 tracing-subscriber 的结构化日志，供嵌入派生引擎的应用初始化使用
//!
//! 派生引擎只通过 `tracing` 宏输出事件（链、网络、路径），从不记录种子、助记词或私钥。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// 初始化日志系统
///
/// `RUST_LOG` 优先于配置中的级别。全局订阅者已存在时返回错误而不是 panic。
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = build_filter(config)?;

    if config.format.eq_ignore_ascii_case("json") {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_target(config.include_target))
            .try_init()?;
    } else {
        Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(config.include_target)
                    .with_ansi(config.ansi),
            )
            .try_init()?;
    }

    Ok(())
}

/// 简化初始化（使用默认配置），错误交给调用方处理
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(&LoggingConfig::default())
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.level)?),
    }
}
