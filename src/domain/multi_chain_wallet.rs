//! 多链钱包服务
//!
//! 一个种子派生多条链的地址；单条链失败不影响其他链

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::chain_config::{Chain, ChainConfig, ChainRegistry, CurveType, Network};
use crate::domain::derivation_path::{DeriveOptions, HARDENED_OFFSET};
use crate::domain::wallet_engine::{derive_address, DerivedAddress};
use crate::domain::watch_only::{WatchOnlyAddress, WatchOnlyDeriver};
use crate::error::{Result, WalletError};
use crate::utils::address_validator::AddressValidator;
use crate::utils::chain_normalizer;

/// 默认单次扫描上限
pub const DEFAULT_SCAN_LIMIT: u32 = 1000;

/// 链信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletChainInfo {
    pub chain: Chain,
    pub name: String,
    pub curve_type: CurveType,
    pub purpose: u32,
    pub coin_type: u32,
    /// 是否支持 xpub / 观察钱包
    pub watch_only: bool,
}

impl From<&ChainConfig> for WalletChainInfo {
    fn from(config: &ChainConfig) -> Self {
        Self {
            chain: config.chain,
            name: config.name.to_string(),
            curve_type: config.curve_type,
            purpose: config.purpose,
            coin_type: config.coin_type,
            watch_only: config.supports_public_derivation(),
        }
    }
}

/// 单条链的失败记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFailure {
    /// 调用方传入的链标识
    pub chain: String,
    pub code: String,
    pub message: String,
}

impl ChainFailure {
    fn new(chain: impl Into<String>, err: &WalletError) -> Self {
        Self {
            chain: chain.into(),
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

/// 批量派生结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChainReport {
    pub wallets: Vec<DerivedAddress>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ChainFailure>,
}

impl MultiChainReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn get(&self, chain: Chain) -> Option<&DerivedAddress> {
        self.wallets.iter().find(|w| w.chain == chain)
    }
}

/// 多链钱包服务
pub struct MultiChainWalletService {
    registry: &'static ChainRegistry,
    scan_limit: u32,
}

impl MultiChainWalletService {
    /// 创建服务实例
    pub fn new() -> Self {
        Self {
            registry: ChainRegistry::global(),
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }

    /// 设置单次扫描的最大地址数
    pub fn with_scan_limit(mut self, scan_limit: u32) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    pub fn scan_limit(&self) -> u32 {
        self.scan_limit
    }

    /// 从同一个种子批量派生多条链
    ///
    /// 链标识支持别名；重复的链只派生一次。无法解析或派生失败的链记录到 `failures`。
    pub fn derive_multi_chain<S: AsRef<str>>(
        &self,
        chains: &[S],
        seed: &[u8],
        options: &DeriveOptions,
        network: Network,
    ) -> MultiChainReport {
        let mut report = MultiChainReport::default();
        let mut seen = Vec::with_capacity(chains.len());

        for identifier in chains {
            let identifier = identifier.as_ref();

            let chain = match chain_normalizer::normalize_chain_identifier(identifier) {
                Ok(chain) => chain,
                Err(e) => {
                    tracing::warn!(chain = identifier, error = %e, "skipping unknown chain");
                    report.failures.push(ChainFailure::new(identifier, &e));
                    continue;
                }
            };

            if seen.contains(&chain) {
                continue;
            }
            seen.push(chain);

            match derive_address(chain, seed, options, network) {
                Ok(derived) => report.wallets.push(derived),
                Err(e) => {
                    tracing::warn!(chain = %chain, code = e.code(), "failed to derive wallet for chain: {}", e);
                    report.failures.push(ChainFailure::new(identifier, &e));
                }
            }
        }

        report
    }

    /// 为所有支持的链派生
    pub fn derive_all_chains(
        &self,
        seed: &[u8],
        options: &DeriveOptions,
        network: Network,
    ) -> MultiChainReport {
        let symbols: Vec<&str> = self
            .registry
            .list_all()
            .into_iter()
            .map(ChainConfig::symbol)
            .collect();
        self.derive_multi_chain(&symbols, seed, options, network)
    }

    /// 扫描 `[start, start + count)` 区间内的地址（account / change 取自 `options`）
    pub fn scan_addresses(
        &self,
        chain: Chain,
        seed: &[u8],
        options: &DeriveOptions,
        start: u32,
        count: u32,
        network: Network,
    ) -> Result<Vec<DerivedAddress>> {
        if options.path.is_some() {
            return Err(WalletError::input(
                "address scanning does not accept a path override",
            ));
        }

        self.scan_range(start, count)?
            .map(|index| {
                let opts = DeriveOptions {
                    index,
                    ..options.clone()
                };
                derive_address(chain, seed, &opts, network)
            })
            .collect()
    }

    /// 用扩展公钥扫描观察钱包地址
    pub fn scan_watch_only(
        &self,
        chain: Chain,
        xpub: &str,
        change: u32,
        start: u32,
        count: u32,
        network: Network,
    ) -> Result<Vec<WatchOnlyAddress>> {
        self.scan_range(start, count)?
            .map(|index| WatchOnlyDeriver::derive(chain, xpub, change, index, network))
            .collect()
    }

    /// 验证地址格式
    pub fn validate_address(&self, chain: &str, address: &str, network: Network) -> Result<bool> {
        AddressValidator::validate(chain, address, network)
    }

    /// 列出所有支持的链
    pub fn list_supported_chains(&self) -> Vec<WalletChainInfo> {
        self.registry
            .list_all()
            .into_iter()
            .map(WalletChainInfo::from)
            .collect()
    }

    /// 按曲线类型分组列出链
    pub fn list_chains_by_curve(&self) -> HashMap<CurveType, Vec<WalletChainInfo>> {
        let mut grouped: HashMap<CurveType, Vec<WalletChainInfo>> = HashMap::new();

        for config in self.registry.list_all() {
            grouped
                .entry(config.curve_type)
                .or_default()
                .push(WalletChainInfo::from(config));
        }

        grouped
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 私有辅助方法
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn scan_range(&self, start: u32, count: u32) -> Result<std::ops::Range<u32>> {
        if count > self.scan_limit {
            return Err(WalletError::input(format!(
                "scan count {} exceeds limit {}",
                count, self.scan_limit
            )));
        }

        let end = start
            .checked_add(count)
            .filter(|end| *end <= HARDENED_OFFSET)
            .ok_or_else(|| {
                WalletError::input(format!(
                    "scan range {}..+{} leaves the non-hardened index space",
                    start, count
                ))
            })?;

        Ok(start..end)
    }
}

impl Default for MultiChainWalletService {
    fn default() -> Self {
        Self::new()
    }
}
