//! 多链配置模块
//!
//! 定义所有支持的区块链、加密曲线、地址族以及各网络（主网 / 测试网 / 回归测试网）的版本字节表

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// 支持的链
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
    Btc,
    Eth,
    Bsc,
    Doge,
    Ltc,
    Trx,
    Xrp,
    Sol,
}

impl Chain {
    pub const ALL: [Chain; 8] = [
        Chain::Btc,
        Chain::Eth,
        Chain::Bsc,
        Chain::Doge,
        Chain::Ltc,
        Chain::Trx,
        Chain::Xrp,
        Chain::Sol,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Chain::Btc => "BTC",
            Chain::Eth => "ETH",
            Chain::Bsc => "BSC",
            Chain::Doge => "DOGE",
            Chain::Ltc => "LTC",
            Chain::Trx => "TRX",
            Chain::Xrp => "XRP",
            Chain::Sol => "SOL",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Chain {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::utils::chain_normalizer::normalize_chain_identifier(s)
    }
}

/// 网络类型，必须由调用方显式传入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Testnet, Network::Regtest];

    pub fn label(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Network::Mainnet => 0,
            Network::Testnet => 1,
            Network::Regtest => 2,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "main" | "bitcoin" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(WalletError::input(format!("unknown network: {}", other))),
        }
    }
}

/// 加密曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// secp256k1 曲线 (BIP32)
    Secp256k1,
    /// ed25519 曲线 (SLIP-0010，仅硬化派生)
    Ed25519,
}

/// 地址族：每个地址族对应一条编码规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// HASH160 → Bech32 (v0) 或 Base58Check P2PKH，由网络配置决定
    Utxo,
    /// Keccak-256 → EIP-55 hex
    Evm,
    /// Keccak-256 → Base58Check(0x41 ‖ 20 bytes)
    Tron,
    /// HASH160 → Ripple 字母表 Base58Check
    Xrp,
    /// ed25519 公钥 → 原始 Base58
    Solana,
}

/// 单个网络的版本字节 / 前缀表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkProfile {
    pub network: Network,
    /// SegWit 人类可读前缀（BTC / LTC）
    pub bech32_hrp: Option<&'static str>,
    /// Base58Check 地址版本字节（DOGE P2PKH、TRX 0x41、XRP 账户类型）
    pub address_version: Option<u8>,
    /// 扩展公钥版本字节；Solana 为 None
    pub xpub_version: Option<[u8; 4]>,
}

const XPUB: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
const TPUB: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];
const LTUB: [u8; 4] = [0x01, 0x9D, 0xA4, 0x62];
const DGUB: [u8; 4] = [0x02, 0xFA, 0xCA, 0xFD];

impl NetworkProfile {
    const fn new(
        network: Network,
        bech32_hrp: Option<&'static str>,
        address_version: Option<u8>,
        xpub_version: Option<[u8; 4]>,
    ) -> Self {
        Self {
            network,
            bech32_hrp,
            address_version,
            xpub_version,
        }
    }
}

/// 链配置
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain: Chain,
    /// 链名称
    pub name: &'static str,
    pub curve_type: CurveType,
    pub address_family: AddressFamily,
    /// BIP43 purpose (44 / 84)
    pub purpose: u32,
    /// SLIP-44 coin type
    pub coin_type: u32,
    profiles: [NetworkProfile; 3],
}

impl ChainConfig {
    pub fn symbol(&self) -> &'static str {
        self.chain.symbol()
    }

    pub fn profile(&self, network: Network) -> &NetworkProfile {
        &self.profiles[network.slot()]
    }

    /// 是否存在仅公钥（观察钱包 / xpub）派生路径
    pub fn supports_public_derivation(&self) -> bool {
        self.curve_type == CurveType::Secp256k1
    }
}

/// 全局只读注册表
static REGISTRY: Lazy<ChainRegistry> = Lazy::new(ChainRegistry::new);

/// 链配置注册表
pub struct ChainRegistry {
    configs: HashMap<Chain, ChainConfig>,
}

impl ChainRegistry {
    /// 创建预配置的注册表
    pub fn new() -> Self {
        let mut registry = Self {
            configs: HashMap::new(),
        };

        registry.register_default_chains();
        registry
    }

    /// 进程级共享实例（只读，可并发访问）
    pub fn global() -> &'static ChainRegistry {
        &REGISTRY
    }

    /// 注册默认支持的链
    fn register_default_chains(&mut self) {
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // UTXO 系列
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

        // Bitcoin (BIP84 - native segwit)
        self.register(ChainConfig {
            chain: Chain::Btc,
            name: "Bitcoin",
            curve_type: CurveType::Secp256k1,
            address_family: AddressFamily::Utxo,
            purpose: 84,
            coin_type: 0,
            profiles: [
                NetworkProfile::new(Network::Mainnet, Some("bc"), None, Some(XPUB)),
                NetworkProfile::new(Network::Testnet, Some("tb"), None, Some(TPUB)),
                NetworkProfile::new(Network::Regtest, Some("bcrt"), None, Some(TPUB)),
            ],
        });

        // Litecoin (BIP84 - native segwit)
        self.register(ChainConfig {
            chain: Chain::Ltc,
            name: "Litecoin",
            curve_type: CurveType::Secp256k1,
            address_family: AddressFamily::Utxo,
            purpose: 84,
            coin_type: 2,
            profiles: [
                NetworkProfile::new(Network::Mainnet, Some("ltc"), None, Some(LTUB)),
                NetworkProfile::new(Network::Testnet, Some("tltc"), None, Some(TPUB)),
                NetworkProfile::new(Network::Regtest, Some("rltc"), None, Some(TPUB)),
            ],
        });

        // Dogecoin (BIP44 - legacy P2PKH，无 SegWit)
        self.register(ChainConfig {
            chain: Chain::Doge,
            name: "Dogecoin",
            curve_type: CurveType::Secp256k1,
            address_family: AddressFamily::Utxo,
            purpose: 44,
            coin_type: 3,
            profiles: [
                NetworkProfile::new(Network::Mainnet, None, Some(0x1e), Some(DGUB)),
                NetworkProfile::new(Network::Testnet, None, Some(0x71), Some(TPUB)),
                NetworkProfile::new(Network::Regtest, None, Some(0x6f), Some(TPUB)),
            ],
        });

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // 账户模型 (secp256k1)
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

        // Ethereum
        self.register(ChainConfig {
            chain: Chain::Eth,
            name: "Ethereum",
            curve_type: CurveType::Secp256k1,
            address_family: AddressFamily::Evm,
            purpose: 44,
            coin_type: 60,
            profiles: account_profiles(None),
        });

        // BSC (BNB Smart Chain)
        self.register(ChainConfig {
            chain: Chain::Bsc,
            name: "BNB Smart Chain",
            curve_type: CurveType::Secp256k1,
            address_family: AddressFamily::Evm,
            purpose: 44,
            coin_type: 60, // BSC 使用与 ETH 相同的派生路径
            profiles: account_profiles(None),
        });

        // Tron (主网与 Shasta / Nile 测试网共用 0x41 前缀)
        self.register(ChainConfig {
            chain: Chain::Trx,
            name: "Tron",
            curve_type: CurveType::Secp256k1,
            address_family: AddressFamily::Tron,
            purpose: 44,
            coin_type: 195,
            profiles: account_profiles(Some(0x41)),
        });

        // XRP Ledger
        self.register(ChainConfig {
            chain: Chain::Xrp,
            name: "XRP Ledger",
            curve_type: CurveType::Secp256k1,
            address_family: AddressFamily::Xrp,
            purpose: 44,
            coin_type: 144,
            profiles: account_profiles(Some(0x00)),
        });

        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
        // Ed25519 系列
        // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

        // Solana
        self.register(ChainConfig {
            chain: Chain::Sol,
            name: "Solana",
            curve_type: CurveType::Ed25519,
            address_family: AddressFamily::Solana,
            purpose: 44,
            coin_type: 501,
            profiles: [
                NetworkProfile::new(Network::Mainnet, None, None, None),
                NetworkProfile::new(Network::Testnet, None, None, None),
                NetworkProfile::new(Network::Regtest, None, None, None),
            ],
        });
    }

    /// 注册链配置
    pub fn register(&mut self, config: ChainConfig) {
        self.configs.insert(config.chain, config);
    }

    pub fn get(&self, chain: Chain) -> Option<&ChainConfig> {
        self.configs.get(&chain)
    }

    /// 通过符号或别名获取配置
    pub fn get_by_symbol(&self, symbol: &str) -> Option<&ChainConfig> {
        let chain = symbol.parse::<Chain>().ok()?;
        self.get(chain)
    }

    /// 按曲线类型分组获取所有链
    pub fn get_by_curve_type(&self, curve_type: CurveType) -> Vec<&ChainConfig> {
        self.list_all()
            .into_iter()
            .filter(|c| c.curve_type == curve_type)
            .collect()
    }

    /// 列出所有支持的链（按 `Chain` 声明顺序）
    pub fn list_all(&self) -> Vec<&ChainConfig> {
        let mut all: Vec<&ChainConfig> = self.configs.values().collect();
        all.sort_by_key(|c| c.chain);
        all
    }

    /// 验证链配置完整性
    pub fn validate_configs(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for config in self.list_all() {
            if config.name.is_empty() {
                errors.push(format!("Chain {} has empty name", config.chain));
            }

            if config.purpose != 44 && config.purpose != 84 {
                errors.push(format!(
                    "Chain {} has unexpected purpose: {}",
                    config.chain, config.purpose
                ));
            }

            // 验证曲线类型和地址族匹配
            match (config.curve_type, config.address_family) {
                (CurveType::Secp256k1, AddressFamily::Utxo)
                | (CurveType::Secp256k1, AddressFamily::Evm)
                | (CurveType::Secp256k1, AddressFamily::Tron)
                | (CurveType::Secp256k1, AddressFamily::Xrp)
                | (CurveType::Ed25519, AddressFamily::Solana) => {}
                _ => {
                    errors.push(format!(
                        "Chain {} has incompatible curve_type and address_family: {:?} / {:?}",
                        config.chain, config.curve_type, config.address_family
                    ));
                }
            }

            for network in Network::ALL {
                let profile = config.profile(network);
                if profile.network != network {
                    errors.push(format!(
                        "Chain {} profile slot {} holds {}",
                        config.chain, network, profile.network
                    ));
                }

                if config.supports_public_derivation() != profile.xpub_version.is_some() {
                    errors.push(format!(
                        "Chain {} on {} has inconsistent xpub version bytes",
                        config.chain, network
                    ));
                }

                let encodable = match config.address_family {
                    AddressFamily::Utxo => {
                        profile.bech32_hrp.is_some() || profile.address_version.is_some()
                    }
                    AddressFamily::Tron | AddressFamily::Xrp => profile.address_version.is_some(),
                    AddressFamily::Evm | AddressFamily::Solana => true,
                };
                if !encodable {
                    errors.push(format!(
                        "Chain {} on {} has no address prefix configured",
                        config.chain, network
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 账户模型链：地址格式与网络无关，仅 xpub 版本字节随网络变化
fn account_profiles(address_version: Option<u8>) -> [NetworkProfile; 3] {
    [
        NetworkProfile::new(Network::Mainnet, None, address_version, Some(XPUB)),
        NetworkProfile::new(Network::Testnet, None, address_version, Some(TPUB)),
        NetworkProfile::new(Network::Regtest, None, address_version, Some(TPUB)),
    ]
}
