//! 链标识符标准化模块
//!
//! 统一处理链符号、全称与常见别名，大小写不敏感

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::domain::chain_config::Chain;
use crate::error::WalletError;

/// 链标识符配置
#[derive(Debug, Clone)]
pub struct ChainIdentifier {
    pub chain: Chain,
    /// 规范名称（小写，用于内部处理）
    pub canonical_name: &'static str,
    /// 全称
    pub full_name: &'static str,
    /// 别名列表（小写）
    pub aliases: &'static [&'static str],
}

/// 链标识符注册表（静态初始化，键均为小写）
static CHAIN_IDENTIFIERS: Lazy<HashMap<String, ChainIdentifier>> = Lazy::new(|| {
    let chains = vec![
        ChainIdentifier {
            chain: Chain::Btc,
            canonical_name: "bitcoin",
            full_name: "Bitcoin",
            aliases: &["btc", "xbt"],
        },
        ChainIdentifier {
            chain: Chain::Eth,
            canonical_name: "ethereum",
            full_name: "Ethereum Mainnet",
            aliases: &["eth", "ether"],
        },
        ChainIdentifier {
            chain: Chain::Bsc,
            canonical_name: "bsc",
            full_name: "BNB Smart Chain",
            aliases: &["bnb", "binance", "bep20"],
        },
        ChainIdentifier {
            chain: Chain::Doge,
            canonical_name: "dogecoin",
            full_name: "Dogecoin",
            aliases: &["doge"],
        },
        ChainIdentifier {
            chain: Chain::Ltc,
            canonical_name: "litecoin",
            full_name: "Litecoin",
            aliases: &["ltc"],
        },
        ChainIdentifier {
            chain: Chain::Trx,
            canonical_name: "tron",
            full_name: "Tron",
            aliases: &["trx", "trc20"],
        },
        ChainIdentifier {
            chain: Chain::Xrp,
            canonical_name: "xrp",
            full_name: "XRP Ledger",
            aliases: &["ripple", "xrpl"],
        },
        ChainIdentifier {
            chain: Chain::Sol,
            canonical_name: "solana",
            full_name: "Solana",
            aliases: &["sol"],
        },
    ];

    let mut registry = HashMap::new();
    for chain in chains {
        registry.insert(chain.canonical_name.to_string(), chain.clone());

        for alias in chain.aliases {
            registry.insert(alias.to_string(), chain.clone());
        }
    }

    registry
});

/// 标准化链标识符
///
/// ```
/// use hdforge::domain::Chain;
/// use hdforge::utils::chain_normalizer::normalize_chain_identifier;
///
/// assert_eq!(normalize_chain_identifier("ETH").unwrap(), Chain::Eth);
/// assert_eq!(normalize_chain_identifier("Ripple").unwrap(), Chain::Xrp);
/// ```
pub fn normalize_chain_identifier(input: &str) -> Result<Chain, WalletError> {
    get_chain_identifier(input).map(|id| id.chain)
}

/// 获取链标识符配置
pub fn get_chain_identifier(input: &str) -> Result<&'static ChainIdentifier, WalletError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(WalletError::input("Chain identifier cannot be empty"));
    }

    CHAIN_IDENTIFIERS
        .get(&trimmed.to_lowercase())
        .ok_or_else(|| WalletError::input(format!("Unsupported chain identifier: {}", trimmed)))
}

/// 判断是否为EVM链
pub fn is_evm_chain(chain: &str) -> bool {
    matches!(
        normalize_chain_identifier(chain),
        Ok(Chain::Eth) | Ok(Chain::Bsc)
    )
}
