//! 观察钱包派生
//!
//! 输入为账户 / change 层级的扩展公钥，只做非硬化的公钥派生，全程不接触私钥。

use serde::{Deserialize, Serialize};

use crate::domain::address_codec::ChainAddressCodec;
use crate::domain::chain_config::{Chain, ChainConfig, ChainRegistry, Network};
use crate::domain::derivation_path::ChildNumber;
use crate::domain::key_tree::{KeyNode, KeyTree};
use crate::error::{Result, WalletError};

/// 观察钱包地址（不含任何私钥字段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchOnlyAddress {
    pub chain: Chain,
    /// 相对账户节点的路径 `"{change}/{index}"`
    pub path: String,
    pub address: String,
    /// 来源扩展公钥
    pub xpub: String,
}

/// 观察钱包派生器（无状态）
pub struct WatchOnlyDeriver;

impl WatchOnlyDeriver {
    /// 解析扩展公钥，版本字节必须属于 (chain, network)
    pub fn parse_xpub(chain: Chain, xpub: &str, network: Network) -> Result<KeyNode> {
        let config = Self::config(chain)?;
        let version = config.profile(network).xpub_version.ok_or_else(|| {
            WalletError::unsupported(format!("{} has no extended public key format", chain))
        })?;
        KeyNode::from_xpub(xpub, version)
    }

    /// 从扩展公钥派生第 `index` 个地址
    ///
    /// `change` 只作为标签写入结果路径；与 xpub 自身的子索引不一致时记录警告。
    pub fn derive(
        chain: Chain,
        xpub: &str,
        change: u32,
        index: u32,
        network: Network,
    ) -> Result<WatchOnlyAddress> {
        let config = Self::config(chain)?;
        if !config.supports_public_derivation() {
            return Err(WalletError::unsupported(format!(
                "{} does not support watch-only derivation",
                chain
            )));
        }

        let parent = Self::parse_xpub(chain, xpub, network)?;

        if parent.child_number() != change {
            tracing::warn!(
                chain = %chain,
                change,
                xpub_child = %ChildNumber::from_u32(parent.child_number()),
                "change label does not match the extended key's child number"
            );
        }

        let child = KeyTree::derive_child_public(&parent, index)?;
        let address = ChainAddressCodec::encode_node(config, network, &child)?;

        tracing::debug!(chain = %chain, network = %network, change, index, "derived watch-only address");

        Ok(WatchOnlyAddress {
            chain,
            path: format!("{}/{}", change, index),
            address,
            xpub: xpub.to_string(),
        })
    }

    fn config(chain: Chain) -> Result<&'static ChainConfig> {
        ChainRegistry::global()
            .get(chain)
            .ok_or_else(|| WalletError::unsupported(format!("chain {} is not registered", chain)))
    }
}
