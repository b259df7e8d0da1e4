//! 派生引擎入口
//!
//! 所有链共用一条流水线：PathBuilder → KeyTree → ChainAddressCodec。
//! 网络始终由调用方显式传入，引擎不读取任何环境变量或配置文件。

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::address_codec::{ChainAddressCodec, PrivateKeyExport};
use crate::domain::chain_config::{Chain, ChainConfig, ChainRegistry, Network};
use crate::domain::derivation_path::{DerivationPath, DeriveOptions, PathBuilder};
use crate::domain::key_tree::{KeyNode, KeyTree};
use crate::domain::watch_only::{WatchOnlyAddress, WatchOnlyDeriver};
use crate::error::{Result, WalletError};

/// 主种子（drop 时清零，Debug 输出脱敏）
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed(Vec<u8>);

impl Seed {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<{} bytes redacted>)", self.0.len())
    }
}

/// 完整派生结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAddress {
    pub chain: Chain,
    pub network: Network,
    pub path: String,
    pub address: String,
    /// 公钥 hex（secp256k1 为 33 字节压缩格式，ed25519 为 32 字节）
    pub public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<PrivateKeyExport>,
    /// 父节点（账户 / change 层级）的扩展公钥，Solana 为空
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xpub: Option<String>,
}

/// 扩展公钥导出结果，只包含公钥材料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XPubResult {
    pub chain: Chain,
    pub path: String,
    pub xpub: String,
    pub network: Network,
}

/// 助记词 → 种子（BIP39，英文词表，校验和由 bip39 校验）
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str) -> Result<Seed> {
    let parsed = bip39::Mnemonic::parse_in(bip39::Language::English, mnemonic.trim())?;
    let mut seed = parsed.to_seed(passphrase);
    let out = Seed::from_bytes(seed.to_vec());
    seed.zeroize();
    Ok(out)
}

/// 完整派生：地址 + 私钥导出 (+ 父节点 xpub)
pub fn derive_address(
    chain: Chain,
    seed: &[u8],
    options: &DeriveOptions,
    network: Network,
) -> Result<DerivedAddress> {
    let config = chain_config(chain)?;
    let path_str = PathBuilder::build(chain, options)?;
    let path: DerivationPath = path_str.parse()?;

    let (leaf, parent) = derive_with_parent(config, seed, &path)?;
    let address = ChainAddressCodec::encode_node(config, network, &leaf)?;
    let private_key = ChainAddressCodec::export_private_key(config, &leaf);

    let xpub = match (config.profile(network).xpub_version, parent) {
        (Some(version), Some(parent)) => Some(KeyTree::neuter(&parent)?.to_xpub(version)?),
        _ => None,
    };

    tracing::debug!(chain = %chain, network = %network, path = %path_str, "derived address");

    Ok(DerivedAddress {
        chain,
        network,
        path: path_str,
        address,
        public_key: hex::encode(leaf.public_key_bytes()),
        private_key,
        xpub,
    })
}

/// 导出账户 / change 层级的扩展公钥
///
/// 默认锚点为 `m/purpose'/coin'/account'/change`；提供路径覆盖时以覆盖路径为锚点。
pub fn derive_extended_public_key(
    chain: Chain,
    seed: &[u8],
    options: &DeriveOptions,
    network: Network,
) -> Result<XPubResult> {
    let config = chain_config(chain)?;
    let version = config
        .profile(network)
        .xpub_version
        .filter(|_| config.supports_public_derivation())
        .ok_or_else(|| {
            WalletError::unsupported(format!("{} does not support extended public keys", chain))
        })?;

    let path_str = match &options.path {
        Some(path) => path.clone(),
        None => PathBuilder::account_path(chain, options.account, options.change)?,
    };
    let path: DerivationPath = path_str.parse()?;

    let node = KeyTree::derive_path(config.curve_type, seed, &path)?;
    let xpub = KeyTree::neuter(&node)?.to_xpub(version)?;

    tracing::debug!(chain = %chain, network = %network, path = %path_str, "exported extended public key");

    Ok(XPubResult {
        chain,
        path: path_str,
        xpub,
        network,
    })
}

/// 观察钱包派生（不需要种子）
pub fn derive_watch_only_address(
    chain: Chain,
    xpub: &str,
    change: u32,
    index: u32,
    network: Network,
) -> Result<WatchOnlyAddress> {
    WatchOnlyDeriver::derive(chain, xpub, change, index, network)
}

fn chain_config(chain: Chain) -> Result<&'static ChainConfig> {
    ChainRegistry::global()
        .get(chain)
        .ok_or_else(|| WalletError::unsupported(format!("chain {} is not registered", chain)))
}

/// 派生叶子节点，同时保留其父节点
fn derive_with_parent(
    config: &ChainConfig,
    seed: &[u8],
    path: &DerivationPath,
) -> Result<(KeyNode, Option<KeyNode>)> {
    match path.as_slice().split_last() {
        Some((last, parents)) => {
            let parent_path = DerivationPath::from(parents.to_vec());
            let parent = KeyTree::derive_path(config.curve_type, seed, &parent_path)?;
            let leaf = KeyTree::derive_child(&parent, last.to_u32())?;
            Ok((leaf, Some(parent)))
        }
        None => Ok((KeyTree::derive_path(config.curve_type, seed, path)?, None)),
    }
}
