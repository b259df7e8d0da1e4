//! 链地址编码
//!
//! 每个地址族一条编码规则，输入统一为公钥字节：
//!
//! | 地址族 | 哈希 | 编码 |
//! |---|---|---|
//! | Utxo | HASH160(压缩公钥) | Bech32 v0 或 Base58Check P2PKH |
//! | Evm | Keccak-256(未压缩公钥)[12..] | `0x` + EIP-55 |
//! | Tron | 同 Evm | Base58Check(0x41 ‖ 20 bytes) |
//! | Xrp | HASH160(压缩公钥) | Ripple 字母表 Base58Check |
//! | Solana | 无 | 原始 Base58 |
//!
//! 私钥节点和对应的仅公钥节点经过同一条公钥路径，地址逐字节一致。

use std::fmt;

use bech32::Hrp;
use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::chain_config::{AddressFamily, ChainConfig, Network, NetworkProfile};
use crate::domain::key_tree::{hash160, KeyNode};
use crate::error::{Result, WalletError};

/// 导出的私钥
///
/// secp256k1 链只填 `hex`（32 字节标量，小写、无前缀）；
/// Solana 同时填 `hex` 与 `bytes`（32 字节 ed25519 种子）。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyExport {
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<Vec<u8>>,
}

impl fmt::Debug for PrivateKeyExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeyExport(<redacted>)")
    }
}

/// 链地址编解码器
pub struct ChainAddressCodec;

impl ChainAddressCodec {
    /// 从公钥字节编码地址
    ///
    /// secp256k1 地址族接受压缩 (33) 或未压缩 (65) 公钥；Solana 需要 32 字节 ed25519 公钥。
    pub fn encode(config: &ChainConfig, network: Network, public_key: &[u8]) -> Result<String> {
        let profile = config.profile(network);

        match config.address_family {
            AddressFamily::Utxo => Self::encode_utxo(profile, &parse_secp256k1(public_key)?),
            AddressFamily::Evm => Ok(to_checksum_address(&keccak_address(
                &parse_secp256k1(public_key)?,
            ))),
            AddressFamily::Tron => {
                let version = require_version(config, profile)?;
                let mut payload = Vec::with_capacity(21);
                payload.push(version);
                payload.extend_from_slice(&keccak_address(&parse_secp256k1(public_key)?));
                Ok(bs58::encode(payload).with_check().into_string())
            }
            AddressFamily::Xrp => {
                let version = require_version(config, profile)?;
                let mut payload = Vec::with_capacity(21);
                payload.push(version);
                payload.extend_from_slice(&hash160(&parse_secp256k1(public_key)?.serialize()));
                Ok(bs58::encode(payload)
                    .with_alphabet(bs58::Alphabet::RIPPLE)
                    .with_check()
                    .into_string())
            }
            AddressFamily::Solana => {
                let bytes: [u8; 32] = public_key.try_into().map_err(|_| {
                    WalletError::address_encoding(format!(
                        "ed25519 public key must be 32 bytes, got {}",
                        public_key.len()
                    ))
                })?;
                ed25519_dalek::VerifyingKey::from_bytes(&bytes).map_err(|e| {
                    WalletError::address_encoding(format!("invalid ed25519 public key: {}", e))
                })?;
                Ok(bs58::encode(bytes).into_string())
            }
        }
    }

    /// 编码密钥树节点（私钥或仅公钥）的地址
    pub fn encode_node(config: &ChainConfig, network: Network, node: &KeyNode) -> Result<String> {
        Self::encode(config, network, &node.public_key_bytes())
    }

    /// 导出节点私钥；仅公钥节点返回 None
    pub fn export_private_key(config: &ChainConfig, node: &KeyNode) -> Option<PrivateKeyExport> {
        let secret = node.private_key_bytes()?;
        let bytes = match config.address_family {
            AddressFamily::Solana => Some(secret.to_vec()),
            _ => None,
        };
        Some(PrivateKeyExport {
            hex: hex::encode(*secret),
            bytes,
        })
    }

    fn encode_utxo(profile: &NetworkProfile, public_key: &PublicKey) -> Result<String> {
        let hash = hash160(&public_key.serialize());

        if let Some(hrp) = profile.bech32_hrp {
            let hrp = Hrp::parse(hrp)
                .map_err(|e| WalletError::address_encoding(format!("invalid hrp '{}': {}", hrp, e)))?;
            return bech32::segwit::encode_v0(hrp, &hash)
                .map_err(|e| WalletError::address_encoding(format!("bech32 encoding failed: {}", e)));
        }

        if let Some(version) = profile.address_version {
            let mut payload = Vec::with_capacity(21);
            payload.push(version);
            payload.extend_from_slice(&hash);
            return Ok(bs58::encode(payload).with_check().into_string());
        }

        Err(WalletError::address_encoding(format!(
            "no address prefix configured for {}",
            profile.network
        )))
    }
}

/// EIP-55 校验和地址（带 `0x` 前缀）
///
/// 对小写 hex 做 Keccak-256，第 i 个 nibble ≥ 8 时第 i 个字母大写。
pub fn to_checksum_address(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Keccak-256(未压缩公钥去掉 0x04) 的后 20 字节
fn keccak_address(public_key: &PublicKey) -> [u8; 20] {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = Keccak256::digest(&uncompressed[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    out
}

fn parse_secp256k1(public_key: &[u8]) -> Result<PublicKey> {
    PublicKey::from_slice(public_key)
        .map_err(|e| WalletError::address_encoding(format!("invalid secp256k1 public key: {}", e)))
}

fn require_version(config: &ChainConfig, profile: &NetworkProfile) -> Result<u8> {
    profile.address_version.ok_or_else(|| {
        WalletError::address_encoding(format!(
            "{} has no address version byte for {}",
            config.chain, profile.network
        ))
    })
}
