//! 分层确定性密钥树
//!
//! 两套互不混用的算法：
//! - BIP32 over secp256k1：支持私钥派生与非硬化的仅公钥派生
//! - SLIP-0010 over ed25519：只有硬化私钥派生，不存在仅公钥派生
//!
//! 硬化层级只能由私钥派生，这也是观察钱包无法跨越硬化边界的原因。

use std::fmt;

use hmac::{Hmac, Mac};
use once_cell::sync::Lazy;
use ripemd::Ripemd160;
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, Zeroizing};

use crate::domain::chain_config::CurveType;
use crate::domain::derivation_path::{ChildNumber, DerivationPath, HARDENED_OFFSET};
use crate::error::{Result, WalletError};

type HmacSha512 = Hmac<Sha512>;

/// 种子最小长度（BIP32 要求 128 bit）
pub const MIN_SEED_LEN: usize = 16;

/// BIP32 主密钥 HMAC key
const BITCOIN_SEED: &[u8] = b"Bitcoin seed";
/// SLIP-0010 ed25519 主密钥 HMAC key
const ED25519_SEED: &[u8] = b"ed25519 seed";

/// 序列化后的扩展密钥长度（不含校验和）
const XKEY_LEN: usize = 78;

static SECP: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// 节点持有的密钥材料
#[derive(Clone)]
pub enum KeyMaterial {
    Secp256k1Private(SecretKey),
    Secp256k1Public(PublicKey),
    /// SLIP-0010 派生出的 32 字节 ed25519 种子
    Ed25519Private(Zeroizing<[u8; 32]>),
}

/// 密钥树节点
#[derive(Clone)]
pub struct KeyNode {
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
    chain_code: [u8; 32],
    material: KeyMaterial,
}

impl Drop for KeyNode {
    fn drop(&mut self) {
        self.chain_code.zeroize();
        if let KeyMaterial::Secp256k1Private(secret) = &mut self.material {
            secret.non_secure_erase();
        }
    }
}

impl fmt::Debug for KeyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.material {
            KeyMaterial::Secp256k1Private(_) => "secp256k1-private",
            KeyMaterial::Secp256k1Public(_) => "secp256k1-public",
            KeyMaterial::Ed25519Private(_) => "ed25519-private",
        };
        f.debug_struct("KeyNode")
            .field("kind", &kind)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &ChildNumber::from_u32(self.child_number))
            .finish_non_exhaustive()
    }
}

impl KeyNode {
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// 原始 32 位子索引（硬化层级含 2^31 偏移）
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn curve(&self) -> CurveType {
        match self.material {
            KeyMaterial::Secp256k1Private(_) | KeyMaterial::Secp256k1Public(_) => {
                CurveType::Secp256k1
            }
            KeyMaterial::Ed25519Private(_) => CurveType::Ed25519,
        }
    }

    pub fn is_private(&self) -> bool {
        !matches!(self.material, KeyMaterial::Secp256k1Public(_))
    }

    /// secp256k1 公钥点；ed25519 节点返回 None
    pub fn secp256k1_public_key(&self) -> Option<PublicKey> {
        match &self.material {
            KeyMaterial::Secp256k1Private(secret) => {
                Some(PublicKey::from_secret_key(&*SECP, secret))
            }
            KeyMaterial::Secp256k1Public(public) => Some(*public),
            KeyMaterial::Ed25519Private(_) => None,
        }
    }

    /// 公钥字节：secp256k1 为 33 字节压缩格式，ed25519 为 32 字节
    pub fn public_key_bytes(&self) -> Vec<u8> {
        match &self.material {
            KeyMaterial::Ed25519Private(seed) => ed25519_public_key(seed).to_vec(),
            _ => self
                .secp256k1_public_key()
                .map(|pk| pk.serialize().to_vec())
                .unwrap_or_default(),
        }
    }

    /// 私钥字节（secp256k1 标量或 ed25519 种子）；仅公钥节点返回 None
    pub fn private_key_bytes(&self) -> Option<Zeroizing<[u8; 32]>> {
        match &self.material {
            KeyMaterial::Secp256k1Private(secret) => Some(Zeroizing::new(secret.secret_bytes())),
            KeyMaterial::Secp256k1Public(_) => None,
            KeyMaterial::Ed25519Private(seed) => Some(seed.clone()),
        }
    }

    /// HASH160(公钥) 的前 4 字节
    pub fn fingerprint(&self) -> [u8; 4] {
        let mut serialized = self.public_key_bytes();
        if self.curve() == CurveType::Ed25519 {
            serialized.insert(0, 0x00);
        }
        let digest = hash160(&serialized);
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&digest[..4]);
        fp
    }

    /// 序列化为扩展公钥（BIP32 78 字节 + Base58Check）
    ///
    /// 始终写入公钥点；私钥节点在这里被隐式剥离，输出永远不含私钥材料。
    pub fn to_xpub(&self, version: [u8; 4]) -> Result<String> {
        let public = self.secp256k1_public_key().ok_or_else(|| {
            WalletError::unsupported("ed25519 nodes have no extended public key form")
        })?;

        let mut payload = Vec::with_capacity(XKEY_LEN);
        payload.extend_from_slice(&version);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_number.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.extend_from_slice(&public.serialize());

        Ok(bs58::encode(payload).with_check().into_string())
    }

    /// 解析扩展公钥，版本字节必须与 `expected_version` 完全一致
    pub fn from_xpub(encoded: &str, expected_version: [u8; 4]) -> Result<Self> {
        let data = bs58::decode(encoded.trim())
            .with_check(None)
            .into_vec()
            .map_err(|e| WalletError::xpub_parse(format!("invalid base58check: {}", e)))?;

        if data.len() != XKEY_LEN {
            return Err(WalletError::xpub_parse(format!(
                "expected {} bytes, got {}",
                XKEY_LEN,
                data.len()
            )));
        }

        if data[0..4] != expected_version {
            return Err(WalletError::xpub_parse(format!(
                "version bytes {} do not match expected {}",
                hex::encode(&data[0..4]),
                hex::encode(expected_version)
            )));
        }

        let depth = data[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let mut child_bytes = [0u8; 4];
        child_bytes.copy_from_slice(&data[9..13]);
        let child_number = u32::from_be_bytes(child_bytes);

        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_number != 0) {
            return Err(WalletError::xpub_parse(
                "root key with non-zero parent fingerprint or child number",
            ));
        }

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        if data[45] == 0x00 {
            return Err(WalletError::xpub_parse(
                "extended key carries private key material",
            ));
        }

        let public = PublicKey::from_slice(&data[45..78])
            .map_err(|e| WalletError::xpub_parse(format!("invalid public key point: {}", e)))?;

        Ok(Self {
            depth,
            parent_fingerprint,
            child_number,
            chain_code,
            material: KeyMaterial::Secp256k1Public(public),
        })
    }
}

/// 密钥树运算
pub struct KeyTree;

impl KeyTree {
    /// 从种子生成主节点
    pub fn master(curve: CurveType, seed: &[u8]) -> Result<KeyNode> {
        if seed.len() < MIN_SEED_LEN {
            return Err(WalletError::input(format!(
                "seed must be at least {} bytes, got {}",
                MIN_SEED_LEN,
                seed.len()
            )));
        }

        match curve {
            CurveType::Secp256k1 => {
                let (il, chain_code) = hmac_split(BITCOIN_SEED, &[seed])?;
                let secret = SecretKey::from_slice(&il[..])
                    .map_err(|_| WalletError::derivation("seed yields an invalid master key"))?;
                Ok(KeyNode {
                    depth: 0,
                    parent_fingerprint: [0u8; 4],
                    child_number: 0,
                    chain_code,
                    material: KeyMaterial::Secp256k1Private(secret),
                })
            }
            CurveType::Ed25519 => {
                let (il, chain_code) = hmac_split(ED25519_SEED, &[seed])?;
                Ok(KeyNode {
                    depth: 0,
                    parent_fingerprint: [0u8; 4],
                    child_number: 0,
                    chain_code,
                    material: KeyMaterial::Ed25519Private(il),
                })
            }
        }
    }

    /// 按路径从种子派生
    pub fn derive_path(curve: CurveType, seed: &[u8], path: &DerivationPath) -> Result<KeyNode> {
        if curve == CurveType::Ed25519 && !path.is_fully_hardened() {
            return Err(WalletError::input(format!(
                "ed25519 derivation is hardened-only: {}",
                path
            )));
        }

        let mut node = Self::master(curve, seed)?;
        for segment in path {
            node = Self::derive_child(&node, segment.to_u32())?;
        }
        Ok(node)
    }

    /// 单步子节点派生（私钥节点可硬化 / 非硬化，公钥节点仅非硬化）
    ///
    /// IL ≥ n 或子私钥为零（公钥为无穷远点）时按 BIP32 规则改用 index + 1。
    pub fn derive_child(parent: &KeyNode, index: u32) -> Result<KeyNode> {
        match &parent.material {
            KeyMaterial::Secp256k1Private(secret) => Self::derive_private_child(parent, secret, index),
            KeyMaterial::Secp256k1Public(public) => Self::derive_public_child(parent, public, index),
            KeyMaterial::Ed25519Private(seed) => Self::derive_ed25519_child(parent, seed, index),
        }
    }

    /// 剥离私钥，得到对应的仅公钥节点
    pub fn neuter(node: &KeyNode) -> Result<KeyNode> {
        match &node.material {
            KeyMaterial::Secp256k1Private(secret) => Ok(KeyNode {
                depth: node.depth,
                parent_fingerprint: node.parent_fingerprint,
                child_number: node.child_number,
                chain_code: node.chain_code,
                material: KeyMaterial::Secp256k1Public(PublicKey::from_secret_key(&*SECP, secret)),
            }),
            KeyMaterial::Secp256k1Public(_) => Ok(node.clone()),
            KeyMaterial::Ed25519Private(_) => Err(WalletError::unsupported(
                "ed25519 nodes cannot be neutered; SLIP-0010 has no public derivation",
            )),
        }
    }

    /// 仅公钥的非硬化子节点派生：K_child = K_parent + IL·G
    pub fn derive_child_public(node: &KeyNode, index: u32) -> Result<KeyNode> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::derivation(format!(
                "hardened index {} cannot be derived from a public key",
                ChildNumber::from_u32(index)
            )));
        }
        let public = Self::neuter(node)?;
        Self::derive_child(&public, index)
    }

    fn derive_private_child(parent: &KeyNode, secret: &SecretKey, index: u32) -> Result<KeyNode> {
        let parent_public = PublicKey::from_secret_key(&*SECP, secret).serialize();
        let mut index = index;

        loop {
            let (il, chain_code) = if index >= HARDENED_OFFSET {
                let secret_bytes = Zeroizing::new(secret.secret_bytes());
                hmac_split(
                    &parent.chain_code,
                    &[&[0x00], &secret_bytes[..], &index.to_be_bytes()],
                )?
            } else {
                hmac_split(&parent.chain_code, &[&parent_public, &index.to_be_bytes()])?
            };

            let child = Scalar::from_be_bytes(*il)
                .ok()
                .and_then(|tweak| secret.add_tweak(&tweak).ok());

            match child {
                Some(child_secret) => {
                    return Ok(KeyNode {
                        depth: next_depth(parent)?,
                        parent_fingerprint: parent.fingerprint(),
                        child_number: index,
                        chain_code,
                        material: KeyMaterial::Secp256k1Private(child_secret),
                    })
                }
                None => {
                    tracing::warn!(index, "BIP32 child key out of range, skipping to next index");
                    index = next_index(index)?;
                }
            }
        }
    }

    fn derive_public_child(parent: &KeyNode, public: &PublicKey, index: u32) -> Result<KeyNode> {
        let parent_public = public.serialize();
        let mut index = index;

        loop {
            if index >= HARDENED_OFFSET {
                return Err(WalletError::derivation(format!(
                    "hardened index {} cannot be derived from a public key",
                    ChildNumber::from_u32(index)
                )));
            }

            let (il, chain_code) =
                hmac_split(&parent.chain_code, &[&parent_public, &index.to_be_bytes()])?;

            let child = Scalar::from_be_bytes(*il)
                .ok()
                .and_then(|tweak| public.add_exp_tweak(&*SECP, &tweak).ok());

            match child {
                Some(child_public) => {
                    return Ok(KeyNode {
                        depth: next_depth(parent)?,
                        parent_fingerprint: parent.fingerprint(),
                        child_number: index,
                        chain_code,
                        material: KeyMaterial::Secp256k1Public(child_public),
                    })
                }
                None => {
                    tracing::warn!(index, "BIP32 child key out of range, skipping to next index");
                    index = next_index(index)?;
                }
            }
        }
    }

    fn derive_ed25519_child(parent: &KeyNode, seed: &[u8; 32], index: u32) -> Result<KeyNode> {
        if index < HARDENED_OFFSET {
            return Err(WalletError::input(format!(
                "ed25519 derivation is hardened-only, got segment {}",
                index
            )));
        }

        let (il, chain_code) = hmac_split(
            &parent.chain_code,
            &[&[0x00], &seed[..], &index.to_be_bytes()],
        )?;

        Ok(KeyNode {
            depth: next_depth(parent)?,
            parent_fingerprint: parent.fingerprint(),
            child_number: index,
            chain_code,
            material: KeyMaterial::Ed25519Private(il),
        })
    }
}

/// ed25519 公钥（由 32 字节种子扩展）
pub fn ed25519_public_key(seed: &[u8; 32]) -> [u8; 32] {
    ed25519_dalek::SigningKey::from_bytes(seed)
        .verifying_key()
        .to_bytes()
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let digest = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

/// HMAC-SHA512 并拆分为 (IL, IR)
fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<(Zeroizing<[u8; 32]>, [u8; 32])> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key)
        .map_err(|e| WalletError::derivation(format!("HMAC init failed: {}", e)))?;
    for part in parts {
        mac.update(part);
    }
    let mut output = mac.finalize().into_bytes();

    let mut il = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&output[..32]);
    let mut ir = [0u8; 32];
    ir.copy_from_slice(&output[32..]);
    output.as_mut_slice().zeroize();
    Ok((il, ir))
}

fn next_index(index: u32) -> Result<u32> {
    index
        .checked_add(1)
        .ok_or_else(|| WalletError::derivation("child index space exhausted"))
}

fn next_depth(parent: &KeyNode) -> Result<u8> {
    parent
        .depth
        .checked_add(1)
        .ok_or_else(|| WalletError::derivation("maximum derivation depth exceeded"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// BIP32 test vector 1
    const TV1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn tv1_seed() -> Vec<u8> {
        hex::decode(TV1_SEED).unwrap()
    }

    fn path(s: &str) -> DerivationPath {
        s.parse().unwrap()
    }

    const XPUB: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
    const TPUB: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];

    #[test]
    fn test_bip32_vector1_master() {
        let master = KeyTree::master(CurveType::Secp256k1, &tv1_seed()).unwrap();

        assert_eq!(
            hex::encode(*master.private_key_bytes().unwrap()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(master.fingerprint(), [0x34, 0x42, 0x19, 0x3e]);
        assert_eq!(
            master.to_xpub(XPUB).unwrap(),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );
    }

    #[test]
    fn test_bip32_vector1_hardened_child() {
        let node = KeyTree::derive_path(CurveType::Secp256k1, &tv1_seed(), &path("m/0'")).unwrap();
        assert_eq!(node.depth(), 1);
        assert_eq!(node.parent_fingerprint(), [0x34, 0x42, 0x19, 0x3e]);
        assert_eq!(node.child_number(), HARDENED_OFFSET);
        assert_eq!(
            node.to_xpub(XPUB).unwrap(),
            "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw"
        );
    }

    #[test]
    fn test_bip32_vector1_public_child_matches_private_child() {
        let expected = "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ";

        // 私钥路径 m/0'/1
        let private = KeyTree::derive_path(CurveType::Secp256k1, &tv1_seed(), &path("m/0'/1")).unwrap();
        assert_eq!(private.to_xpub(XPUB).unwrap(), expected);

        // 仅公钥路径：neuter(m/0') → 1
        let hardened = KeyTree::derive_path(CurveType::Secp256k1, &tv1_seed(), &path("m/0'")).unwrap();
        let public = KeyTree::neuter(&hardened).unwrap();
        assert!(!public.is_private());
        let child = KeyTree::derive_child_public(&public, 1).unwrap();
        assert!(!child.is_private());
        assert_eq!(child.to_xpub(XPUB).unwrap(), expected);
        assert_eq!(child.public_key_bytes(), private.public_key_bytes());
    }

    #[test]
    fn test_derive_child_public_accepts_private_input() {
        let hardened = KeyTree::derive_path(CurveType::Secp256k1, &tv1_seed(), &path("m/0'")).unwrap();
        let child = KeyTree::derive_child_public(&hardened, 1).unwrap();
        assert!(!child.is_private());
        assert!(child.private_key_bytes().is_none());
    }

    #[test]
    fn test_hardened_index_on_public_node_fails() {
        let master = KeyTree::master(CurveType::Secp256k1, &tv1_seed()).unwrap();
        let public = KeyTree::neuter(&master).unwrap();

        let err = KeyTree::derive_child_public(&public, HARDENED_OFFSET).unwrap_err();
        assert_eq!(err.code(), "derivation_failed");

        let err = KeyTree::derive_child(&public, HARDENED_OFFSET + 5).unwrap_err();
        assert_eq!(err.code(), "derivation_failed");
    }

    #[test]
    fn test_short_seed_rejected() {
        for curve in [CurveType::Secp256k1, CurveType::Ed25519] {
            let err = KeyTree::master(curve, &[7u8; 15]).unwrap_err();
            assert_eq!(err.code(), "invalid_input");
        }
        assert!(KeyTree::master(CurveType::Secp256k1, &[7u8; 16]).is_ok());
    }

    #[test]
    fn test_slip10_ed25519_vector1() {
        let master = KeyTree::master(CurveType::Ed25519, &tv1_seed()).unwrap();
        assert_eq!(
            hex::encode(*master.private_key_bytes().unwrap()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(master.chain_code()),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
        assert_eq!(
            hex::encode(master.public_key_bytes()),
            "a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed"
        );

        let child = KeyTree::derive_path(CurveType::Ed25519, &tv1_seed(), &path("m/0'")).unwrap();
        assert_eq!(
            hex::encode(*child.private_key_bytes().unwrap()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.chain_code()),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
    }

    #[test]
    fn test_ed25519_rejects_non_hardened_and_neuter() {
        let err = KeyTree::derive_path(CurveType::Ed25519, &tv1_seed(), &path("m/44'/501'/0")).unwrap_err();
        assert_eq!(err.code(), "invalid_input");

        let master = KeyTree::master(CurveType::Ed25519, &tv1_seed()).unwrap();
        assert_eq!(KeyTree::neuter(&master).unwrap_err().code(), "unsupported_operation");
        assert_eq!(
            KeyTree::derive_child_public(&master, 0).unwrap_err().code(),
            "unsupported_operation"
        );
        assert_eq!(master.to_xpub(XPUB).unwrap_err().code(), "unsupported_operation");
    }

    #[test]
    fn test_xpub_round_trip_and_version_check() {
        let node = KeyTree::derive_path(CurveType::Secp256k1, &tv1_seed(), &path("m/0'/1")).unwrap();
        let encoded = node.to_xpub(XPUB).unwrap();

        let parsed = KeyNode::from_xpub(&encoded, XPUB).unwrap();
        assert!(!parsed.is_private());
        assert_eq!(parsed.depth(), node.depth());
        assert_eq!(parsed.child_number(), node.child_number());
        assert_eq!(parsed.chain_code(), node.chain_code());
        assert_eq!(parsed.public_key_bytes(), node.public_key_bytes());

        // 版本字节不匹配时不回退到其他网络
        let err = KeyNode::from_xpub(&encoded, TPUB).unwrap_err();
        assert_eq!(err.code(), "invalid_xpub");
    }

    #[test]
    fn test_xpub_rejects_garbage() {
        assert_eq!(KeyNode::from_xpub("not-base58!", XPUB).unwrap_err().code(), "invalid_xpub");

        let master = KeyTree::master(CurveType::Secp256k1, &tv1_seed()).unwrap();
        let mut encoded = master.to_xpub(XPUB).unwrap();
        // 篡改最后一个字符，校验和失效
        let last = encoded.pop().unwrap();
        encoded.push(if last == '1' { '2' } else { '1' });
        assert_eq!(KeyNode::from_xpub(&encoded, XPUB).unwrap_err().code(), "invalid_xpub");

        // 长度不对
        let short = bs58::encode([0u8; 10]).with_check().into_string();
        assert_eq!(KeyNode::from_xpub(&short, XPUB).unwrap_err().code(), "invalid_xpub");
    }

    #[test]
    fn test_xpub_rejects_private_payload() {
        let master = KeyTree::master(CurveType::Secp256k1, &tv1_seed()).unwrap();
        let mut payload = Vec::with_capacity(XKEY_LEN);
        payload.extend_from_slice(&XPUB);
        payload.push(0);
        payload.extend_from_slice(&[0u8; 4]);
        payload.extend_from_slice(&[0u8; 4]);
        payload.extend_from_slice(master.chain_code());
        payload.push(0x00);
        payload.extend_from_slice(&*master.private_key_bytes().unwrap());
        let encoded = bs58::encode(payload).with_check().into_string();

        assert_eq!(KeyNode::from_xpub(&encoded, XPUB).unwrap_err().code(), "invalid_xpub");
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let master = KeyTree::master(CurveType::Secp256k1, &tv1_seed()).unwrap();
        let rendered = format!("{:?}", master);
        assert!(rendered.contains("secp256k1-private"));
        assert!(!rendered.contains("e8f32e72"));
    }
}
