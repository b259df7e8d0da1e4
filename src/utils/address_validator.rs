//! 地址验证模块
//!
//! 离线校验地址格式：与派生引擎使用同一张网络配置表，
//! 引擎在某个 (chain, network) 下编码出的地址在这里必然校验通过

use crate::domain::address_codec::to_checksum_address;
use crate::domain::chain_config::{AddressFamily, Chain, ChainConfig, ChainRegistry, Network};
use crate::error::{Result, WalletError};
use crate::utils::chain_normalizer;

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 验证地址格式
    ///
    /// # 参数
    /// - `chain`: 链标识符（会自动标准化，支持别名）
    /// - `address`: 待验证的地址
    /// - `network`: 目标网络
    ///
    /// # 返回
    /// - Ok(true): 地址有效
    /// - Ok(false): 地址无效
    /// - Err: 不支持的链
    pub fn validate(chain: &str, address: &str, network: Network) -> Result<bool> {
        let chain = chain_normalizer::normalize_chain_identifier(chain)?;
        Self::validate_for(chain, address, network)
    }

    /// 按已解析的 `Chain` 验证
    pub fn validate_for(chain: Chain, address: &str, network: Network) -> Result<bool> {
        let config = ChainRegistry::global()
            .get(chain)
            .ok_or_else(|| WalletError::unsupported(format!("chain {} is not registered", chain)))?;

        let address = address.trim();
        if address.is_empty() {
            return Ok(false);
        }

        Ok(match config.address_family {
            AddressFamily::Evm => Self::validate_evm_address(address),
            AddressFamily::Utxo => Self::validate_utxo_address(config, address, network),
            AddressFamily::Tron => Self::validate_versioned_base58(
                address,
                config.profile(network).address_version,
                bs58::Alphabet::BITCOIN,
            ),
            AddressFamily::Xrp => Self::validate_versioned_base58(
                address,
                config.profile(network).address_version,
                bs58::Alphabet::RIPPLE,
            ),
            AddressFamily::Solana => Self::validate_solana_address(address),
        })
    }

    /// 验证EVM地址（支持EIP-55 Checksum）
    ///
    /// 全小写 / 全大写视为无校验和地址；混合大小写必须通过 EIP-55
    fn validate_evm_address(address: &str) -> bool {
        let hex_part = match address.strip_prefix("0x") {
            Some(rest) if rest.len() == 40 => rest,
            _ => return false,
        };

        let bytes: [u8; 20] = match hex::decode(hex_part) {
            Ok(bytes) => match bytes.try_into() {
                Ok(bytes) => bytes,
                Err(_) => return false,
            },
            Err(_) => return false,
        };

        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return to_checksum_address(&bytes) == address;
        }

        true
    }

    /// UTXO 链：有 hrp 时要求 SegWit Bech32，否则要求 Base58Check P2PKH
    fn validate_utxo_address(config: &ChainConfig, address: &str, network: Network) -> bool {
        let profile = config.profile(network);

        if let Some(expected_hrp) = profile.bech32_hrp {
            return match bech32::segwit::decode(address) {
                Ok((hrp, _, _)) => hrp.to_lowercase() == expected_hrp,
                Err(_) => false,
            };
        }

        Self::validate_versioned_base58(address, profile.address_version, bs58::Alphabet::BITCOIN)
    }

    /// Base58Check(version ‖ 20 bytes)
    fn validate_versioned_base58(
        address: &str,
        version: Option<u8>,
        alphabet: &bs58::Alphabet,
    ) -> bool {
        let Some(version) = version else {
            return false;
        };

        match bs58::decode(address)
            .with_alphabet(alphabet)
            .with_check(None)
            .into_vec()
        {
            Ok(payload) => payload.len() == 21 && payload[0] == version,
            Err(_) => false,
        }
    }

    /// 验证Solana地址（Base58编码，32字节）
    fn validate_solana_address(address: &str) -> bool {
        // 典型长度：32-44个字符
        if address.len() < 32 || address.len() > 44 {
            return false;
        }

        match bs58::decode(address).into_vec() {
            Ok(decoded) => decoded.len() == 32,
            Err(_) => false,
        }
    }
}
