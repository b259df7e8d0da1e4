//! BIP44 派生路径
//!
//! - `PathBuilder`: (chain, account, change, index) → 规范路径字符串
//! - `DerivationPath`: 路径字符串的类型化表示（解析 / 打印）
//! - `DerivationPathValidator`: 校验路径是否符合链的标准

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::chain_config::{Chain, ChainRegistry, CurveType};
use crate::error::{Result, WalletError};

/// 硬化派生偏移量 (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// 路径中的单个层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildNumber {
    Normal(u32),
    Hardened(u32),
}

impl ChildNumber {
    /// 构造普通层级，索引必须小于 2^31
    pub fn normal(index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::input(format!(
                "index {} does not fit a BIP32 path segment",
                index
            )));
        }
        Ok(ChildNumber::Normal(index))
    }

    /// 构造硬化层级，索引必须小于 2^31
    pub fn hardened(index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(WalletError::input(format!(
                "index {} does not fit a BIP32 path segment",
                index
            )));
        }
        Ok(ChildNumber::Hardened(index))
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildNumber::Hardened(_))
    }

    /// BIP32 序列化用的 32 位索引（硬化层级含偏移量）
    pub fn to_u32(&self) -> u32 {
        match self {
            ChildNumber::Normal(i) => *i,
            ChildNumber::Hardened(i) => i | HARDENED_OFFSET,
        }
    }

    pub fn from_u32(raw: u32) -> Self {
        if raw >= HARDENED_OFFSET {
            ChildNumber::Hardened(raw - HARDENED_OFFSET)
        } else {
            ChildNumber::Normal(raw)
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildNumber::Normal(i) => write!(f, "{}", i),
            ChildNumber::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        let (digits, hardened) = match s.strip_suffix(&['\'', 'h', 'H'][..]) {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(WalletError::input(format!("invalid path segment: '{}'", s)));
        }

        let index: u32 = digits
            .parse()
            .map_err(|_| WalletError::input(format!("path segment out of range: '{}'", s)))?;

        if hardened {
            ChildNumber::hardened(index)
        } else {
            ChildNumber::normal(index)
        }
    }
}

/// 类型化的派生路径，`m` 表示根节点
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    pub fn master() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[ChildNumber] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 追加一个层级，返回新路径
    pub fn child(&self, number: ChildNumber) -> Self {
        let mut segments = self.0.clone();
        segments.push(number);
        Self(segments)
    }

    pub fn is_fully_hardened(&self) -> bool {
        self.0.iter().all(ChildNumber::is_hardened)
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(segments: Vec<ChildNumber>) -> Self {
        Self(segments)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = std::slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(path: &str) -> Result<Self> {
        let path = path.trim();
        let mut parts = path.split('/');

        match parts.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(WalletError::input(format!(
                    "path must start with 'm': '{}'",
                    path
                )))
            }
        }

        let segments = parts
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self(segments))
    }
}

/// 派生参数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeriveOptions {
    /// 账户索引 (默认 0)
    #[serde(default)]
    pub account: u32,
    /// 0 = 外部地址, 1 = 找零地址 (默认 0)
    #[serde(default)]
    pub change: u32,
    /// 地址索引 (默认 0)
    #[serde(default)]
    pub index: u32,
    /// 路径覆盖：原样使用，合法性在派生时校验
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl DeriveOptions {
    pub fn new(account: u32, change: u32, index: u32) -> Self {
        Self {
            account,
            change,
            index,
            path: None,
        }
    }

    pub fn with_index(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// 路径构建器
pub struct PathBuilder;

impl PathBuilder {
    /// 构建派生路径
    ///
    /// 标准路径：`m/purpose'/coin'/account'/change/index`
    ///
    /// Solana 只有三层：`m/44'/501'/(account + index)'`。
    /// 两组 (account, index) 只要和相同就会得到同一把密钥，与 Trust Wallet 的行为一致。
    pub fn build(chain: Chain, options: &DeriveOptions) -> Result<String> {
        if let Some(path) = &options.path {
            return Ok(path.clone());
        }

        let config = ChainRegistry::global()
            .get(chain)
            .ok_or_else(|| WalletError::unsupported(format!("chain {} is not registered", chain)))?;

        Self::check_change(options.change)?;

        match config.curve_type {
            CurveType::Secp256k1 => {
                let account = ChildNumber::hardened(options.account)?;
                let index = ChildNumber::normal(options.index)?;
                Ok(format!(
                    "m/{}'/{}'/{}/{}/{}",
                    config.purpose, config.coin_type, account, options.change, index
                ))
            }
            CurveType::Ed25519 => {
                let combined = options.account.checked_add(options.index).ok_or_else(|| {
                    WalletError::input(format!(
                        "account {} + index {} overflows",
                        options.account, options.index
                    ))
                })?;
                let account = ChildNumber::hardened(combined)?;
                Ok(format!(
                    "m/{}'/{}'/{}",
                    config.purpose, config.coin_type, account
                ))
            }
        }
    }

    /// 观察钱包锚点路径：`m/purpose'/coin'/account'/change`
    pub fn account_path(chain: Chain, account: u32, change: u32) -> Result<String> {
        let config = ChainRegistry::global()
            .get(chain)
            .ok_or_else(|| WalletError::unsupported(format!("chain {} is not registered", chain)))?;

        if !config.supports_public_derivation() {
            return Err(WalletError::unsupported(format!(
                "{} has no public derivation path",
                chain
            )));
        }

        Self::check_change(change)?;
        let account = ChildNumber::hardened(account)?;

        Ok(format!(
            "m/{}'/{}'/{}/{}",
            config.purpose, config.coin_type, account, change
        ))
    }

    fn check_change(change: u32) -> Result<()> {
        if change > 1 {
            return Err(WalletError::input(format!(
                "change must be 0 or 1, got {}",
                change
            )));
        }
        Ok(())
    }
}

/// 派生路径验证器
pub struct DerivationPathValidator;

impl DerivationPathValidator {
    /// 验证派生路径
    ///
    /// # 返回
    /// - Ok(true): 路径有效且符合链的标准（purpose / coin type / 层级结构）
    /// - Ok(false): 路径格式正确但不符合推荐标准
    /// - Err: 路径格式错误，或 ed25519 链包含非硬化层级
    pub fn validate_path(chain: Chain, path: &str) -> Result<bool> {
        let parsed: DerivationPath = path.parse()?;

        let config = ChainRegistry::global()
            .get(chain)
            .ok_or_else(|| WalletError::unsupported(format!("chain {} is not registered", chain)))?;

        let segments = parsed.as_slice();

        match config.curve_type {
            CurveType::Ed25519 => {
                if !parsed.is_fully_hardened() {
                    return Err(WalletError::input(format!(
                        "{} paths must be fully hardened: {}",
                        chain, path
                    )));
                }
                Ok(segments.len() == 3
                    && segments[0] == ChildNumber::Hardened(config.purpose)
                    && segments[1] == ChildNumber::Hardened(config.coin_type))
            }
            CurveType::Secp256k1 => Ok(segments.len() == 5
                && segments[0] == ChildNumber::Hardened(config.purpose)
                && segments[1] == ChildNumber::Hardened(config.coin_type)
                && segments[2].is_hardened()
                && matches!(segments[3], ChildNumber::Normal(0) | ChildNumber::Normal(1))
                && !segments[4].is_hardened()),
        }
    }

    /// 获取链的标准派生路径（account 0 / change 0 / index 0）
    pub fn standard_path(chain: Chain) -> Result<String> {
        PathBuilder::build(chain, &DeriveOptions::default())
    }
}
