//! 统一错误类型
//!
//! 所有派生操作要么完整成功，要么原子失败，不存在部分成功的状态

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// 调用方输入错误（种子过短、路径格式错误、索引越界）
    #[error("invalid input: {0}")]
    Input(String),

    /// 派生失败（公钥节点请求硬化索引、索引耗尽）
    #[error("derivation failed: {0}")]
    Derivation(String),

    /// 该链不支持的操作（Solana 的 xpub / 观察钱包）
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// 公钥点无效，无法编码地址
    #[error("address encoding failed: {0}")]
    AddressEncoding(String),

    /// 调用方提供的扩展公钥无法解析
    #[error("invalid extended public key: {0}")]
    XPubParse(String),
}

impl WalletError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn derivation(msg: impl Into<String>) -> Self {
        Self::Derivation(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    pub fn address_encoding(msg: impl Into<String>) -> Self {
        Self::AddressEncoding(msg.into())
    }

    pub fn xpub_parse(msg: impl Into<String>) -> Self {
        Self::XPubParse(msg.into())
    }

    /// 稳定的错误码字符串，供上层日志 / API 映射使用
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::Input(_) => "invalid_input",
            WalletError::Derivation(_) => "derivation_failed",
            WalletError::UnsupportedOperation(_) => "unsupported_operation",
            WalletError::AddressEncoding(_) => "address_encoding_failed",
            WalletError::XPubParse(_) => "invalid_xpub",
        }
    }

    /// 原始消息（不含错误类别前缀）
    pub fn message(&self) -> &str {
        match self {
            WalletError::Input(m)
            | WalletError::Derivation(m)
            | WalletError::UnsupportedOperation(m)
            | WalletError::AddressEncoding(m)
            | WalletError::XPubParse(m) => m,
        }
    }
}

impl From<bip39::Error> for WalletError {
    fn from(err: bip39::Error) -> Self {
        Self::input(format!("invalid mnemonic: {}", err))
    }
}
