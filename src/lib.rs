//! hdforge - 多链分层确定性密钥与地址派生引擎
//!
//! 一个种子派生 BTC / ETH / BSC / DOGE / LTC / TRX / XRP / SOL 的地址，
//! 并支持基于扩展公钥的观察钱包派生（无需种子或私钥）。
//!
//! ```
//! use hdforge::prelude::*;
//!
//! let seed = seed_from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     "",
//! )
//! .unwrap();
//! let eth = derive_address(Chain::Eth, seed.as_bytes(), &DeriveOptions::default(), Network::Mainnet)
//!     .unwrap();
//! assert_eq!(eth.address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

// 重新导出常用类型
pub use domain::wallet_engine::{
    derive_address, derive_extended_public_key, derive_watch_only_address, seed_from_mnemonic,
};
pub use error::{Result, WalletError};

// 统一模块导出
pub mod prelude {
    pub use crate::{
        domain::{
            Chain, ChainRegistry, CurveType, DerivedAddress, DeriveOptions,
            MultiChainWalletService, Network, Seed, WatchOnlyAddress, XPubResult,
        },
        error::{Result, WalletError},
        derive_address, derive_extended_public_key, derive_watch_only_address,
        seed_from_mnemonic,
    };
}
