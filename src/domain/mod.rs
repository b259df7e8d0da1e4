//! Domain 模块
//!
//! 包含核心派生逻辑和领域模型

pub mod address_codec;
pub mod chain_config;
pub mod derivation_path;
pub mod key_tree;
pub mod multi_chain_wallet;
pub mod wallet_engine;
pub mod watch_only;


// 重新导出常用类型
pub use address_codec::{ChainAddressCodec, PrivateKeyExport};
pub use chain_config::{
    AddressFamily, Chain, ChainConfig, ChainRegistry, CurveType, Network, NetworkProfile,
};
pub use derivation_path::{
    ChildNumber, DerivationPath, DerivationPathValidator, DeriveOptions, PathBuilder,
};
pub use key_tree::{KeyNode, KeyTree};
pub use multi_chain_wallet::{MultiChainReport, MultiChainWalletService, WalletChainInfo};
pub use wallet_engine::{DerivedAddress, Seed, XPubResult};
pub use watch_only::{WatchOnlyAddress, WatchOnlyDeriver};
