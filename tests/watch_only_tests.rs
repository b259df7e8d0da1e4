//! 观察钱包派生测试
//!
//! 核心性质：对支持公钥派生的链，xpub 派生的地址与种子派生的地址逐字节一致

use std::thread;

use hdforge::prelude::*;

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

const WATCH_ONLY_CHAINS: [Chain; 7] = [
    Chain::Btc,
    Chain::Ltc,
    Chain::Doge,
    Chain::Eth,
    Chain::Bsc,
    Chain::Trx,
    Chain::Xrp,
];

fn seed() -> Seed {
    seed_from_mnemonic(TEST_MNEMONIC, "").expect("valid test mnemonic")
}

#[test]
fn test_watch_only_equivalence() {
    let seed = seed();

    for chain in WATCH_ONLY_CHAINS {
        for network in Network::ALL {
            for (account, change) in [(0, 0), (0, 1), (2, 0)] {
                let xpub = derive_extended_public_key(
                    chain,
                    seed.as_bytes(),
                    &DeriveOptions::new(account, change, 0),
                    network,
                )
                .unwrap();

                for index in 0..=5 {
                    let full = derive_address(
                        chain,
                        seed.as_bytes(),
                        &DeriveOptions::new(account, change, index),
                        network,
                    )
                    .unwrap();
                    let watch =
                        derive_watch_only_address(chain, &xpub.xpub, change, index, network).unwrap();

                    assert_eq!(
                        watch.address, full.address,
                        "{} {} account {} change {} index {}",
                        chain, network, account, change, index
                    );
                    assert_eq!(watch.path, format!("{}/{}", change, index));
                    assert_eq!(watch.xpub, xpub.xpub);
                }
            }
        }
    }
}

#[test]
fn test_solana_exclusions() {
    let seed = seed();

    let err = derive_extended_public_key(
        Chain::Sol,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap_err();
    assert!(matches!(err, WalletError::UnsupportedOperation(_)));

    // 用一个合法的 BTC xpub 也不行
    let btc = derive_extended_public_key(
        Chain::Btc,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap();
    let err = derive_watch_only_address(Chain::Sol, &btc.xpub, 0, 0, Network::Mainnet).unwrap_err();
    assert!(matches!(err, WalletError::UnsupportedOperation(_)));
}

#[test]
fn test_xpub_network_mismatch_is_rejected() {
    let seed = seed();

    let mainnet = derive_extended_public_key(
        Chain::Btc,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap();
    assert!(mainnet.xpub.starts_with("xpub"));

    let testnet = derive_extended_public_key(
        Chain::Btc,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Testnet,
    )
    .unwrap();
    assert!(testnet.xpub.starts_with("tpub"));

    let err = derive_watch_only_address(Chain::Btc, &mainnet.xpub, 0, 0, Network::Testnet)
        .unwrap_err();
    assert!(matches!(err, WalletError::XPubParse(_)));

    let err = derive_watch_only_address(Chain::Btc, &testnet.xpub, 0, 0, Network::Mainnet)
        .unwrap_err();
    assert!(matches!(err, WalletError::XPubParse(_)));
}

#[test]
fn test_chain_specific_xpub_versions() {
    let seed = seed();

    let ltc = derive_extended_public_key(
        Chain::Ltc,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap();
    assert!(ltc.xpub.starts_with("Ltub"));

    let doge = derive_extended_public_key(
        Chain::Doge,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap();
    assert!(doge.xpub.starts_with("dgub"));

    // LTC 的 xpub 不能当作 BTC 的使用
    let err = derive_watch_only_address(Chain::Btc, &ltc.xpub, 0, 0, Network::Mainnet).unwrap_err();
    assert!(matches!(err, WalletError::XPubParse(_)));
}

#[test]
fn test_corrupted_xpub_is_rejected() {
    let seed = seed();
    let xpub = derive_extended_public_key(
        Chain::Eth,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap()
    .xpub;

    let mut chars: Vec<char> = xpub.chars().collect();
    let mid = chars.len() / 2;
    chars[mid] = if chars[mid] == 'A' { 'B' } else { 'A' };
    let corrupted: String = chars.into_iter().collect();

    let err = derive_watch_only_address(Chain::Eth, &corrupted, 0, 0, Network::Mainnet).unwrap_err();
    assert!(matches!(err, WalletError::XPubParse(_)));

    let err = derive_watch_only_address(Chain::Eth, "", 0, 0, Network::Mainnet).unwrap_err();
    assert!(matches!(err, WalletError::XPubParse(_)));
}

#[test]
fn test_parallel_derivation_is_consistent() {
    let seed = seed();
    let expected: Vec<String> = (0..8)
        .map(|i| {
            derive_address(Chain::Btc, seed.as_bytes(), &DeriveOptions::with_index(i), Network::Mainnet)
                .unwrap()
                .address
        })
        .collect();

    let xpub = derive_extended_public_key(
        Chain::Btc,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap()
    .xpub;

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let xpub = xpub.clone();
            thread::spawn(move || {
                derive_watch_only_address(Chain::Btc, &xpub, 0, i, Network::Mainnet)
                    .unwrap()
                    .address
            })
        })
        .collect();

    let actual: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_hardened_index_on_public_node_is_derivation_error() {
    let seed = seed();
    let xpub = derive_extended_public_key(
        Chain::Btc,
        seed.as_bytes(),
        &DeriveOptions::default(),
        Network::Mainnet,
    )
    .unwrap()
    .xpub;

    for index in [0x8000_0000u32, u32::MAX] {
        let err = derive_watch_only_address(Chain::Btc, &xpub, 0, index, Network::Mainnet).unwrap_err();
        assert!(matches!(err, WalletError::Derivation(_)), "index {}: {:?}", index, err);
    }
}
