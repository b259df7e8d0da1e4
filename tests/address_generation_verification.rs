//! 地址生成算法验证测试
//!
//! 验证地址生成算法与标准钱包（MetaMask、Trust Wallet、Electrum 等）的一致性
//! 使用BIP39 / BIP84 测试向量验证地址生成结果

use hdforge::prelude::*;
use hdforge::utils::AddressValidator;

/// BIP39标准测试向量
const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn seed() -> Seed {
    seed_from_mnemonic(TEST_MNEMONIC, "").expect("valid test mnemonic")
}

fn derive(chain: Chain, options: &DeriveOptions) -> DerivedAddress {
    derive_address(chain, seed().as_bytes(), options, Network::Mainnet)
        .unwrap_or_else(|e| panic!("Failed to derive {} address: {}", chain, e))
}

/// 测试向量：
/// - Mnemonic: "abandon ... about"
/// - Expected Ethereum address: 0x9858EfFD232B4033E47d90003D41EC34EcaEda94
#[test]
fn test_ethereum_address_generation_bip39_vector() {
    let wallet = derive(Chain::Eth, &DeriveOptions::default());

    assert_eq!(wallet.path, "m/44'/60'/0'/0/0");
    assert_eq!(wallet.address, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
    assert_eq!(wallet.address.len(), 42);

    let private_key = wallet.private_key.as_ref().expect("full derivation exports the key");
    assert_eq!(private_key.hex.len(), 64);
    assert!(private_key.hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

/// BSC 与 Ethereum 使用相同的曲线、路径和编码
#[test]
fn test_bsc_matches_ethereum() {
    for index in 0..3 {
        let opts = DeriveOptions::with_index(index);
        let eth = derive(Chain::Eth, &opts);
        let bsc = derive(Chain::Bsc, &opts);
        assert_eq!(eth.address, bsc.address);
        assert_eq!(eth.path, bsc.path);
        assert_eq!(eth.private_key, bsc.private_key);
    }
}

/// BIP84 参考向量（Electrum / BIP84 文档）
#[test]
fn test_bitcoin_bip84_vectors() {
    assert_eq!(
        derive(Chain::Btc, &DeriveOptions::default()).address,
        "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"
    );
    assert_eq!(
        derive(Chain::Btc, &DeriveOptions::with_index(1)).address,
        "bc1qnjg0jd8228aq7egyzacy8cys3knf9xvrerkf9g"
    );

    let change = derive(Chain::Btc, &DeriveOptions::new(0, 1, 0));
    assert_eq!(change.path, "m/84'/0'/0'/1/0");
    assert_eq!(change.address, "bc1q8c6fshw2dlwun7ekn9qwf37cu2rn755upcp6el");
}

/// 每条链的标准路径
#[test]
fn test_standard_paths_for_every_chain() {
    let expected = [
        (Chain::Btc, "m/84'/0'/0'/0/0"),
        (Chain::Eth, "m/44'/60'/0'/0/0"),
        (Chain::Bsc, "m/44'/60'/0'/0/0"),
        (Chain::Doge, "m/44'/3'/0'/0/0"),
        (Chain::Ltc, "m/84'/2'/0'/0/0"),
        (Chain::Trx, "m/44'/195'/0'/0/0"),
        (Chain::Xrp, "m/44'/144'/0'/0/0"),
        (Chain::Sol, "m/44'/501'/0'"),
    ];

    for (chain, path) in expected {
        assert_eq!(derive(chain, &DeriveOptions::default()).path, path, "{}", chain);
    }
}

/// 地址格式
#[test]
fn test_address_formats() {
    let opts = DeriveOptions::default();

    assert!(derive(Chain::Btc, &opts).address.starts_with("bc1q"));
    assert!(derive(Chain::Ltc, &opts).address.starts_with("ltc1q"));
    assert!(derive(Chain::Doge, &opts).address.starts_with('D'));

    let trx = derive(Chain::Trx, &opts).address;
    assert!(trx.starts_with('T'));
    let payload = bs58::decode(&trx).with_check(None).into_vec().unwrap();
    assert_eq!(payload[0], 0x41);
    assert_eq!(payload.len(), 21);

    let xrp = derive(Chain::Xrp, &opts).address;
    assert!(xrp.starts_with('r'));
    let payload = bs58::decode(&xrp)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .with_check(None)
        .into_vec()
        .unwrap();
    assert_eq!(payload[0], 0x00);

    let sol = derive(Chain::Sol, &opts);
    assert_eq!(bs58::decode(&sol.address).into_vec().unwrap().len(), 32);
    assert_eq!(hex::decode(&sol.public_key).unwrap(), bs58::decode(&sol.address).into_vec().unwrap());

    for chain in Chain::ALL {
        let wallet = derive(chain, &opts);
        assert!(
            AddressValidator::validate_for(chain, &wallet.address, Network::Mainnet).unwrap(),
            "{} address {} failed validation",
            chain,
            wallet.address
        );
    }
}

/// TRX 与 ETH 共享同一个 20 字节账户哈希
#[test]
fn test_tron_shares_evm_account_hash() {
    let eth = derive(Chain::Eth, &DeriveOptions::default());
    let trx = derive_address(
        Chain::Trx,
        seed().as_bytes(),
        &DeriveOptions::with_path("m/44'/60'/0'/0/0"),
        Network::Mainnet,
    )
    .unwrap();

    let payload = bs58::decode(&trx.address).with_check(None).into_vec().unwrap();
    assert_eq!(hex::encode(&payload[1..]), eth.address[2..].to_lowercase());
}

/// 相同输入应产生字节级一致的输出
#[test]
fn test_address_generation_reproducibility() {
    for chain in Chain::ALL {
        let opts = DeriveOptions::new(1, 0, 4);
        let first = derive(chain, &opts);
        let second = derive(chain, &opts);
        assert_eq!(first, second, "{}", chain);
    }
}

/// 不同索引生成不同地址
#[test]
fn test_different_indexes_generate_different_addresses() {
    for chain in Chain::ALL {
        let addresses: Vec<String> = (0..3)
            .map(|i| derive(chain, &DeriveOptions::with_index(i)).address)
            .collect();
        assert_ne!(addresses[0], addresses[1], "{}", chain);
        assert_ne!(addresses[1], addresses[2], "{}", chain);
        assert_ne!(addresses[0], addresses[2], "{}", chain);
    }
}

/// Solana 路径为 m/44'/501'/(account + index)'，和相同的组合得到同一把密钥
#[test]
fn test_solana_account_index_aliasing() {
    let a = derive(Chain::Sol, &DeriveOptions::new(1, 0, 2));
    let b = derive(Chain::Sol, &DeriveOptions::new(0, 0, 3));
    let c = derive(Chain::Sol, &DeriveOptions::new(3, 0, 0));

    assert_eq!(a.path, "m/44'/501'/3'");
    assert_eq!(a.address, b.address);
    assert_eq!(a.address, c.address);
    assert_eq!(a.private_key, b.private_key);

    let d = derive(Chain::Sol, &DeriveOptions::new(0, 0, 4));
    assert_ne!(a.address, d.address);
}

/// 种子短于 16 字节时所有链都拒绝
#[test]
fn test_short_seed_rejected() {
    for chain in Chain::ALL {
        for len in [0usize, 1, 15] {
            let err = derive_address(chain, &vec![0xAB; len], &DeriveOptions::default(), Network::Mainnet)
                .unwrap_err();
            assert!(matches!(err, WalletError::Input(_)), "{} len {}: {:?}", chain, len, err);
        }
    }
}

/// 导出的扩展公钥不含私钥材料
#[test]
fn test_exported_xpubs_are_public_only() {
    let seed = seed();

    for chain in Chain::ALL.into_iter().filter(|c| *c != Chain::Sol) {
        for network in Network::ALL {
            let result = derive_extended_public_key(chain, seed.as_bytes(), &DeriveOptions::default(), network)
                .unwrap();
            assert!(!result.xpub.contains("prv"), "{}", result.xpub);

            let raw = bs58::decode(&result.xpub).with_check(None).into_vec().unwrap();
            assert_eq!(raw.len(), 78);
            assert!(raw[45] == 0x02 || raw[45] == 0x03, "{} {} key byte", chain, network);
            assert_eq!(raw[4], 4, "account/change level depth");
        }
    }
}

/// 输出 JSON 结构：缺省字段不序列化
#[test]
fn test_output_json_shape() {
    let wallet = derive(Chain::Eth, &DeriveOptions::default());
    let json = serde_json::to_value(&wallet).unwrap();

    assert_eq!(json["chain"], "ETH");
    assert_eq!(json["network"], "mainnet");
    assert_eq!(json["path"], "m/44'/60'/0'/0/0");
    assert!(json["private_key"]["hex"].is_string());
    assert!(json["private_key"].get("bytes").is_none());

    let back: DerivedAddress = serde_json::from_value(json).unwrap();
    assert_eq!(back, wallet);
}
