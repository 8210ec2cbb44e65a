//! End-to-end deployment flow against a local development chain.
//!
//! Requires a node (e.g. `anvil`) listening on the default RPC endpoint with
//! its default funded accounts, and real contract bytecode in `artifacts/`.
//! Run with `cargo test -- --ignored`.

use std::sync::Arc;

use ethers::{providers::Middleware, types::U256, utils::parse_ether};
use nomiswap_scripts::{
    cli::Config,
    commands::{deploy_system, provision_liquidity, record_deployments},
    constants::{DEFAULT_GAS_LIMIT, DEFAULT_RPC_URL, LIQUIDITY_AMOUNT, RPC_ENV_VAR},
    solidity::{FactoryContract, PairContract},
    utils::{setup_client, EthersDeployer, TxOptions},
};
use tempfile::tempdir;

/// The first default funded account of an Anvil node
const DEV_CHAIN_PRIV_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[tokio::test]
#[ignore = "requires a local dev chain"]
async fn test_deploy_and_provision() {
    let deployments_dir = tempdir().unwrap();
    let deployments_path = deployments_dir.path().join("deployments.json");

    let config = Config {
        rpc_url: std::env::var(RPC_ENV_VAR).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
        priv_key: DEV_CHAIN_PRIV_KEY.to_string(),
        gas_price: 1.0,
        gas_limit: DEFAULT_GAS_LIMIT,
        deployments_path: deployments_path.to_str().unwrap().to_string(),
    };

    let client = setup_client(&config).await.unwrap();
    let signer = client.default_sender().unwrap();
    let opts = TxOptions::from_config(&config).unwrap();
    let deployer = EthersDeployer::new(client.clone(), opts);

    let contracts = deploy_system(&deployer, signer).await.unwrap();
    record_deployments(&config.deployments_path, &contracts).unwrap();
    assert!(deployments_path.exists());

    provision_liquidity(client.clone(), &contracts, signer, &opts)
        .await
        .unwrap();

    // The liquidity call must have created and funded the pair
    let factory = FactoryContract::new(contracts.factory, client.clone());
    let pair_address = factory
        .get_pair(contracts.token_mem, contracts.token_nmo)
        .call()
        .await
        .unwrap();
    assert_ne!(pair_address, Default::default());

    let desired: U256 = parse_ether(LIQUIDITY_AMOUNT).unwrap();
    let pair = PairContract::new(pair_address, client);
    let (reserve0, reserve1, _) = pair.get_reserves().call().await.unwrap();
    assert_eq!(U256::from(reserve0), desired);
    assert_eq!(U256::from(reserve1), desired);
}
