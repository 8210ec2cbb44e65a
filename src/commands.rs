//! Implementations of the deploy and liquidity-provisioning flows

use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use ethers::{
    abi::{Address, Token},
    providers::Middleware,
    types::U256,
    utils::{format_units, parse_ether},
};
use tracing::{info, warn};

use crate::{
    constants::{
        DEADLINE_OFFSET_SECS, ERC20_ARTIFACT, FACTORY_ARTIFACT, FACTORY_CONTRACT_KEY,
        INITIAL_TOKEN_SUPPLY, LIQUIDITY_AMOUNT, ROUTER_ARTIFACT, ROUTER_CONTRACT_KEY,
        ROUTER_ENV_EXPORT, TOKEN_MEM_CONTRACT_KEY, TOKEN_MEM_ENV_EXPORT, TOKEN_MEM_NAME,
        TOKEN_MEM_SYMBOL, TOKEN_NMO_CONTRACT_KEY, TOKEN_NMO_ENV_EXPORT, TOKEN_NMO_NAME,
        TOKEN_NMO_SYMBOL, WETH_ARTIFACT, WETH_CONTRACT_KEY,
    },
    errors::ScriptError,
    solidity::{Erc20Contract, FactoryContract, PairContract, RouterContract},
    utils::{write_deployed_address, ContractDeployer, TxOptions},
};

/// Addresses of the deployed contract set
#[derive(Copy, Clone, Debug)]
pub struct DeployedContracts {
    /// The wrapped-native-currency contract
    pub weth: Address,
    /// The pair factory
    pub factory: Address,
    /// The swap router
    pub router: Address,
    /// The "Mehmet" (MEM) token
    pub token_mem: Address,
    /// The "Nomos" (NMO) token
    pub token_nmo: Address,
}

/// Deploy the full contract set.
///
/// The router's constructor consumes the factory and WETH addresses, so those
/// two deployments must have resolved before it is attempted. The two token
/// deployments are independent of everything but the signer and run
/// concurrently.
pub async fn deploy_system(
    deployer: &impl ContractDeployer,
    signer: Address,
) -> Result<DeployedContracts, ScriptError> {
    let weth = deployer.deploy(&WETH_ARTIFACT, vec![]).await?;
    info!("WETH address: {weth:#x}");

    // The signer doubles as the factory's fee-to setter
    let factory = deployer
        .deploy(&FACTORY_ARTIFACT, vec![Token::Address(signer)])
        .await?;
    info!("Factory address: {factory:#x}");

    let router = deployer
        .deploy(
            &ROUTER_ARTIFACT,
            vec![Token::Address(factory), Token::Address(weth)],
        )
        .await?;
    info!("Router address: {router:#x}");

    let supply = parse_ether(INITIAL_TOKEN_SUPPLY)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
    let (token_mem, token_nmo) = tokio::try_join!(
        deployer.deploy(
            &ERC20_ARTIFACT,
            vec![
                Token::String(TOKEN_MEM_NAME.to_string()),
                Token::String(TOKEN_MEM_SYMBOL.to_string()),
                Token::Uint(supply),
                Token::Address(signer),
            ],
        ),
        deployer.deploy(
            &ERC20_ARTIFACT,
            vec![
                Token::String(TOKEN_NMO_NAME.to_string()),
                Token::String(TOKEN_NMO_SYMBOL.to_string()),
                Token::Uint(supply),
                Token::Address(signer),
            ],
        ),
    )?;
    info!("MEM token address: {token_mem:#x}");
    info!("NMO token address: {token_nmo:#x}");

    Ok(DeployedContracts {
        weth,
        factory,
        router,
        token_mem,
        token_nmo,
    })
}

/// Record every deployed address in the deployments file
pub fn record_deployments(
    file_path: &str,
    contracts: &DeployedContracts,
) -> Result<(), ScriptError> {
    write_deployed_address(file_path, WETH_CONTRACT_KEY, contracts.weth)?;
    write_deployed_address(file_path, FACTORY_CONTRACT_KEY, contracts.factory)?;
    write_deployed_address(file_path, ROUTER_CONTRACT_KEY, contracts.router)?;
    write_deployed_address(file_path, TOKEN_MEM_CONTRACT_KEY, contracts.token_mem)?;
    write_deployed_address(file_path, TOKEN_NMO_CONTRACT_KEY, contracts.token_nmo)?;

    Ok(())
}

/// Print the env-file lines consumed by the Nomiswap frontend
pub fn print_env_exports(contracts: &DeployedContracts) {
    println!("# You may also copy this to Nomiswap's .env file:");
    println!("{ROUTER_ENV_EXPORT}={:#x}", contracts.router);
    println!("{TOKEN_MEM_ENV_EXPORT}={:#x}", contracts.token_mem);
    println!("{TOKEN_NMO_ENV_EXPORT}={:#x}", contracts.token_nmo);
}

/// Approve `spender` to move `amount` of `token` on the signer's behalf.
///
/// Never surfaces a failure to the caller: the call is dry-run first so a
/// revert carries its reason without spending gas, and a failure of the
/// subsequent send is logged as a diagnostic.
pub async fn approve<M: Middleware + 'static>(
    token: &Erc20Contract<M>,
    spender: Address,
    amount: U256,
    opts: &TxOptions,
) {
    let call = token
        .approve(spender, amount)
        .legacy()
        .gas(opts.gas_limit)
        .gas_price(opts.gas_price);

    if let Err(e) = call.call().await {
        warn!("approve({spender:#x}, {amount}) would revert: {e}");
        return;
    }

    match call.send().await {
        Ok(pending) => {
            info!("approve transaction hash: {:#x}", *pending);
            match pending.await {
                Ok(Some(receipt)) => info!(
                    "approve mined in block {}",
                    receipt.block_number.unwrap_or_default()
                ),
                Ok(None) => warn!("approve transaction dropped before it was mined"),
                Err(e) => warn!("approve transaction failed: {e}"),
            }
        }
        Err(e) => warn!("approve transaction reverted: {e}"),
    };
}

/// Provision initial MEM/NMO liquidity through the router, then report the
/// resulting pair's reserves.
///
/// Chain failures are logged and swallowed; the pair inspection runs
/// whether or not the liquidity call landed.
pub async fn provision_liquidity<M: Middleware + 'static>(
    client: Arc<M>,
    contracts: &DeployedContracts,
    signer: Address,
    opts: &TxOptions,
) -> Result<(), ScriptError> {
    let amount_desired: U256 = parse_ether(LIQUIDITY_AMOUNT)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
    let amount_min = U256::zero();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?
        .as_secs();
    let deadline = U256::from(now + DEADLINE_OFFSET_SECS);

    // The router pulls both desired amounts from the signer's balances
    let token_mem = Erc20Contract::new(contracts.token_mem, client.clone());
    let token_nmo = Erc20Contract::new(contracts.token_nmo, client.clone());
    approve(&token_mem, contracts.router, amount_desired, opts).await;
    approve(&token_nmo, contracts.router, amount_desired, opts).await;

    let router = RouterContract::new(contracts.router, client.clone());
    let call = router
        .add_liquidity(
            contracts.token_mem,
            contracts.token_nmo,
            amount_desired,
            amount_desired,
            amount_min,
            amount_min,
            signer,
            deadline,
        )
        .legacy()
        .gas(opts.gas_limit)
        .gas_price(opts.gas_price);

    // Dry-run before submitting; a revert here carries the reason
    match call.call().await {
        Err(e) => warn!("addLiquidity would revert: {e}"),
        Ok(_) => match call.send().await {
            Ok(pending) => {
                info!("addLiquidity transaction hash: {:#x}", *pending);
                match pending.await {
                    Ok(Some(receipt)) => info!(
                        "addLiquidity mined in block {}, gas used {}",
                        receipt.block_number.unwrap_or_default(),
                        receipt.gas_used.unwrap_or_default(),
                    ),
                    Ok(None) => warn!("addLiquidity transaction dropped before it was mined"),
                    Err(e) => warn!("addLiquidity transaction failed: {e}"),
                }
            }
            Err(e) => warn!("addLiquidity transaction reverted: {e}"),
        },
    }

    inspect_pair(client, contracts).await;

    Ok(())
}

/// Look up the MEM/NMO pair in the factory and report its reserves.
///
/// Diagnostics only: every failure is logged and swallowed.
pub async fn inspect_pair<M: Middleware + 'static>(client: Arc<M>, contracts: &DeployedContracts) {
    info!("MEM token address: {:#x}", contracts.token_mem);
    info!("NMO token address: {:#x}", contracts.token_nmo);

    let factory = FactoryContract::new(contracts.factory, client.clone());
    let pair_address = match factory
        .get_pair(contracts.token_mem, contracts.token_nmo)
        .call()
        .await
    {
        Ok(addr) => addr,
        Err(e) => {
            warn!("pair lookup reverted: {e}");
            return;
        }
    };

    if pair_address == Address::zero() {
        warn!("factory has no MEM/NMO pair registered");
        return;
    }

    info!("pair address: {pair_address:#x}");
    info!("router address: {:#x}", contracts.router);

    // The pair orders token0/token1 by address, not by deployment order
    let pair = PairContract::new(pair_address, client);
    match pair.get_reserves().call().await {
        Ok((reserve0, reserve1, _)) => {
            let reserve0 = format_units(U256::from(reserve0), "ether").unwrap_or_default();
            let reserve1 = format_units(U256::from(reserve1), "ether").unwrap_or_default();
            info!("pair reserve0: {reserve0}");
            info!("pair reserve1: {reserve1}");
        }
        Err(e) => warn!("reserve lookup reverted: {e}"),
    }
}

#[cfg(test)]
mod tests {
    //! Orchestration tests over mocked deployment and provider backends

    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use ethers::{
        abi::{Address, Token},
        providers::Provider,
        types::{Bytes, U256},
    };

    use super::{approve, deploy_system, provision_liquidity, DeployedContracts};
    use crate::{
        errors::ScriptError,
        solidity::Erc20Contract,
        utils::{Artifact, ContractDeployer, TxOptions},
    };

    /// Records the order in which artifacts are deployed
    #[derive(Default)]
    struct RecordingDeployer {
        /// Artifact names in deployment order
        deployed: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl ContractDeployer for RecordingDeployer {
        /// Record the artifact and hand back a synthetic address
        async fn deploy(
            &self,
            artifact: &Artifact,
            _constructor_args: Vec<Token>,
        ) -> Result<Address, ScriptError> {
            let mut deployed = self.deployed.lock().unwrap();
            deployed.push(artifact.name);
            Ok(Address::from_low_u64_be(deployed.len() as u64))
        }
    }

    /// Gas options used by the mocked flows
    fn test_opts() -> TxOptions {
        TxOptions {
            gas_price: U256::from(1_000u64),
            gas_limit: U256::from(6_000_000u64),
        }
    }

    /// Synthetic contract addresses for the mocked flows
    fn test_contracts() -> DeployedContracts {
        DeployedContracts {
            weth: Address::from_low_u64_be(1),
            factory: Address::from_low_u64_be(2),
            router: Address::from_low_u64_be(3),
            token_mem: Address::from_low_u64_be(4),
            token_nmo: Address::from_low_u64_be(5),
        }
    }

    /// The router deployment is only attempted once both the factory and
    /// WETH deployments have returned
    #[tokio::test]
    async fn test_router_deploys_after_factory_and_weth() {
        let deployer = RecordingDeployer::default();
        let signer = Address::from_low_u64_be(42);
        deploy_system(&deployer, signer).await.unwrap();

        let deployed = deployer.deployed.lock().unwrap().clone();
        assert_eq!(deployed.len(), 5);

        let position = |name: &str| deployed.iter().position(|n| *n == name).unwrap();
        assert!(position("UniswapV2Router02") > position("WETH9"));
        assert!(position("UniswapV2Router02") > position("UniswapV2Factory"));
    }

    /// A dry-run revert is swallowed rather than raised
    #[tokio::test]
    async fn test_approve_swallows_dry_run_revert() {
        // An empty mock errors every request, so the dry-run fails
        let (provider, _mock) = Provider::mocked();
        let token = Erc20Contract::new(Address::from_low_u64_be(1), Arc::new(provider));
        approve(
            &token,
            Address::from_low_u64_be(2),
            U256::from(1u64),
            &test_opts(),
        )
        .await;
    }

    /// A send failure after a clean dry-run is swallowed rather than raised
    #[tokio::test]
    async fn test_approve_swallows_send_failure() {
        let (provider, mock) = Provider::mocked();
        // One queued response serves the dry-run; the send then fails on the
        // exhausted queue
        mock.push::<Bytes, _>(Bytes::from(vec![0u8; 32])).unwrap();

        let token = Erc20Contract::new(Address::from_low_u64_be(1), Arc::new(provider));
        approve(
            &token,
            Address::from_low_u64_be(2),
            U256::from(1u64),
            &test_opts(),
        )
        .await;
    }

    /// The flow completes, reaching the pair inspection, even when every
    /// chain call fails
    #[tokio::test]
    async fn test_provision_liquidity_survives_total_failure() {
        let (provider, _mock) = Provider::mocked();
        let client = Arc::new(provider);

        let result = provision_liquidity(
            client,
            &test_contracts(),
            Address::from_low_u64_be(9),
            &test_opts(),
        )
        .await;

        assert!(result.is_ok());
    }
}
