//! Utilities for the deploy scripts.

use std::{fs, io::Read, path::PathBuf, str::FromStr, sync::Arc};

use async_trait::async_trait;
use ethers::{
    abi::{Abi, Address, Token},
    contract::ContractFactory,
    middleware::{NonceManagerMiddleware, SignerMiddleware},
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Bytes, U256},
    utils::hex::FromHex,
};
use json::JsonValue;

use crate::{
    cli::Config,
    constants::{DEPLOYMENTS_KEY, NUM_DEPLOY_CONFIRMATIONS},
    errors::ScriptError,
};

/// The middleware stack used to sign and submit transactions
pub type DeployerMiddleware =
    NonceManagerMiddleware<SignerMiddleware<Provider<Http>, LocalWallet>>;

/// Sets up the client with which to deploy and call contracts, binding the
/// RPC endpoint and registering the signer derived from the private key.
pub async fn setup_client(config: &Config) -> Result<Arc<DeployerMiddleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(&config.priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();

    let wallet = wallet.with_chain_id(chain_id);
    let address = wallet.address();

    // The nonce manager assigns nonces locally, so independent deployments
    // may be in flight concurrently from the one signer.
    let client = Arc::new(NonceManagerMiddleware::new(
        SignerMiddleware::new(provider, wallet),
        address,
    ));

    Ok(client)
}

/// Gas options applied to every transaction the scripts send
#[derive(Copy, Clone, Debug)]
pub struct TxOptions {
    /// Legacy gas price, in wei
    pub gas_price: U256,
    /// Gas limit
    pub gas_limit: U256,
}

impl TxOptions {
    /// Resolve the configured decimal-gwei gas price and gas limit
    pub fn from_config(config: &Config) -> Result<Self, ScriptError> {
        let gas_price = ethers::utils::parse_units(config.gas_price, "gwei")
            .map_err(|e| ScriptError::InvalidConfig(e.to_string()))?
            .into();

        Ok(Self {
            gas_price,
            gas_limit: U256::from(config.gas_limit),
        })
    }
}

/// A compiled contract artifact: the interface descriptor and creation
/// bytecode produced by the upstream build pipeline
#[derive(Copy, Clone, Debug)]
pub struct Artifact {
    /// Contract name, used for logging and error reporting
    pub name: &'static str,
    /// The JSON ABI
    pub abi: &'static str,
    /// The hex-encoded creation bytecode
    pub bytecode: &'static str,
}

/// A backend capable of deploying compiled contract artifacts
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Deploy `artifact` with the given constructor arguments, returning the
    /// address of the mined contract
    async fn deploy(
        &self,
        artifact: &Artifact,
        constructor_args: Vec<Token>,
    ) -> Result<Address, ScriptError>;
}

/// Deploys artifacts through an ethers `ContractFactory`
pub struct EthersDeployer<M> {
    /// The middleware used to sign and submit deployment transactions
    client: Arc<M>,
    /// Gas options applied to every deployment transaction
    opts: TxOptions,
}

impl<M> EthersDeployer<M> {
    /// Create a deployer over the given client
    pub fn new(client: Arc<M>, opts: TxOptions) -> Self {
        Self { client, opts }
    }
}

#[async_trait]
impl<M: Middleware + 'static> ContractDeployer for EthersDeployer<M> {
    async fn deploy(
        &self,
        artifact: &Artifact,
        constructor_args: Vec<Token>,
    ) -> Result<Address, ScriptError> {
        let abi: Abi = serde_json::from_str(artifact.abi)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", artifact.name, e)))?;
        let bytecode = Bytes::from_hex(artifact.bytecode.trim())
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", artifact.name, e)))?;

        let factory = ContractFactory::new(abi, bytecode, self.client.clone());
        let mut deployer = factory
            .deploy_tokens(constructor_args)
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .legacy();
        deployer.tx.set_gas(self.opts.gas_limit);
        deployer.tx.set_gas_price(self.opts.gas_price);

        let contract = deployer
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        Ok(contract.address())
    }
}

/// Parse the given file as JSON
pub fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    fs::File::open(file_path)
        .map_err(|e| ScriptError::ReadFile(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::ReadFile(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::ReadFile(e.to_string()))
}

/// Write the given contract address under `contract_key` in the deployments
/// file, creating the file if it does not exist
pub fn write_deployed_address(
    file_path: &str,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    }
    let mut parsed_json = get_json_from_file(file_path)?;

    parsed_json[DEPLOYMENTS_KEY][contract_key] = JsonValue::String(format!("{address:#x}"));

    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    //! Artifact and deployments-file tests

    use ethers::{
        abi::{Abi, Address},
        types::Bytes,
        utils::hex::FromHex,
    };
    use tempfile::tempdir;

    use super::{get_json_from_file, write_deployed_address, Artifact};
    use crate::constants::{
        DEPLOYMENTS_KEY, ERC20_ARTIFACT, FACTORY_ARTIFACT, FACTORY_CONTRACT_KEY, ROUTER_ARTIFACT,
        WETH_ARTIFACT, WETH_CONTRACT_KEY,
    };

    /// The artifacts the scripts deploy
    const ARTIFACTS: [Artifact; 4] = [
        WETH_ARTIFACT,
        FACTORY_ARTIFACT,
        ROUTER_ARTIFACT,
        ERC20_ARTIFACT,
    ];

    /// Every vendored ABI parses, and all but WETH9 declare a constructor
    #[test]
    fn test_artifact_abis_parse() {
        for artifact in ARTIFACTS {
            let abi: Abi = serde_json::from_str(artifact.abi).expect(artifact.name);
            assert_eq!(abi.constructor().is_some(), artifact.name != "WETH9");
        }
    }

    /// Every vendored bytecode file is plain hex
    #[test]
    fn test_artifact_bytecode_decodes() {
        for artifact in ARTIFACTS {
            Bytes::from_hex(artifact.bytecode.trim()).expect(artifact.name);
        }
    }

    /// Written addresses land under the deployments key and survive re-reads
    #[test]
    fn test_write_deployed_address_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let path = path.to_str().unwrap();

        let weth = Address::from_low_u64_be(1);
        let factory = Address::from_low_u64_be(2);
        write_deployed_address(path, WETH_CONTRACT_KEY, weth).unwrap();
        write_deployed_address(path, FACTORY_CONTRACT_KEY, factory).unwrap();

        let parsed = get_json_from_file(path).unwrap();
        assert_eq!(
            parsed[DEPLOYMENTS_KEY][WETH_CONTRACT_KEY].as_str().unwrap(),
            format!("{weth:#x}")
        );
        assert_eq!(
            parsed[DEPLOYMENTS_KEY][FACTORY_CONTRACT_KEY]
                .as_str()
                .unwrap(),
            format!("{factory:#x}")
        );
    }
}
