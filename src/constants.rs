//! Constants used in the deploy scripts

use crate::utils::Artifact;

/// The name of the environment variable holding the RPC endpoint URL
pub const RPC_ENV_VAR: &str = "UNISWAP_DEPLOYER_RPC";

/// The name of the environment variable holding the deployer's private key
pub const PRIVATE_KEY_ENV_VAR: &str = "UNISWAP_DEPLOYER_PRIVATE_KEY";

/// The name of the environment variable holding the gas price, in gwei
pub const GAS_PRICE_ENV_VAR: &str = "UNISWAP_DEPLOYER_GAS_PRICE";

/// The name of the environment variable holding the gas limit
pub const GAS_LIMIT_ENV_VAR: &str = "UNISWAP_DEPLOYER_GAS_LIMIT";

/// The default RPC endpoint, a local development node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The default gas price, in gwei
pub const DEFAULT_GAS_PRICE_GWEI: f64 = 0.000005;

/// The default gas limit for deployments and contract calls
pub const DEFAULT_GAS_LIMIT: u64 = 6_000_000;

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The number of characters in a `0x`-prefixed private key
pub const PRIVATE_KEY_LEN: usize = 66;

/// The number of confirmations to wait for on deployment transactions.
///
/// Zero waits for the mined receipt only, which is sufficient on a
/// single-node development chain.
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 0;

/// Name of the first test token
pub const TOKEN_MEM_NAME: &str = "Mehmet";

/// Symbol of the first test token
pub const TOKEN_MEM_SYMBOL: &str = "MEM";

/// Name of the second test token
pub const TOKEN_NMO_NAME: &str = "Nomos";

/// Symbol of the second test token
pub const TOKEN_NMO_SYMBOL: &str = "NMO";

/// The fixed supply minted to the deployer for each token, in whole-token units
pub const INITIAL_TOKEN_SUPPLY: &str = "9999999999999999999";

/// The amount of each token to provision as liquidity, in whole-token units
pub const LIQUIDITY_AMOUNT: &str = "10000000";

/// Seconds past the current time after which the liquidity call expires
pub const DEADLINE_OFFSET_SECS: u64 = 200_000;

/// The deployments key in the deployments file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The WETH contract key in the deployments file
pub const WETH_CONTRACT_KEY: &str = "weth_contract";

/// The factory contract key in the deployments file
pub const FACTORY_CONTRACT_KEY: &str = "factory_contract";

/// The router contract key in the deployments file
pub const ROUTER_CONTRACT_KEY: &str = "router_contract";

/// The MEM token contract key in the deployments file
pub const TOKEN_MEM_CONTRACT_KEY: &str = "token_mem_contract";

/// The NMO token contract key in the deployments file
pub const TOKEN_NMO_CONTRACT_KEY: &str = "token_nmo_contract";

/// The env-file key under which the Nomiswap frontend expects the router address
pub const ROUTER_ENV_EXPORT: &str = "REACT_APP_NOMISWAP_ROUTER_ADDRESS";

/// The env-file key under which the Nomiswap frontend expects the MEM token address
pub const TOKEN_MEM_ENV_EXPORT: &str = "REACT_APP_NOMISWAP_TOKEN_MEM_ADDRESS";

/// The env-file key under which the Nomiswap frontend expects the NMO token address
pub const TOKEN_NMO_ENV_EXPORT: &str = "REACT_APP_NOMISWAP_TOKEN_NMO_ADDRESS";

/// The WETH9 artifact
///
/// Compiled from the `canonical-weth` package
pub const WETH_ARTIFACT: Artifact = Artifact {
    name: "WETH9",
    abi: include_str!("../artifacts/WETH9.abi"),
    bytecode: include_str!("../artifacts/WETH9.bin"),
};

/// The UniswapV2Factory artifact
///
/// Compiled from the `@uniswap/v2-core` package
pub const FACTORY_ARTIFACT: Artifact = Artifact {
    name: "UniswapV2Factory",
    abi: include_str!("../artifacts/UniswapV2Factory.abi"),
    bytecode: include_str!("../artifacts/UniswapV2Factory.bin"),
};

/// The UniswapV2Router02 artifact
///
/// Compiled from the `@uniswap/v2-periphery` package
pub const ROUTER_ARTIFACT: Artifact = Artifact {
    name: "UniswapV2Router02",
    abi: include_str!("../artifacts/UniswapV2Router02.abi"),
    bytecode: include_str!("../artifacts/UniswapV2Router02.bin"),
};

/// The fixed-supply ERC20 artifact
///
/// Compiled from the `@openzeppelin/contracts` package
pub const ERC20_ARTIFACT: Artifact = Artifact {
    name: "ERC20PresetFixedSupply",
    abi: include_str!("../artifacts/ERC20PresetFixedSupply.abi"),
    bytecode: include_str!("../artifacts/ERC20PresetFixedSupply.bin"),
};
