//! Definitions of CLI arguments and configuration for the deploy scripts

use clap::Parser;

use crate::{
    constants::{
        DEFAULT_DEPLOYMENTS_PATH, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE_GWEI, DEFAULT_RPC_URL,
        GAS_LIMIT_ENV_VAR, GAS_PRICE_ENV_VAR, PRIVATE_KEY_ENV_VAR, PRIVATE_KEY_LEN, RPC_ENV_VAR,
    },
    errors::ScriptError,
};

/// CLI arguments for the deploy scripts.
///
/// Every argument may also be provided through the environment variable
/// named in its help text.
#[derive(Debug, Parser)]
#[command(about = "Deploy the Nomiswap Uniswap V2 contract stack")]
pub struct Cli {
    /// Private key of the deployer
    #[arg(long, env = PRIVATE_KEY_ENV_VAR)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(long, env = RPC_ENV_VAR, default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Gas price for every transaction, in gwei
    #[arg(long, env = GAS_PRICE_ENV_VAR, default_value_t = DEFAULT_GAS_PRICE_GWEI)]
    pub gas_price: f64,

    /// Gas limit for every transaction
    #[arg(long, env = GAS_LIMIT_ENV_VAR, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Path of the JSON file in which deployed addresses are recorded
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,
}

/// The validated runtime configuration, constructed once at startup and
/// passed to every component
#[derive(Clone, Debug)]
pub struct Config {
    /// RPC endpoint of the target chain
    pub rpc_url: String,
    /// The deployer's `0x`-prefixed private key
    pub priv_key: String,
    /// Gas price in gwei; fractional values are allowed
    pub gas_price: f64,
    /// Gas limit applied to every transaction
    pub gas_limit: u64,
    /// Path of the deployments file
    pub deployments_path: String,
}

impl Config {
    /// Validate CLI arguments into a `Config`, printing the resolved values
    /// with the private key redacted.
    ///
    /// Performs no network I/O.
    pub fn from_cli(cli: Cli) -> Result<Self, ScriptError> {
        let priv_key = cli
            .priv_key
            .ok_or_else(|| {
                ScriptError::InvalidConfig(format!("{PRIVATE_KEY_ENV_VAR} must be provided"))
            })?
            .trim()
            .to_string();
        validate_priv_key(&priv_key)?;

        let config = Self {
            rpc_url: cli.rpc_url,
            priv_key,
            gas_price: cli.gas_price,
            gas_limit: cli.gas_limit,
            deployments_path: cli.deployments_path,
        };

        println!("Configuration loaded:");
        println!("- RPC endpoint: {}", config.rpc_url);
        println!("- Private key: {}", config.redacted_key());
        println!("- Gas price: {}", config.gas_price);
        println!("- Gas limit: {}", config.gas_limit);
        println!();

        Ok(config)
    }

    /// The private key with its middle elided for display
    pub fn redacted_key(&self) -> String {
        format!(
            "{}...{}",
            &self.priv_key[..6],
            &self.priv_key[self.priv_key.len() - 4..]
        )
    }
}

/// Validate the shape of a `0x`-prefixed 32-byte private key
pub fn validate_priv_key(priv_key: &str) -> Result<(), ScriptError> {
    if priv_key.len() != PRIVATE_KEY_LEN || !priv_key.starts_with("0x") {
        return Err(ScriptError::InvalidConfig(format!(
            "{PRIVATE_KEY_ENV_VAR} must be {PRIVATE_KEY_LEN} characters long (including 0x prefix)"
        )));
    }
    if !priv_key[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ScriptError::InvalidConfig(format!(
            "{PRIVATE_KEY_ENV_VAR} must be hex-encoded"
        )));
    }

    Ok(())
}

/// The usage string printed when configuration is rejected
pub fn usage() -> String {
    format!(
        "Usage:\n  {RPC_ENV_VAR}=<rpc_url> {PRIVATE_KEY_ENV_VAR}=<private_key> \
         {GAS_PRICE_ENV_VAR}=<gas_price> {GAS_LIMIT_ENV_VAR}=<gas_limit> nomiswap-scripts"
    )
}
