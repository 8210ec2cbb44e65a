use std::process::exit;

use clap::Parser;
use ethers::{providers::Middleware, utils::to_checksum};
use nomiswap_scripts::{
    cli::{usage, Cli, Config},
    commands::{deploy_system, print_env_exports, provision_liquidity, record_deployments},
    errors::ScriptError,
    utils::{setup_client, EthersDeployer, TxOptions},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let cli = Cli::parse();

    // Reject bad configuration before any network activity
    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("{}", usage());
            exit(1);
        }
    };

    tracing_subscriber::fmt().pretty().init();

    let client = setup_client(&config).await?;
    let signer = client.default_sender().ok_or_else(|| {
        ScriptError::ClientInitialization("client does not have sender attached".to_string())
    })?;
    info!("Deployer address: {}", to_checksum(&signer, None));

    let opts = TxOptions::from_config(&config)?;
    let deployer = EthersDeployer::new(client.clone(), opts);

    let contracts = deploy_system(&deployer, signer).await?;
    record_deployments(&config.deployments_path, &contracts)?;
    print_env_exports(&contracts);

    provision_liquidity(client, &contracts, signer, &opts).await
}
