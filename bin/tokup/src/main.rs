//! tokup is a CLI tool to deploy a UUPS-upgradeable token and query its
//! balances on BSC/Polygon-style networks.

mod cli;

use std::path::PathBuf;
use std::str::FromStr;

use alloy_core::primitives::Address;
use anyhow::{Context, Result};
use clap::Parser;
use comfy_table::Table;

use cli::{BalanceArgs, Cli, Command, DeployArgs};
use tokup_deploy::{
    CONFIG_FILENAME, DeployConfig, DeployConfigBuilder, DeployError, Deployer, DeploymentReport,
    RpcClient, TxSigner, UupsDeployer, balance,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    let result = match cli.command {
        Command::Deploy(args) => run_deploy(args).await,
        Command::Balance(args) => run_balance(args).await,
    };

    // Single top-level handler: report and exit non-zero, no retries.
    if let Err(err) = result {
        tracing::error!("✗ {err:#}");
        std::process::exit(1);
    }
}

async fn run_deploy(args: DeployArgs) -> Result<()> {
    // If a config file is provided, load it; otherwise resolve one from the
    // CLI arguments, failing fast on anything missing.
    let config = if let Some(config_path) = &args.config {
        DeployConfig::load_from_file(config_path)?
    } else {
        let mut builder = DeployConfigBuilder::new(args.network.clone())
            .artifacts_dir(args.artifacts.clone());
        if let Some(url) = &args.rpc_url {
            builder = builder.rpc_url(url.as_str());
        }
        if let Some(contract) = &args.contract {
            builder = builder.contract(contract.as_str());
        }
        if let Some(reward) = args.mining_reward {
            builder = builder.mining_reward(reward);
        }
        if let Some(apy) = args.staking_apy {
            builder = builder.staking_apy(apy);
        }
        if let Some(percent) = args.tax_percent {
            builder = builder.tax_percent(percent);
        }
        if let Some(difficulty) = &args.mining_difficulty {
            builder = builder.mining_difficulty(difficulty.as_str());
        }
        if let Some(symbol) = &args.currency {
            builder = builder.currency_symbol(symbol.as_str());
        }
        builder.build()?
    };

    let private_key = args.private_key.as_deref().ok_or_else(|| {
        DeployError::config("private key not set (--private-key or TOKUP_PRIVATE_KEY)")
    })?;
    let signer = TxSigner::from_hex(private_key)?;

    let rpc = RpcClient::new(&config.rpc_url)?;

    // Custom networks don't know their chain ID up front; ask the node.
    let chain_id = match config.network.chain_id() {
        Some(id) => id,
        None => rpc.chain_id().await?,
    };

    // Save the resolved configuration before deploying so a failed run can
    // be replayed with --config.
    if args.config.is_none() && !args.no_save_config {
        config.save_to_file(&PathBuf::from(CONFIG_FILENAME))?;
    }

    let proxy = UupsDeployer::new(
        rpc.clone(),
        signer.clone(),
        chain_id,
        config.artifacts_dir.clone(),
    );
    let deployer = Deployer::new(config.clone(), signer.address(), rpc, proxy);

    let report = deployer.run().await?;
    print_report(&config, &report);

    Ok(())
}

fn print_report(config: &DeployConfig, report: &DeploymentReport) {
    let mut table = Table::new();
    table.set_header(vec!["Deployment", "Value"]);
    table.add_row(vec!["Network".to_string(), config.network.to_string()]);
    table.add_row(vec!["Contract".to_string(), config.contract.clone()]);
    table.add_row(vec!["Proxy address".to_string(), report.address.to_string()]);
    table.add_row(vec![
        "Transaction hash".to_string(),
        report.tx_hash.to_string(),
    ]);
    table.add_row(vec!["Gas used".to_string(), report.gas_used.to_string()]);
    table.add_row(vec![
        format!("Cost ({})", config.currency_symbol),
        report.cost_formatted(),
    ]);
    println!("{table}");
}

async fn run_balance(args: BalanceArgs) -> Result<()> {
    let url = args
        .rpc_url
        .clone()
        .unwrap_or_else(|| args.network.default_rpc_url().to_string());
    let rpc = RpcClient::new(&url)?;

    let token = Address::from_str(&args.token)
        .with_context(|| format!("invalid token address '{}'", args.token))?;
    let holder = Address::from_str(&args.holder)
        .with_context(|| format!("invalid holder address '{}'", args.holder))?;

    let balance = balance::query_balance(&rpc, token, holder).await?;
    tracing::info!("Balance of {holder}: {}", balance.formatted);

    Ok(())
}
