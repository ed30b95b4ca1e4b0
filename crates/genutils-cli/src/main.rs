use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use genutils_core::PubKey;
use genutils_ops::{export_staked_balances, export_upgraded_genesis, UpgradeParams};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod config;

use cli::{Cli, Commands};
use config::{generate_sample_config, GenutilsConfig};

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ExportStakedBalances {
            input_genesis_file,
            staked_snapshot_csv,
        } => {
            let config = load_config(cli.config.as_deref())?;
            staked_balances(&config, &input_genesis_file, &staked_snapshot_csv)?;
        }
        Commands::ExportUpgradedGenesis {
            input_genesis_file,
            new_val_owner,
            new_val_operator,
            new_val_pubkey_json,
            output_genesis_file,
            unbonded_validator_pubkey,
            generate_unbonded_validator,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let unbonded_pubkey = match (unbonded_validator_pubkey, generate_unbonded_validator) {
                (Some(json), _) => Some(parse_pubkey(&json)?),
                (None, true) => {
                    warn!("Generating a random key for the unbonded validator; output is not reproducible");
                    Some(PubKey::generate_ed25519())
                }
                (None, false) => None,
            };
            let params = UpgradeParams {
                owner: new_val_owner,
                operator: new_val_operator,
                consensus_pubkey: parse_pubkey(&new_val_pubkey_json)?,
                unbonded_pubkey,
            };
            upgraded_genesis(&config, &input_genesis_file, &output_genesis_file, &params)?;
        }
        Commands::InitConfig { output } => {
            init_config(output)?;
        }
    }

    Ok(())
}

/// Load the configuration file if one was given, else the defaults
fn load_config(path: Option<&Path>) -> Result<GenutilsConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            GenutilsConfig::load(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))
        }
        None => Ok(GenutilsConfig::default()),
    }
}

fn parse_pubkey(json: &str) -> Result<PubKey> {
    PubKey::from_json(json).with_context(|| format!("invalid public key {}", json))
}

/// Write the staked-balance snapshot of a genesis file
fn staked_balances(config: &GenutilsConfig, input: &Path, output: &Path) -> Result<()> {
    let summary = export_staked_balances(input, output, &config.chain, &config.snapshot)
        .with_context(|| format!("failed to export staked balances from {}", input.display()))?;

    println!("# accounts: {}", summary.accounts);
    if summary.skipped_delegations > 0 {
        println!("# skipped delegations: {}", summary.skipped_delegations);
    }
    println!("Snapshot written to {}", output.display());

    Ok(())
}

/// Write an upgraded copy of a genesis file
fn upgraded_genesis(
    config: &GenutilsConfig,
    input: &Path,
    output: &Path,
    params: &UpgradeParams,
) -> Result<()> {
    let report = export_upgraded_genesis(input, output, params, &config.chain, &config.upgrade)
        .with_context(|| format!("failed to upgrade genesis {}", input.display()))?;

    println!("Validator:  {} ({} tokens)", report.operator, report.bonded_tokens);
    println!("Owner:      {}", report.owner);
    if report.default_bonded_tokens_used {
        println!("Bonded pool was empty, validator uses the default token amount");
    }
    if let Some(operator) = &report.unbonded_operator {
        println!("Unbonded:   {} ({} tokens)", operator, report.not_bonded_tokens);
    }
    println!(
        "Discarded {} validators and {} delegations",
        report.discarded_validators, report.discarded_delegations
    );
    println!("Genesis written to {}", output.display());

    Ok(())
}

/// Initialize a new configuration file
fn init_config(output: PathBuf) -> Result<()> {
    info!("Generating sample configuration");

    let config = generate_sample_config();
    config.save(&output)?;

    info!("Configuration saved to {:?}", output);

    println!("\nConfiguration file created: {}", output.display());
    println!("Edit the file to customize prefixes, thresholds and upgrade constants.");
    println!("\nTo use it, run:");
    println!("  genutils --config {} <command>", output.display());

    Ok(())
}
