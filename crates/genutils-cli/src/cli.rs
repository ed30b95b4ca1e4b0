use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Genutils - Genesis state transformations for bitsong chains
#[derive(Parser)]
#[command(name = "genutils")]
#[command(about = "Genesis snapshot and upgrade utilities")]
#[command(version)]
pub struct Cli {
    /// Path to a configuration file; compiled defaults are used without one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export the staked balance of every large delegator as CSV
    ExportStakedBalances {
        /// Genesis file to read
        input_genesis_file: PathBuf,
        /// CSV file to write
        staked_snapshot_csv: PathBuf,
    },

    /// Replace the validator set of a genesis with a new validator
    ExportUpgradedGenesis {
        /// Genesis file to read
        input_genesis_file: PathBuf,
        /// Account address that owns the new validator
        new_val_owner: String,
        /// Operator address of the new validator
        new_val_operator: String,
        /// Consensus public key JSON, e.g.
        /// {"@type":"/cosmos.crypto.ed25519.PubKey","key":"..."}
        new_val_pubkey_json: String,
        /// Genesis file to write
        output_genesis_file: PathBuf,

        /// Consensus public key JSON of a second, unbonded validator
        #[arg(long, conflicts_with = "generate_unbonded_validator")]
        unbonded_validator_pubkey: Option<String>,

        /// Add a second, unbonded validator with a random key (demo only,
        /// output is not reproducible)
        #[arg(long)]
        generate_unbonded_validator: bool,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "genutils.json")]
        output: PathBuf,
    },
}
