use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod utils;

/// Stellar asset convention
pub const DECIMALS: u32 = 7;

#[derive(Parser)]
#[command(name = "paystream-cli")]
#[command(about = "CLI tool for PayStream ledger management")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "~/.paystream/config.toml")]
    pub config: PathBuf,

    /// Ledger contract ID (overrides the config default)
    #[arg(long, global = true)]
    pub contract_id: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy and initialize a new ledger
    Deploy {
        /// Network to deploy to
        #[arg(long, default_value = "testnet")]
        network: String,

        /// Owner (employer/admin) address
        #[arg(long)]
        owner: String,

        /// Payment token contract address
        #[arg(long)]
        token: String,

        /// WASM file path
        #[arg(long)]
        wasm: Option<PathBuf>,
    },

    /// Fund the treasury
    Deposit {
        /// Funding account address (must match the signing key)
        #[arg(long)]
        from: String,

        /// Amount in whole tokens, e.g. "150.5"
        #[arg(long)]
        amount: String,
    },

    /// Register a salary stream for an employee
    CreateStream {
        /// Employee address
        #[arg(long)]
        employee: String,

        /// Salary amount per accrual period, e.g. "0.0001"
        #[arg(long)]
        rate: String,

        /// Accrual period the rate refers to (30s/5m/2h/1d), default per second
        #[arg(long, default_value = "1s")]
        per: String,

        /// Withholding percentage, 0-100
        #[arg(long, default_value_t = 0)]
        tax: u32,
    },

    /// Freeze accrual for an employee's stream
    Pause {
        #[arg(long)]
        employee: String,
    },

    /// Resume accrual for an employee's stream
    Resume {
        #[arg(long)]
        employee: String,
    },

    /// Terminate an employee's stream (settles outstanding entitlement)
    Cancel {
        #[arg(long)]
        employee: String,
    },

    /// Pay a one-time bonus from the treasury
    Bonus {
        #[arg(long)]
        employee: String,

        /// Amount in whole tokens
        #[arg(long)]
        amount: String,

        /// Reason recorded on the event log
        #[arg(long, default_value = "Performance Bonus")]
        reason: String,
    },

    /// Sweep the tax vault to the owner
    WithdrawTax,

    /// Reassign the ledger's admin role
    TransferOwnership {
        #[arg(long)]
        new_owner: String,
    },

    /// Show an employee's current accrued entitlement
    Accrued {
        #[arg(long)]
        employee: String,
    },

    /// List every registered employee
    Employees,

    /// Show ledger information and aggregate balances
    Info,

    /// Show CLI status
    Status,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub auth: AuthConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub network_passphrase: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContractConfig {
    pub default_contract_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    pub secret_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub token: Option<String>,
    pub tax_percent: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                rpc_url: "https://soroban-testnet.stellar.org:443".to_string(),
                network_passphrase: "Test SDF Network ; September 2015".to_string(),
            },
            contract: ContractConfig {
                default_contract_id: None,
            },
            auth: AuthConfig { secret_key: None },
            defaults: DefaultsConfig {
                token: None,
                tax_percent: 0,
            },
        }
    }
}
