use clap::Parser;
use std::process;

mod commands;
mod config;

use commands::*;
use config::*;
use paystream_cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    // Load configuration
    let config = match load_config(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let contract_id = cli.contract_id;

    // Execute command
    let result = match cli.command {
        Commands::Deploy {
            network,
            owner,
            token,
            wasm,
        } => deploy_command(network, owner, token, wasm, &config).await,
        Commands::Deposit { from, amount } => {
            deposit_command(contract_id, from, amount, &config).await
        }
        Commands::CreateStream {
            employee,
            rate,
            per,
            tax,
        } => create_stream_command(contract_id, employee, rate, per, tax, &config).await,
        Commands::Pause { employee } => {
            stream_lifecycle_command(contract_id, "pause_stream", employee, &config).await
        }
        Commands::Resume { employee } => {
            stream_lifecycle_command(contract_id, "resume_stream", employee, &config).await
        }
        Commands::Cancel { employee } => {
            stream_lifecycle_command(contract_id, "cancel_stream", employee, &config).await
        }
        Commands::Bonus {
            employee,
            amount,
            reason,
        } => bonus_command(contract_id, employee, amount, reason, &config).await,
        Commands::WithdrawTax => withdraw_tax_command(contract_id, &config).await,
        Commands::TransferOwnership { new_owner } => {
            transfer_ownership_command(contract_id, new_owner, &config).await
        }
        Commands::Accrued { employee } => accrued_command(contract_id, employee, &config).await,
        Commands::Employees => employees_command(contract_id, &config).await,
        Commands::Info => info_command(contract_id, &config).await,
        Commands::Status => status_command(&config).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
