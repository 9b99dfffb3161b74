use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use paystream_cli::{utils, Config, DECIMALS};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::get_secret_key;

fn resolve_contract_id(cli_override: &Option<String>, config: &Config) -> Result<String> {
    let contract_id = cli_override
        .clone()
        .or_else(|| config.contract.default_contract_id.clone())
        .ok_or_else(|| anyhow::anyhow!("No contract ID provided"))?;
    utils::validate_contract_address(&contract_id)?;
    Ok(contract_id)
}

/// Submits a contract invocation through the soroban CLI and returns its
/// stdout. Shows a spinner while the transaction is in flight.
fn invoke(config: &Config, contract_id: &str, func: &str, args: &[(&str, String)]) -> Result<String> {
    let secret = get_secret_key(config)?;

    let mut cmd = std::process::Command::new("soroban");
    cmd.args([
        "contract",
        "invoke",
        "--id",
        contract_id,
        "--rpc-url",
        &config.network.rpc_url,
        "--network-passphrase",
        &config.network.network_passphrase,
        "--source",
        &secret,
        "--",
        func,
    ]);
    for (name, value) in args {
        cmd.arg(format!("--{}", name));
        cmd.arg(value);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Submitting {}...", func));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = cmd.output();
    spinner.finish_and_clear();
    let output = output?;

    if !output.status.success() {
        error!("Invocation of {} failed:", func);
        error!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        return Err(anyhow::anyhow!("Invocation of {} failed", func));
    }

    info!(
        "{} submitted at {}",
        func,
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Parses an i128 result printed by the soroban CLI (plain or quoted).
fn parse_i128_result(raw: &str) -> Result<i128> {
    let trimmed = raw.trim().trim_matches('"');
    trimmed
        .parse::<i128>()
        .map_err(|_| anyhow::anyhow!("Unexpected contract response: {}", raw))
}

pub async fn deploy_command(
    network: String,
    owner: String,
    token: String,
    wasm: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    info!("Deploying ledger to network: {}", network);

    utils::validate_address(&owner)?;
    utils::validate_contract_address(&token)?;

    let wasm_path = wasm.unwrap_or_else(|| {
        PathBuf::from("../../target/wasm32v1-none/release/pay_stream.wasm")
    });

    if !wasm_path.exists() {
        error!("WASM file not found: {:?}", wasm_path);
        return Err(anyhow::anyhow!(
            "WASM file not found. Please build the contract first."
        ));
    }

    // Check if soroban CLI is available
    let soroban_check = std::process::Command::new("soroban").arg("--version").output();
    if soroban_check.is_err() {
        error!("Soroban CLI not found. Please install it first:");
        error!("cargo install --locked soroban-cli");
        return Err(anyhow::anyhow!("Soroban CLI not found"));
    }

    println!("Deploying ledger with the following parameters:");
    println!("  Network: {}", network);
    println!("  Owner: {}", owner);
    println!("  Token: {}", token);
    println!("  WASM file: {:?}", wasm_path);
    println!("  RPC URL: {}", config.network.rpc_url);
    println!();

    let output = std::process::Command::new("soroban")
        .args([
            "contract",
            "deploy",
            "--wasm",
            wasm_path.to_str().unwrap(),
            "--rpc-url",
            &config.network.rpc_url,
            "--network",
            &network,
        ])
        .output()?;

    if !output.status.success() {
        error!("Ledger deployment failed:");
        error!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        error!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        return Err(anyhow::anyhow!("Ledger deployment failed"));
    }

    let contract_id = String::from_utf8(output.stdout)?.trim().to_string();
    info!("Ledger deployed successfully: {}", contract_id);

    println!("✅ Ledger deployed successfully!");
    println!("Contract ID: {}", contract_id);

    invoke(
        config,
        &contract_id,
        "initialize",
        &[("owner", owner.clone()), ("token", token)],
    )?;

    info!("Ledger initialized successfully");
    println!("✅ Ledger initialized with owner: {}", owner);

    Ok(())
}

pub async fn deposit_command(
    contract_id: Option<String>,
    from: String,
    amount: String,
    config: &Config,
) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;
    utils::validate_address(&from)?;
    let units = utils::parse_amount(&amount, DECIMALS)?;

    println!(
        "Depositing {} ({} base units) into {}...",
        amount,
        units,
        utils::truncate_address(&contract_id, 4)
    );

    invoke(
        config,
        &contract_id,
        "deposit",
        &[("from", from), ("amount", units.to_string())],
    )?;

    println!("✅ Treasury funded with {}", amount);
    Ok(())
}

pub async fn create_stream_command(
    contract_id: Option<String>,
    employee: String,
    rate: String,
    per: String,
    tax: u32,
    config: &Config,
) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;
    utils::validate_address(&employee)?;

    if tax > 100 {
        return Err(anyhow::anyhow!("Tax percent must be 0-100"));
    }

    let amount = utils::parse_amount(&rate, DECIMALS)?;
    let period = utils::parse_duration(&per)?;
    if period == 0 {
        return Err(anyhow::anyhow!("Accrual period must be positive"));
    }
    let rate_per_second = amount / i128::from(period);
    if rate_per_second <= 0 {
        return Err(anyhow::anyhow!(
            "Rate of {} per {} is below one base unit per second",
            rate,
            utils::format_duration(period)
        ));
    }

    println!(
        "Creating stream for {}: {} per {} ({} base units/sec), {}% withholding...",
        utils::truncate_address(&employee, 4),
        rate,
        utils::format_duration(period),
        rate_per_second,
        tax
    );

    invoke(
        config,
        &contract_id,
        "create_stream",
        &[
            ("employee", employee),
            ("rate_per_second", rate_per_second.to_string()),
            ("tax_percent", tax.to_string()),
        ],
    )?;

    println!("✅ Stream created");
    Ok(())
}

/// pause / resume / cancel share the same shape: one employee argument.
pub async fn stream_lifecycle_command(
    contract_id: Option<String>,
    func: &str,
    employee: String,
    config: &Config,
) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;
    utils::validate_address(&employee)?;

    println!(
        "Calling {} for {}...",
        func,
        utils::truncate_address(&employee, 4)
    );
    invoke(config, &contract_id, func, &[("employee", employee)])?;

    println!("✅ {} complete", func);
    Ok(())
}

pub async fn bonus_command(
    contract_id: Option<String>,
    employee: String,
    amount: String,
    reason: String,
    config: &Config,
) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;
    utils::validate_address(&employee)?;
    let units = utils::parse_amount(&amount, DECIMALS)?;

    println!(
        "Sending {} bonus to {} ({})...",
        amount,
        utils::truncate_address(&employee, 4),
        reason
    );

    invoke(
        config,
        &contract_id,
        "send_bonus",
        &[
            ("employee", employee),
            ("amount", units.to_string()),
            ("reason", reason),
        ],
    )?;

    println!("✅ Bonus of {} sent!", amount);
    Ok(())
}

pub async fn withdraw_tax_command(contract_id: Option<String>, config: &Config) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;

    let swept = invoke(config, &contract_id, "withdraw_tax", &[])?;
    match parse_i128_result(&swept) {
        Ok(units) => println!("✅ Swept {} from the tax vault", utils::format_amount(units, DECIMALS)),
        Err(_) => println!("✅ Tax vault swept"),
    }
    Ok(())
}

pub async fn transfer_ownership_command(
    contract_id: Option<String>,
    new_owner: String,
    config: &Config,
) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;
    utils::validate_address(&new_owner)?;

    invoke(
        config,
        &contract_id,
        "transfer_ownership",
        &[("new_owner", new_owner.clone())],
    )?;

    println!("✅ Ownership transferred to {}", new_owner);
    Ok(())
}

pub async fn accrued_command(
    contract_id: Option<String>,
    employee: String,
    config: &Config,
) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;
    utils::validate_address(&employee)?;

    let raw = invoke(config, &contract_id, "get_accrued", &[("employee", employee.clone())])?;
    let units = parse_i128_result(&raw)?;

    println!(
        "Accrued for {}: {}",
        utils::truncate_address(&employee, 4),
        utils::format_amount(units, DECIMALS)
    );
    Ok(())
}

pub async fn employees_command(contract_id: Option<String>, config: &Config) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;

    let raw = invoke(config, &contract_id, "get_all_employees", &[])?;
    let parsed: Vec<String> = match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(_) => {
            // Unexpected output shape; show it as-is rather than dropping it
            println!("{}", raw);
            return Ok(());
        }
    };

    if parsed.is_empty() {
        println!("No employees registered");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = parsed
        .iter()
        .enumerate()
        .map(|(i, address)| vec![(i + 1).to_string(), address.clone()])
        .collect();
    println!("{}", utils::format_table(&["#", "Employee"], &rows));
    Ok(())
}

pub async fn info_command(contract_id: Option<String>, config: &Config) -> Result<()> {
    let contract_id = resolve_contract_id(&contract_id, config)?;

    info!("Getting ledger information for: {}", contract_id);

    println!("Ledger Information:");
    println!("  Contract ID: {}", contract_id);
    println!("  Network RPC: {}", config.network.rpc_url);
    println!("  Network Passphrase: {}", config.network.network_passphrase);

    let reads = [
        ("treasury_balance", "Treasury"),
        ("tax_vault_balance", "Tax vault"),
        ("total_bonuses_paid", "Bonuses paid"),
    ];

    println!();
    println!("Balances:");
    for (func, label) in reads {
        match invoke(config, &contract_id, func, &[]).and_then(|raw| parse_i128_result(&raw)) {
            Ok(units) => println!("  {}: {}", label, utils::format_amount(units, DECIMALS)),
            Err(e) => warn!("Could not read {}: {}", func, e),
        }
    }

    Ok(())
}

pub async fn status_command(config: &Config) -> Result<()> {
    println!("PayStream CLI Status");
    println!("====================");
    println!();

    println!("Configuration:");
    println!("  Network RPC: {}", config.network.rpc_url);
    println!("  Network Passphrase: {}", config.network.network_passphrase);
    println!(
        "  Default Contract ID: {}",
        config
            .contract
            .default_contract_id
            .as_deref()
            .unwrap_or("Not set")
    );
    println!();

    // Check if soroban CLI is available
    print!("Soroban CLI: ");
    match std::process::Command::new("soroban").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("✅ Available ({})", version.trim());
        }
        Ok(_) => {
            println!("❌ Not working properly");
        }
        Err(_) => {
            println!("❌ Not found");
            println!("   Install with: cargo install --locked soroban-cli");
        }
    }

    // Probe the RPC endpoint
    print!("RPC endpoint: ");
    let client = reqwest::Client::new();
    let payload = serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getHealth",
    });
    match client
        .post(&config.network.rpc_url)
        .json(&payload)
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        Ok(response) => match response.json::<serde_json::Value>().await {
            Ok(body) => {
                let status = body["result"]["status"].as_str().unwrap_or("unknown");
                println!("✅ Reachable (status: {})", status);
            }
            Err(_) => println!("❌ Unexpected response"),
        },
        Err(e) => {
            println!("❌ Unreachable");
            warn!("RPC health check failed: {}", e);
        }
    }

    // Check if contract WASM exists
    let wasm_path = PathBuf::from("../../target/wasm32v1-none/release/pay_stream.wasm");
    print!("Ledger WASM: ");
    if wasm_path.exists() {
        println!("✅ Built");
    } else {
        println!("❌ Not found");
        println!("   Build with: cd contracts/pay_stream && soroban contract build");
    }

    println!();
    println!("Ready to use PayStream CLI!");

    Ok(())
}
