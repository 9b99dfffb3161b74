use anyhow::Result;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),
    #[error("too many decimal places (max {max})")]
    TooManyDecimals { max: u32 },
    #[error("invalid amount format")]
    BadFormat,
}

pub fn format_amount(amount: i128, decimals: u32) -> String {
    let divisor = 10_i128.pow(decimals);
    let whole = amount / divisor;
    let fractional = amount % divisor;

    if fractional == 0 {
        whole.to_string()
    } else {
        // Format with full precision, then remove trailing zeros
        let formatted = format!("{}.{:0width$}", whole, fractional, width = decimals as usize);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

pub fn parse_amount(amount_str: &str, decimals: u32) -> Result<i128, AmountError> {
    if amount_str.starts_with('-') {
        return Err(AmountError::BadFormat);
    }

    let parts: Vec<&str> = amount_str.split('.').collect();
    match parts.len() {
        1 => {
            let whole: i128 = parts[0].parse()?;
            Ok(whole * 10_i128.pow(decimals))
        }
        2 => {
            let whole: i128 = parts[0].parse()?;
            let fractional_str = parts[1];

            if fractional_str.len() > decimals as usize {
                return Err(AmountError::TooManyDecimals { max: decimals });
            }

            let fractional: i128 = fractional_str.parse()?;
            let fractional_scaled =
                fractional * 10_i128.pow(decimals - fractional_str.len() as u32);

            Ok(whole * 10_i128.pow(decimals) + fractional_scaled)
        }
        _ => Err(AmountError::BadFormat),
    }
}

pub fn format_duration(seconds: u64) -> String {
    let days = seconds / (24 * 60 * 60);
    let hours = (seconds % (24 * 60 * 60)) / (60 * 60);
    let minutes = (seconds % (60 * 60)) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, secs)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

pub fn parse_duration(duration_str: &str) -> Result<u64> {
    let duration_str = duration_str.to_lowercase();

    if let Some(num_str) = duration_str.strip_suffix('s') {
        Ok(num_str.parse()?)
    } else if let Some(num_str) = duration_str.strip_suffix('m') {
        let minutes: u64 = num_str.parse()?;
        Ok(minutes * 60)
    } else if let Some(num_str) = duration_str.strip_suffix('h') {
        let hours: u64 = num_str.parse()?;
        Ok(hours * 60 * 60)
    } else if let Some(num_str) = duration_str.strip_suffix('d') {
        let days: u64 = num_str.parse()?;
        Ok(days * 24 * 60 * 60)
    } else {
        // Bare number is taken as seconds
        Ok(duration_str.parse()?)
    }
}

pub fn validate_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(anyhow::anyhow!("Address cannot be empty"));
    }

    if address.len() != 56 {
        return Err(anyhow::anyhow!("Address must be 56 characters long"));
    }

    if !address.starts_with('G') {
        return Err(anyhow::anyhow!("Account addresses start with 'G'"));
    }

    if !address
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(anyhow::anyhow!(
            "Address must contain only uppercase letters and digits"
        ));
    }

    Ok(())
}

pub fn validate_contract_address(address: &str) -> Result<()> {
    if address.len() != 56 || !address.starts_with('C') {
        return Err(anyhow::anyhow!(
            "Contract addresses are 56 characters and start with 'C'"
        ));
    }

    if !address
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(anyhow::anyhow!(
            "Address must contain only uppercase letters and digits"
        ));
    }

    Ok(())
}

pub fn truncate_address(address: &str, chars: usize) -> String {
    if address.len() <= chars * 2 {
        return address.to_string();
    }

    format!(
        "{}...{}",
        &address[..chars],
        &address[address.len() - chars..]
    )
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No data to display".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let border = |left: &str, mid: &str, right: &str| {
        let mut line = String::from(left);
        for (i, width) in widths.iter().enumerate() {
            line.push_str(&"─".repeat(width + 2));
            line.push_str(if i < widths.len() - 1 { mid } else { right });
        }
        line.push('\n');
        line
    };

    let format_row = |cells: &[String]| {
        let mut line = String::from("│");
        for (cell, width) in cells.iter().zip(widths.iter()) {
            line.push_str(&format!(" {:<width$} │", cell, width = width));
        }
        line.push('\n');
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut result = String::new();
    result.push_str(&border("┌", "┬", "┐"));
    result.push_str(&format_row(&header_cells));
    result.push_str(&border("├", "┼", "┤"));
    for row in rows {
        result.push_str(&format_row(row));
    }
    result.push_str(&border("└", "┴", "┘"));
    result.trim_end().to_string()
}
