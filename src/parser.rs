//! Response body parsing
//!
//! The API answers in plain text: a bare number, or `label:value` pairs separated
//! by `;` (older deployments used newlines and `=`). Parsers here are pure and
//! map anything they cannot read to [`Error::invalid_response`].

use crate::models::{BalanceSheet, SpeedReport, TOTAL_LABEL};
use crate::types::{Asset, CloudService, Coin, UserId};
use crate::{Error, Result};
use std::collections::btree_map::{BTreeMap, Entry};
use tracing::{debug, warn};

const MINING_LABEL: &str = "mining";

/// Numeric answers the mining-mode query gives for accounts on a cloud contract
const MINING_MODE_SENTINELS: [(&str, CloudService); 2] =
    [("3456", CloudService::Sha256), ("4567", CloudService::Scrypt)];

/// Non-empty, trimmed fields of a delimited body
fn fields(body: &str) -> impl Iterator<Item = &str> {
    body.split([';', '\n'])
        .map(str::trim)
        .filter(|field| !field.is_empty())
}

/// Split a `label:value` or `label=value` field
fn split_pair(field: &str) -> Option<(&str, &str)> {
    field
        .split_once([':', '='])
        .map(|(label, value)| (label.trim(), value.trim()))
}

fn parse_finite(text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::invalid_response()),
    }
}

/// Parse a body consisting of a single decimal number
pub fn parse_number(body: &str) -> Result<f64> {
    let trimmed = body.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);
    parse_finite(trimmed)
}

/// Parse a balance sheet body such as `Total:0.3;BTC:0.0004;GHS:20.0;`
pub fn parse_balance_sheet(body: &str) -> Result<BalanceSheet> {
    let mut total = None;
    let mut balances = BTreeMap::new();

    for field in fields(body) {
        let (label, value) = split_pair(field).ok_or_else(Error::invalid_response)?;
        let value = parse_finite(value)?;

        if label == TOTAL_LABEL {
            if total.replace(value).is_some() {
                return Err(Error::invalid_response());
            }
        } else if let Some(asset) = Asset::from_code(label) {
            if asset.base() != asset {
                warn!("Skipping balance sheet entry for alias code: {}", label);
                continue;
            }
            match balances.entry(asset) {
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
                Entry::Occupied(_) => return Err(Error::invalid_response()),
            }
        } else {
            warn!("Skipping unknown balance sheet entry: {}", label);
        }
    }

    let total = total.ok_or_else(Error::invalid_response)?;
    debug!("Parsed balance sheet with {} entries", balances.len() + 1);
    Ok(BalanceSheet::new(total, balances))
}

/// Parse the current mining mode, folding contract codes and numeric contract
/// answers onto their cloud service
pub fn parse_mining_mode(body: &str) -> Result<Asset> {
    let field = fields(body).next().ok_or_else(Error::invalid_response)?;
    let code = match split_pair(field) {
        Some((label, value)) if label.eq_ignore_ascii_case(MINING_LABEL) => value,
        Some(_) => return Err(Error::invalid_response()),
        None => field,
    };

    if let Some((_, service)) = MINING_MODE_SENTINELS.iter().find(|(sentinel, _)| *sentinel == code) {
        return Ok(Asset::Cloud(*service));
    }

    Asset::mineable_from_code(code)
        .map(|asset| asset.base())
        .ok_or_else(Error::invalid_response)
}

/// Parse exactly four positional speed fields; labels, when sent, must match the wire order
pub fn parse_speed(body: &str) -> Result<SpeedReport> {
    let fields: Vec<&str> = fields(body).collect();
    if fields.len() != SpeedReport::FIELDS.len() {
        return Err(Error::invalid_response());
    }

    let mut values = [0.0; 4];
    for ((slot, field), name) in values.iter_mut().zip(fields).zip(SpeedReport::FIELDS) {
        let value = match split_pair(field) {
            Some((label, _)) if label != name => return Err(Error::invalid_response()),
            Some((_, value)) => value,
            None => field,
        };
        *slot = parse_finite(value)?;
    }

    Ok(SpeedReport::from_values(values))
}

/// Parse the answer to a credential lookup; anything but a number means rejection
pub fn parse_user_id(body: &str) -> Result<UserId> {
    let trimmed = body.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);
    trimmed
        .parse::<u64>()
        .map(UserId::new)
        .map_err(|_| Error::logic("Invalid password given"))
}

/// Parse a deposit address, optionally prefixed with the coin code
pub fn parse_deposit_address(body: &str, coin: Coin) -> Result<String> {
    let trimmed = body.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);
    let address = trimmed
        .strip_prefix(coin.as_str())
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(trimmed)
        .trim();

    if address.is_empty() && coin.provides_deposit_address() {
        return Err(Error::invalid_response());
    }
    Ok(address.to_string())
}

/// Whether a mode change was accepted; the API only signals rejected credentials
pub fn parse_mode_change(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    !(lowered.contains("invalid") || lowered.contains("incorrect"))
}
