//! Typed results of the Eobot API calls

use crate::types::{Asset, Currency};
use serde::Serialize;
use std::collections::BTreeMap;

/// Label the API uses for the account total
pub const TOTAL_LABEL: &str = "Total";

/// Per-asset balances of one account plus the total the API reports.
///
/// The total is kept as reported, never recomputed from the entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    total: f64,
    balances: BTreeMap<Asset, f64>,
}

impl BalanceSheet {
    pub fn new(total: f64, balances: BTreeMap<Asset, f64>) -> Self {
        Self { total, balances }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Balance of an asset; contract and rental codes always mirror their base cloud entry
    pub fn get(&self, asset: Asset) -> Option<f64> {
        self.balances.get(&asset.base()).copied()
    }

    /// Look up an entry by label, `Total` included
    pub fn get_label(&self, label: &str) -> Option<f64> {
        if label == TOTAL_LABEL {
            return Some(self.total);
        }
        Asset::from_code(label).and_then(|asset| self.get(asset))
    }

    pub fn balances(&self) -> &BTreeMap<Asset, f64> {
        &self.balances
    }

    /// Number of entries including `Total`
    pub fn len(&self) -> usize {
        self.balances.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Entries as `(label, value)` pairs, `Total` first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        std::iter::once((TOTAL_LABEL, self.total))
            .chain(self.balances.iter().map(|(asset, value)| (asset.as_str(), *value)))
    }
}

/// Hash rates reported for one account
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedReport {
    #[serde(rename = "MiningSHA-256")]
    pub mining_sha256: f64,
    #[serde(rename = "MiningScrypt")]
    pub mining_scrypt: f64,
    #[serde(rename = "CloudSHA-256")]
    pub cloud_sha256: f64,
    #[serde(rename = "CloudScrypt")]
    pub cloud_scrypt: f64,
}

impl SpeedReport {
    /// Field names in the order the API sends them
    pub const FIELDS: [&'static str; 4] = ["MiningSHA-256", "MiningScrypt", "CloudSHA-256", "CloudScrypt"];

    pub fn from_values(values: [f64; 4]) -> Self {
        Self {
            mining_sha256: values[0],
            mining_scrypt: values[1],
            cloud_sha256: values[2],
            cloud_scrypt: values[3],
        }
    }

    /// Named values in wire order
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            (Self::FIELDS[0], self.mining_sha256),
            (Self::FIELDS[1], self.mining_scrypt),
            (Self::FIELDS[2], self.cloud_sha256),
            (Self::FIELDS[3], self.cloud_scrypt),
        ]
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }
}

/// Outcome of a balance query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Balance {
    /// The whole sheet, when no coin or currency was asked for
    Sheet(BalanceSheet),
    /// Holdings of a single coin or cloud product
    Asset { asset: Asset, amount: f64 },
    /// The account total converted into a fiat currency
    Total { currency: Currency, amount: f64 },
}

impl Balance {
    /// The single amount, if this is not a full sheet
    pub fn amount(&self) -> Option<f64> {
        match self {
            Balance::Sheet(_) => None,
            Balance::Asset { amount, .. } | Balance::Total { amount, .. } => Some(*amount),
        }
    }

    pub fn sheet(&self) -> Option<&BalanceSheet> {
        match self {
            Balance::Sheet(sheet) => Some(sheet),
            _ => None,
        }
    }
}
