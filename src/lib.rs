//! Eobot API client
//!
//! An async client for the Eobot cloud-mining and coin exchange API:
//! - coin values and exchange rates
//! - balance sheets, mining mode, hash rates and deposit addresses
//! - credential lookups, mining mode changes, withdrawals and cloud conversions
//!
//! Arguments are checked against the closed sets of coin, cloud and currency codes
//! before any request is sent, and plain-text replies are parsed into typed results.
//!
//! ```no_run
//! use eobot_client::{ClientConfig, EobotClient};
//!
//! # async fn run() -> eobot_client::Result<()> {
//! let mut client = EobotClient::new(ClientConfig::for_user("1234"))?;
//! let value = client.get_coin_value("BTC", "EUR").await?;
//! let sheet = client.get_balance_sheet(None).await?;
//! println!("1 BTC = {} EUR, total balance {}", value, sheet.total());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod transport;
pub mod types;

pub use client::EobotClient;
pub use config::{ClientConfig, HttpConfig, LogFormat, LoggingConfig};
pub use error::{Error, Result};
pub use models::{Balance, BalanceSheet, SpeedReport};
pub use transport::{HttpTransport, Method, Request, Response, Transport};
pub use types::*;

/// Application information
pub const APP_NAME: &str = "eobot-client";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
