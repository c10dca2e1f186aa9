//! Canned Eobot API used by the integration tests
//!
//! Account 1234 is fully populated, 2345 answers garbage to every query, and
//! 3456 / 4567 are mining on a SHA-256 / Scrypt contract and get the numeric
//! contract answers, while 5678 / 6789 report the contract codes.

#![allow(dead_code)]

use async_trait::async_trait;
use eobot_client::{ClientConfig, EobotClient, Request, Response, Result, Transport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const USER_ID: u64 = 1234;
pub const CORRECT_PASSWORD: &str = "correctPassword";
pub const EMAIL: &str = "test@example.com";
pub const ADDRESS: &str = "1234567890abcdefghijklmnopqrstuvwx";
pub const NXT_ADDRESS: &str = "NXT-1234-5678-90AB-CDEF";

pub const BALANCE_SHEET: &str = "Total:0.32751004;BTC:0.00040978;BTSX:0.01413920;BC:0.08188563;\
CURE:0.05292104;DOGE:23.78557417;LTC:0.03013698;NMC:0.00188207;NAUT:0.03115914;NXT:0.10494402;\
PPC:0.00502554;VTC:0.02830923;PPD:2.16726154;SCRYPT:0.01115809;GHS:20.00019989;";

pub const SPEED: &str = "MiningSHA-256:0.00000000;MiningScrypt:0.00000000;\
CloudSHA-256:20.0001998933406;CloudScrypt:0.0111580929310733;";

const INVALID: &str = "Invalid request";

/// USD value of coins and cloud products, and units per USD of currencies
pub const VALUES: [(&str, f64); 28] = [
    ("BTC", 458.36),
    ("BTSX", 0.04157706),
    ("BC", 0.040105),
    ("CURE", 0.033222),
    ("DOGE", 0.000106),
    ("LTC", 3.62),
    ("NMC", 0.874518),
    ("NAUT", 0.084194),
    ("NXT", 0.029618),
    ("PPC", 0.60667),
    ("VTC", 0.091551),
    ("PPD", 0.05),
    ("SCRYPT", 0.07),
    ("GHS", 1.79),
    ("GBP", 0.597745),
    ("CAD", 1.0886),
    ("CNY", 6.14322),
    ("CZK", 20.889),
    ("DKK", 5.74794),
    ("EUR", 0.748382),
    ("INR", 60.88),
    ("IDR", 11689.78),
    ("JPY", 102.563),
    ("MXN", 13.0479),
    ("NOK", 6.15738),
    ("PLN", 3.13386),
    ("RON", 3.41312),
    ("RUB", 36.0362),
];

pub fn value_of(code: &str) -> Option<f64> {
    VALUES
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, value)| *value)
}

/// Transport answering from the canned data, counting every call
#[derive(Default)]
pub struct FixtureTransport {
    calls: AtomicUsize,
    requests: Mutex<Vec<Request>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<Request> {
        self.requests.lock().unwrap().last().cloned()
    }

    fn respond(request: &Request) -> String {
        let param = |key: &str| request.get_param(key);

        if let Some(code) = param("coin") {
            return value_of(code).map_or_else(|| INVALID.to_string(), |value| value.to_string());
        }

        if let Some(id) = param("total") {
            return match id {
                "1234" => BALANCE_SHEET.to_string(),
                _ => INVALID.to_string(),
            };
        }

        if let Some(id) = param("idmining") {
            return match id {
                "1234" => "mining:BTC;".to_string(),
                "3456" => "3456".to_string(),
                "4567" => "mining:4567;".to_string(),
                "5678" => "mining:GHS2;".to_string(),
                "6789" => "mining:SCRYPT2;".to_string(),
                _ => INVALID.to_string(),
            };
        }

        if let Some(id) = param("idspeed") {
            return match id {
                "1234" => SPEED.to_string(),
                _ => INVALID.to_string(),
            };
        }

        if let Some(coin) = param("deposit") {
            return match (param("id"), coin) {
                (Some("1234"), "BTSX") => String::new(),
                (Some("1234"), "NXT") => format!("NXT:{};", NXT_ADDRESS),
                (Some("1234"), _) => ADDRESS.to_string(),
                _ => INVALID.to_string(),
            };
        }

        let authenticated = param("password") == Some(CORRECT_PASSWORD);

        if let Some(mode) = param("mining") {
            return if authenticated {
                format!("mining:{};", mode)
            } else {
                "Invalid email address or password".to_string()
            };
        }

        if param("email").is_some() && param("id").is_none() {
            return if authenticated {
                USER_ID.to_string()
            } else {
                "Invalid email address or password".to_string()
            };
        }

        // Withdrawals and conversions answer the same whatever happened
        String::new()
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn execute(&self, request: &Request) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok(Response::ok(Self::respond(request)))
    }
}

/// Client on the canned API, optionally acting for a stored account
pub fn client(user_id: Option<&str>) -> EobotClient<FixtureTransport> {
    let config = ClientConfig {
        user_id: user_id.map(str::to_string),
        ..ClientConfig::default()
    };
    EobotClient::with_transport(config, FixtureTransport::new()).unwrap()
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {}, got {}",
        expected,
        actual
    );
}
