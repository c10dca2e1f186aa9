//! Core types for the Eobot API
//!
//! Closed enumerations of the codes the API understands, plus validated newtypes
//! for user identifiers and amounts. Every enum serializes as its wire code.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cryptocurrencies that can be mined, held and withdrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Coin {
    #[default]
    #[serde(rename = "BTC")]
    Bitcoin,
    #[serde(rename = "BTSX")]
    BitSharesX,
    #[serde(rename = "BC")]
    BlackCoin,
    #[serde(rename = "CURE")]
    CureCoin,
    #[serde(rename = "DRK")]
    DarkCoin,
    #[serde(rename = "DOGE")]
    Dogecoin,
    #[serde(rename = "LTC")]
    Litecoin,
    #[serde(rename = "NMC")]
    Namecoin,
    #[serde(rename = "NAUT")]
    NautilusCoin,
    #[serde(rename = "NXT")]
    Nxt,
    #[serde(rename = "PPC")]
    Peercoin,
    #[serde(rename = "VTC")]
    Vertcoin,
}

impl Coin {
    pub const ALL: [Coin; 12] = [
        Coin::Bitcoin,
        Coin::BitSharesX,
        Coin::BlackCoin,
        Coin::CureCoin,
        Coin::DarkCoin,
        Coin::Dogecoin,
        Coin::Litecoin,
        Coin::Namecoin,
        Coin::NautilusCoin,
        Coin::Nxt,
        Coin::Peercoin,
        Coin::Vertcoin,
    ];

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Coin::Bitcoin => "BTC",
            Coin::BitSharesX => "BTSX",
            Coin::BlackCoin => "BC",
            Coin::CureCoin => "CURE",
            Coin::DarkCoin => "DRK",
            Coin::Dogecoin => "DOGE",
            Coin::Litecoin => "LTC",
            Coin::Namecoin => "NMC",
            Coin::NautilusCoin => "NAUT",
            Coin::Nxt => "NXT",
            Coin::Peercoin => "PPC",
            Coin::Vertcoin => "VTC",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Whether the API hands out deposit addresses for this coin.
    ///
    /// BitShares-X deposits are arranged through Eobot support instead.
    pub fn provides_deposit_address(&self) -> bool {
        !matches!(self, Coin::BitSharesX)
    }
}

impl FromStr for Coin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid coin type: {}", s)))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cloud mining products, including the contract variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CloudService {
    #[serde(rename = "GHS")]
    Sha256,
    #[serde(rename = "SCRYPT")]
    Scrypt,
    #[serde(rename = "PPD")]
    Folding,
    #[serde(rename = "GHS2")]
    Sha256Contract,
    #[serde(rename = "SCRYPT2")]
    ScryptContract,
}

impl CloudService {
    pub const ALL: [CloudService; 5] = [
        CloudService::Sha256,
        CloudService::Scrypt,
        CloudService::Folding,
        CloudService::Sha256Contract,
        CloudService::ScryptContract,
    ];

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudService::Sha256 => "GHS",
            CloudService::Scrypt => "SCRYPT",
            CloudService::Folding => "PPD",
            CloudService::Sha256Contract => "GHS2",
            CloudService::ScryptContract => "SCRYPT2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Fold a contract variant onto the cloud service it draws from
    pub fn base(&self) -> CloudService {
        match self {
            CloudService::Sha256Contract => CloudService::Sha256,
            CloudService::ScryptContract => CloudService::Scrypt,
            other => *other,
        }
    }

    pub fn is_contract(&self) -> bool {
        self.base() != *self
    }
}

impl fmt::Display for CloudService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short-term hash power rentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rental {
    #[serde(rename = "GHSTEMP")]
    Sha256,
    #[serde(rename = "SCRYPTTEMP")]
    Scrypt,
}

impl Rental {
    pub const ALL: [Rental; 2] = [Rental::Sha256, Rental::Scrypt];

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Rental::Sha256 => "GHSTEMP",
            Rental::Scrypt => "SCRYPTTEMP",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == code)
    }

    /// The cloud service a rental is billed against
    pub fn base(&self) -> CloudService {
        match self {
            Rental::Sha256 => CloudService::Sha256,
            Rental::Scrypt => CloudService::Scrypt,
        }
    }
}

impl fmt::Display for Rental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Anything the API keeps a balance of or can mine into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Asset {
    Coin(Coin),
    Cloud(CloudService),
    Rental(Rental),
}

impl Asset {
    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Asset::Coin(coin) => coin.as_str(),
            Asset::Cloud(cloud) => cloud.as_str(),
            Asset::Rental(rental) => rental.as_str(),
        }
    }

    /// Look up a code among coins, cloud services and rentals
    pub fn from_code(code: &str) -> Option<Self> {
        Coin::from_code(code)
            .map(Asset::Coin)
            .or_else(|| CloudService::from_code(code).map(Asset::Cloud))
            .or_else(|| Rental::from_code(code).map(Asset::Rental))
    }

    /// Look up a code among coins and cloud services only
    pub fn mineable_from_code(code: &str) -> Option<Self> {
        match Self::from_code(code) {
            Some(Asset::Rental(_)) | None => None,
            found => found,
        }
    }

    /// Fold contract and rental aliases onto their base cloud service
    pub fn base(&self) -> Asset {
        match self {
            Asset::Coin(coin) => Asset::Coin(*coin),
            Asset::Cloud(cloud) => Asset::Cloud(cloud.base()),
            Asset::Rental(rental) => Asset::Cloud(rental.base()),
        }
    }

    pub fn is_coin(&self) -> bool {
        matches!(self, Asset::Coin(_))
    }

    pub fn is_contract(&self) -> bool {
        matches!(self, Asset::Cloud(cloud) if cloud.is_contract())
    }

    /// Every code the API knows, coins first
    pub fn all() -> impl Iterator<Item = Asset> {
        Coin::ALL
            .into_iter()
            .map(Asset::Coin)
            .chain(CloudService::ALL.into_iter().map(Asset::Cloud))
            .chain(Rental::ALL.into_iter().map(Asset::Rental))
    }
}

impl From<Coin> for Asset {
    fn from(coin: Coin) -> Self {
        Asset::Coin(coin)
    }
}

impl From<CloudService> for Asset {
    fn from(cloud: CloudService) -> Self {
        Asset::Cloud(cloud)
    }
}

impl From<Rental> for Asset {
    fn from(rental: Rental) -> Self {
        Asset::Rental(rental)
    }
}

impl FromStr for Asset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid coin type: {}", s)))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Asset {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Asset::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Fiat currencies the exchange-rate endpoint knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "USD")]
    UsDollar,
    #[serde(rename = "AUD")]
    AustralianDollar,
    #[serde(rename = "GBP")]
    BritishPound,
    #[serde(rename = "CAD")]
    CanadianDollar,
    #[serde(rename = "CNY")]
    ChineseYuanRenminbi,
    #[serde(rename = "CZK")]
    CzechKoruna,
    #[serde(rename = "DKK")]
    DanishKrone,
    #[serde(rename = "EUR")]
    Euro,
    #[serde(rename = "INR")]
    IndianRupee,
    #[serde(rename = "IDR")]
    IndonesianRupiah,
    #[serde(rename = "JPY")]
    JapaneseYen,
    #[serde(rename = "MXN")]
    MexicanPeso,
    #[serde(rename = "NOK")]
    NorwegianKrone,
    #[serde(rename = "PLN")]
    PolishZloty,
    #[serde(rename = "RON")]
    RomanianNewLeu,
    #[serde(rename = "RUB")]
    RussianRuble,
}

impl Currency {
    pub const ALL: [Currency; 16] = [
        Currency::UsDollar,
        Currency::AustralianDollar,
        Currency::BritishPound,
        Currency::CanadianDollar,
        Currency::ChineseYuanRenminbi,
        Currency::CzechKoruna,
        Currency::DanishKrone,
        Currency::Euro,
        Currency::IndianRupee,
        Currency::IndonesianRupiah,
        Currency::JapaneseYen,
        Currency::MexicanPeso,
        Currency::NorwegianKrone,
        Currency::PolishZloty,
        Currency::RomanianNewLeu,
        Currency::RussianRuble,
    ];

    /// Wire code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::UsDollar => "USD",
            Currency::AustralianDollar => "AUD",
            Currency::BritishPound => "GBP",
            Currency::CanadianDollar => "CAD",
            Currency::ChineseYuanRenminbi => "CNY",
            Currency::CzechKoruna => "CZK",
            Currency::DanishKrone => "DKK",
            Currency::Euro => "EUR",
            Currency::IndianRupee => "INR",
            Currency::IndonesianRupiah => "IDR",
            Currency::JapaneseYen => "JPY",
            Currency::MexicanPeso => "MXN",
            Currency::NorwegianKrone => "NOK",
            Currency::PolishZloty => "PLN",
            Currency::RomanianNewLeu => "RON",
            Currency::RussianRuble => "RUB",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Coin values are quoted in US dollars, so USD never needs a rate lookup
    pub fn is_us_dollar(&self) -> bool {
        matches!(self, Currency::UsDollar)
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid currency type: {}", s)))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric Eobot account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl UserId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::invalid_argument(format!("User ID '{}' must be numeric", s)))
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly positive, finite quantity of a coin or cloud product
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Amount(f64);

impl Amount {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::invalid_argument(format!(
                "Invalid amount given: {}",
                value
            )))
        }
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_argument(format!("Invalid amount given: {}", s)))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
