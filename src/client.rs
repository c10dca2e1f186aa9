//! Eobot API client
//!
//! Every operation validates its arguments, resolves the account it acts for,
//! performs exactly one round trip (two when a currency conversion is needed)
//! and parses the plain-text body into a typed result.

use crate::config::ClientConfig;
use crate::models::{Balance, BalanceSheet, SpeedReport};
use crate::parser;
use crate::transport::{HttpTransport, Method, Request, Response, Transport};
use crate::types::{Amount, Asset, Coin, Currency, UserId};
use crate::{Error, Result};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Client for the Eobot API
pub struct EobotClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: Url,
    user_id: Option<UserId>,
    validate_ssl: bool,
    last_response: Option<Response>,
}

impl EobotClient<HttpTransport> {
    /// Create a client talking HTTP with the configured settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.http)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> EobotClient<T> {
    /// Create a client on top of the given transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        let user_id = config
            .user_id
            .as_deref()
            .map(str::parse::<UserId>)
            .transpose()?;
        let base_url = config.base_url()?;

        info!(
            "Created Eobot client for {} (user: {})",
            base_url,
            user_id.map_or_else(|| "none".to_string(), |id| id.to_string())
        );

        Ok(Self {
            transport,
            base_url,
            user_id,
            validate_ssl: config.validate_ssl,
            last_response: None,
        })
    }

    /// Stored account identifier
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    pub fn validate_ssl(&self) -> bool {
        self.validate_ssl
    }

    /// Stop verifying certificates on every request built from now on
    pub fn disable_ssl_verification(&mut self) {
        info!("SSL certificate verification disabled");
        self.validate_ssl = false;
    }

    /// Raw response of the most recent round trip
    pub fn last_response(&self) -> Option<&Response> {
        self.last_response.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A fresh request carrying the current SSL setting
    pub fn request(&self, method: Method) -> Request {
        Request::new(method, self.base_url.clone(), self.validate_ssl)
    }

    async fn send(&mut self, request: Request) -> Result<String> {
        debug!("Sending {:?}", request);
        self.last_response = None;

        let response = self.transport.execute(&request).await?;
        self.last_response = Some(response.clone());

        if !response.is_success() {
            warn!("Eobot API answered with HTTP {}", response.status);
            return Err(Error::status(response.status, response.body));
        }
        Ok(response.body)
    }

    /// Explicit id if given (must be numeric), else the stored one
    fn resolve_user_id(&self, explicit: Option<&str>) -> Result<UserId> {
        match explicit {
            Some(id) => id.parse(),
            None => self.user_id.ok_or_else(|| {
                Error::invalid_argument("Cannot perform this action because no user ID is known")
            }),
        }
    }

    fn parse_currency(code: &str) -> Result<Currency> {
        Currency::from_code(code)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid currency type given: {}", code)))
    }

    fn parse_coin(code: &str) -> Result<Coin> {
        Coin::from_code(code)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid coin type given: {}", code)))
    }

    /// Value of one unit of a coin or cloud product, in the given currency
    #[instrument(skip(self))]
    pub async fn get_coin_value(&mut self, coin: &str, currency: &str) -> Result<f64> {
        let asset = Asset::mineable_from_code(coin)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid coin type given: {}", coin)))?;
        let currency = Self::parse_currency(currency)?;

        let value = self.fetch_value(asset.base().as_str()).await?;
        let rate = self.exchange_rate(currency).await?;
        Ok(value * rate)
    }

    /// Units of `currency` per US dollar
    #[instrument(skip(self))]
    pub async fn get_exchange_rate(&mut self, currency: &str) -> Result<f64> {
        let currency = Self::parse_currency(currency)?;
        self.exchange_rate(currency).await
    }

    async fn exchange_rate(&mut self, currency: Currency) -> Result<f64> {
        if currency.is_us_dollar() {
            return Ok(1.0);
        }
        self.fetch_value(currency.as_str()).await
    }

    async fn fetch_value(&mut self, code: &str) -> Result<f64> {
        let request = self.request(Method::Get).param("coin", code);
        let body = self.send(request).await?;
        parser::parse_number(&body)
    }

    /// Balance query: the whole sheet, one coin or cloud entry, or the total in a currency
    #[instrument(skip(self))]
    pub async fn get_balance(&mut self, query: Option<&str>, user_id: Option<&str>) -> Result<Balance> {
        let Some(code) = query else {
            return self.get_balance_sheet(user_id).await.map(Balance::Sheet);
        };

        if let Some(asset) = Asset::mineable_from_code(code) {
            let user_id = self.resolve_user_id(user_id)?;
            let amount = self.asset_balance(asset, user_id).await?;
            Ok(Balance::Asset { asset, amount })
        } else if let Some(currency) = Currency::from_code(code) {
            let user_id = self.resolve_user_id(user_id)?;
            let amount = self.total_balance_in(currency, user_id).await?;
            Ok(Balance::Total { currency, amount })
        } else {
            Err(Error::invalid_argument(format!(
                "'{}' is not a valid coin type or currency",
                code
            )))
        }
    }

    /// Full balance sheet of an account
    #[instrument(skip(self))]
    pub async fn get_balance_sheet(&mut self, user_id: Option<&str>) -> Result<BalanceSheet> {
        let user_id = self.resolve_user_id(user_id)?;
        self.fetch_balance_sheet(user_id).await
    }

    /// Holdings of one coin or cloud product
    #[instrument(skip(self))]
    pub async fn get_coin_balance(&mut self, coin: &str, user_id: Option<&str>) -> Result<f64> {
        let asset = Asset::mineable_from_code(coin)
            .ok_or_else(|| Error::invalid_argument(format!("'{}' is not a valid coin type", coin)))?;
        let user_id = self.resolve_user_id(user_id)?;
        self.asset_balance(asset, user_id).await
    }

    /// Account total converted into a currency
    #[instrument(skip(self))]
    pub async fn get_total_balance_in(&mut self, currency: &str, user_id: Option<&str>) -> Result<f64> {
        let currency = Self::parse_currency(currency)?;
        let user_id = self.resolve_user_id(user_id)?;
        self.total_balance_in(currency, user_id).await
    }

    async fn fetch_balance_sheet(&mut self, user_id: UserId) -> Result<BalanceSheet> {
        let request = self.request(Method::Get).param("total", user_id);
        let body = self.send(request).await?;
        parser::parse_balance_sheet(&body)
    }

    async fn asset_balance(&mut self, asset: Asset, user_id: UserId) -> Result<f64> {
        let sheet = self.fetch_balance_sheet(user_id).await?;
        sheet.get(asset).ok_or_else(|| {
            Error::logic(format!("Coin type '{}' is not in the balance sheet", asset))
        })
    }

    async fn total_balance_in(&mut self, currency: Currency, user_id: UserId) -> Result<f64> {
        let total = self.fetch_balance_sheet(user_id).await?.total();
        let rate = self.exchange_rate(currency).await?;
        Ok(total * rate)
    }

    /// Current mining mode; contract modes are reported as their cloud service
    #[instrument(skip(self))]
    pub async fn get_mining_mode(&mut self, user_id: Option<&str>) -> Result<Asset> {
        let user_id = self.resolve_user_id(user_id)?;
        let request = self.request(Method::Get).param("idmining", user_id);
        let body = self.send(request).await?;
        parser::parse_mining_mode(&body)
    }

    /// Current hash rates of an account
    #[instrument(skip(self))]
    pub async fn get_speed(&mut self, user_id: Option<&str>) -> Result<SpeedReport> {
        let user_id = self.resolve_user_id(user_id)?;
        let request = self.request(Method::Get).param("idspeed", user_id);
        let body = self.send(request).await?;
        parser::parse_speed(&body)
    }

    /// Deposit address of a coin wallet. BitShares-X has none and yields `""`.
    #[instrument(skip(self))]
    pub async fn get_deposit_address(&mut self, coin: &str, user_id: Option<&str>) -> Result<String> {
        let coin = Self::parse_coin(coin)?;
        let user_id = self.resolve_user_id(user_id)?;

        let request = self
            .request(Method::Get)
            .param("id", user_id)
            .param("deposit", coin.as_str());
        let body = self.send(request).await?;
        parser::parse_deposit_address(&body, coin)
    }

    /// Account id for a set of credentials, or the stored id when there is one
    ///
    /// The looked-up id is returned, not stored.
    #[instrument(skip(self, password))]
    pub async fn get_user_id(&mut self, email: Option<&str>, password: Option<&str>) -> Result<UserId> {
        if let Some(user_id) = self.user_id {
            return Ok(user_id);
        }

        let email = email.filter(|email| !email.is_empty()).ok_or_else(|| {
            Error::logic("No email address given, but it is required when no user ID is set")
        })?;
        let password = password.filter(|password| !password.is_empty()).ok_or_else(|| {
            Error::logic("No password given, but it is required when a user ID is being fetched")
        })?;

        let request = self
            .request(Method::Post)
            .param("email", email)
            .param("password", password);
        let body = self.send(request).await?;

        parser::parse_user_id(&body).inspect_err(|_| {
            warn!("Eobot API rejected the credentials for {}", email);
        })
    }

    /// Switch what an account mines. Returns `false` when the credentials are rejected.
    ///
    /// For contract modes `contract_user_id` names the account when `user_id` is absent.
    #[instrument(skip(self, password))]
    pub async fn set_mining_mode(
        &mut self,
        mode: &str,
        email: &str,
        password: &str,
        contract_user_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<bool> {
        let asset = Asset::mineable_from_code(mode)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid mining type given: {}", mode)))?;

        let contract_user_id = contract_user_id.map(str::parse::<UserId>).transpose()?;
        let user_id = match (user_id, contract_user_id) {
            (Some(id), _) => id.parse::<UserId>()?,
            (None, Some(contract)) if asset.is_contract() => contract,
            (None, _) => self.resolve_user_id(None)?,
        };

        let request = self
            .request(Method::Post)
            .param("id", user_id)
            .param("email", email)
            .param("password", password)
            .param("mining", asset.as_str());
        let body = self.send(request).await?;

        let accepted = parser::parse_mode_change(&body);
        if accepted {
            info!("Mining mode of {} set to {}", user_id, asset);
        } else {
            warn!("Eobot API rejected the mining mode change for {}", user_id);
        }
        Ok(accepted)
    }

    /// Configure automatic withdrawal of a coin. Always `true` once sent.
    #[instrument(skip(self, password))]
    pub async fn set_automatic_withdraw(
        &mut self,
        coin: &str,
        amount: f64,
        wallet: &str,
        email: &str,
        password: &str,
        user_id: Option<&str>,
    ) -> Result<bool> {
        self.send_withdrawal("withdraw", coin, amount, wallet, email, password, user_id)
            .await
    }

    /// Withdraw funds to a wallet right away. Always `true` once sent.
    #[instrument(skip(self, password))]
    pub async fn withdraw_funds(
        &mut self,
        coin: &str,
        amount: f64,
        wallet: &str,
        email: &str,
        password: &str,
        user_id: Option<&str>,
    ) -> Result<bool> {
        self.send_withdrawal("manualwithdraw", coin, amount, wallet, email, password, user_id)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn send_withdrawal(
        &mut self,
        action: &str,
        coin: &str,
        amount: f64,
        wallet: &str,
        email: &str,
        password: &str,
        user_id: Option<&str>,
    ) -> Result<bool> {
        let coin = Self::parse_coin(coin)?;
        let amount = Amount::try_from(amount)?;
        let user_id = self.resolve_user_id(user_id)?;

        let request = self
            .request(Method::Post)
            .param("id", user_id)
            .param("email", email)
            .param("password", password)
            .param(action, coin.as_str())
            .param("amount", amount)
            .param("wallet", wallet);

        // The reply does not tell success from failure
        self.send(request).await?;
        Ok(true)
    }

    /// Convert a coin or cloud balance into a cloud product. Always `true` once sent.
    #[instrument(skip(self, password))]
    pub async fn convert_coin_to_cloud(
        &mut self,
        from: &str,
        amount: f64,
        to_cloud: &str,
        email: &str,
        password: &str,
        user_id: Option<&str>,
    ) -> Result<bool> {
        let from_asset = Asset::from_code(from)
            .ok_or_else(|| Error::invalid_argument(format!("Invalid coin type given: {}", from)))?;
        let amount = Amount::try_from(amount)?;
        let to_asset = Asset::from_code(to_cloud)
            .filter(|asset| !asset.is_coin())
            .ok_or_else(|| {
                Error::invalid_argument(format!("Invalid cloud type given: {}", to_cloud))
            })?;

        if from_asset.base() == to_asset.base() {
            return Err(Error::logic("Cannot convert a cloud type to itself"));
        }

        let user_id = self.resolve_user_id(user_id)?;

        let request = self
            .request(Method::Post)
            .param("id", user_id)
            .param("email", email)
            .param("password", password)
            .param("convertfrom", from_asset.as_str())
            .param("amount", amount)
            .param("convertto", to_asset.as_str());

        self.send(request).await?;
        Ok(true)
    }
}
