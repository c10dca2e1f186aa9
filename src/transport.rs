//! HTTP transport for the Eobot API
//!
//! A [`Request`] captures everything one round trip needs, including whether the
//! server certificate must be verified. [`Transport`] performs it; [`HttpTransport`]
//! is the reqwest-backed implementation used outside tests.

use crate::config::HttpConfig;
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder};
use std::fmt;
use tracing::{debug, info};
use url::Url;

/// Parameter names whose values never appear in logs
const REDACTED_PARAMS: [&str; 1] = ["password"];

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Parameters travel in the query string
    Get,
    /// Parameters travel in a form-encoded body
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// One API request. The SSL flag is fixed when the request is built.
#[derive(Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: Url,
    params: Vec<(String, String)>,
    validate_ssl: bool,
}

impl Request {
    pub fn new(method: Method, url: Url, validate_ssl: bool) -> Self {
        Self {
            method,
            url,
            params: Vec::new(),
            validate_ssl,
        }
    }

    /// Append a parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// First value of the named parameter
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn validate_ssl(&self) -> bool {
        self.validate_ssl
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(key, value)| {
                if REDACTED_PARAMS.contains(&key.as_str()) {
                    (key.as_str(), "***")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("params", &params)
            .field("validate_ssl", &self.validate_ssl)
            .finish()
    }
}

/// Raw response of the last round trip
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: String,
    pub received_at: DateTime<Utc>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            received_at: Utc::now(),
        }
    }

    /// A `200 OK` response with the given body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn raw_body(&self) -> &str {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single request/response round trip
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &Request) -> Result<Response>;
}

/// reqwest-backed transport
///
/// Two clients are built up front, one verifying certificates and one accepting
/// any certificate, so the per-request SSL flag only selects between them.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    verified: Client,
    insecure: Client,
}

impl HttpTransport {
    /// Build both clients from the HTTP settings
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let verified = Self::builder(config).build()?;
        let insecure = Self::builder(config)
            .danger_accept_invalid_certs(true)
            .build()?;

        info!(
            "Created HTTP transport (timeout: {:?}, connect timeout: {:?})",
            config.timeout, config.connect_timeout
        );
        Ok(Self { verified, insecure })
    }

    fn builder(config: &HttpConfig) -> ClientBuilder {
        ClientBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
    }

    fn client_for(&self, request: &Request) -> &Client {
        if request.validate_ssl() {
            &self.verified
        } else {
            &self.insecure
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &Request) -> Result<Response> {
        let client = self.client_for(request);
        let builder = match request.method() {
            Method::Get => client.get(request.url().clone()).query(request.params()),
            Method::Post => client.post(request.url().clone()).form(request.params()),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("Received HTTP {} ({} bytes)", status, body.len());
        Ok(Response::new(status, body))
    }
}
