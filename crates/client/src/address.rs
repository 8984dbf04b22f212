use std::fmt;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::errors::LookupError;

/// Address as returned by the postal-code directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {} - {}", self.street, self.neighborhood, self.city, self.region)
    }
}

/// Postal code → address lookup.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError>;
}

/// ViaCEP-compatible directory: `GET {base}/{code}/json/`.
pub struct ViaCepResolver {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    // `true` on the classic API, `"true"` on newer deployments
    #[serde(default)]
    erro: Option<Value>,
}

impl ViaCepResponse {
    fn is_unknown(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl ViaCepResolver {
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    fn lookup_url(&self, postal_code: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| LookupError::Unavailable(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Unavailable(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .push(postal_code)
            .push("json")
            .push("");
        Ok(url)
    }
}

#[async_trait]
impl AddressResolver for ViaCepResolver {
    #[instrument(skip(self))]
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        let url = self.lookup_url(postal_code)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "address directory refused the lookup");
            return Err(LookupError::Unavailable(format!("status {status}")));
        }

        let body: ViaCepResponse = resp
            .json()
            .await
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;
        if body.is_unknown() {
            debug!("postal code unknown to the directory");
            return Err(LookupError::NotFound);
        }
        Ok(Address { street: body.logradouro, neighborhood: body.bairro, city: body.localidade, region: body.uf })
    }
}
