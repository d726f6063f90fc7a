use crate::payload::SportsListResponse;
use crate::{Category, NormalizedRecord, SportId, normalize};
use log::{debug, warn};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Error bodies are cut to this many characters before being surfaced.
const ERROR_BODY_LIMIT: usize = 200;

/// Transport settings, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Total attempts per request, first try included.
    pub max_attempts: u32,
    /// Wait before retry n is `retry_delay * n`.
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Read overrides from the process environment:
    ///
    /// - `SPORTSDASH_API_URL`: backend proxy base URL
    /// - `SPORTSDASH_RETRIES`: total attempts per request
    /// - `SPORTSDASH_TIMEOUT_SECS`: per-attempt timeout
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty("SPORTSDASH_API_URL")
                .map(|url| url.trim().trim_end_matches('/').to_owned())
                .unwrap_or(defaults.base_url),
            max_attempts: non_empty("SPORTSDASH_RETRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_attempts),
            retry_delay: defaults.retry_delay,
            timeout: non_empty("SPORTSDASH_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Optional filters forwarded to the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub league: Option<u32>,
    pub season: Option<String>,
}

impl Query {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(league) = self.league {
            pairs.push(("league", league.to_string()));
        }
        if let Some(season) = self.season.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("season", season.to_owned()));
        }
        pairs
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api {
        status: StatusCode,
        url: String,
        body: String,
    },
    Parsing(reqwest::Error, String),
    InvalidUrl(String),
}

impl ApiError {
    /// Server-class failures and dropped connections are worth another attempt;
    /// client errors and undecodable bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(..) => true,
            ApiError::Api { status, .. } => status.is_server_error(),
            ApiError::Parsing(..) | ApiError::InvalidUrl(_) => false,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api { status, url, body } => {
                write!(f, "API returned {status} for {url}: {body}")
            }
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

/// Client for the sports backend proxy.
#[derive(Debug, Clone)]
pub struct SportsApi {
    client: Client,
    config: ApiConfig,
}

impl Default for SportsApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

impl SportsApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent("sportsdash/0.1 (terminal sports dashboard)")
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Sports the backend can serve, e.g. `["baseball", "basketball", "football"]`.
    pub async fn fetch_sports(&self) -> ApiResult<Vec<String>> {
        let url = self.url("/sports", &[])?;
        let raw = self.get_json(url).await?;
        let list: SportsListResponse = serde_json::from_value(raw).unwrap_or_default();
        Ok(list.sports)
    }

    /// Undecoded provider payload for one sport and category.
    pub async fn fetch_raw(
        &self,
        sport: &SportId,
        category: Category,
        query: &Query,
    ) -> ApiResult<Value> {
        let path = format!("/sports/{sport}/{}", category.path());
        let url = self.url(&path, &query.pairs())?;
        self.get_json(url).await
    }

    pub async fn fetch_records(
        &self,
        sport: &SportId,
        category: Category,
        query: &Query,
    ) -> ApiResult<Vec<NormalizedRecord>> {
        let raw = self.fetch_raw(sport, category, query).await?;
        let records = normalize(&raw, category, sport);
        debug!("normalized {} {category} records for {sport}", records.len());
        Ok(records)
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> ApiResult<Url> {
        let raw = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(&raw, params).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// GET with the fixed retry budget: linear back-off on retryable errors,
    /// immediate failure otherwise.
    async fn get_json(&self, url: Url) -> ApiResult<Value> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            debug!("fetching {url} (attempt {attempt}/{max_attempts})");
            match self.get_once(&url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.config.retry_delay * attempt;
                    warn!("{e}; retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once(&self, url: &Url) -> ApiResult<Value> {
        let response = self
            .client
            .get(url.clone())
            .header("Content-Type", "application/json")
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status,
                url: url.to_string(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_string()))
    }
}
