//! WeatherAPI client for current conditions and moonrise/moonset
//!
//! Requests are plain GETs with no retry. A well-formed response that lacks
//! the expected object is reported as `Ok(None)` so callers can keep what
//! they already show.

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{header::ACCEPT, Method, Request};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type HttpClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// Endpoint and credentials for the weather service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub temp_c: f64,
    pub condition: Condition,
}

impl CurrentWeather {
    pub fn summary(&self) -> String {
        format!("{}°C - {}", self.temp_c, self.condition.text)
    }
}

/// Moonrise and moonset as display strings, e.g. `07:42 PM`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Astro {
    pub moonrise: Option<String>,
    pub moonset: Option<String>,
}

#[derive(Deserialize)]
struct CurrentResponse {
    current: Option<CurrentWeather>,
}

#[derive(Deserialize)]
struct AstronomyResponse {
    astronomy: Option<AstronomyBody>,
}

#[derive(Deserialize)]
struct AstronomyBody {
    astro: Option<RawAstro>,
}

#[derive(Deserialize)]
struct RawAstro {
    #[serde(default)]
    moonrise: Option<String>,
    #[serde(default)]
    moonset: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ═══════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum WeatherError {
    Url(url::ParseError),
    Request(hyper::http::Error),
    Transport(hyper_util::client::legacy::Error),
    Body(hyper::Error),
    Status { code: u16, message: String },
    Decode(serde_json::Error),
    Timeout,
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherError::Url(e) => write!(f, "invalid weather URL: {e}"),
            WeatherError::Request(e) => write!(f, "could not build request: {e}"),
            WeatherError::Transport(e) => write!(f, "request failed: {e}"),
            WeatherError::Body(e) => write!(f, "could not read response: {e}"),
            WeatherError::Status { code, message } => {
                write!(f, "weather service returned {code}: {message}")
            }
            WeatherError::Decode(e) => write!(f, "malformed response: {e}"),
            WeatherError::Timeout => write!(f, "request timed out"),
        }
    }
}

impl std::error::Error for WeatherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeatherError::Url(e) => Some(e),
            WeatherError::Request(e) => Some(e),
            WeatherError::Transport(e) => Some(e),
            WeatherError::Body(e) => Some(e),
            WeatherError::Decode(e) => Some(e),
            WeatherError::Status { .. } | WeatherError::Timeout => None,
        }
    }
}

impl From<url::ParseError> for WeatherError {
    fn from(e: url::ParseError) -> Self {
        WeatherError::Url(e)
    }
}

impl From<hyper::http::Error> for WeatherError {
    fn from(e: hyper::http::Error) -> Self {
        WeatherError::Request(e)
    }
}

impl From<hyper_util::client::legacy::Error> for WeatherError {
    fn from(e: hyper_util::client::legacy::Error) -> Self {
        WeatherError::Transport(e)
    }
}

impl From<hyper::Error> for WeatherError {
    fn from(e: hyper::Error) -> Self {
        WeatherError::Body(e)
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        WeatherError::Decode(e)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CLIENT
// ═══════════════════════════════════════════════════════════════════════════

pub struct WeatherClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Returns `None` when no API key is configured
    pub fn new(config: &WeatherConfig) -> Result<Option<Self>, rustls::Error> {
        let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Some(Self {
            http: Client::builder(TokioExecutor::new()).build(https),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }))
    }

    fn endpoint(&self, name: &str, params: &[(&str, &str)]) -> Result<Url, WeatherError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, name))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", &self.api_key);
            for (k, v) in params {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }

    pub fn current_url(&self, city: &str) -> Result<Url, WeatherError> {
        self.endpoint("current.json", &[("q", city)])
    }

    pub fn astronomy_url(&self, city: &str, date: &str) -> Result<Url, WeatherError> {
        self.endpoint("astronomy.json", &[("q", city), ("dt", date)])
    }

    async fn get(&self, url: Url) -> Result<Bytes, WeatherError> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .header(ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())?;

        let fetch = async {
            let res = self.http.request(req).await?;
            let status = res.status();
            let body = res.into_body().collect().await?.to_bytes();
            Ok::<_, WeatherError>((status, body))
        };

        let (status, body) = tokio::time::timeout(REQUEST_TIMEOUT, fetch)
            .await
            .map_err(|_| WeatherError::Timeout)??;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(WeatherError::Status {
                code: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    /// Current conditions for `city`
    #[instrument(skip(self))]
    pub async fn current(&self, city: &str) -> Result<Option<CurrentWeather>, WeatherError> {
        let body = self.get(self.current_url(city)?).await?;
        let parsed: CurrentResponse = serde_json::from_slice(&body)?;
        if parsed.current.is_none() {
            debug!("response has no current conditions");
        }
        Ok(parsed.current)
    }

    /// Moonrise/moonset for `city` on `date` (`YYYY-MM-DD`)
    #[instrument(skip(self))]
    pub async fn astronomy(&self, city: &str, date: &str) -> Result<Option<Astro>, WeatherError> {
        let body = self.get(self.astronomy_url(city, date)?).await?;
        let parsed: AstronomyResponse = serde_json::from_slice(&body)?;
        Ok(parsed
            .astronomy
            .and_then(|a| a.astro)
            .map(|raw| Astro {
                moonrise: non_empty(raw.moonrise),
                moonset: non_empty(raw.moonset),
            }))
    }
}
