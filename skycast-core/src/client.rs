use reqwest::{Client, header};
use thiserror::Error;

use crate::model::WeatherSnapshot;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data";

/// Unit system requested from the weather endpoint.
///
/// The screen pipeline always requests metric; the displayed suffix is a
/// separate, locale-driven concern (see [`crate::view::unit_suffix`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

/// Failure of a single weather fetch. No variant is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection or IO level failure, before any valid HTTP response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("weather endpoint returned HTTP {status}")]
    Protocol { status: u16 },

    /// 2xx answer without a parseable payload.
    #[error("weather endpoint returned no parseable payload")]
    EmptyBody,
}

impl FetchError {
    /// Short tag used when reporting the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Protocol { .. } => "protocol",
            FetchError::EmptyBody => "empty body",
        }
    }
}

/// Client for the OpenWeather current-conditions endpoint.
///
/// Issues exactly one request per [`fetch`](WeatherClient::fetch) call. The
/// API key travels both as the `appid` query parameter and as an
/// `X-Auth-Token` header attached to every outgoing request.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        let api_key = api_key.into();

        let mut headers = header::HeaderMap::new();
        if let Ok(value) = header::HeaderValue::from_str(&api_key) {
            headers.insert("X-Auth-Token", value);
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Point the client at a different endpoint root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current conditions for a coordinate pair.
    pub async fn fetch(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
    ) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.as_str().to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = res.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::debug!(%err, "weather payload did not decode");
            FetchError::EmptyBody
        })
    }
}
