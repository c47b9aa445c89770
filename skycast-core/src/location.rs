use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Ephemeral coordinate pair, produced once per location request. It is not
/// persisted on its own; only the snapshot it leads to is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location lookup failed: {0}")]
    Lookup(#[from] reqwest::Error),

    #[error("location backend returned no position")]
    NoPosition,
}

/// One-shot location source.
///
/// `request_one_shot` resolves at most once per call. The source performs no
/// permission or availability checking of its own; the screen controller
/// enforces both before asking for coordinates.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Whether the location service is switched on at all.
    fn is_enabled(&self) -> bool;

    async fn request_one_shot(&self) -> Result<Coordinates, LocationError>;
}

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// Resolves the device position from its public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    http: Client,
    endpoint: String,
    enabled: bool,
}

impl IpGeolocator {
    pub fn new(enabled: bool) -> Self {
        Self {
            http: Client::new(),
            endpoint: DEFAULT_GEOLOCATION_URL.to_string(),
            enabled,
        }
    }

    /// Point the lookup at a different endpoint, e.g. a mock server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl LocationSource for IpGeolocator {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn request_one_shot(&self) -> Result<Coordinates, LocationError> {
        let res = self.http.get(&self.endpoint).send().await?;
        let geo: GeoResponse = res.json().await?;

        match (geo.lat, geo.lon) {
            (Some(lat), Some(lon)) if geo.status.as_deref() != Some("fail") => Ok(Coordinates {
                latitude: lat,
                longitude: lon,
            }),
            _ => Err(LocationError::NoPosition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn delivers_coordinates_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "lat": 51.5,
                "lon": -0.12,
                "city": "London"
            })))
            .mount(&server)
            .await;

        let source = IpGeolocator::new(true).with_endpoint(server.uri());
        let coords = source.request_one_shot().await.expect("lookup must succeed");

        assert_eq!(coords.latitude, 51.5);
        assert_eq!(coords.longitude, -0.12);
    }

    #[tokio::test]
    async fn failed_lookup_yields_no_position() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "fail",
                "message": "private range"
            })))
            .mount(&server)
            .await;

        let source = IpGeolocator::new(true).with_endpoint(server.uri());
        let err = source.request_one_shot().await.unwrap_err();

        assert!(matches!(err, LocationError::NoPosition));
    }

    #[test]
    fn enabled_flag_is_reported() {
        assert!(IpGeolocator::new(true).is_enabled());
        assert!(!IpGeolocator::new(false).is_enabled());
    }
}
