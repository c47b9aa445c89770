use serde::{Deserialize, Serialize};

/// One complete weather reading for a location at a point in time.
///
/// The field layout mirrors the OpenWeather current-conditions payload, so a
/// snapshot is cached exactly as the server returned it: either no snapshot
/// exists at all, or it is one whole prior response, never a partial merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub main: Measurements,
    pub wind: Wind,
    pub sys: SysInfo,
    pub name: String,
}

impl WeatherSnapshot {
    /// The condition used for rendering. The server sends an ordered list,
    /// but only the first entry is meaningful on a single screen.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SysInfo {
    pub country: String,
    /// Epoch seconds.
    pub sunrise: i64,
    /// Epoch seconds.
    pub sunset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_payload_and_ignores_extra_fields() {
        // Trimmed from a live response; `dt`, `cod` etc. are not part of the
        // snapshot and must not break decoding.
        let body = r#"{
            "coord": {"lon": -0.12, "lat": 51.5},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "base": "stations",
            "main": {"temp": 15.2, "feels_like": 14.8, "temp_min": 12.1, "temp_max": 17.8, "pressure": 1012, "humidity": 72},
            "visibility": 10000,
            "wind": {"speed": 4.1, "deg": 200},
            "dt": 1700000000,
            "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1699994400, "sunset": 1700028000},
            "timezone": 0,
            "id": 2643743,
            "name": "London",
            "cod": 200
        }"#;

        let snapshot: WeatherSnapshot = serde_json::from_str(body).expect("payload must decode");

        assert_eq!(snapshot.coord.lat, 51.5);
        assert_eq!(snapshot.coord.lon, -0.12);
        assert_eq!(snapshot.name, "London");
        assert_eq!(snapshot.sys.country, "GB");
        assert_eq!(snapshot.main.humidity, 72);
        assert_eq!(snapshot.wind.speed, 4.1);

        let condition = snapshot.primary_condition().expect("one condition expected");
        assert_eq!(condition.main, "Clouds");
        assert_eq!(condition.icon, "04d");
    }

    #[test]
    fn primary_condition_is_first_entry() {
        let body = r#"{
            "coord": {"lon": 2.35, "lat": 48.85},
            "weather": [
                {"main": "Rain", "description": "light rain", "icon": "10d"},
                {"main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "main": {"temp": 9.0, "temp_min": 8.0, "temp_max": 10.0, "humidity": 90},
            "wind": {"speed": 2.0},
            "sys": {"country": "FR", "sunrise": 1700000000, "sunset": 1700030000},
            "name": "Paris"
        }"#;

        let snapshot: WeatherSnapshot = serde_json::from_str(body).expect("payload must decode");
        assert_eq!(snapshot.weather.len(), 2);
        assert_eq!(snapshot.primary_condition().map(|c| c.icon.as_str()), Some("10d"));
    }
}
