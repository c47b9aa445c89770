//! Turns a cached snapshot into the fields the screen displays.

use chrono::{Local, TimeZone};

use crate::model::WeatherSnapshot;

/// The small fixed set of icon categories the screen can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Clear,
    Cloudy,
    Rain,
    Storm,
    Snow,
}

/// Map an OpenWeather icon code onto an icon category.
///
/// This is the observed mapping of the shipped screen, including its quirks:
/// night rain (`10n`) renders cloudy, night thunderstorm (`11n`) renders
/// rain. Unrecognized codes select no icon at all.
pub fn icon_for_code(code: &str) -> Option<IconKind> {
    match code {
        "01d" | "01n" => Some(IconKind::Clear),
        "02d" | "02n" | "03d" | "03n" | "04d" | "04n" | "10n" => Some(IconKind::Cloudy),
        "10d" => Some(IconKind::Rain),
        "11d" => Some(IconKind::Storm),
        "11n" => Some(IconKind::Rain),
        "13d" | "13n" => Some(IconKind::Snow),
        _ => None,
    }
}

/// Temperature suffix for a locale region code.
///
/// Display-only: the underlying query always asks for metric values, so for
/// US/LR/MM locales the suffix disagrees with the stored number. Observed
/// behavior of the shipped screen, kept as-is.
pub fn unit_suffix(region: &str) -> &'static str {
    match region {
        "US" | "LR" | "MM" => "°F",
        _ => "°C",
    }
}

/// Render epoch seconds as a wall-clock `HH:MM` in the local timezone.
pub fn format_epoch_time(secs: i64) -> String {
    format_epoch_in(secs, &Local)
}

fn format_epoch_in<Tz: TimeZone>(secs: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    tz.timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Everything the screen shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenView {
    pub condition: String,
    pub description: String,
    pub temperature: String,
    pub temperature_min: String,
    pub temperature_max: String,
    pub humidity: String,
    pub wind_speed: String,
    pub sunrise: String,
    pub sunset: String,
    pub place: String,
    pub country: String,
    pub icon: Option<IconKind>,
}

impl ScreenView {
    /// Build the display fields from a snapshot and the locale region used
    /// for the temperature suffix.
    pub fn from_snapshot(snapshot: &WeatherSnapshot, region: &str) -> Self {
        let suffix = unit_suffix(region);

        let (condition, description, icon) = match snapshot.primary_condition() {
            Some(c) => (c.main.clone(), c.description.clone(), icon_for_code(&c.icon)),
            None => (String::new(), String::new(), None),
        };

        Self {
            condition,
            description,
            temperature: format!("{}{}", snapshot.main.temp, suffix),
            temperature_min: format!("{} min", snapshot.main.temp_min),
            temperature_max: format!("{} max", snapshot.main.temp_max),
            humidity: format!("{} per cent", snapshot.main.humidity),
            wind_speed: snapshot.wind.speed.to_string(),
            sunrise: format_epoch_time(snapshot.sys.sunrise),
            sunset: format_epoch_time(snapshot.sys.sunset),
            place: snapshot.name.clone(),
            country: snapshot.sys.country.clone(),
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Coord, Measurements, SysInfo, Wind};
    use chrono::Utc;

    fn snapshot_with(conditions: Vec<Condition>) -> WeatherSnapshot {
        WeatherSnapshot {
            coord: Coord { lat: 51.5, lon: -0.12 },
            weather: conditions,
            main: Measurements {
                temp: 15.2,
                temp_min: 12.1,
                temp_max: 17.8,
                humidity: 72,
            },
            wind: Wind { speed: 4.1 },
            sys: SysInfo {
                country: "GB".to_string(),
                sunrise: 1699994400,
                sunset: 1700028000,
            },
            name: "London".to_string(),
        }
    }

    #[test]
    fn clear_and_rain_codes_map_to_their_icons() {
        assert_eq!(icon_for_code("01d"), Some(IconKind::Clear));
        assert_eq!(icon_for_code("01n"), Some(IconKind::Clear));
        assert_eq!(icon_for_code("10d"), Some(IconKind::Rain));
        assert_eq!(icon_for_code("11d"), Some(IconKind::Storm));
        assert_eq!(icon_for_code("13n"), Some(IconKind::Snow));
    }

    #[test]
    fn cloud_family_maps_to_cloudy() {
        for code in ["02d", "02n", "03d", "03n", "04d", "04n", "10n"] {
            assert_eq!(icon_for_code(code), Some(IconKind::Cloudy), "code {code}");
        }
    }

    #[test]
    fn night_storm_renders_rain() {
        assert_eq!(icon_for_code("11n"), Some(IconKind::Rain));
    }

    #[test]
    fn unrecognized_code_selects_no_icon() {
        assert_eq!(icon_for_code("99x"), None);
        assert_eq!(icon_for_code("50d"), None);
        assert_eq!(icon_for_code(""), None);
    }

    #[test]
    fn fahrenheit_regions_get_fahrenheit_suffix() {
        assert_eq!(unit_suffix("US"), "°F");
        assert_eq!(unit_suffix("LR"), "°F");
        assert_eq!(unit_suffix("MM"), "°F");
    }

    #[test]
    fn everyone_else_gets_celsius_suffix() {
        assert_eq!(unit_suffix("FR"), "°C");
        assert_eq!(unit_suffix("GB"), "°C");
        assert_eq!(unit_suffix(""), "°C");
    }

    #[test]
    fn epoch_formats_as_wall_clock() {
        assert_eq!(format_epoch_in(0, &Utc), "00:00");
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_epoch_in(1700000000, &Utc), "22:13");
    }

    #[test]
    fn view_is_built_from_the_first_condition() {
        let snapshot = snapshot_with(vec![Condition {
            main: "Clouds".to_string(),
            description: "scattered clouds".to_string(),
            icon: "03d".to_string(),
        }]);

        let view = ScreenView::from_snapshot(&snapshot, "");

        assert_eq!(view.condition, "Clouds");
        assert_eq!(view.description, "scattered clouds");
        assert_eq!(view.temperature, "15.2°C");
        assert_eq!(view.temperature_min, "12.1 min");
        assert_eq!(view.temperature_max, "17.8 max");
        assert_eq!(view.humidity, "72 per cent");
        assert_eq!(view.wind_speed, "4.1");
        assert_eq!(view.place, "London");
        assert_eq!(view.country, "GB");
        assert_eq!(view.icon, Some(IconKind::Cloudy));
    }

    #[test]
    fn us_region_changes_only_the_suffix() {
        let snapshot = snapshot_with(vec![Condition {
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }]);

        let view = ScreenView::from_snapshot(&snapshot, "US");

        // The stored value stays metric; the suffix lies.
        assert_eq!(view.temperature, "15.2°F");
    }

    #[test]
    fn missing_conditions_render_blank_with_no_icon() {
        let snapshot = snapshot_with(vec![]);
        let view = ScreenView::from_snapshot(&snapshot, "");

        assert_eq!(view.condition, "");
        assert_eq!(view.description, "");
        assert_eq!(view.icon, None);
    }
}
