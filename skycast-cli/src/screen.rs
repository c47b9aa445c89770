//! Terminal rendering of the weather screen.

use async_trait::async_trait;

use skycast_core::{Config, IconKind, Notice, Screen, ScreenView};

/// The icon glyph shown next to the condition. No glyph for codes the
/// mapping does not recognize.
fn glyph(icon: IconKind) -> &'static str {
    match icon {
        IconKind::Clear => "☀",
        IconKind::Cloudy => "☁",
        IconKind::Rain => "🌧",
        IconKind::Storm => "⛈",
        IconKind::Snow => "❄",
    }
}

#[derive(Debug, Default)]
pub struct TerminalScreen;

impl TerminalScreen {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Screen for TerminalScreen {
    fn show_progress(&mut self) {
        println!("Please wait, fetching current weather...");
    }

    fn hide_progress(&mut self) {
        // A scrolling terminal has nothing to dismiss.
    }

    fn show_notice(&mut self, notice: &Notice) {
        eprintln!("{notice}");
    }

    fn render(&mut self, view: &ScreenView) {
        println!();
        println!("{}, {}", view.place, view.country);

        match view.icon {
            Some(icon) => println!("{}  {}", glyph(icon), view.condition),
            None => println!("{}", view.condition),
        }
        println!("{}", view.description);

        println!(
            "Temperature: {}  ({} / {})",
            view.temperature, view.temperature_min, view.temperature_max
        );
        println!("Humidity:    {}", view.humidity);
        println!("Wind speed:  {}", view.wind_speed);
        println!("Sunrise:     {}    Sunset: {}", view.sunrise, view.sunset);
        println!();
    }

    async fn confirm_rationale(&mut self) -> bool {
        inquire::Confirm::new(
            "Location permission is switched off for skycast. Open the app settings to enable it?",
        )
        .with_default(false)
        .prompt()
        .unwrap_or(false)
    }

    fn open_location_settings(&mut self) {
        open_settings_surface();
    }

    fn open_app_settings(&mut self) {
        open_settings_surface();
    }
}

/// Both settings deep links land on the config file that holds the location
/// switch and the recorded consent.
fn open_settings_surface() {
    match Config::config_file_path() {
        Ok(path) => {
            if let Err(err) = open::that(&path) {
                tracing::warn!(%err, path = %path.display(), "could not open settings");
            }
        }
        Err(err) => tracing::warn!(%err, "could not locate settings"),
    }
}
