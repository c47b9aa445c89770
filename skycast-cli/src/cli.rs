use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use skycast_core::{
    Config, IpGeolocator, ScreenController, ScreenDeps, SnapshotStore, SystemConnectivity,
    WeatherClient,
};

use crate::platform::{ConsentGate, locale_region};
use crate::screen::TerminalScreen;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather for where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key used for fetches.
    Configure,

    /// Determine your location and show current weather (the default).
    Show,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Show) {
            Command::Configure => configure(),
            Command::Show => show().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = inquire::Text::new("OpenWeather API key:").prompt()?;
    config.api_key = Some(key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show() -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?.to_string();

    let client = WeatherClient::new(api_key)?;
    let store = SnapshotStore::open()?;

    // Ctrl-C is the terminal analogue of tearing the screen down: the
    // in-flight fetch is abandoned before it can write or render.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let deps = ScreenDeps {
        client,
        store,
        location: Box::new(IpGeolocator::new(config.location_enabled)),
        permissions: Box::new(ConsentGate::new(config)),
        connectivity: Box::new(SystemConnectivity),
        screen: TerminalScreen::new(),
        region: locale_region(),
        cancel,
    };

    let mut controller = ScreenController::new(deps);

    // Show whatever the cache holds first; a miss shows nothing.
    controller.render_cached();
    controller.refresh().await;

    Ok(())
}
