//! The single-screen pipeline: location service check, permission gate,
//! one-shot coordinates, connectivity check, fetch, cache write, render.
//!
//! Every failure is handled where it occurs with a transient notice, and the
//! controller returns to `Idle`. Nothing retries; a manual refresh re-runs
//! the whole sequence from the top.

use async_trait::async_trait;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::SnapshotStore;
use crate::client::{Units, WeatherClient};
use crate::connectivity::Connectivity;
use crate::location::LocationSource;
use crate::view::ScreenView;

/// Pipeline position. `Idle` both before the first trigger and after every
/// completed or halted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    CheckingLocationService,
    AwaitingPermission,
    AwaitingLocation,
    Fetching,
    Rendering,
}

/// Transient user-facing message; the terminal analogue of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LocationServiceOff,
    PermissionDenied { permanent: bool },
    LocationUnavailable,
    NoInternet,
    FetchFailed { kind: &'static str },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LocationServiceOff => {
                write!(f, "Your location provider is turned off. Please turn it on.")
            }
            Notice::PermissionDenied { permanent: true } => {
                write!(f, "You have denied location permission. It is required to show local weather.")
            }
            Notice::PermissionDenied { permanent: false } => {
                write!(f, "Location permission was not granted.")
            }
            Notice::LocationUnavailable => {
                write!(f, "Could not determine your current location.")
            }
            Notice::NoInternet => write!(f, "No internet connection available."),
            Notice::FetchFailed { kind } => {
                write!(f, "Could not fetch weather data ({kind}).")
            }
        }
    }
}

/// Outcome of asking the user for location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied { permanent: bool },
    /// Soft denial: the user should see a rationale dialog that can deep-link
    /// into the app settings.
    RationaleNeeded,
}

/// Gate in front of the location request.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// True when permission was granted earlier; the prompt is skipped.
    fn already_granted(&self) -> bool;

    async fn request(&mut self) -> PermissionOutcome;
}

/// The surface the controller draws on.
#[async_trait]
pub trait Screen: Send {
    /// Blocking progress indicator shown while a fetch is in flight.
    fn show_progress(&mut self);
    fn hide_progress(&mut self);

    fn show_notice(&mut self, notice: &Notice);
    fn render(&mut self, view: &ScreenView);

    /// Rationale dialog; true means "open the app settings".
    async fn confirm_rationale(&mut self) -> bool;

    fn open_location_settings(&mut self);
    fn open_app_settings(&mut self);
}

/// Everything the controller needs, wired together by the caller.
pub struct ScreenDeps<S: Screen> {
    pub client: WeatherClient,
    pub store: SnapshotStore,
    pub location: Box<dyn LocationSource>,
    pub permissions: Box<dyn PermissionGate>,
    pub connectivity: Box<dyn Connectivity>,
    pub screen: S,
    /// Locale region code driving the temperature suffix, e.g. "US".
    pub region: String,
    /// Set when the screen is torn down; checked before any cache write or
    /// render so an abandoned fetch cannot touch either.
    pub cancel: CancellationToken,
}

pub struct ScreenController<S: Screen> {
    client: WeatherClient,
    store: SnapshotStore,
    location: Box<dyn LocationSource>,
    permissions: Box<dyn PermissionGate>,
    connectivity: Box<dyn Connectivity>,
    screen: S,
    region: String,
    cancel: CancellationToken,
    state: ScreenState,
}

impl<S: Screen> ScreenController<S> {
    pub fn new(deps: ScreenDeps<S>) -> Self {
        Self {
            client: deps.client,
            store: deps.store,
            location: deps.location,
            permissions: deps.permissions,
            connectivity: deps.connectivity,
            screen: deps.screen,
            region: deps.region,
            cancel: deps.cancel,
            state: ScreenState::Idle,
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// Render whatever the cache holds. A cache miss shows nothing.
    pub fn render_cached(&mut self) {
        if let Some(snapshot) = self.store.load() {
            let view = ScreenView::from_snapshot(&snapshot, &self.region);
            if !self.cancel.is_cancelled() {
                self.screen.render(&view);
            }
        }
    }

    /// Run the pipeline once: screen start and manual refresh both land
    /// here, and both repeat the full sequence.
    pub async fn refresh(&mut self) {
        self.state = ScreenState::CheckingLocationService;
        debug!("pipeline triggered");

        if !self.location.is_enabled() {
            self.screen.show_notice(&Notice::LocationServiceOff);
            self.screen.open_location_settings();
            self.state = ScreenState::Idle;
            return;
        }

        self.state = ScreenState::AwaitingPermission;
        if !self.permissions.already_granted() {
            match self.permissions.request().await {
                PermissionOutcome::Granted => {}
                PermissionOutcome::Denied { permanent } => {
                    self.screen.show_notice(&Notice::PermissionDenied { permanent });
                    self.state = ScreenState::Idle;
                    return;
                }
                PermissionOutcome::RationaleNeeded => {
                    if self.screen.confirm_rationale().await {
                        self.screen.open_app_settings();
                    }
                    self.state = ScreenState::Idle;
                    return;
                }
            }
        }

        self.state = ScreenState::AwaitingLocation;
        let coords = match self.location.request_one_shot().await {
            Ok(coords) => coords,
            Err(err) => {
                warn!(%err, "location request failed");
                self.screen.show_notice(&Notice::LocationUnavailable);
                self.state = ScreenState::Idle;
                return;
            }
        };
        info!(latitude = coords.latitude, longitude = coords.longitude, "coordinates delivered");

        self.state = ScreenState::Fetching;
        self.screen.show_progress();

        if !self.connectivity.is_network_available() {
            self.screen.hide_progress();
            self.screen.show_notice(&Notice::NoInternet);
            self.state = ScreenState::Idle;
            return;
        }

        // The query itself is always metric; the locale only affects the
        // rendered suffix.
        match self
            .client
            .fetch(coords.latitude, coords.longitude, Units::Metric)
            .await
        {
            Ok(snapshot) => {
                if self.cancel.is_cancelled() {
                    debug!("screen torn down, discarding fetch result");
                    self.state = ScreenState::Idle;
                    return;
                }
                if let Err(err) = self.store.save(&snapshot) {
                    warn!(%err, "failed to persist weather snapshot");
                }
                self.screen.hide_progress();
                self.state = ScreenState::Rendering;
                self.render_cached();
                debug!("snapshot rendered");
            }
            Err(err) => {
                self.screen.hide_progress();
                warn!(kind = err.kind(), %err, "weather fetch failed");
                self.screen.show_notice(&Notice::FetchFailed { kind: err.kind() });
            }
        }

        self.state = ScreenState::Idle;
    }
}
