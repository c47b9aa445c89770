//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather client and cached snapshot entities
//! - The screen controller pipeline (location → fetch → cache → render)
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services.

pub mod cache;
pub mod client;
pub mod config;
pub mod connectivity;
pub mod controller;
pub mod location;
pub mod model;
pub mod view;

pub use cache::SnapshotStore;
pub use client::{FetchError, Units, WeatherClient};
pub use config::{Config, Consent};
pub use connectivity::{Connectivity, SystemConnectivity, TransportKind};
pub use controller::{
    Notice, PermissionGate, PermissionOutcome, Screen, ScreenController, ScreenDeps, ScreenState,
};
pub use location::{Coordinates, IpGeolocator, LocationError, LocationSource};
pub use model::WeatherSnapshot;
pub use view::{IconKind, ScreenView};
