use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::WeatherSnapshot;

/// Fixed key the last successful response is stored under.
pub const SNAPSHOT_KEY: &str = "weather_response.json";

/// Persistent slot for the most recent successful [`WeatherSnapshot`].
///
/// One key, one value: every save replaces the previous blob, and the value
/// survives process restarts until the next successful fetch overwrites it.
/// Concurrent writers are not coordinated; the last write wins.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Open the store at the platform data directory.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self {
            path: dirs.data_dir().join(SNAPSHOT_KEY),
        })
    }

    /// Open the store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the snapshot and replace whatever was stored before.
    pub fn save(&self, snapshot: &WeatherSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }

        let json =
            serde_json::to_string(snapshot).context("Failed to serialize weather snapshot")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write cached snapshot: {}", self.path.display()))?;

        Ok(())
    }

    /// Read the stored snapshot. A missing file and an undecodable blob both
    /// come back as `None`; the rendering step simply shows nothing.
    pub fn load(&self) -> Option<WeatherSnapshot> {
        let contents = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }
}
