//! User settings
//!
//! Read once at startup from `settings.toml` in the platform config directory:
//! - Linux: ~/.config/dog-gallery/settings.toml
//! - macOS: ~/Library/Application Support/dog-gallery/settings.toml
//! - Windows: %APPDATA%\dog-gallery\settings.toml
//!
//! Every field is optional. A missing file is not an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// How responses to overlapping image fetches are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchOrdering {
    /// Drop a response issued before the one currently on screen
    #[default]
    Sequenced,
    /// Apply every response as it arrives; whichever lands last wins
    LastResolved,
}

/// Below (or at) `max_width` logical pixels, show `per_view` slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Breakpoint {
    pub max_width: u32,
    pub per_view: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the breed/image REST API
    pub api_base_url: String,
    /// Random images shown before anything is selected
    pub startup_image_count: u32,
    /// Images requested for every selected breed
    pub images_per_breed: u32,
    /// Max suggestions shown under the search box
    pub suggestion_limit: usize,
    /// Carousel autoplay interval in milliseconds
    pub autoplay_ms: u64,
    /// Slides visible at once on wide windows
    pub per_view: usize,
    pub breakpoints: Vec<Breakpoint>,
    pub request_timeout_secs: u64,
    pub fetch_ordering: FetchOrdering,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://dog.ceo/api".to_string(),
            startup_image_count: 6,
            images_per_breed: 2,
            suggestion_limit: 4,
            autoplay_ms: 1500,
            per_view: 3,
            breakpoints: vec![
                Breakpoint { max_width: 800, per_view: 2 },
                Breakpoint { max_width: 480, per_view: 1 },
            ],
            request_timeout_secs: 30,
            fetch_ordering: FetchOrdering::Sequenced,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults.
    ///
    /// Never fails: a broken file is logged and ignored.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::debug!("No config directory on this platform, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get the path where the settings file is expected
    pub fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("dog-gallery");
        path.push("settings.toml");
        Some(path)
    }

    /// Read and validate a settings file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = toml::from_str(&raw)?;
        settings.validate()?;

        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api_base_url).map_err(|e| ConfigError::Invalid {
            field: "api_base_url",
            message: e.to_string(),
        })?;

        let positive = [
            ("startup_image_count", self.startup_image_count as u64),
            ("images_per_breed", self.images_per_breed as u64),
            ("suggestion_limit", self.suggestion_limit as u64),
            ("per_view", self.per_view as u64),
            ("request_timeout_secs", self.request_timeout_secs),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    message: "must be at least 1".to_string(),
                });
            }
        }

        if self.autoplay_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "autoplay_ms",
                message: format!("{}ms is too fast, minimum is 100ms", self.autoplay_ms),
            });
        }

        if let Some(bp) = self.breakpoints.iter().find(|bp| bp.per_view == 0) {
            return Err(ConfigError::Invalid {
                field: "breakpoints",
                message: format!("per_view at {}px must be at least 1", bp.max_width),
            });
        }

        Ok(())
    }

    pub fn autoplay(&self) -> Duration {
        Duration::from_millis(self.autoplay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
