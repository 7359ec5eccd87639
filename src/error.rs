//! Error types for the gallery
//!
//! Every remote failure collapses into `GalleryError`. Callers log it and
//! leave their state untouched; nothing here is shown to the user.

use thiserror::Error;

/// A failed call to the breed/image service
#[derive(Error, Debug)]
pub enum GalleryError {
    /// Transport failure, timeout, or a body that isn't the expected JSON
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The payload parsed but its `status` field was not "success"
    #[error("service reported status {status:?} for {url}")]
    Service { url: String, status: String },

    /// An endpoint could not be built from the base URL
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    /// Downloaded bytes are not a decodable image
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// A blocking decode task panicked or was cancelled
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

/// Problems reading `settings.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Slideshow engine lifecycle failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("engine was already destroyed")]
    AlreadyDestroyed,

    #[error("cannot mount an engine with no slides")]
    EmptySlides,
}
