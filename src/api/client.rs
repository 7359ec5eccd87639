use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::Settings;
use crate::error::{GalleryError, Result};
use crate::state::catalog::BreedCatalog;

/// Every JSON response from the service is wrapped like this
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    message: T,
    status: String,
}

/// Client for the dog.ceo REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct DogApi {
    client: Client,
    base: Url,
}

impl DogApi {
    /// Build a client from user settings (base URL and timeout)
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        let base = Url::parse(&settings.api_base_url)?;
        Ok(Self { client, base })
    }

    /// Build a client against an arbitrary base URL with default settings
    #[cfg(test)]
    pub fn with_base_url(base: &str) -> Result<Self> {
        Self::new(&Settings {
            api_base_url: base.to_string(),
            ..Settings::default()
        })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GalleryError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON envelope and unwrap its `message`
    async fn get_message<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                url: url.to_string(),
                status,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        if envelope.status != "success" {
            return Err(GalleryError::Service {
                url: url.to_string(),
                status: envelope.status,
            });
        }

        Ok(envelope.message)
    }

    /// `GET /breeds/list/all`
    pub async fn list_breeds(&self) -> Result<BreedCatalog> {
        let url = self.endpoint(&["breeds", "list", "all"])?;
        self.get_message(url).await
    }

    /// `GET /breeds/image/random/{count}`
    pub async fn random_images(&self, count: u32) -> Result<Vec<String>> {
        let count = count.to_string();
        let url = self.endpoint(&["breeds", "image", "random", &count])?;
        self.get_message(url).await
    }

    /// `GET /breed/{breed}/images/random/{count}`
    pub async fn breed_images(&self, breed: &str, count: u32) -> Result<Vec<String>> {
        let count = count.to_string();
        let url = self.endpoint(&["breed", breed, "images", "random", &count])?;
        self.get_message(url).await
    }

    /// Download raw bytes from an image URL returned by the service
    pub async fn download(&self, image_url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(image_url)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
