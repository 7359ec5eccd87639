//! Slide images
//!
//! Each slide is downloaded through the API client and decoded to RGBA on
//! tokio's blocking pool.

use iced::widget::image::Handle;

use crate::api::DogApi;
use crate::error::Result;

/// Where a slide's picture is in its lifecycle
#[derive(Debug, Clone)]
pub enum SlideImage {
    Loading,
    Ready(Handle),
    /// Download or decode failed; the alt text stands in
    Failed,
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub url: String,
    pub image: SlideImage,
}

impl Slide {
    pub fn new(url: String) -> Self {
        Self {
            url,
            image: SlideImage::Loading,
        }
    }
}

/// Alt text for the slide at zero-based `index`
pub fn alt_text(index: usize) -> String {
    format!("Dog {}", index + 1)
}

/// Download and decode one slide image
pub async fn load_slide(api: DogApi, url: String) -> Result<Handle> {
    let bytes = api.download(&url).await?;

    let (width, height, pixels) =
        tokio::task::spawn_blocking(move || decode_rgba(&bytes)).await??;

    Ok(Handle::from_rgba(width, height, pixels))
}

/// Decode any format the `image` crate recognizes into RGBA8 pixels
fn decode_rgba(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>)> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}
