use super::client::DogApi;
use crate::error::Result;

/// Fetch `per_breed` images for each breed, one request at a time.
///
/// URLs come back grouped by breed in the order the breeds were given.
/// The first failing breed aborts the whole batch; nothing fetched before it
/// is returned. An empty selection makes no request and yields no images.
pub async fn fetch_breed_images(
    api: DogApi,
    breeds: Vec<String>,
    per_breed: u32,
) -> Result<Vec<String>> {
    let mut all_images = Vec::with_capacity(breeds.len() * per_breed as usize);

    for breed in &breeds {
        let images = api.breed_images(breed, per_breed).await?;
        tracing::debug!("Fetched {} images for {}", images.len(), breed);
        all_images.extend(images);
    }

    Ok(all_images)
}
