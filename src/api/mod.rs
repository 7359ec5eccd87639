//! Remote breed/image service
//!
//! - `client.rs` - typed calls to the dog.ceo REST endpoints
//! - `fetch.rs` - batch image fetching for a breed selection

pub mod client;
pub mod fetch;

pub use client::DogApi;
