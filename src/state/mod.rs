/// State management module
///
/// This module holds all application state:
/// - The breed catalog and suggestion matching (catalog.rs)
/// - The user's selected breeds (selection.rs)
/// - The root state that owns both plus the image list (gallery.rs)

pub mod catalog;
pub mod gallery;
pub mod selection;

pub use catalog::BreedCatalog;
pub use gallery::{FetchKind, FetchRequest, FetchTicket, Gallery};
pub use selection::SelectedBreeds;
