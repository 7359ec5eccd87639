/// UI components
///
/// - `search.rs` - search box, suggestions, selected breeds
/// - `carousel.rs` - the slideshow view and its engine lifecycle

pub mod carousel;
pub mod search;
