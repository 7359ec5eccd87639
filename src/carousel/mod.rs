/// Slideshow engine and its lifecycle
///
/// - `engine.rs` - looping autoplay engine, layout options, breakpoints
/// - `handle.rs` - owning handle that guarantees teardown
/// - `slides.rs` - per-slide image download and decode

pub mod engine;
pub mod handle;
pub mod slides;

pub use engine::{AutoplayEngine, EngineOptions};
pub use handle::EngineHandle;
pub use slides::{Slide, SlideImage};
