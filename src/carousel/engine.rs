use std::time::Duration;

use crate::config::{Breakpoint, Settings};
use crate::error::CarouselError;

/// A slideshow engine that must be torn down explicitly.
///
/// `EngineHandle` is the only caller of `destroy`, and calls it at most once
/// per engine.
pub trait Slideshow {
    fn destroy(&mut self) -> Result<(), CarouselError>;
}

/// Layout and timing for a mounted engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Slides shown at once above every breakpoint
    pub per_view: usize,
    /// Sorted by `max_width`, narrowest first
    pub breakpoints: Vec<Breakpoint>,
    pub autoplay: Duration,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl EngineOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut breakpoints = settings.breakpoints.clone();
        breakpoints.sort_by_key(|bp| bp.max_width);

        Self {
            per_view: settings.per_view,
            breakpoints,
            autoplay: settings.autoplay(),
        }
    }

    /// Slides per view for a window `width` logical pixels wide.
    ///
    /// The narrowest breakpoint whose `max_width` covers the width wins.
    pub fn per_view_at(&self, width: f32) -> usize {
        self.breakpoints
            .iter()
            .find(|bp| width <= bp.max_width as f32)
            .map_or(self.per_view, |bp| bp.per_view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Running,
    Destroyed,
}

/// Looping, auto-advancing slideshow with the current slide centered over a fixed number of slides
#[derive(Debug)]
pub struct AutoplayEngine {
    generation: u64,
    slide_count: usize,
    current: usize,
    per_view: usize,
    options: EngineOptions,
    state: EngineState,
}

impl AutoplayEngine {
    /// Start a new engine over `slide_count` slides at slide 0
    pub fn mount(
        generation: u64,
        slide_count: usize,
        options: EngineOptions,
        width: f32,
    ) -> Result<Self, CarouselError> {
        if slide_count == 0 {
            return Err(CarouselError::EmptySlides);
        }

        let per_view = options.per_view_at(width);
        tracing::debug!(
            "Mounted carousel #{} with {} slides, {} per view",
            generation,
            slide_count,
            per_view
        );

        Ok(Self {
            generation,
            slide_count,
            current: 0,
            per_view,
            options,
            state: EngineState::Running,
        })
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> usize {
        self.current
    }

    #[cfg(test)]
    pub fn per_view(&self) -> usize {
        self.per_view
    }

    pub fn autoplay(&self) -> Duration {
        self.options.autoplay
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Move to the next slide, wrapping back to the first after the last
    pub fn advance(&mut self) {
        if self.is_running() {
            self.current = (self.current + 1) % self.slide_count;
        }
    }

    /// Recompute slides per view after the window was resized
    pub fn resize(&mut self, width: f32) {
        let per_view = self.options.per_view_at(width);
        if per_view != self.per_view {
            tracing::debug!("Carousel now shows {} per view at {}px", per_view, width);
            self.per_view = per_view;
        }
    }

    /// Indices of the slides on screen, left to right.
    ///
    /// Never longer than the slide count, so a short list is not padded with
    /// repeats. The current slide sits in the middle slot (left of middle for
    /// even counts).
    pub fn visible(&self) -> Vec<usize> {
        let count = self.per_view.min(self.slide_count);
        let before = (count - 1) / 2;

        let start = self.current + self.slide_count - before;
        (0..count).map(|k| (start + k) % self.slide_count).collect()
    }
}

impl Slideshow for AutoplayEngine {
    fn destroy(&mut self) -> Result<(), CarouselError> {
        if self.state == EngineState::Destroyed {
            return Err(CarouselError::AlreadyDestroyed);
        }
        self.state = EngineState::Destroyed;
        tracing::debug!("Destroyed carousel #{}", self.generation);
        Ok(())
    }
}
