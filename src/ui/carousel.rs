//! Auto-advancing image carousel
//!
//! Owns the slideshow engine through an `EngineHandle`. Every new image list
//! tears the old engine down and mounts a fresh one; an empty list leaves the
//! carousel unmounted.

use std::sync::Arc;

use iced::widget::image::Handle;
use iced::task;
use iced::widget::{column, container, row, text, tooltip, Image, Row};
use iced::{time, window, Alignment, ContentFit, Element, Length, Subscription, Task};

use crate::api::DogApi;
use crate::carousel::slides::{alt_text, load_slide};
use crate::carousel::{AutoplayEngine, EngineHandle, EngineOptions, Slide, SlideImage};
use crate::error::GalleryError;

/// Height of every slide in logical pixels
const SLIDE_HEIGHT: f32 = 320.0;

#[derive(Debug, Clone)]
pub enum Message {
    /// Autoplay interval elapsed
    Tick,
    /// Main window width changed
    Resized(f32),
    SlideLoaded {
        generation: u64,
        index: usize,
        result: Result<Handle, Arc<GalleryError>>,
    },
}

pub struct Carousel {
    api: DogApi,
    options: EngineOptions,
    engine: EngineHandle<AutoplayEngine>,
    slides: Vec<Slide>,
    /// Bumped on every rebuild; stale slide loads carry an old value
    generation: u64,
    /// Aborts the slide downloads of the current generation
    loads: Option<task::Handle>,
    width: f32,
}

impl Carousel {
    pub fn new(api: DogApi, options: EngineOptions, width: f32) -> Self {
        Self {
            api,
            options,
            engine: EngineHandle::new(),
            slides: Vec::new(),
            generation: 0,
            loads: None,
            width,
        }
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.engine.is_mounted()
    }

    #[cfg(test)]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    #[cfg(test)]
    pub fn engine(&self) -> Option<&AutoplayEngine> {
        self.engine.get()
    }

    /// Rebuild the slideshow for a new image list and start loading its slides.
    ///
    /// Downloads still running for the previous list are aborted.
    pub fn set_images(&mut self, urls: &[String]) -> Task<Message> {
        if let Some(loads) = self.loads.take() {
            loads.abort();
        }
        self.generation += 1;
        self.slides = urls.iter().cloned().map(Slide::new).collect();

        if urls.is_empty() {
            self.engine.release();
            return Task::none();
        }

        match AutoplayEngine::mount(self.generation, urls.len(), self.options.clone(), self.width) {
            Ok(engine) => self.engine.replace(engine),
            Err(e) => {
                tracing::warn!("Could not mount carousel: {}", e);
                self.engine.release();
                return Task::none();
            }
        }

        let generation = self.generation;
        let loads = self.slides.iter().enumerate().map(|(index, slide)| {
            Task::perform(
                load_slide(self.api.clone(), slide.url.clone()),
                move |result| Message::SlideLoaded {
                    generation,
                    index,
                    result: result.map_err(Arc::new),
                },
            )
        });

        let (task, handle) = Task::batch(loads).abortable();
        self.loads = Some(handle);
        task
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                if let Some(engine) = self.engine.get_mut() {
                    engine.advance();
                }
            }
            Message::Resized(width) => {
                self.width = width;
                if let Some(engine) = self.engine.get_mut() {
                    engine.resize(width);
                }
            }
            Message::SlideLoaded {
                generation,
                index,
                result,
            } => {
                if generation != self.generation {
                    return Task::none();
                }
                let Some(slide) = self.slides.get_mut(index) else {
                    return Task::none();
                };
                slide.image = match result {
                    Ok(handle) => SlideImage::Ready(handle),
                    Err(e) => {
                        tracing::warn!("Could not load {}: {}", slide.url, e);
                        SlideImage::Failed
                    }
                };
            }
        }

        Task::none()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let resize = window::resize_events().map(|(_id, size)| Message::Resized(size.width));

        match self.engine.get() {
            Some(engine) if engine.is_running() => Subscription::batch([
                resize,
                time::every(engine.autoplay()).map(|_| Message::Tick),
            ]),
            _ => resize,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let Some(engine) = self.engine.get() else {
            return container(text("")).height(Length::Fixed(SLIDE_HEIGHT)).into();
        };

        let slides = engine
            .visible()
            .into_iter()
            .filter_map(|index| self.slides.get(index).map(|slide| (index, slide)))
            .map(|(index, slide)| slide_view(index, slide));

        let position = text(format!(
            "{} of {}",
            alt_text(engine.current()),
            self.slides.len()
        ))
        .size(14);

        container(
            column![Row::with_children(slides).spacing(12), position]
                .spacing(8)
                .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .padding(16)
        .style(container::rounded_box)
        .into()
    }
}

/// One slide: the picture once it has loaded, its alt text until then
fn slide_view<'a>(index: usize, slide: &'a Slide) -> Element<'a, Message> {
    let alt = alt_text(index);

    let content: Element<'a, Message> = match &slide.image {
        SlideImage::Ready(handle) => tooltip(
            Image::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(SLIDE_HEIGHT))
                .content_fit(ContentFit::Cover),
            container(text(alt)).padding(4).style(container::rounded_box),
            tooltip::Position::Bottom,
        )
        .into(),
        SlideImage::Loading | SlideImage::Failed => container(text(alt))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(SLIDE_HEIGHT))
            .into(),
    };

    row![content].width(Length::FillPortion(1)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel() -> Carousel {
        let api = DogApi::with_base_url("http://127.0.0.1:9/api").unwrap();
        Carousel::new(api, EngineOptions::default(), 1024.0)
    }

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("http://127.0.0.1:9/{}.jpg", i)).collect()
    }

    fn tiny_handle() -> Handle {
        Handle::from_rgba(1, 1, vec![0u8, 0, 0, 255])
    }

    #[test]
    fn test_starts_unmounted() {
        let c = carousel();
        assert!(!c.is_mounted());
        assert!(c.slides().is_empty());
    }

    #[test]
    fn test_non_empty_list_mounts() {
        let mut c = carousel();
        let _ = c.set_images(&urls(6));

        assert!(c.is_mounted());
        assert_eq!(c.slides().len(), 6);
        assert!(c.slides().iter().all(|s| matches!(s.image, SlideImage::Loading)));
        assert_eq!(c.engine().map(|e| e.per_view()), Some(3));
    }

    #[test]
    fn test_new_list_replaces_engine() {
        let mut c = carousel();
        let _ = c.set_images(&urls(6));
        let first = c.engine().map(|e| e.generation());

        let _ = c.set_images(&urls(4));
        let second = c.engine().map(|e| e.generation());

        assert_ne!(first, second);
        assert_eq!(c.slides().len(), 4);
        assert_eq!(c.engine().map(|e| e.current()), Some(0));
    }

    #[test]
    fn test_empty_list_unmounts() {
        let mut c = carousel();
        let _ = c.set_images(&urls(2));
        let _ = c.set_images(&[]);
        assert!(!c.is_mounted());
        assert!(c.slides().is_empty());
    }

    #[test]
    fn test_new_list_aborts_previous_loads() {
        let mut c = carousel();
        let _ = c.set_images(&urls(3));
        let first = c.loads.clone().unwrap();
        assert!(!first.is_aborted());

        let _ = c.set_images(&urls(2));
        assert!(first.is_aborted());
        assert!(c.loads.as_ref().is_some_and(|h| !h.is_aborted()));
    }

    #[test]
    fn test_empty_list_aborts_loads() {
        let mut c = carousel();
        let _ = c.set_images(&urls(3));
        let first = c.loads.clone().unwrap();

        let _ = c.set_images(&[]);
        assert!(first.is_aborted());
        assert!(c.loads.is_none());
    }

    #[test]
    fn test_tick_advances() {
        let mut c = carousel();
        let _ = c.set_images(&urls(3));
        let _ = c.update(Message::Tick);
        assert_eq!(c.engine().map(|e| e.current()), Some(1));
    }

    #[test]
    fn test_resize_changes_per_view() {
        let mut c = carousel();
        let _ = c.set_images(&urls(6));
        let _ = c.update(Message::Resized(450.0));
        assert_eq!(c.engine().map(|e| e.per_view()), Some(1));

        // width is remembered for the next mount
        let _ = c.set_images(&urls(5));
        assert_eq!(c.engine().map(|e| e.per_view()), Some(1));
    }

    #[test]
    fn test_slide_loaded_for_current_generation() {
        let mut c = carousel();
        let _ = c.set_images(&urls(2));
        let generation = c.engine().map(|e| e.generation()).unwrap();

        let _ = c.update(Message::SlideLoaded {
            generation,
            index: 1,
            result: Ok(tiny_handle()),
        });
        let _ = c.update(Message::SlideLoaded {
            generation,
            index: 0,
            result: Err(Arc::new(GalleryError::Service {
                url: "x".to_string(),
                status: "error".to_string(),
            })),
        });

        assert!(matches!(c.slides()[0].image, SlideImage::Failed));
        assert!(matches!(c.slides()[1].image, SlideImage::Ready(_)));
    }

    #[test]
    fn test_stale_slide_is_ignored() {
        let mut c = carousel();
        let _ = c.set_images(&urls(2));
        let old = c.engine().map(|e| e.generation()).unwrap();
        let _ = c.set_images(&urls(2));

        let _ = c.update(Message::SlideLoaded {
            generation: old,
            index: 0,
            result: Ok(tiny_handle()),
        });

        assert!(matches!(c.slides()[0].image, SlideImage::Loading));
    }
}
