use iced::widget::{column, container, scrollable, text};
use iced::{Alignment, Element, Length, Size, Subscription, Task, Theme};
use std::sync::Arc;

mod api;
mod carousel;
mod config;
mod error;
mod logger;
mod state;
mod ui;

use api::DogApi;
use config::Settings;
use error::GalleryError;
use state::{BreedCatalog, FetchKind, FetchRequest, FetchTicket, Gallery};
use ui::carousel::Carousel;
use ui::search::{Action, SearchPanel};

/// Initial window size; the carousel lays out against this width until the
/// first resize event arrives
const WINDOW_SIZE: Size = Size::new(1024.0, 760.0);

/// Main application state
struct DogGallery {
    /// Catalog, selection, and current image list
    gallery: Gallery,
    search: SearchPanel,
    carousel: Carousel,
    api: DogApi,
    settings: Settings,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Startup catalog request finished
    CatalogLoaded(Result<BreedCatalog, Arc<GalleryError>>),
    /// An image fetch finished
    ImagesLoaded(FetchTicket, Result<Vec<String>, Arc<GalleryError>>),
    Search(ui::search::Message),
    Carousel(ui::carousel::Message),
}

impl DogGallery {
    /// Create the application and kick off the startup requests
    fn new(settings: Settings, api: DogApi) -> (Self, Task<Message>) {
        let mut gallery = Gallery::new(settings.fetch_ordering);
        let search = SearchPanel::new(settings.suggestion_limit);
        let carousel = Carousel::new(
            api.clone(),
            carousel::EngineOptions::from_settings(&settings),
            WINDOW_SIZE.width,
        );

        let startup = gallery.startup_images(settings.startup_image_count);

        let app = DogGallery {
            gallery,
            search,
            carousel,
            api,
            settings,
        };

        let load_catalog = {
            let api = app.api.clone();
            Task::perform(async move { api.list_breeds().await }, |result| {
                Message::CatalogLoaded(result.map_err(Arc::new))
            })
        };
        let load_images = app.fetch(startup);

        (app, Task::batch([load_catalog, load_images]))
    }

    /// Turn a fetch request into a background task
    fn fetch(&self, request: FetchRequest) -> Task<Message> {
        let client = self.api.clone();
        let ticket = request.ticket;

        match request.kind {
            FetchKind::Random(count) => {
                Task::perform(async move { client.random_images(count).await }, move |result| {
                    Message::ImagesLoaded(ticket, result.map_err(Arc::new))
                })
            }
            FetchKind::Breeds(breeds) => {
                tracing::debug!("Fetching images for {:?}", breeds);
                Task::perform(
                    api::fetch::fetch_breed_images(client, breeds, self.settings.images_per_breed),
                    move |result| Message::ImagesLoaded(ticket, result.map_err(Arc::new)),
                )
            }
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(result) => {
                self.gallery.catalog_loaded(result);
                Task::none()
            }
            Message::ImagesLoaded(ticket, result) => {
                if self.gallery.images_loaded(ticket, result) {
                    return self
                        .carousel
                        .set_images(self.gallery.images())
                        .map(Message::Carousel);
                }
                Task::none()
            }
            Message::Search(message) => {
                let action = self.search.update(
                    message,
                    self.gallery.catalog(),
                    self.gallery.selected(),
                );

                let request = match action {
                    Some(Action::Select(name)) => self.gallery.select(&name),
                    Some(Action::Remove(name)) => Some(self.gallery.remove(&name)),
                    Some(Action::Search) => Some(self.gallery.search()),
                    None => None,
                };

                request.map_or_else(Task::none, |request| self.fetch(request))
            }
            Message::Carousel(message) => self.carousel.update(message).map(Message::Carousel),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let content = column![
            text("Find a Gallery of YOUR Favorite Dogs!").size(36),
            self.search
                .view(self.gallery.selected())
                .map(Message::Search),
            self.carousel.view().map(Message::Carousel),
        ]
        .spacing(20)
        .padding(32)
        .max_width(1200.0)
        .align_x(Alignment::Center);

        scrollable(container(content).center_x(Length::Fill))
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        self.carousel.subscription().map(Message::Carousel)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    let settings = Settings::load();
    let api = DogApi::new(&settings)?;
    tracing::info!("Starting dog gallery against {}", settings.api_base_url);

    iced::application("Dog Gallery", DogGallery::update, DogGallery::view)
        .subscription(DogGallery::subscription)
        .theme(DogGallery::theme)
        .window_size(WINDOW_SIZE)
        .centered()
        .run_with(move || DogGallery::new(settings, api))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_app() -> DogGallery {
        let settings = Settings {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
            ..Settings::default()
        };
        let api = DogApi::new(&settings).unwrap();
        let (app, _startup) = DogGallery::new(settings, api);
        app
    }

    fn search(app: &mut DogGallery, message: ui::search::Message) -> Task<Message> {
        app.update(Message::Search(message))
    }

    #[test]
    fn test_startup_state_is_empty() {
        let app = test_app();
        assert!(app.gallery.catalog().is_empty());
        assert!(app.gallery.selected().is_empty());
        assert!(app.gallery.images().is_empty());
        assert!(!app.carousel.is_mounted());
    }

    #[test]
    fn test_type_and_pick_suggestion() {
        let mut app = test_app();
        let catalog: BreedCatalog =
            serde_json::from_value(json!({"poodle": [], "bulldog": []})).unwrap();
        let _ = app.update(Message::CatalogLoaded(Ok(catalog)));

        let _ = search(&mut app, ui::search::Message::InputChanged("poo".to_string()));
        assert_eq!(app.search.suggestions(), ["poodle"]);

        let _ = search(&mut app, ui::search::Message::SuggestionPicked("poodle".to_string()));
        assert_eq!(app.gallery.selected().as_slice(), ["poodle"]);
        assert_eq!(app.search.input(), "");
        assert!(app.search.suggestions().is_empty());
    }

    #[test]
    fn test_images_loaded_mounts_carousel() {
        let mut app = test_app();
        let request = app.gallery.search();

        let _ = app.update(Message::ImagesLoaded(
            request.ticket,
            Ok(vec!["a.jpg".to_string(), "b.jpg".to_string()]),
        ));

        assert!(app.carousel.is_mounted());
        assert_eq!(app.carousel.slides().len(), 2);
    }

    #[test]
    fn test_failed_fetch_leaves_carousel_alone() {
        let mut app = test_app();
        let first = app.gallery.search();
        let _ = app.update(Message::ImagesLoaded(first.ticket, Ok(vec!["a.jpg".to_string()])));

        let second = app.gallery.select("nonexistent").unwrap();
        let _ = app.update(Message::ImagesLoaded(
            second.ticket,
            Err(Arc::new(GalleryError::Status {
                url: "http://127.0.0.1:9/api/breed/nonexistent/images/random/2".to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            })),
        ));

        assert_eq!(app.gallery.images(), ["a.jpg"]);
        assert_eq!(app.carousel.slides().len(), 1);
    }
}
