use std::sync::Arc;

use super::catalog::BreedCatalog;
use super::selection::SelectedBreeds;
use crate::config::FetchOrdering;
use crate::error::GalleryError;

/// Identifies one image fetch. Later fetches get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What an image fetch should ask the service for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    /// A handful of random images from any breed
    Random(u32),
    /// A fixed number of images for each breed, in order
    Breeds(Vec<String>),
}

/// An image fetch the application should start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub kind: FetchKind,
}

/// Canonical application state: catalog, selection, and images on screen.
///
/// Only this type mutates them. Children see borrowed snapshots and ask for
/// changes through the methods below, which hand back the fetch to start.
#[derive(Debug)]
pub struct Gallery {
    catalog: BreedCatalog,
    selected: SelectedBreeds,
    images: Vec<String>,
    ordering: FetchOrdering,
    /// Ticket of the last fetch handed out
    issued: u64,
    /// Ticket whose results are currently in `images`
    applied: u64,
}

impl Gallery {
    pub fn new(ordering: FetchOrdering) -> Self {
        Self {
            catalog: BreedCatalog::default(),
            selected: SelectedBreeds::new(),
            images: Vec::new(),
            ordering,
            issued: 0,
            applied: 0,
        }
    }

    pub fn catalog(&self) -> &BreedCatalog {
        &self.catalog
    }

    pub fn selected(&self) -> &SelectedBreeds {
        &self.selected
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    fn issue(&mut self, kind: FetchKind) -> FetchRequest {
        self.issued += 1;
        FetchRequest {
            ticket: FetchTicket(self.issued),
            kind,
        }
    }

    fn fetch_selection(&mut self) -> FetchRequest {
        let breeds = self.selected.to_vec();
        self.issue(FetchKind::Breeds(breeds))
    }

    /// The default random images shown at startup
    pub fn startup_images(&mut self, count: u32) -> FetchRequest {
        self.issue(FetchKind::Random(count))
    }

    /// Add a breed to the selection.
    ///
    /// Returns `None` (and changes nothing) when it is already selected.
    pub fn select(&mut self, breed: &str) -> Option<FetchRequest> {
        if !self.selected.add(breed) {
            tracing::debug!("{} is already selected", breed);
            return None;
        }
        tracing::info!("Selected {}", breed);
        Some(self.fetch_selection())
    }

    /// Drop a breed from the selection and refetch for whatever is left
    pub fn remove(&mut self, breed: &str) -> FetchRequest {
        if self.selected.remove(breed) {
            tracing::info!("Removed {}", breed);
        }
        self.fetch_selection()
    }

    /// Refetch for the current selection without changing it
    pub fn search(&mut self) -> FetchRequest {
        self.fetch_selection()
    }

    pub fn catalog_loaded(&mut self, result: Result<BreedCatalog, Arc<GalleryError>>) {
        match result {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} breeds ({} sub-breeds)",
                    catalog.len(),
                    catalog.sub_breed_count()
                );
                self.catalog = catalog;
            }
            Err(e) => tracing::error!("Error fetching dog breeds: {}", e),
        }
    }

    /// Apply the outcome of fetch `ticket`.
    ///
    /// Returns true when the image list was replaced and the carousel needs
    /// rebuilding. Failures and stale responses leave the list untouched.
    pub fn images_loaded(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<String>, Arc<GalleryError>>,
    ) -> bool {
        let images = match result {
            Ok(images) => images,
            Err(e) => {
                tracing::error!("Error fetching dog images: {}", e);
                return false;
            }
        };

        if self.ordering == FetchOrdering::Sequenced && ticket.0 < self.applied {
            tracing::debug!(
                "Discarding images from fetch {} (showing fetch {})",
                ticket.0,
                self.applied
            );
            return false;
        }

        tracing::info!("Showing {} images", images.len());
        self.applied = ticket.0;
        self.images = images;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::Breed;

    fn ok(urls: &[&str]) -> Result<Vec<String>, Arc<GalleryError>> {
        Ok(urls.iter().map(|s| s.to_string()).collect())
    }

    fn not_found() -> Result<Vec<String>, Arc<GalleryError>> {
        Err(Arc::new(GalleryError::Status {
            url: "https://dog.ceo/api/breed/nonexistent/images/random/2".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        }))
    }

    fn breeds(req: &FetchRequest) -> Vec<String> {
        match &req.kind {
            FetchKind::Breeds(b) => b.clone(),
            other => panic!("expected a breed fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_select_fetches_updated_selection() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        let req = g.select("poodle").unwrap();
        assert_eq!(breeds(&req), vec!["poodle"]);
        assert_eq!(g.selected().as_slice(), ["poodle"]);

        let req = g.select("bulldog").unwrap();
        assert_eq!(breeds(&req), vec!["poodle", "bulldog"]);
    }

    #[test]
    fn test_select_twice_is_idempotent() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        g.select("poodle").unwrap();
        assert!(g.select("poodle").is_none());
        assert_eq!(g.selected().len(), 1);
    }

    #[test]
    fn test_remove_fetches_remaining() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        g.select("poodle");
        g.select("bulldog");

        let req = g.remove("poodle");
        assert_eq!(g.selected().as_slice(), ["bulldog"]);
        assert_eq!(breeds(&req), vec!["bulldog"]);
    }

    #[test]
    fn test_remove_absent_keeps_selection() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        g.select("poodle");

        let req = g.remove("beagle");
        assert_eq!(g.selected().as_slice(), ["poodle"]);
        assert_eq!(breeds(&req), vec!["poodle"]);
    }

    #[test]
    fn test_remove_last_requests_empty_fetch() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        g.select("poodle");
        let req = g.remove("poodle");
        assert!(breeds(&req).is_empty());

        assert!(g.images_loaded(req.ticket, ok(&[])));
        assert!(g.images().is_empty());
    }

    #[test]
    fn test_search_keeps_selection() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        g.select("pug");
        let req = g.search();
        assert_eq!(breeds(&req), vec!["pug"]);
        assert_eq!(g.selected().as_slice(), ["pug"]);
    }

    #[test]
    fn test_tickets_increase() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        let a = g.startup_images(6);
        let b = g.search();
        assert!(b.ticket > a.ticket);
        assert_eq!(a.kind, FetchKind::Random(6));
    }

    #[test]
    fn test_failed_fetch_keeps_images() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        let start = g.startup_images(6);
        assert!(g.images_loaded(start.ticket, ok(&["a.jpg", "b.jpg"])));

        let req = g.select("nonexistent").unwrap();
        assert!(!g.images_loaded(req.ticket, not_found()));
        assert_eq!(g.images(), ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_sequenced_drops_stale_response() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        let first = g.select("poodle").unwrap();
        let second = g.select("bulldog").unwrap();

        // second resolves before first
        assert!(g.images_loaded(second.ticket, ok(&["p1", "p2", "b1", "b2"])));
        assert!(!g.images_loaded(first.ticket, ok(&["p3", "p4"])));
        assert_eq!(g.images(), ["p1", "p2", "b1", "b2"]);
    }

    #[test]
    fn test_sequenced_applies_in_order_responses() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        let first = g.select("poodle").unwrap();
        let second = g.select("bulldog").unwrap();

        assert!(g.images_loaded(first.ticket, ok(&["p1", "p2"])));
        assert!(g.images_loaded(second.ticket, ok(&["p1", "p2", "b1", "b2"])));
        assert_eq!(g.images().len(), 4);
    }

    #[test]
    fn test_last_resolved_wins() {
        let mut g = Gallery::new(FetchOrdering::LastResolved);
        let first = g.select("poodle").unwrap();
        let second = g.select("bulldog").unwrap();

        assert!(g.images_loaded(second.ticket, ok(&["p1", "p2", "b1", "b2"])));
        assert!(g.images_loaded(first.ticket, ok(&["p3", "p4"])));
        assert_eq!(g.images(), ["p3", "p4"]);
    }

    #[test]
    fn test_catalog_failure_keeps_previous() {
        let mut g = Gallery::new(FetchOrdering::Sequenced);
        g.catalog_loaded(Ok(BreedCatalog::new(vec![Breed {
            name: "poodle".to_string(),
            sub_breeds: vec![],
        }])));
        g.catalog_loaded(Err(Arc::new(GalleryError::Service {
            url: "https://dog.ceo/api/breeds/list/all".to_string(),
            status: "error".to_string(),
        })));
        assert_eq!(g.catalog().len(), 1);
    }
}
