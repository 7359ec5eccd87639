//! The breed catalog and suggestion matching

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;

/// A breed and its sub-breeds (often empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breed {
    pub name: String,
    pub sub_breeds: Vec<String>,
}

/// Every breed the service knows about, in the order it listed them.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedCatalog {
    breeds: Vec<Breed>,
}

impl BreedCatalog {
    #[cfg(test)]
    pub fn new(breeds: Vec<Breed>) -> Self {
        Self { breeds }
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    /// Total sub-breeds across every breed
    pub fn sub_breed_count(&self) -> usize {
        self.breeds.iter().map(|b| b.sub_breeds.len()).sum()
    }

    /// Breed names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.breeds.iter().map(|b| b.name.as_str())
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Breed> {
        self.breeds.iter().find(|b| b.name == name)
    }

    /// The first `limit` breed names containing `input`, ignoring case.
    ///
    /// Empty input means no suggestions at all, not every breed.
    pub fn suggestions(&self, input: &str, limit: usize) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }

        let needle = input.to_lowercase();
        self.names()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(limit)
            .map(str::to_string)
            .collect()
    }
}

// The service sends a JSON object keyed by breed name. Collect it through a
// visitor so the key order survives; a HashMap would scramble it.
impl<'de> Deserialize<'de> for BreedCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = BreedCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of breed names to sub-breed lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut breeds = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, sub_breeds)) = map.next_entry::<String, Vec<String>>()? {
                    breeds.push(Breed { name, sub_breeds });
                }
                Ok(BreedCatalog { breeds })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
