/// Breeds the user has picked, in the order they were picked.
///
/// Never holds the same name twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedBreeds {
    names: Vec<String>,
}

impl SelectedBreeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Append `name` unless already present. Returns whether it was added.
    pub fn add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Remove `name` if present. Returns whether anything changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for SelectedBreeds {
    /// Build from a list, dropping repeats after the first occurrence
    fn from(list: Vec<String>) -> Self {
        let mut selected = Self::new();
        for name in &list {
            selected.add(name);
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order_and_rejects_duplicates() {
        let mut s = SelectedBreeds::new();
        assert!(s.add("poodle"));
        assert!(s.add("bulldog"));
        assert!(!s.add("poodle"));
        assert_eq!(s.as_slice(), ["poodle", "bulldog"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut s = SelectedBreeds::from(vec!["poodle".to_string()]);
        assert!(!s.remove("beagle"));
        assert_eq!(s.as_slice(), ["poodle"]);
    }

    #[test]
    fn test_remove_present() {
        let mut s = SelectedBreeds::from(vec!["poodle".to_string(), "bulldog".to_string()]);
        assert!(s.remove("poodle"));
        assert_eq!(s.as_slice(), ["bulldog"]);
        assert!(s.remove("bulldog"));
        assert!(s.is_empty());
    }

    #[test]
    fn test_from_vec_dedups() {
        let s = SelectedBreeds::from(vec![
            "pug".to_string(),
            "pug".to_string(),
            "husky".to_string(),
        ]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.to_vec(), vec!["pug", "husky"]);
    }
}
