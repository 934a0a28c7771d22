//! Fixed, ordered filter list with cyclic indexing.

use crate::error::CoreError;
use crate::filter::{FilterDefinition, FilterKind};

/// Ordered, non-empty, immutable sequence of filters.
///
/// Order defines swipe adjacency: a forward swipe moves to `index + 1`,
/// a backward swipe to `index - 1`, both wrapping around.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCatalog {
    filters: Vec<FilterDefinition>,
}

impl FilterCatalog {
    /// Build a catalog from `filters`. Fails if the list is empty.
    pub fn new(filters: Vec<FilterDefinition>) -> Result<Self, CoreError> {
        if filters.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Ok(Self { filters })
    }

    /// Grayscale, Sepia, Invert, Brightness Up.
    pub fn builtin() -> Self {
        Self {
            filters: [
                FilterKind::Grayscale,
                FilterKind::Sepia,
                FilterKind::Invert,
                FilterKind::BrightnessUp,
            ]
            .into_iter()
            .map(FilterDefinition::from)
            .collect(),
        }
    }

    /// Filter at `index mod len`. Never fails.
    pub fn get(&self, index: usize) -> &FilterDefinition {
        &self.filters[index % self.filters.len()]
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index % self.len() + 1) % self.len()
    }

    pub fn prev_index(&self, index: usize) -> usize {
        (index % self.len() + self.len() - 1) % self.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDefinition> {
        self.filters.iter()
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            FilterCatalog::new(Vec::new()),
            Err(CoreError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_builtin_order() {
        let catalog = FilterCatalog::builtin();
        let kinds: Vec<FilterKind> = catalog.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            [
                FilterKind::Grayscale,
                FilterKind::Sepia,
                FilterKind::Invert,
                FilterKind::BrightnessUp
            ]
        );
        assert_eq!(catalog.get(0).name, "Grayscale");
    }

    #[test]
    fn test_get_wraps() {
        let catalog = FilterCatalog::builtin();
        assert_eq!(catalog.get(4), catalog.get(0));
        assert_eq!(catalog.get(7).kind, FilterKind::BrightnessUp);
    }

    #[test]
    fn test_prev_from_zero_wraps_to_last() {
        let catalog = FilterCatalog::builtin();
        assert_eq!(catalog.prev_index(0), 3);
        assert_eq!(catalog.next_index(3), 0);
    }

    #[test]
    fn test_single_filter_cycles_onto_itself() {
        let catalog = FilterCatalog::new(vec![FilterKind::Invert.into()]).unwrap();
        assert_eq!(catalog.next_index(0), 0);
        assert_eq!(catalog.prev_index(0), 0);
    }
}
