//! Narrows a scan result down to what the gallery view asked for.
//!
//! The browser UI filters client-side too; these helpers let API callers
//! request the same view directly with `?category=` and `?search=`.

use crate::core::GalleryEntry;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct EntryFilter {
    /// Exact category name. Empty means every category.
    pub category: Option<String>,
    /// Case-insensitive substring of the entry name. Empty means no search.
    pub search: Option<String>,
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        self.category().is_none() && self.search().is_none()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn matches(&self, entry: &GalleryEntry) -> bool {
        let category_ok = self.category().map_or(true, |c| entry.category == c);
        let search_ok = self.search().map_or(true, |s| {
            entry.name.to_lowercase().contains(&s.to_lowercase())
        });
        category_ok && search_ok
    }

    /// Keeps the matching entries in their original scan order.
    pub fn apply(&self, entries: Vec<GalleryEntry>) -> Vec<GalleryEntry> {
        if self.is_empty() {
            return entries;
        }
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct category names in the order they first appear.
pub fn categories(entries: &[GalleryEntry]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for entry in entries {
        if !seen.contains(&entry.category) {
            seen.push(entry.category.clone());
        }
    }
    seen
}
