pub mod error;
pub mod exclusions;
pub mod natural_order;
pub mod scanner;

use serde::{Deserialize, Serialize};

/// One gallery card: a category or `category/subfolder` that directly holds
/// preview images.
///
/// The serialized field names are the wire format consumed by the browser UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    /// The folder's own name (the category name for a category self-entry).
    pub name: String,
    /// `category/file` or `category/subfolder/file`, always `/` separated.
    pub images: Vec<String>,
    /// The top-level folder this entry belongs to.
    pub category: String,
    pub photo_count: usize,
    /// All non-directory items anywhere below the entry's folder.
    pub file_count: usize,
}

pub use error::ScanError;
pub use exclusions::ExclusionSet;
pub use natural_order::{NameCollator, NaturalCollator};
pub use scanner::{Indexer, IndexerOptions, UnreadablePolicy};
