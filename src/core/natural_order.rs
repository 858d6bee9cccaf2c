//! Natural, case-insensitive ordering for folder and file names.
//!
//! Every ordering decision the indexer makes (categories, files inside a
//! folder, subfolders) goes through a [`NameCollator`]. The collator is
//! passed in explicitly so tests and callers can swap it without touching
//! any global locale state.

use icu_collator::{Collator, CollatorError, CollatorOptions, Numeric, Strength};
use icu_provider::DataLocale;
use std::cmp::Ordering;
use std::fmt;

/// Compares two names for display order.
///
/// Implementations must be a total order: `compare(a, b) == Equal` only when
/// the two names are interchangeable for sorting purposes.
pub trait NameCollator: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<F> NameCollator for F
where
    F: Fn(&str, &str) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// The default collator.
///
/// Built on the ICU root collation with numeric ordering and primary
/// strength: case and accents are ignored (`Élan` sits with the `e` names),
/// punctuation sorts before digits, and digit runs compare by value
/// (`img2` < `img10`, `01` ties with `1`). Names that are still equal fall
/// back to a plain string comparison so the result never depends on
/// directory listing order.
pub struct NaturalCollator {
    collator: Collator,
}

impl NaturalCollator {
    pub fn new() -> Result<Self, CollatorError> {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Primary);
        options.numeric = Some(Numeric::On);
        let collator = Collator::try_new(&DataLocale::default(), options)?;
        Ok(Self { collator })
    }
}

impl Default for NaturalCollator {
    fn default() -> Self {
        Self::new().expect("Root collation data is compiled into the binary.")
    }
}

impl fmt::Debug for NaturalCollator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaturalCollator").finish_non_exhaustive()
    }
}

impl NameCollator for NaturalCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b).then_with(|| a.cmp(b))
    }
}
