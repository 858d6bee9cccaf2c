//! Defines the shared, read-only state handed to every request handler.

use super::error::ApiError;
use crate::core::{GalleryEntry, Indexer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Holds the configuration fixed at startup.
///
/// Cloned into each handler by axum; nothing in here changes after the
/// server starts, so no locking is involved.
#[derive(Clone)]
pub struct AppState {
    base_dir: Arc<PathBuf>,
    indexer: Arc<Indexer>,
}

impl AppState {
    pub fn new(base_dir: PathBuf, indexer: Indexer) -> Self {
        Self {
            base_dir: Arc::new(base_dir),
            indexer: Arc::new(indexer),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Runs a fresh scan on the blocking pool so the async workers stay free.
    pub async fn scan(&self) -> Result<Vec<GalleryEntry>, ApiError> {
        let indexer = self.indexer.clone();
        let base_dir = self.base_dir.clone();
        let entries = tokio::task::spawn_blocking(move || indexer.scan(&base_dir)).await??;
        Ok(entries)
    }
}
