pub mod settings;

use crate::core::exclusions::DEFAULT_EXCLUDED_FOLDERS;
use crate::core::{ExclusionSet, IndexerOptions, UnreadablePolicy};
use crate::utils::file_detection::{normalize_extension, DEFAULT_IMAGE_EXTENSION};
use crate::web_assets::UI_ASSET_PREFIX;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Folder whose children are the gallery categories. `None` means the
    /// working directory the server was started from.
    pub base_directory: Option<PathBuf>,
    pub excluded_folders: HashSet<String>,
    pub image_extension: String,
    pub host: String,
    pub port: u16,
    pub unreadable_policy: UnreadablePolicy,
}

impl AppConfig {
    /// Reads the config file; a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        settings::load_config(path)
    }

    /// Reads the config file, writing the defaults first if there is none.
    pub fn load_or_create(path: Option<&Path>) -> Result<Self> {
        settings::load_or_create_config(path)
    }

    /// Resolves the base directory, falling back to the current directory.
    pub fn resolved_base_directory(&self) -> Result<PathBuf> {
        match &self.base_directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// The fixed scan settings derived from this configuration. The UI asset
    /// folder name is excluded even when the configured set omits it.
    pub fn indexer_options(&self) -> IndexerOptions {
        IndexerOptions {
            excluded: ExclusionSet::new(
                self.excluded_folders
                    .iter()
                    .map(String::as_str)
                    .chain([UI_ASSET_PREFIX]),
            ),
            image_extension: normalize_extension(&self.image_extension),
            unreadable: self.unreadable_policy,
            ..Default::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_directory: None,
            excluded_folders: DEFAULT_EXCLUDED_FOLDERS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            unreadable_policy: UnreadablePolicy::Abort,
        }
    }
}
