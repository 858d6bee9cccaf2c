//! Command-line overrides layered on top of the persisted configuration.

use crate::config::AppConfig;
use crate::core::UnreadablePolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "folder-gallery",
    version,
    about = "Browse preview images of category/model folders in the browser"
)]
pub struct Cli {
    /// Folder whose subfolders are the gallery categories [default: current dir]
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    #[arg(short, long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub host: Option<String>,

    /// Image extension to look for, e.g. `webp` or `.png`
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Top-level folder to leave out; repeat to exclude several (replaces the configured set)
    #[arg(long = "exclude", value_name = "NAME")]
    pub excluded: Vec<String>,

    /// Leave out unreadable folders instead of failing the scan
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Config file to use instead of the platform default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the scan result as JSON and exit instead of starting the server
    #[arg(long)]
    pub print: bool,
}

impl Cli {
    /// Applies every flag that was given; unset flags keep the config value.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.base_dir {
            config.base_directory = Some(dir.clone());
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(ext) = &self.extension {
            config.image_extension = ext.clone();
        }
        if !self.excluded.is_empty() {
            config.excluded_folders = self.excluded.iter().cloned().collect();
        }
        if self.skip_unreadable {
            config.unreadable_policy = UnreadablePolicy::Skip;
        }
    }
}
