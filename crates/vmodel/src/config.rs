//! # Configuration
//!
//! Per-model options are plain data ([`ModelOptions`]) that can be built in
//! code or loaded by [`clapfig`] from a `vmodel.toml`, layered with
//! environment variables.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `VMODEL__SAVE_URL`, `VMODEL__COMMIT_ON_SAVE`.
//! 2. **Config files**: every `vmodel.toml` found in the given directories,
//!    merged so later directories override earlier ones.
//! 3. **Compiled Defaults**: `#[config(default = ...)]` below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `save_url` | `""` | Endpoint handed to the save transport. Empty disables saving. |
//! | `commit_on_save` | `true` | Adopt current values as originals after a successful save. |

use clapfig::{Clapfig, SearchMode, SearchPath};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Options for a model instance, stored in `vmodel.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelOptions {
    /// Where `save` sends the payload. Empty means the model is not persistable.
    #[config(default = "")]
    pub save_url: String,

    /// Clear the change set after a successful save.
    #[config(default = true)]
    pub commit_on_save: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            save_url: String::new(),
            commit_on_save: true,
        }
    }
}

impl ModelOptions {
    pub fn with_save_url(url: impl Into<String>) -> Self {
        Self {
            save_url: url.into(),
            ..Default::default()
        }
    }

    /// The save endpoint, if one is configured.
    pub fn save_url(&self) -> Option<&str> {
        let url = self.save_url.trim();
        (!url.is_empty()).then_some(url)
    }

    /// Load options from `vmodel.toml` in each of `dirs`, merged in order.
    ///
    /// Falls back to defaults when nothing is found or a file fails to parse.
    pub fn load(dirs: &[PathBuf]) -> Self {
        let search_paths = dirs.iter().cloned().map(SearchPath::Path).collect();
        match Clapfig::builder::<ModelOptions>()
            .app_name("vmodel")
            .file_name("vmodel.toml")
            .search_paths(search_paths)
            .search_mode(SearchMode::Merge)
            .load()
        {
            Ok(options) => options,
            Err(err) => {
                debug!(error = %err, "falling back to default model options");
                Self::default()
            }
        }
    }
}
