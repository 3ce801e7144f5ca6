//! Bundle configuration loading and default-filling.
//!
//! Configuration lives in a `shellpack.toml` at the project root with four
//! string keys: `name`, `entry`, `scripts`, `version`. A missing file is not
//! an error; every missing or empty key falls back to its default, so a
//! config is always fully populated once loaded.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Config file name expected at the project root.
pub const CONFIG_FILE: &str = "shellpack.toml";

const DEFAULT_NAME: &str = "mytool";
const DEFAULT_ENTRY: &str = "scripts/main.sh";
const DEFAULT_SCRIPTS: &str = "scripts";
const DEFAULT_VERSION: &str = "1.0.0";

/// Bundle configuration.
///
/// Invariant: all four fields are non-empty after [`BundleConfig::load`] or
/// [`Default::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Tool name; names the produced binary and the cache subdirectory
    pub name: String,
    /// Entry script path, relative to the project root
    pub entry: String,
    /// Scripts root directory, relative to the project root
    pub scripts: String,
    /// Human-facing version string; hashed into the cache key
    pub version: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            entry: DEFAULT_ENTRY.to_string(),
            scripts: DEFAULT_SCRIPTS.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl BundleConfig {
    /// Loads `shellpack.toml` from `project_dir`, filling defaults.
    ///
    /// An absent file yields the default configuration. A present but
    /// unreadable or unparseable file is an error.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;

        let mut config: BundleConfig =
            toml::from_str(&data).map_err(|source| Error::ConfigParse {
                path: path.clone(),
                source,
            })?;

        config.fill_defaults();
        Ok(config)
    }

    /// Replaces empty fields with their defaults.
    fn fill_defaults(&mut self) {
        if self.name.is_empty() {
            self.name = DEFAULT_NAME.to_string();
        }
        if self.entry.is_empty() {
            self.entry = DEFAULT_ENTRY.to_string();
        }
        if self.scripts.is_empty() {
            self.scripts = DEFAULT_SCRIPTS.to_string();
        }
        if self.version.is_empty() {
            self.version = DEFAULT_VERSION.to_string();
        }
    }
}
