//! Publish configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Configuration is
//! resolved in three layers, each overriding the one before it:
//!
//! ```text
//! stock defaults  →  website/config.toml  →  command-line overrides
//! ```
//!
//! ## Config File Location
//!
//! Place `config.toml` in the source root. It is never published itself, since
//! only `.html` and `.css` files are copied:
//!
//! ```text
//! website/
//! ├── config.toml              # Optional, overrides stock defaults
//! ├── index.html
//! └── css/
//!     └── style.css
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_url = "https://www.chriskimmel.com/"  # Public base URL (must end in "/")
//! # link_marker = "website"                  # Defaults to the source root's name
//! rewrite_trigger = "parent-directory"       # or "file-extension"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Decides which published files go through the hyperlink rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteTrigger {
    /// Rewrite when the destination's *parent directory* name ends in `.html`.
    ///
    /// This is the historical behavior and the default. Plain `about/index.html`
    /// is copied verbatim; only pages living under a directory such as
    /// `archive.html/` are rewritten.
    #[default]
    ParentDirectory,
    /// Rewrite when the destination file itself ends in `.html`.
    FileExtension,
}

/// Publish configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublishConfig {
    /// Public base URL that replaces the `file://…/<marker>/` prefix of local links.
    pub site_url: String,
    /// Path segment that ends the local prefix of a `file://` link.
    /// When absent, the source root's final path component is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_marker: Option<String>,
    /// Which files get their links rewritten.
    pub rewrite_trigger: RewriteTrigger,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            site_url: "https://www.chriskimmel.com/".to_string(),
            link_marker: None,
            rewrite_trigger: RewriteTrigger::default(),
        }
    }
}

impl PublishConfig {
    /// Validate config values are usable for rewriting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.site_url.starts_with("https://") || self.site_url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "site_url must start with http:// or https:// (got {:?})",
                self.site_url
            )));
        }
        if !self.site_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site_url must end with '/' (got {:?})",
                self.site_url
            )));
        }
        if let Some(marker) = &self.link_marker {
            if marker.is_empty() || marker.contains('/') {
                return Err(ConfigError::Validation(
                    "link_marker must be a single non-empty path segment".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Command-line values that take precedence over `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub site_url: Option<String>,
}

impl ConfigOverrides {
    /// Express the overrides as a sparse TOML table for [`merge_toml`].
    ///
    /// Returns `None` when nothing was overridden.
    pub fn to_toml(&self) -> Option<toml::Value> {
        let mut table = toml::map::Map::new();
        if let Some(url) = &self.site_url {
            table.insert("site_url".to_string(), toml::Value::String(url.clone()));
        }
        if table.is_empty() {
            None
        } else {
            Some(toml::Value::Table(table))
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(PublishConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml` (including when the
/// directory itself is missing). Returns `Err` if the file exists but is invalid.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Fold every present layer onto `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    layers: impl IntoIterator<Item = Option<toml::Value>>,
) -> Result<PublishConfig, ConfigError> {
    let merged = layers.into_iter().flatten().fold(base, merge_toml);
    let config: PublishConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the publish config for a source root.
///
/// Layers `config.toml` over stock defaults, then the CLI overrides on top.
pub fn load_config(
    source_root: &Path,
    overrides: &ConfigOverrides,
) -> Result<PublishConfig, ConfigError> {
    let file_layer = load_raw_config(source_root)?;
    resolve_config(stock_defaults_value(), [file_layer, overrides.to_toml()])
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# sitepub Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the root of the website source directory. It is never
# published (only .html and .css files are copied).
# Unknown keys will cause an error.

# Public base URL. Local links of the form
#   file:///any/local/path/<link_marker>/rest/of/page.html
# become
#   <site_url>rest/of/page.html
# Must start with http:// or https:// and end with "/".
site_url = "https://www.chriskimmel.com/"

# Path segment that marks the end of the local part of a file:// link.
# Defaults to the name of the source directory (e.g. "website").
# link_marker = "website"

# Which files have their links rewritten:
#   "parent-directory"  only pages whose containing directory name ends in
#                       .html (historical behavior)
#   "file-extension"    every .html page
rewrite_trigger = "parent-directory"
"##
}
