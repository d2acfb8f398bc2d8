//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml` files. Configuration
//! is hierarchical: stock defaults are overridden by a `config.toml` in the
//! asset root, which is in turn overridden by `config.toml` files in
//! subdirectories.
//!
//! ```text
//! assets/
//! ├── config.toml              # Root config (overrides stock defaults)
//! ├── hero.jpg
//! └── logos/
//!     ├── config.toml          # Applies to logos/ and below (overrides root)
//!     └── acme.png
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [images]
//! widths = [375, 640, 768, 1024, 1280, 1536]  # Candidate srcset widths
//! default_preset = "full"                     # Preset for scanned images
//! url_pattern = "{stem}-{width}.{ext}"        # Variant URL in srcset
//! loading = "lazy"                            # <img loading="...">
//!
//! [presets.card]                              # Custom preset
//! xs = 100                                    # Bare numbers: <= 100 is vw, > 100 is px
//! sm = 100
//! md = "50vw"
//! lg = "320px"
//! xl = 320
//! 2xl = 320
//! ```
//!
//! Custom presets must define every breakpoint; an incomplete table is
//! rejected when the config is loaded, not when an image is resolved.
//! Unknown keys are rejected to catch typos early.

use crate::breakpoint::Breakpoint;
use crate::preset::{PresetError, PresetRegistry};
use crate::size::SizeValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid preset: {0}")]
    Preset(#[from] PresetError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Responsive image settings.
    pub images: ImagesConfig,
    /// Custom presets: preset name → breakpoint name → size.
    pub presets: BTreeMap<String, BTreeMap<String, SizeValue>>,
}

impl SiteConfig {
    /// Validate config values and custom preset tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.widths.is_empty() {
            return Err(ConfigError::Validation(
                "images.widths must not be empty".into(),
            ));
        }
        if self.images.widths.contains(&0) {
            return Err(ConfigError::Validation(
                "images.widths values must be non-zero".into(),
            ));
        }
        if !self.images.url_pattern.contains("{width}") {
            return Err(ConfigError::Validation(
                "images.url_pattern must contain {width}".into(),
            ));
        }
        let registry = PresetRegistry::from_config(&self.presets)?;
        if !registry.contains(&self.images.default_preset) {
            return Err(ConfigError::Validation(format!(
                "images.default_preset '{}' is not a known preset",
                self.images.default_preset
            )));
        }
        Ok(())
    }
}

/// Value of the `<img loading>` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    #[default]
    Lazy,
    Eager,
}

impl Loading {
    pub fn as_str(self) -> &'static str {
        match self {
            Loading::Lazy => "lazy",
            Loading::Eager => "eager",
        }
    }
}

/// Responsive image settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Candidate widths offered in `srcset`, before filtering by source width.
    pub widths: Vec<u32>,
    /// Preset applied to scanned images.
    pub default_preset: String,
    /// Variant URL relative to the image's directory.
    /// Placeholders: `{stem}`, `{width}`, `{ext}`.
    pub url_pattern: String,
    pub loading: Loading,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            widths: Breakpoint::thresholds(),
            default_preset: "full".to_string(),
            url_pattern: "{stem}-{width}.{ext}".to_string(),
            loading: Loading::Lazy,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory over stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Load the cascaded config for `dir`, a directory at or below `root`.
///
/// Every `config.toml` from `root` down to `dir` is merged in order. A `dir`
/// outside `root` gets the root config.
pub fn load_config_at(root: &Path, dir: &Path) -> Result<SiteConfig, ConfigError> {
    let mut merged = stock_defaults_value();
    if let Some(raw) = load_raw_config(root)? {
        merged = merge_toml(merged, raw);
    }
    if let Ok(rel) = dir.strip_prefix(root) {
        let mut current = root.to_path_buf();
        for component in rel.components() {
            current.push(component);
            if let Some(raw) = load_raw_config(&current)? {
                merged = merge_toml(merged, raw);
            }
        }
    }
    resolve_config(merged, None)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# simple-srcset configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Config files can be placed in the asset root and in any subdirectory:
#   assets/config.toml        -> root (overrides stock defaults)
#   assets/logos/config.toml  -> applies to logos/ and below (overrides root)
#
# Each level only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Responsive images
# ---------------------------------------------------------------------------
[images]
# Candidate widths for srcset. Widths larger than the source image are dropped.
# Defaults to the breakpoint thresholds (xs..2xl).
widths = [375, 640, 768, 1024, 1280, 1536]

# Preset used for scanned images: full, half, third, logo, hero, content,
# or the name of a custom preset below.
default_preset = "full"

# URL of a generated variant, relative to the source image's directory.
# Placeholders: {stem}, {width}, {ext}.
url_pattern = "{stem}-{width}.{ext}"

# <img loading> attribute: "lazy" or "eager".
loading = "lazy"

# ---------------------------------------------------------------------------
# Custom presets
# ---------------------------------------------------------------------------
# Every preset must define all six breakpoints: xs, sm, md, lg, xl, 2xl.
# Sizes may be "Nvw", "Npx", or a bare number (<= 100 is vw, > 100 is px).
#
# [presets.card]
# xs = 100
# sm = 100
# md = "50vw"
# lg = "320px"
# xl = "320px"
# 2xl = "320px"
"##
}
