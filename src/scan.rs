//! Asset directory scanning and manifest generation.
//!
//! Walks an asset directory, reads the intrinsic dimensions of every image,
//! and resolves each one into candidate widths, a sizes hint, and `srcset`
//! URLs. The result is a [`Manifest`] that the CLI writes as JSON for the
//! site's templates to consume.
//!
//! ## Directory Structure
//!
//! ```text
//! assets/
//! ├── config.toml          # Optional, see [`config`](crate::config)
//! ├── hero.jpg
//! ├── team/
//! │   ├── alice.jpg
//! │   └── bob.jpg
//! └── logos/
//!     ├── config.toml      # e.g. default_preset = "logo"
//!     └── acme.png
//! ```
//!
//! Hidden files and directories (leading `.`) are skipped. Each image uses
//! the config cascaded down to its own directory.
//!
//! ## Parallel Processing
//!
//! Only image headers are decoded. Dimension reads and resolution run in
//! parallel using [rayon](https://docs.rs/rayon); the manifest is ordered by
//! path regardless.
//!
//! ## Fallback
//!
//! An image whose resolution fails (an unknown preset in a hand-edited config,
//! a zero-width header) still gets an entry, resolved with the fallback rules
//! of [`Resolver::resolve_or_fallback`], and the errors are recorded as
//! warnings on the entry.

use crate::config::{self, ConfigError, Loading, SiteConfig};
use crate::preset::PresetError;
use crate::render::{SrcsetCandidate, srcset_candidates};
use crate::resolver::{ImageDescriptor, Resolution, ResolveRequest, Resolver};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),
    #[error("Cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "tif", "tiff"];

/// Scan output: one entry per image, ordered by path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<ImageEntry>,
    /// Root config (subdirectories may override it per image).
    pub config: SiteConfig,
}

impl Manifest {
    pub fn warning_count(&self) -> usize {
        self.images.iter().filter(|i| !i.warnings.is_empty()).count()
    }
}

/// A resolved image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Path relative to the asset root, `/`-separated.
    pub source_path: String,
    /// Intrinsic dimensions (width, height).
    pub dimensions: (u32, u32),
    pub preset: String,
    #[serde(flatten)]
    pub resolution: Resolution,
    pub srcset: Vec<SrcsetCandidate>,
    pub loading: Loading,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ImageEntry {
    pub fn descriptor(&self) -> ImageDescriptor {
        ImageDescriptor::with_height(self.dimensions.0, self.dimensions.1)
    }
}

/// Per-directory settings shared by every image in that directory.
struct DirSettings {
    config: SiteConfig,
    resolver: Resolver,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let files = collect_images(root)?;

    let mut settings: BTreeMap<PathBuf, DirSettings> = BTreeMap::new();
    for file in &files {
        let dir = file.parent().unwrap_or(root).to_path_buf();
        if settings.contains_key(&dir) {
            continue;
        }
        let dir_config = config::load_config_at(root, &dir)?;
        let resolver = Resolver::from_config(&dir_config)?;
        settings.insert(
            dir,
            DirSettings {
                config: dir_config,
                resolver,
            },
        );
    }

    let images = files
        .par_iter()
        .map(|file| {
            let dir = file.parent().unwrap_or(root);
            // Every parent was inserted above
            let dir_settings = &settings[dir];
            scan_image(root, file, dir_settings)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Manifest { images, config })
}

fn scan_image(root: &Path, file: &Path, settings: &DirSettings) -> Result<ImageEntry, ScanError> {
    let (width, height) = image::image_dimensions(file).map_err(|source| ScanError::Image {
        path: file.to_path_buf(),
        source,
    })?;

    let images_config = &settings.config.images;
    let request = ResolveRequest::new().preset(images_config.default_preset.clone());
    let outcome = settings
        .resolver
        .resolve_or_fallback(&ImageDescriptor::with_height(width, height), &request);

    let source_path = relative_source_path(root, file);
    let srcset = srcset_candidates(
        &source_path,
        &outcome.resolution.widths,
        &images_config.url_pattern,
    );

    Ok(ImageEntry {
        source_path,
        dimensions: (width, height),
        preset: images_config.default_preset.clone(),
        srcset,
        loading: images_config.loading,
        warnings: outcome.errors.iter().map(ToString::to_string).collect(),
        resolution: outcome.resolution,
    })
}

/// All image files under `root`, sorted by path, hidden entries skipped.
fn collect_images(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_image(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn relative_source_path(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
