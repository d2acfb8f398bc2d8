//! Shared test utilities.
//!
//! Builds small asset trees out of generated PNGs so scan tests exercise real
//! image headers without checked-in binary fixtures.
//!
//! ```text
//! <tmp>/
//! ├── hero.png            1300x650
//! ├── team/alice.png      800x1000
//! └── logos/
//!     ├── config.toml     default_preset = "logo"
//!     └── acme.png        400x200
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::scan::{ImageEntry, Manifest};

/// Write a blank PNG of the given size at `root/rel`, creating parent directories.
pub fn write_png(root: &Path, rel: &str, width: u32, height: u32) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::new(width, height).save(&path).unwrap();
    path
}

/// The standard asset tree described in the module docs.
pub fn setup_assets() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_png(tmp.path(), "hero.png", 1300, 650);
    write_png(tmp.path(), "team/alice.png", 800, 1000);
    write_png(tmp.path(), "logos/acme.png", 400, 200);
    fs::write(
        tmp.path().join("logos/config.toml"),
        "[images]\ndefault_preset = \"logo\"\n",
    )
    .unwrap();
    tmp
}

/// Find a manifest entry by its relative source path. Panics if missing.
pub fn find_entry<'a>(manifest: &'a Manifest, source_path: &str) -> &'a ImageEntry {
    manifest
        .images
        .iter()
        .find(|e| e.source_path == source_path)
        .unwrap_or_else(|| {
            panic!(
                "no entry '{}' in {:?}",
                source_path,
                source_paths(manifest)
            )
        })
}

pub fn source_paths(manifest: &Manifest) -> Vec<&str> {
    manifest
        .images
        .iter()
        .map(|e| e.source_path.as_str())
        .collect()
}
