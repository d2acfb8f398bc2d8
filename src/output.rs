//! CLI output formatting.
//!
//! Each command has a `format_*` function that returns lines (pure, no I/O,
//! testable) and a `print_*` wrapper that writes them out. Regular output goes
//! to stdout; warnings go to stderr.
//!
//! ## Resolve
//!
//! ```text
//! Widths: 375, 640, 768
//! Sizes:  (min-width: 1536px) 50vw, ..., 100vw
//! ```
//!
//! ## Scan
//!
//! ```text
//! 001 hero.jpg (1600x900)
//!     Preset: hero
//!     Widths: 375, 640, 768, 1024, 1280, 1536
//! 002 logos/acme.png (400x200)
//!     Preset: logo
//!     Widths: 375
//!     Warning: unknown preset 'logos'
//!
//! Scanned 2 images (1 with warnings)
//! ```

use crate::resolver::{Resolution, ResolveError, Resolver, sizes_hint};
use crate::scan::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn format_widths(widths: &[u32]) -> String {
    if widths.is_empty() {
        "none (source is narrower than every candidate)".to_string()
    } else {
        widths
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn format_resolution(resolution: &Resolution) -> Vec<String> {
    vec![
        format!("Widths: {}", format_widths(&resolution.widths)),
        format!("Sizes:  {}", resolution.sizes),
    ]
}

pub fn format_warning(context: &str, error: &ResolveError) -> String {
    format!("warning: {context}: {error}")
}

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in manifest.images.iter().enumerate() {
        let (w, h) = entry.dimensions;
        lines.push(format!(
            "{} {} ({}x{})",
            format_index(i + 1),
            entry.source_path,
            w,
            h
        ));
        lines.push(format!("{}Preset: {}", indent(1), entry.preset));
        lines.push(format!(
            "{}Widths: {}",
            indent(1),
            format_widths(&entry.resolution.widths)
        ));
        for warning in &entry.warnings {
            lines.push(format!("{}Warning: {}", indent(1), warning));
        }
    }

    lines.push(String::new());
    let count = manifest.images.len();
    let noun = if count == 1 { "image" } else { "images" };
    match manifest.warning_count() {
        0 => lines.push(format!("Scanned {count} {noun}")),
        n => lines.push(format!("Scanned {count} {noun} ({n} with warnings)")),
    }
    lines
}

/// One line per preset: name, then its sizes hint.
pub fn format_presets(resolver: &Resolver) -> Vec<String> {
    let presets = resolver.presets();
    let names = presets.names();
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    names
        .iter()
        .filter_map(|name| {
            presets
                .get(name)
                .map(|table| format!("{name:<width$}  {}", sizes_hint(&table)))
        })
        .collect()
}

pub fn print_resolution(resolution: &Resolution) {
    for line in format_resolution(resolution) {
        println!("{}", line);
    }
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

pub fn print_presets(resolver: &Resolver) {
    for line in format_presets(resolver) {
        println!("{}", line);
    }
}

pub fn print_warning(context: &str, error: &ResolveError) {
    eprintln!("{}", format_warning(context, error));
}
