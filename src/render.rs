//! HTML rendering of responsive images.
//!
//! Turns a [`Resolution`] into the two responsive-image attributes:
//!
//! - `srcset`: `"hero-375.jpg 375w, hero-640.jpg 640w"` (one candidate per width)
//! - `sizes`: the hint string, passed through unchanged
//!
//! Variant URLs come from the `images.url_pattern` config value, expanded
//! relative to the source image's directory. The files themselves are produced
//! by whatever asset pipeline serves the site.
//!
//! Uses [maud](https://maud.lambda.xyz/), so all attribute values are escaped.

use crate::config::Loading;
use crate::resolver::{ImageDescriptor, Resolution};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One `srcset` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcsetCandidate {
    pub url: String,
    pub width: u32,
}

/// Split a `/`-separated source path into `(directory prefix, stem, extension)`.
///
/// The prefix keeps its trailing slash, or is empty for top-level files.
///
/// ```
/// # use simple_srcset::render::split_source;
/// assert_eq!(split_source("logos/acme.png"), ("logos/", "acme", "png"));
/// assert_eq!(split_source("hero.jpg"), ("", "hero", "jpg"));
/// ```
pub fn split_source(source: &str) -> (&str, &str, &str) {
    let (dir, file) = match source.rfind('/') {
        Some(pos) => source.split_at(pos + 1),
        None => ("", source),
    };
    let path = Path::new(file);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(file);
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    (dir, stem, ext)
}

/// Expand a URL pattern for one width.
pub fn expand_pattern(pattern: &str, stem: &str, width: u32, ext: &str) -> String {
    pattern
        .replace("{stem}", stem)
        .replace("{width}", &width.to_string())
        .replace("{ext}", ext)
}

/// Build the `srcset` candidates for a source path.
pub fn srcset_candidates(source: &str, widths: &[u32], pattern: &str) -> Vec<SrcsetCandidate> {
    let (dir, stem, ext) = split_source(source);
    widths
        .iter()
        .map(|&width| SrcsetCandidate {
            url: format!("{dir}{}", expand_pattern(pattern, stem, width, ext)),
            width,
        })
        .collect()
}

/// Serialize candidates as a `srcset` attribute value.
pub fn srcset_attr(candidates: &[SrcsetCandidate]) -> String {
    candidates
        .iter()
        .map(|c| format!("{} {}w", c.url, c.width))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything needed to render one `<img>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveImage {
    /// Original source, used as `src` when no candidate fits.
    pub source: String,
    pub alt: String,
    pub image: ImageDescriptor,
    pub candidates: Vec<SrcsetCandidate>,
    pub sizes: String,
    pub loading: Loading,
}

impl ResponsiveImage {
    pub fn new(
        source: &str,
        alt: &str,
        image: ImageDescriptor,
        resolution: &Resolution,
        pattern: &str,
        loading: Loading,
    ) -> Self {
        Self {
            source: source.to_string(),
            alt: alt.to_string(),
            image,
            candidates: srcset_candidates(source, &resolution.widths, pattern),
            sizes: resolution.sizes.clone(),
            loading,
        }
    }

    /// Largest candidate, falling back to the original source.
    pub fn src(&self) -> &str {
        self.candidates
            .last()
            .map(|c| c.url.as_str())
            .unwrap_or(&self.source)
    }

    pub fn render(&self) -> Markup {
        let srcset = Some(srcset_attr(&self.candidates)).filter(|s| !s.is_empty());
        let width = Some(self.image.width).filter(|&w| w > 0);
        html! {
            img src=(self.src())
                srcset=[srcset]
                sizes=(self.sizes)
                alt=(self.alt)
                width=[width]
                height=[self.image.height]
                loading=(self.loading.as_str())
                decoding="async";
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(widths: &[u32]) -> Resolution {
        Resolution {
            widths: widths.to_vec(),
            sizes: "(min-width: 768px) 50vw, 100vw".to_string(),
        }
    }

    #[test]
    fn split_source_nested() {
        assert_eq!(split_source("a/b/photo.final.webp"), ("a/b/", "photo.final", "webp"));
    }

    #[test]
    fn split_source_without_extension() {
        assert_eq!(split_source("raw"), ("", "raw", ""));
    }

    #[test]
    fn expand_default_pattern() {
        assert_eq!(
            expand_pattern("{stem}-{width}.{ext}", "hero", 640, "jpg"),
            "hero-640.jpg"
        );
        assert_eq!(
            expand_pattern("w{width}/{stem}.avif", "hero", 640, "jpg"),
            "w640/hero.avif"
        );
    }

    #[test]
    fn candidates_keep_directory() {
        let c = srcset_candidates("logos/acme.png", &[150, 300], "{stem}-{width}.{ext}");
        assert_eq!(c[0].url, "logos/acme-150.png");
        assert_eq!(c[1].url, "logos/acme-300.png");
        assert_eq!(
            srcset_attr(&c),
            "logos/acme-150.png 150w, logos/acme-300.png 300w"
        );
    }

    #[test]
    fn img_has_srcset_and_sizes() {
        let img = ResponsiveImage::new(
            "hero.jpg",
            "A hero",
            ImageDescriptor::with_height(1000, 500),
            &resolution(&[375, 640]),
            "{stem}-{width}.{ext}",
            Loading::Lazy,
        );
        let html = img.render().into_string();
        assert!(html.contains(r#"src="hero-640.jpg""#));
        assert!(html.contains(r#"srcset="hero-375.jpg 375w, hero-640.jpg 640w""#));
        assert!(html.contains(r#"sizes="(min-width: 768px) 50vw, 100vw""#));
        assert!(html.contains(r#"width="1000""#));
        assert!(html.contains(r#"height="500""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn img_without_candidates_uses_source() {
        let img = ResponsiveImage::new(
            "tiny.png",
            "",
            ImageDescriptor::new(200),
            &resolution(&[]),
            "{stem}-{width}.{ext}",
            Loading::Eager,
        );
        let html = img.render().into_string();
        assert!(html.contains(r#"src="tiny.png""#));
        assert!(!html.contains("srcset="));
        assert!(!html.contains("height="));
        assert!(html.contains(r#"loading="eager""#));
    }

    #[test]
    fn img_escapes_alt() {
        let img = ResponsiveImage::new(
            "x.jpg",
            "\"><script>alert(1)</script>",
            ImageDescriptor::new(400),
            &resolution(&[375]),
            "{stem}-{width}.{ext}",
            Loading::Lazy,
        );
        let html = img.render().into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
