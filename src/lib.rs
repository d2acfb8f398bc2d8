//! # simple-srcset
//!
//! Responsive image attributes for static sites. Given an image's intrinsic
//! width and a layout intent, computes the candidate widths for `srcset` and
//! the media-conditioned `sizes` hint, so the browser can pick a right-sized
//! file before layout.
//!
//! ```
//! use simple_srcset::resolver::{ImageDescriptor, ResolveRequest, Resolver};
//!
//! let resolver = Resolver::default();
//! let res = resolver
//!     .resolve(&ImageDescriptor::new(500), &ResolveRequest::new().preset("half"))
//!     .unwrap();
//! assert_eq!(res.widths, vec![375]);
//! assert!(res.sizes.starts_with("(min-width: 1536px) 50vw"));
//! assert!(res.sizes.ends_with(", 100vw"));
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`breakpoint`] | Breakpoint table: `xs` (375px) through `2xl` (1536px) |
//! | [`size`] | [`SizeValue`](size::SizeValue): viewport percent or fixed pixels |
//! | [`preset`] | Complete per-breakpoint size tables and the preset registry |
//! | [`resolver`] | Width filtering, sizes hint generation, fallback resolution |
//! | [`config`] | Hierarchical `config.toml` loading, validation, and merging |
//! | [`scan`] | Walks an asset directory into a resolved JSON manifest |
//! | [`render`] | Maud rendering of `<img srcset sizes>` |
//! | [`tabs`] | Tab panel with mobile accordion, a consumer of the resolver |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Tagged Sizes
//!
//! Preset tables used to store bare numbers where anything above 100 meant
//! pixels. That rule survives only at the edges (config files, the
//! [`from_legacy`](size::SizeValue::from_legacy) constructor); everything
//! past parsing carries `Percent` or `Pixels` explicitly, and exactly 100 is
//! always `100vw`.
//!
//! ## Complete Tables by Construction
//!
//! A [`SizeTable`](preset::SizeTable) is an array indexed by breakpoint, so a
//! built-in preset cannot miss a breakpoint. Custom presets from config are
//! checked once when the config loads and rejected if incomplete.
//!
//! ## Strict Core, Forgiving Rendering
//!
//! [`Resolver::resolve`](resolver::Resolver::resolve) reports invalid widths
//! and unknown presets as errors. Rendering paths (scan, tab panels) use
//! [`resolve_or_fallback`](resolver::Resolver::resolve_or_fallback) instead,
//! so one bad image degrades to the `full` preset and a warning rather than a
//! failed build.
//!
//! ## No Image Encoding
//!
//! The crate only reads image headers. Producing the variant files named in
//! `srcset` is the asset pipeline's job; `images.url_pattern` describes how
//! they are named.

pub mod breakpoint;
pub mod config;
pub mod output;
pub mod preset;
pub mod render;
pub mod resolver;
pub mod scan;
pub mod size;
pub mod tabs;

#[cfg(test)]
pub(crate) mod test_helpers;
