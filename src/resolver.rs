//! The responsive size resolver.
//!
//! Given an image's intrinsic width and a layout intent, produces the two
//! values a responsive `<img>` needs:
//!
//! - **widths**: the candidate render widths offered in `srcset`, never wider
//!   than the source image;
//! - **sizes**: the media-conditioned hint telling the browser how wide the
//!   image will render at each breakpoint.
//!
//! ## Sizes resolution order
//!
//! 1. An explicit, non-empty `sizes` string is used verbatim.
//! 2. A named preset is used unmodified; overrides are ignored.
//! 3. Overrides are applied on top of `full`.
//! 4. Otherwise `full`.
//!
//! The hint lists breakpoints largest first, then a default clause using the
//! `xs` size:
//!
//! ```text
//! (min-width: 1536px) 50vw, (min-width: 1280px) 50vw, ..., (min-width: 375px) 100vw, 100vw
//! ```
//!
//! ## Errors and fallback
//!
//! [`Resolver::resolve`] is strict and reports [`ResolveError`]s. Rendering
//! paths use [`Resolver::resolve_or_fallback`], which always produces a
//! resolution (the `full` preset, no widths for a zero-width image) and hands
//! the errors back for reporting.

use crate::breakpoint::Breakpoint;
use crate::config::SiteConfig;
use crate::preset::{Overrides, Preset, PresetError, PresetRegistry, SizeTable};
use crate::size::SizeValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid image width: intrinsic width must be greater than zero")]
    InvalidDimension,
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Intrinsic dimensions of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub width: u32,
    /// Only used for `width`/`height` attributes when rendering.
    pub height: Option<u32>,
}

impl ImageDescriptor {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            height: None,
        }
    }

    pub fn with_height(width: u32, height: u32) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }
}

/// What the caller wants for one image. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveRequest {
    pub preset: Option<String>,
    pub widths: Option<Vec<u32>>,
    pub sizes: Option<String>,
    pub overrides: Option<Overrides>,
}

impl ResolveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preset(mut self, name: impl Into<String>) -> Self {
        self.preset = Some(name.into());
        self
    }

    pub fn widths(mut self, widths: Vec<u32>) -> Self {
        self.widths = Some(widths);
        self
    }

    pub fn sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    /// Override one breakpoint. Only takes effect when no preset is named.
    pub fn set(mut self, bp: Breakpoint, size: SizeValue) -> Self {
        self.overrides.get_or_insert_with(Overrides::new).insert(bp, size);
        self
    }

    fn explicit_sizes(&self) -> Option<&str> {
        self.sizes.as_deref().filter(|s| !s.is_empty())
    }
}

/// Candidate widths and sizes hint for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub widths: Vec<u32>,
    pub sizes: String,
}

/// A resolution that always succeeded, with whatever went wrong on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub resolution: Resolution,
    pub errors: Vec<ResolveError>,
}

impl ResolveOutcome {
    pub fn is_fallback(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Filter candidate widths down to those the source can serve.
///
/// Drops duplicates and widths above `intrinsic_width`, and sorts ascending.
/// The result is empty when every candidate is too large; callers that need
/// at least one width must check for that themselves.
pub fn candidate_widths(intrinsic_width: u32, widths: &[u32]) -> Vec<u32> {
    let mut valid: Vec<u32> = widths
        .iter()
        .copied()
        .filter(|&w| w <= intrinsic_width)
        .collect();
    valid.sort_unstable();
    valid.dedup();
    valid
}

/// Render a size table as a `sizes` hint.
pub fn sizes_hint(table: &SizeTable) -> String {
    Breakpoint::descending()
        .map(|bp| format!("(min-width: {}px) {}", bp.threshold(), table.get(bp)))
        .chain(std::iter::once(table.get(Breakpoint::Xs).to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolves images against a preset registry and default candidate widths.
#[derive(Debug, Clone)]
pub struct Resolver {
    presets: PresetRegistry,
    default_widths: Vec<u32>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(PresetRegistry::builtin(), Breakpoint::thresholds())
    }
}

impl Resolver {
    pub fn new(presets: PresetRegistry, default_widths: Vec<u32>) -> Self {
        Self {
            presets,
            default_widths,
        }
    }

    /// Resolver using the custom presets and default widths of a config.
    pub fn from_config(config: &SiteConfig) -> Result<Self, PresetError> {
        let presets = PresetRegistry::from_config(&config.presets)?;
        Ok(Self::new(presets, config.images.widths.clone()))
    }

    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    pub fn default_widths(&self) -> &[u32] {
        &self.default_widths
    }

    /// Pick the size table for a preset name and overrides.
    pub fn size_table(
        &self,
        preset: Option<&str>,
        overrides: Option<&Overrides>,
    ) -> Result<SizeTable, ResolveError> {
        match (preset, overrides) {
            (Some(name), _) => self
                .presets
                .get(name)
                .ok_or_else(|| ResolveError::UnknownPreset(name.to_string())),
            (None, Some(overrides)) => Ok(Preset::Full.table().with_overrides(overrides)),
            (None, None) => Ok(Preset::Full.table()),
        }
    }

    /// Resolve the sizes hint alone.
    pub fn sizes(&self, request: &ResolveRequest) -> Result<String, ResolveError> {
        if let Some(explicit) = request.explicit_sizes() {
            return Ok(explicit.to_string());
        }
        let table = self.size_table(request.preset.as_deref(), request.overrides.as_ref())?;
        Ok(sizes_hint(&table))
    }

    /// Candidate widths for an image, using the default widths unless the request lists its own.
    pub fn widths(&self, image: &ImageDescriptor, request: &ResolveRequest) -> Vec<u32> {
        let requested = request.widths.as_deref().unwrap_or(&self.default_widths);
        candidate_widths(image.width, requested)
    }

    pub fn resolve(
        &self,
        image: &ImageDescriptor,
        request: &ResolveRequest,
    ) -> Result<Resolution, ResolveError> {
        if image.width == 0 {
            return Err(ResolveError::InvalidDimension);
        }
        Ok(Resolution {
            widths: self.widths(image, request),
            sizes: self.sizes(request)?,
        })
    }

    /// Like [`resolve`](Self::resolve), but never fails.
    ///
    /// A zero-width image gets no candidate widths; an unknown preset falls
    /// back to `full`.
    pub fn resolve_or_fallback(
        &self,
        image: &ImageDescriptor,
        request: &ResolveRequest,
    ) -> ResolveOutcome {
        let mut errors = Vec::new();

        let widths = if image.width == 0 {
            errors.push(ResolveError::InvalidDimension);
            Vec::new()
        } else {
            self.widths(image, request)
        };

        let sizes = self.sizes(request).unwrap_or_else(|err| {
            errors.push(err);
            sizes_hint(&Preset::Full.table())
        });

        ResolveOutcome {
            resolution: Resolution { widths, sizes },
            errors,
        }
    }
}
