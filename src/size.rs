//! Size values for the `sizes` hint.
//!
//! A size is either a share of the viewport width (`50vw`) or a fixed pixel
//! width (`200px`). Preset tables historically stored both as bare numbers,
//! with anything above 100 meaning pixels; [`SizeValue::from_legacy`] keeps
//! that convention available (and config files may still use it), but inside
//! the crate the two cases are always tagged.
//!
//! ```
//! use simple_srcset::size::SizeValue;
//!
//! assert_eq!(SizeValue::from_legacy(100).to_string(), "100vw");
//! assert_eq!(SizeValue::from_legacy(101).to_string(), "101px");
//! assert_eq!("320px".parse::<SizeValue>().unwrap(), SizeValue::Pixels(320));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest bare number that still means a viewport percentage.
pub const LEGACY_PERCENT_MAX: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    #[error("invalid size '{0}' (expected a number, 'Nvw' or 'Npx')")]
    Malformed(String),
    #[error("size must be greater than zero")]
    Zero,
}

/// How wide an image renders at a given breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSize", into = "String")]
pub enum SizeValue {
    /// Percentage of the viewport width, rendered `Nvw`.
    Percent(u32),
    /// Fixed width in CSS pixels, rendered `Npx`.
    Pixels(u32),
}

impl SizeValue {
    /// Interpret a bare number: `n <= 100` is a percentage, anything larger is pixels.
    pub const fn from_legacy(n: u32) -> Self {
        if n > LEGACY_PERCENT_MAX {
            SizeValue::Pixels(n)
        } else {
            SizeValue::Percent(n)
        }
    }

    pub const fn amount(self) -> u32 {
        match self {
            SizeValue::Percent(n) | SizeValue::Pixels(n) => n,
        }
    }

    pub const fn is_pixels(self) -> bool {
        matches!(self, SizeValue::Pixels(_))
    }
}

impl fmt::Display for SizeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeValue::Percent(n) => write!(f, "{n}vw"),
            SizeValue::Pixels(n) => write!(f, "{n}px"),
        }
    }
}

impl FromStr for SizeValue {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let amount = |digits: &str| -> Result<u32, SizeError> {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SizeError::Malformed(s.to_string()));
            }
            match digits.parse::<u32>() {
                Ok(0) => Err(SizeError::Zero),
                Ok(n) => Ok(n),
                Err(_) => Err(SizeError::Malformed(s.to_string())),
            }
        };
        if let Some(digits) = s.strip_suffix("vw") {
            amount(digits).map(SizeValue::Percent)
        } else if let Some(digits) = s.strip_suffix("px") {
            amount(digits).map(SizeValue::Pixels)
        } else {
            amount(s).map(SizeValue::from_legacy)
        }
    }
}

/// Wire form accepted from config files: a bare number or a suffixed string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(u32),
    Text(String),
}

impl TryFrom<RawSize> for SizeValue {
    type Error = SizeError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        match raw {
            RawSize::Number(0) => Err(SizeError::Zero),
            RawSize::Number(n) => Ok(SizeValue::from_legacy(n)),
            RawSize::Text(s) => s.parse(),
        }
    }
}

impl From<SizeValue> for String {
    fn from(value: SizeValue) -> Self {
        value.to_string()
    }
}
