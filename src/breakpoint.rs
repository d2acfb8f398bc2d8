//! The breakpoint table.
//!
//! Breakpoints mirror the site's CSS scale: each one is a minimum viewport
//! width at which a layout variant starts to apply.
//!
//! | Name  | Min width |
//! |-------|-----------|
//! | `xs`  | 375px     |
//! | `sm`  | 640px     |
//! | `md`  | 768px     |
//! | `lg`  | 1024px    |
//! | `xl`  | 1280px    |
//! | `2xl` | 1536px    |
//!
//! The table is a closed enum so that every per-breakpoint table in
//! [`preset`](crate::preset) can be a fixed-size array indexed by
//! [`Breakpoint::index`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown breakpoint '{0}' (expected one of xs, sm, md, lg, xl, 2xl)")]
pub struct UnknownBreakpoint(pub String);

/// A named minimum-viewport-width threshold.
///
/// Variants are declared in ascending threshold order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    /// Number of breakpoints in the table.
    pub const COUNT: usize = 6;

    /// All breakpoints, smallest threshold first.
    pub const ALL: [Breakpoint; Self::COUNT] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    /// Minimum viewport width in pixels.
    pub const fn threshold(self) -> u32 {
        match self {
            Breakpoint::Xs => 375,
            Breakpoint::Sm => 640,
            Breakpoint::Md => 768,
            Breakpoint::Lg => 1024,
            Breakpoint::Xl => 1280,
            Breakpoint::Xxl => 1536,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }

    /// Position in [`Breakpoint::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// All breakpoints, largest threshold first.
    pub fn descending() -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().rev()
    }

    /// The breakpoint thresholds, ascending. Used as the default candidate widths.
    pub fn thresholds() -> Vec<u32> {
        Self::ALL.iter().map(|bp| bp.threshold()).collect()
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Breakpoint {
    type Err = UnknownBreakpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xs" => Ok(Breakpoint::Xs),
            "sm" => Ok(Breakpoint::Sm),
            "md" => Ok(Breakpoint::Md),
            "lg" => Ok(Breakpoint::Lg),
            "xl" => Ok(Breakpoint::Xl),
            "2xl" | "xxl" => Ok(Breakpoint::Xxl),
            other => Err(UnknownBreakpoint(other.to_string())),
        }
    }
}

impl TryFrom<String> for Breakpoint {
    type Error = UnknownBreakpoint;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Breakpoint> for String {
    fn from(bp: Breakpoint) -> Self {
        bp.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_strictly_increase() {
        let thresholds = Breakpoint::thresholds();
        assert!(thresholds.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(thresholds, vec![375, 640, 768, 1024, 1280, 1536]);
    }

    #[test]
    fn ord_follows_threshold() {
        let mut sorted = Breakpoint::ALL;
        sorted.sort_by_key(|bp| bp.threshold());
        assert_eq!(sorted, Breakpoint::ALL);
        assert!(Breakpoint::Xs < Breakpoint::Xxl);
    }

    #[test]
    fn index_matches_position() {
        for (i, bp) in Breakpoint::ALL.iter().enumerate() {
            assert_eq!(bp.index(), i);
        }
    }

    #[test]
    fn descending_starts_with_largest() {
        let order: Vec<_> = Breakpoint::descending().collect();
        assert_eq!(order.first(), Some(&Breakpoint::Xxl));
        assert_eq!(order.last(), Some(&Breakpoint::Xs));
    }

    #[test]
    fn parse_names_and_alias() {
        for bp in Breakpoint::ALL {
            assert_eq!(bp.name().parse::<Breakpoint>().unwrap(), bp);
        }
        assert_eq!("xxl".parse::<Breakpoint>().unwrap(), Breakpoint::Xxl);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "3xl".parse::<Breakpoint>().unwrap_err();
        assert_eq!(err, UnknownBreakpoint("3xl".to_string()));
        assert!("XS".parse::<Breakpoint>().is_err());
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Breakpoint::Xxl).unwrap();
        assert_eq!(json, "\"2xl\"");
        let bp: Breakpoint = serde_json::from_str("\"md\"").unwrap();
        assert_eq!(bp, Breakpoint::Md);
    }
}
