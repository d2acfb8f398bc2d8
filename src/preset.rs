//! Size presets: complete per-breakpoint size tables.
//!
//! A [`SizeTable`] holds one [`SizeValue`] for every [`Breakpoint`], stored as
//! a fixed-size array, so a built-in preset cannot be missing an entry. Custom
//! presets arrive from config as sparse maps and go through
//! [`SizeTable::from_entries`], which rejects incomplete tables up front.
//!
//! ## Built-in presets
//!
//! | Preset    | xs   | sm   | md   | lg   | xl   | 2xl  |
//! |-----------|------|------|------|------|------|------|
//! | `full`    | 100  | 100  | 100  | 100  | 100  | 100  |
//! | `half`    | 100  | 100  | 50   | 50   | 50   | 50   |
//! | `third`   | 100  | 100  | 50   | 33   | 33   | 33   |
//! | `logo`    | 150px| 175px| 200px| 225px| 250px| 300px|
//! | `hero`    | 100  | 100  | 100  | 90   | 80   | 70   |
//! | `content` | 100  | 90   | 80   | 70   | 60   | 50   |
//!
//! Plain numbers are viewport percentages.

use crate::breakpoint::{Breakpoint, UnknownBreakpoint};
use crate::size::SizeValue;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("preset '{preset}' is missing breakpoints: {}", join_names(.missing))]
    InconsistentPresetTable {
        preset: String,
        missing: Vec<Breakpoint>,
    },
    #[error("preset '{preset}': {source}")]
    UnknownBreakpoint {
        preset: String,
        source: UnknownBreakpoint,
    },
    #[error("preset '{preset}' sets breakpoint '{breakpoint}' more than once")]
    DuplicateBreakpoint {
        preset: String,
        breakpoint: Breakpoint,
    },
    #[error("preset '{0}' shadows a built-in preset")]
    ShadowsBuiltin(String),
}

fn join_names(bps: &[Breakpoint]) -> String {
    bps.iter().map(|bp| bp.name()).collect::<Vec<_>>().join(", ")
}

/// Partial per-breakpoint overrides, applied on top of the `full` preset.
pub type Overrides = BTreeMap<Breakpoint, SizeValue>;

/// One size per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeTable([SizeValue; Breakpoint::COUNT]);

impl SizeTable {
    /// Build from legacy numbers, ordered xs..2xl.
    pub const fn from_legacy(values: [u32; Breakpoint::COUNT]) -> Self {
        let mut sizes = [SizeValue::Percent(100); Breakpoint::COUNT];
        let mut i = 0;
        while i < Breakpoint::COUNT {
            sizes[i] = SizeValue::from_legacy(values[i]);
            i += 1;
        }
        Self(sizes)
    }

    /// The same size at every breakpoint.
    pub const fn uniform(size: SizeValue) -> Self {
        Self([size; Breakpoint::COUNT])
    }

    /// Build from named entries, as found in config files.
    ///
    /// Every breakpoint must be present exactly once; unknown names are
    /// rejected, and so is a breakpoint given under both its name and an
    /// alias (`2xl` and `xxl`).
    pub fn from_entries(
        preset: &str,
        entries: &BTreeMap<String, SizeValue>,
    ) -> Result<Self, PresetError> {
        let mut slots: [Option<SizeValue>; Breakpoint::COUNT] = [None; Breakpoint::COUNT];
        for (name, size) in entries {
            let bp: Breakpoint = name
                .parse()
                .map_err(|source| PresetError::UnknownBreakpoint {
                    preset: preset.to_string(),
                    source,
                })?;
            let slot = &mut slots[bp.index()];
            if slot.is_some() {
                return Err(PresetError::DuplicateBreakpoint {
                    preset: preset.to_string(),
                    breakpoint: bp,
                });
            }
            *slot = Some(*size);
        }

        let missing: Vec<Breakpoint> = Breakpoint::ALL
            .into_iter()
            .filter(|bp| slots[bp.index()].is_none())
            .collect();
        if !missing.is_empty() {
            return Err(PresetError::InconsistentPresetTable {
                preset: preset.to_string(),
                missing,
            });
        }

        Ok(Self(slots.map(|slot| slot.unwrap_or(SizeValue::Percent(100)))))
    }

    pub fn get(&self, bp: Breakpoint) -> SizeValue {
        self.0[bp.index()]
    }

    /// Copy of this table with the given breakpoints replaced.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        for (bp, size) in overrides {
            self.0[bp.index()] = *size;
        }
        self
    }

    /// `(breakpoint, size)` pairs, smallest breakpoint first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, SizeValue)> + '_ {
        Breakpoint::ALL.into_iter().map(|bp| (bp, self.get(bp)))
    }
}

/// The built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Full width on all screens.
    Full,
    /// Full width on mobile, half from `md` up.
    Half,
    /// Full width on mobile, half at `md`, a third from `lg` up.
    Third,
    /// Small fixed pixel widths.
    Logo,
    Hero,
    /// Body content images, narrowing as the screen grows.
    Content,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Full,
        Preset::Half,
        Preset::Third,
        Preset::Logo,
        Preset::Hero,
        Preset::Content,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Preset::Full => "full",
            Preset::Half => "half",
            Preset::Third => "third",
            Preset::Logo => "logo",
            Preset::Hero => "hero",
            Preset::Content => "content",
        }
    }

    /// Look up a built-in preset by name.
    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.name() == name)
    }

    pub const fn table(self) -> SizeTable {
        match self {
            Preset::Full => SizeTable::from_legacy([100, 100, 100, 100, 100, 100]),
            Preset::Half => SizeTable::from_legacy([100, 100, 50, 50, 50, 50]),
            Preset::Third => SizeTable::from_legacy([100, 100, 50, 33, 33, 33]),
            Preset::Logo => SizeTable::from_legacy([150, 175, 200, 225, 250, 300]),
            Preset::Hero => SizeTable::from_legacy([100, 100, 100, 90, 80, 70]),
            Preset::Content => SizeTable::from_legacy([100, 90, 80, 70, 60, 50]),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Built-in presets plus any custom presets loaded from config.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    custom: BTreeMap<String, SizeTable>,
}

impl PresetRegistry {
    /// Registry with the built-in presets only.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Add a custom preset. Built-in names cannot be redefined.
    pub fn insert(&mut self, name: &str, table: SizeTable) -> Result<(), PresetError> {
        if Preset::from_name(name).is_some() {
            return Err(PresetError::ShadowsBuiltin(name.to_string()));
        }
        self.custom.insert(name.to_string(), table);
        Ok(())
    }

    /// Build a registry from config entries, validating each table.
    pub fn from_config(
        presets: &BTreeMap<String, BTreeMap<String, SizeValue>>,
    ) -> Result<Self, PresetError> {
        let mut registry = Self::builtin();
        for (name, entries) in presets {
            let table = SizeTable::from_entries(name, entries)?;
            registry.insert(name, table)?;
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<SizeTable> {
        match Preset::from_name(name) {
            Some(preset) => Some(preset.table()),
            None => self.custom.get(name).copied(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All preset names: built-ins in declaration order, then custom ones sorted.
    pub fn names(&self) -> Vec<&str> {
        Preset::ALL
            .iter()
            .map(|p| p.name())
            .chain(self.custom.keys().map(String::as_str))
            .collect()
    }
}
