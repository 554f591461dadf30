// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Palette resolution from overrides, theme variables, and defaults.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::config::PaletteOverrides;

/// A color role that a host theme may provide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ThemeVariable {
    /// `--accent`.
    Accent,
    /// `--background`.
    Background,
    /// `--text`.
    Text,
    /// `--text-muted`.
    MutedText,
    /// `--border`.
    Border,
}

impl ThemeVariable {
    /// Every variable, in resolution order.
    pub const ALL: [Self; 5] = [
        Self::Accent,
        Self::Background,
        Self::Text,
        Self::MutedText,
        Self::Border,
    ];

    /// The CSS custom property name of this variable.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accent => "--accent",
            Self::Background => "--background",
            Self::Text => "--text",
            Self::MutedText => "--text-muted",
            Self::Border => "--border",
        }
    }
}

impl fmt::Display for ThemeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host environment queried once for theme colors.
///
/// In a browser this is the computed style of the container element; other
/// hosts can hand in a map or return nothing at all.
pub trait ThemeSource {
    /// Returns the raw value of the custom property `name` (for example
    /// `--accent`), or `None` if it is not set.
    ///
    /// Blank values are treated as unset.
    fn variable(&self, name: &str) -> Option<String>;
}

/// A theme that defines nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoTheme;

impl ThemeSource for NoTheme {
    fn variable(&self, _name: &str) -> Option<String> {
        None
    }
}

impl ThemeSource for BTreeMap<String, String> {
    fn variable(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: ThemeSource + ?Sized> ThemeSource for &T {
    fn variable(&self, name: &str) -> Option<String> {
        (**self).variable(name)
    }
}

/// The resolved colors a diagram paints with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Terminal nodes and node outlines.
    pub accent: Color,
    /// Fill of internal nodes.
    pub background: Color,
    /// Labels of internal nodes.
    pub text: Color,
    /// The root node.
    pub muted_text: Color,
    /// Links.
    pub border: Color,
    /// Labels of terminal nodes.
    pub label: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Color::from_rgb8(0x63, 0x66, 0xf1),
            background: Color::WHITE,
            text: Color::from_rgb8(0x1f, 0x29, 0x37),
            muted_text: Color::from_rgb8(0x6b, 0x72, 0x80),
            border: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            label: Color::WHITE,
        }
    }
}

impl Palette {
    /// Resolves every role: explicit override, then theme, then default.
    ///
    /// A theme value that does not parse as a CSS color is ignored.
    pub fn resolve<T: ThemeSource + ?Sized>(overrides: &PaletteOverrides, theme: &T) -> Self {
        let defaults = Self::default();
        let pick = |explicit: Option<Color>, variable: ThemeVariable, fallback: Color| {
            explicit
                .or_else(|| theme_color(theme, variable))
                .unwrap_or(fallback)
        };
        Self {
            accent: pick(overrides.accent, ThemeVariable::Accent, defaults.accent),
            background: pick(
                overrides.background,
                ThemeVariable::Background,
                defaults.background,
            ),
            text: pick(overrides.text, ThemeVariable::Text, defaults.text),
            muted_text: pick(
                overrides.muted_text,
                ThemeVariable::MutedText,
                defaults.muted_text,
            ),
            border: pick(overrides.border, ThemeVariable::Border, defaults.border),
            label: defaults.label,
        }
    }
}

fn theme_color<T: ThemeSource + ?Sized>(theme: &T, variable: ThemeVariable) -> Option<Color> {
    let raw = theme.variable(variable.name())?;
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match parse_color(value) {
        Ok(color) => Some(color.to_alpha_color::<Srgb>()),
        Err(err) => {
            tracing::warn!(%variable, value, %err, "ignoring unparseable theme color");
            None
        }
    }
}
