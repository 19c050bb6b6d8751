// Copyright 2025 the GitGlyph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Light and dark color themes.

use core::fmt;
use core::str::FromStr;

use gitglyph_imaging::Color;
use serde::{Deserialize, Serialize};

/// Which built-in theme is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    /// Dark shapes on a light background.
    #[default]
    Light,
    /// Light shapes on a dark background.
    Dark,
}

impl ThemeKind {
    /// The label used in snapshots and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme {0:?}, expected \"light\" or \"dark\"")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeKind {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            t if t.eq_ignore_ascii_case("light") => Ok(Self::Light),
            t if t.eq_ignore_ascii_case("dark") => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Colors used for everything that is not commit-specific.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Theme {
    /// Which built-in theme this is derived from.
    pub kind: ThemeKind,
    /// Canvas background.
    pub background: Color,
    /// Stroke of the edges linking consecutive commits.
    pub edge: Color,
    /// Placeholder text.
    pub text: Color,
    /// Story marker rings.
    pub marker: Color,
}

impl Theme {
    /// The light theme.
    pub const fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            background: Color::from_rgb8(0xFF, 0xFF, 0xFF),
            edge: Color::from_rgb8(0x99, 0x99, 0x99),
            text: Color::from_rgb8(0x33, 0x33, 0x33),
            marker: Color::from_rgb8(0xFF, 0x98, 0x00),
        }
    }

    /// The dark theme.
    pub const fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            background: Color::from_rgb8(0x12, 0x12, 0x12),
            edge: Color::from_rgb8(0x55, 0x55, 0x55),
            text: Color::from_rgb8(0xEE, 0xEE, 0xEE),
            marker: Color::from_rgb8(0xFF, 0xC1, 0x07),
        }
    }

    /// The built-in theme for `kind`.
    pub const fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl From<ThemeKind> for Theme {
    fn from(kind: ThemeKind) -> Self {
        Self::from_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("Dark".parse::<ThemeKind>(), Ok(ThemeKind::Dark));
        assert_eq!(" light".parse::<ThemeKind>(), Ok(ThemeKind::Light));
        assert_eq!(
            "sepia".parse::<ThemeKind>(),
            Err(UnknownTheme("sepia".into()))
        );
    }

    #[test]
    fn kind_round_trips_through_json() {
        let json = serde_json::to_string(&ThemeKind::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        let kind: ThemeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(Theme::from(kind), Theme::dark());
    }

    #[test]
    fn themes_differ() {
        assert_ne!(Theme::light().background, Theme::dark().background);
        assert_eq!(Theme::default().kind, ThemeKind::Light);
    }
}
