//! Colour themes for rendered spans.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Vulcan,
    Emerald,
    Nebula,
    Midnight,
}

/// Colours of one theme, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Vulcan, Theme::Emerald, Theme::Nebula, Theme::Midnight];

    pub fn id(self) -> &'static str {
        match self {
            Theme::Vulcan => "vulcan",
            Theme::Emerald => "emerald",
            Theme::Nebula => "nebula",
            Theme::Midnight => "midnight",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Vulcan => "Vulcan",
            Theme::Emerald => "Emerald",
            Theme::Nebula => "Nebula",
            Theme::Midnight => "Midnight",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Vulcan => Palette { primary: "#f43f5e", accent: "#f97316", background: "#0c0a09" },
            Theme::Emerald => Palette { primary: "#10b981", accent: "#14b8a6", background: "#0a0c0a" },
            Theme::Nebula => Palette { primary: "#6366f1", accent: "#a855f7", background: "#0f172a" },
            Theme::Midnight => Palette { primary: "#3b82f6", accent: "#06b6d4", background: "#020617" },
        }
    }

    /// Colour applied to recognized markdown spans.
    pub fn span_color(self) -> &'static str {
        self.palette().primary
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!("emerald".parse::<Theme>().unwrap(), Theme::Emerald);
        assert_eq!(" Midnight ".parse::<Theme>().unwrap(), Theme::Midnight);
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn test_default_is_vulcan() {
        assert_eq!(Theme::default(), Theme::Vulcan);
        assert_eq!(Theme::default().span_color(), "#f43f5e");
    }

    #[test]
    fn test_ids_round_trip_through_display() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }
}
