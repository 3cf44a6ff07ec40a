//! Light/dark mode and color theme selection.

/// `localStorage` key holding the last mode.
pub const MODE_KEY: &str = "ap-mode";

/// `localStorage` key holding the last theme class.
pub const THEME_KEY: &str = "ap-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Dark,
    Light,
}

impl Mode {
    /// Anything other than `"light"` is dark.
    pub fn parse(value: &str) -> Self {
        if value == "light" {
            Self::Light
        } else {
            Self::Dark
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Body class for this mode.
    pub fn class(self) -> &'static str {
        match self {
            Self::Dark => "mode-dark",
            Self::Light => "mode-light",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Switch to light mode",
            Self::Light => "Switch to dark mode",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Aurora,
    Sakura,
    Isla,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Aurora, Theme::Sakura, Theme::Isla];

    pub fn class(self) -> &'static str {
        match self {
            Self::Aurora => "theme-aurora",
            Self::Sakura => "theme-sakura",
            Self::Isla => "theme-isla",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.class() == class)
    }

    /// Number-key shortcut: `1`, `2`, `3`.
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Self::Aurora),
            "2" => Some(Self::Sakura),
            "3" => Some(Self::Isla),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parse_defaults_to_dark() {
        assert_eq!(Mode::parse("light"), Mode::Light);
        assert_eq!(Mode::parse("dark"), Mode::Dark);
        assert_eq!(Mode::parse("LIGHT"), Mode::Dark);
        assert_eq!(Mode::Light.toggled(), Mode::Dark);
    }

    #[test]
    fn theme_round_trips_through_class() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_class(theme.class()), Some(theme));
        }
        assert_eq!(Theme::from_class("theme-neon"), None);
        assert_eq!(Theme::from_shortcut("2"), Some(Theme::Sakura));
        assert_eq!(Theme::from_shortcut("4"), None);
    }
}
