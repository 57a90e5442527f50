/// Display theme selection and the QR palettes tied to it

use iced::Theme;

use crate::encode::QrColors;

/// The two display modes the page can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Read the OS color-scheme preference, once at startup
    pub fn detect() -> Self {
        if matches!(Theme::default(), Theme::Dark) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// The opposite mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Human-readable mode name, as used in notices
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    /// Foreground/background pair the QR symbol is rendered with.
    /// Dark mode draws blue modules on the page's slate background;
    /// light mode draws near-black modules on an off-white background.
    pub fn qr_colors(self) -> QrColors {
        match self {
            ThemeMode::Dark => QrColors {
                dark: "#3b82f6",
                light: "#1f2937",
            },
            ThemeMode::Light => QrColors {
                dark: "#1f2937",
                light: "#f9fafb",
            },
        }
    }

    /// The iced theme driving the window chrome
    pub fn iced_theme(self) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
        }
    }
}
