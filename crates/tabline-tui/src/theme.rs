use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,

    // Semantic colors
    pub selection: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::gruvbox_dark()
    }
}

impl Theme {
    /// Look up a theme by its configured name, falling back to the
    /// default palette for unknown names.
    pub fn by_name(name: &str) -> Self {
        match name {
            "gruvbox-dark" => Self::gruvbox_dark(),
            "nord" => Self::nord(),
            other => {
                tracing::warn!("unknown theme '{}', using gruvbox-dark", other);
                Self::gruvbox_dark()
            }
        }
    }

    /// Gruvbox Material dark palette
    pub fn gruvbox_dark() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            blue: Color::Rgb(0x7d, 0xae, 0xa3),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            error: Color::Rgb(0xea, 0x69, 0x62),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }

    /// Nord palette
    pub fn nord() -> Self {
        Self {
            bg0: Color::Rgb(0x2e, 0x34, 0x40),
            bg1: Color::Rgb(0x3b, 0x42, 0x52),
            bg2: Color::Rgb(0x43, 0x4c, 0x5e),
            fg0: Color::Rgb(0xd8, 0xde, 0xe9),
            fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
            grey0: Color::Rgb(0x4c, 0x56, 0x6a),
            grey1: Color::Rgb(0x61, 0x6e, 0x88),
            yellow: Color::Rgb(0xeb, 0xcb, 0x8b),
            green: Color::Rgb(0xa3, 0xbe, 0x8c),
            blue: Color::Rgb(0x81, 0xa1, 0xc1),
            selection: Color::Rgb(0x43, 0x4c, 0x5e),
            error: Color::Rgb(0xbf, 0x61, 0x6a),
            accent: Color::Rgb(0x88, 0xc0, 0xd0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_falls_back() {
        let theme = Theme::by_name("does-not-exist");
        assert_eq!(theme.bg0, Theme::gruvbox_dark().bg0);
    }
}
