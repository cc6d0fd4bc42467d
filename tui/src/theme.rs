//! Color palettes for the light and dark themes.
//!
//! Dark uses Kanagawa Wave, light uses Kanagawa Lotus.

use ratatui::style::{Color, Modifier, Style};

use folio_engine::Theme;

/// Kanagawa color constants.
mod colors {
    use super::Color;

    pub mod wave {
        use super::Color;

        pub const BG: Color = Color::Rgb(22, 22, 29); // sumiInk0
        pub const BG_PANEL: Color = Color::Rgb(31, 31, 40); // sumiInk3
        pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
        pub const BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

        pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
        pub const TEXT_SECONDARY: Color = Color::Rgb(200, 192, 147); // oldWhite
        pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray

        pub const PRIMARY: Color = Color::Rgb(149, 127, 184); // oniViolet
        pub const ACCENT: Color = Color::Rgb(127, 180, 202); // springBlue
        pub const SUCCESS: Color = Color::Rgb(152, 187, 108); // springGreen
        pub const WARNING: Color = Color::Rgb(230, 195, 132); // carpYellow
        pub const ERROR: Color = Color::Rgb(255, 93, 98); // peachRed
        pub const PEACH: Color = Color::Rgb(255, 160, 102); // surimiOrange
    }

    pub mod lotus {
        use super::Color;

        pub const BG: Color = Color::Rgb(242, 236, 188); // lotusWhite3
        pub const BG_PANEL: Color = Color::Rgb(231, 219, 160); // lotusWhite4
        pub const BG_HIGHLIGHT: Color = Color::Rgb(228, 215, 148); // lotusWhite5
        pub const BORDER: Color = Color::Rgb(160, 154, 190); // lotusViolet1

        pub const TEXT_PRIMARY: Color = Color::Rgb(84, 84, 100); // lotusInk1
        pub const TEXT_SECONDARY: Color = Color::Rgb(67, 67, 108); // lotusInk2
        pub const TEXT_MUTED: Color = Color::Rgb(138, 137, 128); // lotusGray3

        pub const PRIMARY: Color = Color::Rgb(98, 76, 131); // lotusViolet4
        pub const ACCENT: Color = Color::Rgb(77, 105, 155); // lotusBlue4
        pub const SUCCESS: Color = Color::Rgb(111, 137, 78); // lotusGreen
        pub const WARNING: Color = Color::Rgb(119, 113, 63); // lotusYellow
        pub const ERROR: Color = Color::Rgb(200, 64, 83); // lotusRed
        pub const PEACH: Color = Color::Rgb(204, 109, 0); // lotusOrange
    }
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub primary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub peach: Color,
}

impl Palette {
    #[must_use]
    pub fn dark() -> Self {
        use colors::wave;
        Self {
            bg: wave::BG,
            bg_panel: wave::BG_PANEL,
            bg_highlight: wave::BG_HIGHLIGHT,
            border: wave::BORDER,
            text_primary: wave::TEXT_PRIMARY,
            text_secondary: wave::TEXT_SECONDARY,
            text_muted: wave::TEXT_MUTED,
            primary: wave::PRIMARY,
            accent: wave::ACCENT,
            success: wave::SUCCESS,
            warning: wave::WARNING,
            error: wave::ERROR,
            peach: wave::PEACH,
        }
    }

    #[must_use]
    pub fn light() -> Self {
        use colors::lotus;
        Self {
            bg: lotus::BG,
            bg_panel: lotus::BG_PANEL,
            bg_highlight: lotus::BG_HIGHLIGHT,
            border: lotus::BORDER,
            text_primary: lotus::TEXT_PRIMARY,
            text_secondary: lotus::TEXT_SECONDARY,
            text_muted: lotus::TEXT_MUTED,
            primary: lotus::PRIMARY,
            accent: lotus::ACCENT,
            success: lotus::SUCCESS,
            warning: lotus::WARNING,
            error: lotus::ERROR,
            peach: lotus::PEACH,
        }
    }
}

#[must_use]
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette::dark(),
        Theme::Light => Palette::light(),
    }
}

/// Glyph shown on the theme toggle: the mode you would switch to.
#[must_use]
pub fn theme_glyph(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "☀",
        Theme::Light => "☾",
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn body(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary)
    }

    #[must_use]
    pub fn heading(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn code(palette: &Palette) -> Style {
        Style::default().fg(palette.accent).bg(palette.bg_panel)
    }

    #[must_use]
    pub fn link(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::UNDERLINED)
    }

    #[must_use]
    pub fn nav_active(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    #[must_use]
    pub fn nav_inactive(palette: &Palette) -> Style {
        Style::default().fg(palette.text_secondary)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn tag(palette: &Palette) -> Style {
        Style::default().fg(palette.primary).bg(palette.bg_highlight)
    }
}
