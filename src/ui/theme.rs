//! Centralized theming for the quickreply TUI
//!
//! Single source of truth for the colors and styles used by every screen.

use ratatui::style::{Color, Modifier, Style};
use std::sync::RwLock;

use crate::config::ThemeVariant;

/// Global theme variant storage
static THEME_VARIANT: RwLock<ThemeVariant> = RwLock::new(ThemeVariant::Dark);

/// Initialize the theme variant (call once at startup)
pub fn init_theme(variant: ThemeVariant) {
    if let Ok(mut guard) = THEME_VARIANT.write() {
        *guard = variant;
    }
}

/// Get the current theme variant
pub fn current_theme() -> ThemeVariant {
    THEME_VARIANT.read().map(|g| *g).unwrap_or_default()
}

/// Color palette - colors that vary by theme
pub mod colors {
    use super::*;

    pub fn bg_selection() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(69, 71, 90),
            ThemeVariant::HighContrast => Color::LightBlue,
        }
    }

    pub fn bg_status() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Black,
        }
    }

    pub fn bg_error() -> Color {
        Color::Red
    }

    pub fn fg_primary() -> Color {
        Color::White
    }

    pub fn fg_secondary() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Gray,
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn fg_muted() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Gray,
        }
    }

    pub fn fg_accent() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(137, 180, 250),
            ThemeVariant::HighContrast => Color::Cyan,
        }
    }

    pub fn fg_warning() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(249, 226, 175),
            ThemeVariant::HighContrast => Color::Yellow,
        }
    }

    pub fn fg_error() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(243, 139, 168),
            ThemeVariant::HighContrast => Color::LightRed,
        }
    }

    pub fn fg_success() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(166, 227, 161),
            ThemeVariant::HighContrast => Color::LightGreen,
        }
    }

    pub fn border() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn border_focused() -> Color {
        match current_theme() {
            ThemeVariant::Dark => Color::Rgb(180, 190, 254),
            ThemeVariant::HighContrast => Color::Yellow,
        }
    }
}

/// Symbols shared across screens
pub mod symbols {
    pub const TONE_PREV: &str = "◀";
    pub const TONE_NEXT: &str = "▶";
    pub const CURSOR: &str = "│";
}

/// Pre-composed styles for common UI elements
pub struct Theme;

impl Theme {
    // === Selection ===

    pub fn selected() -> Style {
        Style::default()
            .bg(colors::bg_selection())
            .fg(colors::fg_primary())
            .add_modifier(Modifier::BOLD)
    }

    // === Text ===

    pub fn text() -> Style {
        Style::default().fg(colors::fg_primary())
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(colors::fg_secondary())
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors::fg_muted())
    }

    pub fn text_accent() -> Style {
        Style::default().fg(colors::fg_accent())
    }

    pub fn title() -> Style {
        Self::text_accent().add_modifier(Modifier::BOLD)
    }

    /// Input rejected before any request was made
    pub fn text_warning() -> Style {
        Style::default().fg(colors::fg_warning())
    }

    /// The AI service failed
    pub fn text_error() -> Style {
        Style::default().fg(colors::fg_error())
    }

    /// "Copied!" badge
    pub fn badge_success() -> Style {
        Style::default()
            .fg(colors::fg_success())
            .add_modifier(Modifier::BOLD)
    }

    // === Bars ===

    pub fn status_bar() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_primary())
    }

    pub fn status_busy() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_warning())
    }

    pub fn error_bar() -> Style {
        Style::default()
            .bg(colors::bg_error())
            .fg(colors::fg_primary())
    }

    pub fn help_key() -> Style {
        Style::default().fg(colors::fg_warning())
    }

    pub fn help_desc() -> Style {
        Style::default().fg(colors::fg_secondary())
    }

    // === Borders ===

    pub fn border() -> Style {
        Style::default().fg(colors::border())
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors::border_focused())
    }
}
