//! Colours for the two app themes.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::AppThemes;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub dim: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
}

impl Palette {
    pub fn for_theme(theme: AppThemes) -> Self {
        match theme {
            AppThemes::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                dim: Color::DarkGray,
                positive: Color::Green,
                negative: Color::Red,
                warning: Color::Yellow,
            },
            AppThemes::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                dim: Color::Gray,
                positive: Color::Rgb(0, 128, 0),
                negative: Color::Rgb(178, 34, 34),
                warning: Color::Rgb(184, 134, 11),
            },
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        Self::for_theme(if dark { AppThemes::Dark } else { AppThemes::Light })
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Green for gains, red for losses, dim when unknown.
    pub fn change(&self, change: Option<f64>) -> Style {
        match change {
            Some(c) if c > 0.0 => Style::default().fg(self.positive),
            Some(c) if c < 0.0 => Style::default().fg(self.negative),
            _ => Style::default().fg(self.dim),
        }
    }
}
