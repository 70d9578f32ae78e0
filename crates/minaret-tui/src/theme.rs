//! Colour palettes and the theme store.
//!
//! The theme store holds the active palette for the whole process.  It starts
//! from the configured theme and is flipped by the user; the choice is not
//! written back to disk.

use minaret_proto::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Every colour a surface may draw with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted_foreground: Color,
    pub card: Color,
    pub border: Color,
    pub border_focused: Color,
    pub primary: Color,
    pub primary_foreground: Color,
    pub accent: Color,
    pub blue: Color,
    pub purple: Color,
    pub live: Color,
    pub paused: Color,
    pub error: Color,
    pub selection_bg: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 249),
    foreground: Color::Rgb(28, 25, 23),
    muted_foreground: Color::Rgb(120, 113, 108),
    card: Color::Rgb(255, 255, 255),
    border: Color::Rgb(214, 211, 209),
    border_focused: Color::Rgb(5, 150, 105),
    primary: Color::Rgb(5, 150, 105),
    primary_foreground: Color::Rgb(255, 255, 255),
    accent: Color::Rgb(217, 119, 6),
    blue: Color::Rgb(37, 99, 235),
    purple: Color::Rgb(124, 58, 237),
    live: Color::Rgb(220, 38, 38),
    paused: Color::Rgb(202, 138, 4),
    error: Color::Rgb(185, 28, 28),
    selection_bg: Color::Rgb(231, 229, 228),
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(18, 18, 18),
    foreground: Color::Rgb(231, 229, 228),
    muted_foreground: Color::Rgb(140, 134, 130),
    card: Color::Rgb(28, 28, 30),
    border: Color::Rgb(52, 52, 58),
    border_focused: Color::Rgb(52, 211, 153),
    primary: Color::Rgb(52, 211, 153),
    primary_foreground: Color::Rgb(6, 30, 22),
    accent: Color::Rgb(251, 191, 36),
    blue: Color::Rgb(96, 165, 250),
    purple: Color::Rgb(167, 139, 250),
    live: Color::Rgb(248, 113, 113),
    paused: Color::Rgb(250, 204, 21),
    error: Color::Rgb(255, 95, 95),
    selection_bg: Color::Rgb(38, 38, 44),
};

impl Palette {
    pub fn for_theme(name: ThemeName) -> &'static Palette {
        match name {
            ThemeName::Light => &LIGHT,
            ThemeName::Dark => &DARK,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_foreground)
    }

    pub fn strong(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    pub fn active(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn live_badge(&self) -> Style {
        Style::default().fg(self.live).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selection_bg).fg(self.foreground)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }
}

#[derive(Debug, Clone)]
pub struct ThemeStore {
    name: ThemeName,
    colors: &'static Palette,
}

impl ThemeStore {
    pub fn new(name: ThemeName) -> Self {
        Self {
            name,
            colors: Palette::for_theme(name),
        }
    }

    pub fn name(&self) -> ThemeName {
        self.name
    }

    pub fn colors(&self) -> &'static Palette {
        self.colors
    }

    pub fn toggle(&mut self) {
        self.set(self.name.toggled());
    }

    pub fn set(&mut self, name: ThemeName) {
        self.name = name;
        self.colors = Palette::for_theme(name);
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeName::default())
    }
}
