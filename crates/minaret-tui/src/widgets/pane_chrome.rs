//! PaneChrome — standardized bordered pane with focus styling and badges.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::Palette;

/// A badge shown in the top-right of the pane header (e.g., "LIVE", "ERR").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// Bordered pane whose border and title follow focus.
pub fn pane_chrome<'a>(
    title: &'a str,
    focused: bool,
    badge: Option<Badge<'a>>,
    colors: &Palette,
) -> Block<'a> {
    let title_style = if focused {
        colors.active()
    } else {
        colors.muted()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(colors.border(focused))
        .style(Style::default().bg(colors.card))
        .title(Line::from(Span::styled(format!(" {} ", title), title_style)));

    if let Some(b) = badge {
        block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
    } else {
        block
    }
}
