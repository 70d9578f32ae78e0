pub mod drawer;
pub mod feature_cards;
pub mod help_overlay;
pub mod hero;
pub mod navbar;
pub mod player_bar;
pub mod station_list;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `s` to at most `max` terminal columns, ending in `…` when shortened.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
pub(crate) fn render_rows(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame, ratatui::layout::Rect),
) -> Vec<String> {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            draw(f, area)
        })
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn test_truncate_by_columns() {
        assert_eq!(truncate("Massalacin Zawiyya", 40), "Massalacin Zawiyya");
        assert_eq!(truncate("Massalacin Zawiyya", 8), "Massala…");
        assert_eq!(truncate("مسجد النور", 4), "مسج…");
        assert_eq!(truncate("abc", 0), "");
    }
}
