use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use choreo_core::config::KeymapConfig;

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Key reference overlay
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let entries: [(&str, &str); 16] = [
            (keymap.scroll_down.as_str(), "scroll down"),
            (keymap.scroll_up.as_str(), "scroll up"),
            (keymap.scroll_half_down.as_str(), "half page down"),
            (keymap.scroll_half_up.as_str(), "half page up"),
            (keymap.scroll_page_down.as_str(), "page down"),
            (keymap.scroll_page_up.as_str(), "page up"),
            (keymap.jump_to_top.as_str(), "top"),
            (keymap.jump_to_bottom.as_str(), "bottom"),
            (keymap.next_section.as_str(), "next section"),
            (keymap.prev_section.as_str(), "previous section"),
            ("0-3", "nav bar links"),
            (keymap.toggle_inspector.as_str(), "toggle inspector"),
            (keymap.recompute_snap.as_str(), "recompute snap targets"),
            (keymap.remount.as_str(), "remount page"),
            (keymap.help.as_str(), "help"),
            (keymap.quit.as_str(), "quit"),
        ];

        let area = frame.area();
        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<8}", key),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*desc, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            " press any key to close",
            Style::default().fg(theme.grey1),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let r = centered_rect(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(r, Rect::new(10, 3, 10, 4));
        let r = centered_rect(40, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(r.x, 0);
    }
}
