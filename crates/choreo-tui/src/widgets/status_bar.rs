use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };

        let section = app
            .current_section()
            .map(|b| b.id.to_string())
            .unwrap_or_else(|| "-".to_string());

        let snap = if app.scroller.is_snapping() {
            "snapping".to_string()
        } else {
            match app.orchestrator.snap_targets() {
                Some(t) => format!("snap {}", t.len()),
                None => "snap -".to_string(),
            }
        };

        let nav = if app.nav_state().scrolled { "nav:solid" } else { "nav:clear" };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " {} | #{} | {:>5.1}% | {:.0}px | {} | {}",
                mode_str,
                section,
                app.scroll_percent(),
                app.scroll_y(),
                nav,
                snap
            ),
        };

        let help_hint = " q:quit j/k:scroll 1-3:nav i:inspector ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
