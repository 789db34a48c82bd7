use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use choreo_core::ScrollPosition;

use crate::app::App;

/// Resolved inline styles of the current section plus the snap ranges
pub struct InspectorWidget;

impl InspectorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Inspector ")
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg1));

        let mut lines = Vec::new();
        let heading = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(theme.grey1);
        let text = Style::default().fg(theme.fg0);

        if let Some(section) = app.current_section() {
            lines.push(Line::from(Span::styled(format!("#{}", section.id), heading)));
            if let Some(progress) = app.orchestrator.section_progress(&section.id) {
                lines.push(Line::from(vec![
                    Span::styled("progress ", dim),
                    Span::styled(format!("{:.3}", progress), text),
                ]));
            }
            if let Some((start, end)) = section.pin {
                lines.push(Line::from(vec![
                    Span::styled("pinned   ", dim),
                    Span::styled(format!("{:.0}..{:.0}px", start, end), text),
                ]));
            }
            lines.push(Line::default());

            let prefix = format!("{}.", section.id);
            for (key, style) in app.styles.styles() {
                if !key.element.starts_with(&prefix) {
                    continue;
                }
                lines.push(Line::from(Span::styled(key.to_string(), Style::default().fg(theme.fg1))));
                for (property, value) in style {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {:<18}", property.as_str()), dim),
                        Span::styled(value.to_string(), text),
                    ]));
                }
            }
            lines.push(Line::default());
        }

        lines.push(Line::from(Span::styled("snap", heading)));
        match app.orchestrator.snap_targets() {
            Some(targets) => {
                let value =
                    ScrollPosition::new(app.scroll_y(), app.orchestrator.max_scroll()).normalized();
                let buffer = app.config.snap.buffer;
                for range in targets.ranges() {
                    let marker = if range.contains(value, buffer) { "▶" } else { " " };
                    lines.push(Line::from(Span::styled(
                        format!(
                            "{} {:.3}..{:.3} center {:.3}",
                            marker, range.start, range.end, range.center
                        ),
                        text,
                    )));
                }
            }
            None if !app.config.snap.enabled => {
                lines.push(Line::from(Span::styled("disabled", dim)));
            }
            None => lines.push(Line::from(Span::styled("waiting for snapshot", dim))),
        }

        let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
