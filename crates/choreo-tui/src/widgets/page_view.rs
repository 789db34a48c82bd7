//! Simulated browser viewport
//!
//! Sections are drawn at their page position scaled to the terminal height.
//! A pinned section stays at the top of the viewport for its pin distance,
//! then scrolls away with the rest of the page.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use choreo_core::layout::SectionBounds;
use choreo_core::page::NAV_LINKS;
use choreo_core::timeline::{ElementKey, ElementStyle, Property};

use crate::app::App;
use crate::theme::Theme;

pub struct PageViewWidget;

impl PageViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Page ")
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 || inner.width == 0 {
            return;
        }

        // nav bar is fixed over the page
        let nav_area = Rect { height: 1, ..inner };
        let page_area = Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        };

        let viewport_px = app.orchestrator.viewport().height;
        let rows_per_px = page_area.height as f64 / viewport_px;
        let scroll_y = app.scroll_y();

        for (index, bounds) in app.orchestrator.layout().sections.iter().enumerate() {
            let top_px = section_screen_top(bounds, scroll_y);
            let height_px = section_height(bounds);
            let top_row = (top_px * rows_per_px).round() as i64;
            let bottom_row = ((top_px + height_px) * rows_per_px).round() as i64;

            let first = top_row.max(0);
            let last = bottom_row.min(page_area.height as i64);
            if last <= first {
                continue;
            }

            let rect = Rect {
                y: page_area.y + first as u16,
                height: (last - first) as u16,
                ..page_area
            };
            let bg = if index % 2 == 0 { theme.bg0 } else { theme.bg1 };
            let lines = section_lines(app, bounds, rect.width as usize);
            let skip = (first - top_row) as u16;
            let paragraph = Paragraph::new(lines)
                .style(Style::default().bg(bg))
                .scroll((skip, 0));
            frame.render_widget(paragraph, rect);
        }

        render_nav(frame, nav_area, app);
    }
}

/// Viewport offset (px) of a section's top edge at `scroll_y`
pub(crate) fn section_screen_top(bounds: &SectionBounds, scroll_y: f64) -> f64 {
    let held = match bounds.pin {
        Some((start, end)) => (scroll_y - start).clamp(0.0, end - start),
        None => 0.0,
    };
    bounds.top - scroll_y + held
}

/// Rendered height (px) of a section, excluding its pin spacer
pub(crate) fn section_height(bounds: &SectionBounds) -> f64 {
    let spacer = bounds.pin.map(|(start, end)| end - start).unwrap_or(0.0);
    bounds.bottom - bounds.top - spacer
}

fn render_nav(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let scrolled = app.nav_state().scrolled;
    let style = if scrolled {
        Style::default().fg(theme.fg0).bg(theme.bg2)
    } else {
        Style::default().fg(theme.fg1)
    };

    let mut spans = vec![Span::styled(" CHOREO ", style.add_modifier(Modifier::BOLD))];
    for (i, link) in NAV_LINKS.iter().enumerate() {
        spans.push(Span::styled(format!("  {}:{}", i + 1, link.label), style));
    }
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    spans.push(Span::styled(
        " ".repeat((area.width as usize).saturating_sub(used)),
        style,
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn section_lines<'a>(app: &'a App, bounds: &SectionBounds, width: usize) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let header_style = if bounds.pin.is_some() {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD)
    };

    let mut header = format!("── #{} ", bounds.id);
    if let Some(progress) = app.orchestrator.section_progress(&bounds.id) {
        header.push_str(&format!("{:>3.0}% ", progress * 100.0));
    }
    let fill = width.saturating_sub(header.width());
    header.push_str(&"─".repeat(fill));

    let mut lines = vec![Line::from(Span::styled(header, header_style))];
    let prefix = format!("{}.", bounds.id);
    for (key, style) in app.styles.styles() {
        if !key.element.starts_with(&prefix) {
            continue;
        }
        let name = key.element.trim_start_matches(&prefix);
        let label = if key.index > 0 || is_group(app, &key.element) {
            format!("  {}[{}]", name, key.index)
        } else {
            format!("  {}", name)
        };
        lines.push(element_line(theme, app, key, label, style, width));
    }
    lines
}

fn is_group(app: &App, element: &str) -> bool {
    app.styles
        .styles()
        .keys()
        .any(|k| k.element == element && k.index > 0)
}

fn element_line<'a>(
    theme: &Theme,
    app: &App,
    key: &ElementKey,
    label: String,
    style: &ElementStyle,
    width: usize,
) -> Line<'a> {
    let opacity = app.styles.effective(key, Property::Opacity).amount;
    let color = if opacity < 0.05 {
        theme.grey0
    } else if opacity < 0.999 {
        theme.moving
    } else {
        theme.fg0
    };

    let bar = opacity_bar(opacity, 8);
    let values: Vec<String> = style
        .iter()
        .filter(|(p, _)| **p != Property::Opacity)
        .map(|(p, v)| format!("{} {}", p, v))
        .collect();
    let mut text = format!("{:<24} {} {}", label, bar, values.join("  "));
    if text.width() > width {
        text = truncate_width(&text, width);
    }
    Line::from(Span::styled(text, Style::default().fg(color)))
}

fn opacity_bar(opacity: f64, cells: usize) -> String {
    let filled = (opacity.clamp(0.0, 1.0) * cells as f64).round() as usize;
    format!("{}{}", "▓".repeat(filled), "░".repeat(cells - filled))
}

fn truncate_width(s: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreo_core::SectionId;

    fn bounds(top: f64, bottom: f64, pin: Option<(f64, f64)>) -> SectionBounds {
        SectionBounds {
            id: SectionId::from("s"),
            top,
            bottom,
            pin,
        }
    }

    #[test]
    fn test_pinned_section_holds_at_top() {
        let hero = bounds(0.0, 2300.0, Some((0.0, 1300.0)));
        assert_eq!(section_height(&hero), 1000.0);
        assert_eq!(section_screen_top(&hero, 0.0), 0.0);
        assert_eq!(section_screen_top(&hero, 800.0), 0.0);
        assert_eq!(section_screen_top(&hero, 1300.0), 0.0);
        assert_eq!(section_screen_top(&hero, 1500.0), -200.0);
    }

    #[test]
    fn test_unpinned_section_scrolls() {
        let footer = bounds(2300.0, 2750.0, None);
        assert_eq!(section_screen_top(&footer, 2000.0), 300.0);
        assert_eq!(section_height(&footer), 450.0);
    }

    #[test]
    fn test_opacity_bar() {
        assert_eq!(opacity_bar(0.0, 4), "░░░░");
        assert_eq!(opacity_bar(0.5, 4), "▓▓░░");
        assert_eq!(opacity_bar(2.0, 4), "▓▓▓▓");
    }

    #[test]
    fn test_truncate_width() {
        assert_eq!(truncate_width("abcdef", 3), "abc");
        assert_eq!(truncate_width("▓▓▓", 2), "▓▓");
    }
}
