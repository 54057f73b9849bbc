use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::nav::Mode;
use crate::panel::Panel;

const FOOTER_HEIGHT: u16 = 4;

/// Draws the navigation panel into `area`: mode header, result list with
/// the current selection, and the preview/status footer. The preview's
/// document content itself is rendered by the host in its own surface.
pub fn render_panel(f: &mut Frame, panel: &Panel, area: Rect) {
    let theme = &panel.theme;

    let block = Block::default()
        .title(" Shortlist ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(inner);

    render_mode_header(f, panel, rows[0]);
    render_results(f, panel, rows[1]);
    render_footer(f, panel, rows[2]);
}

fn render_mode_header(f: &mut Frame, panel: &Panel, area: Rect) {
    let theme = &panel.theme;
    let tab = |mode: Mode| {
        if panel.mode() == mode {
            Span::styled(
                format!(" {} ", mode.label()),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", mode.label()), Style::default().fg(theme.muted))
        }
    };
    let header = Line::from(vec![
        tab(Mode::Search),
        Span::styled("│", Style::default().fg(theme.border)),
        tab(Mode::Backlinks),
    ]);
    let count = Line::from(Span::styled(
        match panel.nav.selected {
            Some(i) => format!(" {}/{}", i + 1, panel.nav.results.len()),
            None => format!(" {} results", panel.nav.results.len()),
        },
        Style::default().fg(theme.muted),
    ));
    f.render_widget(Paragraph::new(vec![header, count]), area);
}

fn render_results(f: &mut Frame, panel: &Panel, area: Rect) {
    let theme = &panel.theme;
    let visible = area.height as usize;
    if visible == 0 {
        return;
    }

    // Keep the selection inside the window.
    let offset = match panel.nav.selected {
        Some(i) if i + 1 > visible => i + 1 - visible,
        _ => 0,
    };

    let width = area.width as usize;
    let mut lines = Vec::new();
    for (i, entry) in panel.nav.results.entries.iter().enumerate().skip(offset) {
        if lines.len() >= visible {
            break;
        }
        let selected = panel.nav.selected == Some(i);
        let marker = if selected { "▸ " } else { "  " };
        let label = truncate_label(&entry.doc.name, width.saturating_sub(2));
        let style = if selected {
            Style::default()
                .fg(theme.foreground)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, label), style)));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer(f: &mut Frame, panel: &Panel, area: Rect) {
    let theme = &panel.theme;
    let width = area.width as usize;
    let mut lines = Vec::new();

    if let Some(err) = panel.preview.error() {
        lines.push(Line::from(Span::styled(
            truncate_label(err, width),
            Style::default().fg(theme.error),
        )));
    } else if let Some(doc) = panel.preview.current() {
        lines.push(Line::from(Span::styled(
            truncate_label(&format!("Preview: {}", doc.name), width),
            Style::default().fg(theme.foreground),
        )));
        lines.push(Line::from(Span::styled(
            truncate_label(&doc.path, width),
            Style::default().fg(theme.muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Use the modifier with ↑/↓ to navigate results",
            Style::default().fg(theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            "Previews appear here as you navigate",
            Style::default().fg(theme.muted),
        )));
    }

    if let Some(status) = &panel.status {
        lines.push(Line::from(Span::styled(
            truncate_label(status, width),
            Style::default().fg(theme.primary),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn truncate_label(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
