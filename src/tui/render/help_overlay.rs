use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::app::{App, View};

use super::helpers::{centered_rect, popup_block};

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 90, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.bg;
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.fg).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.fg_strong)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Todos", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor", key_style, desc_style);
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    add_binding(&mut lines, " a", "Add a todo", key_style, desc_style);
    add_binding(&mut lines, " x/Enter", "Complete", key_style, desc_style);
    add_binding(&mut lines, " d", "Delete", key_style, desc_style);
    add_binding(&mut lines, " 1/2/3", "All / Active / Completed", key_style, desc_style);
    add_binding(&mut lines, " \u{2190}\u{2192}/hl", "Previous/next filter", key_style, desc_style);
    add_binding(&mut lines, " /", "Search", key_style, desc_style);
    add_binding(&mut lines, " n/N", "Next/prev match", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Projects", header_style)));
    add_binding(&mut lines, " p", "Open a project", key_style, desc_style);
    add_binding(&mut lines, " +", "New project", key_style, desc_style);
    if app.view == View::Projects {
        add_binding(&mut lines, " c", "Project color", key_style, desc_style);
        add_binding(&mut lines, " b", "Background image", key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Tab", "Switch tab", key_style, desc_style);
    add_binding(&mut lines, " t", "Light/dark theme", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let paragraph = Paragraph::new(lines)
        .block(popup_block(app, " Key Bindings ", app.theme.muted))
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
