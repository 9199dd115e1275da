use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, View};

use super::helpers::spans_width;

/// Render the tab bar: Todos and Projects tabs, with separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.bg;
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.muted).bg(bg));

    spans.push(Span::styled(" ", Style::default().bg(bg)));
    spans.push(Span::styled(
        "\u{2713}",
        Style::default().fg(app.theme.done).bg(bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    let is_todos = app.view == View::Todos;
    spans.push(Span::styled(
        format!(" Todos {} ", app.todos.active().len()),
        tab_style(app, is_todos),
    ));
    sep_cols.push(spans_width(&spans));
    spans.push(sep.clone());

    // Projects tab, with a swatch in the open project's color
    let is_projects = app.view == View::Projects;
    let style = tab_style(app, is_projects);
    let tab_bg = if is_projects { app.theme.cursor_bg } else { bg };
    spans.push(Span::styled(" Projects ", style));
    if let Some(project) = &app.project {
        spans.push(Span::styled(
            "\u{25CF}",
            Style::default()
                .fg(app.theme.project_color(project.color()))
                .bg(tab_bg),
        ));
        spans.push(Span::styled(format!(" {} ", project.display_name()), style));
    }
    sep_cols.push(spans_width(&spans));
    spans.push(sep);

    let tabs = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.muted).bg(app.theme.bg));
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.fg_strong)
            .bg(app.theme.cursor_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.fg).bg(app.theme.bg)
    }
}
