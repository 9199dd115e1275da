use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Todo, TodoFilter};
use crate::tui::app::{App, View};
use crate::util::unicode;

use super::helpers::spans_width;
use super::push_highlighted_spans;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render the list for the current tab: project card (Projects tab only),
/// filter bar, then rows
pub fn render_todo_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let card_height = if app.view == View::Projects { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(card_height),
            Constraint::Length(2), // filter bar + gap
            Constraint::Min(1),
        ])
        .split(area);

    if app.view == View::Projects {
        render_project_card(frame, app, chunks[0]);
    }
    render_filter_bar(frame, app, chunks[1]);
    render_rows(frame, app, chunks[2]);
}

fn render_project_card(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.bg;
    let dim = Style::default().fg(app.theme.muted).bg(bg);

    let lines = match &app.project {
        Some(project) => {
            let color = app.theme.project_color(project.color());
            let background = match project.background() {
                Some(path) => format!(" Background: {}", path),
                None => " No background image".to_string(),
            };
            vec![
                Line::from(vec![
                    Span::styled(" \u{25CF} ", Style::default().fg(color).bg(bg)),
                    Span::styled(
                        project.display_name().to_string(),
                        Style::default()
                            .fg(app.theme.fg_strong)
                            .bg(bg)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" \u{2022} ", dim),
                    Span::styled(
                        project.color().keyword().to_uppercase(),
                        Style::default().fg(color).bg(bg),
                    ),
                ]),
                Line::from(Span::styled(background, dim)),
            ]
        }
        None => vec![
            Line::from(Span::styled(
                " No project open",
                Style::default().fg(app.theme.fg_strong).bg(bg),
            )),
            Line::from(Span::styled(" p open a project   + create one", dim)),
        ],
    };

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.bg;
    let stats = app.stats();
    let current = app.list_state().filter;

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, filter) in TodoFilter::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                " \u{2502} ",
                Style::default().fg(app.theme.muted).bg(bg),
            ));
        }
        let style = if filter == current {
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.fg).bg(bg)
        };
        spans.push(Span::styled(
            format!("{} ({})", filter.label(), stats.count(filter)),
            style,
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_rows(frame: &mut Frame, app: &mut App, area: Rect) {
    let height = area.height as usize;
    let len = app.visible_todos().len();

    {
        let state = app.list_state_mut();
        if state.cursor < state.scroll_offset {
            state.scroll_offset = state.cursor;
        } else if height > 0 && state.cursor >= state.scroll_offset + height {
            state.scroll_offset = state.cursor + 1 - height;
        }
        state.scroll_offset = state.scroll_offset.min(len.saturating_sub(1));
    }

    let app = &*app;
    let bg = app.theme.bg;

    if len == 0 {
        let message = empty_message(app);
        let line = Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.muted).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let search_re = app.active_search_re();
    let state = app.list_state();
    let width = area.width as usize;
    let lines: Vec<Line> = app
        .visible_todos()
        .into_iter()
        .enumerate()
        .skip(state.scroll_offset)
        .take(height)
        .map(|(i, todo)| todo_line(app, todo, i == state.cursor, width, search_re.as_ref()))
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn empty_message(app: &App) -> &'static str {
    if app.view == View::Projects && app.project.is_none() {
        return "Pick a project to see its todos";
    }
    match app.list_state().filter {
        TodoFilter::All => "Nothing here yet. Press a to add a todo",
        TodoFilter::Active => "Nothing left to do",
        TodoFilter::Completed => "Nothing completed yet",
    }
}

/// One row: cursor bar, checkbox, ID, description, and the right-aligned date
fn todo_line<'a>(
    app: &App,
    todo: &Todo,
    is_cursor: bool,
    width: usize,
    search_re: Option<&regex::Regex>,
) -> Line<'a> {
    let bg = if is_cursor {
        app.theme.cursor_bg
    } else {
        app.theme.bg
    };
    let mut spans: Vec<Span> = Vec::new();

    if is_cursor {
        spans.push(Span::styled(
            "\u{258E}",
            Style::default().fg(app.theme.cursor_bar).bg(bg),
        ));
    } else {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    let check_color = if todo.completed {
        app.theme.done
    } else {
        app.theme.fg
    };
    spans.push(Span::styled(
        format!("[{}] ", todo.checkbox_char()),
        Style::default().fg(check_color).bg(bg),
    ));

    let id_color = if is_cursor {
        app.theme.cursor_id
    } else {
        app.theme.muted
    };
    spans.push(Span::styled(
        format!("{:>3} ", todo.id),
        Style::default().fg(id_color).bg(bg),
    ));

    let date = todo.created_at.format(DATE_FORMAT).to_string();
    let date_width = unicode::display_width(&date);
    let used = spans_width(&spans);
    let room = width.saturating_sub(used + date_width + 2);
    let description = unicode::truncate_to_width(&todo.description, room);

    let mut base = Style::default().fg(app.theme.fg).bg(bg);
    if todo.completed {
        base = base
            .fg(app.theme.muted)
            .add_modifier(Modifier::CROSSED_OUT);
    } else if is_cursor {
        base = base.fg(app.theme.fg_strong);
    }
    let highlight = Style::default()
        .fg(app.theme.match_fg)
        .bg(app.theme.match_bg);
    push_highlighted_spans(&mut spans, &description, base, highlight, search_re);

    let used = spans_width(&spans);
    let pad = width.saturating_sub(used + date_width + 1);
    spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    spans.push(Span::styled(date, Style::default().fg(app.theme.muted).bg(bg)));
    spans.push(Span::styled(" ", Style::default().bg(bg)));

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectColor;
    use crate::tui::render::test_helpers::*;
    use tempfile::TempDir;

    fn render_view(app: &mut App, h: u16) -> String {
        render_to_string(TERM_W, h, |frame, area| render_todo_view(frame, app, area))
    }

    #[test]
    fn rows_show_checkbox_id_and_date() {
        let tmp = TempDir::new().unwrap();
        write_todos(
            &tmp,
            "1|Buy milk|false|2025-03-04T09:15:00Z\n2|Walk dog|true|2025-03-05T10:00:00Z\n",
        );
        let mut app = app_in(&tmp);
        let out = render_view(&mut app, 6);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " All (2) \u{2502} Active (1) \u{2502} Completed (1)");
        // Newest first
        assert!(lines[2].starts_with("\u{258E}[x]   2 Walk dog"), "{}", lines[2]);
        assert!(lines[2].ends_with("2025-03-05 10:00"), "{}", lines[2]);
        assert!(lines[3].starts_with(" [ ]   1 Buy milk"), "{}", lines[3]);
        assert!(lines[3].ends_with("2025-03-04 09:15"), "{}", lines[3]);
    }

    #[test]
    fn filter_limits_rows() {
        let tmp = TempDir::new().unwrap();
        write_todos(
            &tmp,
            "1|Buy milk|false|2025-03-04T09:15:00Z\n2|Walk dog|true|2025-03-05T10:00:00Z\n",
        );
        let mut app = app_in(&tmp);
        app.set_filter(TodoFilter::Completed);
        let out = render_view(&mut app, 6);
        assert!(out.contains("Walk dog"));
        assert!(!out.contains("Buy milk"));
    }

    #[test]
    fn empty_list_shows_hint() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        let out = render_view(&mut app, 4);
        assert!(out.contains("Press a to add a todo"));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let tmp = TempDir::new().unwrap();
        let long = "word ".repeat(30);
        write_todos(&tmp, &format!("1|{}|false|2025-03-04T09:15:00Z\n", long.trim()));
        let mut app = app_in(&tmp);
        let out = render_to_string(40, 4, |frame, area| render_todo_view(frame, &mut app, area));
        let row = out.lines().nth(2).unwrap();
        assert!(row.contains('\u{2026}'));
        assert!(row.ends_with("2025-03-04 09:15"));
    }

    #[test]
    fn scroll_follows_cursor() {
        let tmp = TempDir::new().unwrap();
        let content: String = (1..=10)
            .map(|i| format!("{}|item {}|false|2025-03-04T09:15:00Z\n", i, i))
            .collect();
        write_todos(&tmp, &content);
        let mut app = app_in(&tmp);
        app.todo_list.cursor = 9;
        // 2 rows for the filter bar leaves 3 list rows
        let out = render_view(&mut app, 5);
        assert_eq!(app.todo_list.scroll_offset, 7);
        // Rows run from item 10 down to item 1
        assert!(out.contains("item 3 "));
        assert!(out.contains("item 1 "));
        assert!(!out.contains("item 4 "));
        assert!(!out.contains("item 10"));
    }

    #[test]
    fn project_card_shows_name_and_color() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.create_project("Garden", ProjectColor::Green);
        app.set_project_background("/tmp/leaf.png");
        let out = render_view(&mut app, 8);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " \u{25CF} Garden \u{2022} GREEN");
        assert_eq!(lines[1], " Background: /tmp/leaf.png");
    }

    #[test]
    fn projects_tab_without_project() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.view = View::Projects;
        let out = render_view(&mut app, 8);
        assert!(out.contains("No project open"));
        assert!(out.contains("Pick a project"));
    }
}
