use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

const NAVIGATE_HINT: &str = "a add  x done  d delete  / search  ? help";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.bg;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.muted).bg(bg);

    let (mut spans, hint): (Vec<Span>, &str) = match app.mode {
        Mode::Navigate => {
            if let Some(message) = &app.status_message {
                (
                    vec![Span::styled(
                        message.clone(),
                        Style::default().fg(app.theme.fg_strong).bg(bg),
                    )],
                    "",
                )
            } else if let Some(pattern) = &app.last_search {
                (vec![Span::styled(format!("/{}", pattern), dim)], "n/N next/prev")
            } else if app.config.ui.show_key_hints {
                (Vec::new(), NAVIGATE_HINT)
            } else {
                (Vec::new(), "")
            }
        }
        Mode::Search => (
            vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.fg_strong).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.accent).bg(bg)), // ▌ cursor
            ],
            "Enter search  Esc cancel",
        ),
        Mode::Input => match &app.input {
            Some(input) => {
                let (before, after) = input.buffer.split_at(input.cursor.min(input.buffer.len()));
                (
                    vec![
                        Span::styled(
                            input.purpose.prompt(),
                            Style::default().fg(app.theme.accent).bg(bg),
                        ),
                        Span::styled(
                            before.to_string(),
                            Style::default().fg(app.theme.fg_strong).bg(bg),
                        ),
                        Span::styled("\u{258C}", Style::default().fg(app.theme.accent).bg(bg)),
                        Span::styled(
                            after.to_string(),
                            Style::default().fg(app.theme.fg_strong).bg(bg),
                        ),
                    ],
                    "Enter save  Esc cancel",
                )
            }
            None => (Vec::new(), ""),
        },
        Mode::Confirm => (Vec::new(), "y confirm  n cancel"),
        Mode::Picker => (Vec::new(), "j/k move  Enter select  Esc cancel"),
    };

    // Right-align the hint when it fits
    let content_width = spans_width(&spans);
    let hint_width = unicode::display_width(hint);
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{InputPurpose, InputState};
    use crate::tui::render::test_helpers::*;
    use tempfile::TempDir;

    fn status(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_shows_key_hints() {
        let tmp = TempDir::new().unwrap();
        let app = app_in(&tmp);
        let out = status(&app);
        assert!(out.ends_with(NAVIGATE_HINT));
    }

    #[test]
    fn status_message_replaces_hints() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.add_todo("Buy milk");
        assert_eq!(status(&app), "added: Buy milk");
    }

    #[test]
    fn input_prompt_shows_cursor() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        let mut input = InputState::with_text(InputPurpose::AddTodo, "Buy milk");
        input.cursor = 3;
        app.begin_input(input);
        let out = status(&app);
        assert!(out.starts_with("add: Buy\u{258C} milk"), "{}", out);
        assert!(out.ends_with("Enter save  Esc cancel"));
    }

    #[test]
    fn search_prompt() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.mode = Mode::Search;
        app.search_input = "mil".into();
        assert!(status(&app).starts_with("/mil\u{258C}"));
    }
}
