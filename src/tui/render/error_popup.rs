use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, popup_block, wrap_text};

const POPUP_WIDTH: u16 = 56;

/// Modal for errors; dismissed with Enter or Esc
pub fn render_error_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = &app.error else {
        return;
    };
    let bg = app.theme.bg;
    let inner_width = POPUP_WIDTH.min(area.width).saturating_sub(4) as usize;

    let mut lines: Vec<Line> = wrap_text(message, inner_width)
        .into_iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(app.theme.fg_strong).bg(bg))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter dismiss",
        Style::default().fg(app.theme.muted).bg(bg),
    )));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(popup_block(app, " Error ", app.theme.danger)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn wraps_long_messages() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.error = Some(
            "Could not save: failed to write /some/very/long/path/todos.txt: permission denied"
                .into(),
        );
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_error_popup(frame, &app, area)
        });
        assert!(out.contains("Error"));
        assert!(out.contains("Could not save"));
        assert!(out.contains("permission denied"));
        assert!(out.contains("Enter dismiss"));
    }
}
