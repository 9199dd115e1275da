pub mod celebration;
pub mod confirm_popup;
pub mod error_popup;
pub mod help_overlay;
mod helpers;
pub mod picker_popup;
pub mod status_row;
pub mod tab_bar;
pub mod todo_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.bg);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tab bar + separator
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);
    todo_view::render_todo_view(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays, bottom to top
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
    if app.picker.is_some() {
        picker_popup::render_picker_popup(frame, app, area);
    }
    if app.confirm.is_some() {
        confirm_popup::render_confirm_popup(frame, app, area);
    }
    if app.celebration.is_some() {
        celebration::render_celebration(frame, app, area);
    }
    if app.error.is_some() {
        error_popup::render_error_popup(frame, app, area);
    }
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.is_empty() {
            continue;
        }
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
