use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, popup_block, wrap_text};

const POPUP_WIDTH: u16 = 50;

/// y/n popup for a pending destructive action
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(confirm) = &app.confirm else {
        return;
    };
    let bg = app.theme.bg;

    let inner_width = POPUP_WIDTH.min(area.width).saturating_sub(4) as usize;
    let mut lines: Vec<Line> = wrap_text(&confirm.message, inner_width)
        .into_iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(app.theme.fg_strong).bg(bg))))
        .collect();
    lines.push(Line::from(""));
    let key_style = Style::default()
        .fg(app.theme.accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.fg).bg(bg);
    lines.push(Line::from(vec![
        Span::styled(" y", key_style),
        Span::styled(" yes   ", desc_style),
        Span::styled("n", key_style),
        Span::styled(" no", desc_style),
    ]));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect_fixed(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(popup_block(app, " Confirm ", app.theme.accent)),
        popup,
    );
}
