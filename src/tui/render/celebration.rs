use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::fireworks::Simulation;
use crate::tui::app::{App, Celebration};
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::{centered_rect_fixed, popup_block};

const OVERLAY_WIDTH: u16 = 64;
const OVERLAY_HEIGHT: u16 = 22;

/// Descriptions longer than this are cut with `…`
pub const DESCRIPTION_WIDTH: usize = 30;

/// Sprites fainter than this draw dimmed
const DIM_ALPHA: f64 = 0.4;

/// The fireworks overlay: title, canvas, what was completed, encouragement
pub fn render_celebration(frame: &mut Frame, app: &App, area: Rect) {
    let Some(celebration) = &app.celebration else {
        return;
    };
    let bg = app.theme.bg;
    let overlay = centered_rect_fixed(OVERLAY_WIDTH, OVERLAY_HEIGHT, area);
    frame.render_widget(Clear, overlay);

    let block = popup_block(app, " Done! ", app.theme.accent).title_alignment(Alignment::Center);
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // congratulations
            Constraint::Min(3),    // canvas
            Constraint::Length(4), // description + encouragement
        ])
        .split(inner);

    let bold = |color: Color| Style::default().fg(color).bg(bg).add_modifier(Modifier::BOLD);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "\u{2726} Congratulations! \u{2726}",
            bold(app.theme.celebrate),
        )))
        .alignment(Alignment::Center),
        chunks[0],
    );

    draw_canvas(
        frame.buffer_mut(),
        chunks[1],
        celebration.show.simulation(),
        &app.theme,
    );

    frame.render_widget(
        Paragraph::new(footer_lines(app, celebration)).alignment(Alignment::Center),
        chunks[2],
    );
}

fn footer_lines<'a>(app: &App, celebration: &Celebration) -> Vec<Line<'a>> {
    let bg = app.theme.bg;
    vec![
        Line::from(vec![
            Span::styled("Completed: ", Style::default().fg(app.theme.fg).bg(bg)),
            Span::styled(
                unicode::truncate_to_width(&celebration.description, DESCRIPTION_WIDTH),
                Style::default()
                    .fg(app.theme.fg_strong)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "Great work, one less thing to do!",
            Style::default()
                .fg(app.theme.fg)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            "Keep it up!",
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "press any key",
            Style::default().fg(app.theme.muted).bg(bg),
        )),
    ]
}

/// Map simulation coordinates onto cells of `area` and draw each sprite.
/// Trails go first so live particles land on top.
fn draw_canvas(buf: &mut Buffer, area: Rect, sim: &Simulation, theme: &Theme) {
    if area.width == 0 || area.height == 0 || sim.width() <= 0.0 || sim.height() <= 0.0 {
        return;
    }
    let sx = f64::from(area.width) / sim.width();
    let sy = f64::from(area.height) / sim.height();

    for sprite in sim.sprites() {
        let col = (sprite.x * sx).floor();
        let row = (sprite.y * sy).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(area.width) || row >= f64::from(area.height)
        {
            continue;
        }
        let pos = Position::new(area.x + col as u16, area.y + row as u16);

        let mut style = Style::default()
            .fg(theme.spark_color(sprite.spark))
            .bg(theme.bg);
        if sprite.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if sprite.trail || sprite.alpha < DIM_ALPHA {
            style = style.add_modifier(Modifier::DIM);
        }

        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(sprite.glyph).set_style(style);
        }
    }
}
