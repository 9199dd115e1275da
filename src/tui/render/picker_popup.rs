use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::model::ProjectColor;
use crate::tui::app::{App, PickerKind};
use crate::util::unicode;

use super::helpers::{centered_rect_fixed, popup_block};

const POPUP_WIDTH: u16 = 36;

/// Project or color chooser
pub fn render_picker_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(picker) = &app.picker else {
        return;
    };
    let bg = app.theme.bg;
    let inner_width = POPUP_WIDTH.min(area.width).saturating_sub(2) as usize;

    let row_style = |selected: bool| {
        if selected {
            Style::default()
                .fg(app.theme.fg_strong)
                .bg(app.theme.cursor_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.fg).bg(bg)
        }
    };

    let mut lines: Vec<Line> = match &picker.kind {
        PickerKind::Project { names } if names.is_empty() => vec![Line::from(Span::styled(
            " No projects yet (+ creates one)",
            Style::default().fg(app.theme.muted).bg(bg),
        ))],
        PickerKind::Project { names } => names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let selected = i == picker.cursor;
                let label = unicode::truncate_to_width(name, inner_width.saturating_sub(2));
                let pad = inner_width.saturating_sub(unicode::display_width(&label) + 1);
                Line::from(Span::styled(
                    format!(" {}{}", label, " ".repeat(pad)),
                    row_style(selected),
                ))
            })
            .collect(),
        PickerKind::NewProjectColor { .. } | PickerKind::ProjectColor => ProjectColor::ALL
            .iter()
            .enumerate()
            .map(|(i, color)| {
                let selected = i == picker.cursor;
                let style = row_style(selected);
                let label = format!(" {}", color.keyword());
                let pad = inner_width.saturating_sub(label.len() + 2);
                Line::from(vec![
                    Span::styled(
                        " \u{25CF}",
                        style.fg(app.theme.project_color(*color)),
                    ),
                    Span::styled(format!("{}{}", label, " ".repeat(pad)), style),
                ])
            })
            .collect(),
    };

    if let PickerKind::NewProjectColor { name } = &picker.kind {
        lines.insert(
            0,
            Line::from(Span::styled(
                format!(" Color for {}", unicode::truncate_to_width(name, inner_width.saturating_sub(11))),
                Style::default().fg(app.theme.muted).bg(bg),
            )),
        );
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = centered_rect_fixed(POPUP_WIDTH, height, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(popup_block(app, picker.title(), app.theme.accent)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn lists_projects_newest_first() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.create_project("Alpha", ProjectColor::Blue);
        app.open_project_picker();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_picker_popup(frame, &app, area)
        });
        assert!(out.contains("Open project"));
        assert!(out.contains("Alpha"));
    }

    #[test]
    fn empty_project_list() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.open_project_picker();
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_picker_popup(frame, &app, area)
        });
        assert!(out.contains("No projects yet"));
    }

    #[test]
    fn color_picker_lists_every_color() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp);
        app.begin_project_creation("Garden");
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_picker_popup(frame, &app, area)
        });
        assert!(out.contains("Color for Garden"));
        for color in ProjectColor::ALL {
            assert!(out.contains(&format!("\u{25CF} {}", color.keyword())), "{}", color);
        }
    }
}
