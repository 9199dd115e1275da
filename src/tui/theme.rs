use ratatui::style::Color;

use crate::fireworks::Spark;
use crate::model::{ProjectColor, ThemeMode, UiConfig};

/// Colors the TUI draws with, by role
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub bg: Color,
    pub fg: Color,
    pub fg_strong: Color,
    pub muted: Color,
    pub accent: Color,
    /// Checkmarks on completed todos and the tab bar logo
    pub done: Color,
    pub danger: Color,
    pub celebrate: Color,
    pub cursor_bg: Color,
    pub cursor_bar: Color,
    pub cursor_id: Color,
    pub match_bg: Color,
    pub match_fg: Color,
    /// One per [`ProjectColor`], in declaration order
    pub swatches: [Color; 8],
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            bg: rgb(0xFDFCF9),
            fg: rgb(0x2F3437),
            fg_strong: rgb(0x111417),
            muted: rgb(0x8A9096),
            accent: rgb(0x2867C7),
            done: rgb(0x2F8F4E),
            danger: rgb(0xC0392B),
            celebrate: rgb(0xC77C02),
            cursor_bg: rgb(0xE6EEF9),
            cursor_bar: rgb(0x2867C7),
            cursor_id: rgb(0x1B4A91),
            match_bg: rgb(0xFFE58A),
            match_fg: rgb(0x111417),
            swatches: [
                rgb(0x2867C7),
                rgb(0xC0392B),
                rgb(0x2F8F4E),
                rgb(0xC9A100),
                rgb(0xE07B16),
                rgb(0x7D3CB5),
                rgb(0x8B5A2B),
                rgb(0x1A1A1A),
            ],
        }
    }

    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            bg: rgb(0x161A1F),
            fg: rgb(0xC9D1D9),
            fg_strong: rgb(0xF5F7FA),
            muted: rgb(0x6E7781),
            accent: rgb(0x58A6FF),
            done: rgb(0x56D364),
            danger: rgb(0xF85149),
            celebrate: rgb(0xFFD33D),
            cursor_bg: rgb(0x1F2A38),
            cursor_bar: rgb(0x58A6FF),
            cursor_id: rgb(0xA5C8FF),
            match_bg: rgb(0x3FB9A8),
            match_fg: rgb(0x161A1F),
            swatches: [
                rgb(0x58A6FF),
                rgb(0xF85149),
                rgb(0x56D364),
                rgb(0xFFD33D),
                rgb(0xFF9640),
                rgb(0xBC8CFF),
                rgb(0xC08A5B),
                rgb(0x8B949E),
            ],
        }
    }

    /// Base palette for `mode`, with `[ui.colors]` overrides applied on top.
    ///
    /// Override keys are the role names (`accent`, `match_bg`, ...) or a
    /// project color keyword to recolor that swatch. Unknown keys and bad
    /// hex values are ignored.
    pub fn for_mode(mode: ThemeMode, ui: &UiConfig) -> Self {
        let mut theme = match mode {
            ThemeMode::Light => Theme::light(),
            ThemeMode::Dark => Theme::dark(),
        };
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::debug!(key = %key, value = %value, "ignoring color override");
                continue;
            };
            if let Some(slot) = theme.slot_mut(key) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_config(ui: &UiConfig) -> Self {
        Theme::for_mode(ui.theme, ui)
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        let slot = match key {
            "bg" => &mut self.bg,
            "fg" => &mut self.fg,
            "fg_strong" => &mut self.fg_strong,
            "muted" => &mut self.muted,
            "accent" => &mut self.accent,
            "done" => &mut self.done,
            "danger" => &mut self.danger,
            "celebrate" => &mut self.celebrate,
            "cursor_bg" => &mut self.cursor_bg,
            "cursor_bar" => &mut self.cursor_bar,
            "cursor_id" => &mut self.cursor_id,
            "match_bg" => &mut self.match_bg,
            "match_fg" => &mut self.match_fg,
            other => {
                let color = other.parse::<ProjectColor>().ok()?;
                &mut self.swatches[color as usize]
            }
        };
        Some(slot)
    }

    /// Swatch color for a project
    pub fn project_color(&self, color: ProjectColor) -> Color {
        self.swatches[color as usize]
    }

    /// Color a firework spark draws in
    pub fn spark_color(&self, spark: Spark) -> Color {
        let swatch = |c: ProjectColor| self.project_color(c);
        match spark {
            Spark::Rocket => self.accent,
            Spark::Sparkler | Spark::ShootingStar => swatch(ProjectColor::Blue),
            Spark::Sparkles | Spark::Star => self.celebrate,
            Spark::GlowingStar => swatch(ProjectColor::Yellow),
            Spark::Dizzy => swatch(ProjectColor::Purple),
            Spark::Collision => self.danger,
            Spark::Fire => swatch(ProjectColor::Orange),
            Spark::Confetti => self.done,
        }
    }
}

/// `#RRGGBB` to an RGB color
fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(rgb)
}
