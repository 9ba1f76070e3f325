use ratatui::style::{Color, Modifier, Style};

use crate::model::config::UiConfig;

/// Colors for the TUI. Every slot can be overridden from `[ui.colors]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub done: Color,
    pub error: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            done: Color::Rgb(0x44, 0xFF, 0x88),
            error: Color::Rgb(0xFF, 0x44, 0x44),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }
}

/// Parse `#RRGGBB`
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

impl Theme {
    /// Defaults with `[ui.colors]` applied. Unknown slots and malformed
    /// colors are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (slot, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %slot, value = %value, "ignoring malformed color");
                continue;
            };
            match theme.slot_mut(slot) {
                Some(target) => *target = color,
                None => tracing::warn!(slot = %slot, "ignoring unknown color slot"),
            }
        }
        theme
    }

    fn slot_mut(&mut self, slot: &str) -> Option<&mut Color> {
        Some(match slot {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "highlight" => &mut self.highlight,
            "dim" => &mut self.dim,
            "done" => &mut self.done,
            "error" => &mut self.error,
            "selection_bg" => &mut self.selection_bg,
            "search_match_bg" => &mut self.search_match_bg,
            "search_match_fg" => &mut self.search_match_fg,
            _ => return None,
        })
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim).bg(self.background)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.text_bright)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn search_match(&self) -> Style {
        Style::default()
            .fg(self.search_match_fg)
            .bg(self.search_match_bg)
    }
}
