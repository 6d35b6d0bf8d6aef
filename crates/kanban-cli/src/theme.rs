//! Color and style helpers for the board render.
//!
//! Color is enabled when stdout is a TTY and `NO_COLOR` is unset, or when
//! `FORCE_COLOR` is truthy; `--plain` wins over everything. Disabled
//! output is byte-identical apart from the absence of escape codes.

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::tty::IsTty;
use kanban_core::TaskStatus;
use std::io;

pub const PRIMARY: Color = Color::Rgb { r: 0x47, g: 0x6E, b: 0xAE };
const TODO: Color = Color::Rgb { r: 0x48, g: 0xB3, b: 0xAF };
const IN_PROGRESS: Color = Color::Rgb { r: 0xF6, g: 0xFF, b: 0x99 };
const DONE: Color = Color::Rgb { r: 0xA7, g: 0xE3, b: 0x99 };

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => TODO,
        TaskStatus::InProgress => IN_PROGRESS,
        TaskStatus::Done => DONE,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    pub fn detect(plain_flag: bool) -> Self {
        if plain_flag {
            return Self::plain();
        }
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let force = matches!(
            std::env::var("FORCE_COLOR").ok().as_deref(),
            Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
        );
        Self {
            enabled: (force || io::stdout().is_tty()) && !no_color,
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Colors on regardless of the environment; used by tests and
    /// honored indirectly via `FORCE_COLOR` in `detect`.
    pub fn forced() -> Self {
        Self { enabled: true }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        self.styled(text, color, None)
    }

    pub fn paint_bold(&self, text: &str, color: Color) -> String {
        self.styled(text, color, Some(Attribute::Bold))
    }

    pub fn paint_dim(&self, text: &str, color: Color) -> String {
        self.styled(text, color, Some(Attribute::Dim))
    }

    fn styled(&self, text: &str, color: Color, attribute: Option<Attribute>) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        match attribute {
            Some(attr) => format!(
                "{}{}{}{}",
                SetAttribute(attr),
                SetForegroundColor(color),
                text,
                SetAttribute(Attribute::Reset)
            ),
            None => format!(
                "{}{}{}",
                SetForegroundColor(color),
                text,
                SetAttribute(Attribute::Reset)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_passes_text_through_untouched() {
        let theme = Theme::plain();
        assert_eq!(theme.paint("TO DO", PRIMARY), "TO DO");
        assert_eq!(theme.paint_bold("1.", PRIMARY), "1.");
        assert!(!theme.enabled());
    }

    #[test]
    fn enabled_theme_wraps_text_in_escape_codes() {
        let theme = Theme { enabled: true };
        let painted = theme.paint("task", status_color(TaskStatus::Todo));
        assert!(painted.starts_with('\x1b'));
        assert!(painted.contains("task"));
        assert!(painted.ends_with("\x1b[0m"));
    }

    #[test]
    fn empty_text_never_emits_codes() {
        let theme = Theme { enabled: true };
        assert_eq!(theme.paint("", PRIMARY), "");
    }

    #[test]
    fn each_status_has_a_distinct_color() {
        let todo = status_color(TaskStatus::Todo);
        let wip = status_color(TaskStatus::InProgress);
        let done = status_color(TaskStatus::Done);
        assert_ne!(todo, wip);
        assert_ne!(wip, done);
        assert_ne!(todo, done);
    }
}
