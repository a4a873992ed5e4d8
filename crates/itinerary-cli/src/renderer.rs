//! Terminal rendering of markdown output.
//!
//! Everything the CLI prints is markdown produced by the core's `Display`
//! implementations. With color enabled it goes through termimad; otherwise it
//! is printed as is.

use std::fmt::Display;

use itinerary_core::BusinessHoursStatus;
use termimad::{
    crossterm::style::{style, Color, Stylize},
    MadSkin,
};

/// Prints markdown either styled for a terminal or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }

        // Headers keep their hash marks so day and item levels stay visible
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("{}", style(line).with(header_color(line)));
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }

    /// Renders anything displayable as markdown.
    pub fn show(&self, value: &impl Display) {
        self.render(&value.to_string());
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Item headers carry a business-hours badge; tint them by it.
fn header_color(line: &str) -> Color {
    if line.contains(BusinessHoursStatus::Closed.with_icon()) {
        Color::Red
    } else if line.contains(BusinessHoursStatus::ClosingSoon.with_icon()) {
        Color::Yellow
    } else {
        Color::Cyan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_header_color_follows_badge() {
        assert_eq!(header_color("## Day 1 (2024-05-01)"), Color::Cyan);
        assert_eq!(
            header_color("### 1. 08:50–10:20 Gyeongbokgung (○ Closed)"),
            Color::Red
        );
        assert_eq!(
            header_color("### 2. 17:45–19:15 Market (◐ Closing soon)"),
            Color::Yellow
        );
        assert_eq!(header_color("### 3. 12:00–13:00 Cafe (● Open)"), Color::Cyan);
    }
}
