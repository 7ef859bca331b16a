//! Terminal rendering for markdown output
//!
//! Rich output goes through termimad with a skin picked from the theme
//! preference. With colors disabled the markdown is printed as is.

use cadence_core::models::Theme;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    // ANSI color code for header lines
    header_ansi: u8,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool, theme: Theme) -> Self {
        let (mut skin, header_ansi, accent) = match theme {
            Theme::Light => (MadSkin::default_light(), 34, Color::DarkMagenta),
            Theme::Dark => (MadSkin::default_dark(), 94, Color::Yellow),
            Theme::System => (MadSkin::default(), 34, Color::Yellow),
        };
        skin.bold.set_fg(accent);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self {
            rich_enabled,
            header_ansi,
            skin,
        }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }
        for line in markdown.lines() {
            if line.starts_with('#') {
                // Keep the hash marks visible, termimad would strip them
                println!("\x1b[{}m{line}\x1b[0m", self.header_ansi);
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }
}
