//! Terminal rendering of the planner's markdown output.
//!
//! Week views, task cards and status lines are rendered with a termimad skin,
//! or printed verbatim when colors are disabled.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown either styled or as plain text
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_fg(Color::Green);
        skin.inline_code.set_bg(Color::AnsiValue(236));

        Self { rich_enabled, skin }
    }

    /// Prints `markdown` to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line {
                // Week headings stand out from task headings
                l if l.starts_with("# ") => println!("\x1b[1;36m{l}\x1b[0m"),
                l if l.starts_with('#') => println!("\x1b[36m{l}\x1b[0m"),
                l if l.starts_with("Error:") => println!("\x1b[31m{l}\x1b[0m"),
                l => {
                    self.skin.print_inline(l);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("# Week of 2026-10-19\n").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
