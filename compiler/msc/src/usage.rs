//! Help, version and about text.
//!
//! Colors are raw ANSI escapes, emitted only when stdout is a terminal.

use std::io::IsTerminal;

/// ANSI color codes for terminal output.
mod colors {
    pub const HEADING: &str = "\x1b[1;32m"; // Bold green
    pub const ITEM: &str = "\x1b[1;34m"; // Bold blue
    pub const LINK: &str = "\x1b[1;38;5;208m"; // Bold orange
    pub const RESET: &str = "\x1b[0m";
}

pub const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

/// Paints text when colors are enabled.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    /// Colors on when stdout is a terminal.
    pub fn for_stdout() -> Self {
        Palette::new(std::io::stdout().is_terminal())
    }

    fn paint(self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_string()
        }
    }

    fn heading(self, text: &str) -> String {
        self.paint(colors::HEADING, text)
    }

    fn item(self, text: &str) -> String {
        self.paint(colors::ITEM, text)
    }
}

/// Usage text listing commands and options.
pub fn usage_text(palette: Palette) -> String {
    let rows = |entries: &[(&str, &str)]| {
        entries
            .iter()
            .map(|(name, help)| format!("  {}{help}\n", palette.item(&format!("{name:<22}"))))
            .collect::<String>()
    };
    let mut text = String::new();
    text.push_str(&format!(
        "{} {}\n\n",
        palette.heading("Usage:"),
        palette.item("msc <command> [options]")
    ));
    text.push_str(&format!("{}\n", palette.heading("Commands:")));
    text.push_str(&rows(&[
        ("run <file>", "Run a MicroScript file (.microscript, .mus, .micros)"),
        ("<file>", "Shorthand for `run <file>`"),
        ("about", "Show about information"),
    ]));
    text.push_str(&format!("\n{}\n", palette.heading("Options:")));
    text.push_str(&rows(&[
        ("--help", "Show help information"),
        ("--version", "Show version information"),
    ]));
    text.push_str(&format!("\n{}\n", palette.heading("Run options:")));
    text.push_str(&rows(&[
        ("--assign=<mode>", "shadow (default) or enclosing"),
        ("--max-depth=<n>", "Maximum nested calls (default 1024)"),
    ]));
    text.push_str(&format!("\n{}\n", palette.heading("Logging:")));
    text.push_str(&rows(&[("MSC_LOG=<filter>", "e.g. MSC_LOG=ms_eval=debug")]));
    text
}

/// Usage plus a pointer to the project page.
pub fn help_text(palette: Palette) -> String {
    format!(
        "{}\nFor more information, visit: {}\n",
        usage_text(palette),
        palette.paint(colors::LINK, REPOSITORY)
    )
}

pub fn version_text(palette: Palette) -> String {
    palette.item(&format!("MicroScript {}", env!("CARGO_PKG_VERSION")))
}

pub fn about_text(palette: Palette) -> String {
    format!(
        "{}\nA small interpreted scripting language.\n{}",
        palette.item("MicroScript - The programming language"),
        palette.paint(colors::LINK, REPOSITORY)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_escapes() {
        let text = help_text(Palette::new(false));
        assert!(!text.contains("\x1b["));
        assert!(text.contains("run <file>"));
        assert!(text.contains("--max-depth=<n>"));
    }

    #[test]
    fn colored_text_uses_ansi() {
        assert!(usage_text(Palette::new(true)).contains("\x1b[1;32mUsage:\x1b[0m"));
        assert!(version_text(Palette::new(true)).ends_with(colors::RESET));
    }

    #[test]
    fn version_names_the_crate_version() {
        assert_eq!(
            version_text(Palette::new(false)),
            format!("MicroScript {}", env!("CARGO_PKG_VERSION"))
        );
    }
}
