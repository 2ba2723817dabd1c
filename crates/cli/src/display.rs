//! Terminal styling for command output

use crossterm::style::Stylize;
use std::io::IsTerminal;

/// Whether stdout should carry ANSI colors
pub fn use_color() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

pub fn muted(text: &str, color: bool) -> String {
    if color {
        text.dark_grey().to_string()
    } else {
        text.to_string()
    }
}

pub fn success(text: &str, color: bool) -> String {
    if color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_is_unstyled() {
        assert_eq!(heading("Tasks", false), "Tasks");
        assert_eq!(muted("(exec)", false), "(exec)");
        assert!(heading("Tasks", true).contains("\u{1b}["));
    }
}
