//! Visual theme and styling.

use console::Style;

/// The client's visual theme.
#[derive(Debug, Clone)]
pub struct CfTheme {
    /// Style for the `OK` marker (green bold).
    pub success: Style,
    /// Style for warnings (yellow).
    pub warning: Style,
    /// Style for the `FAILED` marker (red bold).
    pub error: Style,
    /// Style for table headers (bold).
    pub header: Style,
    /// Style for names of entities inside messages (cyan bold).
    pub entity: Style,
}

impl Default for CfTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl CfTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green().bold(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            header: Style::new().bold(),
            entity: Style::new().cyan().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY, `--no-color` or `CF_COLOR=false`).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            header: Style::new(),
            entity: Style::new(),
        }
    }

    pub fn format_ok(&self) -> String {
        format!("{}", self.success.apply_to("OK"))
    }

    pub fn format_failed(&self) -> String {
        format!("{}", self.error.apply_to("FAILED"))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(msg))
    }

    pub fn format_header(&self, line: &str) -> String {
        format!("{}", self.header.apply_to(line))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::colors_enabled() && console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_markers() {
        let theme = CfTheme::plain();
        assert_eq!(theme.format_ok(), "OK");
        assert_eq!(theme.format_failed(), "FAILED");
        assert_eq!(theme.format_warning("careful"), "careful");
    }

    #[test]
    fn default_theme_keeps_text() {
        let theme = CfTheme::default();
        assert!(theme.format_ok().contains("OK"));
        assert!(theme.format_header("name   space").contains("name   space"));
    }
}
