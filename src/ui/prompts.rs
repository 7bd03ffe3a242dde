//! Confirmation prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use std::io::BufRead;

use crate::error::{CfError, Result};

/// Convert dialoguer errors to CfError.
fn map_dialoguer_err(e: dialoguer::Error) -> CfError {
    CfError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask a yes/no question on an attached terminal. Defaults to no.
pub fn confirm_on_term(question: &str, term: &Term) -> Result<bool> {
    Confirm::with_theme(&prompt_theme())
        .with_prompt(question)
        .default(false)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}

/// Read one answer line from a non-terminal input.
pub fn confirm_from_reader(reader: &mut dyn BufRead) -> Result<bool> {
    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    Ok(parse_confirmation(&answer))
}

/// `y` and `yes` in any case mean yes. Everything else means no.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn yes_answers() {
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("YES\n"));
        assert!(parse_confirmation("  Yes "));
    }

    #[test]
    fn everything_else_is_no() {
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("yep"));
    }

    #[test]
    fn reads_first_line_only() {
        let mut input = Cursor::new("y\nn\n");
        assert!(confirm_from_reader(&mut input).unwrap());
        assert!(!confirm_from_reader(&mut input).unwrap());
    }

    #[test]
    fn empty_input_is_no() {
        let mut input = Cursor::new("");
        assert!(!confirm_from_reader(&mut input).unwrap());
    }
}
