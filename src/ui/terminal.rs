//! Terminal UI.

use console::Term;
use std::io::{IsTerminal, Write};

use crate::error::Result;

use super::prompts::confirm_from_reader;
use super::{confirm_on_term, should_use_colors, CfTheme, Table, UserInterface};

/// Terminal UI implementation writing to stdout.
pub struct TerminalUI {
    term: Term,
    theme: CfTheme,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new() -> Self {
        let theme = if should_use_colors() {
            CfTheme::new()
        } else {
            CfTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
        }
    }
}

impl Default for TerminalUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UserInterface for TerminalUI {
    fn say(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn ok(&mut self) {
        writeln!(self.term, "{}", self.theme.format_ok()).ok();
    }

    fn warn(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn failed(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_failed()).ok();
        writeln!(self.term, "{}", msg).ok();
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.is_interactive() && std::io::stdin().is_terminal() {
            return confirm_on_term(question, &self.term);
        }

        write!(self.term, "{}> ", question).ok();
        self.term.flush().ok();
        let stdin = std::io::stdin();
        let answer = confirm_from_reader(&mut stdin.lock())?;
        writeln!(self.term).ok();
        Ok(answer)
    }

    fn print_table(&mut self, table: &Table) {
        if let Some(header) = table.render_header() {
            writeln!(self.term, "{}", self.theme.format_header(&header)).ok();
        }
        for row in table.render_rows() {
            writeln!(self.term, "{}", row).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}
