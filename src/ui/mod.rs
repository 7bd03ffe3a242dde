//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for capturing output in tests
//! - [`Table`] for column-aligned output
//!
//! # Example
//!
//! ```
//! use cf::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.say("Creating quota my-quota as admin...");
//! ui.ok();
//!
//! assert!(ui.has_output("Creating quota my-quota"));
//! assert!(ui.has_output("OK"));
//! ```

pub mod mock;
pub mod prompts;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use prompts::{confirm_on_term, parse_confirmation};
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, CfTheme};

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;

/// A UI shared between the runner and the command it dispatches.
pub type SharedUi = Rc<RefCell<dyn UserInterface>>;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Print a line.
    fn say(&mut self, msg: &str);

    /// Print the success marker.
    fn ok(&mut self);

    /// Print a warning. Warnings never change the exit code.
    fn warn(&mut self, msg: &str);

    /// Print the failure marker followed by `msg`.
    ///
    /// This only reports; the caller still has to return the error.
    fn failed(&mut self, msg: &str);

    /// Ask a yes/no question. Anything but yes is a no.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Print a table.
    fn print_table(&mut self, table: &Table);

    /// Check if running attached to a terminal.
    fn is_interactive(&self) -> bool;

    /// Ask before deleting `model` named `name`.
    fn confirm_delete(&mut self, model: &str, name: &str) -> Result<bool> {
        self.confirm(&format!("Really delete the {} {}?", model, name))
    }

    /// Start a table with these headers. Rows are added by the caller and
    /// nothing is printed until [`UserInterface::print_table`].
    fn table(&self, headers: &[&str]) -> Table {
        Table::new(headers.to_vec())
    }

    /// Print aligned `key: value` lines.
    fn print_key_values(&mut self, pairs: &[(&str, String)]) {
        let width = pairs.iter().map(|(k, _)| k.len() + 1).max().unwrap_or(0);
        for (key, value) in pairs {
            let label = format!("{}:", key);
            self.say(format!("{:width$}   {}", label, value, width = width).trim_end());
        }
    }
}
