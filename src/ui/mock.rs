//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined confirmation answers.
//!
//! # Example
//!
//! ```
//! use cf::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.queue_confirmations(vec![true]);
//!
//! // Use ui in code under test...
//! assert!(ui.confirm_delete("quota", "my-quota").unwrap());
//! ui.warn("Quota my-quota does not exist");
//!
//! // Assert on captured interactions
//! assert!(ui.has_warning("does not exist"));
//! assert!(ui.has_output("does not exist"));
//! ```

use std::collections::VecDeque;

use crate::error::Result;

use super::{Table, UserInterface};

/// Mock UI implementation for testing.
///
/// Every line that would reach the terminal lands in `outputs`, in order.
/// Warnings and failures are additionally kept in their own lists.
#[derive(Debug, Default)]
pub struct MockUI {
    interactive: bool,
    outputs: Vec<String>,
    warnings: Vec<String>,
    failures: Vec<String>,
    tables: Vec<Table>,
    confirmations: VecDeque<bool>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for upcoming confirmations.
    ///
    /// Once the queue is exhausted every confirmation is answered with no.
    pub fn queue_confirmations(&mut self, answers: Vec<bool>) {
        self.confirmations.extend(answers);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured output lines.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Get all captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured failure messages.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// Get all printed tables.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Get all confirmation questions that were asked.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if any output line contains `text`.
    pub fn has_output(&self, text: &str) -> bool {
        self.outputs.iter().any(|line| line.contains(text))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, text: &str) -> bool {
        self.warnings.iter().any(|line| line.contains(text))
    }

    /// Check if a specific failure was reported.
    pub fn has_failure(&self, text: &str) -> bool {
        self.failures.iter().any(|line| line.contains(text))
    }

    /// Check that lines containing each fragment appear in this order.
    pub fn has_outputs_in_order(&self, fragments: &[&str]) -> bool {
        let mut lines = self.outputs.iter();
        fragments
            .iter()
            .all(|fragment| lines.any(|line| line.contains(fragment)))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.outputs.clear();
        self.warnings.clear();
        self.failures.clear();
        self.tables.clear();
        self.prompts_shown.clear();
    }
}

impl UserInterface for MockUI {
    fn say(&mut self, msg: &str) {
        self.outputs.extend(msg.lines().map(String::from));
        if msg.is_empty() {
            self.outputs.push(String::new());
        }
    }

    fn ok(&mut self) {
        self.outputs.push("OK".to_string());
    }

    fn warn(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
        self.say(msg);
    }

    fn failed(&mut self, msg: &str) {
        self.failures.push(msg.to_string());
        self.outputs.push("FAILED".to_string());
        self.say(msg);
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.prompts_shown.push(question.to_string());
        Ok(self.confirmations.pop_front().unwrap_or(false))
    }

    fn print_table(&mut self, table: &Table) {
        if let Some(header) = table.render_header() {
            self.outputs.push(header);
        }
        self.outputs.extend(table.render_rows());
        self.tables.push(table.clone());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
