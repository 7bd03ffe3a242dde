//! Global CLI arguments.
//!
//! Only the flags every invocation shares are declared here; the command
//! name and its own flags are passed through untouched and parsed by the
//! command's [`FlagContext`](crate::cli::flags::FlagContext).

use clap::Parser;

/// cf - A command line tool to interact with Cloud Foundry.
#[derive(Debug, Parser)]
#[command(name = "cf")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Command name followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// The command name and its raw arguments. No command means `help`.
    pub fn split_command(&self) -> (String, Vec<String>) {
        match self.command.split_first() {
            Some((name, rest)) => (name.clone(), rest.to_vec()),
            None => ("help".to_string(), Vec::new()),
        }
    }
}
