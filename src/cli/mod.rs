//! Command-line interface for cf.
//!
//! # Architecture
//!
//! - [`args`] - Global flags, parsed with clap's derive macros
//! - [`flags`] - Per-command flag parsing into a [`FlagContext`]
//! - [`commands`] - The [`Command`] trait and every built-in command
//! - [`registry`] - Name to command lookup
//! - [`runner`] - Requirements-then-execute dispatch

pub mod args;
pub mod commands;
pub mod flags;
pub mod registry;
pub mod runner;

pub use args::Cli;
pub use commands::{BuiltinCommand, Command, CommandMetadata, Dependency};
pub use flags::FlagContext;
pub use registry::CommandRegistry;
pub use runner::CommandRunner;
