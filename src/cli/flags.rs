//! Per-command flag parsing.
//!
//! Each command declares its flags as `clap::Arg`s in its metadata. A flag
//! named with one character becomes a short flag (`-f`), anything longer a
//! long flag (`--reserved-route-ports`). Remaining words are positional
//! arguments.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, ColorChoice};

use crate::cli::commands::CommandMetadata;
use crate::error::{CfError, Result};

const ARGS_ID: &str = "__args";
const HELP_ID: &str = "__help";

fn named(name: &'static str) -> Arg {
    let arg = Arg::new(name);
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => arg.short(c),
        _ => arg.long(name),
    }
}

/// A flag that is either present or not.
pub fn bool_flag(name: &'static str, help: &'static str) -> Arg {
    named(name).help(help).action(ArgAction::SetTrue)
}

/// A flag taking a string value. Values may start with `-` (e.g. `-i -1`).
pub fn string_flag(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    named(name)
        .help(help)
        .value_name(value_name)
        .action(ArgAction::Set)
        .allow_hyphen_values(true)
}

/// A flag taking an integer value, negative numbers included.
pub fn int_flag(name: &'static str, value_name: &'static str, help: &'static str) -> Arg {
    named(name)
        .help(help)
        .value_name(value_name)
        .action(ArgAction::Set)
        .value_parser(clap::value_parser!(i64))
        .allow_negative_numbers(true)
}

/// Parsed flags and positional arguments of one invocation.
#[derive(Debug, Clone)]
pub struct FlagContext {
    matches: ArgMatches,
    known: Vec<String>,
    args: Vec<String>,
}

impl FlagContext {
    /// Parse `raw` against the flags declared in `metadata`.
    ///
    /// Unknown flags and malformed values are usage errors.
    pub fn parse(metadata: &CommandMetadata, raw: &[String]) -> Result<Self> {
        let parser = clap::Command::new("cf")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .color(ColorChoice::Never)
            .args(metadata.flags.iter().cloned())
            .arg(
                Arg::new(HELP_ID)
                    .short('h')
                    .long("help")
                    .action(ArgAction::SetTrue),
            )
            .arg(Arg::new(ARGS_ID).num_args(0..).action(ArgAction::Append));

        let matches = parser.try_get_matches_from(raw).map_err(|err| {
            let rendered = err.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            CfError::usage(message, metadata.usage.clone())
        })?;

        let args = matches
            .get_many::<String>(ARGS_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        let known = metadata
            .flags
            .iter()
            .map(|flag| flag.get_id().as_str().to_string())
            .collect();

        Ok(Self {
            matches,
            known,
            args,
        })
    }

    /// Positional arguments in the order given.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn help_requested(&self) -> bool {
        self.matches.get_flag(HELP_ID)
    }

    fn declared(&self, name: &str) -> bool {
        self.known.iter().any(|id| id == name)
    }

    pub fn string(&self, name: &str) -> Option<String> {
        if !self.declared(name) {
            return None;
        }
        self.matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .cloned()
    }

    pub fn bool(&self, name: &str) -> bool {
        self.declared(name)
            && self
                .matches
                .try_get_one::<bool>(name)
                .ok()
                .flatten()
                .copied()
                .unwrap_or(false)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        if !self.declared(name) {
            return None;
        }
        self.matches.try_get_one::<i64>(name).ok().flatten().copied()
    }

    /// Whether the flag was given on the command line.
    pub fn is_set(&self, name: &str) -> bool {
        self.declared(name)
            && self.matches.value_source(name) == Some(ValueSource::CommandLine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> CommandMetadata {
        CommandMetadata {
            name: "create-quota".into(),
            short_name: None,
            description: "Define a new resource quota".into(),
            usage: "cf create-quota QUOTA [-m TOTAL_MEMORY]".into(),
            flags: vec![
                string_flag("m", "TOTAL_MEMORY", "Total amount of memory"),
                string_flag("i", "INSTANCE_MEMORY", "Instance memory"),
                int_flag("r", "ROUTES", "Total number of routes"),
                bool_flag("allow-paid-service-plans", "Allow paid plans"),
            ],
        }
    }

    fn raw(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flags_and_args_mix_in_any_order() {
        let ctx = FlagContext::parse(
            &metadata(),
            &raw(&["-m", "1G", "my-quota", "--allow-paid-service-plans", "-r", "10"]),
        )
        .unwrap();

        assert_eq!(ctx.args(), ["my-quota"]);
        assert_eq!(ctx.string("m").as_deref(), Some("1G"));
        assert_eq!(ctx.int("r"), Some(10));
        assert!(ctx.bool("allow-paid-service-plans"));
        assert!(ctx.is_set("m"));
        assert!(!ctx.is_set("i"));
    }

    #[test]
    fn negative_values_are_accepted() {
        let ctx = FlagContext::parse(&metadata(), &raw(&["q", "-i", "-1", "-r", "-1"])).unwrap();
        assert_eq!(ctx.string("i").as_deref(), Some("-1"));
        assert_eq!(ctx.int("r"), Some(-1));
    }

    #[test]
    fn undeclared_names_read_as_absent() {
        let ctx = FlagContext::parse(&metadata(), &raw(&["q"])).unwrap();
        assert_eq!(ctx.string("nope"), None);
        assert!(!ctx.bool("nope"));
        assert!(!ctx.is_set("nope"));
        assert!(!ctx.bool("allow-paid-service-plans"));
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = FlagContext::parse(&metadata(), &raw(&["q", "--bogus"])).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Incorrect Usage."));
        assert!(message.contains("--bogus"));
        assert!(message.ends_with("cf create-quota QUOTA [-m TOTAL_MEMORY]"));
    }

    #[test]
    fn non_numeric_int_is_a_usage_error() {
        let err = FlagContext::parse(&metadata(), &raw(&["q", "-r", "lots"])).unwrap_err();
        assert!(matches!(err, CfError::IncorrectUsage { .. }));
    }

    #[test]
    fn help_flag_is_recognised() {
        let ctx = FlagContext::parse(&metadata(), &raw(&["-h"])).unwrap();
        assert!(ctx.help_requested());
        assert!(ctx.args().is_empty());
    }
}
