//! cf CLI entry point.

use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::process::ExitCode;
use std::rc::Rc;

use cf::api::RepositoryLocator;
use cf::cli::{Cli, CommandRegistry, CommandRunner, Dependency};
use cf::config::{ConfigRepository, EnvSettings};
use cf::requirements::Factory;
use cf::ui::{SharedUi, TerminalUI};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` or `CF_TRACE=true` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("cf=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cf=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Replace the default panic message with a crash report.
fn install_crash_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!(
            "\n\tSomething unexpected happened. This is a bug in cf.\n\n\tPlease re-run the command that caused this exception with the environment\n\tvariable CF_TRACE set to true and file an issue with the output.\n\n\tCF Version: {}\n\tCommand: {}\n\tPanic: {}\n\n{}",
            env!("CARGO_PKG_VERSION"),
            std::env::args().collect::<Vec<_>>().join(" "),
            info,
            Backtrace::force_capture()
        );
    }));
}

fn main() -> ExitCode {
    install_crash_handler();

    let cli = Cli::parse();
    let settings = EnvSettings::from_env();
    init_tracing(cli.debug || settings.trace);

    let (name, args) = cli.split_command();
    // Arguments stay out of the log, `auth` takes a password.
    tracing::debug!("cf starting {} with {} argument(s)", name, args.len());

    if cli.no_color || !settings.color {
        console::set_colors_enabled(false);
    }

    let ui: SharedUi = Rc::new(RefCell::new(TerminalUI::new()));

    let config = match ConfigRepository::load(&settings.config_path()) {
        Ok(config) => Rc::new(RefCell::new(config)),
        Err(e) => {
            ui.borrow_mut().failed(&e.to_string());
            return ExitCode::from(1);
        }
    };

    let locator = RepositoryLocator::new(config.clone(), settings.dial_timeout);
    let factory = Factory::new(config.clone(), locator.clone());
    let registry = CommandRegistry::with_builtins();
    let deps = Dependency {
        ui,
        config,
        repo_locator: locator,
        plugin_call: false,
    };

    let runner = CommandRunner::new(&registry, &factory, deps);
    match runner.run_cmd_by_name(&name, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{} failed: {:?}", name, e);
            ExitCode::from(1)
        }
    }
}
