//! `finz_cli`: one-shot commands over the savings pipeline.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
pub mod prompts;

use std::env;

use tracing::debug;

pub use args::{parse_args, CliCommand, GlobalOptions, Invocation};
pub use context::CliContext;

use crate::errors::CliError;

/// Entry point used by the `finz_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    run_with_args(env::args().skip(1))
}

pub fn run_with_args<I, S>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let Invocation { options, command } = parse_args(args)?;
    output::set_preferences(output::OutputPreferences {
        plain: options.plain,
    });
    debug!(?command, "dispatching command");
    commands::dispatch(options, command)
}
