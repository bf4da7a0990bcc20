pub mod commands;
pub mod core;
pub mod output;
pub mod render;

use tracing::debug;

pub use self::core::{CliContext, CommandResult, ParsedArgs};

use crate::errors::PurseError;
use output::OutputPreferences;

/// Runs one command line (without the program name).
pub fn run_cli(context: &mut CliContext, args: &[String]) -> CommandResult {
    let mut prefs = OutputPreferences::default();
    let mut rest = Vec::with_capacity(args.len());
    for arg in args {
        match arg.as_str() {
            "--plain" => prefs.plain = true,
            "--quiet" => prefs.quiet = true,
            "--help" | "-h" if rest.is_empty() => rest.push("help".to_string()),
            "--version" | "-V" if rest.is_empty() => rest.push("version".to_string()),
            _ => rest.push(arg.clone()),
        }
    }
    output::set_preferences(prefs);

    let Some((name, command_args)) = rest.split_first() else {
        return dispatch(context, "help", &[]);
    };
    dispatch(context, name, command_args)
}

fn dispatch(context: &mut CliContext, name: &str, args: &[String]) -> CommandResult {
    let handler = context
        .registry
        .get(&name.to_lowercase())
        .map(|command| command.handler)
        .ok_or_else(|| {
            PurseError::InvalidInput(format!(
                "unknown command `{}`; run `smartpurse_cli help`",
                name
            ))
        })?;
    debug!(command = name, args = args.len(), "dispatching command");
    handler(context, args)
}
