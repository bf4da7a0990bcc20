use crate::cli::core::{CliContext, CommandResult};
use crate::cli::output;
use crate::utils::build_info;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
    ]
}

fn cmd_version(_context: &mut CliContext, _args: &[String]) -> CommandResult {
    let meta = build_info::current();
    output::raw(format!("SmartPurse {}", meta.version));
    output::raw(format!("  Build hash : {}", meta.git_hash));
    output::raw(format!("  Built at   : {}", meta.timestamp));
    output::raw(format!("  Target     : {}", meta.target));
    output::raw(format!("  Profile    : {}", meta.profile));
    output::raw(format!("  Rustc      : {}", meta.rustc));
    #[cfg(feature = "ffi")]
    {
        output::raw(format!("  FFI version: {}", crate::ffi::FFI_VERSION));
    }
    Ok(())
}

fn cmd_help(context: &mut CliContext, args: &[String]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(command) => {
                output::raw(format!("{}: {}", command.name, command.description));
                output::raw(format!("  Usage: smartpurse_cli {}", command.usage));
            }
            None => output::warning(format!("Unknown command `{}`", name)),
        }
        return Ok(());
    }

    output::raw("Usage: smartpurse_cli [--plain] [--quiet] <command> [args]");
    output::raw("Commands:");
    for command in context.registry.iter() {
        output::raw(format!("  {:<10} {}", command.name, command.description));
    }
    output::raw("Use `help <command>` for details.");
    Ok(())
}
