use std::{env, process::ExitCode};

use smartpurse_core::{
    cli::{output, run_cli, CliContext},
    config::ConfigManager,
    core::SystemClock,
    init,
};

fn main() -> ExitCode {
    init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut context = CliContext::new(Box::new(SystemClock), ConfigManager::new());
    match run_cli(&mut context, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
