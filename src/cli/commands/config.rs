use crate::cli::core::{CliContext, CommandResult};
use crate::cli::output;
use crate::config::ReportConfig;
use crate::errors::{PurseError, Result};

use super::CommandDefinition;

const USAGE: &str = "config [show|path|init|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "Inspect or change report settings",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut CliContext, args: &[String]) -> CommandResult {
    let action = args.first().map(String::as_str).unwrap_or("show");
    match (action, &args[args.len().min(1)..]) {
        ("show", []) => {
            let config = context.config.load()?;
            output::raw(serde_json::to_string_pretty(&config)?);
        }
        ("path", []) => output::raw(context.config.path().display()),
        ("init", []) => {
            if context.config.init()? {
                output::success(format!(
                    "Wrote default settings to {}",
                    context.config.path().display()
                ));
            } else {
                output::info(format!(
                    "Settings already exist at {}",
                    context.config.path().display()
                ));
            }
        }
        ("set", [key, value]) => {
            let mut config = context.config.load()?;
            apply_setting(&mut config, key, value)?;
            context.config.save(&config)?;
            output::success(format!("{} = {}", key, value));
        }
        _ => return Err(PurseError::InvalidInput(format!("usage: {}", USAGE))),
    }
    Ok(())
}

fn apply_setting(config: &mut ReportConfig, key: &str, value: &str) -> Result<()> {
    let number = |value: &str| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|_| PurseError::InvalidInput(format!("`{}` expects a whole number", key)))
    };
    match key {
        "currency" => config.currency = value.trim().to_uppercase(),
        "locale" => config.locale = value.trim().to_string(),
        "months_back" => config.months_back = number(value)?,
        "days_back" => config.days_back = number(value)?,
        "client_id" => {
            let trimmed = value.trim();
            config.client_id = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        other => {
            return Err(PurseError::InvalidInput(format!(
                "unknown setting `{}`",
                other
            )))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_update_known_keys() {
        let mut config = ReportConfig::default();
        apply_setting(&mut config, "days_back", "7").unwrap();
        apply_setting(&mut config, "currency", "ngn").unwrap();
        apply_setting(&mut config, "client_id", "24021055").unwrap();
        assert_eq!(config.days_back, 7);
        assert_eq!(config.currency, "NGN");
        assert_eq!(config.client_id.as_deref(), Some("24021055"));
    }

    #[test]
    fn unknown_key_or_bad_number_is_rejected() {
        let mut config = ReportConfig::default();
        assert!(apply_setting(&mut config, "theme", "dark").is_err());
        assert!(apply_setting(&mut config, "days_back", "-3").is_err());
    }
}
