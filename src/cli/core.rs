use std::collections::HashMap;

use chrono::NaiveDate;

use crate::cli::commands::CommandRegistry;
use crate::config::ConfigManager;
use crate::core::Clock;
use crate::errors::{PurseError, Result};

pub type CommandResult = Result<()>;

/// Shared state handed to every command handler.
pub struct CliContext {
    pub clock: Box<dyn Clock>,
    pub config: ConfigManager,
    pub registry: CommandRegistry,
}

impl CliContext {
    pub fn new(clock: Box<dyn Clock>, config: ConfigManager) -> Self {
        Self {
            clock,
            config,
            registry: CommandRegistry::default(),
        }
    }

    /// `--as-of` when given, else today by the context clock.
    pub fn reference_date(&self, as_of: Option<&str>) -> Result<NaiveDate> {
        match as_of {
            Some(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
                PurseError::InvalidInput(format!("`{}` is not a YYYY-MM-DD date", text))
            }),
            None => Ok(self.clock.today()),
        }
    }
}

/// Positionals plus `--flag value` / `--switch` options of one command.
#[derive(Debug, Default)]
pub struct ParsedArgs {
    pub positionals: Vec<String>,
    values: HashMap<String, String>,
    switches: Vec<String>,
}

impl ParsedArgs {
    pub fn parse(args: &[String], value_flags: &[&str], switch_flags: &[&str]) -> Result<Self> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if !arg.starts_with("--") {
                parsed.positionals.push(arg.clone());
                continue;
            }
            let (name, inline) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (arg.as_str(), None),
            };
            if value_flags.contains(&name) {
                let value = match inline {
                    Some(value) => value,
                    None => iter.next().cloned().ok_or_else(|| {
                        PurseError::InvalidInput(format!("`{}` expects a value", name))
                    })?,
                };
                parsed.values.insert(name.to_string(), value);
            } else if switch_flags.contains(&name) && inline.is_none() {
                parsed.switches.push(name.to_string());
            } else {
                return Err(PurseError::InvalidInput(format!("unknown option `{}`", arg)));
            }
        }
        Ok(parsed)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn switch(&self, name: &str) -> bool {
        self.switches.iter().any(|flag| flag == name)
    }

    pub fn number(&self, name: &str) -> Result<Option<u32>> {
        self.value(name)
            .map(|text| {
                text.trim().parse::<u32>().map_err(|_| {
                    PurseError::InvalidInput(format!("`{}` expects a whole number", name))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn parses_values_and_switches() {
        let parsed = ParsedArgs::parse(
            &args(&["feed.json", "--as-of", "2025-05-14", "--days=7", "--json"]),
            &["--as-of", "--days"],
            &["--json"],
        )
        .unwrap();
        assert_eq!(parsed.positionals, vec!["feed.json"]);
        assert_eq!(parsed.value("--as-of"), Some("2025-05-14"));
        assert_eq!(parsed.number("--days").unwrap(), Some(7));
        assert!(parsed.switch("--json"));
    }

    #[test]
    fn reference_date_falls_back_to_clock() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 14).unwrap();
        let temp = tempfile::tempdir().unwrap();
        let context = CliContext::new(
            Box::new(FixedClock::on(today)),
            ConfigManager::with_base_dir(temp.path().to_path_buf()),
        );
        assert_eq!(context.reference_date(None).unwrap(), today);
        assert_eq!(
            context.reference_date(Some("2025-01-31")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        assert!(context.reference_date(Some("31/01/2025")).is_err());
    }

    #[test]
    fn rejects_unknown_and_dangling_options() {
        assert!(ParsedArgs::parse(&args(&["--nope"]), &[], &[]).is_err());
        assert!(ParsedArgs::parse(&args(&["--days"]), &["--days"], &[]).is_err());
    }
}
