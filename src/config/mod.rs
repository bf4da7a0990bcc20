use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::core::utils::{app_data_dir, config_file_in, ensure_dir};
use crate::errors::ConfigError;

const TMP_SUFFIX: &str = "tmp";

/// Report window sizes and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub currency: String,
    pub locale: String,
    pub months_back: u32,
    pub days_back: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: "GHS".into(),
            locale: "en-GH".into(),
            months_back: 6,
            days_back: 14,
            client_id: None,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days_back == 0 {
            return Err(ConfigError::Invalid("days_back must be at least 1".into()));
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be blank".into()));
        }
        if self.locale.trim().is_empty() {
            return Err(ConfigError::Invalid("locale must not be blank".into()));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `config.json` in the application data directory.
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: config_file_in(&base),
        }
    }

    /// Loads the stored config, or the defaults when none has been saved yet.
    pub fn load(&self) -> Result<ReportConfig, ConfigError> {
        if !self.path.exists() {
            return Ok(ReportConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ReportConfig = serde_json::from_str(&data)?;
        config.validate()?;
        info!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn save(&self, config: &ReportConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    /// Writes the defaults unless a config file already exists. Returns whether it wrote.
    pub fn init(&self) -> Result<bool, ConfigError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&ReportConfig::default())?;
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/x/config.json")),
            PathBuf::from("/x/config.json.tmp")
        );
    }

    #[test]
    fn zero_day_window_is_invalid() {
        let config = ReportConfig {
            days_back: 0,
            ..ReportConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: ReportConfig = serde_json::from_str(r#"{"days_back": 7}"#).unwrap();
        assert_eq!(config.days_back, 7);
        assert_eq!(config.months_back, 6);
        assert_eq!(config.currency, "GHS");
    }
}
