//! # Configuration
//!
//! Front-end settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`POCKETCALC_*`)
//! 2. Config file (`$POCKETCALC_CONFIG`, else `config.toml` in the
//!    platform config directory)
//! 3. Defaults (this file)
//!
//! ## Example `config.toml`
//! ```toml
//! show_previous_operation = true
//! keyboard_support = true
//! group_digits = true
//! digit_separator = " "
//! output = "json"
//! ```
//!
//! Configuration is read-only after startup. The engine itself takes no
//! configuration.

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "POCKETCALC";

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "POCKETCALC_CONFIG";

/// How the display is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Previous line + current line, for people
    #[default]
    Text,

    /// One `DisplayState` JSON object per line, for scripts
    Json,
}

/// Terminal front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Show the pending expression line (`"12 +"`)
    pub show_previous_operation: bool,

    /// Accept keyboard shortcuts (`*`, `/`, `enter`, `backspace`, ...)
    /// in addition to the keypad button labels
    pub keyboard_support: bool,

    /// Group integer digits in threes when rendering text
    pub group_digits: bool,

    /// Separator used when `group_digits` is on (exactly one character)
    pub digit_separator: String,

    /// Output format
    pub output: OutputFormat,

    /// Prompt printed before each input line (text mode only)
    pub prompt: String,
}

impl Default for CliConfig {
    /// ## Default Values
    /// - Previous operation shown
    /// - Keyboard shortcuts on
    /// - No digit grouping (separator `,` when enabled)
    /// - Text output, `"> "` prompt
    fn default() -> Self {
        CliConfig {
            show_previous_operation: true,
            keyboard_support: true,
            group_digits: false,
            digit_separator: ",".to_string(),
            output: OutputFormat::Text,
            prompt: "> ".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from the default file location and the
    /// `POCKETCALC_*` environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(default_config_path(), Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an explicit file and environment source.
    ///
    /// A missing file is not an error; a malformed one is. Values from
    /// `env` are parsed (`"false"` is a bool) and win over the file.
    pub fn load_with(file: Option<PathBuf>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = CliConfig::default();

        let mut builder = Config::builder()
            .set_default("show_previous_operation", defaults.show_previous_operation)?
            .set_default("keyboard_support", defaults.keyboard_support)?
            .set_default("group_digits", defaults.group_digits)?
            .set_default("digit_separator", defaults.digit_separator)?
            .set_default("output", "text")?
            .set_default("prompt", defaults.prompt)?;

        if let Some(path) = file {
            tracing::debug!(?path, "reading config file");
            builder =
                builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let config: CliConfig = builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.digit_separator.chars().count() != 1 {
            return Err(ConfigError::InvalidValue {
                key: "digit_separator".to_string(),
                reason: format!("must be one character, got {:?}", self.digit_separator),
            });
        }

        Ok(())
    }

    /// The grouping separator as a character.
    pub fn separator(&self) -> char {
        self.digit_separator.chars().next().unwrap_or(',')
    }
}

/// Determines the config file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.pocketcalc.pocketcalc/config.toml`
/// - **Windows**: `%APPDATA%\pocketcalc\pocketcalc\config\config.toml`
/// - **Linux**: `~/.config/pocketcalc/config.toml`
///
/// `POCKETCALC_CONFIG` overrides the lookup.
pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(path));
    }

    ProjectDirs::from("com", "pocketcalc", "pocketcalc")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    /// An environment source that never reads the process environment.
    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "pocketcalc-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = CliConfig::load_with(None, env_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.separator(), ',');
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("pocketcalc-does-not-exist.toml");
        let config = CliConfig::load_with(Some(path), env_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_config(
            "file",
            "group_digits = true\ndigit_separator = \" \"\noutput = \"json\"\n",
        );
        let config = CliConfig::load_with(Some(path.clone()), env_from(&[])).unwrap();
        std::fs::remove_file(path).ok();

        assert!(config.group_digits);
        assert_eq!(config.separator(), ' ');
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.show_previous_operation);
    }

    #[test]
    fn test_env_overrides_file() {
        let path = temp_config("env", "show_previous_operation = true\n");
        let env = env_from(&[
            ("POCKETCALC_SHOW_PREVIOUS_OPERATION", "false"),
            ("POCKETCALC_KEYBOARD_SUPPORT", "false"),
            ("OTHER_GROUP_DIGITS", "true"),
        ]);

        let config = CliConfig::load_with(Some(path.clone()), env).unwrap();
        std::fs::remove_file(path).ok();

        assert!(!config.show_previous_operation);
        assert!(!config.keyboard_support);
        // Unprefixed variables are ignored
        assert!(!config.group_digits);
    }

    #[test]
    fn test_invalid_separator_rejected() {
        let path = temp_config("separator", "digit_separator = \"::\"\n");
        let result = CliConfig::load_with(Some(path.clone()), env_from(&[]));
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_invalid_output_rejected() {
        let path = temp_config("output", "output = \"xml\"\n");
        let result = CliConfig::load_with(Some(path.clone()), env_from(&[]));
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
