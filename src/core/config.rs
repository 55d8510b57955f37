//! Configuration module for `degree-planner`

use crate::core::models::preferences::{
    DEFAULT_MAX_CREDITS, DEFAULT_START_YEAR, DEFAULT_TARGET_CREDITS, DEFAULT_TOLERANCE,
};
use crate::core::models::PlannerSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside string values
const DIR_VARIABLE: &str = "$DEGREE_PLANNER";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

const fn default_max_credits() -> u16 {
    DEFAULT_MAX_CREDITS
}

const fn default_target_credits() -> f32 {
    DEFAULT_TARGET_CREDITS
}

const fn default_tolerance() -> f32 {
    DEFAULT_TOLERANCE
}

const fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

const fn default_true() -> bool {
    true
}

/// Planning engine defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Credit cap used when no constraints file sets one
    #[serde(default = "default_max_credits")]
    pub max_credits_per_semester: u16,
    /// Workload target per term
    #[serde(default = "default_target_credits")]
    pub target_credits: f32,
    /// Allowed deviation above the target
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,
    /// Calendar year of the Freshman year
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    /// Place courses only after their prerequisites
    #[serde(default = "default_true")]
    pub enforce_prerequisite_order: bool,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            max_credits_per_semester: DEFAULT_MAX_CREDITS,
            target_credits: DEFAULT_TARGET_CREDITS,
            tolerance: DEFAULT_TOLERANCE,
            start_year: DEFAULT_START_YEAR,
            enforce_prerequisite_order: true,
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for generated plan JSON files
    #[serde(default)]
    pub plans_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Planning defaults
    #[serde(default)]
    pub planning: PlanningConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the per-term credit cap
    pub max_credits: Option<u16>,
    /// Override the first calendar year
    pub start_year: Option<i32>,
    /// Override plans output directory
    pub plans_dir: Option<String>,
}

impl Config {
    /// Get the `$DEGREE_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/degreeplanner`
    /// - macOS: `~/Library/Application Support/degreeplanner`
    /// - Windows: `%APPDATA%\degreeplanner`
    #[must_use]
    pub fn get_planner_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("degreeplanner")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled in. Numeric planning fields already take their defaults at parse
    /// time.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }
        if self.paths.plans_dir.is_empty() && !defaults.paths.plans_dir.is_empty() {
            self.paths.plans_dir.clone_from(&defaults.paths.plans_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only non-`None` values replace config values; the config file is not
    /// touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(max_credits) = overrides.max_credits {
            self.planning.max_credits_per_semester = max_credits;
        }
        if let Some(start_year) = overrides.start_year {
            self.planning.start_year = start_year;
        }
        if let Some(plans_dir) = &overrides.plans_dir {
            self.paths.plans_dir = Self::expand_variables(plans_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds and `dconfig.toml` for debug builds,
    /// inside [`get_planner_dir`](Self::get_planner_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_planner_dir().join(CONFIG_FILE_NAME)
    }

    /// Replace `$DEGREE_PLANNER` with the config directory path
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_planner_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields take their serde defaults. `$DEGREE_PLANNER`
    /// is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.plans_dir = Self::expand_variables(&config.paths.plans_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_else(|e| {
            crate::warn!("Compiled-in default configuration is invalid: {e}");
            Self::default()
        })
    }

    /// Load configuration from the user config file, or create it from defaults
    ///
    /// Missing fields are merged in from defaults and written back. Any read
    /// or parse failure falls back to the defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// [`load`](Self::load) against an explicit file
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            if let Err(e) = defaults.save_to(config_file) {
                crate::warn!("Could not write default config to {}: {e}", config_file.display());
            }
            return defaults;
        }

        let parsed = fs::read_to_string(config_file)
            .map_err(|e| e.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|e| e.to_string()));

        match parsed {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                config
            }
            Err(e) => {
                crate::warn!("Ignoring unreadable config {}: {e}", config_file.display());
                defaults
            }
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory cannot
    /// be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// [`save`](Self::save) to an explicit file
    ///
    /// # Errors
    /// Same as [`save`](Self::save).
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Engine settings derived from the `[planning]` section
    #[must_use]
    pub fn planner_settings(&self) -> PlannerSettings {
        PlannerSettings {
            start_year: self.planning.start_year,
            target_credits: self.planning.target_credits,
            tolerance: self.planning.tolerance,
            enforce_prerequisite_order: self.planning.enforce_prerequisite_order,
            ..PlannerSettings::default()
        }
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `max_credits`,
    /// `target_credits`, `tolerance`, `start_year`,
    /// `enforce_prerequisite_order`, `plans_dir`. Dashes may be used in place
    /// of underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match normalize_key(key).as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "max_credits" | "max_credits_per_semester" => self.planning.max_credits_per_semester.to_string(),
            "target_credits" => self.planning.target_credits.to_string(),
            "tolerance" => self.planning.tolerance.to_string(),
            "start_year" => self.planning.start_year.to_string(),
            "enforce_prerequisite_order" => self.planning.enforce_prerequisite_order.to_string(),
            "plans_dir" => self.paths.plans_dir.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match normalize_key(key).as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => self.logging.verbose = parse_value(key, value)?,
            "max_credits" | "max_credits_per_semester" => {
                self.planning.max_credits_per_semester = parse_value(key, value)?;
            }
            "target_credits" => self.planning.target_credits = parse_non_negative(key, value)?,
            "tolerance" => self.planning.tolerance = parse_non_negative(key, value)?,
            "start_year" => self.planning.start_year = parse_value(key, value)?,
            "enforce_prerequisite_order" => {
                self.planning.enforce_prerequisite_order = parse_value(key, value)?;
            }
            "plans_dir" => self.paths.plans_dir = Self::expand_variables(value),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single value to its default
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match normalize_key(key).as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "max_credits" | "max_credits_per_semester" => {
                self.planning.max_credits_per_semester = defaults.planning.max_credits_per_semester;
            }
            "target_credits" => self.planning.target_credits = defaults.planning.target_credits,
            "tolerance" => self.planning.tolerance = defaults.planning.tolerance,
            "start_year" => self.planning.start_year = defaults.planning.start_year,
            "enforce_prerequisite_order" => {
                self.planning.enforce_prerequisite_order = defaults.planning.enforce_prerequisite_order;
            }
            "plans_dir" => self.paths.plans_dir.clone_from(&defaults.paths.plans_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the user config file so the next [`load()`](Config::load) recreates it
    ///
    /// Succeeds without doing anything when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('-', "_")
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))
}

fn parse_non_negative(key: &str, value: &str) -> Result<f32, String> {
    let parsed: f32 = parse_value(key, value)?;
    if parsed.is_finite() && parsed >= 0.0 {
        Ok(parsed)
    } else {
        Err(format!("'{key}' must be a non-negative number, got '{value}'"))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[planning]")?;
        writeln!(f, "  max_credits_per_semester = {}", self.planning.max_credits_per_semester)?;
        writeln!(f, "  target_credits = {}", self.planning.target_credits)?;
        writeln!(f, "  tolerance = {}", self.planning.tolerance)?;
        writeln!(f, "  start_year = {}", self.planning.start_year)?;
        writeln!(
            f,
            "  enforce_prerequisite_order = {}",
            self.planning.enforce_prerequisite_order
        )?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  plans_dir = \"{}\"", self.paths.plans_dir)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_settings_follow_planning_section() {
        let config = Config::from_toml(
            r"
[planning]
target_credits = 12.5
start_year = 2031
enforce_prerequisite_order = false
",
        )
        .unwrap();

        let settings = config.planner_settings();
        assert!((settings.target_credits - 12.5).abs() < f32::EPSILON);
        assert!((settings.tolerance - DEFAULT_TOLERANCE).abs() < f32::EPSILON);
        assert_eq!(settings.start_year, 2031);
        assert!(!settings.enforce_prerequisite_order);
    }

    #[test]
    fn test_set_rejects_bad_numbers() {
        let mut config = Config::from_defaults();
        assert!(config.set("tolerance", "-1").is_err());
        assert!(config.set("max-credits", "lots").is_err());
        assert!(config.set("max-credits", "21").is_ok());
        assert_eq!(config.planning.max_credits_per_semester, 21);
    }
}
