//! CLI argument definitions for `degreeplanner`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use degree_planner::config::ConfigOverrides;
use degree_planner::logger::Level;

/// CLI log level argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `max_credits`, `plans_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Generate a four-year plan from a course catalog.
    ///
    /// Prints a term-by-term summary and the validation report, then writes
    /// the plan as JSON.
    Generate {
        /// Path to the catalog JSON file
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Constraints JSON file (credit cap, required courses, preferred terms)
        #[arg(short, long, value_name = "FILE")]
        constraints: Option<PathBuf>,

        /// Course codes that must appear in the plan (adds to the constraints file)
        #[arg(short, long = "required", value_name = "CODE", num_args = 1..)]
        required: Vec<String>,

        /// Per-term credit cap (overrides constraints file and config)
        #[arg(long, value_name = "CREDITS")]
        max_credits: Option<u16>,

        /// Favor courses with a high historical A-rate
        #[arg(long)]
        prioritize_grades: bool,

        /// Move courses out of overloaded terms after placement
        #[arg(long)]
        balance_workload: bool,

        /// Favor courses that have required prerequisites
        #[arg(long)]
        include_requirements: bool,

        /// Calendar year of the Freshman year
        #[arg(long, value_name = "YEAR")]
        start_year: Option<i32>,

        /// User id stamped on the plan
        #[arg(long = "user", value_name = "ID")]
        user: Option<String>,

        /// Output file (defaults to `<plans_dir>/<catalog name>-plan.json`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Validate a saved plan against constraints.
    Validate {
        /// Path to a plan JSON file
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Constraints JSON file
        #[arg(short, long, value_name = "FILE")]
        constraints: Option<PathBuf>,
    },
    /// Print the prerequisite graph of a catalog and report any cycle.
    Graph {
        /// Path to the catalog JSON file
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "degreeplanner",
    about = "Four-year academic plan generator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config plans directory
    #[arg(long = "config-plans-dir", value_name = "DIR")]
    pub config_plans_dir: Option<PathBuf>,

    /// Override config plans directory (short form)
    #[arg(long = "plans-dir", value_name = "DIR")]
    pub plans_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--plans-dir` takes precedence over `--config-plans-dir`. The
    /// `generate` flags `--max-credits` and `--start-year` also land here so
    /// every handler sees one effective config.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let (max_credits, start_year) = match &self.command {
            Command::Generate {
                max_credits,
                start_year,
                ..
            } => (*max_credits, *start_year),
            _ => (None, None),
        };

        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            max_credits,
            start_year,
            plans_dir: self
                .plans_dir
                .as_ref()
                .or(self.config_plans_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
