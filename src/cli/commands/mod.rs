//! CLI command handlers for `degreeplanner`.
//!
//! Each subcommand is implemented in its own submodule. Handlers print
//! `✓`/`✗` lines for the user and return whether the command succeeded.

pub mod config;
pub mod generate;
pub mod graph;
pub mod validate;

use degree_planner::core::validation::ValidationResult;

/// Print a validation report
pub fn print_validation(result: &ValidationResult) {
    if result.valid {
        println!("✓ Plan is valid");
    } else {
        println!("✗ Plan is invalid");
    }
    for issue in &result.issues {
        println!("  {issue}");
    }
}
