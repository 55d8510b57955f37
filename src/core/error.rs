//! Error types for plan generation and catalog I/O

use std::path::PathBuf;

/// Fatal errors that abort plan generation.
///
/// Every other irregularity (bad grade data, unknown prerequisites,
/// unplaceable courses) is absorbed by the engine and surfaces in the
/// validation report instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The catalog contains a required/concurrent prerequisite cycle.
    #[error("circular prerequisite dependency involving {course}: {}", cycle_path(.cycle))]
    CircularDependency {
        /// First course found on the cycle
        course: String,
        /// Course codes along the cycle, in prerequisite order
        cycle: Vec<String>,
    },
}

/// Render a cycle as `A -> B -> A`.
fn cycle_path(cycle: &[String]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first);
    }
    parts.join(" -> ")
}

/// Errors raised while reading or writing catalog, constraint and plan files.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The file contents are not valid JSON for the expected shape.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}
