//! Academic plan generation library for `degree-planner`
//!
//! Turns a flat course catalog into a four-year, twelve-term plan that honors
//! prerequisite ordering, per-term credit caps and workload targets, and
//! validates the result. Used by the `degreeplanner` CLI.

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use crate::core::error::{CatalogError, PlanError};
pub use crate::core::generator::{generate_plan, GeneratedPlan};
pub use shared::*;
