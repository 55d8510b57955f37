//! Validate command handler

use degree_planner::config::Config;
use degree_planner::core::catalog::{load_constraints, load_plan};
use degree_planner::core::models::PlanningConstraints;
use degree_planner::core::validation::validate;
use degree_planner::{error, verbose};
use std::path::Path;

/// Validate a saved plan. Returns `false` when the plan cannot be read or is invalid.
pub fn run(plan_path: &Path, constraints_path: Option<&Path>, config: &Config) -> bool {
    let plan = match load_plan(plan_path) {
        Ok(plan) => plan,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return false;
        }
    };

    let constraints = match constraints_path.map(load_constraints) {
        Some(Ok(constraints)) => constraints,
        Some(Err(e)) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return false;
        }
        None => PlanningConstraints {
            max_credits_per_semester: config.planning.max_credits_per_semester,
            ..PlanningConstraints::default()
        },
    };

    verbose!(
        "Validating {} ({} courses) with a {}-credit cap",
        plan.id,
        plan.course_count(),
        constraints.max_credits_per_semester
    );

    let result = validate(&plan, &constraints, &config.planner_settings());
    super::print_validation(&result);
    result.valid
}
