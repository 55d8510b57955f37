//! End-to-end plan generation
//!
//! Pipeline: dedupe catalog -> build graph -> reject cycles -> score ->
//! assign slots -> (optionally) rebalance -> assemble -> validate.

use crate::core::assembler::assemble;
use crate::core::error::PlanError;
use crate::core::models::{AcademicPlan, Course, PlannerSettings, PlanningConstraints, PlanningPreferences, DAG};
use crate::core::scheduler::TermScheduler;
use crate::core::scoring::rank_courses;
use crate::core::validation::{validate, ValidationResult};
use serde::Serialize;
use std::collections::HashSet;

/// A generated plan together with its validation report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPlan {
    /// The assembled four-year plan
    pub plan: AcademicPlan,
    /// Constraint check results for `plan`
    pub validation: ValidationResult,
}

/// Generate and validate a four-year plan for a catalog
///
/// Every catalog course is either placed in exactly one slot or listed in
/// `plan.unplaced`. The result depends only on the inputs, so identical
/// inputs always yield identical plans.
///
/// # Errors
///
/// Returns [`PlanError::CircularDependency`] when required or concurrent
/// prerequisites form a cycle. No plan is produced in that case.
pub fn generate_plan(
    catalog: &[Course],
    preferences: &PlanningPreferences,
    constraints: &PlanningConstraints,
    settings: &PlannerSettings,
) -> Result<GeneratedPlan, PlanError> {
    crate::info!("Generating plan {} from {} catalog entries", settings.plan_id, catalog.len());

    let dag = DAG::from_courses(catalog);
    dag.ensure_acyclic()?;

    let mut seen = HashSet::new();
    let courses: Vec<&Course> = catalog
        .iter()
        .filter(|course| seen.insert(course.code.as_str()))
        .collect();

    let ranked = rank_courses(&courses, preferences);
    let scheduler = TermScheduler::new(&dag, constraints, settings);
    let mut assignments = scheduler.assign(&ranked);

    if preferences.balance_workload {
        crate::debug!("Rebalancing workload around {:.1} credits", settings.target_credits);
        scheduler.rebalance(&mut assignments);
    }

    let plan = assemble(&assignments, settings);
    let validation = validate(&plan, constraints, settings);

    crate::info!(
        "Placed {} of {} courses ({:.1} credits); {} unplaced, {} issue(s)",
        plan.course_count(),
        courses.len(),
        plan.total_credits(),
        plan.unplaced.len(),
        validation.issues.len()
    );
    if !plan.unplaced.is_empty() {
        crate::warn!(
            "Unplaced courses: {}",
            plan.unplaced
                .iter()
                .map(|u| u.code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(GeneratedPlan { plan, validation })
}
