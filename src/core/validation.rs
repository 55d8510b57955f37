//! Post-hoc constraint checks for an assembled plan
//!
//! Checks:
//! 1. Every term stays within the credit cap (error)
//! 2. Every required course appears in the plan (error)
//! 3. Required prerequisites sit in a strictly earlier term, concurrent ones
//!    in the same or an earlier term (error)
//! 4. No term exceeds the workload target by more than the tolerance (warning)
//!
//! All checks run; findings are returned together, never raised.

use crate::core::models::{AcademicPlan, PlannerSettings, PlanningConstraints, PrerequisiteKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slack used when comparing summed fractional credits
const CREDIT_EPSILON: f32 = 1e-4;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Makes the plan invalid
    Error,
    /// Reported but does not affect validity
    Warning,
}

/// Category of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A term is over the credit cap
    CreditCap,
    /// A required course is not in the plan
    MissingRequiredCourse,
    /// A prerequisite is not scheduled before its dependent
    PrerequisiteOrder,
    /// A term's load is far above the workload target
    WorkloadImbalance,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Error or warning
    pub severity: Severity,
    /// Category
    pub kind: IssueKind,
    /// Human-readable description
    pub message: String,
    /// Semester involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<String>,
    /// Course involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_code: Option<String>,
}

impl Issue {
    fn new(severity: Severity, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            semester_id: None,
            course_code: None,
        }
    }

    fn error(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    fn warning(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    fn in_semester(mut self, semester_id: &str) -> Self {
        self.semester_id = Some(semester_id.to_string());
        self
    }

    fn for_course(mut self, code: &str) -> Self {
        self.course_code = Some(code.to_string());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Outcome of validating a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` when there are no error-level issues
    pub valid: bool,
    /// Every finding, errors and warnings
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    fn from_issues(issues: Vec<Issue>) -> Self {
        let valid = !issues.iter().any(|i| i.severity == Severity::Error);
        Self { valid, issues }
    }

    /// Error-level issues
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    /// Warning-level issues
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }
}

/// Validate a plan against constraints and workload settings
#[must_use]
pub fn validate(
    plan: &AcademicPlan,
    constraints: &PlanningConstraints,
    settings: &PlannerSettings,
) -> ValidationResult {
    let mut issues = Vec::new();

    check_credit_caps(plan, constraints, &mut issues);
    check_required_courses(plan, constraints, &mut issues);
    check_prerequisite_order(plan, &mut issues);
    check_workload(plan, settings, &mut issues);

    ValidationResult::from_issues(issues)
}

fn check_credit_caps(plan: &AcademicPlan, constraints: &PlanningConstraints, issues: &mut Vec<Issue>) {
    let max = constraints.max_credits();
    for semester in plan.semesters() {
        let credits = semester.total_credits();
        if credits > max + CREDIT_EPSILON {
            issues.push(
                Issue::error(
                    IssueKind::CreditCap,
                    format!(
                        "{} has {credits:.1} credits, above the limit of {}",
                        semester.id, constraints.max_credits_per_semester
                    ),
                )
                .in_semester(&semester.id),
            );
        }
    }
}

fn check_required_courses(plan: &AcademicPlan, constraints: &PlanningConstraints, issues: &mut Vec<Issue>) {
    for code in &constraints.required_courses {
        if plan.find_course(code).is_none() {
            issues.push(
                Issue::error(
                    IssueKind::MissingRequiredCourse,
                    format!("Required course {code} is not in the plan"),
                )
                .for_course(code),
            );
        }
    }
}

fn check_prerequisite_order(plan: &AcademicPlan, issues: &mut Vec<Issue>) {
    for (position, semester) in plan.semesters_in_order() {
        for planned in &semester.courses {
            let course = &planned.course;
            for prereq in &course.prerequisites {
                if !prereq.kind.is_blocking() {
                    continue;
                }

                let Some((prereq_position, prereq_semester)) = plan.find_course(&prereq.course_id) else {
                    if plan.is_unplaced(&prereq.course_id) {
                        issues.push(
                            Issue::error(
                                IssueKind::PrerequisiteOrder,
                                format!(
                                    "{} requires {}, which is not in the plan",
                                    course.code, prereq.course_id
                                ),
                            )
                            .in_semester(&semester.id)
                            .for_course(&course.code),
                        );
                    }
                    continue;
                };

                let out_of_order = match prereq.kind {
                    PrerequisiteKind::Required => prereq_position >= position,
                    PrerequisiteKind::Concurrent => prereq_position > position,
                    PrerequisiteKind::Recommended => false,
                };
                if out_of_order {
                    let relation = if prereq.kind == PrerequisiteKind::Required {
                        "before"
                    } else {
                        "no later than"
                    };
                    issues.push(
                        Issue::error(
                            IssueKind::PrerequisiteOrder,
                            format!(
                                "{} ({}) needs {} ({}) {relation} it",
                                course.code, semester.id, prereq.course_id, prereq_semester.id
                            ),
                        )
                        .in_semester(&semester.id)
                        .for_course(&course.code),
                    );
                }
            }
        }
    }
}

fn check_workload(plan: &AcademicPlan, settings: &PlannerSettings, issues: &mut Vec<Issue>) {
    for semester in plan.semesters() {
        let credits = semester.total_credits();
        if credits - settings.target_credits > settings.tolerance + CREDIT_EPSILON {
            issues.push(
                Issue::warning(
                    IssueKind::WorkloadImbalance,
                    format!(
                        "{} has {credits:.1} credits, more than {:.1} above the {:.1}-credit target",
                        semester.id, settings.tolerance, settings.target_credits
                    ),
                )
                .in_semester(&semester.id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assembler::assemble;
    use crate::core::models::{Course, UnplacedCourse, UnplacedReason};
    use crate::core::scheduler::TermAssignments;

    fn plan_with(placements: &[(usize, &Course)]) -> AcademicPlan {
        let mut assignments = TermAssignments::new();
        for (slot, course) in placements {
            assignments.place(*slot, course);
        }
        assemble(&assignments, &PlannerSettings::default())
    }

    #[test]
    fn test_valid_plan() {
        let a = Course::new("A", "A", 3.0);
        let b = Course::new("B", "B", 3.0).requires("A");
        let plan = plan_with(&[(0, &a), (1, &b)]);
        let mut constraints = PlanningConstraints::default();
        constraints.require("A");
        constraints.require("B");

        let result = validate(&plan, &constraints, &PlannerSettings::default());
        assert!(result.valid, "{:?}", result.issues);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_credit_cap_error() {
        let courses: Vec<Course> = (0..5).map(|i| Course::new(&format!("C{i}"), "C", 4.0)).collect();
        let placements: Vec<(usize, &Course)> = courses.iter().map(|c| (0, c)).collect();
        let plan = plan_with(&placements);

        let result = validate(&plan, &PlanningConstraints::default(), &PlannerSettings::default());
        assert!(!result.valid);
        let kinds: Vec<IssueKind> = result.issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IssueKind::CreditCap, IssueKind::WorkloadImbalance]);
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.issues[0].semester_id.as_deref(), Some("freshman-fall"));
    }

    #[test]
    fn test_missing_required_course() {
        let plan = plan_with(&[]);
        let mut constraints = PlanningConstraints::default();
        constraints.require("CS999");

        let result = validate(&plan, &constraints, &PlannerSettings::default());
        assert!(!result.valid);
        assert_eq!(result.issues[0].kind, IssueKind::MissingRequiredCourse);
        assert_eq!(result.issues[0].course_code.as_deref(), Some("CS999"));
    }

    #[test]
    fn test_same_term_required_prerequisite_is_error() {
        let a = Course::new("A", "A", 3.0);
        let b = Course::new("B", "B", 3.0).requires("A");
        let plan = plan_with(&[(0, &a), (0, &b)]);

        let result = validate(&plan, &PlanningConstraints::default(), &PlannerSettings::default());
        assert!(!result.valid);
        assert_eq!(result.issues[0].kind, IssueKind::PrerequisiteOrder);
        assert!(result.issues[0].message.contains("B (freshman-fall) needs A (freshman-fall)"));
    }

    #[test]
    fn test_concurrent_same_term_is_fine_but_later_is_not() {
        let lec = Course::new("LEC", "Lecture", 3.0);
        let lab = Course::new("LAB", "Lab", 1.0)
            .with_prerequisite("LEC", PrerequisiteKind::Concurrent);

        let same = plan_with(&[(0, &lec), (0, &lab)]);
        assert!(validate(&same, &PlanningConstraints::default(), &PlannerSettings::default()).valid);

        let later = plan_with(&[(1, &lec), (0, &lab)]);
        assert!(!validate(&later, &PlanningConstraints::default(), &PlannerSettings::default()).valid);
    }

    #[test]
    fn test_unknown_prerequisite_is_satisfied_but_unplaced_is_not() {
        let b = Course::new("B", "B", 3.0).requires("OUTSIDE");
        let plan = plan_with(&[(0, &b)]);
        assert!(validate(&plan, &PlanningConstraints::default(), &PlannerSettings::default()).valid);

        let c = Course::new("C", "C", 3.0).requires("A");
        let mut plan = plan_with(&[(0, &c)]);
        plan.unplaced.push(UnplacedCourse {
            code: "A".to_string(),
            reason: UnplacedReason::NoEligibleTerm,
        });
        let result = validate(&plan, &PlanningConstraints::default(), &PlannerSettings::default());
        assert!(!result.valid);
        assert!(result.issues[0].message.contains("not in the plan"));
    }

    #[test]
    fn test_workload_warning_does_not_invalidate() {
        let a = Course::new("A", "A", 9.0);
        let b = Course::new("B", "B", 9.0);
        let plan = plan_with(&[(0, &a), (0, &b)]);

        let result = validate(&plan, &PlanningConstraints::default(), &PlannerSettings::default());
        assert!(result.valid);
        assert_eq!(result.warnings().count(), 0);

        let c = Course::new("C", "C", 0.5);
        let plan = plan_with(&[(0, &a), (0, &b), (0, &c)]);
        let constraints = PlanningConstraints {
            max_credits_per_semester: 20,
            ..PlanningConstraints::default()
        };
        let result = validate(&plan, &constraints, &PlannerSettings::default());
        assert!(result.valid);
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let a = Course::new("A", "A", 3.0);
        let b = Course::new("B", "B", 3.0).requires("A");
        let plan = plan_with(&[(1, &a), (0, &b)]);
        let constraints = PlanningConstraints::default();
        let settings = PlannerSettings::default();

        assert_eq!(
            validate(&plan, &constraints, &settings),
            validate(&plan, &constraints, &settings)
        );
    }
}
