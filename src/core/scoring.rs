//! Placement priority scoring
//!
//! A score only orders placement attempts; it is never persisted or shown to
//! users. Each preference flag toggles one additive term:
//!
//! | term        | gate                   | value              |
//! |-------------|------------------------|--------------------|
//! | grades      | `prioritize_grades`    | A-rate (%) × 0.5   |
//! | requirement | `include_requirements` | +30 if any required prerequisite |
//! | credits     | always                 | credits × 5        |

use crate::core::models::{Course, PlanningPreferences};

/// Multiplier applied to the historical A-rate (percent)
pub const GRADE_WEIGHT: f64 = 0.5;

/// Flat bonus for courses with at least one required prerequisite
pub const REQUIREMENT_BONUS: f64 = 30.0;

/// Multiplier applied to credit hours
pub const CREDIT_WEIGHT: f64 = 5.0;

/// A course paired with its score and catalog position
#[derive(Debug, Clone, Copy)]
pub struct ScoredCourse<'a> {
    /// The catalog course
    pub course: &'a Course,
    /// Priority score (higher is placed first)
    pub score: f64,
    /// Position in the input catalog, used to break ties
    pub position: usize,
}

/// Percentage of historical students earning an A-range grade (0 when unknown)
#[must_use]
pub fn historical_a_rate(course: &Course) -> f64 {
    course.grade_distribution.a_rate()
}

/// Score a course under the given preferences. Never fails.
#[must_use]
pub fn score(course: &Course, preferences: &PlanningPreferences) -> f64 {
    let mut total = f64::from(course.effective_credits()) * CREDIT_WEIGHT;

    if preferences.prioritize_grades {
        total += historical_a_rate(course) * GRADE_WEIGHT;
    }

    if preferences.include_requirements && course.has_required_prerequisite() {
        total += REQUIREMENT_BONUS;
    }

    if total.is_finite() {
        total
    } else {
        0.0
    }
}

/// Score every course and sort by descending score
///
/// The sort is stable, so equal scores keep catalog order.
#[must_use]
pub fn rank_courses<'a>(courses: &[&'a Course], preferences: &PlanningPreferences) -> Vec<ScoredCourse<'a>> {
    let mut ranked: Vec<ScoredCourse<'a>> = courses
        .iter()
        .enumerate()
        .map(|(position, &course)| ScoredCourse {
            course,
            score: score(course, preferences),
            position,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::GradeDistribution;

    fn prefs(grades: bool, requirements: bool) -> PlanningPreferences {
        PlanningPreferences {
            prioritize_grades: grades,
            balance_workload: false,
            include_requirements: requirements,
        }
    }

    #[test]
    fn test_credit_term_always_applies() {
        let course = Course::new("CS101", "Intro", 4.0);
        assert!((score(&course, &PlanningPreferences::default()) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_grade_term_is_gated() {
        let course = Course::new("CS101", "Intro", 3.0)
            .with_grades(GradeDistribution::from_pairs(&[("A", 40.0), ("B", 60.0)]));

        assert!((score(&course, &prefs(false, false)) - 15.0).abs() < 1e-9);
        assert!((score(&course, &prefs(true, false)) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_requirement_bonus_needs_required_edge() {
        let with_req = Course::new("CS201", "DS", 3.0).requires("CS101");
        let without = Course::new("CS102", "Lab", 3.0);

        assert!((score(&with_req, &prefs(false, true)) - 45.0).abs() < 1e-9);
        assert!((score(&without, &prefs(false, true)) - 15.0).abs() < 1e-9);
        assert!((score(&with_req, &prefs(false, false)) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_grades_contribute_zero() {
        let course = Course::new("CS101", "Intro", 2.0);
        assert!((score(&course, &prefs(true, true)) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let a = Course::new("A", "A", 3.0);
        let b = Course::new("B", "B", 4.0);
        let c = Course::new("C", "C", 3.0);
        let catalog = vec![&a, &b, &c];

        let ranked = rank_courses(&catalog, &PlanningPreferences::default());
        let codes: Vec<&str> = ranked.iter().map(|s| s.course.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "A", "C"]);
        assert_eq!(ranked[1].position, 0);
        assert_eq!(ranked[2].position, 2);
    }
}
