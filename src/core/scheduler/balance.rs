//! Workload balancing by subset-sum eviction

use super::{TermAssignments, TermScheduler};
use crate::core::models::{Course, SLOT_COUNT};

/// Credits are discretized to tenths for the subset-sum table
const UNITS_PER_CREDIT: f32 = 10.0;

/// Slack absorbing f32 noise such as `3.2 * 10.0 = 32.000002`
const UNIT_EPSILON: f32 = 1e-3;

/// Course weight in units, rounded up so a chosen subset never undercounts
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn course_units(credits: f32) -> usize {
    if credits.is_finite() && credits > 0.0 {
        (credits * UNITS_PER_CREDIT - UNIT_EPSILON).ceil() as usize
    } else {
        0
    }
}

/// Excess in units, rounded down so eviction never exceeds the real overload
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn excess_units(excess: f32) -> usize {
    if excess.is_finite() && excess > 0.0 {
        (excess * UNITS_PER_CREDIT + UNIT_EPSILON).floor() as usize
    } else {
        0
    }
}

/// Choose which courses to evict from an overloaded term
///
/// 0/1 subset-sum over `weights` (credit units). `dp[i][c]` holds the fewest
/// courses among the first `i` whose credits sum to exactly `c`, or `None`
/// when `c` is unreachable. The target is `excess` when reachable, otherwise
/// the largest reachable sum below it. Ties go to the subset with the fewest
/// courses; backtracking then prefers leaving later courses in place.
///
/// # Returns
/// Indices into `weights` of the courses to evict, or `None` when nothing
/// positive is reachable
#[must_use]
pub fn select_eviction_subset(weights: &[usize], excess: usize) -> Option<Vec<usize>> {
    if excess == 0 || weights.is_empty() {
        return None;
    }

    let n = weights.len();
    let mut dp: Vec<Vec<Option<usize>>> = vec![vec![None; excess + 1]; n + 1];
    dp[0][0] = Some(0);

    for i in 1..=n {
        let weight = weights[i - 1];
        for c in 0..=excess {
            let skip = dp[i - 1][c];
            let take = if weight > 0 && c >= weight {
                dp[i - 1][c - weight].map(|count| count + 1)
            } else {
                None
            };
            dp[i][c] = match (skip, take) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
        }
    }

    let best = (1..=excess).rev().find(|&c| dp[n][c].is_some())?;

    let mut chosen = Vec::new();
    let mut remaining = best;
    for i in (1..=n).rev() {
        if dp[i - 1][remaining] == dp[i][remaining] {
            continue;
        }
        chosen.push(i - 1);
        remaining -= weights[i - 1];
    }
    chosen.reverse();
    Some(chosen)
}

impl<'a> TermScheduler<'a> {
    /// Relocate courses out of terms loaded above `target + tolerance`
    ///
    /// Terms are visited in chronological order. For each overloaded term the
    /// subset chosen by [`select_eviction_subset`] is moved, course by course,
    /// to the first other slot that satisfies the placement rules. Courses
    /// with nowhere to go stay put. Under-loaded terms are never filled.
    pub fn rebalance(&self, assignments: &mut TermAssignments<'a>) {
        let target = self.settings.target_credits;
        let tolerance = self.settings.tolerance;

        for origin in 0..SLOT_COUNT {
            let load = &assignments.terms[origin];
            let excess = load.total_credits - target;
            if excess <= tolerance {
                continue;
            }

            let weights: Vec<usize> = load
                .courses
                .iter()
                .map(|c| course_units(c.effective_credits()))
                .collect();
            let Some(selection) = select_eviction_subset(&weights, excess_units(excess)) else {
                crate::debug!(
                    "{} is over target by {excess:.1} credits but no subset fits; leaving it",
                    load.slot
                );
                continue;
            };

            let evicted: Vec<&'a Course> = selection.iter().map(|&i| load.courses[i]).collect();
            crate::debug!(
                "{} at {:.1} credits (target {target:.1}); evicting {}",
                load.slot,
                load.total_credits,
                evicted
                    .iter()
                    .map(|c| c.code.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            for course in evicted {
                self.relocate(assignments, course, origin);
            }
        }
    }

    /// Move one course out of `origin` if any other slot can take it
    fn relocate(&self, assignments: &mut TermAssignments<'a>, course: &'a Course, origin: usize) -> bool {
        let bounds = if self.settings.enforce_prerequisite_order {
            self.earliest_slot(course, assignments)
                .zip(self.latest_slot(course, assignments))
        } else {
            Some((0, SLOT_COUNT - 1))
        };

        let destination = bounds.and_then(|(earliest, latest)| {
            self.first_fitting_slot(course, assignments, earliest, latest, Some(origin))
        });

        let Some(to) = destination else {
            crate::debug!("{}: no other term can take it; staying put", course.code);
            return false;
        };

        let moved = assignments.move_course(origin, to, &course.code);
        if moved {
            crate::debug!(
                "Moved {} from {} to {}",
                course.code,
                assignments.terms[origin].slot,
                assignments.terms[to].slot
            );
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::super::{TermAssignments, TermScheduler};
    use super::*;
    use crate::core::models::{PlannerSettings, PlanningConstraints, Term, DAG};

    #[test]
    fn test_exact_subset_prefers_fewest_courses() {
        // 5 can be hit by [2, 3] or by [5]
        let picked = select_eviction_subset(&[2, 3, 5, 4], 5);
        assert_eq!(picked, Some(vec![2]));
    }

    #[test]
    fn test_inexact_subset_takes_largest_below_excess() {
        let picked = select_eviction_subset(&[40, 40, 40, 40, 40], 50);
        assert_eq!(picked, Some(vec![0]));
    }

    #[test]
    fn test_no_reachable_subset() {
        assert_eq!(select_eviction_subset(&[60, 70], 50), None);
        assert_eq!(select_eviction_subset(&[], 50), None);
        assert_eq!(select_eviction_subset(&[10], 0), None);
    }

    #[test]
    fn test_zero_weight_courses_are_never_chosen() {
        assert_eq!(select_eviction_subset(&[0, 30, 0], 30), Some(vec![1]));
    }

    #[test]
    fn test_multi_course_exact_subset() {
        let picked = select_eviction_subset(&[30, 40, 10, 45], 50).unwrap();
        let total: usize = picked.iter().map(|&i| [30, 40, 10, 45][i]).sum();
        assert_eq!(total, 50);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_rebalance_five_four_credit_courses() {
        let courses: Vec<Course> = (1..=5)
            .map(|i| Course::new(&format!("C{i}"), "Course", 4.0))
            .collect();
        let dag = DAG::from_courses(&courses);
        let constraints = PlanningConstraints::default();
        let settings = PlannerSettings::default();
        let scheduler = TermScheduler::new(&dag, &constraints, &settings);

        let mut assignments = TermAssignments::new();
        for course in &courses {
            assignments.place(0, course);
        }
        scheduler.rebalance(&mut assignments);

        assert!((assignments.terms[0].total_credits - 16.0).abs() < f32::EPSILON);
        assert!(assignments.terms[0].total_credits <= 18.0);
        assert_eq!(assignments.slot_of("C1"), Some(1));
        assert_eq!(assignments.placed_count(), 5);
    }

    #[test]
    fn test_rebalance_exact_excess_course() {
        let mut courses: Vec<Course> = (1..=4)
            .map(|i| Course::new(&format!("C{i}"), "Course", 4.0))
            .collect();
        courses.push(Course::new("FIVE", "Five", 5.0));
        let dag = DAG::from_courses(&courses);
        let constraints = PlanningConstraints {
            max_credits_per_semester: 24,
            ..PlanningConstraints::default()
        };
        let settings = PlannerSettings::default();
        let scheduler = TermScheduler::new(&dag, &constraints, &settings);

        let mut assignments = TermAssignments::new();
        for course in &courses {
            assignments.place(0, course);
        }
        // 21 credits, excess 6: best reachable is 5 (FIVE) with one course
        scheduler.rebalance(&mut assignments);

        assert_eq!(assignments.slot_of("FIVE"), Some(1));
        assert!((assignments.terms[0].total_credits - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fractional_credits_never_evict_past_excess() {
        assert_eq!(course_units(3.2), 32);
        assert_eq!(course_units(4.0), 40);
        assert_eq!(excess_units(3.16), 31);
        assert_eq!(excess_units(5.0), 50);

        let courses = vec![
            Course::new("BIG", "Big", 14.96),
            Course::new("SMALL", "Small", 3.2),
        ];
        let dag = DAG::from_courses(&courses);
        let constraints = PlanningConstraints {
            max_credits_per_semester: 24,
            ..PlanningConstraints::default()
        };
        let settings = PlannerSettings::default();
        let scheduler = TermScheduler::new(&dag, &constraints, &settings);

        let mut assignments = TermAssignments::new();
        for course in &courses {
            assignments.place(0, course);
        }
        // 18.16 credits, excess 3.16: SMALL alone would overshoot it
        scheduler.rebalance(&mut assignments);

        assert_eq!(assignments.slot_of("BIG"), Some(0));
        assert_eq!(assignments.slot_of("SMALL"), Some(0));
    }

    #[test]
    fn test_rebalance_keeps_course_without_alternative() {
        let courses: Vec<Course> = (1..=5)
            .map(|i| Course::new(&format!("C{i}"), "Course", 4.0).offered_in(&[Term::Fall]))
            .collect();
        let dag = DAG::from_courses(&courses);
        let mut constraints = PlanningConstraints::default();
        for course in &courses {
            constraints
                .preferred_terms
                .insert(course.code.clone(), vec!["freshman-fall".to_string()]);
        }
        let settings = PlannerSettings::default();
        let scheduler = TermScheduler::new(&dag, &constraints, &settings);

        let mut assignments = TermAssignments::new();
        for course in &courses {
            assignments.place(0, course);
        }
        scheduler.rebalance(&mut assignments);

        assert!((assignments.terms[0].total_credits - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rebalance_respects_dependents() {
        let courses = vec![
            Course::new("A", "A", 4.0),
            Course::new("B", "B", 4.0),
            Course::new("C", "C", 4.0),
            Course::new("D", "D", 4.0),
            Course::new("E", "E", 4.0),
            Course::new("NEXT", "Next", 3.0).requires("A"),
        ];
        let dag = DAG::from_courses(&courses);
        let constraints = PlanningConstraints::default();
        let settings = PlannerSettings::default();
        let scheduler = TermScheduler::new(&dag, &constraints, &settings);

        let mut assignments = TermAssignments::new();
        for course in &courses[..5] {
            assignments.place(3, course);
        }
        assignments.place(4, &courses[5]);
        scheduler.rebalance(&mut assignments);

        // A cannot move past NEXT, so it lands in the first earlier slot
        assert_eq!(assignments.slot_of("A"), Some(0));
        assert!(assignments.terms[3].total_credits <= 18.0);
    }

    #[test]
    fn test_balanced_terms_are_untouched() {
        let courses: Vec<Course> = (1..=4)
            .map(|i| Course::new(&format!("C{i}"), "Course", 4.5))
            .collect();
        let dag = DAG::from_courses(&courses);
        let constraints = PlanningConstraints::default();
        let settings = PlannerSettings::default();
        let scheduler = TermScheduler::new(&dag, &constraints, &settings);

        let mut assignments = TermAssignments::new();
        for course in &courses {
            assignments.place(0, course);
        }
        scheduler.rebalance(&mut assignments);

        assert_eq!(assignments.terms[0].courses.len(), 4);
    }
}
