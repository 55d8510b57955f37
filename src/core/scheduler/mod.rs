//! Term scheduler for distributing catalog courses across the twelve plan slots
//!
//! This module implements:
//! 1. Greedy first-fitting-slot placement in descending score order
//!    ([`TermScheduler::assign`])
//! 2. Prerequisite-aware processing order and slot bounds (enabled by
//!    `PlannerSettings::enforce_prerequisite_order`)
//! 3. Subset-sum eviction from overloaded terms ([`TermScheduler::rebalance`])
//!
//! A slot is eligible for a course when the course is offered in the slot's
//! term, the caller's preferred terms allow it, and the course fits under the
//! credit cap.

mod assign;
mod balance;

pub use balance::select_eviction_subset;

use crate::core::models::{
    Course, PlannerSettings, PlanningConstraints, SlotId, UnplacedCourse, DAG, SLOT_COUNT,
};

/// Slack used when comparing summed fractional credits against caps
const CREDIT_EPSILON: f32 = 1e-4;

/// A single slot in the schedule with its assigned courses
#[derive(Debug, Clone)]
pub struct TermLoad<'a> {
    /// Which (year, term) this is
    pub slot: SlotId,
    /// Courses assigned to this slot
    pub courses: Vec<&'a Course>,
    /// Total credit hours for this slot
    pub total_credits: f32,
}

impl<'a> TermLoad<'a> {
    /// Create a new empty slot
    #[must_use]
    pub const fn new(slot: SlotId) -> Self {
        Self {
            slot,
            courses: Vec::new(),
            total_credits: 0.0,
        }
    }

    /// Add a course to the slot
    pub fn add_course(&mut self, course: &'a Course) {
        self.courses.push(course);
        self.total_credits += course.effective_credits();
    }

    /// Remove a course by code, returning it when present
    pub fn remove_course(&mut self, code: &str) -> Option<&'a Course> {
        let pos = self.courses.iter().position(|c| c.code == code)?;
        let course = self.courses.remove(pos);
        self.total_credits = self.courses.iter().map(|c| c.effective_credits()).sum();
        Some(course)
    }

    /// Whether `credits` more would stay within `max_credits`
    #[must_use]
    pub fn has_room(&self, credits: f32, max_credits: f32) -> bool {
        self.total_credits + credits <= max_credits + CREDIT_EPSILON
    }
}

/// Slot-by-slot course assignment, in canonical chronological order
#[derive(Debug, Clone)]
pub struct TermAssignments<'a> {
    /// All twelve slots
    pub terms: Vec<TermLoad<'a>>,
    /// Courses that could not be placed
    pub unplaced: Vec<UnplacedCourse>,
}

impl<'a> TermAssignments<'a> {
    /// Create empty assignments for every slot
    #[must_use]
    pub fn new() -> Self {
        Self {
            terms: SlotId::all().into_iter().map(TermLoad::new).collect(),
            unplaced: Vec::new(),
        }
    }

    /// Put a course into the slot at `index` without any checks
    pub fn place(&mut self, index: usize, course: &'a Course) {
        if let Some(term) = self.terms.get_mut(index) {
            term.add_course(course);
        }
    }

    /// Move a course between slots. Returns `false` if it was not in `from`.
    pub fn move_course(&mut self, from: usize, to: usize, code: &str) -> bool {
        let Some(course) = self.terms.get_mut(from).and_then(|t| t.remove_course(code)) else {
            return false;
        };
        self.place(to, course);
        true
    }

    /// Index of the slot holding `code`
    #[must_use]
    pub fn slot_of(&self, code: &str) -> Option<usize> {
        self.terms
            .iter()
            .position(|t| t.courses.iter().any(|c| c.code == code))
    }

    /// Number of placed courses
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.terms.iter().map(|t| t.courses.len()).sum()
    }
}

impl Default for TermAssignments<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Term scheduler that places courses and rebalances workloads
pub struct TermScheduler<'a> {
    dag: &'a DAG,
    constraints: &'a PlanningConstraints,
    settings: &'a PlannerSettings,
}

impl<'a> TermScheduler<'a> {
    /// Create a new term scheduler
    #[must_use]
    pub const fn new(dag: &'a DAG, constraints: &'a PlanningConstraints, settings: &'a PlannerSettings) -> Self {
        Self {
            dag,
            constraints,
            settings,
        }
    }

    /// Offering and preferred-term check, independent of current loads
    fn is_eligible(&self, course: &Course, slot: SlotId) -> bool {
        course.is_offered_in(slot.term) && self.constraints.allows_slot(course, slot)
    }

    /// First slot in `earliest..=latest` (skipping `exclude`) that can take `course`
    fn first_fitting_slot(
        &self,
        course: &Course,
        assignments: &TermAssignments<'a>,
        earliest: usize,
        latest: usize,
        exclude: Option<usize>,
    ) -> Option<usize> {
        let max_credits = self.constraints.max_credits();
        let credits = course.effective_credits();

        (earliest..=latest.min(SLOT_COUNT - 1))
            .filter(|&idx| Some(idx) != exclude)
            .find(|&idx| {
                let load = &assignments.terms[idx];
                self.is_eligible(course, load.slot) && load.has_room(credits, max_credits)
            })
    }

    /// Earliest slot allowed by already-placed blocking prerequisites
    ///
    /// Required prerequisites push the bound past their slot; concurrent ones
    /// allow the same slot. Returns `None` when a catalog prerequisite is not
    /// placed anywhere.
    fn earliest_slot(&self, course: &Course, assignments: &TermAssignments<'a>) -> Option<usize> {
        let mut earliest = 0;
        for prereq in self.dag.get_prerequisites(&course.code) {
            earliest = earliest.max(assignments.slot_of(prereq)? + 1);
        }
        for coreq in self.dag.get_corequisites(&course.code) {
            earliest = earliest.max(assignments.slot_of(coreq)?);
        }
        Some(earliest)
    }

    /// Latest slot allowed by already-placed dependents
    ///
    /// Returns `None` when a dependent sits in the first slot and requires
    /// this course strictly earlier.
    fn latest_slot(&self, course: &Course, assignments: &TermAssignments<'a>) -> Option<usize> {
        let mut latest = SLOT_COUNT - 1;
        for dependent in self.dag.get_dependents(&course.code) {
            let Some(dep_slot) = assignments.slot_of(dependent) else {
                continue;
            };
            let strict = self
                .dag
                .get_prerequisites(dependent)
                .iter()
                .any(|p| p == &course.code);
            let bound = if strict { dep_slot.checked_sub(1)? } else { dep_slot };
            latest = latest.min(bound);
        }
        Some(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{PrerequisiteKind, Term, YearName};

    #[test]
    fn test_term_load_add_and_remove() {
        let a = Course::new("A", "A", 3.0);
        let b = Course::new("B", "B", 4.5);
        let mut load = TermLoad::new(SlotId::new(YearName::Freshman, Term::Fall));
        load.add_course(&a);
        load.add_course(&b);
        assert!((load.total_credits - 7.5).abs() < f32::EPSILON);

        assert_eq!(load.remove_course("A").map(|c| c.code.as_str()), Some("A"));
        assert!((load.total_credits - 4.5).abs() < f32::EPSILON);
        assert!(load.remove_course("A").is_none());
    }

    #[test]
    fn test_has_room_is_inclusive() {
        let a = Course::new("A", "A", 15.0);
        let mut load = TermLoad::new(SlotId::new(YearName::Freshman, Term::Fall));
        load.add_course(&a);
        assert!(load.has_room(3.0, 18.0));
        assert!(!load.has_room(3.5, 18.0));
    }

    #[test]
    fn test_assignments_move_course() {
        let a = Course::new("A", "A", 3.0);
        let mut assignments = TermAssignments::new();
        assert_eq!(assignments.terms.len(), SLOT_COUNT);

        assignments.place(0, &a);
        assert_eq!(assignments.slot_of("A"), Some(0));
        assert!(assignments.move_course(0, 4, "A"));
        assert_eq!(assignments.slot_of("A"), Some(4));
        assert!(!assignments.move_course(0, 4, "A"));
        assert_eq!(assignments.placed_count(), 1);
    }

    #[test]
    fn test_slot_bounds_follow_prerequisites() {
        let courses = vec![
            Course::new("A", "A", 3.0),
            Course::new("B", "B", 3.0).requires("A"),
            Course::new("C", "C", 3.0).with_prerequisite("A", PrerequisiteKind::Concurrent),
        ];
        let dag = DAG::from_courses(&courses);
        let constraints = PlanningConstraints::default();
        let settings = PlannerSettings::default();
        let scheduler = TermScheduler::new(&dag, &constraints, &settings);

        let mut assignments = TermAssignments::new();
        assert_eq!(scheduler.earliest_slot(&courses[1], &assignments), None);

        assignments.place(2, &courses[0]);
        assert_eq!(scheduler.earliest_slot(&courses[1], &assignments), Some(3));
        assert_eq!(scheduler.earliest_slot(&courses[2], &assignments), Some(2));

        assignments.place(5, &courses[1]);
        assignments.place(4, &courses[2]);
        assert_eq!(scheduler.latest_slot(&courses[0], &assignments), Some(4));

        let mut first = TermAssignments::new();
        first.place(0, &courses[1]);
        assert_eq!(scheduler.latest_slot(&courses[0], &first), None);
    }
}
