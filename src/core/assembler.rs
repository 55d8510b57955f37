//! Turns slot assignments into the four-year `AcademicPlan` structure

use crate::core::models::{
    AcademicPlan, AcademicYear, PlannedCourse, PlannerSettings, Semester, SlotId, Term, YearName,
};
use crate::core::scheduler::TermAssignments;

/// Build the plan skeleton and copy every assigned course into its slot
///
/// Years are Freshman..Senior, each with Fall, Spring and Summer semesters
/// whose ids are `{year}-{term}` (e.g. `junior-spring`). Every semester of a
/// year is stamped with `start_year + year_index`.
#[must_use]
pub fn assemble(assignments: &TermAssignments<'_>, settings: &PlannerSettings) -> AcademicPlan {
    let years = YearName::ALL
        .into_iter()
        .zip(settings.start_year..)
        .map(|(year, calendar_year)| AcademicYear {
            id: year.slug().to_string(),
            name: year,
            start_year: calendar_year,
            semesters: Term::ALL
                .into_iter()
                .map(|term| build_semester(assignments, SlotId::new(year, term), calendar_year))
                .collect(),
        })
        .collect();

    AcademicPlan {
        id: settings.plan_id.clone(),
        user_id: settings.user_id.clone(),
        years,
        unplaced: assignments.unplaced.clone(),
    }
}

fn build_semester(assignments: &TermAssignments<'_>, slot: SlotId, calendar_year: i32) -> Semester {
    let id = slot.id();
    let courses = assignments
        .terms
        .get(slot.index())
        .map(|load| {
            load.courses
                .iter()
                .map(|course| PlannedCourse {
                    course: (*course).clone(),
                    semester_id: id.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    Semester {
        id,
        term: slot.term,
        year: calendar_year,
        year_id: slot.year.slug().to_string(),
        courses,
    }
}
