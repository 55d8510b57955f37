//! Academic plan model (years -> semesters -> courses)

use super::course::Course;
use super::term::{SlotId, Term, YearName, TERMS_PER_YEAR};
use serde::{Deserialize, Serialize};

/// A catalog course copied into a plan slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedCourse {
    /// The copied course
    #[serde(flatten)]
    pub course: Course,
    /// Id of the semester holding the course (e.g., "freshman-fall")
    pub semester_id: String,
}

/// Why the engine could not place a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// No slot satisfied term offering, preferred terms and the credit cap
    NoEligibleTerm,
    /// A blocking prerequisite from the catalog was itself left unplaced
    PrerequisiteUnplaced,
}

/// A catalog course left out of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedCourse {
    /// Code of the course
    pub code: String,
    /// Reason it was not placed
    pub reason: UnplacedReason,
}

/// One term slot of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    /// Slot id (e.g., "sophomore-spring")
    pub id: String,
    /// Term name
    pub term: Term,
    /// Calendar year stamped on the slot
    pub year: i32,
    /// Id of the owning academic year (e.g., "sophomore")
    pub year_id: String,
    /// Courses assigned to this term
    pub courses: Vec<PlannedCourse>,
}

impl Semester {
    /// Total credits in this term
    #[must_use]
    pub fn total_credits(&self) -> f32 {
        self.courses.iter().map(|c| c.course.effective_credits()).sum()
    }

    /// Whether a course with `code` is in this term
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.course.code == code)
    }
}

/// One academic year of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    /// Year id (e.g., "freshman")
    pub id: String,
    /// Class-year name
    pub name: YearName,
    /// Calendar year in which the academic year starts
    pub start_year: i32,
    /// Fall, Spring and Summer terms in order
    pub semesters: Vec<Semester>,
}

/// A four-year academic plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPlan {
    /// Plan identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// The four academic years
    pub years: Vec<AcademicYear>,
    /// Catalog courses the engine could not place
    #[serde(default)]
    pub unplaced: Vec<UnplacedCourse>,
}

impl AcademicPlan {
    /// All semesters in plan order
    pub fn semesters(&self) -> impl Iterator<Item = &Semester> {
        self.years.iter().flat_map(|y| y.semesters.iter())
    }

    /// Look up a semester by id
    #[must_use]
    pub fn semester(&self, id: &str) -> Option<&Semester> {
        self.semesters().find(|s| s.id == id)
    }

    /// Chronological position of every semester, paired with the semester
    ///
    /// The position is derived from the year's position in the plan and the
    /// term, so a plan loaded from disk with shuffled semesters still orders
    /// Fall < Spring < Summer within a year.
    pub fn semesters_in_order(&self) -> impl Iterator<Item = (usize, &Semester)> {
        self.years.iter().enumerate().flat_map(|(year_idx, year)| {
            year.semesters
                .iter()
                .map(move |s| (year_idx * TERMS_PER_YEAR + s.term.index(), s))
        })
    }

    /// Chronological position and semester of the first term holding `code`
    #[must_use]
    pub fn find_course(&self, code: &str) -> Option<(usize, &Semester)> {
        self.semesters_in_order()
            .filter(|(_, s)| s.contains(code))
            .min_by_key(|(pos, _)| *pos)
    }

    /// Slot id of the term holding `code`, if the plan uses canonical slots
    #[must_use]
    pub fn slot_of(&self, code: &str) -> Option<SlotId> {
        self.find_course(code)
            .and_then(|(pos, _)| SlotId::from_index(pos))
    }

    /// Whether `code` is listed as an unplaced catalog course
    #[must_use]
    pub fn is_unplaced(&self, code: &str) -> bool {
        self.unplaced.iter().any(|u| u.code == code)
    }

    /// Number of placed courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.semesters().map(|s| s.courses.len()).sum()
    }

    /// Total placed credits
    #[must_use]
    pub fn total_credits(&self) -> f32 {
        self.semesters().map(Semester::total_credits).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semester(slot: SlotId, start_year: i32, courses: Vec<Course>) -> Semester {
        let id = slot.id();
        Semester {
            id: id.clone(),
            term: slot.term,
            year: start_year,
            year_id: slot.year.slug().to_string(),
            courses: courses
                .into_iter()
                .map(|course| PlannedCourse {
                    course,
                    semester_id: id.clone(),
                })
                .collect(),
        }
    }

    fn two_year_plan() -> AcademicPlan {
        let freshman = AcademicYear {
            id: "freshman".to_string(),
            name: YearName::Freshman,
            start_year: 2025,
            semesters: vec![
                semester(
                    SlotId::new(YearName::Freshman, Term::Fall),
                    2025,
                    vec![Course::new("CS101", "Intro", 3.0)],
                ),
                semester(
                    SlotId::new(YearName::Freshman, Term::Spring),
                    2025,
                    vec![Course::new("CS201", "Data Structures", 4.0)],
                ),
            ],
        };
        // Summer listed before Fall on purpose
        let sophomore = AcademicYear {
            id: "sophomore".to_string(),
            name: YearName::Sophomore,
            start_year: 2026,
            semesters: vec![
                semester(
                    SlotId::new(YearName::Sophomore, Term::Summer),
                    2026,
                    vec![Course::new("CS301", "Algorithms", 4.0)],
                ),
                semester(SlotId::new(YearName::Sophomore, Term::Fall), 2026, vec![]),
            ],
        };
        AcademicPlan {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            years: vec![freshman, sophomore],
            unplaced: vec![UnplacedCourse {
                code: "CS999".to_string(),
                reason: UnplacedReason::NoEligibleTerm,
            }],
        }
    }

    #[test]
    fn test_find_course_positions() {
        let plan = two_year_plan();
        assert_eq!(plan.find_course("CS101").map(|(p, _)| p), Some(0));
        assert_eq!(plan.find_course("CS201").map(|(p, _)| p), Some(1));
        assert_eq!(plan.find_course("CS301").map(|(p, _)| p), Some(5));
        assert_eq!(plan.find_course("MATH101"), None);
        assert_eq!(
            plan.slot_of("CS301"),
            Some(SlotId::new(YearName::Sophomore, Term::Summer))
        );
    }

    #[test]
    fn test_plan_totals() {
        let plan = two_year_plan();
        assert_eq!(plan.course_count(), 3);
        assert!((plan.total_credits() - 11.0).abs() < f32::EPSILON);
        assert!(plan.is_unplaced("CS999"));
        assert!(!plan.is_unplaced("CS101"));
        assert!(plan.semester("freshman-spring").is_some_and(|s| s.contains("CS201")));
    }

    #[test]
    fn test_planned_course_serializes_flat() {
        let plan = two_year_plan();
        let json = serde_json::to_value(&plan).unwrap();
        let first = &json["years"][0]["semesters"][0]["courses"][0];
        assert_eq!(first["code"], "CS101");
        assert_eq!(first["semesterId"], "freshman-fall");
        assert_eq!(json["unplaced"][0]["reason"], "no_eligible_term");
    }
}
