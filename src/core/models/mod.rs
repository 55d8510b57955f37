//! Data models for the planning engine

pub mod course;
pub mod dag;
pub mod grades;
pub mod plan;
pub mod preferences;
pub mod term;

pub use course::{Course, Prerequisite, PrerequisiteKind};
pub use dag::DAG;
pub use grades::GradeDistribution;
pub use plan::{AcademicPlan, AcademicYear, PlannedCourse, Semester, UnplacedCourse, UnplacedReason};
pub use preferences::{PlannerSettings, PlanningConstraints, PlanningPreferences};
pub use term::{SlotId, Term, YearName, SLOT_COUNT};
