//! Course model

use super::grades::GradeDistribution;
use super::term::Term;
use serde::{Deserialize, Serialize};

/// How a prerequisite constrains scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrerequisiteKind {
    /// Must be completed in a strictly earlier term
    #[default]
    Required,
    /// May be taken in the same term or earlier
    #[serde(alias = "corequisite")]
    Concurrent,
    /// Advisory only; never blocks placement
    Recommended,
}

impl PrerequisiteKind {
    /// Whether this kind participates in the blocking graph
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Required | Self::Concurrent)
    }
}

/// A prerequisite edge pointing at another course by its code
///
/// Catalog entries list prerequisites either as bare codes (`"CS101"`,
/// meaning a required edge) or as objects; both normalize into this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPrerequisite", rename_all = "camelCase")]
pub struct Prerequisite {
    /// Code of the prerequisite course (e.g., "CS101")
    pub course_id: String,
    /// Relationship kind
    pub kind: PrerequisiteKind,
    /// Minimum letter grade, if any (informational)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_grade: Option<String>,
}

impl Prerequisite {
    /// Create a required prerequisite edge
    #[must_use]
    pub fn required(code: &str) -> Self {
        Self::new(code, PrerequisiteKind::Required)
    }

    /// Create a prerequisite edge of the given kind
    #[must_use]
    pub fn new(code: &str, kind: PrerequisiteKind) -> Self {
        Self {
            course_id: code.to_string(),
            kind,
            minimum_grade: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrerequisite {
    Code(String),
    Edge {
        #[serde(rename = "courseId", alias = "course_id", alias = "code")]
        course_id: String,
        #[serde(default, alias = "type")]
        kind: PrerequisiteKind,
        #[serde(default, rename = "minimumGrade", alias = "minimum_grade")]
        minimum_grade: Option<String>,
    },
}

impl From<RawPrerequisite> for Prerequisite {
    fn from(raw: RawPrerequisite) -> Self {
        match raw {
            RawPrerequisite::Code(code) => Self::required(code.trim()),
            RawPrerequisite::Edge {
                course_id,
                kind,
                minimum_grade,
            } => Self {
                course_id: course_id.trim().to_string(),
                kind,
                minimum_grade,
            },
        }
    }
}

fn all_terms() -> Vec<Term> {
    Term::ALL.to_vec()
}

/// Represents a course in the catalog
///
/// Courses are read-only inputs to the planner; plans hold copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Catalog primary key
    #[serde(default)]
    pub id: String,

    /// Course code used by prerequisite references (e.g., "CS2510")
    pub code: String,

    /// Course title
    #[serde(default)]
    pub name: String,

    /// Credit hours (can be fractional)
    #[serde(default)]
    pub credits: f32,

    /// Owning department (e.g., "CS")
    #[serde(default)]
    pub department: String,

    /// Level band (e.g., 300)
    #[serde(default)]
    pub level: u32,

    /// Prerequisite edges
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,

    /// Terms in which the course is offered; all terms when omitted
    #[serde(default = "all_terms")]
    pub offered_terms: Vec<Term>,

    /// Historical grade distribution
    #[serde(default)]
    pub grade_distribution: GradeDistribution,
}

impl Course {
    /// Create a course offered in every term with no prerequisites
    ///
    /// # Arguments
    /// * `code` - Course code, also used as the id
    /// * `name` - Course title
    /// * `credits` - Credit hours
    #[must_use]
    pub fn new(code: &str, name: &str, credits: f32) -> Self {
        Self {
            id: code.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            credits,
            department: code
                .chars()
                .take_while(char::is_ascii_alphabetic)
                .collect(),
            level: 0,
            prerequisites: Vec::new(),
            offered_terms: all_terms(),
            grade_distribution: GradeDistribution::Unknown,
        }
    }

    /// Credits used for scheduling; malformed values (negative, NaN) count as zero
    #[must_use]
    pub fn effective_credits(&self) -> f32 {
        if self.credits.is_finite() && self.credits > 0.0 {
            self.credits
        } else {
            0.0
        }
    }

    /// Whether the course runs in `term`
    #[must_use]
    pub fn is_offered_in(&self, term: Term) -> bool {
        self.offered_terms.contains(&term)
    }

    /// Whether any prerequisite edge is of kind `required`
    #[must_use]
    pub fn has_required_prerequisite(&self) -> bool {
        self.prerequisites
            .iter()
            .any(|p| p.kind == PrerequisiteKind::Required)
    }

    /// Add a prerequisite edge, ignoring exact duplicates
    pub fn add_prerequisite(&mut self, prerequisite: Prerequisite) {
        if !self.prerequisites.contains(&prerequisite) {
            self.prerequisites.push(prerequisite);
        }
    }

    /// Builder form of [`add_prerequisite`](Self::add_prerequisite) for a required edge
    #[must_use]
    pub fn requires(mut self, code: &str) -> Self {
        self.add_prerequisite(Prerequisite::required(code));
        self
    }

    /// Builder: add an edge of any kind
    #[must_use]
    pub fn with_prerequisite(mut self, code: &str, kind: PrerequisiteKind) -> Self {
        self.add_prerequisite(Prerequisite::new(code, kind));
        self
    }

    /// Builder: restrict the terms the course is offered in
    #[must_use]
    pub fn offered_in(mut self, terms: &[Term]) -> Self {
        self.offered_terms = terms.to_vec();
        self
    }

    /// Builder: attach a grade distribution
    #[must_use]
    pub fn with_grades(mut self, distribution: GradeDistribution) -> Self {
        self.grade_distribution = distribution;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new("CS1800", "Discrete Structures", 4.0);

        assert_eq!(course.id, "CS1800");
        assert_eq!(course.code, "CS1800");
        assert_eq!(course.department, "CS");
        assert!((course.credits - 4.0).abs() < f32::EPSILON);
        assert!(course.prerequisites.is_empty());
        assert_eq!(course.offered_terms, Term::ALL.to_vec());
    }

    #[test]
    fn test_effective_credits_clamps_bad_values() {
        assert!((Course::new("LAB1", "Lab", 1.5).effective_credits() - 1.5).abs() < f32::EPSILON);
        assert!(Course::new("X1", "Bad", -3.0).effective_credits().abs() < f32::EPSILON);
        assert!(Course::new("X2", "Bad", f32::NAN).effective_credits().abs() < f32::EPSILON);
    }

    #[test]
    fn test_add_prerequisite_dedupes() {
        let course = Course::new("CS2510", "Data Structures", 4.0)
            .requires("CS1800")
            .requires("CS1800");
        assert_eq!(course.prerequisites.len(), 1);
        assert!(course.has_required_prerequisite());
    }

    #[test]
    fn test_recommended_only_is_not_required() {
        let course = Course::new("CS3500", "OOD", 4.0)
            .with_prerequisite("CS2510", PrerequisiteKind::Recommended);
        assert!(!course.has_required_prerequisite());
        assert!(!PrerequisiteKind::Recommended.is_blocking());
    }

    #[test]
    fn test_deserialize_mixed_prerequisite_shapes() {
        let json = r#"{
            "id": "c-42",
            "code": "CS3000",
            "credits": 4,
            "prerequisites": [
                "CS2510",
                {"courseId": "CS1800", "type": "concurrent"},
                {"courseId": "MATH1365", "kind": "recommended", "minimumGrade": "C"}
            ],
            "offeredTerms": ["Fall", "Spring"],
            "gradeDistribution": "{\"A\": \"30\", \"B\": \"70\"}"
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();

        assert_eq!(course.id, "c-42");
        assert_eq!(course.prerequisites[0], Prerequisite::required("CS2510"));
        assert_eq!(course.prerequisites[1].kind, PrerequisiteKind::Concurrent);
        assert_eq!(course.prerequisites[2].kind, PrerequisiteKind::Recommended);
        assert_eq!(course.prerequisites[2].minimum_grade.as_deref(), Some("C"));
        assert!(!course.is_offered_in(Term::Summer));
        assert!((course.grade_distribution.a_rate() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_offered_terms_means_every_term() {
        let course: Course = serde_json::from_str(r#"{"code": "ART100"}"#).unwrap();
        assert!(Term::ALL.iter().all(|t| course.is_offered_in(*t)));
        assert!(!course.grade_distribution.is_known());

        let never: Course = serde_json::from_str(r#"{"code": "ART101", "offeredTerms": []}"#).unwrap();
        assert!(never.offered_terms.is_empty());
    }
}
