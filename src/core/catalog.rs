//! JSON loading and saving for catalogs, constraints and plans

use crate::core::error::CatalogError;
use crate::core::models::{AcademicPlan, Course, PlanningConstraints};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Accepted catalog layouts: a bare array or an object with a `courses` array
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Course>),
    Wrapped { courses: Vec<Course> },
}

impl CatalogFile {
    fn into_courses(self) -> Vec<Course> {
        match self {
            Self::List(courses) | Self::Wrapped { courses } => courses,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a catalog from a JSON string
///
/// Codes and ids are trimmed; courses without an `id` take their code as id.
///
/// # Errors
///
/// Returns the `serde_json` error when the text is not a catalog.
pub fn parse_catalog(json: &str) -> Result<Vec<Course>, serde_json::Error> {
    let file: CatalogFile = serde_json::from_str(json)?;
    Ok(normalize(file.into_courses()))
}

fn normalize(mut courses: Vec<Course>) -> Vec<Course> {
    for course in &mut courses {
        // Prerequisite references are trimmed at deserialization
        course.code = course.code.trim().to_string();
        course.id = course.id.trim().to_string();
        if course.id.is_empty() {
            course.id.clone_from(&course.code);
        }
    }
    courses
}

/// Load a course catalog from a JSON file
///
/// # Errors
///
/// Returns [`CatalogError`] when the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Vec<Course>, CatalogError> {
    let file: CatalogFile = read_json(path)?;
    let courses = normalize(file.into_courses());
    crate::debug!("Loaded {} courses from {}", courses.len(), path.display());
    Ok(courses)
}

/// Load planning constraints from a JSON file
///
/// # Errors
///
/// Returns [`CatalogError`] when the file cannot be read or parsed.
pub fn load_constraints(path: &Path) -> Result<PlanningConstraints, CatalogError> {
    read_json(path)
}

/// Load a previously saved plan
///
/// # Errors
///
/// Returns [`CatalogError`] when the file cannot be read or parsed.
pub fn load_plan(path: &Path) -> Result<AcademicPlan, CatalogError> {
    read_json(path)
}

/// Write a plan as pretty-printed JSON, creating parent directories
///
/// # Errors
///
/// Returns [`CatalogError`] when serialization or the write fails.
pub fn save_plan(plan: &AcademicPlan, path: &Path) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(plan).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    crate::debug!("Saved plan {} to {}", plan.id, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{PrerequisiteKind, Term};
    use tempfile::TempDir;

    const CATALOG: &str = r#"[
        {
            "code": "CS101",
            "name": "Intro to CS",
            "credits": 4,
            "offeredTerms": ["Fall", "spring"],
            "gradeDistribution": "{\"A\": \"40\", \"B\": 35}"
        },
        {
            "id": "c-201",
            "code": "CS201",
            "name": "Data Structures",
            "credits": 4,
            "prerequisites": ["CS101", {"courseId": "MATH101", "type": "concurrent"}]
        }
    ]"#;

    #[test]
    fn test_parse_array_catalog() {
        let courses = parse_catalog(CATALOG).unwrap();
        assert_eq!(courses.len(), 2);

        assert_eq!(courses[0].id, "CS101");
        assert_eq!(courses[0].offered_terms, vec![Term::Fall, Term::Spring]);
        assert!((courses[0].grade_distribution.a_rate() - 40.0).abs() < 1e-9);

        assert_eq!(courses[1].id, "c-201");
        assert_eq!(courses[1].offered_terms.len(), 3);
        assert_eq!(courses[1].prerequisites[0].course_id, "CS101");
        assert_eq!(courses[1].prerequisites[0].kind, PrerequisiteKind::Required);
        assert_eq!(courses[1].prerequisites[1].kind, PrerequisiteKind::Concurrent);
    }

    #[test]
    fn test_codes_are_trimmed_like_prerequisites() {
        let courses = parse_catalog(
            r#"[
                {"code": "CS101 ", "id": " c-101", "credits": 3},
                {"code": "CS201", "credits": 3, "prerequisites": [" CS101"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(courses[0].code, "CS101");
        assert_eq!(courses[0].id, "c-101");
        assert_eq!(courses[1].prerequisites[0].course_id, courses[0].code);
    }

    #[test]
    fn test_padded_code_still_orders_dependent() {
        use crate::core::generator::generate_plan;
        use crate::core::models::{PlannerSettings, PlanningPreferences};

        let courses = parse_catalog(
            r#"[
                {"code": "CS101 ", "credits": 3},
                {"code": "CS201", "credits": 3, "prerequisites": ["CS101"]}
            ]"#,
        )
        .unwrap();
        let result = generate_plan(
            &courses,
            &PlanningPreferences::default(),
            &PlanningConstraints::default(),
            &PlannerSettings::default(),
        )
        .unwrap();

        assert!(result.plan.semester("freshman-fall").unwrap().contains("CS101"));
        assert!(result.plan.semester("freshman-spring").unwrap().contains("CS201"));
        assert!(result.validation.valid);
    }

    #[test]
    fn test_parse_wrapped_catalog() {
        let courses = parse_catalog(r#"{"courses": [{"code": "X1", "credits": 3}]}"#).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].code, "X1");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_catalog(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_constraints(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_save_and_load_plan() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plans").join("p.json");
        let plan = AcademicPlan {
            id: "p".to_string(),
            user_id: "u".to_string(),
            years: Vec::new(),
            unplaced: Vec::new(),
        };

        save_plan(&plan, &path).unwrap();
        assert!(path.exists());
        assert_eq!(load_plan(&path).unwrap(), plan);
    }
}
