//! Prerequisite graph over course codes, with cycle detection
//!
//! The blocking graph holds `required` and `concurrent` edges. `recommended`
//! edges are kept separately for display and never block placement, so they
//! may legally form cycles.

use super::course::{Course, PrerequisiteKind};
use crate::core::error::PlanError;
use std::collections::HashMap;

/// Directed graph of course prerequisites keyed by course code
///
/// The DAG keeps forward association lists per edge kind plus a reverse
/// `dependents` list (blocking edges only) so it can be walked both ways.
#[derive(Debug, Clone, Default)]
pub struct DAG {
    /// Maps course code -> required prerequisite codes
    pub dependencies: HashMap<String, Vec<String>>,

    /// Maps course code -> concurrent (same term allowed) prerequisite codes
    pub corequisites: HashMap<String, Vec<String>>,

    /// Maps course code -> recommended (advisory) prerequisite codes
    pub recommended: HashMap<String, Vec<String>>,

    /// Maps course code -> codes of courses that block on it
    pub dependents: HashMap<String, Vec<String>>,

    /// All course codes, in catalog order
    pub courses: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

impl DAG {
    /// Create a new empty DAG
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for a catalog
    ///
    /// Prerequisite codes that do not name a catalog course are dropped, so
    /// the edge behaves as already satisfied. When two catalog entries share a
    /// code, the first one wins.
    #[must_use]
    pub fn from_courses(courses: &[Course]) -> Self {
        let mut dag = Self::new();
        let mut owners: Vec<&Course> = Vec::with_capacity(courses.len());

        for course in courses {
            if dag.contains_course(&course.code) {
                crate::warn!(
                    "Duplicate course code {} (id {}); keeping the first entry",
                    course.code,
                    course.id
                );
                continue;
            }
            dag.add_course(course.code.clone());
            owners.push(course);
        }

        for course in owners {
            for prereq in &course.prerequisites {
                if dag.contains_course(&prereq.course_id) {
                    dag.add_prerequisite(&course.code, &prereq.course_id, prereq.kind);
                } else {
                    crate::debug!(
                        "{}: prerequisite {} is not in the catalog; treating it as satisfied",
                        course.code,
                        prereq.course_id
                    );
                }
            }
        }

        dag
    }

    /// Add a course to the DAG
    ///
    /// # Arguments
    /// * `course_key` - The course code (e.g., "CS1800")
    pub fn add_course(&mut self, course_key: String) {
        if !self.dependencies.contains_key(&course_key) {
            self.courses.push(course_key.clone());
            self.dependencies.entry(course_key.clone()).or_default();
            self.corequisites.entry(course_key.clone()).or_default();
            self.recommended.entry(course_key.clone()).or_default();
            self.dependents.entry(course_key).or_default();
        }
    }

    /// Add a prerequisite relationship of the given kind
    ///
    /// # Arguments
    /// * `course_key` - Course that has the prerequisite
    /// * `prerequisite_key` - Course it points at
    /// * `kind` - Edge kind; only blocking kinds update `dependents`
    pub fn add_prerequisite(&mut self, course_key: &str, prerequisite_key: &str, kind: PrerequisiteKind) {
        self.add_course(course_key.to_string());
        self.add_course(prerequisite_key.to_string());

        let forward = match kind {
            PrerequisiteKind::Required => &mut self.dependencies,
            PrerequisiteKind::Concurrent => &mut self.corequisites,
            PrerequisiteKind::Recommended => &mut self.recommended,
        };
        if let Some(list) = forward.get_mut(course_key) {
            push_unique(list, prerequisite_key);
        }

        if kind.is_blocking() {
            if let Some(list) = self.dependents.get_mut(prerequisite_key) {
                push_unique(list, course_key);
            }
        }
    }

    /// Required prerequisites of a course
    #[must_use]
    pub fn get_prerequisites(&self, course_key: &str) -> &[String] {
        self.dependencies.get(course_key).map_or(&[], Vec::as_slice)
    }

    /// Concurrent prerequisites of a course
    #[must_use]
    pub fn get_corequisites(&self, course_key: &str) -> &[String] {
        self.corequisites.get(course_key).map_or(&[], Vec::as_slice)
    }

    /// Courses that block on `course_key` through a required or concurrent edge
    #[must_use]
    pub fn get_dependents(&self, course_key: &str) -> &[String] {
        self.dependents.get(course_key).map_or(&[], Vec::as_slice)
    }

    /// Required then concurrent prerequisites of a course
    pub fn blocking_prerequisites<'g>(&'g self, course_key: &str) -> impl Iterator<Item = &'g String> {
        self.get_prerequisites(course_key)
            .iter()
            .chain(self.get_corequisites(course_key))
    }

    /// Get the number of courses in the DAG
    #[must_use]
    pub const fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Check if a course exists in the DAG
    #[must_use]
    pub fn contains_course(&self, course_key: &str) -> bool {
        self.dependencies.contains_key(course_key)
    }

    /// Find one cycle over blocking edges using a white/gray/black DFS
    ///
    /// Roots are visited in catalog order and neighbors in insertion order, so
    /// the reported cycle is deterministic.
    ///
    /// # Returns
    /// The course codes on the cycle in prerequisite order, or `None`
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut colors: HashMap<&str, Color> = self
            .courses
            .iter()
            .map(|c| (c.as_str(), Color::White))
            .collect();
        let mut path: Vec<&str> = Vec::new();

        for root in &self.courses {
            if colors.get(root.as_str()) == Some(&Color::White) {
                if let Some(cycle) = self.visit(root, &mut colors, &mut path) {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn visit<'g>(
        &'g self,
        node: &'g str,
        colors: &mut HashMap<&'g str, Color>,
        path: &mut Vec<&'g str>,
    ) -> Option<Vec<String>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for next in self.blocking_prerequisites(node) {
            match colors.get(next.as_str()).copied().unwrap_or(Color::Black) {
                Color::Gray => {
                    let start = path.iter().position(|p| *p == next.as_str()).unwrap_or(0);
                    return Some(path[start..].iter().map(|p| (*p).to_string()).collect());
                }
                Color::White => {
                    if let Some(cycle) = self.visit(next, colors, path) {
                        return Some(cycle);
                    }
                }
                Color::Black => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Reject graphs with a blocking prerequisite cycle
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::CircularDependency`] naming the courses on the cycle.
    pub fn ensure_acyclic(&self) -> Result<(), PlanError> {
        match self.find_cycle() {
            Some(cycle) => Err(PlanError::CircularDependency {
                course: cycle.first().cloned().unwrap_or_default(),
                cycle,
            }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Display for DAG {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Prerequisite DAG ({} courses):", self.courses.len())?;
        writeln!(f)?;

        let mut sorted_courses = self.courses.clone();
        sorted_courses.sort();

        for course_key in sorted_courses {
            let mut parts: Vec<String> = self.get_prerequisites(&course_key).to_vec();
            parts.extend(
                self.get_corequisites(&course_key)
                    .iter()
                    .map(|c| format!("{c} (concurrent)")),
            );
            if let Some(advisory) = self.recommended.get(&course_key) {
                parts.extend(advisory.iter().map(|c| format!("{c} (recommended)")));
            }

            if parts.is_empty() {
                writeln!(f, "  {course_key} → (no prerequisites)")?;
            } else {
                writeln!(f, "  {course_key} → {}", parts.join(", "))?;
            }
        }

        Ok(())
    }
}
