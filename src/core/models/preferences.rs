//! Planning inputs supplied by the caller: preferences, constraints and settings

use super::course::Course;
use super::term::SlotId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default per-term credit cap
pub const DEFAULT_MAX_CREDITS: u16 = 18;

/// Default workload target per term
pub const DEFAULT_TARGET_CREDITS: f32 = 15.0;

/// Default allowed deviation above the workload target
pub const DEFAULT_TOLERANCE: f32 = 3.0;

/// Default first calendar year of a plan
pub const DEFAULT_START_YEAR: i32 = 2025;

/// Scoring toggles. Each flag gates one additive term of the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningPreferences {
    /// Weight the historical A-rate into the score
    pub prioritize_grades: bool,
    /// Run the workload balancing pass after placement
    pub balance_workload: bool,
    /// Boost courses that have required prerequisites
    pub include_requirements: bool,
}

const fn default_max_credits() -> u16 {
    DEFAULT_MAX_CREDITS
}

/// Hard constraints on the generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningConstraints {
    /// Maximum total credits in any single term
    #[serde(default = "default_max_credits")]
    pub max_credits_per_semester: u16,

    /// Course codes that must appear somewhere in the plan
    #[serde(default)]
    pub required_courses: Vec<String>,

    /// Course id (or code) -> allowed term names (e.g. "Fall") or slot ids
    /// (e.g. "junior-spring")
    #[serde(default)]
    pub preferred_terms: BTreeMap<String, Vec<String>>,
}

impl Default for PlanningConstraints {
    fn default() -> Self {
        Self {
            max_credits_per_semester: DEFAULT_MAX_CREDITS,
            required_courses: Vec::new(),
            preferred_terms: BTreeMap::new(),
        }
    }
}

impl PlanningConstraints {
    /// Credit cap as a float for comparisons against course credits
    #[must_use]
    pub fn max_credits(&self) -> f32 {
        f32::from(self.max_credits_per_semester)
    }

    /// Whether the caller's preferred terms allow `course` in `slot`
    ///
    /// Courses without an entry are unrestricted. Entries are looked up by
    /// course id first, then by code, and match either the term name or the
    /// full slot id, case-insensitively.
    #[must_use]
    pub fn allows_slot(&self, course: &Course, slot: SlotId) -> bool {
        let allowed = self
            .preferred_terms
            .get(&course.id)
            .or_else(|| self.preferred_terms.get(&course.code));

        let Some(allowed) = allowed else {
            return true;
        };

        let slot_id = slot.id();
        allowed.iter().any(|entry| {
            let entry = entry.trim();
            entry.eq_ignore_ascii_case(slot.term.as_str()) || entry.eq_ignore_ascii_case(&slot_id)
        })
    }

    /// Add a required course code (ignoring duplicates)
    pub fn require(&mut self, code: &str) {
        if !self.required_courses.iter().any(|c| c == code) {
            self.required_courses.push(code.to_string());
        }
    }
}

/// Engine settings that come from configuration rather than the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Identifier stamped on the generated plan
    pub plan_id: String,
    /// Owning user stamped on the generated plan
    pub user_id: String,
    /// Calendar year of the Freshman year
    pub start_year: i32,
    /// Workload target per term
    pub target_credits: f32,
    /// Allowed deviation above the target before rebalancing/warning
    pub tolerance: f32,
    /// Place courses only after their prerequisites (see `DESIGN.md`)
    pub enforce_prerequisite_order: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            plan_id: "plan".to_string(),
            user_id: "anonymous".to_string(),
            start_year: DEFAULT_START_YEAR,
            target_credits: DEFAULT_TARGET_CREDITS,
            tolerance: DEFAULT_TOLERANCE,
            enforce_prerequisite_order: true,
        }
    }
}
