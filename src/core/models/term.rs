//! Terms, academic years and the twelve canonical plan slots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of academic years in a plan
pub const YEARS_PER_PLAN: usize = 4;

/// Number of terms in each academic year
pub const TERMS_PER_YEAR: usize = 3;

/// Total number of placement slots in a plan
pub const SLOT_COUNT: usize = YEARS_PER_PLAN * TERMS_PER_YEAR;

/// A term within an academic year, in chronological order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Fall term (first in the academic year)
    #[serde(alias = "fall", alias = "FALL")]
    Fall,
    /// Spring term
    #[serde(alias = "spring", alias = "SPRING")]
    Spring,
    /// Summer term (last in the academic year)
    #[serde(alias = "summer", alias = "SUMMER")]
    Summer,
}

impl Term {
    /// All terms in chronological order
    pub const ALL: [Self; TERMS_PER_YEAR] = [Self::Fall, Self::Spring, Self::Summer];

    /// Display name (e.g., "Fall")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
        }
    }

    /// Lowercase name used inside slot ids (e.g., "fall")
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Fall => "fall",
            Self::Spring => "spring",
            Self::Summer => "summer",
        }
    }

    /// Position within the academic year (Fall = 0)
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Fall => 0,
            Self::Spring => 1,
            Self::Summer => 2,
        }
    }

    /// Case-insensitive lookup by name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|term| term.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class-year label of an academic year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum YearName {
    /// First year
    Freshman,
    /// Second year
    Sophomore,
    /// Third year
    Junior,
    /// Fourth year
    Senior,
}

impl YearName {
    /// All years in order
    pub const ALL: [Self; YEARS_PER_PLAN] =
        [Self::Freshman, Self::Sophomore, Self::Junior, Self::Senior];

    /// Display name (e.g., "Freshman")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Freshman => "Freshman",
            Self::Sophomore => "Sophomore",
            Self::Junior => "Junior",
            Self::Senior => "Senior",
        }
    }

    /// Lowercase name used in ids (e.g., "freshman")
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Freshman => "freshman",
            Self::Sophomore => "sophomore",
            Self::Junior => "junior",
            Self::Senior => "senior",
        }
    }

    /// Zero-based year offset from the plan start
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Freshman => 0,
            Self::Sophomore => 1,
            Self::Junior => 2,
            Self::Senior => 3,
        }
    }
}

impl fmt::Display for YearName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the twelve (year, term) placement slots
///
/// Ordering is chronological: year first, then Fall < Spring < Summer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId {
    /// Academic year of the slot
    pub year: YearName,
    /// Term within the year
    pub term: Term,
}

impl SlotId {
    /// Create a slot id
    #[must_use]
    pub const fn new(year: YearName, term: Term) -> Self {
        Self { year, term }
    }

    /// All slots in canonical chronological order
    #[must_use]
    pub fn all() -> Vec<Self> {
        YearName::ALL
            .into_iter()
            .flat_map(|year| Term::ALL.into_iter().map(move |term| Self::new(year, term)))
            .collect()
    }

    /// Slot at a canonical position (0..`SLOT_COUNT`)
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        let year = *YearName::ALL.get(index / TERMS_PER_YEAR)?;
        let term = Term::ALL[index % TERMS_PER_YEAR];
        Some(Self::new(year, term))
    }

    /// Canonical position of this slot (Freshman Fall = 0)
    #[must_use]
    pub const fn index(self) -> usize {
        self.year.index() * TERMS_PER_YEAR + self.term.index()
    }

    /// Composite id, e.g. `freshman-fall`
    #[must_use]
    pub fn id(self) -> String {
        format!("{}-{}", self.year.slug(), self.term.slug())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year.slug(), self.term.slug())
    }
}
