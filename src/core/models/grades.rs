//! Historical grade distributions
//!
//! Catalogs deliver distributions either as a JSON object
//! (`{"A": "41.2", "B": 30.5, ...}`) or as that same object encoded into a
//! string. Both shapes are parsed once at deserialization; anything that does
//! not parse becomes [`GradeDistribution::Unknown`] instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Buckets counted towards the A-rate
const A_BUCKETS: [&str; 3] = ["A+", "A", "A-"];

/// Percentage of historically enrolled students per letter-grade bucket
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum GradeDistribution {
    /// Parsed distribution: bucket (e.g. "A-") -> percent (0-100)
    Known(BTreeMap<String, f64>),
    /// Missing or malformed data
    #[default]
    Unknown,
}

impl GradeDistribution {
    /// Build a known distribution from `(bucket, percent)` pairs
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self::Known(
            pairs
                .iter()
                .map(|(bucket, pct)| ((*bucket).to_string(), *pct))
                .collect(),
        )
    }

    /// Percentage of students who earned an A-range grade; `0.0` when unknown
    #[must_use]
    pub fn a_rate(&self) -> f64 {
        match self {
            Self::Known(buckets) => {
                let rate: f64 = buckets
                    .iter()
                    .filter(|(bucket, _)| A_BUCKETS.contains(&bucket.trim().to_ascii_uppercase().as_str()))
                    .map(|(_, pct)| *pct)
                    .sum();
                if rate.is_finite() {
                    rate
                } else {
                    0.0
                }
            }
            Self::Unknown => 0.0,
        }
    }

    /// Whether the distribution parsed successfully
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let mut buckets = BTreeMap::new();
        for (bucket, value) in map {
            let Some(pct) = parse_percent(value) else {
                return Self::Unknown;
            };
            buckets.insert(bucket.clone(), pct);
        }
        Self::Known(buckets)
    }
}

/// Accepts numbers and decimal strings such as `"41.2"` or `"41.2%"`.
fn parse_percent(value: &Value) -> Option<f64> {
    let pct = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    pct.is_finite().then_some(pct)
}

impl From<Value> for GradeDistribution {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(&map),
            Value::String(encoded) => match serde_json::from_str::<Value>(&encoded) {
                Ok(Value::Object(map)) => Self::from_object(&map),
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }
}

impl From<GradeDistribution> for Value {
    fn from(distribution: GradeDistribution) -> Self {
        match distribution {
            GradeDistribution::Known(buckets) => Self::Object(
                buckets
                    .into_iter()
                    .map(|(bucket, pct)| {
                        let number = serde_json::Number::from_f64(pct).map_or(Self::Null, Self::Number);
                        (bucket, number)
                    })
                    .collect(),
            ),
            GradeDistribution::Unknown => Self::Null,
        }
    }
}
