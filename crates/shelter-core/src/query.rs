//! Query predicate vocabulary for the record store
//!
//! A [`Query`] is a conjunction of per-field constraints: equality,
//! string set-membership, and numeric ranges. Range bounds added
//! separately for the same field merge into one constraint, so a later
//! bound can never silently shadow an earlier one.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::record::Document;

/// A single field constraint
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Exact equality with a JSON value
    Eq(Value),
    /// String set membership
    In(Vec<String>),
    /// Numeric range; either bound may be open
    Range { min: Option<f64>, max: Option<f64> },
}

impl Constraint {
    fn matches(&self, value: Option<&Value>) -> bool {
        match self {
            Constraint::Eq(expected) => value.map(|v| value_eq(v, expected)).unwrap_or(false),
            Constraint::In(members) => value
                .and_then(Value::as_str)
                .map(|s| members.iter().any(|m| m == s))
                .unwrap_or(false),
            Constraint::Range { min, max } => value
                .and_then(Value::as_f64)
                .map(|n| min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi))
                .unwrap_or(false),
        }
    }
}

/// JSON equality with numeric values compared as f64
fn value_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Conjunction of field constraints; the empty query matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    constraints: IndexMap<String, Constraint>,
}

impl Query {
    /// Create an empty (match-all) query
    pub fn new() -> Self {
        Self::default()
    }

    /// Require exact equality on a field
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field.into(), Constraint::Eq(value.into()));
        self
    }

    /// Require the field value to be one of the given strings
    pub fn within<I, S>(mut self, field: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = members.into_iter().map(Into::into).collect();
        self.insert(field.into(), Constraint::In(members));
        self
    }

    /// Require the field value to be at least `bound`
    pub fn gte(self, field: impl Into<String>, bound: f64) -> Self {
        self.bound(field.into(), Some(bound), None)
    }

    /// Require the field value to be at most `bound`
    pub fn lte(self, field: impl Into<String>, bound: f64) -> Self {
        self.bound(field.into(), None, Some(bound))
    }

    /// Merge a range bound into the field's constraint
    fn bound(mut self, field: String, min: Option<f64>, max: Option<f64>) -> Self {
        let merged = match self.constraints.get_mut(&field) {
            Some(Constraint::Range { min: lo, max: hi }) => {
                // Bounds merge: both ends of the range are enforced
                if min.is_some() {
                    *lo = min;
                }
                if max.is_some() {
                    *hi = max;
                }
                true
            }
            _ => false,
        };

        if !merged {
            if self.constraints.contains_key(&field) {
                warn!(%field, "replacing non-range constraint with a range bound");
            }
            self.constraints.insert(field, Constraint::Range { min, max });
        }
        self
    }

    fn insert(&mut self, field: String, constraint: Constraint) {
        if self.constraints.insert(field.clone(), constraint).is_some() {
            warn!(%field, "replacing an existing constraint");
        }
    }

    /// Whether this query matches every document
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Number of constrained fields
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// The constraint on a field, if any
    pub fn constraint(&self, field: &str) -> Option<&Constraint> {
        self.constraints.get(field)
    }

    /// Evaluate the query against a document
    pub fn matches(&self, document: &Document) -> bool {
        self.constraints
            .iter()
            .all(|(field, constraint)| constraint.matches(document.get(field)))
    }
}

/// Set-style field assignments applied by update operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    assignments: IndexMap<String, Value>,
}

impl UpdateSpec {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `field` on every matched document
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.insert(field.into(), value.into());
        self
    }

    /// Whether this update assigns nothing
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Apply the assignments, returning whether the document changed
    pub fn apply(&self, document: &mut Document) -> bool {
        let mut changed = false;
        for (field, value) in &self.assignments {
            if document.get(field) != Some(value) {
                document.insert(field.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }
}
