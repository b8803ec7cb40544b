use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::AxisValue;

/// One concrete value per axis, in axis declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    values: IndexMap<String, AxisValue>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`. Existing keys keep their position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AxisValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder form of [`Assignment::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AxisValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&AxisValue> {
        self.values.get(name)
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AxisValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Axis names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of bound axes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no axis is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Key union of `self` followed by `inner`; `inner` wins on conflicts.
    pub fn merged(&self, inner: &Assignment) -> Assignment {
        let mut values = self.values.clone();
        for (name, value) in &inner.values {
            values.insert(name.clone(), value.clone());
        }
        Assignment { values }
    }
}

impl<K, V> FromIterator<(K, V)> for Assignment
where
    K: Into<String>,
    V: Into<AxisValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut assignment = Assignment::new();
        for (name, value) in iter {
            assignment.insert(name, value);
        }
        assignment
    }
}
