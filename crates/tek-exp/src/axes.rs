use std::sync::Arc;

use indexmap::IndexMap;
use tek_core::errors::{ErrorInfo, TekError};
use tek_core::{Assignment, AxisValue};

/// Ordered mapping from axis name to its candidate values.
///
/// Declaration order matters: the last axis varies fastest when crossed and
/// positions line up across axes when zipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSet {
    axes: IndexMap<String, Vec<AxisValue>>,
}

impl AxisSet {
    /// Creates an empty axis set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an axis. Empty candidate lists and repeated names are rejected.
    pub fn with_axis<I, V>(mut self, name: impl Into<String>, values: I) -> Result<Self, TekError>
    where
        I: IntoIterator<Item = V>,
        V: Into<AxisValue>,
    {
        let name = name.into();
        let values: Vec<AxisValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(TekError::Config(
                ErrorInfo::new("empty-axis", "axis has no candidate values")
                    .with_context("axis", name),
            ));
        }
        if self.axes.contains_key(&name) {
            return Err(TekError::Config(
                ErrorInfo::new("duplicate-axis", "axis declared twice in one set")
                    .with_context("axis", name),
            ));
        }
        self.axes.insert(name, values);
        Ok(self)
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.axes.len()
    }

    /// True when the set declares no axes.
    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Axis names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.axes.keys().map(String::as_str)
    }

    /// Candidates declared for `name`.
    pub fn values(&self, name: &str) -> Option<&[AxisValue]> {
        self.axes.get(name).map(Vec::as_slice)
    }

    /// Size of the cartesian product (1 for an empty set).
    pub fn cardinality(&self) -> usize {
        self.axes.values().map(Vec::len).product()
    }

    /// Verifies every axis has the same length and returns it.
    pub fn check_parallel(&self) -> Result<usize, TekError> {
        let Some(expected) = self.axes.values().next().map(Vec::len) else {
            return Ok(0);
        };
        if self.axes.values().all(|values| values.len() == expected) {
            return Ok(expected);
        }
        let mut info = ErrorInfo::new(
            "parallel-length-mismatch",
            "parallel axes must have equal lengths",
        );
        for (name, values) in &self.axes {
            info = info.with_context(name.clone(), values.len().to_string());
        }
        Err(TekError::Config(info))
    }

    /// Lazy cartesian product, last axis fastest.
    pub fn crossing(self: Arc<Self>) -> Crossing {
        let remaining = self.cardinality();
        Crossing {
            cursor: vec![0; self.axes.len()],
            axes: self,
            remaining,
        }
    }

    /// Lazy positional zip. Call [`AxisSet::check_parallel`] first.
    pub fn parallel(self: Arc<Self>) -> Parallel {
        let len = self.axes.values().map(Vec::len).min().unwrap_or(0);
        Parallel {
            axes: self,
            position: 0,
            len,
        }
    }

    fn assignment_at(&self, cursor: &[usize]) -> Assignment {
        self.axes
            .iter()
            .zip(cursor)
            .map(|((name, values), &idx)| (name.clone(), values[idx].clone()))
            .collect()
    }
}

/// Odometer iterator over an [`AxisSet`].
#[derive(Debug, Clone)]
pub struct Crossing {
    axes: Arc<AxisSet>,
    cursor: Vec<usize>,
    remaining: usize,
}

impl Iterator for Crossing {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.axes.assignment_at(&self.cursor);
        self.remaining -= 1;
        for (slot, values) in self.cursor.iter_mut().zip(self.axes.axes.values()).rev() {
            *slot += 1;
            if *slot < values.len() {
                break;
            }
            *slot = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Crossing {}

/// Zip iterator over an [`AxisSet`] of equal-length axes.
#[derive(Debug, Clone)]
pub struct Parallel {
    axes: Arc<AxisSet>,
    position: usize,
    len: usize,
}

impl Iterator for Parallel {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.position >= self.len {
            return None;
        }
        let cursor = vec![self.position; self.axes.len()];
        self.position += 1;
        Some(self.axes.assignment_at(&cursor))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len - self.position;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Parallel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_crosses_to_single_empty_assignment() {
        let items: Vec<_> = Arc::new(AxisSet::new()).crossing().collect();
        assert_eq!(items, vec![Assignment::new()]);
    }

    #[test]
    fn empty_parallel_set_yields_nothing() {
        let set = Arc::new(AxisSet::new());
        assert_eq!(set.check_parallel().expect("empty is consistent"), 0);
        assert_eq!(set.parallel().count(), 0);
    }

    #[test]
    fn crossing_size_hint_is_exact() {
        let set = AxisSet::new()
            .with_axis("a", ["1", "2", "3"])
            .and_then(|s| s.with_axis("b", ["x", "y"]))
            .expect("axes");
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.values("b").map(<[AxisValue]>::len), Some(2));
        assert_eq!(set.cardinality(), 6);
        let mut iter = Arc::new(set).crossing();
        assert_eq!(iter.len(), 6);
        iter.next();
        assert_eq!(iter.len(), 5);
    }
}
