use std::fmt;
use std::sync::{Arc, Mutex};

use tek_core::errors::{ErrorInfo, TekError};
use tek_core::Assignment;
use tracing::{debug, warn};

use crate::axes::AxisSet;

/// Boxed lazy stream of parameter assignments.
pub type Assignments = Box<dyn Iterator<Item = Assignment> + Send>;

type Predicate = dyn Fn(&Assignment) -> bool + Send + Sync;

/// Named predicate applied to raw assignments before they are yielded.
#[derive(Clone)]
pub struct Filter {
    name: String,
    predicate: Arc<Predicate>,
}

impl Filter {
    /// Wraps an arbitrary predicate. Assignments returning `false` are dropped.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Assignment) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Accepts an assignment only when `first` and `second` are both the
    /// sentinel or both something else. Missing axes count as non-sentinel.
    pub fn paired_sentinel(
        first: impl Into<String>,
        second: impl Into<String>,
        sentinel: impl Into<String>,
    ) -> Self {
        let first = first.into();
        let second = second.into();
        let sentinel = sentinel.into();
        let name = format!("paired-sentinel({first},{second}={sentinel})");
        Self::new(name, move |assignment| {
            let is_sentinel = |axis: &str| {
                assignment
                    .get(axis)
                    .map_or(false, |value| *value == *sentinel.as_str())
            };
            is_sentinel(&first) == is_sentinel(&second)
        })
    }

    /// Human readable filter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluates the predicate.
    pub fn accepts(&self, assignment: &Assignment) -> bool {
        (self.predicate)(assignment)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("name", &self.name).finish()
    }
}

#[derive(Clone)]
enum Node {
    Crossing(Arc<AxisSet>),
    Parallel(Arc<AxisSet>),
    Listed(Arc<[Assignment]>),
    Nested(Box<Sweep>, Box<Sweep>),
    Filtered(Box<Sweep>, Filter),
    OneShot(Arc<Mutex<Option<Assignments>>>),
}

/// Composable, lazy generator of parameter assignments.
///
/// Every node except [`Sweep::one_shot`] is restartable: each call to
/// [`Sweep::iter`] starts a fresh pass producing the same sequence.
#[derive(Clone)]
pub struct Sweep {
    node: Node,
}

impl Sweep {
    /// Full cartesian product of `axes`.
    pub fn crossing(axes: AxisSet) -> Self {
        Self {
            node: Node::Crossing(Arc::new(axes)),
        }
    }

    /// Positional zip of `axes`; fails when axis lengths differ.
    pub fn parallel(axes: AxisSet) -> Result<Self, TekError> {
        axes.check_parallel()?;
        Ok(Self {
            node: Node::Parallel(Arc::new(axes)),
        })
    }

    /// Literal list of assignments, yielded as given.
    pub fn listed(assignments: Vec<Assignment>) -> Self {
        Self {
            node: Node::Listed(assignments.into()),
        }
    }

    /// Wraps a non-restartable source. Only the first pass yields anything.
    pub fn one_shot<I>(source: I) -> Self
    where
        I: Iterator<Item = Assignment> + Send + 'static,
    {
        Self {
            node: Node::OneShot(Arc::new(Mutex::new(Some(Box::new(source))))),
        }
    }

    /// For every outer assignment, re-runs `inner` and merges each result
    /// into the outer one.
    pub fn nest(self, inner: Sweep) -> Result<Self, TekError> {
        if !inner.is_restartable() {
            return Err(TekError::Config(
                ErrorInfo::new("one-shot-inner", "an inner sweep is re-run per outer value")
                    .with_hint("nest a restartable sweep or make the one-shot source outermost"),
            ));
        }
        Ok(Self {
            node: Node::Nested(Box::new(self), Box::new(inner)),
        })
    }

    /// Drops assignments rejected by `filter`.
    pub fn filtered(self, filter: Filter) -> Self {
        Self {
            node: Node::Filtered(Box::new(self), filter),
        }
    }

    /// True unless a one-shot source sits anywhere in the tree.
    pub fn is_restartable(&self) -> bool {
        match &self.node {
            Node::Crossing(_) | Node::Parallel(_) | Node::Listed(_) => true,
            Node::Nested(outer, inner) => outer.is_restartable() && inner.is_restartable(),
            Node::Filtered(base, _) => base.is_restartable(),
            Node::OneShot(_) => false,
        }
    }

    /// Starts a pass over the sweep.
    pub fn iter(&self) -> Assignments {
        match &self.node {
            Node::Crossing(axes) => Box::new(Arc::clone(axes).crossing()),
            Node::Parallel(axes) => Box::new(Arc::clone(axes).parallel()),
            Node::Listed(items) => {
                let items = Arc::clone(items);
                Box::new((0..items.len()).map(move |idx| items[idx].clone()))
            }
            Node::Nested(outer, inner) => Box::new(NestedIter {
                outer: outer.iter(),
                inner: (**inner).clone(),
                current: None,
            }),
            Node::Filtered(base, filter) => {
                let filter = filter.clone();
                Box::new(base.iter().filter(move |assignment| {
                    let keep = filter.accepts(assignment);
                    if !keep {
                        debug!(filter = filter.name(), ?assignment, "assignment filtered out");
                    }
                    keep
                }))
            }
            Node::OneShot(source) => {
                let mut slot = source.lock().unwrap_or_else(|poisoned| {
                    warn!("one-shot source lock poisoned by a panicking pass, recovering");
                    poisoned.into_inner()
                });
                match slot.take() {
                    Some(pass) => pass,
                    None => {
                        debug!("one-shot sweep already consumed");
                        Box::new(std::iter::empty())
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Crossing(axes) => f.debug_tuple("Crossing").field(axes).finish(),
            Node::Parallel(axes) => f.debug_tuple("Parallel").field(axes).finish(),
            Node::Listed(items) => f.debug_tuple("Listed").field(&items.len()).finish(),
            Node::Nested(outer, inner) => {
                f.debug_tuple("Nested").field(outer).field(inner).finish()
            }
            Node::Filtered(base, filter) => {
                f.debug_tuple("Filtered").field(base).field(filter).finish()
            }
            Node::OneShot(_) => f.write_str("OneShot"),
        }
    }
}

struct NestedIter {
    outer: Assignments,
    inner: Sweep,
    current: Option<(Assignment, Assignments)>,
}

impl Iterator for NestedIter {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        loop {
            if let Some((outer, inner)) = self.current.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(outer.merged(&item));
                }
            }
            let outer = self.outer.next()?;
            self.current = Some((outer, self.inner.iter()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisoned_one_shot_still_yields_its_single_pass() {
        let sweep = Sweep::one_shot((0..3).map(|n| Assignment::new().with("n", n)));
        let Node::OneShot(source) = &sweep.node else {
            panic!("expected a one-shot node");
        };
        let shared = Arc::clone(source);
        let poisoner = std::thread::spawn(move || {
            let _guard = shared.lock().expect("first lock");
            panic!("poison the source lock");
        });
        assert!(poisoner.join().is_err());
        assert!(source.is_poisoned());

        assert_eq!(sweep.iter().count(), 3);
        assert_eq!(sweep.iter().count(), 0);
    }
}
