use std::collections::BTreeSet;

use proptest::prelude::*;
use tek_core::Assignment;
use tek_exp::{AxisSet, Sweep};

fn pair(a: &str, b: &str) -> Assignment {
    Assignment::new().with("A", a).with("B", b)
}

#[test]
fn last_declared_axis_varies_fastest() {
    let axes = AxisSet::new()
        .with_axis("A", ["a1", "a2"])
        .and_then(|set| set.with_axis("B", ["b1", "b2"]))
        .expect("axes");
    let emitted: Vec<_> = Sweep::crossing(axes).iter().collect();
    assert_eq!(
        emitted,
        vec![
            pair("a1", "b1"),
            pair("a1", "b2"),
            pair("a2", "b1"),
            pair("a2", "b2"),
        ]
    );
}

#[test]
fn crossing_restarts_with_identical_sequence() {
    let axes = AxisSet::new()
        .with_axis("xi", ["1e-5", "1e-4"])
        .and_then(|set| set.with_axis("nu", ["0", "1e-6", "1e-4"]))
        .expect("axes");
    let sweep = Sweep::crossing(axes);
    let first: Vec<_> = sweep.iter().collect();
    let second: Vec<_> = sweep.iter().collect();
    assert_eq!(first, second);
    assert!(sweep.is_restartable());
}

#[test]
fn empty_axis_and_duplicate_axis_are_rejected() {
    let empty: Vec<&str> = Vec::new();
    let err = AxisSet::new().with_axis("n", empty).expect_err("empty");
    assert_eq!(err.info().code, "empty-axis");

    let err = AxisSet::new()
        .with_axis("n", ["1"])
        .and_then(|set| set.with_axis("n", ["2"]))
        .expect_err("duplicate");
    assert_eq!(err.info().code, "duplicate-axis");
}

proptest! {
    #[test]
    fn product_size_and_distinctness(lengths in prop::collection::vec(1usize..5, 0..4)) {
        let mut axes = AxisSet::new();
        for (axis, len) in lengths.iter().enumerate() {
            let values: Vec<String> = (0..*len).map(|v| format!("v{v}")).collect();
            axes = axes.with_axis(format!("axis{axis}"), values).unwrap();
        }
        let expected: usize = lengths.iter().product();
        let emitted: Vec<_> = Sweep::crossing(axes).iter().collect();
        prop_assert_eq!(emitted.len(), expected);
        let distinct: BTreeSet<String> = emitted.iter().map(|a| format!("{a:?}")).collect();
        prop_assert_eq!(distinct.len(), expected);
    }
}
