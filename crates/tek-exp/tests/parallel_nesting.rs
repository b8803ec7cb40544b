use tek_core::{Assignment, AxisValue};
use tek_exp::{AxisSet, Sweep};

#[test]
fn parallel_axes_pair_positionally() {
    let axes = AxisSet::new()
        .with_axis("alpha", ["0.70", "0.75"])
        .and_then(|set| set.with_axis("beta", [6, 12]))
        .expect("axes");
    let emitted: Vec<_> = Sweep::parallel(axes).expect("equal lengths").iter().collect();
    assert_eq!(
        emitted,
        vec![
            Assignment::new().with("alpha", "0.70").with("beta", 6),
            Assignment::new().with("alpha", "0.75").with("beta", 12),
        ]
    );
}

#[test]
fn mismatched_lengths_fail_before_iteration() {
    let axes = AxisSet::new()
        .with_axis("alpha", ["0.70", "0.75", "0.80"])
        .and_then(|set| set.with_axis("beta", [6, 12]))
        .expect("axes");
    let err = Sweep::parallel(axes).expect_err("length mismatch");
    let info = err.info();
    assert_eq!(info.code, "parallel-length-mismatch");
    assert_eq!(info.context.get("alpha").map(String::as_str), Some("3"));
    assert_eq!(info.context.get("beta").map(String::as_str), Some("2"));
}

#[test]
fn nested_sweep_is_outer_major() {
    let outer = AxisSet::new()
        .with_axis("alpha", ["0.70", "0.75"])
        .and_then(|set| set.with_axis("beta", [6, 12]))
        .expect("outer");
    let inner = AxisSet::new()
        .with_axis("xi", ["1e-5", "1e-4", "1e-3"])
        .expect("inner");
    let sweep = Sweep::parallel(outer)
        .and_then(|s| s.nest(Sweep::crossing(inner)))
        .expect("nest");
    let emitted: Vec<_> = sweep.iter().collect();
    assert_eq!(emitted.len(), 6);
    assert_eq!(emitted[0].get("alpha"), Some(&AxisValue::from("0.70")));
    assert_eq!(emitted[2].get("xi"), Some(&AxisValue::from("1e-3")));
    assert_eq!(emitted[3].get("beta"), Some(&AxisValue::Int(12)));
    let keys: Vec<_> = emitted[0].keys().collect();
    assert_eq!(keys, vec!["alpha", "beta", "xi"]);
}

#[test]
fn inner_values_take_precedence_on_conflict() {
    let outer = AxisSet::new().with_axis("n", ["1000"]).expect("outer");
    let inner = AxisSet::new().with_axis("n", ["500"]).expect("inner");
    let sweep = Sweep::crossing(outer)
        .nest(Sweep::crossing(inner))
        .expect("nest");
    let emitted: Vec<_> = sweep.iter().collect();
    assert_eq!(emitted, vec![Assignment::new().with("n", "500")]);
}

#[test]
fn one_shot_sweeps_yield_once_and_refuse_to_nest() {
    let source = vec![Assignment::new().with("n", "1")].into_iter();
    let sweep = Sweep::one_shot(source);
    assert!(!sweep.is_restartable());
    assert_eq!(sweep.iter().count(), 1);
    assert_eq!(sweep.iter().count(), 0);

    let outer = Sweep::listed(vec![Assignment::new()]);
    let err = outer
        .nest(Sweep::one_shot(std::iter::empty()))
        .expect_err("one-shot inner");
    assert_eq!(err.info().code, "one-shot-inner");
}
