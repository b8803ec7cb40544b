use tek_core::Assignment;
use tek_exp::{AxisSet, Filter, Sweep};

#[test]
fn paired_sentinel_keeps_five_of_nine() {
    let axes = AxisSet::new()
        .with_axis("lower", ["6", "9", "300"])
        .and_then(|set| set.with_axis("upper", ["18", "24", "300"]))
        .expect("axes");
    let sweep = Sweep::crossing(axes).filtered(Filter::paired_sentinel("lower", "upper", "300"));
    let accepted: Vec<_> = sweep.iter().collect();
    let expect = |lower: &str, upper: &str| Assignment::new().with("lower", lower).with("upper", upper);
    assert_eq!(
        accepted,
        vec![
            expect("6", "18"),
            expect("6", "24"),
            expect("9", "18"),
            expect("9", "24"),
            expect("300", "300"),
        ]
    );
}

#[test]
fn custom_predicates_compose() {
    let axes = AxisSet::new()
        .with_axis("n", [1, 2, 3, 4])
        .expect("axes");
    let not_two = Filter::new("not-two", |a: &Assignment| a.get("n").map_or(true, |v| *v != *"2"));
    let not_four = Filter::new("not-four", |a: &Assignment| a.get("n").map_or(true, |v| *v != *"4"));
    let sweep = Sweep::crossing(axes).filtered(not_two).filtered(not_four);
    assert_eq!(sweep.iter().count(), 2);
    assert_eq!(format!("{:?}", Filter::paired_sentinel("a", "b", "x")), "Filter { name: \"paired-sentinel(a,b=x)\" }");
}
