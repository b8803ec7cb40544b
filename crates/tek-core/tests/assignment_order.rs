use tek_core::{Assignment, AxisValue, SweepDescriptor};

#[test]
fn assignment_preserves_insertion_order() {
    let assignment = Assignment::new()
        .with("xi", "1e-4")
        .with("n", "1000")
        .with("alpha", 0.5);
    let keys: Vec<_> = assignment.keys().collect();
    assert_eq!(keys, vec!["xi", "n", "alpha"]);
}

#[test]
fn merged_keeps_outer_order_and_inner_wins() {
    let outer = Assignment::new().with("alpha", "0.70").with("beta", 6);
    let inner = Assignment::new().with("xi", "1e-5").with("beta", 12);
    let merged = outer.merged(&inner);
    let keys: Vec<_> = merged.keys().collect();
    assert_eq!(keys, vec!["alpha", "beta", "xi"]);
    assert_eq!(merged.get("beta"), Some(&AxisValue::Int(12)));
}

#[test]
fn text_values_render_verbatim() {
    assert_eq!(AxisValue::from("10e-4").to_string(), "10e-4");
    assert_eq!(AxisValue::from(48).to_string(), "48");
    assert!(AxisValue::from(300) == *"300");
    assert!(AxisValue::from("300") == *"300");
}

#[test]
fn axis_values_load_untagged() {
    let values: Vec<AxisValue> = serde_json::from_str(r#"[6, 0.5, "1e-3"]"#).expect("json");
    assert_eq!(
        values,
        vec![AxisValue::Int(6), AxisValue::Float(0.5), AxisValue::from("1e-3")]
    );
}

#[test]
fn descriptor_defaults() {
    let descriptor = SweepDescriptor::default();
    assert_eq!(descriptor.repeat, 1);
    assert_eq!(descriptor.skip, 0);
    assert!(!descriptor.dry_run);
    assert_eq!(descriptor.outdir, std::path::PathBuf::from(".stdout"));
}
