#![cfg(unix)]

use tek_exp::JobSpec;
use tek_launch::{JobOutcome, JobRunner, ProcessRunner};

fn job(program: &str, label: &str) -> JobSpec {
    JobSpec {
        index: 0,
        args: vec![program.to_string(), format!("--outdir={label}")],
        label: label.to_string(),
    }
}

#[test]
fn process_runner_reports_exit_status() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let ok = ProcessRunner.run(&job("true", "ok_000"), dir.path()).expect("spawn true");
    assert_eq!(ok, JobOutcome::Succeeded);
    assert!(dir.path().join("ok_000").join("stdout.txt").exists());

    let failed = ProcessRunner.run(&job("false", "bad_001"), dir.path()).expect("spawn false");
    assert_eq!(failed, JobOutcome::Failed { code: Some(1) });
}

#[test]
fn missing_program_is_a_launch_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let err = ProcessRunner
        .run(&job("tek-definitely-not-installed", "x_000"), dir.path())
        .expect_err("spawn");
    assert_eq!(err.info().code, "spawn");
}
