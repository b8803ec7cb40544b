use criterion::{criterion_group, criterion_main, Criterion};
use tek_exp::{JobPrefix, JobSequencer, Registry, RunStamp};

fn bench_sequence(c: &mut Criterion) {
    let registry = Registry::builtin();
    let preset = registry.get("te1fig2s").expect("preset");
    c.bench_function("sequence_throughput", |b| {
        b.iter(|| {
            let sweep = preset.sweep().expect("sweep");
            let sequencer = JobSequencer::new(
                sweep,
                JobPrefix::new(preset.program.clone()),
                3,
                10,
                RunStamp::fixed("20240101_000000"),
            )
            .expect("sequencer");
            sequencer.jobs().count()
        });
    });
}

criterion_group!(benches, bench_sequence);
criterion_main!(benches);
