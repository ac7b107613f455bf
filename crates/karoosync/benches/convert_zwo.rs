use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Write as _;
use std::hint::black_box;

fn sample_document(steps: usize) -> String {
    let mut doc = String::from("<workout_file><name>Over-unders</name><workout>");
    for i in 0..steps {
        let power = if i % 2 == 0 { "0.95" } else { "1.05" };
        let _ = write!(doc, r#"<SteadyState Duration="120" Power="{power}" Cadence="90"/>"#);
    }
    doc.push_str("</workout></workout_file>");
    doc
}

fn bench_convert(c: &mut Criterion) {
    let doc = sample_document(200);
    c.bench_function("convert_zwo_200_steps", |b| {
        b.iter(|| karoosync::convert(black_box(&doc), "2024-03-01").expect("convert"))
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
