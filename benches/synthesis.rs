//! Benchmarks for pattern series synthesis.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use patsynth::prelude::*;

/// Catalog with `n` patterns cycling through every synthesis path
fn generate_catalog(n: usize) -> Vec<PatternRecord> {
  const SLUGS: &[&str] = &[
    "bullish-engulfing",
    "head-and-shoulders",
    "morning-star",
    "rounding-bottom",
    "mystery-formation",
    "ascending-triangle",
  ];

  (0..n)
    .map(|i| PatternRecord {
      slug: format!("{}-{}", SLUGS[i % SLUGS.len()], i),
      name: format!("Pattern {i}"),
      bias: Bias::Neutral,
      examples: vec![PatternExample::default(); 3],
    })
    .collect()
}

fn bench_shape(c: &mut Criterion) {
  let engine = SynthesizerBuilder::new().build().unwrap();
  let request = engine.request("head-and-shoulders", Bias::Bearish, 0);

  c.bench_function("synthesize_shape_30", |b| {
    b.iter(|| {
      let _ = black_box(engine.synthesize(black_box(&request)));
    })
  });
}

fn bench_recipe(c: &mut Criterion) {
  let engine = SynthesizerBuilder::new().build().unwrap();
  let request = engine.request("evening-star", Bias::Bearish, 0);

  c.bench_function("synthesize_recipe_30", |b| {
    b.iter(|| {
      let _ = black_box(engine.synthesize(black_box(&request)));
    })
  });
}

fn bench_plan(c: &mut Criterion) {
  let engine = SynthesizerBuilder::new().build().unwrap();

  c.bench_function("plan_unmatched_slug", |b| {
    b.iter(|| {
      let _ = black_box(engine.plan(black_box("some-unknown-pattern-name")));
    })
  });
}

fn bench_scaling(c: &mut Criterion) {
  let engine = SynthesizerBuilder::new().build().unwrap();

  let mut group = c.benchmark_group("scaling");

  for size in [30, 100, 500, 1000, 5000].iter() {
    let request = engine
      .request("double-bottom", Bias::Bullish, 0)
      .with_length(Length::new(*size).unwrap());

    group.bench_with_input(BenchmarkId::new("shape", size), size, |b, _| {
      b.iter(|| {
        let _ = black_box(engine.synthesize(black_box(&request)));
      })
    });
  }

  group.finish();
}

fn bench_catalog(c: &mut Criterion) {
  let engine = SynthesizerBuilder::new().build().unwrap();
  let records = generate_catalog(100);

  c.bench_function("synthesize_catalog_300_charts", |b| {
    b.iter(|| {
      let _ = black_box(synthesize_catalog(black_box(&engine), black_box(&records)));
    })
  });
}

criterion_group!(benches, bench_shape, bench_recipe, bench_plan, bench_scaling, bench_catalog,);

criterion_main!(benches);
