use criterion::{criterion_group, criterion_main, Criterion};
use escapetime::{compute_field, presets, render, Domain, Mandelbrot, NormalizedSmoothed};

fn compute(c: &mut Criterion) {
    let domain = Domain::new(-2.5, -1.0, 1.0, 1.0, 320, 180).unwrap();
    let fractal = Mandelbrot::new(8000.0);
    c.bench_function("compute 320x180", |b| {
        b.iter(|| compute_field(&domain, &fractal, 500).unwrap())
    });
}

fn colour(c: &mut Criterion) {
    let domain = Domain::new(-2.5, -1.0, 1.0, 1.0, 320, 180).unwrap();
    let results = compute_field(&domain, &Mandelbrot::new(8000.0), 500).unwrap();
    let plotter = NormalizedSmoothed::new();
    let palette = presets::pretty_blends();
    c.bench_function("render 320x180", |b| {
        b.iter(|| render(&results, &plotter, &palette))
    });
}

criterion_group!(benches, compute, colour);
criterion_main!(benches);
