use escapetime::{
    compute_field, presets, render, render_field, ColorSampler, Domain, Engine, EscapeTime,
    Julia, Mandelbrot, Normalized, NormalizedSmoothed, Plotter, SampleGrid, Smoothed, Spectral,
    CONVERGENT,
};
use num::Complex;

#[test]
fn four_by_four_mandelbrot() {
    let domain = Domain::new(-1.0, -1.0, 1.0, 1.0, 4, 4).unwrap();
    let results = compute_field(&domain, &Mandelbrot::new(2.0), 5).unwrap();
    assert_eq!(results.dimensions(), (4, 4));

    let corner = results.at(0, 0);
    assert_eq!(corner.c, Complex::new(-1.0, 1.0));
    assert!(corner.iterations < 4);
    assert_eq!(corner.n_factor, 1.0);

    let centre = results.at(2, 2);
    assert_eq!(centre.c, Complex::new(0.0, 0.0));
    assert_eq!(centre.iterations, 4);
    assert_eq!(centre.n_factor, 0.0);
}

#[test]
fn reads_after_finalizing_are_stable() {
    let domain = Domain::new(-2.0, -1.0, 1.0, 1.0, 9, 7).unwrap();
    let results = compute_field(&domain, &Mandelbrot::new(2.0), 20).unwrap();
    let first: Vec<_> = results.rows().flatten().cloned().collect();
    for _ in 0..3 {
        for (row, col) in (0..7).flat_map(|r| (0..9).map(move |c| (r, c))) {
            assert_eq!(*results.at(row, col), first[row * 9 + col]);
        }
    }
}

#[test]
fn every_plotter_and_palette_paints_the_interior_black() {
    let domain = Domain::new(-2.0, -1.0, 1.0, 1.0, 30, 20).unwrap();
    let results = compute_field(&domain, &Mandelbrot::new(1000.0), 100).unwrap();
    let (row, col) = (10, 20);
    assert!(domain.at(col, row).unwrap().norm() < 1e-12);

    let plotters: Vec<Box<dyn Plotter>> = vec![
        Box::new(EscapeTime),
        Box::new(Smoothed),
        Box::new(Normalized),
        Box::new(NormalizedSmoothed::new()),
    ];
    let palettes: Vec<Box<dyn ColorSampler>> = vec![
        Box::new(Spectral::rainbow()),
        Box::new(presets::pretty_bands()),
        Box::new(presets::pretty_blends()),
        Box::new(presets::pretty_periodic()),
    ];
    for plotter in &plotters {
        for palette in &palettes {
            let bitmap = render(&results, plotter.as_ref(), palette.as_ref());
            assert_eq!(bitmap.at(row, col), CONVERGENT);
        }
    }
}

#[test]
fn julia_image_has_the_domain_shape() {
    let domain = Domain::new(-1.6, -1.0, 1.6, 1.0, 64, 40).unwrap();
    let image = render_field(
        &Julia::new(1024.0, Complex::new(-0.8, 0.156)),
        &domain,
        &Smoothed,
        &Spectral::rainbow(),
        200,
    )
    .unwrap();
    assert_eq!(image.dimensions(), (64, 40));
    assert!(image.pixels().any(|p| *p != CONVERGENT));
}

#[test]
fn independent_renders_run_side_by_side() {
    let domain = Domain::new(-2.0, -1.0, 1.0, 1.0, 48, 32).unwrap();
    let engine = Engine::with_threads(2);
    let render_at = |n| {
        engine
            .render_field(&Mandelbrot::new(2.0), &domain, &Normalized, &presets::pretty_blends2(), n)
            .unwrap()
    };
    let (a, b) = crossbeam::scope(|s| {
        let a = s.spawn(|_| render_at(16));
        let b = s.spawn(|_| render_at(400));
        (a.join().unwrap(), b.join().unwrap())
    })
    .unwrap();
    assert_eq!(a, render_at(16));
    assert_eq!(b, render_at(400));
}
