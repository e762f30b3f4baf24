// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel render pass, and the whole pipeline from a fractal to
//! an image.

use image::RgbImage;
use log::debug;
use std::time::Instant;

use crate::domain::SampleGrid;
use crate::engine::Engine;
use crate::errors::FracError;
use crate::fractal::Fractal;
use crate::palette::{Color, ColorSampler, CONVERGENT};
use crate::plot::Plotter;
use crate::pool::for_each_row;
use crate::results::Results;

/// A grid of colours, row-major, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    rows: usize,
    cols: usize,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// A bitmap of `rows * cols` convergent pixels.
    pub fn new(rows: usize, cols: usize) -> Bitmap {
        Bitmap {
            rows,
            cols,
            pixels: vec![CONVERGENT; rows * cols],
        }
    }

    /// The colour at (row, col).  Panics if either index is out of
    /// range.
    pub fn at(&self, row: usize, col: usize) -> Color {
        assert!(
            row < self.rows && col < self.cols,
            "pixel ({}, {}) is outside of a {}x{} bitmap",
            row,
            col,
            self.rows,
            self.cols
        );
        self.pixels[row * self.cols + col]
    }

    /// Rows and columns, in that order.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The bitmap as an image, `cols` pixels wide and `rows` tall.
    pub fn into_image(self) -> RgbImage {
        let cols = self.cols;
        let pixels = self.pixels;
        RgbImage::from_fn(cols as u32, self.rows as u32, |x, y| {
            pixels[(y as usize) * cols + (x as usize)]
        })
    }
}

impl Engine {
    /// Colours every sample of `results` by running it through
    /// `plotter` and then `palette`.
    pub fn render<P, S>(&self, results: &Results, plotter: &P, palette: &S) -> Bitmap
    where
        P: Plotter + ?Sized,
        S: ColorSampler + ?Sized,
    {
        let (rows, cols) = results.dimensions();
        let params = results.params();
        let max_iterations = params.max_iterations();

        let started = Instant::now();
        let mut bitmap = Bitmap::new(rows, cols);
        for_each_row(&mut bitmap.pixels, cols, self.threads(), |row, pixels| {
            for (col, pixel) in pixels.iter_mut().enumerate() {
                let val = plotter.plot(results.at(row, col), params);
                *pixel = palette.sample_color(val, max_iterations);
            }
        });
        debug!("rendered {}x{} pixels in {:?}", cols, rows, started.elapsed());

        bitmap
    }

    /// Computes `fractal` over `grid` and renders the result as an
    /// image.
    pub fn render_field<G, F, P, S>(
        &self,
        fractal: &F,
        grid: &G,
        plotter: &P,
        palette: &S,
        max_iterations: usize,
    ) -> Result<RgbImage, FracError>
    where
        G: SampleGrid + Sync + ?Sized,
        F: Fractal + ?Sized,
        P: Plotter + ?Sized,
        S: ColorSampler + ?Sized,
    {
        let results = self.compute_field(grid, fractal, max_iterations)?;
        Ok(self.render(&results, plotter, palette).into_image())
    }
}

/// Renders on an engine sized to the hardware.  See [`Engine::render`].
pub fn render<P, S>(results: &Results, plotter: &P, palette: &S) -> Bitmap
where
    P: Plotter + ?Sized,
    S: ColorSampler + ?Sized,
{
    Engine::default().render(results, plotter, palette)
}

/// Computes and renders on an engine sized to the hardware.  See
/// [`Engine::render_field`].
pub fn render_field<G, F, P, S>(
    fractal: &F,
    grid: &G,
    plotter: &P,
    palette: &S,
    max_iterations: usize,
) -> Result<RgbImage, FracError>
where
    G: SampleGrid + Sync + ?Sized,
    F: Fractal + ?Sized,
    P: Plotter + ?Sized,
    S: ColorSampler + ?Sized,
{
    Engine::default().render_field(fractal, grid, plotter, palette, max_iterations)
}
