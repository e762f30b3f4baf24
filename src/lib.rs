#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal renderer
//!
//! The Mandelbrot set and its Julia sets are drawn by taking a point
//! on the complex plane, repeatedly squaring it and adding a constant,
//! and counting how many steps it takes for the result to run off
//! toward infinity.  That count, the "escape time," is what gets
//! coloured.  Points that never run away within the iteration budget
//! are inside the set and are painted black.
//!
//! The work happens in two parallel passes with a barrier between
//! them.  The compute pass iterates every sample of a `Domain` and
//! collects the outcomes in `Results`; once all of them are in, the
//! escape times are normalized against their own cumulative histogram,
//! which needs the whole grid.  The render pass then maps each sample
//! to a height with a `Plotter` and the height to a colour with a
//! `ColorSampler`, producing a `Bitmap`.
//!
//! ```no_run
//! use escapetime::{render_field, Domain, Mandelbrot, Smoothed, Spectral};
//!
//! let domain = Domain::new(-2.5, -1.0, 1.0, 1.0, 1920, 1080).unwrap();
//! let image = render_field(
//!     &Mandelbrot::new(8000.0),
//!     &domain,
//!     &Smoothed,
//!     &Spectral::rainbow(),
//!     2500,
//! )
//! .unwrap();
//! image.save("mandelbrot.png").unwrap();
//! ```

pub mod domain;
pub mod engine;
pub mod errors;
pub mod fractal;
pub mod palette;
pub mod plot;
mod pool;
pub mod render;
pub mod results;

pub use domain::{Domain, SampleGrid};
pub use engine::{compute_field, Engine};
pub use errors::FracError;
pub use fractal::{escape, FracParameters, Fractal, Julia, Mandelbrot, Sample};
pub use self::palette::{
    presets, Banded, BlendedBanded, Color, ColorSampler, Periodic, Spectral, CONVERGENT,
};
pub use plot::{EscapeTime, Normalized, NormalizedSmoothed, Plotter, Smoothed};
pub use render::{render, render_field, Bitmap};
pub use results::{PendingResults, Results};
