// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parallel compute pass: every sample of a grid is iterated by a
//! pool of workers, one row at a time, and the finished grid is
//! normalized before it is handed back.

use log::debug;
use std::time::Instant;

use crate::domain::SampleGrid;
use crate::errors::FracError;
use crate::fractal::{FracParameters, Fractal, Sample};
use crate::pool::for_each_row;
use crate::results::{PendingResults, Results};

/// Runs computations and renders on a fixed-size pool of threads.
/// An engine holds no state between calls; any number of calls may be
/// in flight at once.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Engine {
    threads: usize,
}

impl Default for Engine {
    /// One worker per available CPU.
    fn default() -> Engine {
        Engine::with_threads(num_cpus::get())
    }
}

impl Engine {
    /// An engine sized to the hardware.
    pub fn new() -> Engine {
        Engine::default()
    }

    /// An engine with a pool of `threads` workers.  Zero is treated as
    /// one.
    pub fn with_threads(threads: usize) -> Engine {
        Engine {
            threads: threads.max(1),
        }
    }

    /// The size of the worker pool.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Iterates `fractal` at every sample of `grid`, allowing at most
    /// `max_iterations` iterations per sample, and returns the
    /// finalized results.
    ///
    /// Fails with `InvalidConfiguration` for a zero iteration count or
    /// an unusable radius, and with `EmptyDomain` if the grid has no
    /// rows or no columns.  Nothing is computed in either case.
    ///
    /// # Panics
    ///
    /// If the grid refuses a sample inside its own dimensions.
    pub fn compute_field<G, F>(
        &self,
        grid: &G,
        fractal: &F,
        max_iterations: usize,
    ) -> Result<Results, FracError>
    where
        G: SampleGrid + Sync + ?Sized,
        F: Fractal + ?Sized,
    {
        let params = FracParameters::new(fractal.radius(), max_iterations)?;

        let (rows, cols) = grid.dimensions();
        if rows == 0 || cols == 0 {
            return Err(FracError::EmptyDomain);
        }

        let started = Instant::now();
        let mut pending = PendingResults::new(rows, cols, params);
        for_each_row(pending.cells_mut(), cols, self.threads, |row, cells| {
            for (col, cell) in cells.iter_mut().enumerate() {
                let loc = match grid.at(col, row) {
                    Ok(loc) => loc,
                    Err(e) => panic!("sweep left its own grid: {}", e),
                };
                let sample = fractal.frac(loc, &params);
                *cell = Sample::new(sample.z, sample.c, sample.iterations);
            }
        });
        debug!(
            "iterated {}x{} samples (N = {}) in {:?}",
            cols,
            rows,
            max_iterations,
            started.elapsed()
        );

        Ok(pending.finalize())
    }
}

/// Computes a field on an engine sized to the hardware.  See
/// [`Engine::compute_field`].
pub fn compute_field<G, F>(grid: &G, fractal: &F, max_iterations: usize) -> Result<Results, FracError>
where
    G: SampleGrid + Sync + ?Sized,
    F: Fractal + ?Sized,
{
    Engine::default().compute_field(grid, fractal, max_iterations)
}
