// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The grid of samples produced by a computation.
//!
//! A computation writes into a `PendingResults`.  Once every sample
//! has been written, `finalize` consumes it, runs the normalization
//! that depends on the whole grid, and returns a read-only `Results`.
//! There is no way back from `Results` to something writable.

use log::debug;
use num::Complex;

use crate::fractal::{FracParameters, Sample};

/// A grid of samples that is still being written.
#[derive(Clone, Debug)]
pub struct PendingResults {
    rows: usize,
    cols: usize,
    params: FracParameters,
    cells: Vec<Sample>,
}

impl PendingResults {
    /// Allocates `rows * cols` default samples for a computation run
    /// with `params`.
    pub fn new(rows: usize, cols: usize, params: FracParameters) -> PendingResults {
        PendingResults {
            rows,
            cols,
            params,
            cells: vec![Sample::default(); rows * cols],
        }
    }

    /// Rows and columns, in that order.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Records the outcome for the sample at (row, col).  Any
    /// normalization factor is reset.
    pub fn set(&mut self, row: usize, col: usize, z: Complex<f64>, c: Complex<f64>, iterations: usize) {
        assert!(
            row < self.rows && col < self.cols,
            "sample ({}, {}) is outside of a {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        let cols = self.cols;
        self.cells[row * cols + col] = Sample::new(z, c, iterations);
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Sample] {
        &mut self.cells
    }

    /// Normalizes every escaping sample against the distribution of
    /// all escape times, and freezes the grid.
    pub fn finalize(mut self) -> Results {
        let hist = accumulated_histogram(&self.cells, &self.params);
        set_n_factors(&mut self.cells, &hist, &self.params);
        Results {
            rows: self.rows,
            cols: self.cols,
            params: self.params,
            cells: self.cells,
        }
    }
}

// A histogram of escape times over [0, N-1), accumulated in place.
// Samples that never escaped are left out of the distribution.
fn accumulated_histogram(cells: &[Sample], params: &FracParameters) -> Vec<usize> {
    let sentinel = params.sentinel();
    let mut hist = vec![0usize; params.max_iterations()];
    for cell in cells.iter().filter(|c| c.iterations < sentinel) {
        hist[cell.iterations] += 1;
    }
    for i in 1..hist.len() {
        hist[i] += hist[i - 1];
    }
    hist
}

fn set_n_factors(cells: &mut [Sample], hist: &[usize], params: &FracParameters) {
    let sentinel = params.sentinel();

    // With nothing escaping there is nothing to divide by, and nothing
    // to normalize either.
    let mut total = 1.0;
    if params.max_iterations() > 1 {
        let escaped = hist[sentinel - 1];
        if escaped > 0 {
            total = escaped as f64;
        }
        debug!(
            "{} of {} samples escaped before iteration {}",
            escaped,
            cells.len(),
            sentinel
        );
    }

    for cell in cells.iter_mut().filter(|c| c.iterations < sentinel) {
        cell.n_factor = (hist[cell.iterations] as f64) / total;
    }
}

/// The finished, normalized grid of samples from a computation.  Safe
/// to share between any number of renderers.
#[derive(Clone, Debug)]
pub struct Results {
    rows: usize,
    cols: usize,
    params: FracParameters,
    cells: Vec<Sample>,
}

impl Results {
    /// The sample at (row, col).  Panics if either index is out of
    /// range, like indexing a slice.
    pub fn at(&self, row: usize, col: usize) -> &Sample {
        assert!(
            row < self.rows && col < self.cols,
            "sample ({}, {}) is outside of a {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }

    /// The sample at (row, col), if there is one.
    pub fn get(&self, row: usize, col: usize) -> Option<&Sample> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Rows and columns, in that order.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The parameters the grid was computed with.
    pub fn params(&self) -> &FracParameters {
        &self.params
    }

    /// The iteration budget the grid was computed with.
    pub fn max_iterations(&self) -> usize {
        self.params.max_iterations()
    }

    /// Iterates over the rows of the grid, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Sample]> {
        self.cells.chunks(self.cols.max(1))
    }
}
