// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Domain struct, which describes a relationship between
//! a grid of samples with its origin at the top-left, and a rectangle
//! on the complex plane defined by its left-lower and right-upper
//! corners.
use num::Complex;

use crate::errors::FracError;

/// Anything the engine can sweep: a grid of samples, each of which
/// maps to a point on the complex plane.
pub trait SampleGrid {
    /// Returns the complex point for the sample in column `i` and row
    /// `j`, where (0, 0) is the top-left corner of the grid.
    fn at(&self, i: usize, j: usize) -> Result<Complex<f64>, FracError>;

    /// The number of samples along each axis, as rows and columns.
    fn dimensions(&self) -> (usize, usize);
}

/// A rectangular region of the complex plane, sampled `cols` times
/// along the real axis and `rows` times along the imaginary axis.
///
/// Row 0 is the top of the region, so that rows grow downward like an
/// image while the imaginary axis grows upward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Domain {
    // The left-lower corner.
    x0: f64,
    y0: f64,
    // Extents along each axis.
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
    // Inverses of the sample counts, so a lookup is two multiplies.
    w_inv: f64,
    h_inv: f64,
}

impl Domain {
    /// Constructor.  `(x0, y0)` is the left-lower corner of the region
    /// and `(x1, y1)` the right-upper corner; the region is sampled
    /// `cols` times along x and `rows` times along y.
    pub fn new(
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        cols: usize,
        rows: usize,
    ) -> Result<Domain, FracError> {
        if cols == 0 || rows == 0 {
            return Err(FracError::invalid(
                "the number of samples along any axis must be greater than zero",
            ));
        }

        Ok(Domain {
            x0,
            y0,
            width: x1 - x0,
            height: y1 - y0,
            cols,
            rows,
            w_inv: 1.0 / (cols as f64),
            h_inv: 1.0 / (rows as f64),
        })
    }

    /// Builds a domain from its two corners expressed as complex
    /// numbers.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
        cols: usize,
        rows: usize,
    ) -> Result<Domain, FracError> {
        Domain::new(
            leftlower.re,
            leftlower.im,
            rightupper.re,
            rightupper.im,
            cols,
            rows,
        )
    }

    /// The total number of samples in the grid.
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// True if the grid has no samples, which no constructed domain does.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SampleGrid for Domain {
    fn at(&self, i: usize, j: usize) -> Result<Complex<f64>, FracError> {
        if i >= self.cols || j >= self.rows {
            return Err(FracError::OutOfBounds {
                col: i,
                row: j,
                cols: self.cols,
                rows: self.rows,
            });
        }

        let ti = (i as f64) * self.w_inv;
        let tj = 1.0 - (j as f64) * self.h_inv;
        Ok(Complex::new(
            self.x0 + ti * self.width,
            self.y0 + tj * self.height,
        ))
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn domain_rejects_zero_samples() {
        for &(cols, rows) in &[(0, 0), (0, 1), (1, 0)] {
            assert_eq!(
                Domain::new(0.0, 0.0, 1.0, 1.0, cols, rows).err().map(|e| match e {
                    FracError::InvalidConfiguration(_) => true,
                    _ => false,
                }),
                Some(true)
            );
        }
    }

    #[test]
    fn domain_accepts_positive_samples() {
        assert!(Domain::new(0.0, 0.0, 1.0, 1.0, 1, 1).is_ok());
        assert!(Domain::new(-2.0, -1.0, 1.0, 1.0, 640, 480).is_ok());
    }

    #[test]
    fn at_maps_corners() {
        let d = Domain::new(-2.0, -1.0, 2.0, 3.0, 8, 4).unwrap();
        assert!(close(d.at(0, 0).unwrap(), Complex::new(-2.0, 3.0)));
        assert!(close(d.at(7, 0).unwrap(), Complex::new(1.5, 3.0)));
        assert!(close(d.at(0, 3).unwrap(), Complex::new(-2.0, 0.0)));
        assert!(close(d.at(4, 2).unwrap(), Complex::new(0.0, 1.0)));
    }

    #[test]
    fn at_interpolates_unit_square() {
        let samples = 10;
        let d = Domain::new(0.0, 0.0, 1.0, 1.0, samples, samples).unwrap();
        for (i, j) in iproduct!(0..samples, 0..samples) {
            let z = d.at(i, j).unwrap();
            let re = (i as f64) / (samples as f64);
            let im = 1.0 - (j as f64) / (samples as f64);
            assert!(close(z, Complex::new(re, im)), "({}, {}) -> {}", i, j, z);
        }
    }

    #[test]
    fn at_rejects_out_of_bounds() {
        let d = Domain::new(0.0, 0.0, 1.0, 1.0, 10, 5).unwrap();
        for &(i, j) in &[(10, 0), (0, 5), (10, 5), (1000, 1000), (usize::MAX, 0)] {
            assert_eq!(
                d.at(i, j),
                Err(FracError::OutOfBounds {
                    col: i,
                    row: j,
                    cols: 10,
                    rows: 5
                })
            );
        }
        assert!(d.at(9, 4).is_ok());
    }

    #[test]
    fn dimensions_are_rows_then_columns() {
        for (cols, rows) in iproduct!(vec![1, 100, 100_000], vec![1, 100, 100_000]) {
            let d = Domain::new(0.0, 0.0, 1.0, 1.0, cols, rows).unwrap();
            assert_eq!(d.dimensions(), (rows, cols));
            assert_eq!(d.len(), rows * cols);
            assert!(!d.is_empty());
        }
    }
}
