// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The quadratic escape-time iteration, z ← z² + c, and the two ways
//! of seeding it.  The Mandelbrot set seeds z with zero and uses the
//! sampled point as c; a Julia set seeds z with the sampled point and
//! holds c fixed.

use num::Complex;

use crate::errors::FracError;

/// The degree of every polynomial in this family.
pub const QUADRATIC_DEGREE: f64 = 2.0;

/// The parameters of a single computation.  The engine builds one at
/// dispatch and stores it with the results it produces, so nothing
/// about a run lives outside of the run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FracParameters {
    radius: f64,
    max_iterations: usize,
    log_degree_inv: f64,
}

impl FracParameters {
    /// Requires a finite, positive bailout radius and at least one
    /// iteration.
    pub fn new(radius: f64, max_iterations: usize) -> Result<FracParameters, FracError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FracError::invalid(format!(
                "the bailout radius must be a positive number, not {}",
                radius
            )));
        }
        if max_iterations < 1 {
            return Err(FracError::invalid(
                "the maximum iteration count must be greater than zero",
            ));
        }
        Ok(FracParameters {
            radius,
            max_iterations,
            log_degree_inv: 1.0 / QUADRATIC_DEGREE.ln(),
        })
    }

    /// The magnitude past which an iterate is considered to diverge.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// N: the iteration budget.  `N - 1` is the "never escaped" count.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The iteration count reported for samples that did not escape.
    pub fn sentinel(&self) -> usize {
        self.max_iterations - 1
    }

    /// `1 / ln(degree)`, used by the smoothing estimator.
    pub fn log_degree_inv(&self) -> f64 {
        self.log_degree_inv
    }
}

/// The outcome of iterating a single sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// The final iterate.
    pub z: Complex<f64>,
    /// The fractal parameter the iteration ran with.
    pub c: Complex<f64>,
    /// The escape time, or `N - 1` if the sample never escaped.
    pub iterations: usize,
    /// The sample's rank among all escaping samples, in (0, 1].  Zero
    /// until the results are finalized, and zero forever for samples
    /// that never escaped.
    pub n_factor: f64,
}

impl Sample {
    /// A fresh sample with no normalization applied.
    pub fn new(z: Complex<f64>, c: Complex<f64>, iterations: usize) -> Sample {
        Sample {
            z,
            c,
            iterations,
            n_factor: 0.0,
        }
    }
}

impl Default for Sample {
    fn default() -> Sample {
        Sample::new(Complex::new(0.0, 0.0), Complex::new(0.0, 0.0), 0)
    }
}

/// Maps a point on the complex plane to the result of a fractal
/// iteration.
pub trait Fractal: Sync {
    /// The bailout radius this fractal should be run with.
    fn radius(&self) -> f64;

    /// Iterates the fractal for the point `loc`.
    fn frac(&self, loc: Complex<f64>, params: &FracParameters) -> Sample;
}

/// Iterate z ← z² + c from `z`, counting iterations until either the
/// iterate leaves the bailout radius or the count reaches `N - 1`.
pub fn escape(mut z: Complex<f64>, c: Complex<f64>, params: &FracParameters) -> Sample {
    let sentinel = params.sentinel();
    let mut count = 0;
    while z.norm() <= params.radius {
        z = z * z + c;
        if count == sentinel {
            break;
        }
        count += 1;
    }
    Sample::new(z, c, count)
}

/// The Mandelbrot set, which results from iterating f_c(z) = z² + c
/// for every c in the domain, starting from z = 0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mandelbrot {
    radius: f64,
}

impl Mandelbrot {
    /// A Mandelbrot set with a given bailout radius.
    pub fn new(radius: f64) -> Mandelbrot {
        Mandelbrot { radius }
    }
}

impl Fractal for Mandelbrot {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn frac(&self, loc: Complex<f64>, params: &FracParameters) -> Sample {
        escape(Complex::new(0.0, 0.0), loc, params)
    }
}

/// The quadratic Julia set, which results from iterating
/// f_C(z) = z² + C for every z in the domain and a single fixed C.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Julia {
    radius: f64,
    c: Complex<f64>,
}

impl Julia {
    /// A Julia set with a given bailout radius and parameter C.
    pub fn new(radius: f64, c: Complex<f64>) -> Julia {
        Julia { radius, c }
    }

    /// The fixed parameter.
    pub fn c(&self) -> Complex<f64> {
        self.c
    }
}

impl Fractal for Julia {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn frac(&self, loc: Complex<f64>, params: &FracParameters) -> Sample {
        escape(loc, self.c, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: f64, n: usize) -> FracParameters {
        FracParameters::new(radius, n).unwrap()
    }

    #[test]
    fn parameters_reject_bad_input() {
        assert!(FracParameters::new(2.0, 0).is_err());
        assert!(FracParameters::new(0.0, 10).is_err());
        assert!(FracParameters::new(-1.0, 10).is_err());
        assert!(FracParameters::new(std::f64::NAN, 10).is_err());
        assert!(FracParameters::new(std::f64::INFINITY, 10).is_err());
        assert!(FracParameters::new(2.0, 1).is_ok());
    }

    #[test]
    fn origin_never_escapes_the_mandelbrot_set() {
        let m = Mandelbrot::new(2.0);
        for n in 1..64 {
            let s = m.frac(Complex::new(0.0, 0.0), &params(2.0, n));
            assert_eq!(s.iterations, n - 1);
            assert_eq!(s.z, Complex::new(0.0, 0.0));
        }
    }

    #[test]
    fn corner_of_unit_square_escapes_quickly() {
        // -1+i -> -1-i -> -1+3i, which is past a radius of 2.
        let c = Complex::new(-1.0, 1.0);
        let s = Mandelbrot::new(2.0).frac(c, &params(2.0, 5));
        assert_eq!(s.iterations, 3);
        assert_eq!(s.c, c);
        assert_eq!(s.z, Complex::new(-1.0, 3.0));
        assert_eq!(s.n_factor, 0.0);
    }

    #[test]
    fn iterate_on_the_radius_has_not_escaped() {
        // 0 -> 2, exactly on the radius, stays in; 2 -> 6 escapes.
        let s = Mandelbrot::new(2.0).frac(Complex::new(2.0, 0.0), &params(2.0, 10));
        assert_eq!(s.iterations, 2);
        assert_eq!(s.z, Complex::new(6.0, 0.0));
    }

    #[test]
    fn iteration_budget_caps_the_count() {
        // -1 is a period-two orbit and never escapes.
        let s = Mandelbrot::new(2.0).frac(Complex::new(-1.0, 0.0), &params(2.0, 1000));
        assert_eq!(s.iterations, 999);
    }

    #[test]
    fn julia_outside_radius_returns_immediately() {
        let j = Julia::new(2.0, Complex::new(-0.8, 0.156));
        let loc = Complex::new(3.0, 0.0);
        let s = j.frac(loc, &params(2.0, 100));
        assert_eq!(s.iterations, 0);
        assert_eq!(s.z, loc);
        assert_eq!(s.c, j.c());
    }

    #[test]
    fn julia_with_zero_parameter_is_the_unit_disc() {
        let j = Julia::new(2.0, Complex::new(0.0, 0.0));
        let p = params(2.0, 50);
        assert_eq!(j.frac(Complex::new(0.5, 0.5), &p).iterations, 49);
        assert!(j.frac(Complex::new(1.1, 0.0), &p).iterations < 49);
    }
}
