// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plotters turn a sample into a height, which a palette then turns
//! into a colour.  Every plotter passes the "never escaped" count,
//! N - 1, through untouched, so palettes can recognise it.

use crate::fractal::{FracParameters, Sample};

/// Maps the outcome of a fractal iteration onto a floating point
/// height.
pub trait Plotter: Sync {
    /// The height of `sample`, from a computation run with `params`.
    fn plot(&self, sample: &Sample, params: &FracParameters) -> f64;
}

/// The classic plotting method: the height is the escape time.
#[derive(Copy, Clone, Debug, Default)]
pub struct EscapeTime;

impl Plotter for EscapeTime {
    fn plot(&self, sample: &Sample, _params: &FracParameters) -> f64 {
        sample.iterations as f64
    }
}

/// The continuous escape time, nu = n + 1 - ln(ln|z|) / ln(d), which
/// is proportional to the sample's electrostatic potential and removes
/// the banding of the plain escape time.
#[derive(Copy, Clone, Debug, Default)]
pub struct Smoothed;

impl Plotter for Smoothed {
    fn plot(&self, sample: &Sample, params: &FracParameters) -> f64 {
        if sample.iterations >= params.sentinel() {
            return sample.iterations as f64;
        }
        smooth(sample.iterations as f64, sample, params)
    }
}

/// The escape time replaced by the sample's rank among every escaping
/// sample, spread over [0, N - 2].  Colour use is even no matter how
/// the escape times cluster.
#[derive(Copy, Clone, Debug, Default)]
pub struct Normalized;

impl Plotter for Normalized {
    fn plot(&self, sample: &Sample, params: &FracParameters) -> f64 {
        let sentinel = params.sentinel();
        if sample.iterations >= sentinel {
            return sample.iterations as f64;
        }
        (sample.n_factor * (sentinel as f64 - 1.0)).floor()
    }
}

/// The smoothing correction applied on top of the normalized height.
#[derive(Copy, Clone, Debug, Default)]
pub struct NormalizedSmoothed {
    normalized: Normalized,
}

impl NormalizedSmoothed {
    /// The default normalized-smoothed plotter.
    pub fn new() -> NormalizedSmoothed {
        NormalizedSmoothed::default()
    }
}

impl Plotter for NormalizedSmoothed {
    fn plot(&self, sample: &Sample, params: &FracParameters) -> f64 {
        let val = self.normalized.plot(sample, params);
        if val as usize == params.sentinel() {
            return val;
        }
        smooth(val, sample, params)
    }
}

// ln(ln|z|) has no meaning inside the unit circle, which a sample can
// only reach by escaping a radius below one.
fn smooth(val: f64, sample: &Sample, params: &FracParameters) -> f64 {
    let modulus = sample.z.norm();
    if modulus <= 1.0 {
        return val;
    }
    val + 1.0 - modulus.ln().ln() * params.log_degree_inv()
}
