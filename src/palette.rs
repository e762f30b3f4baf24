// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Palettes map the height produced by a plotter to a colour.
//!
//! Every palette paints samples that never escaped, and every sample
//! of a computation with an iteration budget of one, in the same
//! `CONVERGENT` colour.

use image::Rgb;
use palette::white_point::D65;
use palette::{FromColor, IntoColor, Lab, Mix, Srgb};

use crate::errors::FracError;

/// An 8-bit RGB colour.
pub type Color = Rgb<u8>;

/// The colour of samples inside the set.
pub const CONVERGENT: Color = Rgb([0, 0, 0]);

/// Converts a floating point height to a colour.
pub trait ColorSampler: Sync {
    /// The colour for height `val` of a computation that allowed
    /// `max_iterations` iterations.
    fn sample_color(&self, val: f64, max_iterations: usize) -> Color;
}

// Heights are truncated before comparison, so a smoothed height in
// [N - 1, N) from a sample that escaped on its last step is painted as
// convergent too.
fn is_convergent(val: f64, max_iterations: usize) -> bool {
    max_iterations <= 1 || val as usize == max_iterations - 1
}

fn position(val: f64, max_iterations: usize) -> f64 {
    val / ((max_iterations - 1) as f64)
}

fn to_u8(c: f64) -> u8 {
    (c.max(0.0).min(1.0) * 255.0).round() as u8
}

/// The colour with hue `h` in degrees (any value, taken modulo 360),
/// and saturation `s` and value `v` in [0, 1].
pub fn hsv(h: f64, s: f64, v: f64) -> Color {
    let hp = h.rem_euclid(360.0) / 60.0;
    let chroma = v * s;
    let x = chroma * (1.0 - ((hp % 2.0) - 1.0).abs());
    let m = v - chroma;
    let (r, g, b) = match hp as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Rgb([to_u8(r + m), to_u8(g + m), to_u8(b + m)])
}

/// Interpolates between `from` and `to` in CIE L*a*b* space under a
/// D65 white point; `t` of 0 is `from` and 1 is `to`.
pub fn blend_lab(from: Color, to: Color, t: f64) -> Color {
    let (p, q) = (to_lab(from), to_lab(to));
    let mixed: Srgb<f64> = Srgb::from_color(p.mix(&q, t));
    let mixed: Srgb<u8> = mixed.into_format();
    Rgb([mixed.red, mixed.green, mixed.blue])
}

fn to_lab(c: Color) -> Lab<D65, f64> {
    let rgb: Srgb<f64> = Srgb::new(c[0], c[1], c[2]).into_format();
    rgb.into_color()
}

fn check_bands(bands: &[Color]) -> Result<(), FracError> {
    if bands.is_empty() {
        return Err(FracError::invalid("a palette needs at least one band"));
    }
    Ok(())
}

/// A sweep through `sweep` degrees of HSV hues at full saturation and
/// value, starting at `offset` degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Spectral {
    /// How far around the hue circle the palette travels.
    pub sweep: f64,
    /// The hue of the lowest height.
    pub offset: f64,
}

impl Spectral {
    /// A spectral palette.
    pub fn new(sweep: f64, offset: f64) -> Spectral {
        Spectral { sweep, offset }
    }

    /// The full hue circle, starting at red.
    pub fn rainbow() -> Spectral {
        Spectral::new(360.0, 0.0)
    }
}

impl ColorSampler for Spectral {
    fn sample_color(&self, val: f64, max_iterations: usize) -> Color {
        if is_convergent(val, max_iterations) {
            return CONVERGENT;
        }
        let t = position(val, max_iterations);
        hsv(t * self.sweep + self.offset, 1.0, 1.0)
    }
}

/// Discrete, evenly sized bands of colour across the whole height
/// range.
#[derive(Clone, Debug, PartialEq)]
pub struct Banded {
    bands: Vec<Color>,
}

impl Banded {
    /// A banded palette of `bands`, lowest first.
    pub fn new(bands: Vec<Color>) -> Result<Banded, FracError> {
        check_bands(&bands)?;
        Ok(Banded { bands })
    }

    /// The colours, lowest first.
    pub fn bands(&self) -> &[Color] {
        &self.bands
    }

    /// The same bands, interpolated.
    pub fn blended(self) -> BlendedBanded {
        BlendedBanded { bands: self.bands }
    }

    /// The same bands, repeating every `period` heights.
    pub fn periodic(self, period: usize) -> Result<Periodic, FracError> {
        Periodic::new(self, period)
    }
}

impl ColorSampler for Banded {
    fn sample_color(&self, val: f64, max_iterations: usize) -> Color {
        if is_convergent(val, max_iterations) {
            return CONVERGENT;
        }
        let len = self.bands.len();
        let i = ((len as f64) * position(val, max_iterations)) as usize;
        self.bands[i.min(len - 1)]
    }
}

/// Bands of colour blended smoothly into their neighbours in L*a*b*
/// space.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendedBanded {
    bands: Vec<Color>,
}

impl BlendedBanded {
    /// A blended palette through `bands`, lowest first.
    pub fn new(bands: Vec<Color>) -> Result<BlendedBanded, FracError> {
        check_bands(&bands)?;
        Ok(BlendedBanded { bands })
    }

    /// The colours, lowest first.
    pub fn bands(&self) -> &[Color] {
        &self.bands
    }
}

impl ColorSampler for BlendedBanded {
    fn sample_color(&self, val: f64, max_iterations: usize) -> Color {
        if is_convergent(val, max_iterations) {
            return CONVERGENT;
        }
        let last = self.bands.len() - 1;
        let scaled = position(val, max_iterations) * (last as f64);
        if scaled <= 0.0 {
            return self.bands[0];
        }
        let lower = scaled.floor() as usize;
        if lower >= last {
            return self.bands[last];
        }
        blend_lab(self.bands[lower], self.bands[lower + 1], scaled - scaled.floor())
    }
}

/// Bands of colour that repeat every `period` heights, regardless of
/// the iteration budget.  Gives ringed images.
#[derive(Clone, Debug, PartialEq)]
pub struct Periodic {
    bands: Banded,
    period: usize,
}

impl Periodic {
    /// Cycles through `bands`, moving to the next band every `period`
    /// heights.  The period must be at least one.
    pub fn new(bands: Banded, period: usize) -> Result<Periodic, FracError> {
        if period == 0 {
            return Err(FracError::invalid("a periodic palette needs a period of at least one"));
        }
        Ok(Periodic { bands, period })
    }

    /// Heights per band.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl ColorSampler for Periodic {
    fn sample_color(&self, val: f64, max_iterations: usize) -> Color {
        if is_convergent(val, max_iterations) {
            return CONVERGENT;
        }
        let bands = self.bands.bands();
        bands[(val as usize / self.period) % bands.len()]
    }
}

/// Ready-made palettes.
pub mod presets {
    use super::*;

    /// Discrete bands of blue, brown, and cream.
    pub fn pretty_bands() -> Banded {
        Banded {
            bands: vec![
                hsv(24.0, 0.38, 0.33),
                hsv(158.0, 0.48, 0.73),
                hsv(58.0, 0.72, 0.83),
                hsv(58.0, 0.32, 0.95),
                hsv(24.0, 0.86, 0.97),
            ],
        }
    }

    /// Like `pretty_bands`, with more orange.
    pub fn pretty_bands2() -> Banded {
        Banded {
            bands: vec![
                hsv(27.0, 0.75, 0.25),
                hsv(188.0, 0.35, 0.82),
                hsv(175.0, 0.13, 0.91),
                hsv(35.0, 0.17, 0.85),
                hsv(52.0, 0.06, 1.00),
            ],
        }
    }

    /// One black band and one white one.
    pub fn bw_stripes() -> Banded {
        Banded {
            bands: vec![hsv(0.0, 0.0, 0.0), hsv(0.0, 0.0, 1.0)],
        }
    }

    /// `pretty_bands`, blended.
    pub fn pretty_blends() -> BlendedBanded {
        pretty_bands().blended()
    }

    /// `pretty_bands2`, blended.
    pub fn pretty_blends2() -> BlendedBanded {
        pretty_bands2().blended()
    }

    /// A gradient from black to white.
    pub fn bw_blends() -> BlendedBanded {
        bw_stripes().blended()
    }

    /// `pretty_bands`, one band per height.
    pub fn pretty_periodic() -> Periodic {
        Periodic {
            bands: pretty_bands(),
            period: 1,
        }
    }

    /// `pretty_bands2`, ten heights per band.
    pub fn pretty_periodic2() -> Periodic {
        Periodic {
            bands: pretty_bands2(),
            period: 10,
        }
    }

    /// Alternating black and white, one height each.
    pub fn bw_periodic() -> Periodic {
        Periodic {
            bands: bw_stripes(),
            period: 1,
        }
    }
}
