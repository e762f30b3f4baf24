// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use escapetime::{
    presets, Banded, ColorSampler, Domain, Engine, EscapeTime, Fractal, Julia, Mandelbrot,
    Normalized, NormalizedSmoothed, Plotter, Smoothed, Spectral,
};
use failure::{format_err, Error};
use log::info;
use num::Complex;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const FRACTAL: &str = "fractal";
const JULIA_C: &str = "julia-c";
const PLOTTER: &str = "plotter";
const PALETTE: &str = "palette";
const BANDS: &str = "bands";
const SWEEP: &str = "sweep";
const OFFSET: &str = "offset";
const PERIOD: &str = "period";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("escapetime")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.5,-1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the complex plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1.0,1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the complex plane"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in each pass [default: one per CPU]"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("250")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iterations after which a point is considered inside the set"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .long(RADIUS)
                .short("R")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse bailout radius",
                        "Bailout radius must be positive",
                    )
                })
                .help("Bailout radius"),
        )
        .arg(
            Arg::with_name(FRACTAL)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .possible_values(&["mandelbrot", "julia"])
                .default_value("mandelbrot")
                .help("Fractal to iterate"),
        )
        .arg(
            Arg::with_name(JULIA_C)
                .long(JULIA_C)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.8,0.156")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse Julia parameter"))
                .help("The fixed parameter of a Julia set"),
        )
        .arg(
            Arg::with_name(PLOTTER)
                .long(PLOTTER)
                .short("p")
                .takes_value(true)
                .possible_values(&["escape", "smooth", "normalized", "normalized-smooth"])
                .default_value("smooth")
                .help("How escape times become heights"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("P")
                .takes_value(true)
                .possible_values(&["spectral", "bands", "blends", "periodic"])
                .default_value("spectral")
                .help("How heights become colours"),
        )
        .arg(
            Arg::with_name(BANDS)
                .long(BANDS)
                .takes_value(true)
                .possible_values(&["pretty", "pretty2", "bw"])
                .default_value("pretty")
                .help("Colour bands for the banded, blended, and periodic palettes"),
        )
        .arg(
            Arg::with_name(SWEEP)
                .long(SWEEP)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("360")
                .validator(|s| {
                    validate_range(
                        &s,
                        -3600.0,
                        3600.0,
                        "Could not parse hue sweep",
                        "Hue sweep must be within ten turns",
                    )
                })
                .help("Degrees of hue covered by the spectral palette"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .long(OFFSET)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        -360.0,
                        360.0,
                        "Could not parse hue offset",
                        "Hue offset must be within one turn",
                    )
                })
                .help("Starting hue of the spectral palette"),
        )
        .arg(
            Arg::with_name(PERIOD)
                .long(PERIOD)
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse period",
                        "Period must be between 1 and 1000000",
                    )
                })
                .help("Heights per band of the periodic palette"),
        )
        .get_matches()
}

// Everything read through here is required or has a default, and has
// already been validated by clap.
fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| format_err!("missing argument {}", name))
}

fn number<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = value(matches, name)?;
    T::from_str(raw).map_err(|_| format_err!("could not parse {} from {:?}", name, raw))
}

fn complex(matches: &ArgMatches, name: &str) -> Result<Complex<f64>, Error> {
    let raw = value(matches, name)?;
    parse_complex(raw).ok_or_else(|| format_err!("could not parse {} from {:?}", name, raw))
}

fn fractal(matches: &ArgMatches) -> Result<Box<dyn Fractal>, Error> {
    let radius = number::<f64>(matches, RADIUS)?;
    let fractal: Box<dyn Fractal> = match value(matches, FRACTAL)? {
        "julia" => Box::new(Julia::new(radius, complex(matches, JULIA_C)?)),
        _ => Box::new(Mandelbrot::new(radius)),
    };
    Ok(fractal)
}

fn plotter(matches: &ArgMatches) -> Result<Box<dyn Plotter>, Error> {
    let plotter: Box<dyn Plotter> = match value(matches, PLOTTER)? {
        "escape" => Box::new(EscapeTime),
        "normalized" => Box::new(Normalized),
        "normalized-smooth" => Box::new(NormalizedSmoothed::new()),
        _ => Box::new(Smoothed),
    };
    Ok(plotter)
}

fn bands(matches: &ArgMatches) -> Result<Banded, Error> {
    Ok(match value(matches, BANDS)? {
        "pretty2" => presets::pretty_bands2(),
        "bw" => presets::bw_stripes(),
        _ => presets::pretty_bands(),
    })
}

fn palette(matches: &ArgMatches) -> Result<Box<dyn ColorSampler>, Error> {
    let palette: Box<dyn ColorSampler> = match value(matches, PALETTE)? {
        "bands" => Box::new(bands(matches)?),
        "blends" => Box::new(bands(matches)?.blended()),
        "periodic" => Box::new(bands(matches)?.periodic(number(matches, PERIOD)?)?),
        _ => Box::new(Spectral::new(
            number(matches, SWEEP)?,
            number(matches, OFFSET)?,
        )),
    };
    Ok(palette)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let size = value(matches, SIZE)?;
    let (width, height) =
        parse_pair::<usize>(size, 'x').ok_or_else(|| format_err!("could not parse size {:?}", size))?;
    let domain = Domain::from_corners(
        complex(matches, LEFTLOWER)?,
        complex(matches, RIGHTUPPER)?,
        width,
        height,
    )?;
    let engine = match matches.value_of(THREADS) {
        Some(_) => Engine::with_threads(number(matches, THREADS)?),
        None => Engine::default(),
    };
    let iterations: usize = number(matches, ITERATIONS)?;

    let (fractal, plotter, palette) = (fractal(matches)?, plotter(matches)?, palette(matches)?);

    let started = Instant::now();
    let image = engine.render_field(
        fractal.as_ref(),
        &domain,
        plotter.as_ref(),
        palette.as_ref(),
        iterations,
    )?;
    info!(
        "rendered {}x{} at {} iterations on {} threads in {:?}",
        width,
        height,
        iterations,
        engine.threads(),
        started.elapsed()
    );

    let output = Path::new(value(matches, OUTPUT)?);
    image.save(output)?;
    info!("wrote {}", output.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        for cause in e.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
