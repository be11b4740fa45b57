// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render configuration.
//!
//! Options arrive from two places, a JSON file and the command line,
//! and either may leave any of them out.  `Options` holds whatever was
//! supplied; `Options::merge` layers the command line over the file,
//! and `Options::validate` checks the result and produces the
//! read-only `Settings` a render runs from.

use crate::complex::Complex;
use crate::errors::FractalError;
use crate::planes::PlaneMapper;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Which of the two iteration inputs the pixel grid is laid over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Vary {
    /// Pixels set the starting z; c stays at zero (Julia-style).
    Z,
    /// Pixels set c; z starts at zero (Mandelbrot-style).
    C,
}

impl FromStr for Vary {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "z" => Ok(Vary::Z),
            "c" => Ok(Vary::C),
            _ => Err(FractalError::InvalidConfiguration(format!(
                "vary is \"{}\"; either z or c should be varied",
                s
            ))),
        }
    }
}

/// The numeric description of a render, minus the iteration function.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FractalConfig {
    /// Leftmost real value.
    pub amin: f64,
    /// Rightmost real value.
    pub amax: f64,
    /// Imaginary value of the first row.
    pub bmin: f64,
    /// Imaginary value the last row approaches.
    pub bmax: f64,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration budget per point.
    pub max_iterations: u32,
    /// Modulus at which a point counts as escaped.
    pub escape_radius: f64,
    /// Whether pixels vary z or c.
    pub vary: Vary,
}

impl FractalConfig {
    /// The mapping from this configuration's pixels to the complex plane.
    pub fn plane(&self) -> PlaneMapper {
        PlaneMapper::new(
            self.width,
            self.height,
            Complex::new(self.amin, self.bmin),
            Complex::new(self.amax, self.bmax),
        )
    }
}

/// Everything a render needs, validated.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Bounds, size, budget and axis.
    pub fractal: FractalConfig,
    /// Source text of the iteration function.
    pub func: String,
    /// Requested output file name, before disambiguation.
    pub filename: String,
    /// Number of render threads.
    pub threads: usize,
}

/// Raw, possibly incomplete options.  Field names are the keys used in
/// the JSON configuration file and the long command-line flags.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Options {
    /// Iteration function source.
    pub func: Option<String>,
    /// "z" or "c".
    pub vary: Option<String>,
    /// Minimum real value.
    pub amin: Option<f64>,
    /// Maximum real value.
    pub amax: Option<f64>,
    /// Minimum imaginary value.
    pub bmin: Option<f64>,
    /// Maximum imaginary value.
    pub bmax: Option<f64>,
    /// Iteration budget.
    pub maxiterations: Option<u32>,
    /// Escape radius.
    pub escaperadius: Option<f64>,
    /// Image width.
    pub width: Option<usize>,
    /// Image height.
    pub height: Option<usize>,
    /// Output file name.
    pub filename: Option<String>,
    /// Render threads; defaults to the number of logical CPUs.
    pub threads: Option<usize>,
}

fn invalid(message: String) -> FractalError {
    FractalError::InvalidConfiguration(message)
}

fn required<T>(value: Option<T>, key: &str) -> Result<T, FractalError> {
    value.ok_or_else(|| {
        invalid(format!(
            "\"{}\" is not defined in config or command line options",
            key
        ))
    })
}

fn finite(value: f64, key: &str) -> Result<f64, FractalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(format!("{} must be a finite number", key)))
    }
}

fn positive_count<T: Copy + PartialEq + Default>(value: T, key: &str) -> Result<T, FractalError> {
    if value == T::default() {
        Err(invalid(format!("{} must be greater than zero", key)))
    } else {
        Ok(value)
    }
}

/// Largest edge an encoded image can have.
const MAX_DIMENSION: usize = u32::MAX as usize;

fn image_size(width: usize, height: usize) -> Result<usize, FractalError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(invalid(format!(
            "{}x{} is too large; width and height must be at most {}",
            width, height, MAX_DIMENSION
        )));
    }
    width
        .checked_mul(height)
        .ok_or_else(|| invalid(format!("{}x{} pixels do not fit in memory", width, height)))
}

impl Options {
    /// Reads options from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Options, FractalError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|e| invalid(format!("could not read {}: {}", path.display(), e)))
    }

    /// Layers `overrides` over `self`: anything set in `overrides` wins.
    pub fn merge(self, overrides: Options) -> Options {
        Options {
            func: overrides.func.or(self.func),
            vary: overrides.vary.or(self.vary),
            amin: overrides.amin.or(self.amin),
            amax: overrides.amax.or(self.amax),
            bmin: overrides.bmin.or(self.bmin),
            bmax: overrides.bmax.or(self.bmax),
            maxiterations: overrides.maxiterations.or(self.maxiterations),
            escaperadius: overrides.escaperadius.or(self.escaperadius),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            filename: overrides.filename.or(self.filename),
            threads: overrides.threads.or(self.threads),
        }
    }

    /// Checks that every required option is present and in range.
    pub fn validate(self) -> Result<Settings, FractalError> {
        let func = required(self.func, "func")?;
        let vary = required(self.vary, "vary")?.parse::<Vary>()?;
        let amin = finite(required(self.amin, "amin")?, "amin")?;
        let amax = finite(required(self.amax, "amax")?, "amax")?;
        let bmin = finite(required(self.bmin, "bmin")?, "bmin")?;
        let bmax = finite(required(self.bmax, "bmax")?, "bmax")?;
        let max_iterations = positive_count(
            required(self.maxiterations, "maxiterations")?,
            "maxiterations",
        )?;
        let escape_radius = finite(
            required(self.escaperadius, "escaperadius")?,
            "escaperadius",
        )?;
        if escape_radius <= 0.0 {
            return Err(invalid("escaperadius must be greater than zero".to_string()));
        }
        let width = positive_count(required(self.width, "width")?, "width")?;
        let height = positive_count(required(self.height, "height")?, "height")?;
        image_size(width, height)?;
        let filename = required(self.filename, "filename")?;
        let threads = positive_count(self.threads.unwrap_or_else(num_cpus::get), "threads")?;

        Ok(Settings {
            fractal: FractalConfig {
                amin,
                amax,
                bmin,
                bmax,
                width,
                height,
                max_iterations,
                escape_radius,
                vary,
            },
            func,
            filename,
            threads,
        })
    }
}
