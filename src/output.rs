// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing the finished image.

use crate::colorize::Rgba;
use crate::errors::FractalError;
use image::png::PNGEncoder;
use image::ColorType;
use log::debug;
use std::convert::TryFrom;
use std::fs::File;
use std::path::{Path, PathBuf};

/// How many " (n)" variants of a taken name are tried.
pub const MAX_DISAMBIGUATION: u32 = 9;

const EXTENSION: &str = ".png";

/// Picks the file an image will be written to.  The name always ends
/// in `.png`; if that file exists, " (1)" through " (9)" are tried
/// before giving up with `OutputCollision`.
pub fn resolve_output_path(filename: &str) -> Result<PathBuf, FractalError> {
    let stem = if filename.ends_with(EXTENSION) {
        &filename[..filename.len() - EXTENSION.len()]
    } else {
        filename
    };

    let candidate = PathBuf::from(format!("{}{}", stem, EXTENSION));
    if !candidate.exists() {
        return Ok(candidate);
    }

    for n in 1..=MAX_DISAMBIGUATION {
        let candidate = PathBuf::from(format!("{} ({}){}", stem, n, EXTENSION));
        if !candidate.exists() {
            debug!("{}{} exists, writing {} instead", stem, EXTENSION, candidate.display());
            return Ok(candidate);
        }
    }

    Err(FractalError::OutputCollision(format!("{}{}", stem, EXTENSION)))
}

/// Encodes packed 0xRRGGBBAA pixels, row-major, as a PNG at `path`.
pub fn write_image(
    path: &Path,
    pixels: &[u32],
    width: usize,
    height: usize,
) -> Result<(), FractalError> {
    let too_large = |_| {
        FractalError::InvalidConfiguration(format!("{}x{} is too large to encode", width, height))
    };
    let (width, height) = (
        u32::try_from(width).map_err(too_large)?,
        u32::try_from(height).map_err(too_large)?,
    );
    let mut bytes = Vec::with_capacity(pixels.len() * 4);
    for pixel in pixels {
        let Rgba {
            red,
            green,
            blue,
            alpha,
        } = Rgba::unpack(*pixel);
        bytes.extend_from_slice(&[red, green, blue, alpha]);
    }
    let output = File::create(path)?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(&bytes, width, height, ColorType::RGBA(8))?;
    Ok(())
}
