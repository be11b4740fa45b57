// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The whole pipeline: sample the grid, color it, write it.

use crate::colorize::colorize_buffer;
use crate::config::FractalConfig;
use crate::errors::FractalError;
use crate::escape::IterationFn;
use crate::output::{resolve_output_path, write_image};
use crate::sampler;
use log::info;
use std::path::PathBuf;

/// A fractal: a configuration together with the function it iterates.
/// Once built it is read-only; rendering it twice gives the same result.
pub struct Fractal<F> {
    config: FractalConfig,
    func: F,
}

impl<F: IterationFn + Sync> Fractal<F> {
    /// Pairs a configuration with its iteration function.
    pub fn new(config: FractalConfig, func: F) -> Self {
        Fractal { config, func }
    }

    /// The configuration this fractal renders with.
    pub fn config(&self) -> &FractalConfig {
        &self.config
    }

    /// One escape value in [0, 1] per pixel, row-major.  A value of 0
    /// marks a point in the set.
    pub fn generate_data(&self, threads: usize) -> Result<Vec<f64>, FractalError> {
        sampler::render(&self.config, &self.func, threads)
    }

    /// One packed 0xRRGGBBAA color per pixel, row-major.
    pub fn generate_pixels(&self, threads: usize) -> Result<Vec<u32>, FractalError> {
        self.generate_data(threads).map(colorize_buffer)
    }

    /// Renders and writes the image, returning the path actually used.
    /// The path is settled before any rendering so a name collision
    /// fails fast; nothing is written if the render fails.
    pub fn generate_image(&self, filename: &str, threads: usize) -> Result<PathBuf, FractalError> {
        let path = resolve_output_path(filename)?;
        info!("rendering {}", path.display());
        let pixels = self.generate_pixels(threads)?;
        let config = self.config();
        write_image(&path, &pixels, config.width, config.height)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complex::Complex;
    use crate::config::Vary;
    use crate::expr::CompiledFunction;

    fn config() -> FractalConfig {
        FractalConfig {
            amin: -2.5,
            amax: 1.5,
            bmin: -1.5,
            bmax: 1.5,
            width: 24,
            height: 18,
            max_iterations: 40,
            escape_radius: 2.0,
            vary: Vary::C,
        }
    }

    fn mandelbrot() -> Fractal<CompiledFunction> {
        Fractal::new(config(), CompiledFunction::compile("z^2 + c").unwrap())
    }

    #[test]
    fn the_pipeline_is_deterministic() {
        let fractal = mandelbrot();
        let first = fractal.generate_pixels(1).unwrap();
        assert_eq!(first.len(), 24 * 18);
        assert_eq!(first, fractal.generate_pixels(1).unwrap());
        assert_eq!(first, fractal.generate_pixels(4).unwrap());
    }

    #[test]
    fn members_of_the_set_are_black() {
        let fractal = mandelbrot();
        let data = fractal.generate_data(2).unwrap();
        let pixels = fractal.generate_pixels(2).unwrap();
        for (value, pixel) in data.iter().zip(pixels.iter()) {
            if *value == 0.0 {
                assert_eq!(*pixel, 0x0000_00ff);
            }
        }
    }

    #[test]
    fn writes_the_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("set");
        let path = mandelbrot().generate_image(name.to_str().unwrap(), 2).unwrap();
        assert_eq!(path, dir.path().join("set.png"));
        let image = image::open(&path).unwrap().to_rgba();
        assert_eq!((image.width(), image.height()), (24, 18));

        let again = mandelbrot().generate_image(name.to_str().unwrap(), 2).unwrap();
        assert_eq!(again, dir.path().join("set (1).png"));
    }

    #[test]
    fn a_failed_render_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("broken");
        let failing = |_z: Complex, _c: Complex| -> Result<Complex, FractalError> {
            Err(FractalError::Iteration("no".to_string()))
        };
        assert!(Fractal::new(config(), failing)
            .generate_image(name.to_str().unwrap(), 1)
            .is_err());
        assert!(!dir.path().join("broken.png").exists());
    }
}
