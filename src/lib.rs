#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal renderer
//!
//! An escape-time fractal takes a point on the complex plane and
//! repeatedly feeds it through some function, measuring how quickly
//! the result runs off towards infinity.  That "velocity" is the
//! number used to color the image; points that never leave are
//! members of the set and come out black.
//!
//! The iterated function is the user's: anything of the shape
//! `(z, c) -> z'`.  The pixel grid can be laid over either input.
//! Varying `c` with `z` starting at zero gives the Mandelbrot family;
//! varying the starting `z` with `c` held at zero gives Julia-style
//! sets.
//!
//! ```no_run
//! use zfractals::{CompiledFunction, Fractal, FractalConfig, Vary};
//!
//! let config = FractalConfig {
//!     amin: -2.5, amax: 1.5, bmin: -1.5, bmax: 1.5,
//!     width: 800, height: 600,
//!     max_iterations: 200, escape_radius: 2.0,
//!     vary: Vary::C,
//! };
//! let func = CompiledFunction::compile("z^2 + c").unwrap();
//! Fractal::new(config, func).generate_image("mandelbrot", 4).unwrap();
//! ```

pub mod colorize;
pub mod complex;
pub mod config;
pub mod errors;
pub mod escape;
pub mod expr;
pub mod fractal;
pub mod output;
pub mod planes;
pub mod sampler;

pub use crate::complex::Complex;
pub use crate::config::{FractalConfig, Options, Settings, Vary};
pub use crate::errors::FractalError;
pub use crate::escape::{check, IterationFn};
pub use crate::expr::CompiledFunction;
pub use crate::fractal::Fractal;
