// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type shared by every stage of a render.

use failure::Fail;
use std::io;

/// Everything that can stop a render.  None of these are recovered
/// internally; they all travel up to the caller.
#[derive(Debug, Fail)]
pub enum FractalError {
    /// A complex number was asked to hold a component that isn't a
    /// finite number.
    #[fail(display = "Failed to construct a complex number from values {} and {}", _0, _1)]
    InvalidNumber(f64, f64),

    /// A piece of text could not be read as a complex number.
    #[fail(display = "{} could not be converted into a complex number", _0)]
    Conversion(String),

    /// A configuration value is missing, malformed, or out of range.
    #[fail(display = "Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// The iteration function text did not compile.
    #[fail(display = "Could not compile iteration function: {}", _0)]
    FunctionSyntax(String),

    /// A user-supplied iteration function reported a failure.
    #[fail(display = "Iteration function failed: {}", _0)]
    Iteration(String),

    /// Every disambiguated variant of the output name is taken.
    #[fail(display = "Multiple files already exist with the filename {}", _0)]
    OutputCollision(String),

    /// A render worker thread panicked.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,

    /// Reading configuration or writing the image failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for FractalError {
    fn from(err: io::Error) -> Self {
        FractalError::Io(err)
    }
}
