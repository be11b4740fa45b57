// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test for a single starting point.
//!
//! A point is iterated through the user's function until its modulus
//! reaches the escape radius or the iteration budget runs out.  How
//! quickly it escapes, as a fraction of the budget, is the number the
//! rest of the pipeline colors with.

use crate::complex::Complex;
use crate::errors::FractalError;

/// One step of an escape-time iteration: given the current `z` and the
/// fixed parameter `c`, produce the next `z`.
///
/// Any closure of the right shape is an `IterationFn`, as is a compiled
/// expression (see `expr::CompiledFunction`).  Failures are reported,
/// not panicked, and the evaluator hands them straight back.
pub trait IterationFn {
    /// Computes the next value of `z`.
    fn apply(&self, z: Complex, c: Complex) -> Result<Complex, FractalError>;
}

impl<F> IterationFn for F
where
    F: Fn(Complex, Complex) -> Result<Complex, FractalError>,
{
    fn apply(&self, z: Complex, c: Complex) -> Result<Complex, FractalError> {
        self(z, c)
    }
}

/// Returns a number between 0 and 1 describing when `z0` escapes under
/// repeated application of `func` with parameter `c`.
///
/// A point that escapes at iteration `n` scores `n / max_iterations`.
/// A point that never escapes scores exactly 0, and so does a point
/// that has already escaped before the first iteration: the two cannot
/// be told apart from the result.  A NaN modulus never compares as
/// escaped, so such a point runs out the budget and scores 0 as well.
pub fn check<F>(
    z0: Complex,
    c: Complex,
    func: &F,
    max_iterations: u32,
    escape_radius: f64,
) -> Result<f64, FractalError>
where
    F: IterationFn + ?Sized,
{
    let mut z = z0;
    for iteration in 0..max_iterations {
        if z.abs().re() >= escape_radius {
            return Ok(f64::from(iteration) / f64::from(max_iterations));
        }
        z = func.apply(z, c)?;
    }
    Ok(0.0)
}
