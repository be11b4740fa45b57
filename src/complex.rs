// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Complex numbers of the form a + bi.
//!
//! Storage and the plain arithmetic are delegated to `num::Complex`;
//! what this type adds is the set of operations an iteration function
//! is allowed to use, the coercions from reals and strings, and the
//! handful of operations (`abs`, `sqrt`) whose exact form the
//! escape-time evaluator depends on.  Every operation returns a new
//! value; nothing mutates in place.

use crate::errors::FractalError;
use num::Complex as NumComplex;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// A complex number a + bi, stored as two `f64`s.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex(NumComplex<f64>);

/// 0 + 0i
pub const ZERO: Complex = Complex(NumComplex { re: 0.0, im: 0.0 });
/// 1 + 0i
pub const ONE: Complex = Complex(NumComplex { re: 1.0, im: 0.0 });
/// 0 + 1i
pub const I: Complex = Complex(NumComplex { re: 0.0, im: 1.0 });
/// π + 0i
pub const PI: Complex = Complex(NumComplex {
    re: std::f64::consts::PI,
    im: 0.0,
});

impl Complex {
    /// Builds a + bi without checking the components.  Arithmetic
    /// results go through here, so NaN and infinities pass through
    /// exactly as IEEE division produces them.
    pub fn new(a: f64, b: f64) -> Self {
        Complex(NumComplex::new(a, b))
    }

    /// Builds a + bi, refusing components that aren't finite numbers.
    pub fn try_new(a: f64, b: f64) -> Result<Self, FractalError> {
        if a.is_finite() && b.is_finite() {
            Ok(Complex::new(a, b))
        } else {
            Err(FractalError::InvalidNumber(a, b))
        }
    }

    /// The real part, a.
    pub fn re(&self) -> f64 {
        self.0.re
    }

    /// The imaginary part, b.
    pub fn im(&self) -> f64 {
        self.0.im
    }

    /// The modulus sqrt(a² + b²), kept as a complex number with a zero
    /// imaginary part.
    pub fn abs(self) -> Complex {
        Complex::new((self.re() * self.re() + self.im() * self.im()).sqrt(), 0.0)
    }

    /// (a² − b²) + 2abi
    pub fn square(self) -> Complex {
        Complex::new(
            self.re() * self.re() - self.im() * self.im(),
            2.0 * self.re() * self.im(),
        )
    }

    /// Principal square root.  The sign of the imaginary part follows
    /// b, with zero (and negative zero) counted as positive.
    pub fn sqrt(self) -> Complex {
        let modulus = self.abs().re();
        let sign = if self.im() < 0.0 { -1.0 } else { 1.0 };
        Complex::new(
            (0.5 * (modulus + self.re())).sqrt(),
            sign * (0.5 * (modulus - self.re())).sqrt(),
        )
    }

    /// sin(a)cosh(b) + cos(a)sinh(b)i
    pub fn sin(self) -> Complex {
        Complex(self.0.sin())
    }

    /// cos(a)cosh(b) − sin(a)sinh(b)i
    pub fn cos(self) -> Complex {
        Complex(self.0.cos())
    }

    /// Exact component-wise comparison against anything that coerces
    /// to a complex number.
    pub fn equals<T: Into<Complex>>(&self, other: T) -> bool {
        *self == other.into()
    }
}

impl From<f64> for Complex {
    fn from(a: f64) -> Self {
        Complex::new(a, 0.0)
    }
}

impl From<(f64, f64)> for Complex {
    fn from((a, b): (f64, f64)) -> Self {
        Complex::new(a, b)
    }
}

impl<T: Into<Complex>> Add<T> for Complex {
    type Output = Complex;
    fn add(self, other: T) -> Complex {
        Complex(self.0 + other.into().0)
    }
}

impl<T: Into<Complex>> Sub<T> for Complex {
    type Output = Complex;
    fn sub(self, other: T) -> Complex {
        Complex(self.0 - other.into().0)
    }
}

impl<T: Into<Complex>> Mul<T> for Complex {
    type Output = Complex;
    fn mul(self, other: T) -> Complex {
        Complex(self.0 * other.into().0)
    }
}

/// A divisor with zero modulus is not an error: the components come
/// out as whatever IEEE division makes of them.
impl<T: Into<Complex>> Div<T> for Complex {
    type Output = Complex;
    fn div(self, other: T) -> Complex {
        Complex(self.0 / other.into().0)
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex(-self.0)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} + {}i", self.re(), self.im())
    }
}

/// Reads one coefficient.  Only finite numbers are accepted.
fn coefficient(s: &str) -> Option<f64> {
    f64::from_str(s).ok().filter(|v| v.is_finite())
}

/// Reads the coefficient of an imaginary term with its trailing `i`
/// already removed; a bare `i` means 1.
fn imaginary_coefficient(s: &str) -> Option<f64> {
    if s.is_empty() {
        Some(1.0)
    } else {
        coefficient(s)
    }
}

/// Accepts "<real>", "<real>i", "i", "<real>+<imag>i" and "<real>+i",
/// ignoring whitespace anywhere in the text.
impl FromStr for Complex {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text: String = s.chars().filter(|ch| !ch.is_whitespace()).collect();
        let parts: Vec<&str> = text.split('+').collect();

        let parsed = match parts.as_slice() {
            [only] if only.ends_with('i') => {
                imaginary_coefficient(&only[..only.len() - 1]).map(|b| Complex::new(0.0, b))
            }
            [only] => coefficient(only).map(Complex::from),
            [real, imag] if imag.ends_with('i') => {
                match (coefficient(real), imaginary_coefficient(&imag[..imag.len() - 1])) {
                    (Some(a), Some(b)) => Some(Complex::new(a, b)),
                    _ => None,
                }
            }
            _ => None,
        };

        parsed.ok_or_else(|| FractalError::Conversion(s.to_string()))
    }
}
