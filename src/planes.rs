// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by an (amin, bmin)
//! corner and an (amax, bmax) corner.

use crate::complex::Complex;

/// Describes the width and height of an integral plane that starts at
/// 0,0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// The (amin, bmin) and (amax, bmax) corners of the complex plane,
/// treating the real part as the x-component and the imaginary part
/// as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex, pub Complex);

/// The x, y of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the integral plane onto the complex plane.  The
/// corners aren't required to be ordered: a max below its min just
/// mirrors the image along that axis.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Width and height, in pixels.
    pub integral_plane: IntegralPlane,
    /// The two corners of the complex region.
    pub complex_plane: ComplexPlane,
    // How far one pixel moves along the real and imaginary axes.
    steps: (f64, f64),
}

impl PlaneMapper {
    /// Takes the pixel dimensions and the two corners of the complex
    /// region they cover.
    pub fn new(width: usize, height: usize, min: Complex, max: Complex) -> PlaneMapper {
        let steps = (
            (max.re() - min.re()) / (width as f64),
            (max.im() - min.im()) / (height as f64),
        );
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(min, max),
            steps,
        }
    }

    /// Width of the integral plane.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the integral plane.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// size the output buffer.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The row-major offset of a pixel in the output buffer.
    pub fn offset(&self, pixel: &Pixel) -> usize {
        pixel.0 + pixel.1 * self.integral_plane.0
    }

    /// Given a pixel on the integral plane, return the point it stands
    /// for on the complex plane: min + (max - min) / size * pixel, per
    /// axis.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex {
        let min = self.complex_plane.0;
        Complex::new(
            min.re() + self.steps.0 * (pixel.0 as f64),
            min.im() + self.steps.1 * (pixel.1 as f64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Complex::new(0.0, 0.0), Complex::new(5.0, 5.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(1, 3)), Complex::new(-1.0, 1.0));
    }

    #[test]
    fn the_max_corner_is_never_reached() {
        let pm = PlaneMapper::new(640, 480, Complex::new(-2.0, -1.5), Complex::new(2.0, 1.5));
        let last = pm.pixel_to_point(&Pixel(639, 479));
        assert!(last.re() < 2.0);
        assert!(last.im() < 1.5);
    }

    #[test]
    fn pixel_to_point_on_non_square_planes() {
        let pm = PlaneMapper::new(4, 2, Complex::new(0.0, 0.0), Complex::new(2.0, 4.0));
        assert_eq!(pm.pixel_to_point(&Pixel(1, 1)), Complex::new(0.5, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 0)), Complex::new(1.5, 0.0));
    }

    #[test]
    fn reversed_corners_mirror_the_plane() {
        let pm = PlaneMapper::new(4, 4, Complex::new(2.0, 2.0), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(-1.0, 1.0));
    }

    #[test]
    fn offsets_are_row_major() {
        let pm = PlaneMapper::new(10, 3, Complex::new(0.0, 0.0), Complex::new(1.0, 1.0));
        assert_eq!(pm.len(), 30);
        assert!(!pm.is_empty());
        assert_eq!(pm.offset(&Pixel(0, 0)), 0);
        assert_eq!(pm.offset(&Pixel(9, 0)), 9);
        assert_eq!(pm.offset(&Pixel(3, 2)), 23);
    }
}
