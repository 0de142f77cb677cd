//! Image-plane sampling.
//!
//! Samples sit at half-integer offsets `(i + 0.5) / N` of a normalized
//! `N × N` grid. The index `i` runs along `u` in the outer loop and `j`
//! along `v` in the inner loop.

use lumen_core::ImagePlane;
use lumen_math::Point3;

/// Bilinear blend of the image-plane corners:
/// `u·(v·LL + (1−v)·UL) + (1−u)·(v·LR + (1−v)·UR)`.
pub fn image_plane_point(plane: &ImagePlane, u: f64, v: f64) -> Point3 {
    let left = plane.lower_left * v + plane.upper_left * (1.0 - v);
    let right = plane.lower_right * v + plane.upper_right * (1.0 - v);
    left * u + right * (1.0 - u)
}

/// One primary-ray sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Index along `u`
    pub i: u32,
    /// Index along `v`
    pub j: u32,
    /// World-space point on the image plane
    pub point: Point3,
}

impl Sample {
    /// Position of this sample in generation order.
    pub fn sequence(&self, resolution: u32) -> u64 {
        self.i as u64 * resolution as u64 + self.j as u64
    }
}

/// The sample at grid index `(i, j)`.
pub fn sample_at(plane: &ImagePlane, resolution: u32, i: u32, j: u32) -> Sample {
    let n = resolution as f64;
    let u = (i as f64 + 0.5) / n;
    let v = (j as f64 + 0.5) / n;
    Sample {
        i,
        j,
        point: image_plane_point(plane, u, v),
    }
}

/// Lazy, finite sequence of every sample of the grid, in generation order.
#[derive(Debug, Clone)]
pub struct SampleGrid {
    plane: ImagePlane,
    resolution: u32,
    next: u64,
}

impl SampleGrid {
    pub fn new(plane: ImagePlane, resolution: u32) -> Self {
        Self {
            plane,
            resolution,
            next: 0,
        }
    }

    fn total(&self) -> u64 {
        self.resolution as u64 * self.resolution as u64
    }
}

impl Iterator for SampleGrid {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.next >= self.total() {
            return None;
        }

        let n = self.resolution as u64;
        let i = (self.next / n) as u32;
        let j = (self.next % n) as u32;
        self.next += 1;

        Some(sample_at(&self.plane, self.resolution, i, j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total() - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleGrid {}

/// Pixel written for an image-plane point: `(x + width/2, −y + height/2)`,
/// truncated toward zero. Points outside the canvas give `None`.
pub fn pixel_coords(point: Point3, width: u32, height: u32) -> Option<(u32, u32)> {
    let x = (point.x + (width / 2) as f64).trunc();
    let y = (-point.y + (height / 2) as f64).trunc();

    let inside = x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64;
    inside.then_some((x as u32, y as u32))
}
