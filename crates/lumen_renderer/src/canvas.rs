//! Output pixel buffer and color quantization.

use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};
use lumen_math::{Color, Interval};

/// Opaque black.
pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Clamp every channel to `[0, 1]`. NaN channels become 0.
pub fn clip(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Map a clipped channel to 8 bits with `floor(c · 255)`.
#[inline]
pub fn quantize(channel: f64) -> u8 {
    (channel * 255.0).floor() as u8
}

/// Convert a color to opaque 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = clip(color);
    [quantize(c.x), quantize(c.y), quantize(c.z), 255]
}

/// A single pixel write produced while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    /// Generation order of the sample that produced this write
    pub sequence: u64,
    pub x: u32,
    pub y: u32,
    pub rgba: [u8; 4],
}

/// RGBA8 image buffer, initialised to opaque black.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y), or `None` outside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y). Writes outside the canvas are dropped.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = rgba;
        }
    }

    pub fn apply(&mut self, write: &PixelWrite) {
        self.set(write.x, write.y, write.rgba);
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Raw RGBA bytes in row-major order.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixels[y as usize * self.width as usize + x as usize])
        })
    }

    /// Encode the canvas to `path`; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_image().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_clip_bounds_and_idempotence() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let color = Color::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let clipped = clip(color);

            assert_eq!(clip(clipped), clipped);
            for channel in clipped.to_array() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn test_clip_non_finite() {
        let clipped = clip(Color::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY));
        assert_eq!(clipped, Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(0.5), 127);
        assert_eq!(color_to_rgba(Color::new(2.0, -1.0, 0.5)), [255, 0, 127, 255]);
    }

    #[test]
    fn test_canvas_starts_black() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.get(3, 2), Some(BACKGROUND));
        assert_eq!(canvas.to_rgba().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_canvas_drops_out_of_range_writes() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(2, 0, [255; 4]);
        canvas.set(0, 5, [255; 4]);

        assert_eq!(canvas.get(2, 0), None);
        assert!(canvas.to_rgba().chunks(4).all(|px| px == BACKGROUND));
    }

    #[test]
    fn test_to_image_layout() {
        let mut canvas = Canvas::new(3, 2);
        canvas.apply(&PixelWrite {
            sequence: 0,
            x: 2,
            y: 1,
            rgba: [10, 20, 30, 255],
        });

        let image = canvas.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [10, 20, 30, 255]);
        assert_eq!(image.get_pixel(0, 0).0, BACKGROUND);
        assert_eq!(&canvas.to_rgba()[20..24], &[10, 20, 30, 255]);
    }
}
