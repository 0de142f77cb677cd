//! Bucket-based tile rendering.
//!
//! Divides the sample grid into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. A bucket covers sample
//! indices, not pixels: `x` runs along the `i` (u) axis and `y` along the
//! `j` (v) axis.

use crate::canvas::PixelWrite;
use crate::renderer::render_sample;
use crate::sampler::sample_at;
use crate::tracer::Tracer;
use crate::RenderConfig;

/// A rectangular region of the sample grid.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// First `i` index covered
    pub x: u32,
    /// First `j` index covered
    pub y: u32,
    /// Number of `i` indices
    pub width: u32,
    /// Number of `j` indices
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    /// Get the total number of samples in this bucket.
    pub fn sample_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in samples per side.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for a grid, sorted in spiral order from center.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x += bucket_size;
        }
        y += bucket_size;
    }

    // Sort by distance from center (spiral order)
    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the grid center.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    buckets.sort_by(|a, b| {
        let a_center_x = a.x as f32 + a.width as f32 / 2.0;
        let a_center_y = a.y as f32 + a.height as f32 / 2.0;
        let b_center_x = b.x as f32 + b.width as f32 / 2.0;
        let b_center_y = b.y as f32 + b.height as f32 / 2.0;

        let a_dist = (a_center_x - center_x).powi(2) + (a_center_y - center_y).powi(2);
        let b_dist = (b_center_x - center_x).powi(2) + (b_center_y - center_y).powi(2);

        a_dist.partial_cmp(&b_dist).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel writes in sample order
    pub writes: Vec<PixelWrite>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, writes: Vec<PixelWrite>) -> Self {
        Self { bucket, writes }
    }
}

/// Render every sample of a bucket.
///
/// Samples that land outside the canvas produce no write.
pub fn render_bucket(bucket: &Bucket, tracer: &Tracer<'_>, config: &RenderConfig) -> BucketResult {
    let scene = tracer.scene();
    let resolution = scene.resolution;
    let mut writes = Vec::new();

    for i in bucket.x..bucket.x + bucket.width {
        for j in bucket.y..bucket.y + bucket.height {
            let sample = sample_at(&scene.camera, resolution, i, j);
            if let Some(write) = render_sample(tracer, &sample, config.max_depth) {
                writes.push(write);
            }
        }
    }

    log::debug!(
        "Bucket {} at ({}, {}) done: {} writes",
        bucket.index,
        bucket.x,
        bucket.y,
        writes.len()
    );

    BucketResult::new(*bucket, writes)
}
