//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket draws from its own seeded
//! generator, so a render is reproducible from its seed alone.

use std::time::Instant;

use rand::RngCore;
use rayon::prelude::*;

use crate::random::stream_rng;
use crate::renderer::{render_pixel, ImageBuffer};
use crate::{Camera, Hittable};
use glint_core::Color;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Squared distance from the bucket's centre to `(cx, cy)`.
    fn distance_sq_to(&self, cx: f64, cy: f64) -> f64 {
        let dx = f64::from(self.x) + f64::from(self.width) / 2.0 - cx;
        let dy = f64::from(self.y) + f64::from(self.height) / 2.0 - cy;
        dx * dx + dy * dy
    }

    /// Random stream id, fixed by the bucket's position in the image.
    fn stream_id(&self, image_width: u32) -> u64 {
        u64::from(self.y) * u64::from(image_width) + u64::from(self.x)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Tile the image into buckets, nearest to the image centre first.
///
/// Edge buckets are clipped to the image. Ties keep row-major order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let step = size as usize;

    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(step)
        .flat_map(|y| {
            (0..width)
                .step_by(step)
                .map(move |x| Bucket::new(x, y, size.min(width - x), size.min(height - y), 0))
        })
        .collect();

    let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    buckets.sort_by(|a, b| a.distance_sq_to(cx, cy).total_cmp(&b.distance_sq_to(cx, cy)));

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }
    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

/// Render the whole image across the rayon thread pool.
///
/// Output depends only on `seed`, the scene and the bucket size, never on
/// thread count or scheduling.
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    seed: u64,
    bucket_size: u32,
) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, bucket_size);

    log::info!(
        "Rendering {}x{} at {} spp, depth {}, {} buckets",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth(),
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = stream_rng(seed, bucket.stream_id(width));
            let pixels = render_bucket(bucket, camera, world, &mut rng);
            log::debug!(
                "Bucket {} at ({}, {}) done",
                bucket.index,
                bucket.x,
                bucket.y
            );
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        let bucket = &result.bucket;
        image.write_region(bucket.x, bucket.y, bucket.width, &result.pixels);
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    image
}
