//! Textures map surface coordinates to a color.
//!
//! Materials query a texture at every scattering event with the hit's
//! `(u, v)` parameters and world-space point; geometry never does.

use std::path::Path;
use std::sync::Arc;

use glint_math::{Interval, Vec3};
use rand::RngCore;

use crate::perlin::DEFAULT_TURBULENCE_DEPTH;
use crate::{Color, ImageData, Perlin};

/// Color returned by image textures without data.
const DEBUG_CYAN: Color = Color::new(0.0, 1.0, 1.0);

/// A color field over surface parameters and position.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color;
}

/// A texture with a constant uniform color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        self.color
    }
}

/// Solid 3-D checker pattern alternating between two textures.
///
/// Cell parity is taken from the point's position, not its `(u, v)`.
pub struct CheckerTexture {
    inv_scale: f32,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    /// `scale` is the edge length of one checker cell.
    pub fn new(scale: f32, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    pub fn from_colors(scale: f32, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let sum = cell.x as i64 + cell.y as i64 + cell.z as i64;

        if sum.rem_euclid(2) == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}

/// Nearest-pixel lookup into an RGB image.
pub struct ImageTexture {
    image: ImageData,
}

impl ImageTexture {
    pub fn new(image: ImageData) -> Self {
        Self { image }
    }

    /// Load the image at `path`; on failure the texture renders cyan.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match ImageData::load(path) {
            Ok(image) => Self::new(image),
            Err(err) => {
                log::warn!("Could not load texture {}: {}", path.display(), err);
                Self::new(ImageData::empty())
            }
        }
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Vec3) -> Color {
        if self.image.height() == 0 {
            return DEBUG_CYAN;
        }

        // Flip v: image rows run top to bottom
        let unit = Interval::new(0.0, 1.0);
        let u = unit.clamp(u);
        let v = 1.0 - unit.clamp(v);

        let i = (u * self.image.width() as f32) as u32;
        let j = (v * self.image.height() as f32) as u32;
        let [r, g, b] = self.image.pixel_data(i, j);

        Color::new(r as f32, g as f32, b as f32) / 255.0
    }
}

/// Marble-like pattern driven by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
    color: Color,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self::with_color(scale, Color::ONE, rng)
    }

    pub fn with_color(scale: f32, color: Color, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
            color,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3) -> Color {
        let s = self.scale * p;
        let phase = s.z + 10.0 * self.noise.turb(s, DEFAULT_TURBULENCE_DEPTH);
        self.color * 0.5 * (1.0 + phase.sin())
    }
}
