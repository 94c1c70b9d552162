//! Glint Core - surface color sources for the path tracer.
//!
//! This crate provides:
//!
//! - **Textures**: `SolidColor`, `CheckerTexture`, `ImageTexture`, `NoiseTexture`
//! - **Image loading**: `ImageData`, a byte-addressed RGB image
//! - **Noise**: `Perlin`, a gradient noise field with turbulence
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{CheckerTexture, Texture};
//!
//! let checker = CheckerTexture::from_colors(0.32, Color::new(0.2, 0.3, 0.1), Color::splat(0.9));
//! let c = checker.value(0.0, 0.0, Vec3::new(0.1, 0.0, 0.0));
//! ```

pub mod image_data;
pub mod perlin;
pub mod texture;

use glint_math::Vec3;

/// Color type alias (linear RGB, typically 0-1 per channel)
pub type Color = Vec3;

// Re-export commonly used types
pub use image_data::{ImageData, TextureError, TextureResult};
pub use perlin::Perlin;
pub use texture::{CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
