//! Byte-addressed RGB images for texture lookup.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur during texture image loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image has no pixels: {0}")]
    EmptyImage(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Returned for lookups into an image with no data.
const MISSING_PIXEL: [u8; 3] = [255, 0, 255];

/// An 8-bit RGB image.
///
/// An image that failed to load is represented by [`ImageData::empty`], which
/// reports zero dimensions so textures can substitute a debug color.
#[derive(Clone, Debug, Default)]
pub struct ImageData {
    width: u32,
    height: u32,
    /// Row-major, top row first
    pixels: Vec<[u8; 3]>,
}

impl ImageData {
    /// Decode an image file into RGB bytes.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let rgb = image::load_from_memory(&bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        if width == 0 || height == 0 {
            return Err(TextureError::EmptyImage(path.display().to_string()));
        }

        let pixels = rgb.pixels().map(|p| p.0).collect();

        log::debug!("Loaded image: {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from raw row-major pixels.
    ///
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image with no data.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// RGB bytes of pixel (x, y); coordinates are clamped to the image.
    pub fn pixel_data(&self, x: u32, y: u32) -> [u8; 3] {
        if self.is_empty() {
            return MISSING_PIXEL;
        }
        let x = x.min(self.width - 1) as usize;
        let y = y.min(self.height - 1) as usize;
        self.pixels[y * self.width as usize + x]
    }
}
