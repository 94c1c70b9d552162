//! Plain-text PPM (P3) image output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::renderer::ImageBuffer;

/// Write `image` as P3: magic, dimensions, max value, then one
/// `r g b` line per pixel in row-major order.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.to_rgb8() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }
    Ok(())
}

/// Write `image` to a PPM file, replacing any existing file.
pub fn save_ppm(path: impl AsRef<Path>, image: &ImageBuffer) -> io::Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(&mut writer, image)?;
    writer.flush()?;
    log::info!(
        "Wrote {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}
