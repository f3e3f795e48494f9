//! Plain-text PPM (P3) output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{ImageBuffer, RenderResult};

/// Write `image` as a P3 PPM: magic, dimensions, max value, then one
/// `r g b` line per pixel in raster order.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> RenderResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.to_rgb8() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Save `image` to `path` as a P3 PPM.
pub fn save_ppm(image: &ImageBuffer, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_ppm(image, &mut writer)?;
    writer.flush()?;

    log::debug!("Wrote {}x{} PPM to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_write_ppm_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::new(1.0, 0.25, 0.0));
        image.set(1, 0, Color::ZERO);

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 128 0\n0 0 0\n");
    }

    #[test]
    fn test_write_ppm_line_count() {
        let image = ImageBuffer::new(4, 3);
        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3 + 12);
    }

    #[test]
    fn test_save_ppm_to_missing_dir_is_io_error() {
        let image = ImageBuffer::new(1, 1);
        let path = std::env::temp_dir()
            .join("glint-no-such-dir")
            .join("nested")
            .join("out.ppm");

        assert!(matches!(
            save_ppm(&image, &path),
            Err(crate::RenderError::Io(_))
        ));
    }
}
