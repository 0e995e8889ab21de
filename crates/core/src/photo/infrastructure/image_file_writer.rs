use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::{JpegEncoder, PixelDensity, PixelDensityUnit};

use crate::photo::domain::image_writer::ImageWriter;
use crate::shared::constants::DEFAULT_JPEG_QUALITY;
use crate::shared::frame::Frame;

/// Writes a frame with the `image` crate.
///
/// `.jpg`/`.jpeg` outputs go through the JPEG encoder directly so the
/// resolution lands in the JFIF header; any other extension is left to
/// `image`'s format inference and carries no resolution.
pub struct ImageFileWriter {
    quality: u8,
}

impl ImageFileWriter {
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// JPEG quality, 1-100.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    fn write_jpeg(
        &self,
        path: &Path,
        img: &image::RgbImage,
        dpi: Option<(f64, f64)>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let file = BufWriter::new(File::create(path)?);
        let mut encoder = JpegEncoder::new_with_quality(file, self.quality);
        if let Some((x, y)) = dpi {
            encoder.set_pixel_density(PixelDensity {
                density: (jfif_density(x), jfif_density(y)),
                unit: PixelDensityUnit::Inches,
            });
        }
        encoder.encode_image(img)?;
        Ok(())
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Density actually stored in a JPEG header for `dpi`: JFIF holds whole dots
/// per inch and 0 is not a valid density.
pub fn jfif_density(dpi: f64) -> u16 {
    dpi.round().clamp(1.0, u16::MAX as f64) as u16
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}

impl ImageWriter for ImageFileWriter {
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        dpi: Option<(f64, f64)>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;

        if is_jpeg(path) {
            self.write_jpeg(path, &img, dpi)
        } else {
            if dpi.is_some() {
                log::debug!("Resolution not recorded for {}", path.display());
            }
            img.save(path)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::infrastructure::dpi_probe::probe_dpi;

    fn make_frame(width: u32, height: u32, r: u8, g: u8, b: u8) -> Frame {
        let data = [r, g, b].repeat((width * height) as usize);
        Frame::new(data, width, height, 3)
    }

    #[test]
    fn test_write_jpeg_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        ImageFileWriter::new()
            .write(&path, &make_frame(100, 80, 50, 100, 200), None)
            .unwrap();
        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (100, 80));
    }

    #[test]
    fn test_jpeg_records_rounded_dpi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpeg");
        ImageFileWriter::new()
            .write(&path, &make_frame(20, 20, 0, 0, 0), Some((27.9, 36.0)))
            .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(probe_dpi(&bytes), Some((28.0, 36.0)));
    }

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &make_frame(50, 50, 50, 100, 200), Some((300.0, 300.0)))
            .unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 200]);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("photo.jpg");
        ImageFileWriter::new()
            .write(&path, &make_frame(8, 8, 1, 2, 3), None)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_unsupported_extension_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.unknownext");
        assert!(ImageFileWriter::new()
            .write(&path, &make_frame(8, 8, 0, 0, 0), None)
            .is_err());
    }

    #[test]
    fn test_jfif_density_clamps() {
        assert_eq!(jfif_density(0.2), 1);
        assert_eq!(jfif_density(299.6), 300);
        assert_eq!(jfif_density(1e9), u16::MAX);
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ImageFileWriter::new().with_quality(0).quality, 1);
        assert_eq!(ImageFileWriter::new().with_quality(250).quality, 100);
    }
}
