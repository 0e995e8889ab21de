use std::fs;
use std::path::Path;

use super::dpi_probe::probe_dpi;
use crate::photo::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;
use crate::shared::image_metrics::{ImageMetrics, DEFAULT_DPI};

/// Decodes JPEG/PNG/TIFF files with the `image` crate.
///
/// The file is read into memory once; the handle is closed before decoding.
/// Resolution comes from the container headers, defaulting to 72 DPI.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<(Frame, ImageMetrics), Box<dyn std::error::Error>> {
        let bytes = fs::read(path)?;

        let dpi = probe_dpi(&bytes).unwrap_or_else(|| {
            log::warn!(
                "No resolution metadata in {}, assuming {DEFAULT_DPI:?} DPI",
                path.display()
            );
            DEFAULT_DPI
        });

        let rgb = image::load_from_memory(&bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let metrics = ImageMetrics::new(dpi, width, height)?;
        let frame = Frame::new(rgb.into_raw(), width, height, 3);

        Ok((frame, metrics))
    }
}
