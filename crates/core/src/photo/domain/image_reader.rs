use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::image_metrics::ImageMetrics;

/// Loads a photo together with its size and resolution.
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<(Frame, ImageMetrics), Box<dyn std::error::Error>>;
}
