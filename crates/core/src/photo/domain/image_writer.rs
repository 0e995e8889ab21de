use std::path::Path;

use crate::shared::frame::Frame;

/// Writes a single frame to an image file.
pub trait ImageWriter: Send {
    /// Writes a frame to the given path, recording `dpi` as the image's
    /// resolution when the output format supports it. The stored value is
    /// quantised to what the format can hold, e.g. whole dots per inch in
    /// JPEG.
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        dpi: Option<(f64, f64)>,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
