use crate::cropping::domain::dpi_rescaler::calculate_new_dpi;

/// Resolution assumed when a file carries no density metadata.
pub const DEFAULT_DPI: (f64, f64) = (72.0, 72.0);

/// Size and resolution of an image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageMetrics {
    pub dpi_x: f64,
    pub dpi_y: f64,
    pub width: u32,
    pub height: u32,
}

impl ImageMetrics {
    /// Fails when either dimension is zero.
    pub fn new(dpi: (f64, f64), width: u32, height: u32) -> Result<Self, &'static str> {
        if width == 0 || height == 0 {
            return Err("Image dimensions must be non-zero");
        }
        Ok(Self {
            dpi_x: dpi.0,
            dpi_y: dpi.1,
            width,
            height,
        })
    }

    pub fn dpi(&self) -> (f64, f64) {
        (self.dpi_x, self.dpi_y)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Metrics for a `width` × `height` crop of this image, keeping DPI
    /// proportional to the size change on each axis.
    pub fn rescaled(&self, width: u32, height: u32) -> Result<Self, &'static str> {
        let dpi = calculate_new_dpi(self.dpi(), self.size(), (width, height));
        Self::new(dpi, width, height)
    }
}
