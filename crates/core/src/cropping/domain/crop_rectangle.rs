use super::geometry_error::GeometryError;

/// Axis-aligned crop in image coordinates, edges as fractional pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRectangle {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Integer pixel block selected by a [`CropRectangle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRectangle {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Truncates each edge toward zero.
    ///
    /// Fails when truncation collapses the rectangle to zero width or height.
    pub fn to_pixel_bounds(&self) -> Result<PixelBounds, GeometryError> {
        let left = self.left as u32;
        let top = self.top as u32;
        let right = self.right as u32;
        let bottom = self.bottom as u32;

        if right <= left || bottom <= top {
            return Err(self.empty_error());
        }
        Ok(PixelBounds {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }

    pub(crate) fn empty_error(&self) -> GeometryError {
        GeometryError::EmptyCrop {
            left: self.left,
            top: self.top,
            right: self.right,
            bottom: self.bottom,
        }
    }
}
