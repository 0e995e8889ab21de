//! Crop rectangle around the nose bridge, sized from the face height.
//!
//! The nominal rectangle is `face_height * magnitude` tall and
//! `height * aspect_ratio` wide, centred on the nose bridge and shifted down
//! by the scaling bias. Each edge is then clamped to the image on its own:
//! near a border the crop shrinks on that side only and no longer has the
//! requested aspect ratio.

use super::crop_rectangle::CropRectangle;
use super::geometry_error::GeometryError;
use super::landmark_geometry_resolver::FaceGeometry;
use super::scaling_factor::ScalingFactor;
use crate::shared::constants::PASSPORT_ASPECT_RATIO;
use crate::shared::point::Point2D;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRectangleCalculator {
    aspect_ratio: f64,
    scaling: ScalingFactor,
}

impl CropRectangleCalculator {
    /// `aspect_ratio` is width / height.
    pub fn new(aspect_ratio: f64, scaling: ScalingFactor) -> Self {
        Self {
            aspect_ratio,
            scaling,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn scaling(&self) -> ScalingFactor {
        self.scaling
    }

    pub fn compute(
        &self,
        nose_center: Point2D,
        face_height: f64,
        image_width: u32,
        image_height: u32,
    ) -> Result<CropRectangle, GeometryError> {
        if !(nose_center.x.is_finite() && nose_center.y.is_finite()) {
            return Err(GeometryError::NonFiniteNoseCenter {
                x: nose_center.x,
                y: nose_center.y,
            });
        }
        if !face_height.is_finite() {
            return Err(GeometryError::DegenerateGeometry { face_height });
        }

        let crop_height = face_height * self.scaling.magnitude;
        let crop_width = crop_height * self.aspect_ratio;
        let bias_adjustment = (self.scaling.bias - 1.0) * face_height * 0.5;

        let unclamped = CropRectangle {
            left: nose_center.x - crop_width / 2.0,
            top: nose_center.y - crop_height / 2.0 + bias_adjustment,
            right: nose_center.x + crop_width / 2.0,
            bottom: nose_center.y + crop_height / 2.0 + bias_adjustment,
        };
        // f64::max/min swallow NaN, so non-finite edges must be caught before clamping.
        if ![unclamped.left, unclamped.top, unclamped.right, unclamped.bottom]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(unclamped.empty_error());
        }

        let rect = CropRectangle {
            left: unclamped.left.max(0.0),
            top: unclamped.top.max(0.0),
            right: unclamped.right.min(image_width as f64),
            bottom: unclamped.bottom.min(image_height as f64),
        };
        log::debug!(
            "Crop {crop_width:.2}x{crop_height:.2} (bias {bias_adjustment:.2}) -> {rect:?}"
        );

        if rect.right <= rect.left || rect.bottom <= rect.top {
            return Err(rect.empty_error());
        }
        Ok(rect)
    }

    pub fn compute_for(
        &self,
        geometry: &FaceGeometry,
        image_width: u32,
        image_height: u32,
    ) -> Result<CropRectangle, GeometryError> {
        self.compute(
            geometry.nose_center,
            geometry.face_height,
            image_width,
            image_height,
        )
    }
}

impl Default for CropRectangleCalculator {
    fn default() -> Self {
        Self::new(PASSPORT_ASPECT_RATIO, ScalingFactor::default())
    }
}
