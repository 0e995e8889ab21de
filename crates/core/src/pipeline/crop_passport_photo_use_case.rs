use std::path::Path;

use crate::cropping::domain::crop_rectangle::{CropRectangle, PixelBounds};
use crate::cropping::domain::crop_rectangle_calculator::CropRectangleCalculator;
use crate::cropping::domain::landmark_geometry_resolver::LandmarkGeometryResolver;
use crate::detection::domain::facial_feature::FacialFeature;
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::photo::domain::image_reader::ImageReader;
use crate::photo::domain::image_writer::ImageWriter;
use crate::shared::image_metrics::ImageMetrics;

use super::passport_photo_error::PassportPhotoError;

/// What was produced for one photo.
#[derive(Clone, Debug, PartialEq)]
pub struct PassportPhoto {
    pub original: ImageMetrics,
    pub cropped: ImageMetrics,
    pub crop: CropRectangle,
    pub pixel_bounds: PixelBounds,
    /// Landmark groups reported for the chosen face.
    pub features: Vec<FacialFeature>,
}

/// Single-photo pipeline: read → detect → resolve → crop → rescale DPI → write.
///
/// When several faces are detected the first (most confident) one is used.
pub struct CropPassportPhotoUseCase {
    reader: Box<dyn ImageReader>,
    detector: Box<dyn LandmarkDetector>,
    writer: Box<dyn ImageWriter>,
    resolver: LandmarkGeometryResolver,
    calculator: CropRectangleCalculator,
}

impl CropPassportPhotoUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        detector: Box<dyn LandmarkDetector>,
        writer: Box<dyn ImageWriter>,
        calculator: CropRectangleCalculator,
    ) -> Self {
        Self {
            reader,
            detector,
            writer,
            resolver: LandmarkGeometryResolver::new(),
            calculator,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<PassportPhoto, PassportPhotoError> {
        let (frame, original) =
            self.reader
                .read(input_path)
                .map_err(|source| PassportPhotoError::Read {
                    path: input_path.to_path_buf(),
                    source,
                })?;
        log::info!(
            "Original image {}x{} at {:?} DPI",
            original.width,
            original.height,
            original.dpi()
        );

        let faces = self
            .detector
            .detect(&frame)
            .map_err(PassportPhotoError::Detect)?;
        if faces.len() > 1 {
            log::info!("{} faces detected, using the first", faces.len());
        }
        let landmarks = faces
            .into_iter()
            .next()
            .ok_or_else(|| PassportPhotoError::NoFaceDetected(input_path.to_path_buf()))?;
        let features: Vec<FacialFeature> = landmarks.features().collect();
        log::info!("Face landmarks detected: {features:?}");

        let geometry = self.resolver.resolve(&landmarks)?;
        let crop = self
            .calculator
            .compute_for(&geometry, original.width, original.height)?;
        let pixel_bounds = crop.to_pixel_bounds()?;

        let cropped_frame = frame
            .crop(
                pixel_bounds.x,
                pixel_bounds.y,
                pixel_bounds.width,
                pixel_bounds.height,
            )
            .ok_or_else(|| crop.empty_error())?;
        let cropped = original
            .rescaled(cropped_frame.width(), cropped_frame.height())
            .map_err(|reason| PassportPhotoError::InvalidImage {
                path: input_path.to_path_buf(),
                reason: reason.to_string(),
            })?;

        self.writer
            .write(output_path, &cropped_frame, Some(cropped.dpi()))
            .map_err(|source| PassportPhotoError::Write {
                path: output_path.to_path_buf(),
                source,
            })?;
        log::info!(
            "Passport photo {}x{} at {:?} DPI written to {}",
            cropped.width,
            cropped.height,
            cropped.dpi(),
            output_path.display()
        );

        Ok(PassportPhoto {
            original,
            cropped,
            crop,
            pixel_bounds,
            features,
        })
    }
}
