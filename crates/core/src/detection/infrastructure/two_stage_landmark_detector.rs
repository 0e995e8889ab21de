use std::path::Path;

use super::onnx_face_box_detector::OnnxFaceBoxDetector;
use super::onnx_landmark_regressor::OnnxLandmarkRegressor;
use crate::detection::domain::face_box::{FaceBoxDetector, LandmarkRegressor};
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Box detection followed by per-face landmark regression.
///
/// Output order follows the box detector (most confident first).
pub struct TwoStageLandmarkDetector {
    faces: Box<dyn FaceBoxDetector>,
    regressor: Box<dyn LandmarkRegressor>,
}

impl TwoStageLandmarkDetector {
    pub fn new(faces: Box<dyn FaceBoxDetector>, regressor: Box<dyn LandmarkRegressor>) -> Self {
        Self { faces, regressor }
    }

    /// ONNX-backed detector from a YOLO face model and a 68-point regressor.
    pub fn from_models(
        face_model: &Path,
        landmark_model: &Path,
        confidence: f64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(
            Box::new(OnnxFaceBoxDetector::new(face_model, confidence)?),
            Box::new(OnnxLandmarkRegressor::new(landmark_model)?),
        ))
    }
}

impl LandmarkDetector for TwoStageLandmarkDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>> {
        let boxes = self.faces.detect(frame)?;
        let mut sets = Vec::with_capacity(boxes.len());
        for face in &boxes {
            let points = self.regressor.regress(frame, face)?;
            sets.push(LandmarkSet::from_68_points(&points)?);
        }
        Ok(sets)
    }
}
