use thiserror::Error;

use crate::detection::domain::facial_feature::FacialFeature;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("landmark group '{0}' is missing or empty")]
    MissingLandmark(FacialFeature),
    #[error("nose bridge center must be finite, got ({x}, {y})")]
    NonFiniteNoseCenter { x: f64, y: f64 },
    #[error("face height must be positive, got {face_height}")]
    DegenerateGeometry { face_height: f64 },
    #[error("crop rectangle is empty: left={left}, top={top}, right={right}, bottom={bottom}")]
    EmptyCrop {
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    },
}
