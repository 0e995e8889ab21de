use std::path::PathBuf;

use thiserror::Error;

use crate::cropping::domain::geometry_error::GeometryError;
use crate::shared::model_resolver::ModelResolveError;

/// Failures of the passport photo pipeline. None are retried: every step is
/// deterministic for a given input.
#[derive(Error, Debug)]
pub enum PassportPhotoError {
    #[error("required model {model} is unavailable: {source}")]
    DependencyMissing {
        model: String,
        #[source]
        source: ModelResolveError,
    },
    #[error("no face detected in {}", .0.display())]
    NoFaceDetected(PathBuf),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("invalid image {}: {reason}", .path.display())]
    InvalidImage { path: PathBuf, reason: String },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error>,
    },
    #[error("face detection failed: {0}")]
    Detect(#[source] Box<dyn std::error::Error>),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error>,
    },
}

impl PassportPhotoError {
    pub fn dependency_missing(model: &str, source: ModelResolveError) -> Self {
        Self::DependencyMissing {
            model: model.to_string(),
            source,
        }
    }

    /// Missing models get their own exit path with install guidance.
    pub fn is_dependency_missing(&self) -> bool {
        matches!(self, Self::DependencyMissing { .. })
    }
}
