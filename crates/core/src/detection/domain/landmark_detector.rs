use super::landmark_set::LandmarkSet;
use crate::shared::frame::Frame;

/// Domain interface for face-landmark detection.
///
/// Returns one [`LandmarkSet`] per detected face, most confident first.
/// An empty result means no face was found. Implementations hold model
/// sessions that need exclusive access during inference, hence `&mut self`.
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>>;
}
