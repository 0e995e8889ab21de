/// 68-point landmark regressor using ONNX Runtime via `ort`.
///
/// Model contract: input `[1, 3, S, S]` RGB in `[0, 1]` showing a square
/// patch around one face; output 136 values `x0, y0, …, x67, y67`
/// normalised to that patch.
use std::path::Path;

use super::onnx_session::{declared_input_size, load_session};
use crate::detection::domain::face_box::{FaceBox, LandmarkRegressor};
use crate::detection::domain::landmark_set::NUM_LANDMARKS;
use crate::shared::frame::Frame;
use crate::shared::point::Point2D;

/// Fallback input resolution when the model's input shape is dynamic.
const DEFAULT_INPUT_SIZE: u32 = 112;

/// Patch side relative to the larger face box side. Detector boxes hug the
/// face tightly and can clip the chin.
pub const LANDMARK_CROP_EXPANSION: f64 = 1.2;

pub struct OnnxLandmarkRegressor {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxLandmarkRegressor {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        let input_size = declared_input_size(&session).unwrap_or(DEFAULT_INPUT_SIZE);
        Ok(Self {
            session,
            input_size,
        })
    }
}

impl LandmarkRegressor for OnnxLandmarkRegressor {
    fn regress(
        &mut self,
        frame: &Frame,
        face: &FaceBox,
    ) -> Result<Vec<Point2D>, Box<dyn std::error::Error>> {
        let patch = FacePatch::around(face);
        let input_tensor = sample_patch(frame, &patch, self.input_size);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("Landmark model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let values = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        decode_points(values, &patch)
    }
}

/// Square region of the frame fed to the regressor.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FacePatch {
    x: f64,
    y: f64,
    side: f64,
}

impl FacePatch {
    fn around(face: &FaceBox) -> Self {
        let center = face.center();
        let side = face.width().max(face.height()) * LANDMARK_CROP_EXPANSION;
        Self {
            x: center.x - side / 2.0,
            y: center.y - side / 2.0,
            side,
        }
    }
}

/// Nearest-neighbour resample of the patch into an NCHW tensor. Samples
/// outside the frame repeat the nearest edge pixel.
fn sample_patch(frame: &Frame, patch: &FacePatch, size: u32) -> ndarray::Array4<f32> {
    let n = size as usize;
    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, n, n));
    let src = frame.as_ndarray();
    let max_x = frame.width() as f64 - 1.0;
    let max_y = frame.height() as f64 - 1.0;
    let step = patch.side / size as f64;

    for ty in 0..n {
        let sy = (patch.y + (ty as f64 + 0.5) * step).clamp(0.0, max_y) as usize;
        for tx in 0..n {
            let sx = (patch.x + (tx as f64 + 0.5) * step).clamp(0.0, max_x) as usize;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[sy, sx, c]] as f32 / 255.0;
            }
        }
    }
    tensor
}

fn decode_points(
    values: &[f32],
    patch: &FacePatch,
) -> Result<Vec<Point2D>, Box<dyn std::error::Error>> {
    if values.len() != NUM_LANDMARKS * 2 {
        return Err(format!(
            "Landmark model returned {} values, expected {}",
            values.len(),
            NUM_LANDMARKS * 2
        )
        .into());
    }
    Ok(values
        .chunks_exact(2)
        .map(|xy| {
            Point2D::new(
                patch.x + xy[0] as f64 * patch.side,
                patch.y + xy[1] as f64 * patch.side,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn face_box(x1: f64, y1: f64, x2: f64, y2: f64) -> FaceBox {
        FaceBox {
            x1,
            y1,
            x2,
            y2,
            confidence: 1.0,
        }
    }

    #[test]
    fn test_patch_is_expanded_square_on_box_center() {
        let patch = FacePatch::around(&face_box(100.0, 50.0, 180.0, 150.0));
        // larger side 100 → 120, centred on (140, 100)
        assert_relative_eq!(patch.side, 120.0);
        assert_relative_eq!(patch.x, 80.0);
        assert_relative_eq!(patch.y, 40.0);
    }

    #[test]
    fn test_sample_patch_shape_and_values() {
        let frame = Frame::new(vec![255u8; 20 * 10 * 3], 20, 10, 3);
        let patch = FacePatch {
            x: 0.0,
            y: 0.0,
            side: 10.0,
        };
        let tensor = sample_patch(&frame, &patch, 4);
        assert_eq!(tensor.shape(), &[1, 3, 4, 4]);
        assert!(tensor.iter().all(|v| (*v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_sample_patch_clamps_outside_frame() {
        // Left half dark, right half bright; patch hangs off the left edge
        let mut data = Vec::new();
        for _ in 0..4 {
            data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 255, 255, 255, 255, 255, 255]);
        }
        let frame = Frame::new(data, 4, 4, 3);
        let patch = FacePatch {
            x: -8.0,
            y: 0.0,
            side: 4.0,
        };
        let tensor = sample_patch(&frame, &patch, 2);
        assert!(tensor.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_decode_points_maps_to_frame() {
        let patch = FacePatch {
            x: 80.0,
            y: 40.0,
            side: 120.0,
        };
        let mut values = vec![0.0f32; NUM_LANDMARKS * 2];
        values[0] = 0.5;
        values[1] = 0.25;
        values[135] = 1.0;
        let points = decode_points(&values, &patch).unwrap();
        assert_eq!(points.len(), NUM_LANDMARKS);
        assert_eq!(points[0], Point2D::new(140.0, 70.0));
        assert_eq!(points[67], Point2D::new(80.0, 160.0));
    }

    #[test]
    fn test_decode_points_wrong_length() {
        let patch = FacePatch {
            x: 0.0,
            y: 0.0,
            side: 1.0,
        };
        assert!(decode_points(&[0.0; 10], &patch).is_err());
    }
}
