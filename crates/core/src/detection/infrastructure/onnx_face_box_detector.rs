/// YOLO face detector using ONNX Runtime via `ort`.
///
/// Handles letterbox preprocessing, inference and NMS post-processing. Only
/// the boxes are used; the model's 5 pose keypoints are too coarse for
/// cropping and are left to the landmark regressor.
use std::path::Path;

use super::math::nms;
use super::onnx_session::{declared_input_size, load_session};
use crate::detection::domain::face_box::{FaceBox, FaceBoxDetector};
use crate::shared::frame::Frame;

/// Fallback YOLO model input resolution when the model doesn't specify dimensions.
const DEFAULT_INPUT_SIZE: u32 = 640;

/// Default confidence threshold for face detection.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.45;

/// YOLO letterbox padding value.
const PAD_GRAY: f32 = 114.0 / 255.0;

/// YOLO face detector backed by an ONNX Runtime session.
pub struct OnnxFaceBoxDetector {
    session: ort::session::Session,
    confidence: f64,
    input_size: u32,
}

impl OnnxFaceBoxDetector {
    /// Load a YOLO ONNX model and prepare for inference.
    ///
    /// The input resolution is read from the model's input shape (expecting NCHW).
    /// Falls back to 640 if the shape is dynamic or unreadable.
    pub fn new(model_path: &Path, confidence: f64) -> Result<Self, Box<dyn std::error::Error>> {
        let session = load_session(model_path)?;
        let input_size = declared_input_size(&session).unwrap_or(DEFAULT_INPUT_SIZE);
        Ok(Self {
            session,
            confidence,
            input_size,
        })
    }
}

impl FaceBoxDetector for OnnxFaceBoxDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        let (input_tensor, letterbox) = letterbox(frame, self.input_size);

        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("YOLO model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape().to_vec();
        let data = tensor.as_slice().ok_or("Cannot get tensor slice")?;

        let boxes = parse_detections(data, &shape, self.confidence, &letterbox)?;
        let boxes = nms(boxes, NMS_IOU_THRESH);
        log::debug!("YOLO found {} face(s)", boxes.len());
        Ok(boxes)
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Mapping between letterboxed model coordinates and frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Letterbox {
    scale: f64,
    pad_x: u32,
    pad_y: u32,
}

impl Letterbox {
    fn to_frame(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.pad_x as f64) / self.scale,
            (y - self.pad_y as f64) / self.scale,
        )
    }
}

/// Letterbox-resize a frame to `target_size` × `target_size`, NCHW float32.
fn letterbox(frame: &Frame, target_size: u32) -> (ndarray::Array4<f32>, Letterbox) {
    let fw = frame.width() as f64;
    let fh = frame.height() as f64;
    let target = target_size as f64;

    let scale = (target / fw).min(target / fh);
    let new_w = ((fw * scale).round() as u32).min(target_size);
    let new_h = ((fh * scale).round() as u32).min(target_size);
    let pad_x = (target_size - new_w) / 2;
    let pad_y = (target_size - new_h) / 2;

    let mut tensor = ndarray::Array4::<f32>::from_elem(
        (1, 3, target_size as usize, target_size as usize),
        PAD_GRAY,
    );

    let src = frame.as_ndarray(); // [H, W, C] u8
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;

    // Nearest-neighbor resize + copy into padded region
    for y in 0..new_h as usize {
        let src_y = ((y as f64 / scale) as usize).min(src_h - 1);
        for x in 0..new_w as usize {
            let src_x = ((x as f64 / scale) as usize).min(src_w - 1);
            let ty = pad_y as usize + y;
            let tx = pad_x as usize + x;
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }

    (
        tensor,
        Letterbox {
            scale,
            pad_x,
            pad_y,
        },
    )
}

// ---------------------------------------------------------------------------
// Postprocessing
// ---------------------------------------------------------------------------

/// Decode raw YOLO output rows `[cx, cy, w, h, conf, ...keypoints]`.
///
/// The output is either `[1, features, detections]` (transposed, the usual
/// export) or `[1, detections, features]`.
fn parse_detections(
    data: &[f32],
    shape: &[usize],
    confidence: f64,
    letterbox: &Letterbox,
) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
    if shape.len() != 3 {
        return Err(format!("Unexpected YOLO output shape: {shape:?}").into());
    }
    let transposed = shape[1] < shape[2];
    let (num_dets, num_feats) = if transposed {
        (shape[2], shape[1])
    } else {
        (shape[1], shape[2])
    };
    if num_feats < 5 || data.len() < num_dets * num_feats {
        return Err(format!("YOLO output too small for shape {shape:?}").into());
    }

    let value = |det: usize, feat: usize| -> f64 {
        if transposed {
            data[feat * num_dets + det] as f64
        } else {
            data[det * num_feats + feat] as f64
        }
    };

    let mut boxes = Vec::new();
    for i in 0..num_dets {
        let conf = value(i, 4);
        if conf < confidence {
            continue;
        }
        let (cx, cy, w, h) = (value(i, 0), value(i, 1), value(i, 2), value(i, 3));
        let (x1, y1) = letterbox.to_frame(cx - w / 2.0, cy - h / 2.0);
        let (x2, y2) = letterbox.to_frame(cx + w / 2.0, cy + h / 2.0);
        boxes.push(FaceBox {
            x1,
            y1,
            x2,
            y2,
            confidence: conf,
        });
    }
    Ok(boxes)
}
