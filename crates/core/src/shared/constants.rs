pub const FACE_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// 68-point landmark regressor. Not redistributed; users install it into
/// the model cache directory or pass `--models-dir`.
pub const LANDMARK_MODEL_NAME: &str = "face_landmarks_68.onnx";

pub const DEFAULT_OUTPUT_FILENAME: &str = "proportional_passport_photo.jpg";

/// 35mm × 45mm passport format (width / height).
pub const PASSPORT_ASPECT_RATIO: f64 = 35.0 / 45.0;

/// Matches the encoder default of common imaging libraries.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif"];
