pub mod math;
pub mod onnx_face_box_detector;
pub mod onnx_landmark_regressor;
pub mod onnx_session;
pub mod two_stage_landmark_detector;
