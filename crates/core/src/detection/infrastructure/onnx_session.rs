use std::path::Path;

use ort::session::Session;

/// Load an ONNX model into an inference session.
pub fn load_session(model_path: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::builder()?.commit_from_file(model_path)?;
    log::debug!("Loaded ONNX model {}", model_path.display());
    Ok(session)
}

/// Square NCHW input size declared by a model, if it is static.
pub fn declared_input_size(session: &Session) -> Option<u32> {
    session.inputs().first().and_then(|input| {
        if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
            // [N, C, H, W]: H and W are equal for the square inputs used here
            if shape.len() >= 4 && shape[2] > 0 {
                Some(shape[2] as u32)
            } else {
                None
            }
        } else {
            None
        }
    })
}
