pub const DEFAULT_MAGNITUDE: f64 = 2.5;
pub const DEFAULT_BIAS: f64 = 1.1;

/// How large the crop is relative to the detected face, and how far it is
/// pushed downward.
///
/// `magnitude` multiplies the face height to get the crop height. A `bias`
/// above 1.0 shifts the crop down by `(bias - 1) * face_height / 2`, leaving
/// more room above the eyes for the forehead and hair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalingFactor {
    pub magnitude: f64,
    pub bias: f64,
}

impl ScalingFactor {
    pub fn new(magnitude: f64, bias: f64) -> Self {
        Self { magnitude, bias }
    }
}

impl Default for ScalingFactor {
    fn default() -> Self {
        Self::new(DEFAULT_MAGNITUDE, DEFAULT_BIAS)
    }
}
