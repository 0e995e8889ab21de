use std::fmt;

/// Named facial feature outlined by a landmark group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacialFeature {
    Chin,
    LeftEyebrow,
    RightEyebrow,
    NoseBridge,
    NoseTip,
    LeftEye,
    RightEye,
    TopLip,
    BottomLip,
}

impl FacialFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacialFeature::Chin => "chin",
            FacialFeature::LeftEyebrow => "left_eyebrow",
            FacialFeature::RightEyebrow => "right_eyebrow",
            FacialFeature::NoseBridge => "nose_bridge",
            FacialFeature::NoseTip => "nose_tip",
            FacialFeature::LeftEye => "left_eye",
            FacialFeature::RightEye => "right_eye",
            FacialFeature::TopLip => "top_lip",
            FacialFeature::BottomLip => "bottom_lip",
        }
    }
}

impl fmt::Display for FacialFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
