use crate::shared::frame::Frame;
use crate::shared::point::Point2D;

/// Face bounding box in frame coordinates, corners as `(x1, y1)`-`(x2, y2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub confidence: f64,
}

impl FaceBox {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point2D {
        Point2D::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// First detection stage: where are the faces?
///
/// Boxes are returned most confident first.
pub trait FaceBoxDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}

/// Second detection stage: 68 landmark points for one face, in frame
/// coordinates, in iBUG 300-W order.
pub trait LandmarkRegressor: Send {
    fn regress(
        &mut self,
        frame: &Frame,
        face: &FaceBox,
    ) -> Result<Vec<Point2D>, Box<dyn std::error::Error>>;
}
