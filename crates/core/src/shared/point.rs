/// A 2D image coordinate: origin top-left, y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tuple() {
        let p: Point2D = (3.5, -2.0).into();
        assert_eq!(p, Point2D::new(3.5, -2.0));
    }

    #[test]
    fn test_default_is_origin() {
        assert_eq!(Point2D::default(), Point2D::new(0.0, 0.0));
    }
}
