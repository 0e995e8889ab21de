//! Reference points for cropping, derived from named landmark groups.
//!
//! The nose bridge anchors the crop; the span from the highest eye point to
//! the lowest chin point measures the face. The forehead is not detected, so
//! the eyes stand in for the top of the face.

use super::geometry_error::GeometryError;
use crate::detection::domain::facial_feature::FacialFeature;
use crate::detection::domain::landmark_set::LandmarkSet;
use crate::shared::point::Point2D;

/// Anchor and scale of one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceGeometry {
    pub nose_center: Point2D,
    pub face_height: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LandmarkGeometryResolver;

impl LandmarkGeometryResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, landmarks: &LandmarkSet) -> Result<FaceGeometry, GeometryError> {
        let nose_bridge = required(landmarks, FacialFeature::NoseBridge)?;
        let chin = required(landmarks, FacialFeature::Chin)?;
        let left_eye = required(landmarks, FacialFeature::LeftEye)?;
        let right_eye = required(landmarks, FacialFeature::RightEye)?;

        // Middle element, not the mean: detectors list the bridge top to tip.
        let nose_center = nose_bridge[nose_bridge.len() / 2];
        if !(nose_center.x.is_finite() && nose_center.y.is_finite()) {
            return Err(GeometryError::NonFiniteNoseCenter {
                x: nose_center.x,
                y: nose_center.y,
            });
        }

        let chin_bottom = chin.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let eye_top = left_eye
            .iter()
            .chain(right_eye)
            .map(|p| p.y)
            .fold(f64::INFINITY, f64::min);
        let face_height = chin_bottom - eye_top;

        if !(face_height.is_finite() && face_height > 0.0) {
            return Err(GeometryError::DegenerateGeometry { face_height });
        }

        log::debug!(
            "Nose bridge center ({:.1}, {:.1}), face height {face_height:.1}",
            nose_center.x,
            nose_center.y
        );
        Ok(FaceGeometry {
            nose_center,
            face_height,
        })
    }
}

fn required(landmarks: &LandmarkSet, feature: FacialFeature) -> Result<&[Point2D], GeometryError> {
    landmarks
        .points(feature)
        .filter(|pts| !pts.is_empty())
        .ok_or(GeometryError::MissingLandmark(feature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
        coords.iter().copied().map(Point2D::from).collect()
    }

    fn face() -> LandmarkSet {
        LandmarkSet::new()
            .with_feature(
                FacialFeature::NoseBridge,
                pts(&[(100.0, 120.0), (100.0, 130.0), (100.0, 140.0), (100.0, 150.0)]),
            )
            .with_feature(
                FacialFeature::Chin,
                pts(&[(60.0, 150.0), (80.0, 185.0), (100.0, 190.0), (120.0, 185.0)]),
            )
            .with_feature(FacialFeature::LeftEye, pts(&[(80.0, 112.0), (90.0, 110.0)]))
            .with_feature(FacialFeature::RightEye, pts(&[(110.0, 111.0), (120.0, 113.0)]))
    }

    #[test]
    fn test_face_height_spans_eye_top_to_chin_bottom() {
        let geometry = LandmarkGeometryResolver::new().resolve(&face()).unwrap();
        // chin max y = 190, eye min y = 110
        assert_relative_eq!(geometry.face_height, 80.0);
    }

    #[test]
    fn test_eye_top_considers_both_eyes() {
        let set = face().with_feature(FacialFeature::RightEye, pts(&[(110.0, 100.0)]));
        let geometry = LandmarkGeometryResolver::new().resolve(&set).unwrap();
        assert_relative_eq!(geometry.face_height, 90.0);
    }

    #[rstest]
    #[case::one(1, 0)]
    #[case::two(2, 1)]
    #[case::three(3, 1)]
    #[case::four(4, 2)]
    #[case::five(5, 2)]
    fn test_nose_center_is_middle_index(#[case] len: usize, #[case] expected: usize) {
        let bridge: Vec<Point2D> = (0..len)
            .map(|i| Point2D::new(i as f64, 100.0 + i as f64))
            .collect();
        let set = face().with_feature(FacialFeature::NoseBridge, bridge.clone());
        let geometry = LandmarkGeometryResolver::new().resolve(&set).unwrap();
        assert_eq!(geometry.nose_center, bridge[expected]);
    }

    #[rstest]
    #[case::chin(FacialFeature::Chin)]
    #[case::nose_bridge(FacialFeature::NoseBridge)]
    #[case::left_eye(FacialFeature::LeftEye)]
    #[case::right_eye(FacialFeature::RightEye)]
    fn test_missing_group_is_reported(#[case] feature: FacialFeature) {
        let set = face().with_feature(feature, vec![]);
        assert_eq!(
            LandmarkGeometryResolver::new().resolve(&set),
            Err(GeometryError::MissingLandmark(feature))
        );
    }

    #[test]
    fn test_unused_groups_are_optional() {
        let set = face().with_feature(FacialFeature::TopLip, vec![]);
        assert!(LandmarkGeometryResolver::new().resolve(&set).is_ok());
    }

    #[rstest]
    #[case::chin_above_eyes(50.0)]
    #[case::chin_level_with_eyes(110.0)]
    fn test_non_positive_height_is_degenerate(#[case] chin_y: f64) {
        let set = face().with_feature(FacialFeature::Chin, pts(&[(100.0, chin_y)]));
        let err = LandmarkGeometryResolver::new().resolve(&set).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateGeometry { face_height } if face_height <= 0.0));
    }

    #[test]
    fn test_nan_coordinates_are_degenerate() {
        let set = face().with_feature(FacialFeature::LeftEye, pts(&[(80.0, f64::NAN)]));
        // f64::min ignores NaN, so poison both eyes
        let set = set.with_feature(FacialFeature::RightEye, pts(&[(80.0, f64::NAN)]));
        let err = LandmarkGeometryResolver::new().resolve(&set).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_nan_nose_center_is_rejected() {
        let set = face().with_feature(
            FacialFeature::NoseBridge,
            pts(&[(100.0, 120.0), (f64::NAN, 130.0), (100.0, 140.0)]),
        );
        let err = LandmarkGeometryResolver::new().resolve(&set).unwrap_err();
        assert!(matches!(err, GeometryError::NonFiniteNoseCenter { .. }));
    }

    #[test]
    fn test_nan_outside_middle_of_bridge_is_ignored() {
        let set = face().with_feature(
            FacialFeature::NoseBridge,
            pts(&[(f64::NAN, 120.0), (100.0, 130.0), (100.0, 140.0)]),
        );
        let geometry = LandmarkGeometryResolver::new().resolve(&set).unwrap();
        assert_eq!(geometry.nose_center, Point2D::new(100.0, 130.0));
    }
}
