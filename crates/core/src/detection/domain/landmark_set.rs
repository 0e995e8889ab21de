//! Named landmark groups for one detected face.
//!
//! The 68-point layout follows the iBUG 300-W annotation scheme used by
//! most landmark regressors: jaw line first, then eyebrows, nose, eyes and
//! mouth contours.

use std::collections::BTreeMap;
use std::ops::Range;

use super::facial_feature::FacialFeature;
use crate::shared::point::Point2D;

pub const NUM_LANDMARKS: usize = 68;

const CONTIGUOUS_GROUPS: [(FacialFeature, Range<usize>); 7] = [
    (FacialFeature::Chin, 0..17),
    (FacialFeature::LeftEyebrow, 17..22),
    (FacialFeature::RightEyebrow, 22..27),
    (FacialFeature::NoseBridge, 27..31),
    (FacialFeature::NoseTip, 31..36),
    (FacialFeature::LeftEye, 36..42),
    (FacialFeature::RightEye, 42..48),
];

/// Outer lip contour followed by the inner contour, walked so each lip is
/// a closed outline.
const TOP_LIP: [usize; 12] = [48, 49, 50, 51, 52, 53, 54, 64, 63, 62, 61, 60];
const BOTTOM_LIP: [usize; 12] = [54, 55, 56, 57, 58, 59, 48, 60, 67, 66, 65, 64];

/// Mapping from facial feature to its ordered landmark points.
///
/// A present feature always has at least one point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkSet {
    groups: BTreeMap<FacialFeature, Vec<Point2D>>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature's points, replacing any previous group.
    /// An empty sequence leaves the feature absent.
    pub fn with_feature(mut self, feature: FacialFeature, points: Vec<Point2D>) -> Self {
        if points.is_empty() {
            self.groups.remove(&feature);
        } else {
            self.groups.insert(feature, points);
        }
        self
    }

    /// Groups a 68-point detection into named features.
    pub fn from_68_points(points: &[Point2D]) -> Result<Self, String> {
        if points.len() != NUM_LANDMARKS {
            return Err(format!(
                "Expected {NUM_LANDMARKS} landmarks, got {}",
                points.len()
            ));
        }

        let mut set = CONTIGUOUS_GROUPS
            .iter()
            .fold(Self::new(), |set, (feature, range)| {
                set.with_feature(*feature, points[range.clone()].to_vec())
            });
        set = set
            .with_feature(FacialFeature::TopLip, pick(points, &TOP_LIP))
            .with_feature(FacialFeature::BottomLip, pick(points, &BOTTOM_LIP));
        Ok(set)
    }

    pub fn points(&self, feature: FacialFeature) -> Option<&[Point2D]> {
        self.groups.get(&feature).map(Vec::as_slice)
    }

    /// Features present in this set, in declaration order.
    pub fn features(&self) -> impl Iterator<Item = FacialFeature> + '_ {
        self.groups.keys().copied()
    }
}

fn pick(points: &[Point2D], indices: &[usize]) -> Vec<Point2D> {
    indices.iter().map(|&i| points[i]).collect()
}
