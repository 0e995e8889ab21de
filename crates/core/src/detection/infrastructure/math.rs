//! Bounding-box helpers shared by detection backends.

use crate::detection::domain::face_box::FaceBox;

/// IoU between two bounding boxes represented as `[x1, y1, x2, y2]`.
pub fn bbox_iou(a: &[f64; 4], b: &[f64; 4]) -> f64 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }

    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    inter / (area_a + area_b - inter)
}

/// Greedy NMS: sort by confidence descending, suppress overlapping boxes.
///
/// The result keeps the descending-confidence order.
pub fn nms(mut boxes: Vec<FaceBox>, iou_thresh: f64) -> Vec<FaceBox> {
    boxes.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep: Vec<FaceBox> = Vec::with_capacity(boxes.len());
    for candidate in boxes {
        let suppressed = keep
            .iter()
            .any(|k| bbox_iou(&k.as_array(), &candidate.as_array()) > iou_thresh);
        if !suppressed {
            keep.push(candidate);
        }
    }
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> FaceBox {
        FaceBox {
            x1,
            y1,
            x2,
            y2,
            confidence,
        }
    }

    #[test]
    fn test_bbox_iou_no_overlap() {
        assert_eq!(
            bbox_iou(&[0.0, 0.0, 10.0, 10.0], &[20.0, 20.0, 30.0, 30.0]),
            0.0
        );
    }

    #[test]
    fn test_bbox_iou_perfect() {
        let b = [0.0, 0.0, 10.0, 10.0];
        assert!((bbox_iou(&b, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bbox_iou_half_overlap() {
        // intersection 50, union 150
        let iou = bbox_iou(&[0.0, 0.0, 10.0, 10.0], &[5.0, 0.0, 15.0, 10.0]);
        assert!((iou - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_nms_suppresses_overlapping() {
        let kept = nms(
            vec![
                face(0.0, 0.0, 100.0, 100.0, 0.8),
                face(5.0, 5.0, 105.0, 105.0, 0.9),
            ],
            0.3,
        );
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_nms_keeps_non_overlapping_in_confidence_order() {
        let kept = nms(
            vec![
                face(0.0, 0.0, 50.0, 50.0, 0.6),
                face(200.0, 200.0, 250.0, 250.0, 0.95),
            ],
            0.3,
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].x1, 200.0);
        assert_eq!(kept[1].x1, 0.0);
    }

    #[test]
    fn test_nms_empty_input() {
        assert!(nms(Vec::new(), 0.3).is_empty());
    }
}
