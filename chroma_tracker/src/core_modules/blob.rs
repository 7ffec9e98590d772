// THEORY:
// A `Blob` is the per-contour summary produced by the detector for one frame.
// It is a plain data container: it carries the enclosed area, the centroid from
// image moments and whether the area cleared the threshold, and it points back
// into the frame's contour list by index.
//
// Blobs have no identity beyond the frame they were found in. Two blobs with the
// same index in consecutive frames are unrelated; nothing here tracks objects
// over time.

use opencv::core::{Point, Point2f, Vec4i, Vector};

/// One contour found in the mask, together with its derived measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Position of the contour in `Detections::contours`. Valid for the current frame only.
    pub index: usize,
    /// Area enclosed by the contour polygon, in square pixels.
    pub area: f64,
    /// `(m10/m00, m01/m00)`, or `None` when the contour encloses no area.
    pub centroid: Option<Point2f>,
    /// True when `area` is strictly greater than the frame's area threshold.
    pub accepted: bool,
}

/// Everything the detector found in a single mask.
///
/// `blobs[i]` always describes `contours.get(i)`; both lists have the same length.
#[derive(Debug, Clone, Default)]
pub struct Detections {
    pub contours: Vector<Vector<Point>>,
    pub hierarchy: Vector<Vec4i>,
    pub blobs: Vec<Blob>,
}

impl Detections {
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Blobs whose area exceeded the threshold, in contour order.
    pub fn accepted(&self) -> impl Iterator<Item = &Blob> {
        self.blobs.iter().filter(|b| b.accepted)
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }
}
