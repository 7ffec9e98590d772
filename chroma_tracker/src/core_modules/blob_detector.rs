// THEORY:
// The `blob_detector` is the final stage of the per-frame pipeline. It reads the
// cleaned-up binary mask and turns connected foreground regions into `Blob`s.
//
// Algorithm steps:
// 1.  **Contour Extraction**: every region boundary in the mask is traced with
//     full-tree retrieval (`RETR_TREE`), so holes and nested regions are reported
//     too, and simple polygonal approximation (`CHAIN_APPROX_SIMPLE`) to keep
//     straight runs down to their end points.
// 2.  **Moments**: for each contour the spatial moments give both the enclosed
//     area and the centroid `(m10/m00, m01/m00)`. A contour that encloses no area
//     (a single pixel, a one-pixel-wide line) has `m00 == 0`; its centroid is
//     reported as `None` rather than a non-finite point.
// 3.  **Area Gate**: a blob is *accepted* only when its area is strictly greater
//     than the threshold. Everything else is still measured and returned, it is
//     just never drawn.
// 4.  **Annotation**: accepted contours are outlined on a copy of the original
//     frame and their centroids are marked with a filled dot.
// 5.  **Stateless Utility**: nothing is remembered between calls. The output for a
//     frame depends only on that frame's mask and threshold.

use crate::core_modules::blob::{Blob, Detections};
use crate::error::{Result, TrackerError};
use opencv::{
    core::{Mat, Moments, Point, Point2f, Scalar, Vec4i, Vector},
    imgproc,
    prelude::*,
};

pub mod blob_detector {
    use super::*;

    /// BGR red, used for contour outlines.
    pub const CONTOUR_COLOR: (f64, f64, f64) = (0.0, 0.0, 255.0);
    pub const CONTOUR_THICKNESS: i32 = 2;
    /// BGR green, used for centroid markers.
    pub const CENTROID_COLOR: (f64, f64, f64) = (0.0, 255.0, 0.0);
    pub const CENTROID_RADIUS: i32 = 5;

    /// Finds every contour in `mask` and measures it against `area_threshold`.
    pub fn find_blobs(mask: &Mat, area_threshold: i32) -> Result<Detections> {
        // --- 1. Contour Extraction ---
        let mut contours = Vector::<Vector<Point>>::new();
        let mut hierarchy = Vector::<Vec4i>::new();
        imgproc::find_contours_with_hierarchy(
            mask,
            &mut contours,
            &mut hierarchy,
            imgproc::RETR_TREE,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .map_err(TrackerError::during("contour extraction"))?;

        // --- 2. Moments & Area Gate ---
        let threshold = area_threshold.max(0) as f64;
        let mut blobs = Vec::with_capacity(contours.len());
        for (index, contour) in contours.iter().enumerate() {
            let moments = imgproc::moments(&contour, false)
                .map_err(TrackerError::during("contour moments"))?;
            let area = imgproc::contour_area(&contour, false)
                .map_err(TrackerError::during("contour area"))?;
            blobs.push(Blob {
                index,
                area,
                centroid: centroid(&moments),
                accepted: area > threshold,
            });
        }

        log::trace!(
            "found {} contours, {} above area {}",
            blobs.len(),
            blobs.iter().filter(|b| b.accepted).count(),
            area_threshold
        );

        Ok(Detections {
            contours,
            hierarchy,
            blobs,
        })
    }

    /// Center of mass from zeroth and first order moments.
    pub fn centroid(moments: &Moments) -> Option<Point2f> {
        if moments.m00.abs() <= f64::EPSILON {
            return None;
        }
        Some(Point2f::new(
            (moments.m10 / moments.m00) as f32,
            (moments.m01 / moments.m00) as f32,
        ))
    }

    /// Returns a copy of `frame` with every accepted blob outlined and its centroid marked.
    pub fn annotate(frame: &Mat, detections: &Detections) -> Result<Mat> {
        let mut annotated = frame
            .try_clone()
            .map_err(TrackerError::during("frame copy"))?;
        draw_accepted(&mut annotated, detections)?;
        Ok(annotated)
    }

    /// Draws accepted blobs onto `canvas` in place.
    pub fn draw_accepted(canvas: &mut Mat, detections: &Detections) -> Result<()> {
        let (b, g, r) = CONTOUR_COLOR;
        let contour_color = Scalar::new(b, g, r, 0.0);
        let (b, g, r) = CENTROID_COLOR;
        let centroid_color = Scalar::new(b, g, r, 0.0);

        for blob in detections.accepted() {
            imgproc::draw_contours(
                canvas,
                &detections.contours,
                blob.index as i32,
                contour_color,
                CONTOUR_THICKNESS,
                imgproc::LINE_8,
                &detections.hierarchy,
                0,
                Point::new(0, 0),
            )
            .map_err(TrackerError::during("contour drawing"))?;

            if let Some(c) = blob.centroid {
                imgproc::circle(
                    canvas,
                    Point::new(c.x.round() as i32, c.y.round() as i32),
                    CENTROID_RADIUS,
                    centroid_color,
                    imgproc::FILLED,
                    imgproc::LINE_8,
                    0,
                )
                .map_err(TrackerError::during("centroid marker"))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::blob_detector::*;
    use super::*;
    use approx::assert_abs_diff_eq;
    use opencv::core::{self, Rect, CV_8UC1, CV_8UC3};

    fn blank_mask(rows: i32, cols: i32) -> Mat {
        Mat::new_rows_cols_with_default(rows, cols, CV_8UC1, Scalar::all(0.0)).unwrap()
    }

    fn blank_frame(rows: i32, cols: i32) -> Mat {
        Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    fn fill_rect(mask: &mut Mat, rect: Rect) {
        imgproc::rectangle(mask, rect, Scalar::all(255.0), imgproc::FILLED, imgproc::LINE_8, 0)
            .unwrap();
    }

    fn fill_circle(mask: &mut Mat, center: Point, radius: i32) {
        imgproc::circle(
            mask,
            center,
            radius,
            Scalar::all(255.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
    }

    fn is_black(frame: &Mat) -> bool {
        frame.data_bytes().unwrap().iter().all(|&b| b == 0)
    }

    #[test]
    fn empty_mask_has_no_blobs() {
        let detections = find_blobs(&blank_mask(50, 50), 0).unwrap();
        assert!(detections.is_empty());
        assert_eq!(detections.contours.len(), 0);
    }

    #[test]
    fn contours_and_blobs_stay_aligned() {
        let mut mask = blank_mask(120, 160);
        fill_rect(&mut mask, Rect::new(5, 5, 30, 30));
        fill_circle(&mut mask, Point::new(100, 60), 20);
        // a ring: outer boundary plus a hole, both reported under RETR_TREE
        fill_circle(&mut mask, Point::new(40, 90), 18);
        imgproc::circle(
            &mut mask,
            Point::new(40, 90),
            8,
            Scalar::all(0.0),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        )
        .unwrap();
        *mask.at_2d_mut::<u8>(110, 150).unwrap() = 255;

        let detections = find_blobs(&mask, 0).unwrap();
        assert_eq!(detections.blobs.len(), detections.contours.len());
        assert_eq!(detections.hierarchy.len(), detections.contours.len());
        assert!(detections.len() >= 5);
        for (i, blob) in detections.blobs.iter().enumerate() {
            assert_eq!(blob.index, i);
        }
    }

    #[test]
    fn area_gate_is_strict() {
        let mut mask = blank_mask(60, 60);
        fill_rect(&mut mask, Rect::new(10, 10, 20, 20));

        let probe = find_blobs(&mask, 0).unwrap();
        assert_eq!(probe.len(), 1);
        // the polygon runs through the centres of the boundary pixels
        assert_abs_diff_eq!(probe.blobs[0].area, 361.0);
        let area = probe.blobs[0].area as i32;

        let at_threshold = find_blobs(&mask, area).unwrap();
        assert!(!at_threshold.blobs[0].accepted);
        assert_eq!(at_threshold.accepted_count(), 0);
        let frame = annotate(&blank_frame(60, 60), &at_threshold).unwrap();
        assert!(is_black(&frame));

        let below_threshold = find_blobs(&mask, area - 1).unwrap();
        assert!(below_threshold.blobs[0].accepted);
        let frame = annotate(&blank_frame(60, 60), &below_threshold).unwrap();
        assert!(!is_black(&frame));
    }

    #[test]
    fn circle_centroid_is_subpixel_accurate() {
        let mut mask = blank_mask(160, 200);
        fill_circle(&mut mask, Point::new(100, 80), 30);

        let detections = find_blobs(&mask, 500).unwrap();
        assert_eq!(detections.accepted_count(), 1);

        let blob = detections.accepted().next().unwrap();
        let c = blob.centroid.unwrap();
        assert_abs_diff_eq!(c.x, 100.0, epsilon = 0.5);
        assert_abs_diff_eq!(c.y, 80.0, epsilon = 0.5);
        let true_area = std::f64::consts::PI * 30.0 * 30.0;
        assert!(blob.area > 0.9 * true_area && blob.area < 1.05 * true_area);
    }

    #[test]
    fn degenerate_contours_have_no_centroid() {
        let mut mask = blank_mask(40, 40);
        *mask.at_2d_mut::<u8>(5, 5).unwrap() = 255;
        fill_rect(&mut mask, Rect::new(10, 20, 15, 1));

        let detections = find_blobs(&mask, 0).unwrap();
        assert_eq!(detections.len(), 2);
        for blob in &detections.blobs {
            assert_eq!(blob.area, 0.0);
            assert_eq!(blob.centroid, None);
            assert!(!blob.accepted);
        }
    }

    #[test]
    fn annotation_marks_centroid_and_outline() {
        let mut mask = blank_mask(160, 200);
        fill_circle(&mut mask, Point::new(100, 80), 30);
        let detections = find_blobs(&mask, 100).unwrap();

        let frame = blank_frame(160, 200);
        let annotated = annotate(&frame, &detections).unwrap();

        let centre = *annotated.at_2d::<core::Vec3b>(80, 100).unwrap();
        assert_eq!([centre[0], centre[1], centre[2]], [0, 255, 0]);
        let outlined = (69..=71).any(|col| {
            let px = *annotated.at_2d::<core::Vec3b>(80, col).unwrap();
            [px[0], px[1], px[2]] == [0, 0, 255]
        });
        assert!(outlined, "no outline at the left edge of the circle");
        // the source frame is left untouched
        assert!(is_black(&frame));
    }
}
