// THEORY:
// Segmentation turns a smoothed BGR frame into a binary mask of "the color we
// are looking for". It works in HSV because hue stays put when the lighting
// brightens or dims, so a box in HSV space is a far more forgiving color model
// than a box in BGR.
//
// Membership is a hard per-channel AND of three inclusive range tests. There is
// no fuzzy or weighted membership: a pixel is either 255 in the mask or 0. An
// inverted bound (low > high) on any channel simply matches nothing.

use crate::error::{Result, TrackerError};
use opencv::{
    core::{self, Mat, Scalar},
    imgproc,
};

/// Inclusive lower/upper bounds for the H, S and V channels, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub low: [i32; 3],
    pub high: [i32; 3],
}

impl HsvRange {
    /// Scalar reference for `threshold`: whether one HSV triple falls inside the box.
    ///
    /// `threshold` sets a mask pixel to 255 exactly when this returns true for it.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        hsv.iter()
            .zip(self.low.iter().zip(self.high.iter()))
            .all(|(&value, (&low, &high))| low <= value as i32 && value as i32 <= high)
    }

    fn lower_bound(&self) -> Scalar {
        Scalar::new(self.low[0] as f64, self.low[1] as f64, self.low[2] as f64, 0.0)
    }

    fn upper_bound(&self) -> Scalar {
        Scalar::new(self.high[0] as f64, self.high[1] as f64, self.high[2] as f64, 0.0)
    }
}

/// Converts a BGR frame to OpenCV's 8-bit HSV (hue in `[0, 180)`).
pub fn to_hsv(frame: &Mat) -> Result<Mat> {
    let mut hsv = Mat::default();
    imgproc::cvt_color(frame, &mut hsv, imgproc::COLOR_BGR2HSV, 0)
        .map_err(TrackerError::during("BGR to HSV conversion"))?;
    Ok(hsv)
}

/// Builds the binary mask of pixels whose HSV value lies inside `range`.
pub fn threshold(hsv: &Mat, range: &HsvRange) -> Result<Mat> {
    let mut mask = Mat::default();
    core::in_range(hsv, &range.lower_bound(), &range.upper_bound(), &mut mask)
        .map_err(TrackerError::during("HSV range threshold"))?;
    Ok(mask)
}
