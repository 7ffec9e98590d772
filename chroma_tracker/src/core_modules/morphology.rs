// THEORY:
// Thresholding in HSV is never clean: specks of background that happen to match
// the color box survive, and the target blob has ragged edges. The cleanup stage
// runs a morphological *opening* on the mask: erosion first, which deletes any
// foreground region smaller than the structuring element, then dilation, which
// grows the survivors back to roughly their original footprint.
//
// The two radii are tuned independently, so the stage is exposed both as the
// combined `open` and as the individual `erode` / `dilate` steps. All three
// return a fresh mask rather than overwriting their input.

use crate::core_modules::kernel::square_kernel;
use crate::error::{Result, TrackerError};
use opencv::{
    core::{Mat, Point, BORDER_CONSTANT},
    imgproc,
};

/// Elliptical structuring element `2r+1` pixels across.
pub fn structuring_element(radius: i32) -> Result<Mat> {
    imgproc::get_structuring_element(
        imgproc::MORPH_ELLIPSE,
        square_kernel(radius),
        Point::new(-1, -1),
    )
    .map_err(TrackerError::during("structuring element"))
}

pub fn erode(mask: &Mat, radius: i32) -> Result<Mat> {
    let kernel = structuring_element(radius)?;
    let border_value =
        imgproc::morphology_default_border_value().map_err(TrackerError::during("erosion"))?;
    let mut eroded = Mat::default();
    imgproc::erode(
        mask,
        &mut eroded,
        &kernel,
        Point::new(-1, -1),
        1,
        BORDER_CONSTANT,
        border_value,
    )
    .map_err(TrackerError::during("erosion"))?;
    Ok(eroded)
}

pub fn dilate(mask: &Mat, radius: i32) -> Result<Mat> {
    let kernel = structuring_element(radius)?;
    let border_value =
        imgproc::morphology_default_border_value().map_err(TrackerError::during("dilation"))?;
    let mut dilated = Mat::default();
    imgproc::dilate(
        mask,
        &mut dilated,
        &kernel,
        Point::new(-1, -1),
        1,
        BORDER_CONSTANT,
        border_value,
    )
    .map_err(TrackerError::during("dilation"))?;
    Ok(dilated)
}

/// Erode with `erode_radius`, then dilate with `dilate_radius`. Order matters.
pub fn open(mask: &Mat, erode_radius: i32, dilate_radius: i32) -> Result<Mat> {
    let eroded = erode(mask, erode_radius)?;
    dilate(&eroded, dilate_radius)
}
