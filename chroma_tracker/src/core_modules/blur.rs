// THEORY:
// The blur stage is the first thing every frame goes through. Camera sensor
// noise shows up as single-pixel hue flicker, which would punch holes in the
// HSV mask further down. A Gaussian blur with a kernel derived from the
// `gaussianFilterSize` radius smooths that noise before segmentation.
//
// The stage is a pure function of its input: it never touches the source frame
// and always hands back a new buffer of the same size and type.

use crate::core_modules::kernel::square_kernel;
use crate::error::{Result, TrackerError};
use opencv::{
    core::{Mat, BORDER_DEFAULT},
    imgproc,
};

/// Smooths `frame` with a `(2r+1)x(2r+1)` Gaussian. Sigma is derived from the kernel size.
pub fn gaussian_blur(frame: &Mat, radius: i32) -> Result<Mat> {
    let mut blurred = Mat::default();
    imgproc::gaussian_blur(
        frame,
        &mut blurred,
        square_kernel(radius),
        0.0,
        0.0,
        BORDER_DEFAULT,
    )
    .map_err(TrackerError::during("gaussian blur"))?;
    Ok(blurred)
}
