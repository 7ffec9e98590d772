// THEORY:
// Every smoothing and morphology knob in the tracker is expressed as a *radius*.
// OpenCV wants odd, positive kernel sizes, so the stages convert a radius `r`
// to a width of `2r+1`. Doing the conversion in one place keeps the "always odd,
// always at least 1" property true by construction, whatever the trackbar says.

use opencv::core::Size;

/// Converts a radius into an odd, positive kernel width. Negative radii act as 0.
pub fn odd_kernel_size(radius: i32) -> i32 {
    2 * radius.max(0) + 1
}

/// Square kernel of width `2r+1`.
pub fn square_kernel(radius: i32) -> Size {
    let side = odd_kernel_size(radius);
    Size::new(side, side)
}
