// THEORY:
// This file is the entry point for the `chroma_tracker` library crate. It exposes
// a small, stage-by-stage color-blob tracker built on OpenCV primitives:
//
//   blur -> HSV conversion -> range threshold -> erode -> dilate -> contours
//
// The `VisionPipeline` in `pipeline` chains the stages for one frame and returns
// every intermediate image, so a front end can show each debug view. The stages
// themselves live in `core_modules` and are usable on their own. Tunable values
// are carried by `PipelineConfig`, an explicit snapshot passed into each frame.

pub mod core_modules;
pub mod error;
pub mod parameters;
pub mod pipeline;

pub use error::{Result, TrackerError};
pub use parameters::{Parameter, ParameterOverride, PipelineConfig};
pub use pipeline::{FrameReport, VisionPipeline};
