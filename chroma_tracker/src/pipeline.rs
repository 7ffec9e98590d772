// THEORY:
// The `pipeline` module is the top-level API of the tracker. It chains the
// individual stages for one frame, in a fixed order:
//
//   Stage 1: Gaussian blur               (noise suppression)
//   Stage 2: BGR -> HSV, range threshold  (color segmentation)
//   Stage 3: erode, then dilate           (mask cleanup)
//   Stage 4: contours, moments, area gate (detection)
//   Stage 5: outline + centroid overlay   (annotation)
//
// Each stage takes its input by reference and hands back a new buffer, so the
// caller ends up owning every intermediate image in the returned `FrameReport`
// and can display whichever ones it wants. The captured frame is never written
// to; the annotation is drawn on a copy.
//
// The parameters come in as an explicit `PipelineConfig` per call. The pipeline
// itself keeps only a frame counter, used for logging.

use crate::core_modules::blob_detector::blob_detector;
use crate::core_modules::{blur, morphology, segmentation};
use crate::error::{Result, TrackerError};
use opencv::{core::Mat, prelude::*};

// Re-export key data structures for the public API.
pub use crate::core_modules::blob::{Blob, Detections};
pub use crate::core_modules::segmentation::HsvRange;
pub use crate::parameters::PipelineConfig;

/// Every image produced while processing one frame, plus the detections.
#[derive(Debug)]
pub struct FrameReport {
    /// Zero-based count of frames this pipeline has processed.
    pub frame_index: u64,
    pub blurred: Mat,
    pub hsv: Mat,
    /// Binary mask after the opening, 0 or 255 per pixel.
    pub mask: Mat,
    /// Copy of the input frame with accepted blobs drawn on it.
    pub annotated: Mat,
    pub detections: Detections,
}

/// The per-frame driver for the color tracking stages.
#[derive(Debug, Default)]
pub struct VisionPipeline {
    frames_processed: u64,
}

impl VisionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Runs every stage over `frame` (BGR) using the values in `config`.
    pub fn process(&mut self, frame: &Mat, config: &PipelineConfig) -> Result<FrameReport> {
        if frame.empty() {
            return Err(TrackerError::EmptyFrame);
        }

        // Stage 1: Smoothing
        let blurred = blur::gaussian_blur(frame, config.gaussian_filter_size)?;

        // Stage 2: Color Segmentation
        let hsv = segmentation::to_hsv(&blurred)?;
        let raw_mask = segmentation::threshold(&hsv, &config.hsv_range())?;

        // Stage 3: Opening
        let mask = morphology::open(&raw_mask, config.erode_size, config.dilate_size)?;

        // Stage 4: Detection
        let detections = blob_detector::find_blobs(&mask, config.area_threshold)?;

        // Stage 5: Annotation
        let annotated = blob_detector::annotate(frame, &detections)?;

        let frame_index = self.frames_processed;
        self.frames_processed += 1;
        log::debug!(
            "frame {}: {} contours, {} accepted",
            frame_index,
            detections.len(),
            detections.accepted_count()
        );

        Ok(FrameReport {
            frame_index,
            blurred,
            hsv,
            mask,
            annotated,
            detections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_is_rejected_without_counting() {
        let mut pipeline = VisionPipeline::new();
        let err = pipeline
            .process(&Mat::default(), &PipelineConfig::default())
            .unwrap_err();
        assert!(matches!(err, TrackerError::EmptyFrame));
        assert_eq!(pipeline.frames_processed(), 0);
    }
}
