use crate::cli::CaptureSource;
use chroma_tracker::{Result, TrackerError};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};

/// An opened camera or video file.
pub struct FrameSource {
    capture: VideoCapture,
    source: CaptureSource,
}

impl FrameSource {
    pub fn open(source: CaptureSource) -> Result<Self> {
        let unavailable = || TrackerError::CaptureUnavailable {
            source_name: source.to_string(),
        };
        let capture = match &source {
            CaptureSource::Camera { index, backend } => {
                VideoCapture::new(*index, backend.api_preference())
            }
            CaptureSource::File(path) => {
                VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)
            }
        }
        .map_err(|e| {
            log::debug!("capture backend refused {source}: {e}");
            unavailable()
        })?;

        if !capture.is_opened().unwrap_or(false) {
            return Err(unavailable());
        }
        Ok(Self { capture, source })
    }

    /// Frame rate the backend reports, 0 when unknown.
    pub fn fps(&self) -> f64 {
        self.capture.get(videoio::CAP_PROP_FPS).unwrap_or(0.0)
    }

    pub fn source(&self) -> &CaptureSource {
        &self.source
    }

    /// Reads the next frame into `frame`. Returns `false` when nothing usable came back.
    ///
    /// A video file that runs out is rewound to its first frame, so tuning can
    /// go on against the same clip.
    pub fn read(&mut self, frame: &mut Mat) -> Result<bool> {
        if self.grab_into(frame)? {
            return Ok(true);
        }
        if let CaptureSource::File(path) = &self.source {
            log::debug!("end of {}, rewinding", path.display());
            self.capture
                .set(videoio::CAP_PROP_POS_FRAMES, 0.0)
                .map_err(|e| TrackerError::opencv("rewinding capture", e))?;
            return self.grab_into(frame);
        }
        Ok(false)
    }

    fn grab_into(&mut self, frame: &mut Mat) -> Result<bool> {
        let grabbed = self
            .capture
            .read(frame)
            .map_err(|e| TrackerError::opencv("frame capture", e))?;
        Ok(grabbed && !frame.empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, Size, CV_8UC3};
    use opencv::videoio::VideoWriter;
    use std::path::Path;

    const CLIP_FRAMES: usize = 3;

    /// Writes a short MJPG clip whose frames get brighter one by one.
    fn write_clip(path: &Path) {
        let fourcc = VideoWriter::fourcc('M', 'J', 'P', 'G').unwrap();
        let mut writer = VideoWriter::new(
            &path.to_string_lossy(),
            fourcc,
            10.0,
            Size::new(64, 48),
            true,
        )
        .unwrap();
        assert!(writer.is_opened().unwrap(), "MJPG writer unavailable");
        for i in 0..CLIP_FRAMES {
            let level = 40.0 + 60.0 * i as f64;
            let frame =
                Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::all(level)).unwrap();
            writer.write(&frame).unwrap();
        }
        writer.release().unwrap();
    }

    #[test]
    fn video_file_rewinds_at_end_of_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.avi");
        write_clip(&path);

        let mut source = FrameSource::open(CaptureSource::File(path)).unwrap();
        let mut frame = Mat::default();
        for i in 0..CLIP_FRAMES * 3 {
            assert!(source.read(&mut frame).unwrap(), "read {i} came back empty");
            assert!(!frame.empty());
            assert_eq!(frame.cols(), 64);
            assert_eq!(frame.rows(), 48);
        }
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.avi");
        let err = FrameSource::open(CaptureSource::File(path)).err().unwrap();
        assert!(matches!(err, TrackerError::CaptureUnavailable { .. }));
    }
}
