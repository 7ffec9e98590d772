use chroma_tracker::ParameterOverride;
use clap::{Parser, ValueEnum};
use opencv::videoio;
use std::fmt;
use std::path::PathBuf;

/// Capture backend used when opening a camera by index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Video4Linux2
    V4l2,
    /// Let OpenCV pick
    Any,
}

impl Backend {
    pub fn api_preference(self) -> i32 {
        match self {
            Backend::V4l2 => videoio::CAP_V4L2,
            Backend::Any => videoio::CAP_ANY,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "live_tuner",
    about = "Track a colored blob on a live video feed and tune the filters with trackbars"
)]
pub struct Cli {
    /// Camera device index
    #[arg(long, default_value_t = 0, conflicts_with = "file")]
    pub camera: i32,
    /// Read frames from a video file instead of a camera; loops at the end
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Backend::V4l2)]
    pub backend: Backend,
    /// Key poll interval per frame, in milliseconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i32).range(1..))]
    pub wait_ms: i32,
    /// Initial trackbar value, e.g. `--set hLow=10`. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub overrides: Vec<ParameterOverride>,
}

/// Where frames come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    Camera { index: i32, backend: Backend },
    File(PathBuf),
}

impl Cli {
    pub fn source(&self) -> CaptureSource {
        match &self.file {
            Some(path) => CaptureSource::File(path.clone()),
            None => CaptureSource::Camera {
                index: self.camera,
                backend: self.backend,
            },
        }
    }
}

impl fmt::Display for CaptureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureSource::Camera { index, backend } => write!(f, "camera {index} ({backend:?})"),
            CaptureSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}
