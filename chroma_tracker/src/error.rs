//! Error types for the chroma_tracker library

use thiserror::Error;

/// Result type alias for chroma_tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Failures surfaced by the tracking stages and capture helpers
#[derive(Error, Debug)]
pub enum TrackerError {
    /// An OpenCV call failed; `operation` names the stage that issued it
    #[error("OpenCV error during {operation}: {source}")]
    OpenCv {
        operation: String,
        #[source]
        source: opencv::Error,
    },

    /// The capture device or file could not be opened
    #[error("Capture source unavailable: {source_name}")]
    CaptureUnavailable { source_name: String },

    /// The frame handed to the pipeline holds no pixels
    #[error("Empty frame: capture returned no data")]
    EmptyFrame,

    /// A named parameter was given a value outside its trackbar range
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },
}

impl TrackerError {
    /// Wrap an OpenCV error with the operation that produced it
    pub fn opencv(operation: impl Into<String>, source: opencv::Error) -> Self {
        Self::OpenCv {
            operation: operation.into(),
            source,
        }
    }

    /// Builds a `map_err` adapter for a named OpenCV operation.
    pub(crate) fn during(operation: &'static str) -> impl FnOnce(opencv::Error) -> Self {
        move |source| Self::opencv(operation, source)
    }
}
