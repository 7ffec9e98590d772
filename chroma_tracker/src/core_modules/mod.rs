pub mod blob;
pub mod blob_detector;
pub mod blur;
pub mod kernel;
pub mod morphology;
pub mod segmentation;
