use std::path::Path;

use crate::error::PipelineError;
use crate::shared::frame::Frame;

/// Persists an annotated frame to an image file.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), PipelineError>;
}
