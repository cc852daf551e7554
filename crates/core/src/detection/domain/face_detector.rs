use crate::detection::domain::detection::DetectionResult;
use crate::error::PipelineError;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// An empty result is a valid outcome, not an error. `&mut self` because
/// inference sessions need exclusive access per forward pass.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame, threshold: f32) -> Result<DetectionResult, PipelineError>;
}
