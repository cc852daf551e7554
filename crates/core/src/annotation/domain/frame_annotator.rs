use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Draws detection overlays onto a display copy of a frame.
///
/// Called once per face, accumulating on the same frame. `label` is `None`
/// for faces whose classification was skipped: the box is still drawn.
pub trait FrameAnnotator: Send {
    fn annotate(&self, frame: &mut Frame, bbox: &BoundingBox, label: Option<&str>);
}
