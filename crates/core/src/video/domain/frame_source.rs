use crate::error::PipelineError;
use crate::shared::frame::Frame;

/// What a source is reading from; decides the driver's terminal behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Camera,
    VideoFile,
    /// A single still image: one frame, then wait for an exit signal.
    StillImage,
}

/// Supplies sequential frames from a camera, video file, or still image.
///
/// `Ok(None)` signals end-of-stream. Implementations are opened by their
/// constructors, so an unopenable source fails before the first read.
pub trait FrameSource {
    fn kind(&self) -> SourceKind;

    /// Blocks until the next frame is available.
    fn next_frame(&mut self) -> Result<Option<Frame>, PipelineError>;
}
