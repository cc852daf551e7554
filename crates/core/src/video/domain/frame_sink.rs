use crate::error::PipelineError;
use crate::shared::frame::Frame;

/// Displays annotated frames and relays the user's stop signal.
pub trait FrameSink {
    fn show(&mut self, frame: &Frame) -> Result<(), PipelineError>;

    /// Non-blocking check for a stop request (key press or window closed).
    fn poll_stop(&mut self) -> bool;

    /// Keeps the last frame on screen until the user asks to exit.
    fn wait_for_exit(&mut self) -> Result<(), PipelineError>;
}

/// Sink for headless runs: shows nothing, never requests a stop.
pub struct HeadlessSink;

impl FrameSink for HeadlessSink {
    fn show(&mut self, _frame: &Frame) -> Result<(), PipelineError> {
        Ok(())
    }

    fn poll_stop(&mut self) -> bool {
        false
    }

    fn wait_for_exit(&mut self) -> Result<(), PipelineError> {
        Ok(())
    }
}
