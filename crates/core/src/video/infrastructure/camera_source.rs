use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use crate::error::PipelineError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::{FrameSource, SourceKind};

/// Live frames from a camera device via `nokhwa`, decoded to RGB.
///
/// The stream never ends on its own; the driver stops it on a user signal.
pub struct CameraSource {
    camera: Camera,
    next_index: usize,
}

impl CameraSource {
    pub fn open(index: u32) -> Result<Self, PipelineError> {
        let unavailable = |reason: String| PipelineError::SourceUnavailable {
            source_name: format!("camera {index}"),
            reason,
        };

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| unavailable(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| unavailable(e.to_string()))?;

        log::info!(
            "Opened camera: {} ({})",
            camera.info().human_name(),
            camera.camera_format()
        );
        Ok(Self {
            camera,
            next_index: 0,
        })
    }
}

impl FrameSource for CameraSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Camera
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, PipelineError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| PipelineError::FrameRead(e.to_string()))?;
        let image = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| PipelineError::FrameRead(e.to_string()))?;

        let frame = Frame::from_rgb_image(image, self.next_index);
        self.next_index += 1;
        Ok(Some(frame))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::debug!("Failed to stop camera stream: {e}");
        }
    }
}
