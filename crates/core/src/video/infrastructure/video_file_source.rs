use std::path::Path;

use super::ffmpeg_decoder::FfmpegDecoder;
use crate::error::PipelineError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::{FrameSource, SourceKind};

/// Decodes a video file frame by frame via ffmpeg-next (libavformat + libavcodec).
///
/// Frames are decoded lazily, one per `next_frame` call.
pub struct VideoFileSource {
    decoder: FfmpegDecoder,
    next_index: usize,
}

impl VideoFileSource {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let decoder = FfmpegDecoder::open(path)?;
        log::info!(
            "Opened video {} ({}x{})",
            path.display(),
            decoder.width(),
            decoder.height()
        );
        Ok(Self {
            decoder,
            next_index: 0,
        })
    }
}

impl FrameSource for VideoFileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::VideoFile
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, PipelineError> {
        let frame = self.decoder.next_frame(self.next_index)?;
        if frame.is_some() {
            self.next_index += 1;
        }
        Ok(frame)
    }
}
