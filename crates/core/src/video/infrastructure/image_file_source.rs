use std::path::Path;

use super::ffmpeg_decoder::FfmpegDecoder;
use crate::error::PipelineError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_source::{FrameSource, SourceKind};

/// A still image presented as a one-frame source.
///
/// Decoded eagerly with ffmpeg on open, which is much faster than the
/// pure-Rust `image` decoders for large JPEGs.
pub struct ImageFileSource {
    frame: Option<Frame>,
}

impl ImageFileSource {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let mut decoder = FfmpegDecoder::open(path)?;
        let frame = decoder
            .next_frame(0)?
            .ok_or_else(|| PipelineError::SourceUnavailable {
                source_name: path.display().to_string(),
                reason: "failed to decode image".into(),
            })?;
        log::info!(
            "Opened image {} ({}x{})",
            path.display(),
            frame.width(),
            frame.height()
        );
        Ok(Self { frame: Some(frame) })
    }
}

impl FrameSource for ImageFileSource {
    fn kind(&self) -> SourceKind {
        SourceKind::StillImage
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, PipelineError> {
        Ok(self.frame.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("test.png");
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_yields_single_rgb_frame_then_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 100, 80);
        let mut source = ImageFileSource::open(&path).unwrap();
        assert_eq!(source.kind(), SourceKind::StillImage);

        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!((frame.width(), frame.height()), (100, 80));
        assert_eq!(frame.index(), 0);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_open_nonexistent_is_source_unavailable() {
        let err = ImageFileSource::open(Path::new("/nonexistent/test.png"))
            .err()
            .unwrap();
        assert!(matches!(err, PipelineError::SourceUnavailable { .. }));
    }
}
