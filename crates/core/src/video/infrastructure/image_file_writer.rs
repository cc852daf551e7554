use std::path::Path;

use crate::error::PipelineError;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes a frame to an image file using the `image` crate; the format
/// follows the path's extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), PipelineError> {
        let output_err = |reason: String| PipelineError::Output {
            path: path.to_path_buf(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| output_err(e.to_string()))?;
        }

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or_else(|| output_err("frame data does not match its dimensions".into()))?;
        img.save(path).map_err(|e| output_err(e.to_string()))?;
        log::debug!("Wrote {}x{} frame to {}", frame.width(), frame.height(), path.display());
        Ok(())
    }
}
