use crate::error::PipelineError;
use crate::shared::bounding_box::{BoundingBox, CropRegion};
use crate::shared::constants::DEFAULT_PADDING;
use crate::shared::frame::Frame;

/// Grows a face box by a fixed margin so the classifiers see hair, chin and
/// ears, clamped to the last valid pixel row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionExtractor {
    padding: u32,
}

impl RegionExtractor {
    pub fn new(padding: u32) -> Self {
        Self { padding }
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Always satisfies `x1 <= x2 <= width - 1` and `y1 <= y2 <= height - 1`,
    /// so the result may be degenerate when a box hugs the far edge.
    pub fn extract(&self, width: u32, height: u32, bbox: &BoundingBox) -> CropRegion {
        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);
        CropRegion {
            x1: bbox.x1().saturating_sub(self.padding).min(max_x),
            y1: bbox.y1().saturating_sub(self.padding).min(max_y),
            x2: bbox.x2().saturating_add(self.padding).min(max_x),
            y2: bbox.y2().saturating_add(self.padding).min(max_y),
        }
    }

    /// Copies the crop out of `frame`, refusing zero-area regions.
    pub fn crop_face(&self, frame: &Frame, region: &CropRegion) -> Result<Frame, PipelineError> {
        if region.is_degenerate() {
            return Err(PipelineError::InvalidRegion(*region));
        }
        Ok(frame.crop(region))
    }
}

impl Default for RegionExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING)
    }
}
