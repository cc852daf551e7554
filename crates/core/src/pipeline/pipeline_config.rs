use crate::shared::constants::{DEFAULT_CONFIDENCE, DEFAULT_PADDING};

/// Tunables for one driver run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Detections must score strictly above this to be kept.
    pub confidence: f32,
    /// Margin in pixels added around each face before classification.
    pub padding: u32,
    /// Run the gender and age classifiers on separate threads per face.
    pub parallel_classify: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence: DEFAULT_CONFIDENCE,
            padding: DEFAULT_PADDING,
            parallel_classify: false,
        }
    }
}
