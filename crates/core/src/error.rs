use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::shared::bounding_box::CropRegion;

/// The three pretrained networks the pipeline consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    FaceDetector,
    Age,
    Gender,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::FaceDetector => "face detector",
            ModelKind::Age => "age",
            ModelKind::Gender => "gender",
        };
        f.write_str(name)
    }
}

/// Errors raised anywhere in the detect → classify → annotate pipeline.
///
/// `ModelLoad` and `SourceUnavailable` are fatal at startup. `InvalidRegion`
/// and classifier-side `Inference`/`ModelOutputShape` are isolated to one face
/// by the driver and never cross the frame boundary.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(
        "failed to load {model} model from {path}: {reason}. \
         Please ensure the model files are in the '{models_dir}' directory"
    )]
    ModelLoad {
        model: ModelKind,
        path: PathBuf,
        models_dir: PathBuf,
        reason: String,
    },
    #[error("cannot open video source {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },
    #[error("failed to read frame: {0}")]
    FrameRead(String),
    #[error("degenerate crop region ({}, {})-({}, {})", .0.x1, .0.y1, .0.x2, .0.y2)]
    InvalidRegion(CropRegion),
    #[error("{model} model produced output shape {actual:?}, expected {expected}")]
    ModelOutputShape {
        model: ModelKind,
        expected: String,
        actual: Vec<usize>,
    },
    #[error("{model} inference failed: {reason}")]
    Inference { model: ModelKind, reason: String },
    #[error("display error: {0}")]
    Display(String),
    #[error("failed to write {path}: {reason}")]
    Output { path: PathBuf, reason: String },
}

impl PipelineError {
    /// Whether this error should abort the whole run rather than one face or frame.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::ModelLoad { .. }
                | PipelineError::SourceUnavailable { .. }
                | PipelineError::FrameRead(_)
                | PipelineError::Display(_)
                | PipelineError::Output { .. }
        )
    }

    pub(crate) fn inference(model: ModelKind, err: impl fmt::Display) -> Self {
        PipelineError::Inference {
            model,
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_load_message_names_directory() {
        let err = PipelineError::ModelLoad {
            model: ModelKind::Age,
            path: PathBuf::from("/opt/app/models/age_net.onnx"),
            models_dir: PathBuf::from("/opt/app/models"),
            reason: "file not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("age model"));
        assert!(msg.contains("'/opt/app/models'"));
    }

    #[test]
    fn test_invalid_region_message_lists_corners() {
        let err = PipelineError::InvalidRegion(CropRegion {
            x1: 5,
            y1: 6,
            x2: 5,
            y2: 20,
        });
        assert_eq!(err.to_string(), "degenerate crop region (5, 6)-(5, 20)");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(PipelineError::FrameRead("eof".into()).is_fatal());
        assert!(!PipelineError::InvalidRegion(CropRegion {
            x1: 0,
            y1: 0,
            x2: 0,
            y2: 0
        })
        .is_fatal());
        assert!(!PipelineError::inference(ModelKind::Gender, "boom").is_fatal());
    }

    #[test]
    fn test_model_kind_display() {
        assert_eq!(ModelKind::FaceDetector.to_string(), "face detector");
        assert_eq!(ModelKind::Gender.to_string(), "gender");
    }
}
