use crate::detection::domain::detection::{decode_detections, parse_detections, DetectionResult};
use crate::detection::domain::face_detector::FaceDetector;
use crate::error::{ModelKind, PipelineError};
use crate::shared::blob::{blob_from_frame, DETECTOR_BLOB};
use crate::shared::frame::Frame;
use crate::shared::model_paths::ModelPaths;
use crate::shared::onnx_session::load_session;

/// SSD face detector (ResNet-10 backbone, 300x300 input) via `ort`.
///
/// Runs one forward pass per frame and decodes the `[1, 1, N, 7]`
/// detection tensor. No NMS or tracking: the network output is used as is.
pub struct OnnxSsdDetector {
    session: ort::session::Session,
}

impl OnnxSsdDetector {
    pub fn load(paths: &ModelPaths) -> Result<Self, PipelineError> {
        let session = load_session(paths, ModelKind::FaceDetector)?;
        Ok(Self { session })
    }
}

impl FaceDetector for OnnxSsdDetector {
    fn detect(&mut self, frame: &Frame, threshold: f32) -> Result<DetectionResult, PipelineError> {
        let model = ModelKind::FaceDetector;

        // 1. Preprocess: 300x300, RGB, mean-subtracted
        let blob = blob_from_frame(frame, &DETECTOR_BLOB)
            .ok_or_else(|| PipelineError::inference(model, "empty frame"))?;

        // 2. Inference
        let input =
            ort::value::Tensor::from_array(blob).map_err(|e| PipelineError::inference(model, e))?;
        let outputs = self
            .session
            .run(ort::inputs![input])
            .map_err(|e| PipelineError::inference(model, e))?;
        if outputs.len() == 0 {
            return Err(PipelineError::inference(model, "model produced no outputs"));
        }
        let tensor = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| PipelineError::inference(model, e))?;

        // 3. Validate shape and decode rows in output order
        let shape = tensor.shape().to_vec();
        let data: Vec<f32> = tensor.iter().copied().collect();
        let candidates = parse_detections(&shape, &data)?;

        Ok(decode_detections(
            &candidates,
            frame.width(),
            frame.height(),
            threshold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_model_file_fails_with_model_load() {
        let tmp = TempDir::new().unwrap();
        let err = OnnxSsdDetector::load(&ModelPaths::in_dir(tmp.path()))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            PipelineError::ModelLoad {
                model: ModelKind::FaceDetector,
                ..
            }
        ));
    }
}
