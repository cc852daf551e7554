use std::marker::PhantomData;

use crate::classification::domain::attribute_classifier::AttributeClassifier;
use crate::classification::domain::vocabulary::{Age, Gender, Vocabulary};
use crate::error::PipelineError;
use crate::shared::blob::{blob_from_frame, CLASSIFIER_BLOB};
use crate::shared::bounding_box::CropRegion;
use crate::shared::frame::Frame;
use crate::shared::model_paths::ModelPaths;
use crate::shared::onnx_session::load_session;

/// Caffe-derived age or gender network (227x227 BGR input) via `ort`.
///
/// One type serves both attributes; the vocabulary parameter fixes which
/// model file is loaded and how the output vector is labelled.
pub struct OnnxAttributeClassifier<V: Vocabulary> {
    session: ort::session::Session,
    _vocabulary: PhantomData<V>,
}

pub type OnnxAgeClassifier = OnnxAttributeClassifier<Age>;
pub type OnnxGenderClassifier = OnnxAttributeClassifier<Gender>;

impl<V: Vocabulary> OnnxAttributeClassifier<V> {
    pub fn load(paths: &ModelPaths) -> Result<Self, PipelineError> {
        let session = load_session(paths, V::MODEL)?;
        Ok(Self {
            session,
            _vocabulary: PhantomData,
        })
    }

    fn forward(&mut self, face: &Frame) -> Result<(Vec<usize>, Vec<f32>), PipelineError> {
        let blob = blob_from_frame(face, &CLASSIFIER_BLOB).ok_or(PipelineError::InvalidRegion(
            CropRegion {
                x1: 0,
                y1: 0,
                x2: face.width(),
                y2: face.height(),
            },
        ))?;

        let input = ort::value::Tensor::from_array(blob)
            .map_err(|e| PipelineError::inference(V::MODEL, e))?;
        let outputs = self
            .session
            .run(ort::inputs![input])
            .map_err(|e| PipelineError::inference(V::MODEL, e))?;
        if outputs.len() == 0 {
            return Err(PipelineError::inference(V::MODEL, "model produced no outputs"));
        }
        let tensor = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| PipelineError::inference(V::MODEL, e))?;
        Ok((tensor.shape().to_vec(), tensor.iter().copied().collect()))
    }
}

impl<V: Vocabulary> AttributeClassifier<V> for OnnxAttributeClassifier<V> {
    fn classify(&mut self, face: &Frame) -> Result<V, PipelineError> {
        let (shape, probabilities) = self.forward(face)?;
        check_output_shape::<V>(&shape)?;
        let label = V::from_probabilities(&probabilities)?;
        log::trace!("{} probabilities {probabilities:?} → {label}", V::MODEL);
        Ok(label)
    }
}

/// Accepts `[1, K]` and `[1, K, 1, 1]` where `K` is the vocabulary size.
fn check_output_shape<V: Vocabulary>(shape: &[usize]) -> Result<(), PipelineError> {
    let k = V::ALL.len();
    let trailing_ones = shape.iter().skip(2).all(|&d| d == 1);
    if shape.len() >= 2 && shape[0] == 1 && shape[1] == k && trailing_ones {
        Ok(())
    } else {
        Err(PipelineError::ModelOutputShape {
            model: V::MODEL,
            expected: format!("[1, {k}]"),
            actual: shape.to_vec(),
        })
    }
}
