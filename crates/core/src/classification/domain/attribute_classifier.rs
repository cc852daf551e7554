use std::fmt;

use crate::classification::domain::vocabulary::{Age, Gender, Vocabulary};
use crate::error::PipelineError;
use crate::shared::frame::Frame;

/// Domain interface for a single-attribute face classifier.
///
/// Each instance owns its own network; age and gender never share state.
pub trait AttributeClassifier<V: Vocabulary>: Send {
    fn classify(&mut self, face: &Frame) -> Result<V, PipelineError>;
}

/// Both attributes predicted for one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceLabel {
    pub gender: Gender,
    pub age: Age,
}

impl fmt::Display for FaceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.gender, self.age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_text_is_gender_then_age() {
        let label = FaceLabel {
            gender: Gender::Female,
            age: Age::From25To32,
        };
        assert_eq!(label.to_string(), "Female, (25-32)");
    }
}
