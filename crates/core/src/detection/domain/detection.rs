use crate::error::{ModelKind, PipelineError};
use crate::shared::bounding_box::BoundingBox;

/// Values per candidate row: `(image_id, class_id, confidence, x1, y1, x2, y2)`.
pub const DETECTION_ROW_LEN: usize = 7;

/// One candidate row of the SSD output, coordinates normalized to `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    pub confidence: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Detection {
    fn from_row(row: &[f32]) -> Self {
        Self {
            confidence: row[2],
            x1: row[3],
            y1: row[4],
            x2: row[5],
            y2: row[6],
        }
    }

    /// Scales to pixel coordinates (truncating toward zero) and clamps to the frame.
    pub fn to_bounding_box(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let scale = |v: f32, extent: u32| (f64::from(v) * f64::from(extent)) as i64;
        BoundingBox::clamped(
            scale(self.x1, width),
            scale(self.y1, height),
            scale(self.x2, width),
            scale(self.y2, height),
            width,
            height,
        )
    }
}

/// A kept face: its score and pixel box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceDetection {
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Faces above the threshold, in raw network output order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionResult {
    faces: Vec<FaceDetection>,
}

impl DetectionResult {
    pub fn new(faces: Vec<FaceDetection>) -> Self {
        Self { faces }
    }

    pub fn faces(&self) -> &[FaceDetection] {
        &self.faces
    }

    pub fn boxes(&self) -> impl Iterator<Item = &BoundingBox> {
        self.faces.iter().map(|f| &f.bbox)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Validates the detector output contract `[1, 1, N, 7]` and decodes each row.
pub fn parse_detections(shape: &[usize], data: &[f32]) -> Result<Vec<Detection>, PipelineError> {
    let valid = shape.len() == 4
        && shape[0] == 1
        && shape[1] == 1
        && shape[3] == DETECTION_ROW_LEN
        && data.len() == shape.iter().product::<usize>();
    if !valid {
        return Err(PipelineError::ModelOutputShape {
            model: ModelKind::FaceDetector,
            expected: format!("[1, 1, N, {DETECTION_ROW_LEN}]"),
            actual: shape.to_vec(),
        });
    }
    Ok(data
        .chunks_exact(DETECTION_ROW_LEN)
        .map(Detection::from_row)
        .collect())
}

/// Keeps candidates scoring strictly above `threshold` and converts them to
/// pixel boxes for a `width` x `height` frame.
///
/// Boxes that collapse after clamping are dropped.
pub fn decode_detections(
    candidates: &[Detection],
    width: u32,
    height: u32,
    threshold: f32,
) -> DetectionResult {
    let faces = candidates
        .iter()
        .filter(|d| d.confidence > threshold)
        .filter_map(|d| match d.to_bounding_box(width, height) {
            Some(bbox) => Some(FaceDetection {
                confidence: d.confidence,
                bbox,
            }),
            None => {
                log::debug!("Dropping empty detection {d:?}");
                None
            }
        })
        .collect();
    DetectionResult::new(faces)
}
