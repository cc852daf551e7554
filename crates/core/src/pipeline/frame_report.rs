use crate::classification::domain::attribute_classifier::FaceLabel;
use crate::detection::domain::detection::DetectionResult;
use crate::error::PipelineError;
use crate::shared::frame::Frame;

/// What happened to one detected face.
#[derive(Debug)]
pub enum FaceOutcome {
    Classified(FaceLabel),
    /// Classification was skipped; the error was logged and isolated.
    Skipped(PipelineError),
}

impl FaceOutcome {
    pub fn label(&self) -> Option<&FaceLabel> {
        match self {
            FaceOutcome::Classified(label) => Some(label),
            FaceOutcome::Skipped(_) => None,
        }
    }
}

/// Per-frame result. `outcomes[i]` belongs to `detections.faces()[i]`.
#[derive(Debug)]
pub struct FrameReport {
    pub index: usize,
    pub detections: DetectionResult,
    pub outcomes: Vec<FaceOutcome>,
}

impl FrameReport {
    /// Report for a frame whose detection pass failed.
    pub fn undetected(index: usize) -> Self {
        Self {
            index,
            detections: DetectionResult::default(),
            outcomes: Vec::new(),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &FaceLabel> {
        self.outcomes.iter().filter_map(FaceOutcome::label)
    }

    pub fn classified_count(&self) -> usize {
        self.labels().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.classified_count()
    }
}

/// Totals for a finished run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub frames_processed: usize,
    pub faces_classified: usize,
    pub faces_skipped: usize,
    /// The most recently emitted annotated frame.
    pub last_frame: Option<Frame>,
}

impl RunSummary {
    pub(crate) fn record(&mut self, report: &FrameReport, annotated: Frame) {
        self.frames_processed += 1;
        self.faces_classified += report.classified_count();
        self.faces_skipped += report.skipped_count();
        self.last_frame = Some(annotated);
    }
}
