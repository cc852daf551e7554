use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::classification::domain::attribute_classifier::{AttributeClassifier, FaceLabel};
use crate::classification::domain::vocabulary::{Age, Gender};
use crate::detection::domain::detection::DetectionResult;
use crate::detection::domain::face_detector::FaceDetector;
use crate::error::PipelineError;
use crate::pipeline::frame_report::{FaceOutcome, FrameReport, RunSummary};
use crate::pipeline::pipeline_config::PipelineConfig;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::pipeline::region_extractor::RegionExtractor;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;
use crate::video::domain::frame_sink::FrameSink;
use crate::video::domain::frame_source::{FrameSource, SourceKind};

/// Message shown once a still image has been emitted.
pub const COMPLETE_MESSAGE: &str = "Processing complete. Press any key to exit.";

enum DriverState {
    AwaitFrame,
    Detect(Frame),
    ProcessFaces {
        frame: Frame,
        detections: DetectionResult,
    },
    Emit {
        report: FrameReport,
        annotated: Frame,
    },
    AwaitExit,
    Done,
}

/// Per-frame orchestration: detect → extract → classify gender and age →
/// annotate → emit.
///
/// The driver owns all three networks for the whole run. A stop request is
/// honoured only between frames.
pub struct PipelineDriver {
    detector: Box<dyn FaceDetector>,
    gender_classifier: Box<dyn AttributeClassifier<Gender>>,
    age_classifier: Box<dyn AttributeClassifier<Age>>,
    annotator: Box<dyn FrameAnnotator>,
    logger: Box<dyn PipelineLogger>,
    extractor: RegionExtractor,
    config: PipelineConfig,
}

impl PipelineDriver {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        gender_classifier: Box<dyn AttributeClassifier<Gender>>,
        age_classifier: Box<dyn AttributeClassifier<Age>>,
        annotator: Box<dyn FrameAnnotator>,
        logger: Box<dyn PipelineLogger>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            detector,
            gender_classifier,
            age_classifier,
            annotator,
            logger,
            extractor: RegionExtractor::new(config.padding),
            config,
        }
    }

    pub fn logger(&self) -> &dyn PipelineLogger {
        self.logger.as_ref()
    }

    /// Pulls frames from `source` until it ends or `sink` requests a stop.
    ///
    /// Still images are emitted once, then the driver waits for the sink's
    /// exit signal instead of re-reading the source.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        sink: &mut dyn FrameSink,
    ) -> Result<RunSummary, PipelineError> {
        self.logger.start();
        let single_image = source.kind() == SourceKind::StillImage;
        let mut summary = RunSummary::default();
        let mut state = DriverState::AwaitFrame;

        loop {
            state = match state {
                DriverState::AwaitFrame => {
                    if sink.poll_stop() {
                        log::info!("Stop requested");
                        DriverState::Done
                    } else {
                        match source.next_frame()? {
                            Some(frame) => DriverState::Detect(frame),
                            None => {
                                log::debug!("End of stream");
                                DriverState::Done
                            }
                        }
                    }
                }
                DriverState::Detect(frame) => match self.detect(&frame) {
                    Some(detections) => DriverState::ProcessFaces { frame, detections },
                    None => DriverState::Emit {
                        report: FrameReport::undetected(frame.index()),
                        annotated: frame,
                    },
                },
                DriverState::ProcessFaces { frame, detections } => {
                    let (report, annotated) = self.process_faces(&frame, detections);
                    DriverState::Emit { report, annotated }
                }
                DriverState::Emit { report, annotated } => {
                    sink.show(&annotated)?;
                    summary.record(&report, annotated);
                    self.logger.progress(summary.frames_processed);
                    if single_image {
                        DriverState::AwaitExit
                    } else {
                        DriverState::AwaitFrame
                    }
                }
                DriverState::AwaitExit => {
                    self.logger.info(COMPLETE_MESSAGE);
                    sink.wait_for_exit()?;
                    DriverState::Done
                }
                DriverState::Done => break,
            };
        }

        log::debug!(
            "Run finished: {} frames, {} faces classified, {} skipped",
            summary.frames_processed,
            summary.faces_classified,
            summary.faces_skipped
        );
        Ok(summary)
    }

    /// Runs one frame through every stage and returns its report together
    /// with the annotated copy. The input frame is left untouched.
    pub fn process_frame(&mut self, frame: &Frame) -> (FrameReport, Frame) {
        match self.detect(frame) {
            Some(detections) => self.process_faces(frame, detections),
            None => (FrameReport::undetected(frame.index()), frame.clone()),
        }
    }

    /// `None` when the detector failed; the frame is then emitted as is.
    fn detect(&mut self, frame: &Frame) -> Option<DetectionResult> {
        let start = Instant::now();
        let result = self.detector.detect(frame, self.config.confidence);
        self.logger
            .timing("detect", start.elapsed().as_secs_f64() * 1000.0);

        match result {
            Ok(detections) => {
                self.logger.metric("faces", detections.len() as f64);
                Some(detections)
            }
            Err(e) => {
                self.logger
                    .warn(&format!("Frame {}: detection failed: {e}", frame.index()));
                None
            }
        }
    }

    fn process_faces(
        &mut self,
        frame: &Frame,
        detections: DetectionResult,
    ) -> (FrameReport, Frame) {
        let mut annotated = frame.clone();
        if detections.is_empty() {
            self.logger.no_face();
            return (
                FrameReport {
                    index: frame.index(),
                    detections,
                    outcomes: Vec::new(),
                },
                annotated,
            );
        }

        let start = Instant::now();
        let outcomes: Vec<FaceOutcome> = detections
            .boxes()
            .map(|bbox| self.classify_face(frame, bbox))
            .collect();
        self.logger
            .timing("classify", start.elapsed().as_secs_f64() * 1000.0);

        let start = Instant::now();
        for (bbox, outcome) in detections.boxes().zip(&outcomes) {
            let text = outcome.label().map(|label| {
                self.logger.face(label);
                label.to_string()
            });
            self.annotator.annotate(&mut annotated, bbox, text.as_deref());
        }
        self.logger
            .timing("annotate", start.elapsed().as_secs_f64() * 1000.0);

        (
            FrameReport {
                index: frame.index(),
                detections,
                outcomes,
            },
            annotated,
        )
    }

    fn classify_face(&mut self, frame: &Frame, bbox: &BoundingBox) -> FaceOutcome {
        let region = self.extractor.extract(frame.width(), frame.height(), bbox);
        let result = self
            .extractor
            .crop_face(frame, &region)
            .and_then(|face| self.classify_crop(&face));

        match result {
            Ok(label) => FaceOutcome::Classified(label),
            Err(e) => {
                self.logger.warn(&format!(
                    "Frame {}: skipping face at ({}, {})-({}, {}): {e}",
                    frame.index(),
                    bbox.x1(),
                    bbox.y1(),
                    bbox.x2(),
                    bbox.y2()
                ));
                FaceOutcome::Skipped(e)
            }
        }
    }

    fn classify_crop(&mut self, face: &Frame) -> Result<FaceLabel, PipelineError> {
        let (gender, age) = if self.config.parallel_classify {
            let gender_classifier = &mut self.gender_classifier;
            let age_classifier = &mut self.age_classifier;
            std::thread::scope(|s| {
                let gender = s.spawn(move || gender_classifier.classify(face));
                let age = age_classifier.classify(face);
                let gender = gender
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                (gender, age)
            })
        } else {
            let gender = self.gender_classifier.classify(face);
            let age = self.age_classifier.classify(face);
            (gender, age)
        };
        Ok(FaceLabel {
            gender: gender?,
            age: age?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::domain::vocabulary::Vocabulary;
    use crate::detection::domain::detection::FaceDetection;
    use crate::error::ModelKind;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubDetector {
        results: VecDeque<Result<Vec<BoundingBox>, PipelineError>>,
        thresholds: Arc<Mutex<Vec<f32>>>,
    }

    impl StubDetector {
        fn new(results: Vec<Result<Vec<BoundingBox>, PipelineError>>) -> Self {
            Self {
                results: results.into(),
                thresholds: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn always(boxes: Vec<BoundingBox>, frames: usize) -> Self {
            Self::new((0..frames).map(|_| Ok(boxes.clone())).collect())
        }
    }

    impl FaceDetector for StubDetector {
        fn detect(
            &mut self,
            _frame: &Frame,
            threshold: f32,
        ) -> Result<DetectionResult, PipelineError> {
            self.thresholds.lock().unwrap().push(threshold);
            let boxes = self.results.pop_front().unwrap_or_else(|| Ok(Vec::new()))?;
            Ok(DetectionResult::new(
                boxes
                    .into_iter()
                    .map(|bbox| FaceDetection {
                        confidence: 0.99,
                        bbox,
                    })
                    .collect(),
            ))
        }
    }

    struct StubClassifier<V> {
        label: V,
        name: &'static str,
        calls: Arc<Mutex<Vec<&'static str>>>,
        fail_widths: Vec<u32>,
    }

    impl<V: Vocabulary> AttributeClassifier<V> for StubClassifier<V> {
        fn classify(&mut self, face: &Frame) -> Result<V, PipelineError> {
            self.calls.lock().unwrap().push(self.name);
            if self.fail_widths.contains(&face.width()) {
                return Err(PipelineError::Inference {
                    model: V::MODEL,
                    reason: "stub failure".into(),
                });
            }
            Ok(self.label)
        }
    }

    struct RecordingAnnotator {
        calls: Arc<Mutex<Vec<(BoundingBox, Option<String>)>>>,
    }

    impl FrameAnnotator for RecordingAnnotator {
        fn annotate(&self, frame: &mut Frame, bbox: &BoundingBox, label: Option<&str>) {
            frame.data_mut()[0] = 255;
            self.calls
                .lock()
                .unwrap()
                .push((*bbox, label.map(str::to_string)));
        }
    }

    struct RecordingLogger {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl PipelineLogger for RecordingLogger {
        fn start(&mut self) {
            self.events.lock().unwrap().push("start".into());
        }
        fn progress(&mut self, _frames_processed: usize) {}
        fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
        fn metric(&mut self, _name: &str, _value: f64) {}
        fn info(&mut self, message: &str) {
            self.events.lock().unwrap().push(format!("info: {message}"));
        }
        fn face(&mut self, label: &FaceLabel) {
            self.events.lock().unwrap().push(format!("Detected: {label}"));
        }
        fn no_face(&mut self) {
            self.events.lock().unwrap().push("No face detected".into());
        }
        fn warn(&mut self, message: &str) {
            self.events.lock().unwrap().push(format!("warn: {message}"));
        }
    }

    struct VecSource {
        kind: SourceKind,
        frames: VecDeque<Frame>,
        reads: usize,
    }

    impl VecSource {
        fn new(kind: SourceKind, count: usize) -> Self {
            Self {
                kind,
                frames: (0..count).map(|i| make_frame(640, 480, i)).collect(),
                reads: 0,
            }
        }
    }

    impl FrameSource for VecSource {
        fn kind(&self) -> SourceKind {
            self.kind
        }

        fn next_frame(&mut self) -> Result<Option<Frame>, PipelineError> {
            self.reads += 1;
            Ok(self.frames.pop_front())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        shown: Vec<Frame>,
        stop_after: Option<usize>,
        exit_waits: usize,
    }

    impl FrameSink for RecordingSink {
        fn show(&mut self, frame: &Frame) -> Result<(), PipelineError> {
            self.shown.push(frame.clone());
            Ok(())
        }

        fn poll_stop(&mut self) -> bool {
            self.stop_after.is_some_and(|n| self.shown.len() >= n)
        }

        fn wait_for_exit(&mut self) -> Result<(), PipelineError> {
            self.exit_waits += 1;
            Ok(())
        }
    }

    // --- Helpers ---

    fn make_frame(w: u32, h: u32, index: usize) -> Frame {
        Frame::new(vec![128; (w * h * 3) as usize], w, h, index)
    }

    fn bbox(x1: u32, y1: u32, x2: u32, y2: u32) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2, 640, 480).unwrap()
    }

    struct Harness {
        driver: PipelineDriver,
        calls: Arc<Mutex<Vec<&'static str>>>,
        annotations: Arc<Mutex<Vec<(BoundingBox, Option<String>)>>>,
        events: Arc<Mutex<Vec<String>>>,
        thresholds: Arc<Mutex<Vec<f32>>>,
    }

    fn harness(detector: StubDetector, config: PipelineConfig) -> Harness {
        harness_with_failures(detector, config, Vec::new())
    }

    fn harness_with_failures(
        detector: StubDetector,
        config: PipelineConfig,
        fail_widths: Vec<u32>,
    ) -> Harness {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let annotations = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(Mutex::new(Vec::new()));
        let thresholds = detector.thresholds.clone();

        let driver = PipelineDriver::new(
            Box::new(detector),
            Box::new(StubClassifier {
                label: Gender::Female,
                name: "gender",
                calls: calls.clone(),
                fail_widths: Vec::new(),
            }),
            Box::new(StubClassifier {
                label: Age::From25To32,
                name: "age",
                calls: calls.clone(),
                fail_widths,
            }),
            Box::new(RecordingAnnotator {
                calls: annotations.clone(),
            }),
            Box::new(RecordingLogger {
                events: events.clone(),
            }),
            config,
        );
        Harness {
            driver,
            calls,
            annotations,
            events,
            thresholds,
        }
    }

    // --- process_frame ---

    #[test]
    fn test_no_faces_logs_and_returns_unannotated_copy() {
        let mut h = harness(StubDetector::always(vec![], 1), PipelineConfig::default());
        let frame = make_frame(640, 480, 0);

        let (report, annotated) = h.driver.process_frame(&frame);

        assert!(report.detections.is_empty());
        assert!(report.outcomes.is_empty());
        assert_eq!(annotated, frame);
        assert_eq!(*h.events.lock().unwrap(), vec!["No face detected".to_string()]);
        assert!(h.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_one_label_pair_per_detection_in_order() {
        let boxes = vec![bbox(100, 100, 200, 220), bbox(300, 50, 380, 150)];
        let mut h = harness(StubDetector::always(boxes.clone(), 1), PipelineConfig::default());

        let (report, annotated) = h.driver.process_frame(&make_frame(640, 480, 0));

        assert_eq!(report.outcomes.len(), report.detections.len());
        assert_eq!(report.classified_count(), 2);
        let annotations = h.annotations.lock().unwrap();
        let drawn: Vec<BoundingBox> = annotations.iter().map(|(b, _)| *b).collect();
        assert_eq!(drawn, boxes);
        assert!(annotations
            .iter()
            .all(|(_, label)| label.as_deref() == Some("Female, (25-32)")));
        assert_eq!(annotated.data()[0], 255);
    }

    #[test]
    fn test_input_frame_is_not_modified() {
        let mut h = harness(
            StubDetector::always(vec![bbox(100, 100, 200, 200)], 1),
            PipelineConfig::default(),
        );
        let frame = make_frame(640, 480, 0);
        let before = frame.clone();
        let _ = h.driver.process_frame(&frame);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_gender_is_classified_before_age() {
        let mut h = harness(
            StubDetector::always(vec![bbox(100, 100, 200, 200), bbox(300, 300, 400, 400)], 1),
            PipelineConfig::default(),
        );
        let _ = h.driver.process_frame(&make_frame(640, 480, 0));
        assert_eq!(
            *h.calls.lock().unwrap(),
            vec!["gender", "age", "gender", "age"]
        );
    }

    #[test]
    fn test_confidence_threshold_is_forwarded() {
        let config = PipelineConfig {
            confidence: 0.6,
            ..PipelineConfig::default()
        };
        let mut h = harness(StubDetector::always(vec![], 1), config);
        let _ = h.driver.process_frame(&make_frame(640, 480, 0));
        assert_eq!(*h.thresholds.lock().unwrap(), vec![0.6]);
    }

    #[test]
    fn test_degenerate_crop_skips_only_that_face() {
        let config = PipelineConfig {
            padding: 0,
            ..PipelineConfig::default()
        };
        let mut h = harness(
            StubDetector::always(vec![bbox(639, 10, 640, 40), bbox(100, 100, 200, 200)], 1),
            config,
        );

        let (report, _) = h.driver.process_frame(&make_frame(640, 480, 0));

        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            report.outcomes[0],
            FaceOutcome::Skipped(PipelineError::InvalidRegion(_))
        ));
        assert!(matches!(report.outcomes[1], FaceOutcome::Classified(_)));

        let annotations = h.annotations.lock().unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].1, None);
        assert!(annotations[1].1.is_some());

        let events = h.events.lock().unwrap();
        assert!(events[0].starts_with("warn: Frame 0: skipping face"));
        assert_eq!(events[1], "Detected: Female, (25-32)");
    }

    #[test]
    fn test_classifier_failure_is_isolated_per_face() {
        // Crops are 140 px wide for the first face and 120 px for the second.
        let mut h = harness_with_failures(
            StubDetector::always(vec![bbox(100, 100, 200, 200), bbox(300, 300, 380, 380)], 1),
            PipelineConfig::default(),
            vec![140],
        );

        let (report, _) = h.driver.process_frame(&make_frame(640, 480, 0));

        assert!(matches!(
            report.outcomes[0],
            FaceOutcome::Skipped(PipelineError::Inference {
                model: ModelKind::Age,
                ..
            })
        ));
        assert!(matches!(report.outcomes[1], FaceOutcome::Classified(_)));
    }

    #[test]
    fn test_classifier_failure_is_isolated_per_face_in_parallel() {
        let mut h = harness_with_failures(
            StubDetector::always(vec![bbox(100, 100, 200, 200), bbox(300, 300, 380, 380)], 1),
            PipelineConfig {
                parallel_classify: true,
                ..PipelineConfig::default()
            },
            vec![140],
        );

        let (report, _) = h.driver.process_frame(&make_frame(640, 480, 0));

        assert!(matches!(
            report.outcomes[0],
            FaceOutcome::Skipped(PipelineError::Inference {
                model: ModelKind::Age,
                ..
            })
        ));
        assert!(matches!(report.outcomes[1], FaceOutcome::Classified(_)));
        let events = h.events.lock().unwrap();
        assert!(events[0].starts_with("warn: Frame 0: skipping face"));
        assert!(events[1].starts_with("Detected: "));
    }

    #[test]
    fn test_parallel_classification_matches_sequential() {
        let boxes = vec![bbox(100, 100, 200, 200), bbox(300, 300, 400, 400)];
        let mut sequential = harness(
            StubDetector::always(boxes.clone(), 1),
            PipelineConfig::default(),
        );
        let mut parallel = harness(
            StubDetector::always(boxes, 1),
            PipelineConfig {
                parallel_classify: true,
                ..PipelineConfig::default()
            },
        );
        let frame = make_frame(640, 480, 0);

        let (seq_report, seq_frame) = sequential.driver.process_frame(&frame);
        let (par_report, par_frame) = parallel.driver.process_frame(&frame);

        let seq: Vec<_> = seq_report.labels().copied().collect();
        let par: Vec<_> = par_report.labels().copied().collect();
        assert_eq!(seq, par);
        assert_eq!(seq_frame, par_frame);
        assert_eq!(parallel.calls.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_detector_error_returns_unannotated_frame() {
        let detector = StubDetector::new(vec![Err(PipelineError::inference(
            ModelKind::FaceDetector,
            "boom",
        ))]);
        let mut h = harness(detector, PipelineConfig::default());
        let frame = make_frame(640, 480, 3);

        let (report, annotated) = h.driver.process_frame(&frame);

        assert_eq!(report.index, 3);
        assert!(report.outcomes.is_empty());
        assert_eq!(annotated, frame);
        let events = h.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].starts_with("warn: Frame 3: detection failed"));
    }

    // --- run ---

    #[test]
    fn test_video_runs_to_end_of_stream() {
        let mut h = harness(
            StubDetector::always(vec![bbox(10, 10, 100, 100)], 3),
            PipelineConfig::default(),
        );
        let mut source = VecSource::new(SourceKind::VideoFile, 3);
        let mut sink = RecordingSink::default();

        let summary = h.driver.run(&mut source, &mut sink).unwrap();

        assert_eq!(summary.frames_processed, 3);
        assert_eq!(summary.faces_classified, 3);
        assert_eq!(summary.faces_skipped, 0);
        assert_eq!(summary.last_frame.unwrap().index(), 2);
        let indices: Vec<usize> = sink.shown.iter().map(Frame::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(sink.exit_waits, 0);
    }

    #[test]
    fn test_run_starts_logger_before_first_frame() {
        let mut h = harness(StubDetector::always(vec![], 2), PipelineConfig::default());
        let mut source = VecSource::new(SourceKind::VideoFile, 2);

        h.driver.run(&mut source, &mut RecordingSink::default()).unwrap();

        let events = h.events.lock().unwrap();
        assert_eq!(events[0], "start");
        assert_eq!(events.iter().filter(|e| *e == "start").count(), 1);
        assert_eq!(events[1], "No face detected");
    }

    #[test]
    fn test_still_image_emits_once_then_waits_for_exit() {
        let mut h = harness(
            StubDetector::always(vec![bbox(10, 10, 100, 100)], 1),
            PipelineConfig::default(),
        );
        let mut source = VecSource::new(SourceKind::StillImage, 1);
        let mut sink = RecordingSink::default();

        let summary = h.driver.run(&mut source, &mut sink).unwrap();

        assert_eq!(summary.frames_processed, 1);
        assert_eq!(sink.shown.len(), 1);
        assert_eq!(sink.exit_waits, 1);
        assert_eq!(source.reads, 1);
        assert_eq!(
            h.events.lock().unwrap().last().unwrap(),
            &format!("info: {COMPLETE_MESSAGE}")
        );
    }

    #[test]
    fn test_stop_signal_checked_between_frames() {
        let mut h = harness(StubDetector::always(vec![], 5), PipelineConfig::default());
        let mut source = VecSource::new(SourceKind::Camera, 5);
        let mut sink = RecordingSink {
            stop_after: Some(2),
            ..RecordingSink::default()
        };

        let summary = h.driver.run(&mut source, &mut sink).unwrap();

        assert_eq!(summary.frames_processed, 2);
        assert_eq!(source.reads, 2);
        assert_eq!(sink.exit_waits, 0);
    }

    #[test]
    fn test_detector_error_does_not_stop_the_loop() {
        let detector = StubDetector::new(vec![
            Err(PipelineError::inference(ModelKind::FaceDetector, "boom")),
            Ok(vec![bbox(10, 10, 100, 100)]),
        ]);
        let mut h = harness(detector, PipelineConfig::default());
        let mut source = VecSource::new(SourceKind::VideoFile, 2);
        let mut sink = RecordingSink::default();

        let summary = h.driver.run(&mut source, &mut sink).unwrap();

        assert_eq!(summary.frames_processed, 2);
        assert_eq!(summary.faces_classified, 1);
        assert_eq!(sink.shown[0].data()[0], 128);
        assert_eq!(sink.shown[1].data()[0], 255);
    }

    #[test]
    fn test_source_error_aborts_run() {
        struct FailingSource;
        impl FrameSource for FailingSource {
            fn kind(&self) -> SourceKind {
                SourceKind::Camera
            }
            fn next_frame(&mut self) -> Result<Option<Frame>, PipelineError> {
                Err(PipelineError::FrameRead("device unplugged".into()))
            }
        }

        let mut h = harness(StubDetector::always(vec![], 1), PipelineConfig::default());
        let err = h
            .driver
            .run(&mut FailingSource, &mut RecordingSink::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::FrameRead(_)));
    }

    #[test]
    fn test_empty_source_processes_nothing() {
        let mut driver = PipelineDriver::new(
            Box::new(StubDetector::always(vec![], 0)),
            Box::new(StubClassifier {
                label: Gender::Male,
                name: "gender",
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_widths: Vec::new(),
            }),
            Box::new(StubClassifier {
                label: Age::From0To2,
                name: "age",
                calls: Arc::new(Mutex::new(Vec::new())),
                fail_widths: Vec::new(),
            }),
            Box::new(RecordingAnnotator {
                calls: Arc::new(Mutex::new(Vec::new())),
            }),
            Box::new(NullPipelineLogger),
            PipelineConfig::default(),
        );
        let mut source = VecSource::new(SourceKind::VideoFile, 0);
        let summary = driver
            .run(&mut source, &mut RecordingSink::default())
            .unwrap();
        assert_eq!(summary.frames_processed, 0);
        assert!(summary.last_frame.is_none());
    }
}
