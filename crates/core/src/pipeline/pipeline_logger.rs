use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::classification::domain::attribute_classifier::FaceLabel;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Decouples the driver from specific output mechanisms (stdout, log crate)
/// so callers can observe pipeline behavior without changing the
/// orchestration code.
pub trait PipelineLogger: Send {
    /// The frame loop is starting. Default: no-op.
    fn start(&mut self) {}

    /// Report that another frame has been emitted.
    fn progress(&mut self, frames_processed: usize);

    /// Record how long a named pipeline stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces per frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// A face was classified.
    fn face(&mut self, label: &FaceLabel);

    /// A frame contained no faces.
    fn no_face(&mut self);

    /// A recoverable per-face or per-frame problem.
    fn warn(&mut self, message: &str);

    /// Emit an end-of-pipeline summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events. Used by tests.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _frames_processed: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
    fn face(&mut self, _label: &FaceLabel) {}
    fn no_face(&mut self) {}
    fn warn(&mut self, _message: &str) {}
}

/// Running total and sample count for one named stage or metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageStats {
    pub total: f64,
    pub count: usize,
}

impl StageStats {
    fn record(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// CLI-oriented logger. Status lines and per-face results go to stdout;
/// per-stage timings and metrics are aggregated for the end-of-run summary.
///
/// Memory stays constant over a run: each key holds a running total, not
/// the individual samples.
pub struct StdoutPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, StageStats>,
    metrics: HashMap<String, StageStats>,
    start_time: Instant,
    last_progress: Option<Instant>,
    total_frames: usize,
}

impl StdoutPipelineLogger {
    /// `throttle_frames` controls how often a progress line is logged.
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            last_progress: None,
            total_frames: 0,
        }
    }

    /// Wall time from `start` to the last emitted frame.
    fn elapsed(&self) -> Duration {
        let end = self.last_progress.unwrap_or_else(Instant::now);
        end.saturating_duration_since(self.start_time)
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.elapsed().as_secs_f64() * 1000.0;
        let frames = self.total_frames;
        let mut lines = Vec::new();

        lines.push(format!(
            "Pipeline summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let stats = self.timings[stage];
            let total_ms = stats.total;
            let avg_ms = stats.mean();
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({pct:4.1}%)"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let avg = self.metrics[name].mean();
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        if frames > 0 && elapsed_ms > 0.0 {
            let fps = frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<StageStats> {
        self.timings.get(stage).copied()
    }

    pub fn metrics_for(&self, name: &str) -> Option<StageStats> {
        self.metrics.get(name).copied()
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn start(&mut self) {
        self.start_time = Instant::now();
        self.last_progress = None;
    }

    fn progress(&mut self, frames_processed: usize) {
        self.total_frames = frames_processed;
        self.last_progress = Some(Instant::now());
        if frames_processed % self.throttle_frames == 0 {
            log::info!("Processed {frames_processed} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn face(&mut self, label: &FaceLabel) {
        println!("Detected: {label}");
    }

    fn no_face(&mut self) {
        println!("No face detected");
    }

    fn warn(&mut self, message: &str) {
        log::warn!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
