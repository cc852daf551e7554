use std::time::Duration;

use minifb::{Window, WindowOptions};

use crate::error::PipelineError;
use crate::shared::frame::Frame;
use crate::video::domain::frame_sink::FrameSink;

/// How often the exit wait re-checks for input.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Native display window via `minifb`. Any key press or closing the window
/// counts as a stop request.
///
/// The window is created lazily on the first frame so it matches the
/// source resolution.
pub struct WindowSink {
    title: String,
    window: Option<Window>,
    /// Frame dimensions the current window was opened for. User resizes
    /// don't change this; minifb scales the buffer to the window.
    built_for: Option<(usize, usize)>,
    buffer: Vec<u32>,
}

impl WindowSink {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            window: None,
            built_for: None,
            buffer: Vec::new(),
        }
    }

    fn ensure_window(
        &mut self,
        width: usize,
        height: usize,
    ) -> Result<&mut Window, PipelineError> {
        if self.window.is_none() || needs_new_window(self.built_for, (width, height)) {
            let mut window = Window::new(
                &self.title,
                width,
                height,
                WindowOptions {
                    resize: true,
                    ..WindowOptions::default()
                },
            )
            .map_err(|e| PipelineError::Display(format!("failed to create window: {e}")))?;
            window.set_target_fps(60);
            self.window = Some(window);
            self.built_for = Some((width, height));
        }
        self.window
            .as_mut()
            .ok_or_else(|| PipelineError::Display("window unavailable".into()))
    }

    fn stop_requested(window: &Window) -> bool {
        !window.is_open() || !window.get_keys().is_empty()
    }
}

impl FrameSink for WindowSink {
    fn show(&mut self, frame: &Frame) -> Result<(), PipelineError> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;

        // RGB8 → 0RGB u32
        self.buffer.clear();
        self.buffer.extend(
            frame
                .data()
                .chunks_exact(3)
                .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2])),
        );

        let buffer = std::mem::take(&mut self.buffer);
        let result = self
            .ensure_window(width, height)
            .and_then(|window| {
                window
                    .update_with_buffer(&buffer, width, height)
                    .map_err(|e| PipelineError::Display(e.to_string()))
            });
        self.buffer = buffer;
        result
    }

    fn poll_stop(&mut self) -> bool {
        self.window.as_ref().is_some_and(Self::stop_requested)
    }

    fn wait_for_exit(&mut self) -> Result<(), PipelineError> {
        let Some(window) = self.window.as_mut() else {
            return Ok(());
        };
        while !Self::stop_requested(window) {
            window.update();
            std::thread::sleep(EXIT_POLL_INTERVAL);
        }
        Ok(())
    }
}

/// A window is reopened only when the source resolution changes.
fn needs_new_window(built_for: Option<(usize, usize)>, frame_size: (usize, usize)) -> bool {
    built_for != Some(frame_size)
}
