use std::path::Path;

use ffmpeg_next::format::context::Input;
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::frame::video::Video;

use crate::error::PipelineError;
use crate::shared::frame::Frame;

/// Pull-based decoder for the best video stream of a file, converting every
/// decoded picture to tightly packed RGB24.
pub(crate) struct FfmpegDecoder {
    ictx: Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: scaling::Context,
    width: u32,
    height: u32,
    stream_index: usize,
    flushing: bool,
}

impl FfmpegDecoder {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let unavailable = |reason: String| PipelineError::SourceUnavailable {
            source_name: path.display().to_string(),
            reason,
        };

        ffmpeg_next::init().map_err(|e| unavailable(e.to_string()))?;
        let ictx = ffmpeg_next::format::input(path).map_err(|e| unavailable(e.to_string()))?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| unavailable("no video stream found".into()))?;
        let stream_index = stream.index();

        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .map_err(|e| unavailable(e.to_string()))?;
        let decoder = codec_ctx
            .decoder()
            .video()
            .map_err(|e| unavailable(e.to_string()))?;

        let width = decoder.width();
        let height = decoder.height();
        let scaler = scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            scaling::Flags::BILINEAR,
        )
        .map_err(|e| unavailable(e.to_string()))?;

        Ok(Self {
            ictx,
            decoder,
            scaler,
            width,
            height,
            stream_index,
            flushing: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Decodes the next picture, `Ok(None)` once the stream is drained.
    pub fn next_frame(&mut self, index: usize) -> Result<Option<Frame>, PipelineError> {
        loop {
            if let Some(frame) = self.try_receive(index)? {
                return Ok(Some(frame));
            }
            if self.flushing {
                return Ok(None);
            }

            let Some((stream, packet)) = self.ictx.packets().next() else {
                let _ = self.decoder.send_eof();
                self.flushing = true;
                continue;
            };
            if stream.index() != self.stream_index {
                continue;
            }
            if let Err(e) = self.decoder.send_packet(&packet) {
                log::debug!("Skipping undecodable packet: {e}");
            }
        }
    }

    fn try_receive(&mut self, index: usize) -> Result<Option<Frame>, PipelineError> {
        let mut decoded = Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return Ok(None);
        }
        let mut rgb = Video::empty();
        self.scaler
            .run(&decoded, &mut rgb)
            .map_err(|e| PipelineError::FrameRead(e.to_string()))?;
        let pixels = extract_rgb_pixels(&rgb, self.width, self.height);
        Ok(Some(Frame::new(pixels, self.width, self.height, index)))
    }
}

/// Copies pixel data from an ffmpeg frame into a contiguous RGB buffer.
///
/// ffmpeg frames may have padding bytes at the end of each row (stride > width*3).
fn extract_rgb_pixels(rgb_frame: &Video, width: u32, height: u32) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}
