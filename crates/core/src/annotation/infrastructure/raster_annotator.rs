use image::{ImageBuffer, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use super::bitmap_font::{rasterize, text_height, text_width};
use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

pub const BOX_COLOR: [u8; 3] = [0, 255, 0];
pub const LABEL_COLOR: [u8; 3] = [255, 255, 0];

/// Gap in pixels between the label baseline and the top of the box.
const LABEL_OFFSET: i64 = 10;

/// Draws green face boxes and yellow labels directly into frame pixels.
///
/// Line thickness scales with frame height (`round(H / 150)`), text scale
/// with `H / 240`.
pub struct RasterAnnotator;

impl RasterAnnotator {
    pub fn new() -> Self {
        Self
    }

    fn line_thickness(frame_height: u32) -> u32 {
        ((frame_height as f64 / 150.0).round() as u32).max(1)
    }

    fn text_scale(frame_height: u32) -> u32 {
        (frame_height / 240).max(1)
    }

    fn draw_box(frame: &mut Frame, bbox: &BoundingBox) {
        let thickness = Self::line_thickness(frame.height());
        let (fw, fh) = (frame.width(), frame.height());
        let Some(mut canvas) = ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(fw, fh, frame.data_mut())
        else {
            return;
        };

        // Nested hollow rects, growing inward from the box edge.
        for inset in 0..thickness {
            let w = bbox.width().saturating_sub(2 * inset);
            let h = bbox.height().saturating_sub(2 * inset);
            if w == 0 || h == 0 {
                break;
            }
            let rect =
                Rect::at((bbox.x1() + inset) as i32, (bbox.y1() + inset) as i32).of_size(w, h);
            draw_hollow_rect_mut(&mut canvas, rect, Rgb(BOX_COLOR));
        }
    }

    fn draw_label(frame: &mut Frame, bbox: &BoundingBox, text: &str) {
        let scale = Self::text_scale(frame.height());
        let fw = i64::from(frame.width());
        let fh = i64::from(frame.height());
        let w = i64::from(text_width(text, scale));
        let h = i64::from(text_height(scale));

        // Baseline sits LABEL_OFFSET above the box; pull back inside the frame.
        let x = i64::from(bbox.x1()).min(fw - w).max(0);
        let y = (i64::from(bbox.y1()) - LABEL_OFFSET - h).max(0);

        let mut pixels = frame.as_ndarray_mut();
        rasterize(text, x, y, scale, |px, py| {
            if (0..fw).contains(&px) && (0..fh).contains(&py) {
                for (c, value) in LABEL_COLOR.iter().enumerate() {
                    pixels[[py as usize, px as usize, c]] = *value;
                }
            }
        });
    }
}

impl Default for RasterAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAnnotator for RasterAnnotator {
    fn annotate(&self, frame: &mut Frame, bbox: &BoundingBox, label: Option<&str>) {
        Self::draw_box(frame, bbox);
        if let Some(text) = label {
            Self::draw_label(frame, bbox, text);
        }
    }
}
