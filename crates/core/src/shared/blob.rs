use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};
use ndarray::Array4;

use crate::shared::constants::{
    CLASSIFIER_INPUT_SIZE, CLASSIFIER_MEAN, DETECTOR_INPUT_SIZE, DETECTOR_MEAN,
};
use crate::shared::frame::Frame;

/// Channel order a network expects in its input tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// How to turn a frame into a network input: square resize, reorder
/// channels, subtract per-channel means. No scaling is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobSpec {
    pub size: u32,
    /// Means in the same order as `order`.
    pub mean: [f32; 3],
    pub order: ChannelOrder,
}

pub const DETECTOR_BLOB: BlobSpec = BlobSpec {
    size: DETECTOR_INPUT_SIZE,
    mean: DETECTOR_MEAN,
    order: ChannelOrder::Rgb,
};

pub const CLASSIFIER_BLOB: BlobSpec = BlobSpec {
    size: CLASSIFIER_INPUT_SIZE,
    mean: CLASSIFIER_MEAN,
    order: ChannelOrder::Bgr,
};

/// Builds an NCHW float32 blob of shape `[1, 3, size, size]`.
///
/// Returns `None` for an empty frame, which has nothing to resize.
pub fn blob_from_frame(frame: &Frame, spec: &BlobSpec) -> Option<Array4<f32>> {
    if frame.is_empty() {
        return None;
    }
    let src = ImageBuffer::<Rgb<u8>, &[u8]>::from_raw(frame.width(), frame.height(), frame.data())?;
    let resized = imageops::resize(&src, spec.size, spec.size, FilterType::Triangle);

    let s = spec.size as usize;
    let mut tensor = Array4::<f32>::zeros((1, 3, s, s));
    for (x, y, pixel) in resized.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        let ordered = match spec.order {
            ChannelOrder::Rgb => [r, g, b],
            ChannelOrder::Bgr => [b, g, r],
        };
        for (c, value) in ordered.iter().enumerate() {
            tensor[[0, c, y as usize, x as usize]] = *value as f32 - spec.mean[c];
        }
    }
    Some(tensor)
}
