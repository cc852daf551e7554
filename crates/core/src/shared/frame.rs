use image::RgbImage;
use ndarray::{s, ArrayView3, ArrayViewMut3};

use crate::shared::bounding_box::CropRegion;

/// A single camera/video/image frame: contiguous RGB bytes in row-major order,
/// origin at the top-left.
///
/// Sources convert to RGB at the I/O boundary; blob construction reorders
/// channels per network.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

pub const CHANNELS: usize = 3;

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// Wraps a decoded RGB image without copying.
    pub fn from_rgb_image(image: RgbImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Copies the pixels inside `region` into a new frame.
    ///
    /// The region is clipped to the frame; a degenerate region yields an
    /// empty frame rather than panicking.
    pub fn crop(&self, region: &CropRegion) -> Frame {
        let x1 = region.x1.min(self.width) as usize;
        let y1 = region.y1.min(self.height) as usize;
        let x2 = (region.x2.min(self.width) as usize).max(x1);
        let y2 = (region.y2.min(self.height) as usize).max(y1);

        let view = self.as_ndarray();
        let window = view.slice(s![y1..y2, x1..x2, ..]);
        let data: Vec<u8> = window.iter().copied().collect();

        Frame::new(data, (x2 - x1) as u32, (y2 - y1) as u32, self.index)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}
