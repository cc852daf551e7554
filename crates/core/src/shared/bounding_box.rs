/// Axis-aligned face box in pixel coordinates, `x2`/`y2` exclusive.
///
/// Always satisfies `0 <= x1 < x2 <= width` and `0 <= y1 < y2 <= height`
/// for the frame it was decoded against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl BoundingBox {
    /// Returns `None` unless the box is non-empty and fits a `width` x `height` frame.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32, width: u32, height: u32) -> Option<Self> {
        if x1 < x2 && y1 < y2 && x2 <= width && y2 <= height {
            Some(Self { x1, y1, x2, y2 })
        } else {
            None
        }
    }

    /// Clamps signed pixel coordinates to the frame, dropping boxes that collapse.
    pub fn clamped(x1: i64, y1: i64, x2: i64, y2: i64, width: u32, height: u32) -> Option<Self> {
        let w = i64::from(width);
        let h = i64::from(height);
        Self::new(
            x1.clamp(0, w) as u32,
            y1.clamp(0, h) as u32,
            x2.clamp(0, w) as u32,
            y2.clamp(0, h) as u32,
            width,
            height,
        )
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn x2(&self) -> u32 {
        self.x2
    }

    pub fn y2(&self) -> u32 {
        self.y2
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// A padded, frame-clamped crop window around a face.
///
/// Bounds follow slice semantics: rows `y1..y2`, columns `x1..x2`.
/// Produced by `RegionExtractor`; may be degenerate at frame edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRegion {
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
