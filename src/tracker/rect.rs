use nalgebra::Point2;

/// Integer pixel position of a box center.
pub type Centroid = Point2<i32>;

/// Axis-aligned bounding box in TLWH format (top-left x, top-left y, width, height).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub width: i32,
    /// Height of the bounding box
    pub height: i32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    ///
    /// Extents that do not fit in `i32` saturate.
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2.saturating_sub(x1),
            height: y2.saturating_sub(y1),
        }
    }

    /// Bottom-right corner, or `None` if it lies outside the `i32` range.
    #[inline]
    pub fn bottom_right(&self) -> Option<(i32, i32)> {
        Some((
            self.x.checked_add(self.width)?,
            self.y.checked_add(self.height)?,
        ))
    }

    /// Integer center of the box; half extents round toward negative infinity.
    ///
    /// Computed in `i64` and clamped, so it never overflows.
    #[inline]
    pub fn centroid(&self) -> Centroid {
        let half = |origin: i32, extent: i32| {
            let c = origin as i64 + (extent as i64).div_euclid(2);
            c.clamp(i32::MIN as i64, i32::MAX as i64) as i32
        };
        Centroid::new(half(self.x, self.width), half(self.y, self.height))
    }

    /// Whether either dimension is zero or negative.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Euclidean distance between two centroids in pixels.
#[inline]
pub fn centroid_distance(a: &Centroid, b: &Centroid) -> f64 {
    nalgebra::distance(&a.cast::<f64>(), &b.cast::<f64>())
}
