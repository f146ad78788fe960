use crate::foundation::core::Point;
use crate::lens::config::{LensConfig, LensShape};
use crate::lens::geometry::{LensGeometry, LensMapping};
use crate::lens::published::LensCircle;

/// Largest pointer coordinate magnitude accepted; infinities clamp to this.
pub const POINTER_LIMIT: f64 = 1.0e7;

/// Per-frame lens state: pointer-tracked center plus the (possibly animated) radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensState {
    /// Lens center in viewport pixels.
    pub center: Point,
    /// Current radius in pixels.
    pub radius: f64,
    /// Outline.
    pub shape: LensShape,
    /// Zoom factor.
    pub magnification: f64,
}

impl LensState {
    /// Initial state for `config`, centered at the origin.
    pub fn from_config(config: &LensConfig) -> Self {
        Self {
            center: Point::ZERO,
            radius: config.radius,
            shape: config.shape,
            magnification: config.magnification,
        }
    }

    /// Move the center, keeping it finite.
    ///
    /// NaN keeps the previous coordinate; infinities clamp to `±POINTER_LIMIT`.
    pub fn set_center(&mut self, x: f64, y: f64) {
        self.center = Point::new(clamp_coord(x, self.center.x), clamp_coord(y, self.center.y));
    }

    /// Resolved outline.
    pub fn geometry(&self) -> LensGeometry {
        LensGeometry::new(self.center, self.radius, self.shape)
    }

    /// Zoom mapping about the center.
    pub fn mapping(&self) -> LensMapping {
        LensMapping {
            center: self.center,
            magnification: self.magnification,
        }
    }

    /// Circle to publish for hit-testing.
    pub fn circle(&self) -> LensCircle {
        LensCircle {
            x: self.center.x,
            y: self.center.y,
            r: self.geometry().bounding_radius(),
        }
    }
}

pub(crate) fn clamp_coord(v: f64, previous: f64) -> f64 {
    if v.is_nan() {
        return previous;
    }
    v.clamp(-POINTER_LIMIT, POINTER_LIMIT)
}
