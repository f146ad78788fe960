use kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::lens::config::LensShape;

const PATH_TOLERANCE: f64 = 0.1;

/// Resolved lens outline at a given center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensGeometry {
    center: Point,
    half_w: f64,
    half_h: f64,
    corner: f64,
    circle: bool,
}

impl LensGeometry {
    /// Resolve `shape` at `center` with `radius`. Negative radii collapse to zero.
    pub fn new(center: Point, radius: f64, shape: LensShape) -> Self {
        let radius = radius.max(0.0);
        match shape {
            LensShape::Circle => Self {
                center,
                half_w: radius,
                half_h: radius,
                corner: radius,
                circle: true,
            },
            LensShape::Rounded {
                stretch_x,
                stretch_y,
                corner_ratio,
                corner_cap,
            } => {
                let w = 2.0 * radius * stretch_x.max(0.0);
                let h = 2.0 * radius * stretch_y.max(0.0);
                let corner = corner_cap
                    .max(0.0)
                    .min(w.min(h) * corner_ratio.clamp(0.0, 0.5));
                Self {
                    center,
                    half_w: w / 2.0,
                    half_h: h / 2.0,
                    corner,
                    circle: false,
                }
            }
        }
    }

    /// Lens center.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Corner radius (the radius itself for circles).
    pub fn corner_radius(&self) -> f64 {
        self.corner
    }

    /// Signed distance from `p` to the outline; negative inside.
    pub fn signed_distance(&self, p: Point) -> f64 {
        let d = p - self.center;
        if self.circle {
            return d.hypot() - self.half_w;
        }
        let qx = d.x.abs() - (self.half_w - self.corner);
        let qy = d.y.abs() - (self.half_h - self.corner);
        let outside = Vec2::new(qx.max(0.0), qy.max(0.0)).hypot();
        let inside = qx.max(qy).min(0.0);
        outside + inside - self.corner
    }

    /// Anti-aliased coverage of the pixel centered at `p`, in `[0, 1]`.
    pub fn coverage(&self, p: Point) -> f64 {
        (0.5 - self.signed_distance(p)).clamp(0.0, 1.0)
    }

    /// Axis-aligned bounds of the outline.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.half_w,
            self.center.y - self.half_h,
            self.center.x + self.half_w,
            self.center.y + self.half_h,
        )
    }

    /// Radius of the smallest circle around the center that contains the outline.
    pub fn bounding_radius(&self) -> f64 {
        if self.circle {
            return self.half_w;
        }
        let inner = Vec2::new(self.half_w - self.corner, self.half_h - self.corner);
        inner.hypot() + self.corner
    }

    /// Outline as a path in screen coordinates.
    pub fn path(&self) -> BezPath {
        if self.circle {
            return kurbo::Circle::new(self.center, self.half_w).to_path(PATH_TOLERANCE);
        }
        kurbo::RoundedRect::from_rect(self.bounds(), self.corner).to_path(PATH_TOLERANCE)
    }
}

/// Center-invariant zoom around the lens center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensMapping {
    /// Zoom center (the pointer).
    pub center: Point,
    /// Zoom factor.
    pub magnification: f64,
}

impl LensMapping {
    /// Screen point whose un-magnified content is shown at `p`.
    pub fn source_point(&self, p: Point) -> Point {
        self.center + (p - self.center) / self.magnification
    }

    /// Affine that draws un-magnified screen content magnified about the center.
    pub fn paint_affine(&self) -> Affine {
        let c = self.center.to_vec2();
        Affine::translate(c) * Affine::scale(self.magnification) * Affine::translate(-c)
    }

    /// Translation applied in a `2*radius` lens buffer after scaling by the magnification, with
    /// the image drawn at its draw-space origin.
    ///
    /// `-(pointer - cover_offset) + radius / magnification` per axis. Buffer position
    /// `m * (q + shift)` of draw-space point `q` lands the pointer's content at `(radius, radius)`.
    #[cfg(test)]
    pub(crate) fn buffer_shift(&self, cover_offset: Vec2, radius: f64) -> Vec2 {
        let r = radius / self.magnification;
        -(self.center.to_vec2() - cover_offset) + Vec2::new(r, r)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lens/geometry.rs"]
mod tests;
