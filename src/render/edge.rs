use crate::foundation::core::{Point, Rgba8Premul};
use crate::foundation::math::premul_over_px;
use crate::lens::config::LensConfig;
use crate::lens::geometry::LensGeometry;

/// Integer pixel rectangle of a lens buffer, in target coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    pub(crate) x0: i64,
    pub(crate) y0: i64,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Region {
    /// Screen-space center of buffer pixel `(x, y)`.
    pub(crate) fn pixel_center(&self, x: u32, y: u32) -> Point {
        Point::new(
            self.x0 as f64 + f64::from(x) + 0.5,
            self.y0 as f64 + f64::from(y) + 0.5,
        )
    }

    /// Bounds of `geom` plus stroke overhang, clipped to a `target_w` x `target_h` target.
    pub(crate) fn for_lens(
        geom: &LensGeometry,
        overhang: f64,
        target_w: u32,
        target_h: u32,
    ) -> Option<Self> {
        let b = geom.bounds().inflate(overhang, overhang);
        let x0 = (b.x0.floor() as i64).max(0);
        let y0 = (b.y0.floor() as i64).max(0);
        let x1 = (b.x1.ceil() as i64).min(i64::from(target_w));
        let y1 = (b.y1.ceil() as i64).min(i64::from(target_h));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x0,
            y0,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Feather and stroke parameters, colors already premultiplied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct EdgeStyle {
    pub(crate) feather_width: f64,
    pub(crate) highlight: Rgba8Premul,
    pub(crate) stroke_width: f64,
    pub(crate) stroke_feather: f64,
    pub(crate) stroke_color: Rgba8Premul,
}

impl EdgeStyle {
    pub(crate) fn from_config(cfg: &LensConfig) -> Self {
        Self {
            feather_width: cfg.feather_width,
            highlight: Rgba8Premul::from_straight(cfg.highlight),
            stroke_width: cfg.stroke_width,
            stroke_feather: cfg.stroke_feather,
            stroke_color: Rgba8Premul::from_straight(cfg.stroke_color),
        }
    }

    /// How far past the outline the stroke can paint.
    pub(crate) fn overhang(&self) -> f64 {
        self.stroke_width / 2.0 + 1.0
    }

    /// Feather highlight strength at signed distance `sd` (inside the shape only).
    pub(crate) fn feather_at(&self, sd: f64) -> f64 {
        let depth = -sd;
        if self.feather_width <= 0.0 {
            return 0.0;
        }
        (1.0 - depth / self.feather_width).clamp(0.0, 1.0)
    }

    /// Stroke strength at signed distance `sd`: band coverage times the ring gradient.
    ///
    /// The gradient is opaque one pixel inside the outline, transparent `stroke_feather` past it.
    pub(crate) fn stroke_at(&self, sd: f64) -> f64 {
        if self.stroke_width <= 0.0 {
            return 0.0;
        }
        let band = (self.stroke_width / 2.0 + 0.5 - sd.abs()).clamp(0.0, 1.0);
        if band <= 0.0 {
            return 0.0;
        }
        let ramp = ((self.stroke_feather - sd) / (self.stroke_feather + 1.0)).clamp(0.0, 1.0);
        band * ramp
    }
}

/// Composite the edge feather (clipped to the shape) and then the stroke over `buf`.
pub(crate) fn composite_edges(
    buf: &mut [u8],
    region: Region,
    geom: &LensGeometry,
    style: &EdgeStyle,
) {
    for y in 0..region.height {
        for x in 0..region.width {
            let p = region.pixel_center(x, y);
            let sd = geom.signed_distance(p);
            let idx = ((y as usize) * (region.width as usize) + (x as usize)) * 4;
            let Some(d) = buf.get_mut(idx..idx + 4) else {
                return;
            };
            let mut px = [d[0], d[1], d[2], d[3]];

            let coverage = (0.5 - sd).clamp(0.0, 1.0);
            if coverage > 0.0 {
                let k = style.feather_at(sd) * coverage;
                if k > 0.0 {
                    px = premul_over_px(px, style.highlight.scaled(k as f32).to_array());
                }
            }
            let s = style.stroke_at(sd);
            if s > 0.0 {
                px = premul_over_px(px, style.stroke_color.scaled(s as f32).to_array());
            }
            d.copy_from_slice(&px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/edge.rs"]
mod tests;
