use crate::foundation::error::{LensError, LensResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Host viewport in pixels. Updated by the host on resize.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport; no validation, cover-fit reports bad sizes.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The viewport as a `kurbo::Size`.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Normalize a screen-space point into `[0, 1]` viewport coordinates (unclamped).
    ///
    /// Returns the viewport center for an empty viewport.
    pub fn normalize(self, p: Point) -> Point {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Point::new(0.5, 0.5);
        }
        Point::new(p.x / self.width, p.y / self.height)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight-alpha color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Premultiply a straight-alpha `[r, g, b, a]` array.
    pub fn from_straight(rgba: [u8; 4]) -> Self {
        Self::from_straight_rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Scale every channel by `k` in `[0, 1]`. Stays premultiplied.
    pub fn scaled(self, k: f32) -> Self {
        let k = k.clamp(0.0, 1.0);
        let s = |c: u8| -> u8 { ((f32::from(c) * k) + 0.5).min(255.0) as u8 };
        Self {
            r: s(self.r),
            g: s(self.g),
            b: s(self.b),
            a: s(self.a),
        }
    }
}

/// Parse a `WxH` size string such as `1000x800`.
pub fn parse_size(s: &str) -> LensResult<Size> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| LensError::validation(format!("expected WxH, got '{s}'")))?;
    let w: f64 = w
        .trim()
        .parse()
        .map_err(|e| LensError::validation(format!("bad width in '{s}': {e}")))?;
    let h: f64 = h
        .trim()
        .parse()
        .map_err(|e| LensError::validation(format!("bad height in '{s}': {e}")))?;
    Ok(Size::new(w, h))
}

/// Parse an `X,Y` point string such as `500,400`.
pub fn parse_point(s: &str) -> LensResult<Point> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| LensError::validation(format!("expected X,Y, got '{s}'")))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| LensError::validation(format!("bad x in '{s}': {e}")))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| LensError::validation(format!("bad y in '{s}': {e}")))?;
    Ok(Point::new(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
