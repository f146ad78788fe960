use crate::foundation::core::{Affine, Point, Size, Vec2};
use crate::foundation::error::{LensError, LensResult};

/// Placement of an image that covers a viewport with preserved aspect ratio.
///
/// The draw rectangle is at least as large as the viewport; the offsets (usually negative on the
/// overflowing axis) center it so the overflow is cropped evenly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoverFit {
    /// Width the image is drawn at, in viewport pixels.
    pub draw_width: f64,
    /// Height the image is drawn at, in viewport pixels.
    pub draw_height: f64,
    /// Horizontal placement of the draw rectangle.
    pub offset_x: f64,
    /// Vertical placement of the draw rectangle.
    pub offset_y: f64,
}

impl CoverFit {
    /// The degenerate fit used when inputs are invalid.
    pub const ZERO: Self = Self {
        draw_width: 0.0,
        draw_height: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Whether this fit draws nothing.
    pub fn is_degenerate(&self) -> bool {
        self.draw_width <= 0.0 || self.draw_height <= 0.0
    }

    /// Top-left of the draw rectangle.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Affine mapping image pixel coordinates into viewport coordinates.
    pub fn image_to_screen(&self, image: Size) -> Affine {
        if self.is_degenerate() || image.width <= 0.0 || image.height <= 0.0 {
            return Affine::scale(0.0);
        }
        Affine::translate(self.offset())
            * Affine::scale_non_uniform(
                self.draw_width / image.width,
                self.draw_height / image.height,
            )
    }

    /// Map a viewport point back into image pixel coordinates.
    ///
    /// Returns `None` for a degenerate fit.
    pub fn screen_to_image(&self, image: Size, p: Point) -> Option<Point> {
        if self.is_degenerate() {
            return None;
        }
        Some(Point::new(
            (p.x - self.offset_x) * image.width / self.draw_width,
            (p.y - self.offset_y) * image.height / self.draw_height,
        ))
    }
}

fn check_dim(what: &str, v: f64) -> LensResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(LensError::invalid_dimension(format!(
            "{what} must be finite and > 0, got {v}"
        )));
    }
    Ok(())
}

/// Compute the cover placement of `image` inside `viewport`.
pub fn cover_fit(image: Size, viewport: Size) -> LensResult<CoverFit> {
    check_dim("image width", image.width)?;
    check_dim("image height", image.height)?;
    check_dim("viewport width", viewport.width)?;
    check_dim("viewport height", viewport.height)?;

    let image_aspect = image.width / image.height;
    let viewport_aspect = viewport.width / viewport.height;

    let (draw_width, draw_height) = if viewport_aspect > image_aspect {
        let w = viewport.width;
        (w, w / image_aspect)
    } else {
        let h = viewport.height;
        (image_aspect * h, h)
    };

    Ok(CoverFit {
        draw_width,
        draw_height,
        offset_x: (viewport.width - draw_width) / 2.0,
        offset_y: (viewport.height - draw_height) / 2.0,
    })
}

/// [`cover_fit`] that logs invalid input and recovers with [`CoverFit::ZERO`].
pub fn cover_fit_or_zero(image: Size, viewport: Size) -> CoverFit {
    match cover_fit(image, viewport) {
        Ok(fit) => fit,
        Err(e) => {
            tracing::warn!(error = %e, "cover fit failed; using zero-size fit");
            CoverFit::ZERO
        }
    }
}

/// Caches the last cover fit; recomputes only when the image or viewport size changes.
#[derive(Clone, Debug, Default)]
pub struct CoverFitCache {
    key: Option<(Size, Size)>,
    fit: Option<CoverFit>,
    recomputes: u64,
}

impl CoverFitCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the fit for `(image, viewport)`, recomputing on change.
    pub fn get(&mut self, image: Size, viewport: Size) -> CoverFit {
        if self.key == Some((image, viewport))
            && let Some(fit) = self.fit
        {
            return fit;
        }
        let fit = cover_fit_or_zero(image, viewport);
        self.key = Some((image, viewport));
        self.fit = Some(fit);
        self.recomputes = self.recomputes.saturating_add(1);
        fit
    }

    /// Drop the cached fit.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.fit = None;
    }

    /// How many times the fit has been computed.
    pub fn recomputes(&self) -> u64 {
        self.recomputes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fit/cover.rs"]
mod tests;
