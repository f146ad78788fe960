use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::{Rgba8Premul, Size};
use crate::foundation::error::{LensError, LensResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// A loaded backing image in premultiplied RGBA8, ready to be drawn by the lens renderer.
///
/// Immutable once built; clones share the pixel buffer.
#[derive(Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl SourceImage {
    /// Build from tightly packed, row-major premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> LensResult<Self> {
        if width == 0 || height == 0 {
            return Err(LensError::invalid_dimension(format!(
                "source image must be non-empty, got {width}x{height}"
            )));
        }
        let pixmap = pixmap_from_premul_bytes(&rgba8_premul, width, height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
            paint,
        })
    }

    /// Build from straight-alpha RGBA8 pixels.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> LensResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }

    /// A single-color image, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> LensResult<Self> {
        let px = Rgba8Premul::from_straight(rgba).to_array();
        let n = (width as usize).saturating_mul(height as usize);
        Self::from_premul_rgba8(width, height, px.repeat(n))
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
    pub fn decode(bytes: &[u8]) -> LensResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight_rgba8(width, height, rgba.into_raw())
    }

    /// Read and decode an image file. `.svg` files are rasterized at their intrinsic size.
    #[tracing::instrument]
    pub fn open(path: &Path) -> LensResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            LensError::asset(format!("failed to read image '{}': {e}", path.display()))
        })?;
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            return Self::from_svg(&bytes, None);
        }
        Self::decode(&bytes)
    }

    /// Rasterize SVG bytes. With `size = None` the intrinsic SVG size is used.
    pub fn from_svg(bytes: &[u8], size: Option<(u32, u32)>) -> LensResult<Self> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
        let (w, h) = match size {
            Some(s) => s,
            None => crate::assets::svg_raster::intrinsic_raster_size(&tree)?,
        };
        let premul = crate::assets::svg_raster::rasterize_svg_to_premul_rgba8(&tree, w, h)?;
        Self::from_premul_rgba8(w, h, premul)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic size as a `kurbo::Size`.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Premultiplied RGBA8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub(crate) fn paint(&self) -> vello_cpu::Image {
        self.paint.clone()
    }
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> LensResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| LensError::invalid_dimension("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| LensError::invalid_dimension("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(LensError::asset("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
