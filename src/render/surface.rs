use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{LensError, LensResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// Anything the lens can draw into: a premultiplied RGBA8, row-major pixel buffer.
pub trait RenderTarget {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;
    /// Mutable premultiplied RGBA8 pixels, or `None` when the surface is unavailable.
    fn pixels_mut(&mut self) -> Option<&mut [u8]>;
}

/// Validate `target` and hand back `(width, height, pixels)`.
pub(crate) fn acquire(target: &mut dyn RenderTarget) -> LensResult<(u32, u32, &mut [u8])> {
    let (w, h) = (target.width(), target.height());
    if w == 0 || h == 0 {
        return Err(LensError::target_unavailable(format!("surface is empty ({w}x{h})")));
    }
    let Some(px) = target.pixels_mut() else {
        return Err(LensError::target_unavailable("surface pixels not available"));
    };
    let expected = (w as usize).saturating_mul(h as usize).saturating_mul(4);
    if px.len() != expected {
        return Err(LensError::target_unavailable(format!(
            "surface buffer is {} bytes, expected {expected} for {w}x{h}",
            px.len()
        )));
    }
    Ok((w, h, px))
}

/// An owned premultiplied RGBA8 frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, premultiplied, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Surface {
    /// A transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8Premul::transparent())
    }

    /// A surface filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let n = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            data: color.to_array().repeat(n),
        }
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    /// Write the surface as a PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> LensResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

impl RenderTarget for Surface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        Some(&mut self.data)
    }
}

impl RenderTarget for vello_cpu::Pixmap {
    fn width(&self) -> u32 {
        u32::from(vello_cpu::Pixmap::width(self))
    }

    fn height(&self) -> u32 {
        u32::from(vello_cpu::Pixmap::height(self))
    }

    fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        Some(self.data_as_u8_slice_mut())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
