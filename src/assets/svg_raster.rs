use crate::foundation::error::{LensError, LensResult};

// Backing images larger than this are a caller bug, not something to allocate.
const MAX_DIM: u32 = 16_384;

pub(crate) fn intrinsic_raster_size(tree: &usvg::Tree) -> LensResult<(u32, u32)> {
    fn to_px(v: f32) -> LensResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(LensError::invalid_dimension("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    Ok((to_px(size.width())?, to_px(size.height())?))
}

pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> LensResult<Vec<u8>> {
    if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
        return Err(LensError::invalid_dimension(format!(
            "svg raster size out of range: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| LensError::asset("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    // tiny-skia pixmaps are premultiplied RGBA8 already.
    Ok(pixmap.data().to_vec())
}
