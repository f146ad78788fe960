use crate::assets::decode::SourceImage;
use crate::fit::cover::CoverFit;
use crate::foundation::error::{LensError, LensResult};
use crate::foundation::math::premul_over_region;
use crate::render::cpu::affine_to_cpu;
use crate::render::surface::{RenderTarget, acquire};

/// Draw `image` cover-placed by `fit` over the whole of `target`.
///
/// A degenerate fit draws nothing.
pub fn paint_cover_background(
    target: &mut dyn RenderTarget,
    image: &SourceImage,
    fit: CoverFit,
) -> LensResult<()> {
    let (w, h, pixels) = acquire(target)?;
    if fit.is_degenerate() {
        tracing::debug!("degenerate cover fit; background skipped");
        return Ok(());
    }
    let w16: u16 = w
        .try_into()
        .map_err(|_| LensError::invalid_dimension("background width exceeds u16"))?;
    let h16: u16 = h
        .try_into()
        .map_err(|_| LensError::invalid_dimension("background height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(fit.image_to_screen(image.size())));
    ctx.set_paint(image.paint());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(image.width()),
        f64::from(image.height()),
    ));
    ctx.flush();

    let mut tmp = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut tmp);
    premul_over_region(pixels, w, h, tmp.data_as_u8_slice(), w, h, 0, 0)
}
