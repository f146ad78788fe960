use crate::assets::decode::SourceImage;
use crate::fit::cover::{CoverFit, CoverFitCache};
use crate::foundation::core::{Affine, BezPath, Point, Rgba8Premul, Vec2, Viewport};
use crate::foundation::error::{LensError, LensResult};
use crate::foundation::math::{premul_over_region, sample_bilinear};
use crate::lens::config::{LensConfig, LensVariant};
use crate::lens::geometry::LensGeometry;
use crate::lens::published::{LensCircle, LensPublisher, LensReader};
use crate::lens::state::LensState;
use crate::render::displacement::{DisplacementCache, DisplacementShader, RadialRefraction};
use crate::render::edge::{EdgeStyle, Region, composite_edges};
use crate::render::surface::{RenderTarget, acquire};

/// What a [`RadialLensRenderer::render`] call did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderOutcome {
    /// The lens was composited (possibly entirely off-target) and this circle published.
    Drawn(LensCircle),
    /// The lens is hidden (never pointed, `hide()` called, or zero radius); nothing drawn.
    Hidden,
    /// No source image yet; nothing drawn, published circle untouched.
    ImageNotReady,
}

/// Draws a magnifying (or displacement-warped) lens of a cover-placed image at the pointer, and
/// publishes the lens circle for hit-testing.
///
/// The magnify variant rasterizes through `vello_cpu` (image paint under a paint transform, filled
/// with the lens outline). The displacement variant samples per pixel. Both composite the edge
/// feather and stroke afterwards and blend the lens over the target.
pub struct RadialLensRenderer {
    config: LensConfig,
    edge: EdgeStyle,
    state: LensState,
    viewport: Viewport,
    visible: bool,

    image: Option<SourceImage>,
    fit_cache: CoverFitCache,
    publisher: LensPublisher,

    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,

    shader: Box<dyn DisplacementShader>,
    shader_generation: u64,
    maps: DisplacementCache,
}

impl std::fmt::Debug for RadialLensRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadialLensRenderer")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("visible", &self.visible)
            .field("image", &self.image)
            .field("published", &self.publisher.current())
            .finish_non_exhaustive()
    }
}

impl RadialLensRenderer {
    /// Create a hidden renderer. The lens shows after the first [`Self::set_pointer`].
    pub fn new(config: LensConfig, viewport: Viewport) -> LensResult<Self> {
        config.validate()?;
        Ok(Self {
            edge: EdgeStyle::from_config(&config),
            state: LensState::from_config(&config),
            shader: Box::new(shader_for(&config)),
            config,
            viewport,
            visible: false,
            image: None,
            fit_cache: CoverFitCache::new(),
            publisher: LensPublisher::new(),
            ctx: None,
            scratch: None,
            shader_generation: 0,
            maps: DisplacementCache::new(),
        })
    }

    /// Move the lens to the pointer and re-arm drawing after [`Self::hide`].
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.state.set_center(x, y);
        self.visible = true;
    }

    /// Clear the published circle and stop drawing until the next [`Self::set_pointer`].
    pub fn hide(&mut self) {
        self.visible = false;
        self.publisher.clear();
    }

    /// Whether the next render would draw (given an image and a target).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Install the backing image.
    pub fn set_image(&mut self, image: SourceImage) {
        self.image = Some(image);
    }

    /// Remove the backing image; renders become no-ops until a new one is set.
    pub fn clear_image(&mut self) -> Option<SourceImage> {
        self.image.take()
    }

    /// Whether a backing image is installed.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Update the host viewport (on resize).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Override the radius for the following renders (used by show/hide animation).
    pub fn set_radius(&mut self, radius: f64) {
        if radius.is_finite() {
            self.state.radius = radius.max(0.0);
        }
    }

    /// Override the magnification. Values below 1 or non-finite are rejected.
    pub fn set_magnification(&mut self, magnification: f64) -> LensResult<()> {
        if !magnification.is_finite() || magnification < 1.0 {
            return Err(LensError::validation(format!(
                "magnification must be finite and >= 1, got {magnification}"
            )));
        }
        self.state.magnification = magnification;
        Ok(())
    }

    /// Replace the configuration. Resets radius, shape, magnification and the shader.
    pub fn set_config(&mut self, config: LensConfig) -> LensResult<()> {
        config.validate()?;
        let center = self.state.center;
        self.state = LensState::from_config(&config);
        self.state.center = center;
        self.edge = EdgeStyle::from_config(&config);
        self.shader = Box::new(shader_for(&config));
        self.shader_generation = self.shader_generation.wrapping_add(1);
        self.config = config;
        Ok(())
    }

    /// Replace the displacement shader used by the displacement variant.
    pub fn set_shader(&mut self, shader: Box<dyn DisplacementShader>) {
        self.shader = shader;
        self.shader_generation = self.shader_generation.wrapping_add(1);
    }

    /// Active configuration.
    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    /// Current lens state.
    pub fn state(&self) -> &LensState {
        &self.state
    }

    /// The circle published by the last render, or `None` when hidden.
    pub fn published(&self) -> Option<LensCircle> {
        self.publisher.current()
    }

    /// A read handle on the published circle for other components.
    pub fn lens_reader(&self) -> LensReader {
        self.publisher.reader()
    }

    /// Cover fit of the current image in the current viewport.
    pub fn fit(&mut self) -> LensResult<CoverFit> {
        let image = self.image.as_ref().ok_or(LensError::ImageNotReady)?;
        Ok(self.fit_cache.get(image.size(), self.viewport.size()))
    }

    /// Number of displacement maps generated so far.
    pub fn displacement_builds(&self) -> u64 {
        self.maps.builds()
    }

    /// Draw the lens into `target` and publish its circle.
    ///
    /// Identical state, image, viewport and target contents produce identical pixels.
    pub fn render(&mut self, target: &mut dyn RenderTarget) -> LensResult<RenderOutcome> {
        if !self.visible {
            return Ok(RenderOutcome::Hidden);
        }
        let Some(image) = self.image.clone() else {
            tracing::debug!("lens render skipped: source image not ready");
            return Ok(RenderOutcome::ImageNotReady);
        };
        let (tw, th, pixels) = acquire(target)?;

        if self.state.radius <= 0.0 {
            self.publisher.clear();
            return Ok(RenderOutcome::Hidden);
        }

        let fit = self.fit_cache.get(image.size(), self.viewport.size());
        let geom = self.state.geometry();

        if let Some(region) = Region::for_lens(&geom, self.edge.overhang(), tw, th) {
            let mut scratch = self.take_scratch(region)?;
            clear_pixmap_to_transparent(&mut scratch);

            if !fit.is_degenerate() {
                match self.config.variant {
                    LensVariant::Magnify => {
                        self.draw_magnified(&image, fit, &geom, region, &mut scratch)?;
                    }
                    LensVariant::Displacement { scale, .. } => {
                        self.draw_displaced(
                            &image,
                            fit,
                            &geom,
                            region,
                            scale,
                            scratch.data_as_u8_slice_mut(),
                        );
                    }
                }
            }

            composite_edges(scratch.data_as_u8_slice_mut(), region, &geom, &self.edge);
            let res = premul_over_region(
                pixels,
                tw,
                th,
                scratch.data_as_u8_slice(),
                region.width,
                region.height,
                region.x0,
                region.y0,
            );
            self.scratch = Some(scratch);
            res?;
        }

        let circle = self.state.circle();
        self.publisher.publish(circle);
        Ok(RenderOutcome::Drawn(circle))
    }

    fn take_scratch(&mut self, region: Region) -> LensResult<vello_cpu::Pixmap> {
        let w: u16 = region
            .width
            .try_into()
            .map_err(|_| LensError::invalid_dimension("lens region width exceeds u16"))?;
        let h: u16 = region
            .height
            .try_into()
            .map_err(|_| LensError::invalid_dimension("lens region height exceeds u16"))?;
        Ok(match self.scratch.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> LensResult<R>,
    ) -> LensResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_magnified(
        &mut self,
        image: &SourceImage,
        fit: CoverFit,
        geom: &LensGeometry,
        region: Region,
        dst: &mut vello_cpu::Pixmap,
    ) -> LensResult<()> {
        let origin = Vec2::new(region.x0 as f64, region.y0 as f64);
        let paint = self.state.mapping().paint_affine() * fit.image_to_screen(image.size());
        let path = bezpath_to_cpu(&geom.path());
        self.with_ctx_mut(dst.width(), dst.height(), |ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_transform(affine_to_cpu(Affine::translate(-origin)));
            ctx.set_paint_transform(affine_to_cpu(paint));
            ctx.set_paint(image.paint());
            ctx.fill_path(&path);
            ctx.flush();
            ctx.render_to_pixmap(dst);
            Ok(())
        })
    }

    fn draw_displaced(
        &mut self,
        image: &SourceImage,
        fit: CoverFit,
        geom: &LensGeometry,
        region: Region,
        scale: f64,
        dst: &mut [u8],
    ) {
        let bounds = geom.bounds();
        let map_w = (bounds.width().ceil() as u32).max(1);
        let map_h = (bounds.height().ceil() as u32).max(1);
        let pointer = self.viewport.normalize(self.state.center);
        let map = self.maps.get(
            self.shader.as_ref(),
            self.shader_generation,
            map_w,
            map_h,
            pointer,
        );

        let mapping = self.state.mapping();
        let center = geom.center();
        let img_size = image.size();
        let (iw, ih) = (image.width(), image.height());
        let src = image.pixels();

        for y in 0..region.height {
            for x in 0..region.width {
                let p = region.pixel_center(x, y);
                let coverage = geom.coverage(p);
                if coverage <= 0.0 {
                    continue;
                }
                let d = map.offset_at(p - center, scale);
                let q = mapping.source_point(p + d);
                let Some(qi) = fit.screen_to_image(img_size, q) else {
                    continue;
                };
                let [r, g, b, a] = sample_bilinear(src, iw, ih, qi.x, qi.y);
                let px = Rgba8Premul { r, g, b, a }.scaled(coverage as f32);
                let i = ((y as usize) * (region.width as usize) + (x as usize)) * 4;
                if let Some(out) = dst.get_mut(i..i + 4) {
                    out.copy_from_slice(&px.to_array());
                }
            }
        }
    }
}

fn shader_for(config: &LensConfig) -> RadialRefraction {
    match config.variant {
        LensVariant::Displacement {
            rim,
            bias_x,
            bias_y,
            tilt,
            ..
        } => RadialRefraction {
            rim,
            bias: Vec2::new(bias_x, bias_y),
            tilt,
        },
        LensVariant::Magnify => RadialRefraction {
            rim: 0.5,
            bias: Vec2::ZERO,
            tilt: 0.0,
        },
    }
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pt(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
