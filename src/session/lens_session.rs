use crate::animation::ease::Ease;
use crate::animation::follow::{PointerFollower, RadiusAnimator};
use crate::animation::frame_loop::{FrameLoop, LoopInputs, LoopTransition};
use crate::assets::decode::SourceImage;
use crate::foundation::core::{Point, Viewport};
use crate::foundation::error::{LensError, LensResult};
use crate::lens::config::LensConfig;
use crate::lens::hit::{FloatingTag, TagOverlay};
use crate::lens::state::clamp_coord;
use crate::render::cpu::{RadialLensRenderer, RenderOutcome};
use crate::render::surface::RenderTarget;

/// Handle to an overlay attached with [`LensSession::attach_overlay`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OverlayId(usize);

/// What one [`LensSession::tick`] did.
#[derive(Debug)]
pub struct FrameReport {
    /// Zero-based tick counter.
    pub frame: u64,
    /// Render result, or `None` when the render failed (see `error`).
    pub outcome: Option<RenderOutcome>,
    /// Render failure, already logged. The session keeps running.
    pub error: Option<LensError>,
    /// Radius used for this frame.
    pub radius: f64,
    /// Smoothed lens center used for this frame.
    pub center: Option<Point>,
    /// Visible tags summed over all overlays, after this frame's refresh.
    pub visible_tags: usize,
    /// Frame loop decision taken at the end of the tick.
    pub transition: LoopTransition,
}

/// Single-threaded driver: feed pointer events, call [`Self::tick`] once per frame.
///
/// Within a tick the lens is moved, rendered and published before any overlay reads it.
pub struct LensSession {
    renderer: RadialLensRenderer,
    follower: PointerFollower,
    radius: RadiusAnimator,
    frame_loop: FrameLoop,
    overlays: Vec<TagOverlay>,
    pointer: Point,
    pointer_active: bool,
    frames: u64,
}

impl LensSession {
    /// Create an idle session with no image.
    pub fn new(config: LensConfig, viewport: Viewport) -> LensResult<Self> {
        let follower = PointerFollower::new(config.follow, config.snap_distance);
        let radius = RadiusAnimator::new(config.radius, config.show_frames, Ease::OutCubic);
        let renderer = RadialLensRenderer::new(config, viewport)?;
        Ok(Self {
            renderer,
            follower,
            radius,
            frame_loop: FrameLoop::new(),
            overlays: Vec::new(),
            pointer: Point::ZERO,
            pointer_active: false,
            frames: 0,
        })
    }

    /// Install (or replace) the source image.
    pub fn set_image(&mut self, image: SourceImage) {
        self.renderer.set_image(image);
    }

    /// The host viewport changed size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.renderer.set_viewport(viewport);
    }

    /// Replace the lens configuration, keeping the current pointer and animation progress.
    pub fn set_config(&mut self, config: LensConfig) -> LensResult<()> {
        self.renderer.set_config(config.clone())?;
        self.follower = PointerFollower::new(config.follow, config.snap_distance);
        if self.pointer_active {
            self.follower.set_target(self.pointer);
        }
        self.radius.set_full_radius(config.radius);
        Ok(())
    }

    /// Pointer moved over the host. Starts the show animation on first entry.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(
            clamp_coord(x, self.pointer.x),
            clamp_coord(y, self.pointer.y),
        );
        self.pointer_active = true;
        self.follower.set_target(self.pointer);
        self.radius.show();
    }

    /// Pointer left the host. Starts the hide animation.
    pub fn pointer_leave(&mut self) {
        self.pointer_active = false;
        self.radius.hide();
    }

    /// Attach tags that follow the published lens circle.
    pub fn attach_overlay(&mut self, tags: Vec<FloatingTag>) -> OverlayId {
        self.overlays
            .push(TagOverlay::new(self.renderer.lens_reader(), tags));
        OverlayId(self.overlays.len() - 1)
    }

    /// An attached overlay.
    pub fn overlay(&self, id: OverlayId) -> Option<&TagOverlay> {
        self.overlays.get(id.0)
    }

    /// An attached overlay, for moving its tags.
    pub fn overlay_mut(&mut self, id: OverlayId) -> Option<&mut TagOverlay> {
        self.overlays.get_mut(id.0)
    }

    /// The underlying renderer.
    pub fn renderer(&self) -> &RadialLensRenderer {
        &self.renderer
    }

    /// Whether the host should keep requesting frames.
    pub fn is_animating(&self) -> bool {
        self.frame_loop.is_animating()
    }

    /// Run one frame: animate, render into `target`, refresh overlays, decide on the next frame.
    pub fn tick(&mut self, target: &mut dyn RenderTarget) -> FrameReport {
        let frame = self.frames;
        self.frames = self.frames.saturating_add(1);

        let center = self.follower.step();
        let radius = self.radius.step();
        if self.radius.is_hidden() {
            self.renderer.hide();
            if !self.pointer_active {
                self.follower.reset();
            }
        } else if let Some(c) = center {
            self.renderer.set_radius(radius);
            self.renderer.set_pointer(c.x, c.y);
        }

        let (outcome, error) = match self.renderer.render(target) {
            Ok(outcome) => (Some(outcome), None),
            Err(err) => {
                tracing::warn!(frame, error = %err, "lens render failed; frame skipped");
                (None, Some(err))
            }
        };

        let visible_tags = self.overlays.iter_mut().map(TagOverlay::refresh).sum();

        let transition = self.frame_loop.decide(LoopInputs {
            pointer_active: self.pointer_active,
            lens_visible: self.renderer.is_visible(),
            pending_motion: !self.follower.is_settled() || self.radius.is_animating(),
        });

        FrameReport {
            frame,
            outcome,
            error,
            radius,
            center,
            visible_tags,
            transition,
        }
    }
}

impl std::fmt::Debug for LensSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LensSession")
            .field("renderer", &self.renderer)
            .field("pointer", &self.pointer)
            .field("pointer_active", &self.pointer_active)
            .field("frames", &self.frames)
            .field("overlays", &self.overlays.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/lens_session.rs"]
mod tests;
