//! glasslens draws a pointer-following magnifying lens over a cover-fitted image.
//!
//! The image is placed to cover the viewport ([`cover_fit`]). A [`RadialLensRenderer`] draws the
//! zoomed (or displacement-warped) image inside a circular or rounded lens at the pointer, adds an
//! edge feather and stroke, and publishes the lens circle so other components can hit-test it.
//!
//! - Load a [`SourceImage`]
//! - Create a [`LensSession`] (or drive a [`RadialLensRenderer`] directly)
//! - Feed pointer events and call [`LensSession::tick`] once per frame with a [`RenderTarget`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame-based animation helpers: easing, pointer smoothing, frame scheduling.
pub mod animation;
pub mod assets;
pub mod fit;
pub mod lens;
pub mod render;
/// Frame-driven lens session.
pub mod session;

pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8Premul, Size, Vec2, Viewport, parse_point, parse_size,
};
pub use crate::foundation::error::{LensError, LensResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::follow::{PointerFollower, RadiusAnimator};
pub use crate::animation::frame_loop::{FrameLoop, LoopInputs, LoopState, LoopTransition};
pub use crate::assets::decode::SourceImage;
pub use crate::fit::cover::{CoverFit, CoverFitCache, cover_fit, cover_fit_or_zero};
pub use crate::lens::config::{LensConfig, LensPreset, LensShape, LensVariant};
pub use crate::lens::geometry::{LensGeometry, LensMapping};
pub use crate::lens::hit::{FloatingTag, TagOverlay};
pub use crate::lens::published::{LensCircle, LensPublisher, LensReader};
pub use crate::lens::state::{LensState, POINTER_LIMIT};
pub use crate::render::background::paint_cover_background;
pub use crate::render::cpu::{RadialLensRenderer, RenderOutcome};
pub use crate::render::displacement::{
    DisplacementCache, DisplacementMap, DisplacementShader, RadialRefraction, Shaded,
};
pub use crate::render::surface::{RenderTarget, Surface};
pub use crate::session::lens_session::{FrameReport, LensSession, OverlayId};
