//! Lens model: configuration, per-frame state, shape geometry, the published lens circle and
//! hit-testing against it.

/// Lens configuration table and per-site presets.
pub mod config;
/// Shape geometry: signed distance, bounds, magnification mapping.
pub mod geometry;
/// Circle-vs-rectangle hit testing and floating-tag visibility.
pub mod hit;
/// Single-writer / multi-reader published lens circle.
pub mod published;
/// Mutable per-frame lens state.
pub mod state;
