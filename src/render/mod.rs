//! CPU rendering: drawing surfaces, the radial lens renderer and its displacement variant.

/// Cover-placed background pass.
pub mod background;
/// The radial lens renderer.
pub mod cpu;
/// Displacement map generation and sampling.
pub mod displacement;
/// Edge feather and stroke compositing.
pub(crate) mod edge;
/// Pixel surfaces and the render target seam.
pub mod surface;
