//! Cover-fit placement of a source image inside a viewport.

/// `background-size: cover` math and a resize-driven cache.
pub mod cover;
