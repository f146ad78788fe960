//! Source image loading: raster decode and SVG rasterization into premultiplied RGBA8.

/// Raster/SVG decoding into [`SourceImage`](decode::SourceImage).
pub mod decode;
pub(crate) mod svg_raster;
