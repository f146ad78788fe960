use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::smoothstep;

/// One displacement sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shaded {
    /// Offset in channel units, each axis in `[-0.5, 0.5]` (0 = mid-gray, no displacement).
    pub offset: Vec2,
    /// Whether this sample depended on the pointer position.
    pub reads_pointer: bool,
}

/// Produces displacement samples over the lens.
///
/// `uv` is the lens-local position normalized to the shape's half extents (`[-1, 1]` on each axis
/// inside the bounds). `pointer` is the pointer position normalized to the viewport.
pub trait DisplacementShader {
    /// Sample the displacement at `uv`.
    fn shade(&self, uv: Vec2, pointer: Point) -> Shaded;
}

/// Radial glass refraction: no displacement in the middle, pulling toward the center near the rim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialRefraction {
    /// Normalized distance where the refraction starts, in `[0, 1)`.
    pub rim: f64,
    /// Constant directional bias in channel units.
    pub bias: Vec2,
    /// Strength of the pointer-position tilt; 0 leaves the pointer unread.
    pub tilt: f64,
}

impl DisplacementShader for RadialRefraction {
    fn shade(&self, uv: Vec2, pointer: Point) -> Shaded {
        let d = uv.hypot();
        let s = smoothstep(self.rim, 1.0, d);
        let dir = if d > 0.0 { uv / d } else { Vec2::ZERO };
        let mut offset = -dir * (0.5 * s) + self.bias * s;
        let reads_pointer = self.tilt != 0.0;
        if reads_pointer {
            let from_mid = pointer - Point::new(0.5, 0.5);
            offset += from_mid * (self.tilt * s);
        }
        Shaded {
            offset: Vec2::new(offset.x.clamp(-0.5, 0.5), offset.y.clamp(-0.5, 0.5)),
            reads_pointer,
        }
    }
}

/// A displacement texture: R encodes x, G encodes y, mid-gray is no displacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplacementMap {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
    reads_pointer: bool,
}

impl DisplacementMap {
    /// Rasterize `shader` into a `width` x `height` texture covering the lens bounds.
    pub fn generate(
        shader: &dyn DisplacementShader,
        width: u32,
        height: u32,
        pointer: Point,
    ) -> Self {
        let mut rgba = Vec::with_capacity((width as usize) * (height as usize) * 4);
        let mut reads_pointer = false;
        let hw = f64::from(width.max(1)) / 2.0;
        let hh = f64::from(height.max(1)) / 2.0;
        for y in 0..height {
            for x in 0..width {
                let uv = Vec2::new(
                    (f64::from(x) + 0.5 - hw) / hw,
                    (f64::from(y) + 0.5 - hh) / hh,
                );
                let s = shader.shade(uv, pointer);
                reads_pointer |= s.reads_pointer;
                rgba.extend_from_slice(&[
                    encode_channel(s.offset.x),
                    encode_channel(s.offset.y),
                    128,
                    255,
                ]);
            }
        }
        Self {
            width,
            height,
            rgba,
            reads_pointer,
        }
    }

    /// Texture width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA texture.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Whether any texel depended on the pointer; such maps are rebuilt when it moves.
    pub fn reads_pointer(&self) -> bool {
        self.reads_pointer
    }

    /// Pixel offset at a lens-local position (relative to the lens center).
    ///
    /// `scale * (channel - 0.5)` per axis, nearest texel, clamped to the texture.
    pub fn offset_at(&self, local: Vec2, scale: f64) -> Vec2 {
        if self.width == 0 || self.height == 0 {
            return Vec2::ZERO;
        }
        let tx = (local.x + f64::from(self.width) / 2.0).floor();
        let ty = (local.y + f64::from(self.height) / 2.0).floor();
        let tx = tx.clamp(0.0, f64::from(self.width - 1)) as usize;
        let ty = ty.clamp(0.0, f64::from(self.height - 1)) as usize;
        let i = (ty * (self.width as usize) + tx) * 4;
        Vec2::new(
            scale * (f64::from(self.rgba[i]) / 255.0 - 0.5),
            scale * (f64::from(self.rgba[i + 1]) / 255.0 - 0.5),
        )
    }
}

fn encode_channel(offset: f64) -> u8 {
    ((0.5 + offset).clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct MapKey {
    width: u32,
    height: u32,
    generation: u64,
    pointer: Option<(u64, u64)>,
}

/// Keeps the last displacement map and rebuilds it only when an input it depends on changes.
#[derive(Debug, Default)]
pub struct DisplacementCache {
    key: Option<MapKey>,
    map: Option<DisplacementMap>,
    builds: u64,
}

impl DisplacementCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a map for the given size, shader generation and pointer.
    ///
    /// The pointer only participates in the cache key when the cached map reported reading it.
    pub fn get(
        &mut self,
        shader: &dyn DisplacementShader,
        generation: u64,
        width: u32,
        height: u32,
        pointer: Point,
    ) -> &DisplacementMap {
        let pointer_bits = (pointer.x.to_bits(), pointer.y.to_bits());
        let fresh = match (self.key, self.map.as_ref()) {
            (Some(k), Some(m)) => {
                k.width == width
                    && k.height == height
                    && k.generation == generation
                    && (!m.reads_pointer() || k.pointer == Some(pointer_bits))
            }
            _ => false,
        };
        if !fresh {
            let map = DisplacementMap::generate(shader, width, height, pointer);
            self.key = Some(MapKey {
                width,
                height,
                generation,
                pointer: map.reads_pointer().then_some(pointer_bits),
            });
            self.map = Some(map);
            self.builds = self.builds.saturating_add(1);
        }
        self.map
            .get_or_insert_with(|| DisplacementMap::generate(shader, width, height, pointer))
    }

    /// How many maps have been generated.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/displacement.rs"]
mod tests;
