use crate::foundation::error::{LensError, LensResult};

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

pub(crate) fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

pub(crate) fn smoothstep(a: f64, b: f64, x: f64) -> f64 {
    if x <= a {
        return 0.0;
    }
    if x >= b {
        return 1.0;
    }
    let t = (x - a) / (b - a);
    (t * t * (3.0 - 2.0 * t)).clamp(0.0, 1.0)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Source-over for one premultiplied pixel.
pub(crate) fn premul_over_px(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(src[c], dc);
    }
    out
}

/// Source-over of `src` (a `src_w` x `src_h` premul buffer) onto `dst` at `(x0, y0)`.
///
/// Pixels falling outside `dst` are dropped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn premul_over_region(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x0: i64,
    y0: i64,
) -> LensResult<()> {
    let dst_len = (dst_w as usize)
        .saturating_mul(dst_h as usize)
        .saturating_mul(4);
    let src_len = (src_w as usize)
        .saturating_mul(src_h as usize)
        .saturating_mul(4);
    if dst.len() != dst_len || src.len() != src_len {
        return Err(LensError::target_unavailable(
            "premul_over_region expects buffers matching width*height*4",
        ));
    }
    for sy in 0..src_h as i64 {
        let dy = y0 + sy;
        if dy < 0 || dy >= i64::from(dst_h) {
            continue;
        }
        for sx in 0..src_w as i64 {
            let dx = x0 + sx;
            if dx < 0 || dx >= i64::from(dst_w) {
                continue;
            }
            let si = ((sy as usize) * (src_w as usize) + (sx as usize)) * 4;
            if src[si + 3] == 0 {
                continue;
            }
            let di = ((dy as usize) * (dst_w as usize) + (dx as usize)) * 4;
            let d = &mut dst[di..di + 4];
            let out = premul_over_px(
                [d[0], d[1], d[2], d[3]],
                [src[si], src[si + 1], src[si + 2], src[si + 3]],
            );
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in px.iter_mut().take(3) {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Bilinear sample of a premultiplied RGBA8 buffer at continuous pixel coordinates.
///
/// Pixel `(i, j)` has its center at `(i + 0.5, j + 0.5)`. Coordinates clamp to the edge.
pub(crate) fn sample_bilinear(src: &[u8], width: u32, height: u32, x: f64, y: f64) -> [u8; 4] {
    if width == 0 || height == 0 {
        return [0, 0, 0, 0];
    }
    let max_x = f64::from(width - 1);
    let max_y = f64::from(height - 1);
    let fx = (x - 0.5).clamp(0.0, max_x);
    let fy = (y - 0.5).clamp(0.0, max_y);
    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);
    let tx = fx - f64::from(x0);
    let ty = fy - f64::from(y0);

    let px = |xx: u32, yy: u32| -> [u8; 4] {
        let i = ((yy as usize) * (width as usize) + (xx as usize)) * 4;
        [src[i], src[i + 1], src[i + 2], src[i + 3]]
    };
    let a = px(x0, y0);
    let b = px(x1, y0);
    let c = px(x0, y1);
    let d = px(x1, y1);

    let mut out = [0u8; 4];
    for ch in 0..4 {
        let top = lerp(f64::from(a[ch]), f64::from(b[ch]), tx);
        let bottom = lerp(f64::from(c[ch]), f64::from(d[ch]), tx);
        out[ch] = lerp(top, bottom, ty).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
