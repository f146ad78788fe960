use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn smoothstep_clamps_and_is_monotonic() {
    assert_eq!(smoothstep(1.0, 2.0, 0.0), 0.0);
    assert_eq!(smoothstep(1.0, 2.0, 3.0), 1.0);
    let mid = smoothstep(1.0, 2.0, 1.5);
    assert!((mid - 0.5).abs() < 1e-12);
    assert!(smoothstep(1.0, 2.0, 1.25) < mid);
}

#[test]
fn over_opaque_replaces_and_transparent_is_noop() {
    let dst = [10, 20, 30, 255];
    assert_eq!(premul_over_px(dst, [200, 0, 0, 255]), [200, 0, 0, 255]);
    assert_eq!(premul_over_px(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_region_clips_to_destination() {
    let mut dst = vec![0u8; 2 * 2 * 4];
    let src = [255u8, 255, 255, 255].repeat(4);
    premul_over_region(&mut dst, 2, 2, &src, 2, 2, 1, 1).unwrap();
    let opaque = dst.chunks_exact(4).filter(|p| p[3] == 255).count();
    assert_eq!(opaque, 1);
    assert_eq!(&dst[12..16], &[255, 255, 255, 255]);

    let mut wrong = vec![0u8; 3];
    assert!(premul_over_region(&mut wrong, 2, 2, &src, 2, 2, 0, 0).is_err());
}

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_and_zeroes_transparent() {
    let mut px = vec![100, 150, 200, 255, 100, 150, 200, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[100, 150, 200, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);

    let mut half = vec![50, 25, 0, 128];
    unpremultiply_rgba8_in_place(&mut half);
    assert_eq!(half, vec![100, 50, 0, 128]);
}

#[test]
fn bilinear_hits_pixel_centers_exactly() {
    // 2x1: black, white
    let src = vec![0, 0, 0, 255, 255, 255, 255, 255];
    assert_eq!(sample_bilinear(&src, 2, 1, 0.5, 0.5), [0, 0, 0, 255]);
    assert_eq!(sample_bilinear(&src, 2, 1, 1.5, 0.5), [255, 255, 255, 255]);
    let mid = sample_bilinear(&src, 2, 1, 1.0, 0.5);
    assert!((i32::from(mid[0]) - 128).abs() <= 1);
    // Clamped outside.
    assert_eq!(sample_bilinear(&src, 2, 1, -10.0, 0.5), [0, 0, 0, 255]);
    assert_eq!(sample_bilinear(&[], 0, 0, 0.0, 0.0), [0, 0, 0, 0]);
}
