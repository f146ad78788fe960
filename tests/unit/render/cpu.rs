use super::*;
use crate::lens::config::LensShape;
use crate::render::surface::Surface;

fn small_config() -> LensConfig {
    LensConfig {
        radius: 20.0,
        magnification: 2.0,
        feather_width: 4.0,
        ..LensConfig::default()
    }
}

fn renderer_with_image(config: LensConfig) -> RadialLensRenderer {
    let mut r = RadialLensRenderer::new(config, Viewport::new(100.0, 80.0)).unwrap();
    r.set_image(SourceImage::solid(100, 80, [40, 80, 160, 255]).unwrap());
    r
}

#[test]
fn starts_hidden_and_draws_nothing() {
    let mut r = renderer_with_image(small_config());
    let mut s = Surface::new(100, 80);
    assert_eq!(r.render(&mut s).unwrap(), RenderOutcome::Hidden);
    assert!(s.data.iter().all(|&b| b == 0));
    assert_eq!(r.published(), None);
}

#[test]
fn without_image_reports_not_ready_and_publishes_nothing() {
    let mut r = RadialLensRenderer::new(small_config(), Viewport::new(100.0, 80.0)).unwrap();
    r.set_pointer(50.0, 40.0);
    let mut s = Surface::new(100, 80);
    assert_eq!(r.render(&mut s).unwrap(), RenderOutcome::ImageNotReady);
    assert!(s.data.iter().all(|&b| b == 0));
    assert_eq!(r.published(), None);
    assert!(matches!(r.fit(), Err(LensError::ImageNotReady)));
}

#[test]
fn removing_the_image_keeps_last_circle_and_pixels() {
    let mut r = renderer_with_image(small_config());
    r.set_pointer(50.0, 40.0);
    let mut s = Surface::new(100, 80);
    let RenderOutcome::Drawn(c) = r.render(&mut s).unwrap() else {
        panic!("lens not drawn");
    };
    let before = s.clone();

    assert!(r.clear_image().is_some());
    r.set_pointer(20.0, 20.0);
    assert_eq!(r.render(&mut s).unwrap(), RenderOutcome::ImageNotReady);
    assert_eq!(r.published(), Some(c));
    assert_eq!(s, before);
}

#[test]
fn draws_inside_the_lens_only_and_publishes() {
    let mut r = renderer_with_image(small_config());
    r.set_pointer(50.0, 40.0);
    let mut s = Surface::new(100, 80);
    let out = r.render(&mut s).unwrap();
    let circle = LensCircle {
        x: 50.0,
        y: 40.0,
        r: 20.0,
    };
    assert_eq!(out, RenderOutcome::Drawn(circle));
    assert_eq!(r.published(), Some(circle));
    assert_eq!(r.lens_reader().get(), Some(circle));

    assert_eq!(s.pixel(50, 40).unwrap()[3], 255);
    assert_eq!(s.pixel(2, 2).unwrap(), [0, 0, 0, 0]);
    assert_eq!(s.pixel(50, 10).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn render_is_idempotent() {
    let mut r = renderer_with_image(small_config());
    r.set_pointer(31.5, 47.25);
    let mut a = Surface::new(100, 80);
    let mut b = Surface::new(100, 80);
    r.render(&mut a).unwrap();
    r.render(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn hide_clears_until_next_pointer() {
    let mut r = renderer_with_image(small_config());
    r.set_pointer(50.0, 40.0);
    let mut s = Surface::new(100, 80);
    r.render(&mut s).unwrap();
    r.hide();
    assert_eq!(r.published(), None);
    assert!(!r.is_visible());
    assert_eq!(r.render(&mut s).unwrap(), RenderOutcome::Hidden);
    assert_eq!(r.published(), None);

    r.set_pointer(10.0, 10.0);
    assert!(matches!(r.render(&mut s).unwrap(), RenderOutcome::Drawn(_)));
}

#[test]
fn zero_radius_clears_the_circle() {
    let mut r = renderer_with_image(small_config());
    r.set_pointer(50.0, 40.0);
    let mut s = Surface::new(100, 80);
    r.render(&mut s).unwrap();
    r.set_radius(0.0);
    let mut fresh = Surface::new(100, 80);
    assert_eq!(r.render(&mut fresh).unwrap(), RenderOutcome::Hidden);
    assert_eq!(r.published(), None);
    assert!(fresh.data.iter().all(|&b| b == 0));
}

#[test]
fn invalid_targets_are_unavailable() {
    let mut r = renderer_with_image(small_config());
    r.set_pointer(50.0, 40.0);

    let mut empty = Surface::new(0, 0);
    assert!(matches!(
        r.render(&mut empty),
        Err(LensError::RenderTargetUnavailable(_))
    ));

    let mut short = Surface {
        width: 10,
        height: 10,
        data: vec![0; 12],
    };
    assert!(matches!(
        r.render(&mut short),
        Err(LensError::RenderTargetUnavailable(_))
    ));
    assert_eq!(r.published(), None);
}

#[test]
fn off_target_pointer_still_publishes() {
    let mut r = renderer_with_image(small_config());
    r.set_pointer(-500.0, 900.0);
    let mut s = Surface::new(100, 80);
    let out = r.render(&mut s).unwrap();
    assert!(matches!(out, RenderOutcome::Drawn(c) if c.x == -500.0 && c.y == 900.0));
    assert!(s.data.iter().all(|&b| b == 0));
}

#[test]
fn degenerate_viewport_keeps_edges_and_publishes() {
    let mut r = RadialLensRenderer::new(small_config(), Viewport::new(0.0, 0.0)).unwrap();
    r.set_image(SourceImage::solid(10, 10, [255, 0, 0, 255]).unwrap());
    r.set_pointer(50.0, 40.0);
    let mut s = Surface::new(100, 80);
    assert!(matches!(r.render(&mut s).unwrap(), RenderOutcome::Drawn(_)));
    assert!(r.fit().unwrap().is_degenerate());

    // Stroke on the rim, nothing from the image in the middle.
    assert!(s.pixel(70, 40).unwrap()[3] > 0);
    assert_eq!(s.pixel(50, 40).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn rounded_shape_publishes_bounding_radius() {
    let cfg = LensConfig {
        shape: LensShape::Rounded {
            stretch_x: 1.5,
            stretch_y: 1.0,
            corner_ratio: 0.0,
            corner_cap: 0.0,
        },
        ..small_config()
    };
    let mut r = renderer_with_image(cfg);
    r.set_pointer(50.0, 40.0);
    let mut s = Surface::new(100, 80);
    let RenderOutcome::Drawn(c) = r.render(&mut s).unwrap() else {
        panic!("expected a drawn lens");
    };
    let expected = (30.0f64 * 30.0 + 20.0 * 20.0).sqrt();
    assert!((c.r - expected).abs() < 1e-9, "{}", c.r);
}

#[test]
fn magnification_below_one_is_rejected() {
    let mut r = renderer_with_image(small_config());
    assert!(r.set_magnification(0.5).is_err());
    assert!(r.set_magnification(f64::NAN).is_err());
    r.set_magnification(1.0).unwrap();
    assert_eq!(r.state().magnification, 1.0);
}

#[test]
fn displacement_map_is_reused_when_pointer_is_not_read() {
    let cfg = LensConfig {
        variant: LensVariant::Displacement {
            scale: 8.0,
            rim: 0.5,
            bias_x: 0.0,
            bias_y: 0.0,
            tilt: 0.0,
        },
        ..small_config()
    };
    let mut r = renderer_with_image(cfg);
    let mut s = Surface::new(100, 80);
    r.set_pointer(50.0, 40.0);
    r.render(&mut s).unwrap();
    r.set_pointer(30.0, 30.0);
    r.render(&mut s).unwrap();
    assert_eq!(r.displacement_builds(), 1);
    assert!(s.pixel(30, 30).unwrap()[3] > 0);

    r.set_shader(Box::new(RadialRefraction {
        rim: 0.5,
        bias: Vec2::ZERO,
        tilt: 0.3,
    }));
    r.render(&mut s).unwrap();
    r.set_pointer(60.0, 30.0);
    r.render(&mut s).unwrap();
    assert_eq!(r.displacement_builds(), 3);
}
