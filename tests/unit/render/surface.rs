use super::*;

struct Detached;

impl RenderTarget for Detached {
    fn width(&self) -> u32 {
        4
    }
    fn height(&self) -> u32 {
        4
    }
    fn pixels_mut(&mut self) -> Option<&mut [u8]> {
        None
    }
}

#[test]
fn acquire_accepts_matching_surface() {
    let mut s = Surface::new(3, 2);
    let (w, h, px) = acquire(&mut s).unwrap();
    assert_eq!((w, h, px.len()), (3, 2, 24));
}

#[test]
fn acquire_rejects_broken_targets() {
    let mut empty = Surface::new(0, 5);
    assert!(matches!(
        acquire(&mut empty),
        Err(LensError::RenderTargetUnavailable(_))
    ));

    let mut short = Surface::new(2, 2);
    short.data.truncate(3);
    assert!(matches!(
        acquire(&mut short),
        Err(LensError::RenderTargetUnavailable(_))
    ));

    assert!(matches!(
        acquire(&mut Detached),
        Err(LensError::RenderTargetUnavailable(_))
    ));
}

#[test]
fn pixmap_is_a_render_target() {
    let mut pm = vello_cpu::Pixmap::new(5, 3);
    let (w, h, px) = acquire(&mut pm).unwrap();
    assert_eq!((w, h, px.len()), (5, 3, 60));
}

#[test]
fn pixel_and_straight_conversion() {
    let s = Surface::filled(2, 2, Rgba8Premul::from_straight_rgba(200, 100, 0, 128));
    assert_eq!(s.pixel(1, 1), Some([100, 50, 0, 128]));
    assert_eq!(s.pixel(2, 0), None);
    let straight = s.to_straight_rgba8();
    assert!((i32::from(straight[0]) - 200).abs() <= 2);
}

#[test]
fn save_png_round_trips_through_decoder() {
    let path = std::path::PathBuf::from("target")
        .join("surface_unit")
        .join("red.png");
    let s = Surface::filled(4, 4, Rgba8Premul::from_straight_rgba(255, 0, 0, 255));
    s.save_png(&path).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(img.get_pixel(2, 2).0, [255, 0, 0, 255]);
}
