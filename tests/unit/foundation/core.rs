use super::*;

#[test]
fn straight_to_premul_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(
        Rgba8Premul::from_straight([10, 20, 30, 255]).to_array(),
        [10, 20, 30, 255]
    );
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}

#[test]
fn scaled_zero_is_transparent_and_one_is_identity() {
    let c = Rgba8Premul::from_straight_rgba(200, 100, 50, 255);
    assert_eq!(c.scaled(0.0), Rgba8Premul::transparent());
    assert_eq!(c.scaled(1.0), c);
}

#[test]
fn parse_size_and_point() {
    assert_eq!(parse_size("1000x800").unwrap(), Size::new(1000.0, 800.0));
    assert_eq!(parse_size(" 64 X 32 ").unwrap(), Size::new(64.0, 32.0));
    assert!(parse_size("1000").is_err());
    assert!(parse_size("axb").is_err());

    assert_eq!(parse_point("500,400").unwrap(), Point::new(500.0, 400.0));
    assert_eq!(parse_point("-1.5, 2").unwrap(), Point::new(-1.5, 2.0));
    assert!(parse_point("500").is_err());
}

#[test]
fn viewport_normalize() {
    let v = Viewport::new(200.0, 100.0);
    assert_eq!(v.normalize(Point::new(100.0, 25.0)), Point::new(0.5, 0.25));
    assert_eq!(
        Viewport::new(0.0, 10.0).normalize(Point::new(3.0, 3.0)),
        Point::new(0.5, 0.5)
    );
}
