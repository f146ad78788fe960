use super::*;

#[test]
fn defaults_match_glass_constants() {
    let c = LensConfig::default();
    assert_eq!(c.radius, 185.0);
    assert_eq!(c.magnification, 2.0);
    assert_eq!(c.shape, LensShape::Circle);
    assert_eq!(c.feather_width, 28.0);
    assert_eq!(c.stroke_feather, 10.0);
    assert_eq!(c.variant, LensVariant::Magnify);
    assert_eq!(LensConfig::preset(LensPreset::Glass), c);
    c.validate().unwrap();
}

#[test]
fn every_preset_validates() {
    for p in LensPreset::ALL {
        LensConfig::preset(p).validate().unwrap();
        assert_eq!(LensPreset::from_name(p.name()).unwrap(), p);
    }
    assert_eq!(
        LensPreset::from_name("PROJECT").unwrap(),
        LensPreset::Project
    );
    assert!(LensPreset::from_name("fisheye").is_err());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let json = r#"{
        "radius": 90,
        "shape": { "kind": "rounded", "stretch_x": 2.0, "stretch_y": 1.0, "corner_ratio": 0.25, "corner_cap": 30 },
        "variant": { "kind": "displacement", "scale": 12, "rim": 0.3 }
    }"#;
    let c = LensConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(c.radius, 90.0);
    assert_eq!(c.magnification, 2.0);
    assert!(matches!(c.shape, LensShape::Rounded { stretch_x, .. } if stretch_x == 2.0));
    assert!(matches!(
        c.variant,
        LensVariant::Displacement { scale, bias_x, tilt, .. } if scale == 12.0 && bias_x == 0.0 && tilt == 0.0
    ));
}

#[test]
fn json_rejects_unknown_fields_and_bad_ranges() {
    assert!(LensConfig::from_reader(r#"{"radios": 10}"#.as_bytes()).is_err());
    assert!(LensConfig::from_reader(r#"{"radius": -1}"#.as_bytes()).is_err());
    assert!(LensConfig::from_reader(r#"{"magnification": 0.5}"#.as_bytes()).is_err());
    assert!(LensConfig::from_reader(r#"{"follow": 0}"#.as_bytes()).is_err());
    let bad_corner = r#"{"shape": {"kind": "rounded", "stretch_x": 1, "stretch_y": 1, "corner_ratio": 0.9, "corner_cap": 10}}"#;
    assert!(LensConfig::from_reader(bad_corner.as_bytes()).is_err());
    let bad_rim = r#"{"variant": {"kind": "displacement", "scale": 1, "rim": 1.0}}"#;
    assert!(LensConfig::from_reader(bad_rim.as_bytes()).is_err());
}

#[test]
fn magnification_one_is_allowed() {
    let c = LensConfig {
        magnification: 1.0,
        ..LensConfig::default()
    };
    c.validate().unwrap();
}

#[test]
fn from_path_reports_missing_file() {
    let err = LensConfig::from_path("target/definitely/missing.json").unwrap_err();
    assert!(err.to_string().contains("open lens config"));
}
