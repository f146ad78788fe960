use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LensError::invalid_dimension("x")
            .to_string()
            .contains("invalid dimension:")
    );
    assert!(
        LensError::target_unavailable("x")
            .to_string()
            .contains("render target unavailable:")
    );
    assert!(
        LensError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LensError::asset("x").to_string().contains("asset error:"));
    assert_eq!(
        LensError::ImageNotReady.to_string(),
        "source image not ready"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LensError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
