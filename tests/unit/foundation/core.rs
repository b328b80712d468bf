use super::*;

#[test]
fn fit_mode_parses_known_tokens() {
    assert_eq!(FitMode::parse("cover").unwrap(), FitMode::Cover);
    assert_eq!(FitMode::parse(" Contain ").unwrap(), FitMode::Contain);
    assert_eq!("COVER".parse::<FitMode>().unwrap(), FitMode::Cover);
    assert_eq!(FitMode::parse_or(None, FitMode::Contain).unwrap(), FitMode::Contain);
}

#[test]
fn fit_mode_rejects_unknown_tokens() {
    let err = FitMode::parse("stretch").unwrap_err();
    assert_eq!(
        err,
        PlanError::InvalidFitMode {
            value: "stretch".to_string()
        }
    );
    assert!(FitMode::parse_or(Some(""), FitMode::Cover).is_err());
}

#[test]
fn canvas_requires_even_nonzero_dimensions() {
    assert!(CanvasSpec::new(1080, 1920, 30, FitMode::Contain).is_ok());
    assert!(CanvasSpec::new(0, 1920, 30, FitMode::Contain).is_err());
    assert!(CanvasSpec::new(1081, 1920, 30, FitMode::Contain).is_err());
    assert!(CanvasSpec::new(1080, 1920, 0, FitMode::Contain).is_err());
}

#[test]
fn seconds_guards() {
    assert_eq!(require_positive_secs("d", 2.0).unwrap(), 2.0);
    assert!(matches!(
        require_positive_secs("d", 0.0),
        Err(PlanError::InvalidDuration { field: "d", .. })
    ));
    assert!(require_positive_secs("d", f64::NAN).is_err());
    assert!(require_non_negative("t", 0.0).is_ok());
    assert!(require_non_negative("t", -0.1).is_err());
    assert!(require_non_negative("t", f64::INFINITY).is_err());
}

#[test]
fn seconds_format_without_trailing_zeros() {
    assert_eq!(format_secs(2.0), "2");
    assert_eq!(format_secs(0.5), "0.5");
    assert_eq!(format_secs(1.25), "1.25");
    assert_eq!(format_secs(0.0000001), "0.0000001");
}
