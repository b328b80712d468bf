use super::*;

#[test]
fn flow_font_defaults_differ() {
    let cfg = PlannerConfig::default();
    assert_eq!(cfg.slideshow.captions.font_size, 48);
    assert_eq!(cfg.captioned_slideshow.captions.font_size, 56);
    assert_eq!(cfg.slideshow.per_image_sec, 2.0);
    assert_eq!(
        (cfg.slideshow.width, cfg.slideshow.height, cfg.slideshow.fps),
        (1080, 1920, 30)
    );
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = PlannerConfig::from_json_str(
        r#"{
            "fonts": {"latin": "/srv/fonts/Latin.ttf"},
            "slideshow": {"captions": {"font_size": 40}},
            "captioned_slideshow": {"fps": 25},
            "window_policy": "skip"
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.fonts.latin, std::path::PathBuf::from("/srv/fonts/Latin.ttf"));
    assert_eq!(cfg.fonts.devanagari, FontTable::default().devanagari);
    assert_eq!(cfg.slideshow.captions.font_size, 40);
    assert_eq!(cfg.slideshow.captions.y, "h-250");
    assert_eq!(cfg.captioned_slideshow.fps, 25);
    assert_eq!(cfg.captioned_slideshow.captions.font_size, 56);
    assert_eq!(cfg.window_policy, WindowPolicy::Skip);
}

#[test]
fn invalid_values_in_json_fail_validation() {
    assert!(matches!(
        PlannerConfig::from_json_str(r#"{"mix": {"voice_gain": -2}}"#),
        Err(ReelError::Validation(_))
    ));
    assert!(matches!(
        PlannerConfig::from_json_str(r#"{"window_policy": "sometimes"}"#),
        Err(ReelError::Serde(_))
    ));
}

#[test]
fn validate_rejects_bad_numbers() {
    let mut cfg = PlannerConfig::default();
    cfg.mix.music_gain = -1.0;
    assert!(cfg.validate().is_err());

    let mut cfg = PlannerConfig::default();
    cfg.captioned_slideshow.per_image_sec = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = PlannerConfig::default();
    cfg.thumbnail_time_sec = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn load_reads_file_and_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    std::fs::write(&good, r#"{"thumbnail_time_sec": 1.5}"#).unwrap();
    assert_eq!(PlannerConfig::load(&good).unwrap().thumbnail_time_sec, 1.5);

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();
    assert!(matches!(
        PlannerConfig::load(&bad),
        Err(ReelError::Serde(_))
    ));

    assert!(matches!(
        PlannerConfig::load(&dir.path().join("missing.json")),
        Err(ReelError::Other(_))
    ));
}
