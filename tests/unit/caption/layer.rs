use super::*;

fn layer<'a>(
    fonts: &'a FontTable,
    defaults: &'a CaptionDefaults,
    style: &'a CaptionStyle,
    policy: WindowPolicy,
) -> CaptionLayer<'a> {
    CaptionLayer::new(fonts, defaults, style, policy)
}

fn fonts() -> FontTable {
    FontTable::new("/fonts/latin.ttf", "/fonts/deva.ttf")
}

#[test]
fn devanagari_selects_devanagari_font_everything_else_latin() {
    let (f, d, s) = (fonts(), CaptionDefaults::default(), CaptionStyle::default());
    let l = layer(&f, &d, &s, WindowPolicy::FailFast);

    let deva = Caption::new("नमस्ते", 0.0, 1.0).with_language(Language::Devanagari);
    assert_eq!(l.instruction(0, &deva).unwrap().font.as_str(), "/fonts/deva.ttf");

    let latin = Caption::new("hello", 0.0, 1.0);
    assert_eq!(l.instruction(0, &latin).unwrap().font.as_str(), "/fonts/latin.ttf");
}

#[test]
fn language_tags_map_to_script_families() {
    assert_eq!(Language::from_tag(Some("devanagari")), Language::Devanagari);
    assert_eq!(Language::from_tag(Some("hi")), Language::Devanagari);
    assert_eq!(Language::from_tag(Some("roman")), Language::Latin);
    assert_eq!(Language::from_tag(Some("latin")), Language::Latin);
    assert_eq!(Language::from_tag(None), Language::Latin);

    let c: Caption = serde_json::from_str(r#"{"start":0,"end":1,"text":"x"}"#).unwrap();
    assert_eq!(c.language, Language::Latin);
    let c: Caption =
        serde_json::from_str(r#"{"start":0,"end":1,"text":"x","lang":null}"#).unwrap();
    assert_eq!(c.language, Language::Latin);
    let c: Caption =
        serde_json::from_str(r#"{"start":0,"end":1,"text":"x","lang":"hi"}"#).unwrap();
    assert_eq!(c.language, Language::Devanagari);
}

#[test]
fn text_is_escaped_once() {
    let (f, d, s) = (fonts(), CaptionDefaults::default(), CaptionStyle::default());
    let l = layer(&f, &d, &s, WindowPolicy::FailFast);
    let draw = l
        .instruction(0, &Caption::new("hi'there: now", 0.0, 2.0))
        .unwrap();
    assert_eq!(draw.text.as_str(), "hi\\'there\\: now");

    let empty = l.instruction(0, &Caption::new("", 0.0, 2.0)).unwrap();
    assert_eq!(empty.text.as_str(), "");
}

#[test]
fn positions_resolve_center_expr_and_defaults() {
    let (f, d, s) = (fonts(), CaptionDefaults::default(), CaptionStyle::default());
    let l = layer(&f, &d, &s, WindowPolicy::FailFast);

    let draw = l.instruction(0, &Caption::new("a", 0.0, 1.0)).unwrap();
    assert_eq!(draw.x, CENTER_X);
    assert_eq!(draw.y, "h-250");
    assert_eq!(draw.font_size, 56);

    let cue = Caption::new("a", 0.0, 1.0)
        .at(Position::Expr("40".into()), Position::Center)
        .with_font_size(72);
    let draw = l.instruction(0, &cue).unwrap();
    assert_eq!(draw.x, "40");
    assert_eq!(draw.y, CENTER_Y);
    assert_eq!(draw.font_size, 72);

    let cue = Caption::new("a", 0.0, 1.0)
        .at(Position::Expr("".into()), Position::Expr(" ".into()))
        .with_font_size(0);
    let draw = l.instruction(0, &cue).unwrap();
    assert_eq!((draw.x.as_str(), draw.y.as_str()), (CENTER_X, "h-250"));
    assert_eq!(draw.font_size, 56);
}

#[test]
fn option_delimiters_in_position_expressions_are_rejected() {
    let (f, d, s) = (fonts(), CaptionDefaults::default(), CaptionStyle::default());
    let l = layer(&f, &d, &s, WindowPolicy::FailFast);
    let cue = Caption::new("a", 0.0, 1.0).at(Position::Expr("w'".into()), Position::Center);
    assert!(matches!(
        l.instruction(0, &cue),
        Err(PlanError::InvalidValue { field: "x", .. })
    ));
    let cue = Caption::new("a", 0.0, 1.0).at(Position::Center, Position::Expr("h:2".into()));
    assert!(matches!(
        l.instruction(0, &cue),
        Err(PlanError::InvalidValue { field: "y", .. })
    ));

    let commas = Position::Expr("if(gte(t,1),h-300,h-250)".into());
    let cue = Caption::new("a", 0.0, 1.0).at(Position::Center, commas);
    assert_eq!(l.instruction(0, &cue).unwrap().y, "if(gte(t,1),h-300,h-250)");
}

#[test]
fn position_tokens_deserialize() {
    let c: Caption = serde_json::from_str(
        r#"{"start":0,"end":1,"text":"x","x":"center","y":"h-100","fontSize":48}"#,
    )
    .unwrap();
    assert_eq!(c.x, Some(Position::Center));
    assert_eq!(c.y, Some(Position::Expr("h-100".to_string())));
    assert_eq!(c.font_size, Some(48));
}

#[test]
fn flow_defaults_are_independent() {
    let f = fonts();
    let s = CaptionStyle::default();
    let plain = CaptionDefaults::with_font_size(48);
    let captioned = CaptionDefaults::with_font_size(56);
    let cue = Caption::new("a", 0.0, 1.0);
    let a = layer(&f, &plain, &s, WindowPolicy::FailFast)
        .instruction(0, &cue)
        .unwrap();
    let b = layer(&f, &captioned, &s, WindowPolicy::FailFast)
        .instruction(0, &cue)
        .unwrap();
    assert_eq!((a.font_size, b.font_size), (48, 56));
}

#[test]
fn window_is_half_open() {
    let (f, d, s) = (fonts(), CaptionDefaults::default(), CaptionStyle::default());
    let l = layer(&f, &d, &s, WindowPolicy::FailFast);
    let w = l.instruction(0, &Caption::new("a", 1.0, 2.0)).unwrap().window;
    assert!(!w.contains(0.999));
    assert!(w.contains(1.0));
    assert!(w.contains(1.999));
    assert!(!w.contains(2.0));
}

#[test]
fn inverted_window_fails_fast() {
    let (f, d, s) = (fonts(), CaptionDefaults::default(), CaptionStyle::default());
    let l = layer(&f, &d, &s, WindowPolicy::FailFast);
    let cues = vec![Caption::new("ok", 0.0, 1.0), Caption::new("bad", 2.0, 1.0)];
    assert_eq!(
        l.instructions(&cues).unwrap_err(),
        PlanError::InvalidCaptionWindow {
            index: 1,
            start: 2.0,
            end: 1.0
        }
    );
    assert!(l.instruction(0, &Caption::new("eq", 1.0, 1.0)).is_err());
    assert!(l.instruction(0, &Caption::new("nan", f64::NAN, 1.0)).is_err());
    assert!(l.instruction(0, &Caption::new("neg", -0.5, 1.0)).is_err());
}

#[test]
fn skip_policy_drops_bad_windows_and_keeps_order() {
    let (f, d, s) = (fonts(), CaptionDefaults::default(), CaptionStyle::default());
    let l = layer(&f, &d, &s, WindowPolicy::Skip);
    let cues = vec![
        Caption::new("late", 3.0, 5.0),
        Caption::new("bad", 2.0, 1.0),
        Caption::new("early", 0.0, 4.0),
    ];
    let draws = l.instructions(&cues).unwrap();
    let order: Vec<usize> = draws.iter().map(|d| d.cue).collect();
    assert_eq!(order, vec![0, 2]);
}
