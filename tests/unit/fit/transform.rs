use super::*;

const SOURCES: &[(u32, u32)] = &[
    (4000, 3000),
    (3000, 4000),
    (1080, 1920),
    (1920, 1080),
    (640, 480),
    (500, 500),
    (1, 1000),
    (10000, 1),
    (1079, 1921),
    (2160, 3841),
];

const CANVASES: &[(u32, u32)] = &[(1080, 1920), (1920, 1080), (720, 720), (64, 36)];

#[test]
fn cover_is_scale_then_crop() {
    let chain = FitChain::new(1080, 1920, FitMode::Cover);
    assert_eq!(chain.mode, FitMode::Cover);
    assert_eq!(
        chain.ops,
        vec![
            FitOp::Scale {
                width: ScaleDim::Exact(1080),
                height: ScaleDim::Exact(1920),
                aspect: AspectPolicy::Increase,
            },
            FitOp::Crop {
                width: 1080,
                height: 1920,
            },
        ]
    );
}

#[test]
fn contain_is_scale_down_then_pad() {
    let chain = FitChain::new(1080, 1920, FitMode::Contain);
    assert_eq!(
        chain.ops,
        vec![
            FitOp::Scale {
                width: ScaleDim::AtMostSource(1080),
                height: ScaleDim::AtMostSource(1920),
                aspect: AspectPolicy::Decrease,
            },
            FitOp::Pad {
                width: 1080,
                height: 1920,
            },
        ]
    );
}

#[test]
fn unknown_token_is_rejected() {
    assert!(matches!(
        FitChain::from_token(1080, 1920, "fill"),
        Err(PlanError::InvalidFitMode { .. })
    ));
    assert_eq!(
        FitChain::from_token(1080, 1920, "cover").unwrap(),
        FitChain::new(1080, 1920, FitMode::Cover)
    );
}

#[test]
fn cover_output_equals_canvas_exactly() {
    for &(cw, ch) in CANVASES {
        let chain = FitChain::new(cw, ch, FitMode::Cover);
        for &(sw, sh) in SOURCES {
            let g = chain.geometry(sw, sh).unwrap();
            assert_eq!((g.output_width, g.output_height), (cw, ch), "src {sw}x{sh}");
            assert!(g.scaled_width >= cw && g.scaled_height >= ch);
            assert_eq!(g.crop_x, (g.scaled_width - cw) / 2);
            assert_eq!(g.crop_y, (g.scaled_height - ch) / 2);
        }
    }
}

#[test]
fn contain_fits_never_upscales_and_keeps_aspect() {
    for &(cw, ch) in CANVASES {
        let chain = FitChain::new(cw, ch, FitMode::Contain);
        for &(sw, sh) in SOURCES {
            let g = chain.geometry(sw, sh).unwrap();
            assert!(g.scaled_width <= cw && g.scaled_height <= ch, "src {sw}x{sh}");
            assert!(g.scaled_width <= sw && g.scaled_height <= sh, "src {sw}x{sh}");

            let (w, h) = (f64::from(g.scaled_width), f64::from(g.scaled_height));
            let expected_h = w * f64::from(sh) / f64::from(sw);
            let expected_w = h * f64::from(sw) / f64::from(sh);
            assert!(
                (h - expected_h).abs() <= 1.0 || (w - expected_w).abs() <= 1.0,
                "aspect drift for src {sw}x{sh} in {cw}x{ch}: got {w}x{h}"
            );

            assert_eq!((g.output_width, g.output_height), (cw, ch));
            assert_eq!(g.pad_x, (cw - g.scaled_width) / 2);
            assert_eq!(g.pad_y, (ch - g.scaled_height) / 2);
        }
    }
}

#[test]
fn contain_landscape_into_portrait_letterboxes_vertically() {
    let g = FitChain::new(1080, 1920, FitMode::Contain)
        .geometry(4000, 3000)
        .unwrap();
    assert_eq!((g.scaled_width, g.scaled_height), (1080, 810));
    assert_eq!((g.pad_x, g.pad_y), (0, 555));
}

#[test]
fn zero_sized_source_is_rejected() {
    let chain = FitChain::new(1080, 1920, FitMode::Contain);
    assert!(chain.geometry(0, 10).is_err());
    assert!(chain.geometry(10, 0).is_err());
}
