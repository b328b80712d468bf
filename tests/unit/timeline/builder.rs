use super::*;

fn images(n: usize) -> Vec<MediaSource> {
    MediaSource::indexed((0..n).map(|i| format!("img_{i:03}.jpg")), MediaKind::Image)
}

#[test]
fn slideshow_has_n_plus_one_segments() {
    for n in 1..=6 {
        let srcs = images(n);
        let tl = TimelineBuilder::slideshow(&srcs, 2.5).unwrap();
        assert_eq!(tl.len(), n + 1);

        for seg in &tl.segments()[..n] {
            assert_eq!(seg.duration_sec, Some(2.5));
        }
        let last = &tl.segments()[n];
        assert_eq!(last.duration_sec, None);
        assert_eq!(last.source, tl.segments()[n - 1].source);
        assert_eq!(last.source, srcs[n - 1]);
    }
}

#[test]
fn slideshow_keeps_presentation_order() {
    let srcs = images(3);
    let tl = TimelineBuilder::slideshow(&srcs, 1.0).unwrap();
    let order: Vec<usize> = tl.segments().iter().map(|s| s.source.index).collect();
    assert_eq!(order, vec![0, 1, 2, 2]);
}

#[test]
fn slideshow_total_duration_ignores_hold_segment() {
    let tl = TimelineBuilder::slideshow(&images(3), 2.0).unwrap();
    assert_eq!(tl.total_duration_sec(), Some(6.0));
}

#[test]
fn empty_slideshow_is_rejected_before_duration() {
    assert_eq!(
        TimelineBuilder::slideshow(&[], 2.0).unwrap_err(),
        PlanError::EmptyInput { field: "images" }
    );
    assert_eq!(
        TimelineBuilder::slideshow(&[], -1.0).unwrap_err(),
        PlanError::EmptyInput { field: "images" }
    );
}

#[test]
fn non_positive_duration_is_rejected() {
    for d in [0.0, -2.0, f64::NAN, f64::INFINITY] {
        let err = TimelineBuilder::slideshow(&images(2), d).unwrap_err();
        assert!(matches!(
            err,
            PlanError::InvalidDuration {
                field: "perImageSec",
                ..
            }
        ));
    }
}

#[test]
fn sequence_has_no_hold_segment() {
    let videos = MediaSource::indexed(["a.mp4", "b.mp4"], MediaKind::Video);
    let tl = TimelineBuilder::sequence(&videos).unwrap();
    assert_eq!(tl.len(), 2);
    assert!(tl.segments().iter().all(|s| s.duration_sec.is_none()));
    assert_eq!(tl.total_duration_sec(), None);
    assert_eq!(
        TimelineBuilder::sequence(&[]).unwrap_err(),
        PlanError::EmptyInput { field: "videos" }
    );
}
