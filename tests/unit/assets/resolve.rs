use super::*;

fn root_with(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for f in files {
        let p = dir.path().join(f);
        std::fs::create_dir_all(p.parent().unwrap()).unwrap();
        std::fs::write(p, b"x").unwrap();
    }
    dir
}

#[test]
fn resolves_relative_files_to_absolute_locators() {
    let dir = root_with(&["img/a.jpg"]);
    let resolver = LocalResolver::new(dir.path()).unwrap();
    let src = resolver.resolve(" img/a.jpg ", MediaKind::Image).unwrap();
    assert!(Path::new(&src.locator).is_absolute());
    assert!(src.locator.ends_with("a.jpg"));
    assert_eq!(src.kind, MediaKind::Image);
}

#[test]
fn rejects_unsafe_or_missing_references() {
    let dir = root_with(&["a.jpg"]);
    let resolver = LocalResolver::new(dir.path()).unwrap();
    for bad in ["", "  ", "/etc/passwd", "../a.jpg", "x/../../a.jpg", "https://x/a.jpg", "b.jpg"] {
        assert!(
            matches!(resolver.resolve(bad, MediaKind::Image), Err(ReelError::Validation(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn resolve_all_preserves_order_and_indices() {
    let names: Vec<String> = (0..16).map(|i| format!("{i:02}.jpg")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let dir = root_with(&refs);
    let resolver = LocalResolver::new(dir.path()).unwrap();

    let sources = resolve_all(&resolver, &names, MediaKind::Image).unwrap();
    for (i, src) in sources.iter().enumerate() {
        assert_eq!(src.index, i);
        assert!(src.locator.ends_with(&names[i]));
    }
}

#[test]
fn resolve_all_reports_first_failure() {
    let dir = root_with(&["a.jpg"]);
    let resolver = LocalResolver::new(dir.path()).unwrap();
    let err = resolve_all(&resolver, &["a.jpg", "missing1.jpg", "missing2.jpg"], MediaKind::Image)
        .unwrap_err();
    assert!(err.to_string().contains("missing1.jpg"));
}

#[test]
fn root_must_exist() {
    assert!(LocalResolver::new("/definitely/not/here/reelkit").is_err());
}
