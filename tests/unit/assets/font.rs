use super::*;

#[test]
fn missing_preferred_font_is_an_error_not_a_panic() {
    let err = load_font_file(Path::new("/definitely/not/here/Helvetica.ttc"), 0).unwrap_err();
    assert!(err.to_string().contains("read font"));
}

#[test]
fn garbage_font_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ttf");
    std::fs::write(&path, b"not a font").unwrap();
    assert!(load_font_file(&path, 0).is_err());
}

#[test]
fn resolve_falls_back_past_a_missing_preferred_font() {
    let font = resolve_font(Some(Path::new("/definitely/not/here.ttf")), 0);
    assert!(matches!(
        font.origin,
        FontOrigin::System(_) | FontOrigin::Bundled
    ));
    assert!(!font.bytes.is_empty());
}

#[test]
fn system_fallback_prefers_a_regular_sans_serif_face() {
    let Some(font) = system_sans_serif() else {
        return;
    };
    let FontOrigin::System(family) = font.origin else {
        panic!("system lookup must report a system origin");
    };
    // The generic sans-serif family maps to Arial, itself a candidate.
    assert!(SANS_SERIF_CANDIDATES.contains(&family.as_str()), "picked {family}");
}

#[test]
fn bundled_font_always_lays_out() {
    let font = bundled_font();
    assert_eq!(font.origin, FontOrigin::Bundled);

    let mut engine = TextLayoutEngine::new(&font).unwrap();
    assert_eq!(engine.family_name(), "DejaVu Sans");
    let layout = engine
        .layout_line("READ BIBLE", 60.0, Rgba8::rgb(0x2e, 0x34, 0x40))
        .unwrap();
    assert!(layout.width() > 0.0);
}

#[test]
fn layout_rejects_non_positive_sizes() {
    let mut engine = TextLayoutEngine::new(&bundled_font()).unwrap();
    assert!(engine.layout_line("x", 0.0, Rgba8::default()).is_err());
    assert!(engine.layout_line("x", f32::NAN, Rgba8::default()).is_err());
}
