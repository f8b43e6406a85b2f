use super::*;

#[test]
fn dir_store_writes_lists_and_removes_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirArtifactStore::new(dir.path()).unwrap();
    assert!(store.root().is_absolute());

    store.write("b.png", b"b").unwrap();
    store.write("a.png", b"a").unwrap();
    std::fs::create_dir(dir.path().join("wallpaper_dir.png")).unwrap();

    assert_eq!(store.list().unwrap(), vec!["a.png", "b.png"]);
    assert_eq!(std::fs::read(store.locate("a.png")).unwrap(), b"a");

    store.remove("a.png").unwrap();
    let err = store.remove("a.png").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.list().unwrap(), vec!["b.png"]);
}

#[test]
fn dir_store_creates_missing_output_dir_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out").join("walls");
    let mut store = DirArtifactStore::new(&nested).unwrap();
    assert!(store.list().is_err());

    store.write("x.png", b"x").unwrap();
    assert!(nested.join("x.png").is_file());
}

#[test]
fn memory_store_reports_missing_and_locked_entries() {
    let mut store = MemoryArtifactStore::new();
    store.insert("keep.png", vec![1]);
    store.locked.push("keep.png".to_owned());

    assert_eq!(
        store.remove("keep.png").unwrap_err().kind(),
        ErrorKind::PermissionDenied
    );
    assert_eq!(
        store.remove("gone.png").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(store.get("keep.png"), Some(&[1u8][..]));
    assert_eq!(store.locate("keep.png"), PathBuf::from("/memory/keep.png"));
}
