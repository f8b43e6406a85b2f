use super::*;
use crate::foundation::core::{PremulImage, Rgba8Premul};
use crate::output::store::MemoryArtifactStore;
use crate::render::surface::RenderStats;
use std::cell::RefCell;
use std::path::Path;
use std::time::Duration;

fn tiny_surface() -> Surface {
    let img = PremulImage::filled(4, 3, Rgba8Premul::from_straight_rgba(31, 36, 48, 255)).unwrap();
    Surface::new(img, RenderStats::default())
}

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

#[derive(Default)]
struct RecordingSetter {
    calls: RefCell<Vec<PathBuf>>,
    fail: bool,
}

impl WallpaperSetter for &RecordingSetter {
    fn apply(&self, path: &Path) -> HabitResult<()> {
        self.calls.borrow_mut().push(path.to_path_buf());
        if self.fail {
            return Err(HabitError::output("script exited with 1"));
        }
        Ok(())
    }
}

#[test]
fn naming_matches_only_generated_files() {
    let naming = ArtifactNaming::default();
    assert_eq!(naming.file_name(1_700_000_000), "wallpaper_1700000000.png");
    assert!(naming.is_generated("wallpaper_1700000000.png"));
    assert!(!naming.is_generated("wallpaper.png"));
    assert!(!naming.is_generated("wallpaper_1.jpg"));
    assert!(!naming.is_generated("my_wallpaper_1.png"));
    assert!(!naming.is_generated("wallpaper_1png"));
}

#[test]
fn two_publishes_leave_exactly_one_file() {
    let setter = RecordingSetter::default();
    let mut publisher = Publisher::new(
        MemoryArtifactStore::new(),
        &setter,
        ArtifactNaming::default(),
    );

    let first = publisher.publish(&tiny_surface(), at(100)).unwrap();
    let second = publisher.publish(&tiny_surface(), at(101)).unwrap();

    assert_eq!(first, PathBuf::from("/memory/wallpaper_100.png"));
    assert_eq!(second, PathBuf::from("/memory/wallpaper_101.png"));
    assert_eq!(publisher.store().names(), vec!["wallpaper_101.png"]);
    assert_eq!(*setter.calls.borrow(), vec![first, second]);

    let png = publisher.store().get("wallpaper_101.png").unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn cleanup_spares_unrelated_files_and_removes_legacy() {
    let mut store = MemoryArtifactStore::new();
    store.insert("wallpaper_1.png", vec![]);
    store.insert("wallpaper_2.png", vec![]);
    store.insert("wallpaper.png", vec![]);
    store.insert("habitos.json", vec![]);
    store.insert("set_wallpaper.sh", vec![]);

    let setter = RecordingSetter::default();
    let mut publisher = Publisher::new(store, &setter, ArtifactNaming::default());
    publisher.publish(&tiny_surface(), at(50)).unwrap();

    assert_eq!(
        publisher.store().names(),
        vec!["habitos.json", "set_wallpaper.sh", "wallpaper_50.png"]
    );
}

#[test]
fn one_failed_deletion_does_not_stop_the_rest() {
    let mut store = MemoryArtifactStore::new();
    store.insert("wallpaper_1.png", vec![]);
    store.insert("wallpaper_2.png", vec![]);
    store.insert("wallpaper_3.png", vec![]);
    store.locked.push("wallpaper_2.png".to_owned());

    let setter = RecordingSetter::default();
    let mut publisher = Publisher::new(store, &setter, ArtifactNaming::default());
    publisher.publish(&tiny_surface(), at(9)).unwrap();

    assert_eq!(
        publisher.store().names(),
        vec!["wallpaper_2.png", "wallpaper_9.png"]
    );
}

#[test]
fn wallpaper_failure_keeps_the_file() {
    let setter = RecordingSetter {
        fail: true,
        ..RecordingSetter::default()
    };
    let mut publisher = Publisher::new(
        MemoryArtifactStore::new(),
        &setter,
        ArtifactNaming::default(),
    );

    let path = publisher.publish(&tiny_surface(), at(7)).unwrap();
    assert_eq!(path, PathBuf::from("/memory/wallpaper_7.png"));
    assert_eq!(publisher.store().names(), vec!["wallpaper_7.png"]);
    assert_eq!(setter.calls.borrow().len(), 1);
}

#[test]
fn same_second_republish_overwrites_in_place() {
    let setter = RecordingSetter::default();
    let mut publisher = Publisher::new(
        MemoryArtifactStore::new(),
        &setter,
        ArtifactNaming::default(),
    );
    publisher.publish(&tiny_surface(), at(5)).unwrap();
    publisher.publish(&tiny_surface(), at(5)).unwrap();
    assert_eq!(publisher.store().names(), vec!["wallpaper_5.png"]);
}

struct FailingStore;

impl ArtifactStore for FailingStore {
    fn list(&self) -> HabitResult<Vec<String>> {
        Ok(vec![])
    }

    fn write(&mut self, name: &str, _bytes: &[u8]) -> HabitResult<()> {
        Err(HabitError::output(format!("write '{name}': read-only")))
    }

    fn remove(&mut self, _name: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn locate(&self, name: &str) -> PathBuf {
        PathBuf::from(name)
    }
}

#[test]
fn unwritable_output_is_fatal_and_skips_the_setter() {
    let setter = RecordingSetter::default();
    let mut publisher = Publisher::new(FailingStore, &setter, ArtifactNaming::default());
    let err = publisher.publish(&tiny_surface(), at(1)).unwrap_err();
    assert!(matches!(err, HabitError::Output(_)));
    assert!(setter.calls.borrow().is_empty());
}
