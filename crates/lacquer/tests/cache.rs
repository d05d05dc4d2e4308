//! Resource sharing through ThemeResources and ResourceCache.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use lacquer::{
    ColorToken, Factory, Icon, IconMode, IconState, PixmapFactory, ResourceCache, StateIconOptions,
};
use lacquer_test::{RecordingPainter, ResourceTree};

const RED: ColorToken = ColorToken::rgb(255, 0, 0);
const BLUE: ColorToken = ColorToken::rgb(0, 0, 255);

#[test]
fn icon_identity_by_color() {
    let resources = ResourceTree::new().unwrap().setup().build().unwrap();
    let painter = Arc::new(RecordingPainter::new());

    let red_a = resources.icon(&painter, "path.svg", Some(RED), None);
    let red_b = resources.icon(&painter, "path.svg", Some(RED), None);
    let blue = resources.icon(&painter, "path.svg", Some(BLUE), None);

    assert!(Arc::ptr_eq(&red_a, &red_b));
    assert!(!Arc::ptr_eq(&red_a, &blue));
    assert_eq!(painter.count("load"), 2);
    assert_eq!(resources.icons().len(), 2);
}

#[test]
fn icon_size_scales_with_dpi() {
    let resources = ResourceTree::new()
        .unwrap()
        .setup()
        .dpi(1.5)
        .build()
        .unwrap();
    let painter = Arc::new(RecordingPainter::new());

    let icon = resources.icon(&painter, "check.png", None, Some(20));
    assert_eq!(icon.base().map(String::as_str), Some("check.png@30"));
}

#[test]
fn shutdown_forces_rebuild() {
    let resources = ResourceTree::new().unwrap().setup().build().unwrap();
    let painter = Arc::new(RecordingPainter::new());

    let before = resources.pixmap(&painter, "a.png", Some(RED));
    resources.shutdown();
    assert!(resources.pixmaps().is_empty());

    let after = resources.pixmap(&painter, "a.png", Some(RED));
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before.image(), after.image());
    assert_eq!(painter.count("load"), 2);
}

/// An icon factory that builds its pixmaps through the same cache.
struct CachedStateIcon {
    cache: Arc<ResourceCache>,
    pixmaps: PixmapFactory<RecordingPainter>,
}

impl Factory for CachedStateIcon {
    type Args = PathBuf;
    type Output = Icon<String>;

    fn build(&self, path: &PathBuf) -> Icon<String> {
        let mut icon = Icon::new();
        for (mode, color) in [(IconMode::Normal, RED), (IconMode::Active, BLUE)] {
            let pixmap = self
                .cache
                .get_or_create(&self.pixmaps, (path.clone(), Some(color)));
            if let Some(image) = pixmap.image() {
                icon.add_pixmap(mode, IconState::Off, image.clone());
            }
        }
        icon
    }
}

#[test]
fn reentrant_factory_does_not_deadlock() {
    let cache = Arc::new(ResourceCache::new());
    let painter = Arc::new(RecordingPainter::new());
    let factory = CachedStateIcon {
        cache: Arc::clone(&cache),
        pixmaps: PixmapFactory::new(Arc::clone(&painter)),
    };

    let icon = cache.get_or_create(&factory, PathBuf::from("radio.png"));
    assert_eq!(
        icon.pixmap(IconMode::Active, IconState::Off).map(String::as_str),
        Some("radio.png|#0000FF")
    );
    assert_eq!(cache.len(), 3);

    let again = cache.get_or_create(&factory, PathBuf::from("radio.png"));
    assert!(Arc::ptr_eq(&icon, &again));
    assert_eq!(painter.count("load"), 2);
}

#[test]
fn concurrent_requests_share_one_instance() {
    let resources = Arc::new(ResourceTree::new().unwrap().setup().build().unwrap());
    let painter = Arc::new(RecordingPainter::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resources = Arc::clone(&resources);
            let painter = Arc::clone(&painter);
            thread::spawn(move || resources.pixmap(&painter, "shared.png", Some(RED)))
        })
        .collect();
    let pixmaps: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for pixmap in &pixmaps[1..] {
        assert!(Arc::ptr_eq(&pixmaps[0], pixmap));
    }
    assert_eq!(resources.pixmaps().len(), 1);
}

#[test]
fn state_icon_through_recording_painter() {
    let painter = RecordingPainter::new();
    let options = StateIconOptions::new()
        .color(RED)
        .mode_color(IconMode::Disabled, ColorToken::rgb(128, 128, 128));
    let icon = Icon::state_icon(&painter, "toggle.png", &options);

    assert_eq!(painter.count("load"), 8);
    assert_eq!(painter.count("paint_mask"), 8);
    assert_eq!(
        icon.pixmap(IconMode::Disabled, IconState::On).map(String::as_str),
        Some("toggle.png|#808080")
    );
}

#[test]
fn themes_are_shared_per_file() {
    let tree = ResourceTree::new().unwrap();
    let file = tree.theme("t", "name: T\n").unwrap();
    let resources = tree.setup().build().unwrap();

    let a = resources.theme(&file);
    let b = resources.theme(&file);
    a.lock().unwrap().set_accent_color(RED);
    assert_eq!(b.lock().unwrap().accent_color(), RED);
}
