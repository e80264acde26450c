//! Layout persistence through the JSON file store.

use crate::helpers::{pad_with_store, pointer_at, send};
use retro_vpad::layout::{CustomLayout, ElementId, Group, GroupTransform};
use retro_vpad::store::{JsonFileStore, LayoutStore};
use retro_vpad::touch::{Pointer, TouchEvent};

#[test]
fn edited_layout_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");

    let edited = {
        let mut pad = pad_with_store(JsonFileStore::open(&path).unwrap());
        pad.set_edit_mode(true);
        let p = pointer_at(&pad, 0, ElementId::RightTrigger);
        send(&mut pad, TouchEvent::down(p));
        send(&mut pad, TouchEvent::moved(vec![p]));
        send(&mut pad, TouchEvent::moved(vec![Pointer::new(0, p.x - 45.0, p.y + 12.0)]));
        pad.on_scale(1.25);
        send(&mut pad, TouchEvent::up(p));
        *pad.resolved().unwrap()
    };

    let reopened = pad_with_store(JsonFileStore::open(&path).unwrap());
    assert_eq!(*reopened.resolved().unwrap(), edited);
    let t = reopened.custom_layout().get(Group::RightTrigger);
    assert!((t.scale - 1.25).abs() < 1e-6);
    assert!(t.x_shift < 0.0 && t.y_shift > 0.0);
}

#[test]
fn restore_then_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg").join("layout.json");

    let mut custom = CustomLayout::default();
    custom.set(
        Group::Analog,
        GroupTransform {
            x_shift: 12.5,
            y_shift: -3.0,
            scale: 0.75,
        },
    );

    let mut pad = pad_with_store(JsonFileStore::open(&path).unwrap());
    pad.restore_layout(custom);
    assert_eq!(
        CustomLayout::load(&JsonFileStore::open(&path).unwrap()),
        custom
    );

    pad.reset_layout();
    let store = JsonFileStore::open(&path).unwrap();
    assert_eq!(store.get("touch_scale_analog"), None);
    assert_eq!(*pad.custom_layout(), CustomLayout::default());
}
