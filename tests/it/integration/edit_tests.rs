//! Edit mode: selecting, dragging and pinching control groups.

use crate::helpers::{pointer_at, send, test_pad};
use retro_vpad::layout::{ELEMENTS, ElementId, Group};
use retro_vpad::store::LayoutStore;
use retro_vpad::touch::{Pointer, TouchEvent};

#[test]
fn tap_selects_group_without_gameplay_output() {
    let mut pad = test_pad();
    pad.set_edit_mode(true);
    let p = pointer_at(&pad, 0, ElementId::A);

    send(&mut pad, TouchEvent::down(p));
    assert_eq!(pad.selected_group(), Some(Group::Buttons));
    assert!(pad.bridge().last_controller().unwrap().is_idle());
    assert_eq!(pad.bridge().last_mouse(), None);
}

#[test]
fn pinch_scales_and_reverts() {
    let mut pad = test_pad();
    pad.set_edit_mode(true);
    let a = pointer_at(&pad, 0, ElementId::A);
    let b = |dx: f32| Pointer::new(1, a.x + dx, a.y);

    send(&mut pad, TouchEvent::down(a));
    send(&mut pad, TouchEvent::pointer_down(1, vec![a, b(150.0)]));
    send(&mut pad, TouchEvent::moved(vec![a, b(225.0)]));

    let scale = pad.custom_layout().get(Group::Buttons).scale;
    assert!((scale - 1.5).abs() < 1e-4, "scale {}", scale);
    assert_eq!(pad.store().get("touch_scale_buttons"), Some(scale));

    send(&mut pad, TouchEvent::moved(vec![a, b(150.0)]));
    let scale = pad.custom_layout().get(Group::Buttons).scale;
    assert!((scale - 1.0).abs() < 1e-4, "scale {}", scale);

    send(&mut pad, TouchEvent::pointer_up(1, vec![a, b(150.0)]));
    send(&mut pad, TouchEvent::up(a));
    assert_eq!(pad.selected_group(), None);
}

#[test]
fn lifting_one_pinch_finger_does_not_move_the_group() {
    let mut pad = test_pad();
    pad.set_edit_mode(true);
    let a = pointer_at(&pad, 0, ElementId::A);
    let b = |dx: f32| Pointer::new(1, a.x + dx, a.y);

    send(&mut pad, TouchEvent::down(a));
    send(&mut pad, TouchEvent::pointer_down(1, vec![a, b(150.0)]));
    send(&mut pad, TouchEvent::moved(vec![a, b(225.0)]));
    send(&mut pad, TouchEvent::moved(vec![a, b(150.0)]));
    send(&mut pad, TouchEvent::pointer_up(1, vec![a, b(150.0)]));
    let before = pad.custom_layout().get(Group::Buttons);

    send(&mut pad, TouchEvent::moved(vec![a]));
    assert_eq!(pad.custom_layout().get(Group::Buttons), before);

    // the remaining finger keeps dragging
    send(&mut pad, TouchEvent::moved(vec![Pointer::new(0, a.x + 30.0, a.y)]));
    let t = pad.custom_layout().get(Group::Buttons);
    assert!((t.x_shift - before.x_shift - 20.0).abs() < 1e-3, "x_shift {}", t.x_shift);
    assert_eq!(t.y_shift, before.y_shift);
}

#[test]
fn successive_scale_factors_return_to_original() {
    let mut pad = test_pad();
    pad.set_edit_mode(true);
    let p = pointer_at(&pad, 0, ElementId::A);
    send(&mut pad, TouchEvent::down(p));

    pad.on_scale(1.5);
    pad.on_scale(1.0 / 1.5);
    let scale = pad.custom_layout().get(Group::Buttons).scale;
    assert!((scale - 1.0).abs() < 1e-6, "scale {}", scale);
}

#[test]
fn resizing_one_group_leaves_the_others_alone() {
    let mut pad = test_pad();
    let before = *pad.resolved().unwrap();
    pad.set_edit_mode(true);
    let p = pointer_at(&pad, 0, ElementId::A);
    send(&mut pad, TouchEvent::down(p));

    pad.on_scale(1.3);
    let after = *pad.resolved().unwrap();

    let mut changed = 0;
    for spec in &ELEMENTS {
        if spec.group == Group::Buttons {
            changed += (before.rect(spec.id) != after.rect(spec.id)) as usize;
        } else {
            assert_eq!(before.rect(spec.id), after.rect(spec.id), "{:?} moved", spec.id);
        }
    }
    assert!(changed > 0);
}

#[test]
fn scale_is_clamped_to_configured_range() {
    let mut pad = test_pad();
    pad.set_edit_mode(true);
    let p = pointer_at(&pad, 0, ElementId::Start);
    send(&mut pad, TouchEvent::down(p));

    pad.on_scale(100.0);
    assert_eq!(pad.custom_layout().get(Group::Start).scale, 4.0);
    pad.on_scale(0.0);
    pad.on_scale(f32::INFINITY);
    assert_eq!(pad.custom_layout().get(Group::Start).scale, 4.0);
    pad.on_scale(1e-4);
    assert_eq!(pad.custom_layout().get(Group::Start).scale, 0.25);
}

#[test]
fn external_drag_uses_device_pixels() {
    let mut pad = test_pad();
    pad.set_edit_mode(true);
    let p = pointer_at(&pad, 0, ElementId::DpadUp);
    send(&mut pad, TouchEvent::down(p));

    // 1.5 device px per virtual unit on a 720 px tall screen
    pad.on_drag(15.0, -30.0);
    let t = pad.custom_layout().get(Group::Dpad);
    assert!((t.x_shift - 10.0).abs() < 1e-4);
    assert!((t.y_shift + 20.0).abs() < 1e-4);
    assert_eq!(pad.store().get("touch_y_shift_dpad"), Some(t.y_shift));
}

#[test]
fn leaving_edit_mode_drops_selection() {
    let mut pad = test_pad();
    pad.set_edit_mode(true);
    let p = pointer_at(&pad, 0, ElementId::LeftTrigger);
    send(&mut pad, TouchEvent::down(p));
    assert_eq!(pad.selected_group(), Some(Group::LeftTrigger));

    pad.set_edit_mode(false);
    assert_eq!(pad.selected_group(), None);
    pad.on_scale(2.0);
    assert_eq!(pad.custom_layout().get(Group::LeftTrigger).scale, 1.0);
}
