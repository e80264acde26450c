//! Touch-to-controller flows in gameplay mode.

use crate::helpers::{center, pointer_at, send, test_pad};
use retro_vpad::bridge::ControllerState;
use retro_vpad::layout::{ELEMENTS, ElementCode, ElementId};
use retro_vpad::protocol::{Buttons, MASK_RELEASED};
use retro_vpad::touch::{InputSource, Pointer, TouchEvent};

#[test]
fn dpad_left_tap_on_phone() {
    let mut pad = test_pad();
    let p = pointer_at(&pad, 0, ElementId::DpadLeft);

    assert!(send(&mut pad, TouchEvent::down(p)));
    let state = pad.bridge().last_controller().unwrap();
    assert_eq!(state.digital_mask, !Buttons::DPAD_LEFT.bits());

    assert!(send(&mut pad, TouchEvent::up(p)));
    let state = pad.bridge().last_controller().unwrap();
    assert_eq!(state.digital_mask, MASK_RELEASED);
}

#[test]
fn every_digital_element_clears_exactly_its_bits() {
    for spec in &ELEMENTS {
        let ElementCode::Digital(buttons) = spec.code else {
            continue;
        };
        let mut pad = test_pad();
        let p = pointer_at(&pad, 0, spec.id);
        send(&mut pad, TouchEvent::down(p));

        let state = pad.bridge().last_controller().unwrap();
        assert_eq!(state.digital_mask, !buttons.bits(), "element {:?}", spec.id);
    }
}

#[test]
fn diagonal_presses_two_directions() {
    let mut pad = test_pad();
    let p = pointer_at(&pad, 0, ElementId::DpadDownRight);
    send(&mut pad, TouchEvent::down(p));

    let state = pad.bridge().last_controller().unwrap();
    assert_eq!(state.pressed(), Buttons::DPAD_DOWN | Buttons::DPAD_RIGHT);
}

#[test]
fn analog_and_start_then_cancel() {
    let mut pad = test_pad();
    let (rx, ry) = center(&pad, ElementId::AnalogRing);
    let stick = Pointer::new(0, rx + 20.0, ry);
    let start = pointer_at(&pad, 1, ElementId::Start);

    send(&mut pad, TouchEvent::down(stick));
    send(&mut pad, TouchEvent::pointer_down(1, vec![stick, start]));

    let state = pad.bridge().last_controller().unwrap();
    assert!(state.axis_x > 0, "axis_x {}", state.axis_x);
    assert_eq!(state.axis_y, 0);
    assert_eq!(state.pressed(), Buttons::START);

    send(&mut pad, TouchEvent::cancel(vec![stick, start]));
    assert_eq!(pad.bridge().last_controller().unwrap(), ControllerState::default());
    assert_eq!(pad.session().analog_pointer(), None);
}

#[test]
fn analog_release_is_idempotent() {
    let mut pad = test_pad();
    let (rx, ry) = center(&pad, ElementId::AnalogRing);
    let stick = Pointer::new(0, rx - 15.0, ry + 30.0);
    let (ring_x, ring_y) = pad.resolved().unwrap().rect(ElementId::AnalogRing).center();

    send(&mut pad, TouchEvent::down(stick));
    assert_ne!(pad.controller_state().axis_x, 0);

    for _ in 0..3 {
        send(&mut pad, TouchEvent::up(stick));
        let state = pad.bridge().last_controller().unwrap();
        assert_eq!((state.axis_x, state.axis_y), (0, 0));
        let (nub_x, nub_y) = pad.resolved().unwrap().rect(ElementId::AnalogNub).center();
        assert!((nub_x - ring_x).abs() < 1e-3 && (nub_y - ring_y).abs() < 1e-3);
    }
}

#[test]
fn lifting_the_stick_finger_keeps_the_trigger_held() {
    let mut pad = test_pad();
    let (rx, ry) = center(&pad, ElementId::AnalogRing);
    let stick = Pointer::new(0, rx + 20.0, ry);
    let trigger = pointer_at(&pad, 1, ElementId::LeftTrigger);
    let (ring_x, ring_y) = pad.resolved().unwrap().rect(ElementId::AnalogRing).center();

    send(&mut pad, TouchEvent::down(stick));
    send(&mut pad, TouchEvent::pointer_down(1, vec![stick, trigger]));
    assert_eq!(pad.session().left_trigger_pointer(), Some(1));

    send(&mut pad, TouchEvent::pointer_up(0, vec![stick, trigger]));
    let state = pad.bridge().last_controller().unwrap();
    assert_eq!((state.axis_x, state.axis_y), (0, 0));
    assert_eq!(state.left_trigger, 255);
    assert_eq!(pad.session().analog_pointer(), None);
    assert_eq!(pad.session().left_trigger_pointer(), Some(1));

    let nub = pad.bridge().last_rect(ElementId::AnalogNub.index()).unwrap();
    let (nub_x, nub_y) = nub.center();
    assert!((nub_x - ring_x).abs() < 1e-3 && (nub_y - ring_y).abs() < 1e-3);
}

#[test]
fn second_pointer_does_not_steal_the_stick() {
    let mut pad = test_pad();
    let (rx, ry) = center(&pad, ElementId::AnalogRing);
    let first = Pointer::new(4, rx + 10.0, ry);
    let second = Pointer::new(9, rx - 10.0, ry);

    send(&mut pad, TouchEvent::down(first));
    send(&mut pad, TouchEvent::pointer_down(1, vec![first, second]));
    assert_eq!(pad.session().analog_pointer(), Some(4));
    assert!(pad.controller_state().axis_x > 0);

    // only the owner drives the nub
    let second_moved = Pointer::new(9, rx - 40.0, ry);
    send(&mut pad, TouchEvent::moved(vec![first, second_moved]));
    assert!(pad.controller_state().axis_x > 0);
}

#[test]
fn stick_owner_ignores_buttons_under_it() {
    let mut pad = test_pad();
    let (rx, ry) = center(&pad, ElementId::AnalogRing);
    let stick = Pointer::new(0, rx, ry);
    send(&mut pad, TouchEvent::down(stick));

    // dragging far away lands on the D-pad but the pointer stays bound to the stick
    let over_dpad = pointer_at(&pad, 0, ElementId::DpadUp);
    send(&mut pad, TouchEvent::moved(vec![over_dpad]));
    let state = pad.bridge().last_controller().unwrap();
    assert_eq!(state.digital_mask, MASK_RELEASED);
    assert!(state.axis_y > 0);
}

#[test]
fn fast_forward_lasts_while_held() {
    let mut pad = test_pad();
    let p = pointer_at(&pad, 0, ElementId::FastForward);
    send(&mut pad, TouchEvent::down(p));
    assert!(pad.bridge().last_controller().unwrap().fast_forward);

    send(&mut pad, TouchEvent::moved(vec![Pointer::new(0, 640.0, 40.0)]));
    assert!(!pad.bridge().last_controller().unwrap().fast_forward);
}

#[test]
fn non_touchscreen_events_are_ignored() {
    let mut pad = test_pad();
    let p = pointer_at(&pad, 0, ElementId::A);
    assert!(!send(&mut pad, TouchEvent::down(p).with_source(InputSource::Other)));
    assert!(pad.controller_state().is_idle());
}
