//! Vibration requests from the touch path.

use crate::helpers::{CountingHaptics, HEIGHT, WIDTH, phone, pointer_at};
use retro_vpad::bridge::RecordingBridge;
use retro_vpad::config::PadConfig;
use retro_vpad::layout::ElementId;
use retro_vpad::pad::VirtualPad;
use retro_vpad::store::MemoryStore;
use retro_vpad::touch::TouchEvent;
use std::time::Duration;

fn pad(haptics: CountingHaptics, config: PadConfig) -> VirtualPad<RecordingBridge, MemoryStore> {
    let mut pad = VirtualPad::new(RecordingBridge::new(), MemoryStore::new(), haptics, config).unwrap();
    pad.layout(phone());
    pad
}

#[test]
fn button_press_pulses_once() {
    let haptics = CountingHaptics::default();
    let mut pad = pad(haptics.clone(), PadConfig::default());
    let p = pointer_at(&pad, 0, ElementId::B);

    pad.handle_touch_event(&TouchEvent::down(p), WIDTH, HEIGHT);
    assert!(haptics.wait_for(1));

    // held: no new rising edge
    pad.handle_touch_event(&TouchEvent::moved(vec![p]), WIDTH, HEIGHT);
    pad.handle_touch_event(&TouchEvent::moved(vec![p]), WIDTH, HEIGHT);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(haptics.count(), 1);
}

#[test]
fn edit_mode_and_zero_duration_stay_silent() {
    let haptics = CountingHaptics::default();
    let mut edit = pad(haptics.clone(), PadConfig::default());
    edit.set_edit_mode(true);
    let p = pointer_at(&edit, 0, ElementId::B);
    edit.handle_touch_event(&TouchEvent::down(p), WIDTH, HEIGHT);

    let muted = CountingHaptics::default();
    let config = PadConfig {
        vibration_duration_ms: 0,
        ..PadConfig::default()
    };
    let mut silent = pad(muted.clone(), config);
    silent.handle_touch_event(&TouchEvent::down(p), WIDTH, HEIGHT);

    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(haptics.count(), 0);
    assert_eq!(muted.count(), 0);
}

#[test]
fn detach_stops_feedback() {
    let haptics = CountingHaptics::default();
    let mut pad = pad(haptics.clone(), PadConfig::default());
    pad.detach();

    let p = pointer_at(&pad, 0, ElementId::A);
    pad.handle_touch_event(&TouchEvent::down(p), WIDTH, HEIGHT);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(haptics.count(), 0);
}
