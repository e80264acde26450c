//! Test helpers: pad builders, element lookups and a counting actuator.

use retro_vpad::bridge::RecordingBridge;
use retro_vpad::config::PadConfig;
use retro_vpad::error::HapticError;
use retro_vpad::geometry::ScreenMetrics;
use retro_vpad::layout::ElementId;
use retro_vpad::pad::VirtualPad;
use retro_vpad::store::{LayoutStore, MemoryStore};
use retro_vpad::touch::{Pointer, TouchEvent};
use retro_vpad::vibration::{Haptics, LoggingHaptics};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

pub const WIDTH: f32 = 1280.0;
pub const HEIGHT: f32 = 720.0;

pub type TestPad = VirtualPad<RecordingBridge, MemoryStore>;

pub fn phone() -> ScreenMetrics {
    ScreenMetrics::new(WIDTH, HEIGHT, 1.0, false)
}

/// Pad on a 1280x720 phone with an empty store.
pub fn test_pad() -> TestPad {
    pad_with_store(MemoryStore::new())
}

pub fn pad_with_store<S: LayoutStore>(store: S) -> VirtualPad<RecordingBridge, S> {
    let mut pad = VirtualPad::new(RecordingBridge::new(), store, LoggingHaptics, PadConfig::default())
        .expect("pad");
    pad.layout(phone());
    pad
}

/// Device-pixel center of an element's resolved rectangle.
pub fn center<S: LayoutStore>(pad: &VirtualPad<RecordingBridge, S>, id: ElementId) -> (f32, f32) {
    let (cx, cy) = pad.resolved().expect("resolved layout").rect(id).center();
    pad.viewport().expect("viewport").to_device(cx, cy)
}

pub fn pointer_at<S: LayoutStore>(pad: &VirtualPad<RecordingBridge, S>, pointer_id: i32, id: ElementId) -> Pointer {
    let (x, y) = center(pad, id);
    Pointer::new(pointer_id, x, y)
}

pub fn send<S: LayoutStore>(pad: &mut VirtualPad<RecordingBridge, S>, event: TouchEvent) -> bool {
    pad.handle_touch_event(&event, WIDTH, HEIGHT)
}

/// Actuator that counts pulses.
#[derive(Clone, Default)]
pub struct CountingHaptics(pub Arc<AtomicUsize>);

impl CountingHaptics {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Poll until at least `n` pulses happened or two seconds passed.
    pub fn wait_for(&self, n: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if self.count() >= n {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }
}

impl Haptics for CountingHaptics {
    fn pulse(&mut self, _duration: Duration) -> Result<(), HapticError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
