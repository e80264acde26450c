//! Multitouch (protocol B) evdev reader for the Linux host.
//!
//! [`SlotTracker`] accumulates slot updates between `SYN_REPORT`s and turns each report
//! into the pointer-indexed events the pad consumes: moves first, then lifts, then new
//! contacts, so a lifted pointer still reports its last position.

use crate::error::DeviceError;
use crate::touch::{Pointer, TouchEvent};
use evdev::{AbsoluteAxisType, Device, InputEvent, InputEventKind, Synchronization};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DEFAULT_SLOTS: usize = 10;

/// Raw axis ranges of the panel and the screen they map onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchRange {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    /// `None` when the panel does not report pressure.
    pub pressure_max: Option<i32>,
    pub screen_width: f32,
    pub screen_height: f32,
}

impl TouchRange {
    /// Read the axis ranges of `device`. Screen size defaults to the raw resolution.
    pub fn from_device(
        device: &Device,
        screen_width: Option<f32>,
        screen_height: Option<f32>,
    ) -> Result<Self, DeviceError> {
        let axes = device
            .supported_absolute_axes()
            .ok_or(DeviceError::MissingAxis("ABS_MT_POSITION_X"))?;
        if !axes.contains(AbsoluteAxisType::ABS_MT_POSITION_X) {
            return Err(DeviceError::MissingAxis("ABS_MT_POSITION_X"));
        }
        if !axes.contains(AbsoluteAxisType::ABS_MT_POSITION_Y) {
            return Err(DeviceError::MissingAxis("ABS_MT_POSITION_Y"));
        }
        let has_pressure = axes.contains(AbsoluteAxisType::ABS_MT_PRESSURE);

        let state = device.get_abs_state()?;
        let info = |axis: AbsoluteAxisType| state[axis.0 as usize];
        let x = info(AbsoluteAxisType::ABS_MT_POSITION_X);
        let y = info(AbsoluteAxisType::ABS_MT_POSITION_Y);
        let p = info(AbsoluteAxisType::ABS_MT_PRESSURE);

        Ok(Self {
            x_min: x.minimum,
            x_max: x.maximum,
            y_min: y.minimum,
            y_max: y.maximum,
            pressure_max: has_pressure.then_some(p.maximum),
            screen_width: screen_width.unwrap_or((x.maximum - x.minimum + 1) as f32),
            screen_height: screen_height.unwrap_or((y.maximum - y.minimum + 1) as f32),
        })
    }

    fn scale(raw: i32, min: i32, max: i32, len: f32) -> f32 {
        let span = (max - min).max(1) as f32;
        (raw - min) as f32 / span * len
    }

    fn pointer(&self, id: i32, slot: &Slot) -> Pointer {
        let pressure = match self.pressure_max {
            Some(max) if max > 0 => (slot.pressure as f32 / max as f32).clamp(0.0, 1.0),
            _ => 1.0,
        };
        Pointer::new(
            id,
            Self::scale(slot.x, self.x_min, self.x_max, self.screen_width),
            Self::scale(slot.y, self.y_min, self.y_max, self.screen_height),
        )
        .with_pressure(pressure)
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    tracking_id: i32,
    x: i32,
    y: i32,
    pressure: i32,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            tracking_id: -1,
            x: 0,
            y: 0,
            pressure: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Contact {
    slot: usize,
    pointer: Pointer,
}

#[derive(Debug, Clone)]
pub struct SlotTracker {
    range: TouchRange,
    current: usize,
    slots: Vec<Slot>,
    /// In contact order; the index is the pointer index of emitted events.
    contacts: Vec<Contact>,
}

impl SlotTracker {
    pub fn new(range: TouchRange, slot_count: usize) -> Self {
        Self {
            range,
            current: 0,
            slots: vec![Slot::default(); slot_count.max(1)],
            contacts: Vec::new(),
        }
    }

    pub fn range(&self) -> &TouchRange {
        &self.range
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Feed one raw event. Returns the touch events completed by a `SYN_REPORT`.
    pub fn process(&mut self, event: &InputEvent) -> Vec<TouchEvent> {
        match event.kind() {
            InputEventKind::AbsAxis(axis) => {
                self.on_abs(axis, event.value());
                Vec::new()
            }
            InputEventKind::Synchronization(Synchronization::SYN_REPORT) => self.on_sync(),
            InputEventKind::Synchronization(Synchronization::SYN_DROPPED) => {
                warn!("touch events dropped by the kernel");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn on_abs(&mut self, axis: AbsoluteAxisType, value: i32) {
        if axis == AbsoluteAxisType::ABS_MT_SLOT {
            if value >= 0 && (value as usize) < self.slots.len() {
                self.current = value as usize;
            } else {
                debug!(slot = value, "slot out of range");
            }
            return;
        }

        let slot = &mut self.slots[self.current];
        match axis {
            AbsoluteAxisType::ABS_MT_TRACKING_ID => slot.tracking_id = value,
            AbsoluteAxisType::ABS_MT_POSITION_X => slot.x = value,
            AbsoluteAxisType::ABS_MT_POSITION_Y => slot.y = value,
            AbsoluteAxisType::ABS_MT_PRESSURE => slot.pressure = value,
            _ => {}
        }
    }

    pub fn on_sync(&mut self) -> Vec<TouchEvent> {
        let mut events = Vec::new();

        let mut moved = false;
        for contact in &mut self.contacts {
            let slot = &self.slots[contact.slot];
            if slot.tracking_id == contact.pointer.id {
                let pointer = self.range.pointer(slot.tracking_id, slot);
                if pointer != contact.pointer {
                    contact.pointer = pointer;
                    moved = true;
                }
            }
        }
        if moved {
            events.push(TouchEvent::moved(self.pointers()));
        }

        let mut i = 0;
        while i < self.contacts.len() {
            let contact = self.contacts[i];
            if self.slots[contact.slot].tracking_id == contact.pointer.id {
                i += 1;
                continue;
            }
            let pointers = self.pointers();
            events.push(if pointers.len() == 1 {
                TouchEvent::up(contact.pointer)
            } else {
                TouchEvent::pointer_up(i, pointers)
            });
            self.contacts.remove(i);
        }

        let added: Vec<Contact> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(index, slot)| {
                slot.tracking_id >= 0
                    && !self
                        .contacts
                        .iter()
                        .any(|c| c.slot == *index && c.pointer.id == slot.tracking_id)
            })
            .map(|(index, slot)| Contact {
                slot: index,
                pointer: self.range.pointer(slot.tracking_id, slot),
            })
            .collect();

        for contact in added {
            self.contacts.push(contact);
            let pointers = self.pointers();
            events.push(if pointers.len() == 1 {
                TouchEvent::down(contact.pointer)
            } else {
                TouchEvent::pointer_down(pointers.len() - 1, pointers)
            });
        }

        events
    }

    fn pointers(&self) -> Vec<Pointer> {
        self.contacts.iter().map(|c| c.pointer).collect()
    }
}

fn is_touchscreen(device: &Device) -> bool {
    device.supported_absolute_axes().is_some_and(|axes| {
        axes.contains(AbsoluteAxisType::ABS_MT_SLOT)
            && axes.contains(AbsoluteAxisType::ABS_MT_POSITION_X)
            && axes.contains(AbsoluteAxisType::ABS_MT_POSITION_Y)
    })
}

/// Open `path`, or the first multitouch device when none is given.
pub fn open_touchscreen(path: Option<&Path>) -> Result<(PathBuf, Device), DeviceError> {
    if let Some(path) = path {
        let device = Device::open(path)?;
        info!("Using touchscreen {} ({})", path.display(), device.name().unwrap_or("unnamed"));
        return Ok((path.to_path_buf(), device));
    }

    let (path, device) = evdev::enumerate()
        .find(|(_, device)| is_touchscreen(device))
        .ok_or(DeviceError::NoTouchscreen)?;
    info!("Found touchscreen {} ({})", path.display(), device.name().unwrap_or("unnamed"));
    Ok((path, device))
}

/// Number of slots the device reports, or a sensible default.
pub fn slot_count(device: &Device) -> usize {
    device
        .get_abs_state()
        .ok()
        .map(|state| state[AbsoluteAxisType::ABS_MT_SLOT.0 as usize].maximum + 1)
        .filter(|&n| n > 0)
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_SLOTS)
}
