//! Bridge that forwards pad output to uinput virtual devices.

use crate::bridge::{ControllerState, MouseState, NativeBridge};
use crate::devices::{Xbox360Layout, create_virtual_gamepad, create_virtual_mouse};
use crate::error::DeviceError;
use crate::geometry::Rect;
use crate::protocol::{Buttons, MOUSE_BUTTON_PRIMARY, MOUSE_UNSET};
use evdev::{AbsoluteAxisType, EventType, InputEvent, Key, RelativeAxisType, uinput::VirtualDevice};
use tracing::{debug, info, trace, warn};

/// Output sink the bridge writes to. Implemented by [`VirtualDevice`].
pub trait EventSink {
    fn emit(&mut self, events: &[InputEvent]) -> std::io::Result<()>;
}

impl EventSink for VirtualDevice {
    fn emit(&mut self, events: &[InputEvent]) -> std::io::Result<()> {
        VirtualDevice::emit(self, events)
    }
}

pub struct UinputBridge<G: EventSink = VirtualDevice, M: EventSink = VirtualDevice> {
    gamepad: G,
    mouse: M,
    last_state: ControllerState,
    last_mouse: MouseState,
}

impl UinputBridge {
    /// Create the virtual gamepad and mouse.
    pub fn create() -> Result<Self, DeviceError> {
        let gamepad = create_virtual_gamepad()?;
        let mouse = create_virtual_mouse()?;
        info!("Virtual gamepad and mouse created");
        Ok(Self::with_sinks(gamepad, mouse))
    }
}

impl<G: EventSink, M: EventSink> UinputBridge<G, M> {
    pub fn with_sinks(gamepad: G, mouse: M) -> Self {
        Self {
            gamepad,
            mouse,
            last_state: ControllerState::default(),
            last_mouse: MouseState::default(),
        }
    }

    pub fn gamepad(&self) -> &G {
        &self.gamepad
    }

    pub fn mouse(&self) -> &M {
        &self.mouse
    }

    fn controller_events(&self, state: &ControllerState) -> Vec<InputEvent> {
        let prev = &self.last_state;
        let mut events = Vec::with_capacity(12);

        let pressed = state.pressed();
        let changed = pressed ^ prev.pressed();
        for (button, key) in Xbox360Layout::FACE_BUTTONS {
            if changed.contains(button) {
                events.push(key_event(key, pressed.contains(button)));
            }
        }
        if state.fast_forward != prev.fast_forward {
            events.push(key_event(Xbox360Layout::FAST_FORWARD, state.fast_forward));
        }

        let dpad = Buttons::DPAD_UP | Buttons::DPAD_DOWN | Buttons::DPAD_LEFT | Buttons::DPAD_RIGHT;
        if changed.intersects(dpad) {
            let (hx, hy) = Xbox360Layout::hat_values(pressed);
            let (px, py) = Xbox360Layout::hat_values(prev.pressed());
            if hx != px {
                events.push(abs_event(Xbox360Layout::HAT_X, hx));
            }
            if hy != py {
                events.push(abs_event(Xbox360Layout::HAT_Y, hy));
            }
        }

        if state.axis_x != prev.axis_x {
            events.push(abs_event(Xbox360Layout::STICK_X, Xbox360Layout::stick_value(state.axis_x)));
        }
        if state.axis_y != prev.axis_y {
            events.push(abs_event(Xbox360Layout::STICK_Y, Xbox360Layout::stick_value(state.axis_y)));
        }
        if state.left_trigger != prev.left_trigger {
            events.push(abs_event(Xbox360Layout::TRIGGER_L, state.left_trigger as i32));
        }
        if state.right_trigger != prev.right_trigger {
            events.push(abs_event(Xbox360Layout::TRIGGER_R, state.right_trigger as i32));
        }

        events
    }

    fn mouse_events(&self, mouse: &MouseState) -> Vec<InputEvent> {
        let prev = &self.last_mouse;
        let mut events = Vec::with_capacity(3);

        // no relative motion out of the unset position
        let known = |m: &MouseState| m.x != MOUSE_UNSET && m.y != MOUSE_UNSET;
        if known(prev) && known(mouse) {
            let dx = mouse.x - prev.x;
            let dy = mouse.y - prev.y;
            if dx != 0 {
                events.push(InputEvent::new(EventType::RELATIVE, RelativeAxisType::REL_X.0, dx));
            }
            if dy != 0 {
                events.push(InputEvent::new(EventType::RELATIVE, RelativeAxisType::REL_Y.0, dy));
            }
        }

        let changed = mouse.buttons ^ prev.buttons;
        if changed & MOUSE_BUTTON_PRIMARY != 0 {
            events.push(key_event(Key::BTN_LEFT, mouse.buttons & MOUSE_BUTTON_PRIMARY != 0));
        }

        events
    }
}

fn key_event(key: Key, down: bool) -> InputEvent {
    InputEvent::new(EventType::KEY, key.0, down as i32)
}

fn abs_event(axis: AbsoluteAxisType, value: i32) -> InputEvent {
    InputEvent::new(EventType::ABSOLUTE, axis.0, value)
}

impl<G: EventSink, M: EventSink> NativeBridge for UinputBridge<G, M> {
    fn push_element_rect(&mut self, index: usize, rect: Rect) {
        trace!(index, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "element rect");
    }

    fn push_controller_state(&mut self, state: &ControllerState) {
        let events = self.controller_events(state);
        self.last_state = *state;
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.gamepad.emit(&events) {
            warn!("Failed to emit gamepad events: {}", e);
        }
    }

    fn push_mouse_state(&mut self, mouse: &MouseState) {
        let events = self.mouse_events(mouse);
        self.last_mouse = *mouse;
        if events.is_empty() {
            return;
        }
        if let Err(e) = self.mouse.emit(&events) {
            warn!("Failed to emit mouse events: {}", e);
        }
    }

    fn notify_osd_visible(&mut self) {
        debug!("OSD visible");
    }

    fn notify_osd_hidden(&mut self) {
        debug!("OSD hidden");
    }
}
