//! Call contract towards the emulator core and renderer.

use crate::geometry::Rect;
use crate::protocol::{Buttons, MASK_RELEASED, MOUSE_UNSET};

/// Controller snapshot pushed once per processed touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    /// Active-low: 0 = pressed.
    pub digital_mask: u16,
    pub axis_x: i8,
    pub axis_y: i8,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub fast_forward: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            digital_mask: MASK_RELEASED,
            axis_x: 0,
            axis_y: 0,
            left_trigger: 0,
            right_trigger: 0,
            fast_forward: false,
        }
    }
}

impl ControllerState {
    pub fn pressed(&self) -> Buttons {
        Buttons::from_bits_truncate(!self.digital_mask)
    }

    /// No virtual control is active.
    pub fn is_idle(&self) -> bool {
        self.digital_mask == MASK_RELEASED
            && self.axis_x == 0
            && self.axis_y == 0
            && self.left_trigger == 0
            && self.right_trigger == 0
            && !self.fast_forward
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub buttons: u32,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            x: MOUSE_UNSET,
            y: MOUSE_UNSET,
            buttons: 0,
        }
    }
}

/// Implemented by the emulator side. Every call is fire-and-forget.
pub trait NativeBridge {
    fn push_element_rect(&mut self, index: usize, rect: Rect);

    fn push_controller_state(&mut self, state: &ControllerState);

    fn push_mouse_state(&mut self, mouse: &MouseState);

    fn notify_osd_visible(&mut self);

    fn notify_osd_hidden(&mut self);

    /// While the emulator menu is open touches go to the mouse only.
    fn gui_is_open(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCall {
    ElementRect(usize, Rect),
    Controller(ControllerState),
    Mouse(MouseState),
    OsdVisible,
    OsdHidden,
}

/// Bridge that keeps every call, for headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    pub calls: Vec<BridgeCall>,
    pub gui_open: bool,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_controller(&self) -> Option<ControllerState> {
        self.calls.iter().rev().find_map(|call| match call {
            BridgeCall::Controller(state) => Some(*state),
            _ => None,
        })
    }

    pub fn last_mouse(&self) -> Option<MouseState> {
        self.calls.iter().rev().find_map(|call| match call {
            BridgeCall::Mouse(mouse) => Some(*mouse),
            _ => None,
        })
    }

    pub fn last_rect(&self, index: usize) -> Option<Rect> {
        self.calls.iter().rev().find_map(|call| match call {
            BridgeCall::ElementRect(i, rect) if *i == index => Some(*rect),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&BridgeCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl NativeBridge for RecordingBridge {
    fn push_element_rect(&mut self, index: usize, rect: Rect) {
        self.calls.push(BridgeCall::ElementRect(index, rect));
    }

    fn push_controller_state(&mut self, state: &ControllerState) {
        self.calls.push(BridgeCall::Controller(*state));
    }

    fn push_mouse_state(&mut self, mouse: &MouseState) {
        self.calls.push(BridgeCall::Mouse(*mouse));
    }

    fn notify_osd_visible(&mut self) {
        self.calls.push(BridgeCall::OsdVisible);
    }

    fn notify_osd_hidden(&mut self) {
        self.calls.push(BridgeCall::OsdHidden);
    }

    fn gui_is_open(&self) -> bool {
        self.gui_open
    }
}
