//! Touch dispatcher: turns touch events into controller state.
//!
//! [`TouchSession`] is an explicit state machine driven by one call per event. It owns
//! the pointer-role bindings (analog stick, left and right trigger), the digital mask
//! and the per-element haptic debounce. A pointer that owns a role is not hit-tested
//! against other elements until it is lifted.

use crate::bridge::{ControllerState, MouseState};
use crate::geometry::{Rect, ResolvedLayout, Viewport};
use crate::input_mode::InputMode;
use crate::layout::{ELEMENT_COUNT, ElementCode, ElementId, Group};
use crate::protocol::{MASK_RELEASED, MOUSE_BUTTON_PRIMARY, TRIGGER_MAX};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Up,
    Move,
    Cancel,
    PointerDown,
    PointerUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Touchscreen,
    Mouse,
    Other,
}

/// One contact, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: i32,
    pub x: f32,
    pub y: f32,
    /// 0.0..=1.0
    pub pressure: f32,
}

impl Pointer {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            pressure: 1.0,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }
}

/// A multi-pointer touch event. `action_index` names the pointer that went down or up
/// for `PointerDown`/`PointerUp`; the lifting pointer is still listed in `pointers`.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub action_index: usize,
    pub source: InputSource,
    pub pointers: Vec<Pointer>,
}

impl TouchEvent {
    pub fn new(action: TouchAction, action_index: usize, pointers: Vec<Pointer>) -> Self {
        Self {
            action,
            action_index,
            source: InputSource::Touchscreen,
            pointers,
        }
    }

    pub fn down(pointer: Pointer) -> Self {
        Self::new(TouchAction::Down, 0, vec![pointer])
    }

    pub fn up(pointer: Pointer) -> Self {
        Self::new(TouchAction::Up, 0, vec![pointer])
    }

    pub fn moved(pointers: Vec<Pointer>) -> Self {
        Self::new(TouchAction::Move, 0, pointers)
    }

    pub fn pointer_down(index: usize, pointers: Vec<Pointer>) -> Self {
        Self::new(TouchAction::PointerDown, index, pointers)
    }

    pub fn pointer_up(index: usize, pointers: Vec<Pointer>) -> Self {
        Self::new(TouchAction::PointerUp, index, pointers)
    }

    pub fn cancel(pointers: Vec<Pointer>) -> Self {
        Self::new(TouchAction::Cancel, 0, pointers)
    }

    pub fn with_source(mut self, source: InputSource) -> Self {
        self.source = source;
        self
    }

    pub fn action_pointer(&self) -> Option<&Pointer> {
        self.pointers.get(self.action_index)
    }

    /// The pointer at `index` is being lifted by this event.
    #[inline]
    pub fn is_lifting(&self, index: usize) -> bool {
        self.action == TouchAction::PointerUp && index == self.action_index
    }

    /// Pointers still in contact after this event.
    pub fn active_pointers(&self) -> impl Iterator<Item = &Pointer> {
        let ended = matches!(self.action, TouchAction::Up | TouchAction::Cancel);
        self.pointers
            .iter()
            .enumerate()
            .filter(move |(i, _)| !ended && !self.is_lifting(*i))
            .map(|(_, p)| p)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchOptions {
    pub mode: InputMode,
    /// False while the emulator GUI is open.
    pub hit_test: bool,
    pub pressure_triggers: bool,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            mode: InputMode::Gameplay,
            hit_test: true,
            pressure_triggers: false,
        }
    }
}

/// Side effects requested by one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dispatch {
    /// A control was newly pressed: pulse the vibrator.
    pub feedback: bool,
    /// Edit mode only: the group that was tapped.
    pub selected: Option<Group>,
    /// The nub moved; push this rectangle.
    pub nub: Option<Rect>,
    /// The interaction ended (up or cancel).
    pub released: bool,
}

#[derive(Debug, Clone)]
pub struct TouchSession {
    analog_pointer: Option<i32>,
    left_trigger_pointer: Option<i32>,
    right_trigger_pointer: Option<i32>,
    digital_mask: u16,
    left_trigger: u8,
    right_trigger: u8,
    fast_forward: bool,
    mouse: MouseState,
    press_state: [u8; ELEMENT_COUNT],
}

impl Default for TouchSession {
    fn default() -> Self {
        Self {
            analog_pointer: None,
            left_trigger_pointer: None,
            right_trigger_pointer: None,
            digital_mask: MASK_RELEASED,
            left_trigger: 0,
            right_trigger: 0,
            fast_forward: false,
            mouse: MouseState::default(),
            press_state: [0; ELEMENT_COUNT],
        }
    }
}

impl TouchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analog_pointer(&self) -> Option<i32> {
        self.analog_pointer
    }

    pub fn left_trigger_pointer(&self) -> Option<i32> {
        self.left_trigger_pointer
    }

    pub fn right_trigger_pointer(&self) -> Option<i32> {
        self.right_trigger_pointer
    }

    pub fn digital_mask(&self) -> u16 {
        self.digital_mask
    }

    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    pub fn press_state(&self, id: ElementId) -> u8 {
        self.press_state[id.index()]
    }

    pub fn controller_state(&self, layout: &ResolvedLayout) -> ControllerState {
        let (axis_x, axis_y) = layout.analog_axes();
        ControllerState {
            digital_mask: self.digital_mask,
            axis_x,
            axis_y,
            left_trigger: self.left_trigger,
            right_trigger: self.right_trigger,
            fast_forward: self.fast_forward,
        }
    }

    /// Drop every binding and return to the released state. The caller resets the nub.
    pub fn reset(&mut self) {
        let mouse_pos = (self.mouse.x, self.mouse.y);
        *self = Self::default();
        self.mouse.x = mouse_pos.0;
        self.mouse.y = mouse_pos.1;
    }

    pub fn dispatch(
        &mut self,
        event: &TouchEvent,
        viewport: &Viewport,
        layout: &mut ResolvedLayout,
        opts: DispatchOptions,
    ) -> Dispatch {
        let mut out = Dispatch::default();

        self.digital_mask = MASK_RELEASED;
        self.fast_forward = false;

        if opts.hit_test {
            for (i, pointer) in event.pointers.iter().enumerate() {
                if event.is_lifting(i) {
                    continue;
                }
                let (x, y) = viewport.to_virtual(pointer.x, pointer.y);

                if self.analog_pointer == Some(pointer.id) {
                    out.nub = Some(layout.move_nub(x, y));
                    continue;
                }
                if self.left_trigger_pointer == Some(pointer.id) {
                    if opts.pressure_triggers {
                        self.left_trigger = trigger_value(pointer, true);
                    }
                    continue;
                }
                if self.right_trigger_pointer == Some(pointer.id) {
                    if opts.pressure_triggers {
                        self.right_trigger = trigger_value(pointer, true);
                    }
                    continue;
                }

                if let Some(id) = layout.hit_test(x, y) {
                    self.on_hit(id, pointer, (x, y), layout, &opts, &mut out);
                }
            }

            for state in self.press_state.iter_mut() {
                *state = state.saturating_sub(1);
            }
        }

        match event.action {
            TouchAction::Up | TouchAction::Cancel => {
                self.reset();
                out.nub = Some(layout.reset_nub());
                out.released = true;
            }
            TouchAction::PointerUp => {
                if let Some(pointer) = event.action_pointer() {
                    if let Some(nub) = self.release_pointer(pointer.id, layout) {
                        out.nub = Some(nub);
                    }
                }
            }
            TouchAction::Down | TouchAction::PointerDown => {
                if event.pointers.len() != 1 {
                    self.mouse.buttons = 0;
                } else {
                    self.track_mouse(&event.pointers[0]);
                    self.mouse.buttons = MOUSE_BUTTON_PRIMARY;
                }
            }
            TouchAction::Move => {
                if event.pointers.len() == 1 {
                    self.track_mouse(&event.pointers[0]);
                }
            }
        }

        trace!(
            action = ?event.action,
            pointers = event.pointers.len(),
            mask = self.digital_mask,
            analog = ?self.analog_pointer,
            "touch dispatched"
        );

        out
    }

    fn on_hit(
        &mut self,
        id: ElementId,
        pointer: &Pointer,
        (x, y): (f32, f32),
        layout: &mut ResolvedLayout,
        opts: &DispatchOptions,
        out: &mut Dispatch,
    ) {
        let spec = id.spec();
        let edit = opts.mode.is_edit();

        if spec.code.has_feedback() {
            let state = &mut self.press_state[id.index()];
            if *state == 0 && !edit {
                out.feedback = true;
            }
            // decays to 1 at the end of this dispatch, 0 one event after release
            *state = 2;
        }

        if edit {
            if spec.code != ElementCode::AnalogNub {
                out.selected = Some(spec.group);
            }
            return;
        }

        match spec.code {
            ElementCode::Digital(buttons) => self.digital_mask &= !buttons.bits(),
            ElementCode::FastForward => self.fast_forward = true,
            ElementCode::LeftTrigger => {
                self.left_trigger_pointer.get_or_insert(pointer.id);
                self.left_trigger = trigger_value(pointer, opts.pressure_triggers);
            }
            ElementCode::RightTrigger => {
                self.right_trigger_pointer.get_or_insert(pointer.id);
                self.right_trigger = trigger_value(pointer, opts.pressure_triggers);
            }
            ElementCode::AnalogRing => {
                if self.analog_pointer.is_none() {
                    self.analog_pointer = Some(pointer.id);
                    out.nub = Some(layout.move_nub(x, y));
                }
            }
            ElementCode::AnalogNub => {}
        }
    }

    /// Release whatever role `pointer_id` owns. Returns the reset nub for the analog role.
    fn release_pointer(&mut self, pointer_id: i32, layout: &mut ResolvedLayout) -> Option<Rect> {
        if self.analog_pointer == Some(pointer_id) {
            self.analog_pointer = None;
            return Some(layout.reset_nub());
        }
        if self.left_trigger_pointer == Some(pointer_id) {
            self.left_trigger_pointer = None;
            self.left_trigger = 0;
        } else if self.right_trigger_pointer == Some(pointer_id) {
            self.right_trigger_pointer = None;
            self.right_trigger = 0;
        }
        None
    }

    fn track_mouse(&mut self, pointer: &Pointer) {
        self.mouse.x = pointer.x.round() as i32;
        self.mouse.y = pointer.y.round() as i32;
    }
}

fn trigger_value(pointer: &Pointer, pressure_sensitive: bool) -> u8 {
    if pressure_sensitive {
        (pointer.pressure.clamp(0.0, 1.0) * TRIGGER_MAX as f32).round() as u8
    } else {
        TRIGGER_MAX
    }
}
