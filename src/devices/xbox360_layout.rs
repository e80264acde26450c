use crate::protocol::{Buttons, TRIGGER_MAX};
use evdev::{AbsoluteAxisType, Key};

/// Layout del gamepad virtual que recibe el estado del pad tactil.
/// Sigue los codigos del driver xpad para que los emuladores lo reconozcan sin mapeo.
pub struct Xbox360Layout;

impl Xbox360Layout {
    /// Botones digitales del pad y su tecla evdev (cruceta aparte, va por el HAT).
    pub const FACE_BUTTONS: [(Buttons, Key); 6] = [
        (Buttons::A, Key::BTN_SOUTH),
        (Buttons::B, Key::BTN_EAST),
        (Buttons::X, Key::BTN_WEST),
        (Buttons::Y, Key::BTN_NORTH),
        (Buttons::C, Key::BTN_C),
        (Buttons::START, Key::BTN_START),
    ];

    /// Avance rapido va en el boton Guide.
    pub const FAST_FORWARD: Key = Key::BTN_MODE;

    // ABS_X/ABS_Y   stick        (-32768..32767)
    // ABS_Z/ABS_RZ  gatillos     (0..255)
    // ABS_HAT0X/Y   cruceta      [-1, 0, +1]
    pub const STICK_X: AbsoluteAxisType = AbsoluteAxisType::ABS_X;
    pub const STICK_Y: AbsoluteAxisType = AbsoluteAxisType::ABS_Y;
    pub const TRIGGER_L: AbsoluteAxisType = AbsoluteAxisType::ABS_Z;
    pub const TRIGGER_R: AbsoluteAxisType = AbsoluteAxisType::ABS_RZ;
    pub const HAT_X: AbsoluteAxisType = AbsoluteAxisType::ABS_HAT0X;
    pub const HAT_Y: AbsoluteAxisType = AbsoluteAxisType::ABS_HAT0Y;

    pub const STICK_MIN: i32 = -32768;
    pub const STICK_MAX: i32 = 32767;

    pub const TRIGGER_MIN: i32 = 0;
    pub const TRIGGER_MAX: i32 = TRIGGER_MAX as i32;

    pub const HAT_MIN: i32 = -1;
    pub const HAT_MAX: i32 = 1;

    /// Keys the virtual device must advertise.
    pub fn keys() -> impl Iterator<Item = Key> {
        Self::FACE_BUTTONS
            .iter()
            .map(|&(_, key)| key)
            .chain(std::iter::once(Self::FAST_FORWARD))
    }

    /// i8 stick value to the xpad range.
    pub fn stick_value(axis: i8) -> i32 {
        ((axis as i32 * Self::STICK_MAX) / i8::MAX as i32).max(Self::STICK_MIN)
    }

    /// Hat values from the pressed D-pad bits. Opposite directions cancel.
    pub fn hat_values(pressed: Buttons) -> (i32, i32) {
        let axis = |neg: Buttons, pos: Buttons| -> i32 {
            pressed.contains(pos) as i32 - pressed.contains(neg) as i32
        };
        (
            axis(Buttons::DPAD_LEFT, Buttons::DPAD_RIGHT),
            axis(Buttons::DPAD_UP, Buttons::DPAD_DOWN),
        )
    }
}
