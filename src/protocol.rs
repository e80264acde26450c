// Constantes del controlador virtual y del espacio de coordenadas
use bitflags::bitflags;

bitflags! {
    /// Controller buttons as bits of the digital mask.
    ///
    /// The mask reported to the emulator core is active-low: a cleared bit means pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        const C          = 0x0001;
        const B          = 0x0002;
        const A          = 0x0004;
        const START      = 0x0008;
        const DPAD_UP    = 0x0010;
        const DPAD_DOWN  = 0x0020;
        const DPAD_LEFT  = 0x0040;
        const DPAD_RIGHT = 0x0080;
        const Y          = 0x0200;
        const X          = 0x0400;
    }
}

/// Digital mask with every button released.
pub const MASK_RELEASED: u16 = 0xFFFF;

// Sentinel codes for the non-digital elements
pub const CODE_LTRIG: i32 = -1;
pub const CODE_RTRIG: i32 = -2;
pub const CODE_ANALOG_RING: i32 = -3;
pub const CODE_ANALOG_NUB: i32 = -4;
pub const CODE_FAST_FORWARD: i32 = -5;

// Espacio virtual 640x480
pub const VIRTUAL_WIDTH: f32 = 640.0;
pub const VIRTUAL_HEIGHT: f32 = 480.0;
pub const EDGE_MARGIN: f32 = 24.0;

pub const PHONE_MAGIC: f32 = 0.7;
pub const TABLET_MAGIC: f32 = 0.8;

pub const AXIS_RESOLUTION: f32 = 254.0;
pub const TRIGGER_MAX: u8 = 255;

pub const MOUSE_BUTTON_PRIMARY: u32 = 0x01;
pub const MOUSE_UNSET: i32 = -32768;

// Claves persistidas: <prefijo><grupo>
pub const KEY_X_SHIFT: &str = "touch_x_shift_";
pub const KEY_Y_SHIFT: &str = "touch_y_shift_";
pub const KEY_SCALE: &str = "touch_scale_";
