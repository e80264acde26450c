pub mod gamepad;
pub mod xbox360_layout;

use crate::error::DeviceError;
use evdev::{
    AttributeSet, Key, RelativeAxisType,
    uinput::{VirtualDevice, VirtualDeviceBuilder},
};

pub use gamepad::create_virtual_gamepad;
pub use xbox360_layout::Xbox360Layout;

/// Mouse that receives the single-finger emulation path.
pub fn create_virtual_mouse() -> Result<VirtualDevice, DeviceError> {
    let mut keys = AttributeSet::<Key>::new();
    keys.insert(Key::BTN_LEFT);

    let mut rel_axes = AttributeSet::<RelativeAxisType>::new();
    rel_axes.insert(RelativeAxisType::REL_X);
    rel_axes.insert(RelativeAxisType::REL_Y);

    let device = VirtualDeviceBuilder::new()?
        .name("Retro VPad Mouse")
        .with_keys(&keys)?
        .with_relative_axes(&rel_axes)?
        .build()?;

    Ok(device)
}
