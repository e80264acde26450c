use super::xbox360_layout::Xbox360Layout;
use crate::error::DeviceError;
use evdev::{
    AbsInfo, AttributeSet, Key, UinputAbsSetup,
    uinput::{VirtualDevice, VirtualDeviceBuilder},
};

pub fn create_virtual_gamepad() -> Result<VirtualDevice, DeviceError> {
    let mut keys = AttributeSet::<Key>::new();
    for key in Xbox360Layout::keys() {
        keys.insert(key);
    }

    let mut builder = VirtualDeviceBuilder::new()?
        .name("Retro VPad Gamepad")
        .with_keys(&keys)?;

    let stick = AbsInfo::new(0, Xbox360Layout::STICK_MIN, Xbox360Layout::STICK_MAX, 16, 128, 0);
    let trigger = AbsInfo::new(0, Xbox360Layout::TRIGGER_MIN, Xbox360Layout::TRIGGER_MAX, 0, 0, 0);
    let hat = AbsInfo::new(0, Xbox360Layout::HAT_MIN, Xbox360Layout::HAT_MAX, 0, 0, 0);

    let axes = [
        (Xbox360Layout::STICK_X, stick),
        (Xbox360Layout::STICK_Y, stick),
        (Xbox360Layout::TRIGGER_L, trigger),
        (Xbox360Layout::TRIGGER_R, trigger),
        (Xbox360Layout::HAT_X, hat),
        (Xbox360Layout::HAT_Y, hat),
    ];

    for (axis, info) in axes {
        let setup = UinputAbsSetup::new(axis, info);
        builder = builder.with_absolute_axis(&setup)?;
    }

    Ok(builder.build()?)
}
