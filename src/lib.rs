//! On-screen virtual gamepad engine.
//!
//! Turns multi-touch input into controller state for an emulated pad, lets the user
//! move and resize the on-screen control groups, and pulses haptics off the input path.
//! The emulator side is reached through [`NativeBridge`].

pub mod bridge;
pub mod config;
pub mod devices;
pub mod edit;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod input_mode;
pub mod layout;
pub mod logger;
pub mod osd;
pub mod pad;
pub mod protocol;
pub mod store;
pub mod touch;
pub mod touchscreen;
pub mod uinput_bridge;
pub mod vibration;

pub use bridge::{ControllerState, MouseState, NativeBridge, RecordingBridge};
pub use config::PadConfig;
pub use error::{PadError, PadResult};
pub use geometry::{Rect, ResolvedLayout, ScreenMetrics, resolve};
pub use input_mode::InputMode;
pub use layout::{CustomLayout, ElementId, Group, GroupTransform};
pub use pad::VirtualPad;
pub use protocol::Buttons;
pub use store::{JsonFileStore, LayoutStore, MemoryStore};
pub use touch::{InputSource, Pointer, TouchAction, TouchEvent, TouchSession};
pub use vibration::{Haptics, LoggingHaptics, VibrationWorker};
