//! Layout model: the fixed element table and the per-group custom transform.
//!
//! Elements are authored in a virtual 640x480 space. Every element belongs to one
//! [`Group`], and the group's [`GroupTransform`] (shift + scale) is applied uniformly
//! to its members. Scaling happens around the group origin, so a scaled D-pad keeps its
//! top-left corner where the user put it.

use crate::error::StoreError;
use crate::protocol::{
    Buttons, CODE_ANALOG_NUB, CODE_ANALOG_RING, CODE_FAST_FORWARD, CODE_LTRIG, CODE_RTRIG,
    KEY_SCALE, KEY_X_SHIFT, KEY_Y_SHIFT,
};
use crate::store::LayoutStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Dpad,
    Buttons,
    Start,
    LeftTrigger,
    RightTrigger,
    Analog,
    FastForward,
}

impl Group {
    pub const COUNT: usize = 7;

    pub const ALL: [Group; Self::COUNT] = [
        Group::Dpad,
        Group::Buttons,
        Group::Start,
        Group::LeftTrigger,
        Group::RightTrigger,
        Group::Analog,
        Group::FastForward,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used in persisted keys.
    pub fn key(self) -> &'static str {
        match self {
            Group::Dpad => "dpad",
            Group::Buttons => "buttons",
            Group::Start => "start",
            Group::LeftTrigger => "left_trigger",
            Group::RightTrigger => "right_trigger",
            Group::Analog => "analog",
            Group::FastForward => "fforward",
        }
    }

    /// Top-left of the group in virtual space, before any customization.
    pub fn origin(self) -> (f32, f32) {
        match self {
            Group::Dpad => (20.0, 288.0),
            Group::Buttons => (448.0, 288.0),
            Group::Start => (288.0, 416.0),
            Group::LeftTrigger => (440.0, 200.0),
            Group::RightTrigger => (542.0, 200.0),
            Group::Analog => (16.0, 56.0),
            Group::FastForward => (288.0, 12.0),
        }
    }

    /// Horizontally centered groups keep their center when resized.
    pub fn is_centered(self) -> bool {
        matches!(self, Group::Start | Group::FastForward)
    }

    pub fn persisted_keys(self) -> [String; 3] {
        [
            format!("{}{}", KEY_X_SHIFT, self.key()),
            format!("{}{}", KEY_Y_SHIFT, self.key()),
            format!("{}{}", KEY_SCALE, self.key()),
        ]
    }
}

/// What an element does when touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementCode {
    Digital(Buttons),
    LeftTrigger,
    RightTrigger,
    AnalogRing,
    AnalogNub,
    FastForward,
}

impl ElementCode {
    /// Positive button bits, or the negative sentinel of a special element.
    pub fn raw(self) -> i32 {
        match self {
            ElementCode::Digital(buttons) => buttons.bits() as i32,
            ElementCode::LeftTrigger => CODE_LTRIG,
            ElementCode::RightTrigger => CODE_RTRIG,
            ElementCode::AnalogRing => CODE_ANALOG_RING,
            ElementCode::AnalogNub => CODE_ANALOG_NUB,
            ElementCode::FastForward => CODE_FAST_FORWARD,
        }
    }

    /// Elements that pulse the vibrator on a rising edge.
    pub fn has_feedback(self) -> bool {
        !matches!(self, ElementCode::AnalogRing | ElementCode::AnalogNub)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    DpadLeft,
    DpadUp,
    DpadRight,
    DpadDown,
    X,
    Y,
    B,
    A,
    Start,
    LeftTrigger,
    RightTrigger,
    AnalogRing,
    AnalogNub,
    FastForward,
    DpadUpLeft,
    DpadUpRight,
    DpadDownLeft,
    DpadDownRight,
}

impl ElementId {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static ElementSpec {
        &ELEMENTS[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSpec {
    pub id: ElementId,
    pub group: Group,
    pub code: ElementCode,
    /// Offset from the group origin, scaled with the group.
    pub offset: (f32, f32),
    pub size: (f32, f32),
}

impl ElementSpec {
    /// Elements with artwork; the diagonals are invisible hit areas.
    pub fn is_drawn(&self) -> bool {
        self.id.index() < DRAWN_COUNT
    }

    /// Base rectangle in virtual space, without any customization.
    pub fn base_rect(&self) -> (f32, f32, f32, f32) {
        let (ox, oy) = self.group.origin();
        (ox + self.offset.0, oy + self.offset.1, self.size.0, self.size.1)
    }

    /// Rectangle after the group transform, still in virtual space.
    pub fn customized_rect(&self, t: &GroupTransform) -> (f32, f32, f32, f32) {
        let (ox, oy) = self.group.origin();
        let x = if self.group.is_centered() {
            // horizontal pivot on the base center
            ox + self.offset.0 + (self.size.0 - self.size.0 * t.scale) / 2.0
        } else {
            ox + self.offset.0 * t.scale
        };
        (
            x + t.x_shift,
            oy + self.offset.1 * t.scale + t.y_shift,
            self.size.0 * t.scale,
            self.size.1 * t.scale,
        )
    }
}

pub const ELEMENT_COUNT: usize = 18;
/// Number of elements whose geometry is pushed to the renderer.
pub const DRAWN_COUNT: usize = 14;

const fn element(
    id: ElementId,
    group: Group,
    code: ElementCode,
    offset: (f32, f32),
    size: (f32, f32),
) -> ElementSpec {
    ElementSpec { id, group, code, offset, size }
}

const PAD: (f32, f32) = (64.0, 64.0);
const TRIGGER: (f32, f32) = (90.0, 64.0);

/// Declaration order is hit-test order: the first matching element wins.
pub static ELEMENTS: [ElementSpec; ELEMENT_COUNT] = [
    element(ElementId::DpadLeft, Group::Dpad, ElementCode::Digital(Buttons::DPAD_LEFT), (0.0, 64.0), PAD),
    element(ElementId::DpadUp, Group::Dpad, ElementCode::Digital(Buttons::DPAD_UP), (64.0, 0.0), PAD),
    element(ElementId::DpadRight, Group::Dpad, ElementCode::Digital(Buttons::DPAD_RIGHT), (128.0, 64.0), PAD),
    element(ElementId::DpadDown, Group::Dpad, ElementCode::Digital(Buttons::DPAD_DOWN), (64.0, 128.0), PAD),
    element(ElementId::X, Group::Buttons, ElementCode::Digital(Buttons::X), (0.0, 64.0), PAD),
    element(ElementId::Y, Group::Buttons, ElementCode::Digital(Buttons::Y), (64.0, 0.0), PAD),
    element(ElementId::B, Group::Buttons, ElementCode::Digital(Buttons::B), (128.0, 64.0), PAD),
    element(ElementId::A, Group::Buttons, ElementCode::Digital(Buttons::A), (64.0, 128.0), PAD),
    element(ElementId::Start, Group::Start, ElementCode::Digital(Buttons::START), (0.0, 0.0), PAD),
    element(ElementId::LeftTrigger, Group::LeftTrigger, ElementCode::LeftTrigger, (0.0, 0.0), TRIGGER),
    element(ElementId::RightTrigger, Group::RightTrigger, ElementCode::RightTrigger, (0.0, 0.0), TRIGGER),
    element(ElementId::AnalogRing, Group::Analog, ElementCode::AnalogRing, (0.0, 0.0), (128.0, 128.0)),
    element(ElementId::AnalogNub, Group::Analog, ElementCode::AnalogNub, (48.0, 48.0), (32.0, 32.0)),
    element(ElementId::FastForward, Group::FastForward, ElementCode::FastForward, (0.0, 0.0), PAD),
    element(
        ElementId::DpadUpLeft,
        Group::Dpad,
        ElementCode::Digital(Buttons::DPAD_UP.union(Buttons::DPAD_LEFT)),
        (0.0, 0.0),
        PAD,
    ),
    element(
        ElementId::DpadUpRight,
        Group::Dpad,
        ElementCode::Digital(Buttons::DPAD_UP.union(Buttons::DPAD_RIGHT)),
        (128.0, 0.0),
        PAD,
    ),
    element(
        ElementId::DpadDownLeft,
        Group::Dpad,
        ElementCode::Digital(Buttons::DPAD_DOWN.union(Buttons::DPAD_LEFT)),
        (0.0, 128.0),
        PAD,
    ),
    element(
        ElementId::DpadDownRight,
        Group::Dpad,
        ElementCode::Digital(Buttons::DPAD_DOWN.union(Buttons::DPAD_RIGHT)),
        (128.0, 128.0),
        PAD,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupTransform {
    pub x_shift: f32,
    pub y_shift: f32,
    pub scale: f32,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self {
            x_shift: 0.0,
            y_shift: 0.0,
            scale: 1.0,
        }
    }
}

/// User customization for every group.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CustomLayout {
    transforms: [GroupTransform; Group::COUNT],
}

impl CustomLayout {
    pub fn get(&self, group: Group) -> GroupTransform {
        self.transforms[group.index()]
    }

    pub fn get_mut(&mut self, group: Group) -> &mut GroupTransform {
        &mut self.transforms[group.index()]
    }

    pub fn set(&mut self, group: Group, transform: GroupTransform) {
        self.transforms[group.index()] = transform;
    }

    /// Read every group from `store`; missing keys take the default transform.
    pub fn load(store: &impl LayoutStore) -> Self {
        let mut layout = Self::default();
        for group in Group::ALL {
            let [x_key, y_key, scale_key] = group.persisted_keys();
            let defaults = GroupTransform::default();
            layout.set(
                group,
                GroupTransform {
                    x_shift: store.get(&x_key).unwrap_or(defaults.x_shift),
                    y_shift: store.get(&y_key).unwrap_or(defaults.y_shift),
                    scale: store.get(&scale_key).unwrap_or(defaults.scale),
                },
            );
        }
        layout
    }

    pub fn save_group(&self, group: Group, store: &mut impl LayoutStore) -> Result<(), StoreError> {
        let [x_key, y_key, scale_key] = group.persisted_keys();
        let t = self.get(group);
        store.put_all(&[(x_key, t.x_shift), (y_key, t.y_shift), (scale_key, t.scale)])
    }

    pub fn save(&self, store: &mut impl LayoutStore) -> Result<(), StoreError> {
        let entries: Vec<(String, f32)> = Group::ALL
            .iter()
            .flat_map(|&group| {
                let t = self.get(group);
                let [x_key, y_key, scale_key] = group.persisted_keys();
                [(x_key, t.x_shift), (y_key, t.y_shift), (scale_key, t.scale)]
            })
            .collect();
        store.put_all(&entries)
    }

    /// Remove every persisted key so the next load yields defaults.
    pub fn clear(store: &mut impl LayoutStore) -> Result<(), StoreError> {
        let keys: Vec<String> = Group::ALL
            .iter()
            .flat_map(|group| group.persisted_keys())
            .collect();
        store.remove_all(&keys)
    }
}
