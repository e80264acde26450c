#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Touches drive the emulated controller.
    #[default]
    Gameplay,
    /// Touches select and move/resize control groups.
    Edit,
}

impl InputMode {
    pub fn from_edit_flag(edit: bool) -> Self {
        if edit {
            InputMode::Edit
        } else {
            InputMode::Gameplay
        }
    }

    pub fn is_edit(self) -> bool {
        self == InputMode::Edit
    }
}
