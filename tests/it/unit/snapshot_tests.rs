//! Snapshot tests using the insta crate.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use retro_vpad::bridge::ControllerState;
use retro_vpad::layout::Group;

#[test]
fn snapshot_persisted_keys() {
    let keys: Vec<String> = Group::ALL
        .iter()
        .flat_map(|group| group.persisted_keys())
        .collect();
    insta::assert_debug_snapshot!(keys, @r###"
    [
        "touch_x_shift_dpad",
        "touch_y_shift_dpad",
        "touch_scale_dpad",
        "touch_x_shift_buttons",
        "touch_y_shift_buttons",
        "touch_scale_buttons",
        "touch_x_shift_start",
        "touch_y_shift_start",
        "touch_scale_start",
        "touch_x_shift_left_trigger",
        "touch_y_shift_left_trigger",
        "touch_scale_left_trigger",
        "touch_x_shift_right_trigger",
        "touch_y_shift_right_trigger",
        "touch_scale_right_trigger",
        "touch_x_shift_analog",
        "touch_y_shift_analog",
        "touch_scale_analog",
        "touch_x_shift_fforward",
        "touch_y_shift_fforward",
        "touch_scale_fforward",
    ]
    "###);
}

#[test]
fn snapshot_released_controller_state() {
    insta::assert_debug_snapshot!(ControllerState::default(), @r###"
    ControllerState {
        digital_mask: 65535,
        axis_x: 0,
        axis_y: 0,
        left_trigger: 0,
        right_trigger: 0,
        fast_forward: false,
    }
    "###);
}
