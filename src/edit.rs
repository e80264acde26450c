//! Edit mode: move and resize one selected group.
//!
//! The controller only mutates the [`CustomLayout`] it is handed and reports whether
//! anything changed; persisting and re-resolving is up to the caller.

use crate::layout::{CustomLayout, Group};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EditController {
    enabled: bool,
    selected: Option<Group>,
    last: Option<(f32, f32)>,
    min_scale: f32,
    max_scale: f32,
    tablet_gain: f32,
}

impl EditController {
    pub fn new(min_scale: f32, max_scale: f32, tablet_gain: f32) -> Self {
        Self {
            enabled: false,
            selected: None,
            last: None,
            min_scale,
            max_scale,
            tablet_gain,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn selected(&self) -> Option<Group> {
        self.selected
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.selected = None;
        self.reset_drag();
    }

    pub fn select(&mut self, group: Group) {
        if !self.enabled {
            return;
        }
        if self.selected != Some(group) {
            debug!(group = group.key(), "group selected for editing");
        }
        self.selected = Some(group);
        self.reset_drag();
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.reset_drag();
    }

    /// Forget the last drag position so the next move starts a new drag.
    pub fn reset_drag(&mut self) {
        self.last = None;
    }

    fn gain(&self, is_tablet: bool) -> f32 {
        if is_tablet { self.tablet_gain } else { 1.0 }
    }

    /// Drag the selection to the virtual-space point `(x, y)`. The first point of a drag
    /// only records the position.
    pub fn drag_to(&mut self, x: f32, y: f32, layout: &mut CustomLayout, is_tablet: bool) -> bool {
        let moved = match self.last {
            Some((lx, ly)) => self.drag_by(x - lx, y - ly, layout, is_tablet),
            None => false,
        };
        if self.selected.is_some() {
            self.last = Some((x, y));
        }
        moved
    }

    /// Shift the selection by a virtual-space delta.
    pub fn drag_by(&mut self, dx: f32, dy: f32, layout: &mut CustomLayout, is_tablet: bool) -> bool {
        let Some(group) = self.selected.filter(|_| self.enabled) else {
            return false;
        };
        if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
            return false;
        }
        let gain = self.gain(is_tablet);
        let t = layout.get_mut(group);
        t.x_shift += dx * gain;
        t.y_shift += dy * gain;
        true
    }

    /// Multiply the selection's scale, clamped to the configured range.
    pub fn scale_by(&mut self, factor: f32, layout: &mut CustomLayout) -> bool {
        let Some(group) = self.selected.filter(|_| self.enabled) else {
            return false;
        };
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let t = layout.get_mut(group);
        let scale = (t.scale * factor).clamp(self.min_scale, self.max_scale);
        if scale == t.scale {
            return false;
        }
        t.scale = scale;
        true
    }

    pub fn on_scale_end(&mut self) {
        self.deselect();
    }
}
