//! The virtual pad: one per attached view.
//!
//! [`VirtualPad`] owns the custom layout, the resolved geometry, the touch session, the
//! edit controller and the vibration worker, and talks to the emulator through a
//! [`NativeBridge`]. Everything except the haptic pulse runs synchronously on the
//! caller's thread.

use crate::bridge::{ControllerState, NativeBridge};
use crate::config::PadConfig;
use crate::edit::EditController;
use crate::error::PadResult;
use crate::geometry::{ResolvedLayout, ScreenMetrics, Viewport, resolve};
use crate::gesture::{PinchDetector, PinchEvent};
use crate::input_mode::InputMode;
use crate::layout::{CustomLayout, ElementId, Group};
use crate::osd::OsdTimer;
use crate::store::LayoutStore;
use crate::touch::{DispatchOptions, InputSource, TouchAction, TouchEvent, TouchSession};
use crate::vibration::{Haptics, VibrationWorker};
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct VirtualPad<B: NativeBridge, S: LayoutStore> {
    bridge: B,
    store: S,
    config: PadConfig,
    custom: CustomLayout,
    metrics: Option<ScreenMetrics>,
    resolved: Option<ResolvedLayout>,
    session: TouchSession,
    edit: EditController,
    pinch: PinchDetector,
    osd: OsdTimer,
    vibration: Option<VibrationWorker>,
}

impl<B: NativeBridge, S: LayoutStore> VirtualPad<B, S> {
    /// Build a pad, reading the custom layout from `store` and starting the vibration worker.
    pub fn new(bridge: B, store: S, haptics: impl Haptics, config: PadConfig) -> PadResult<Self> {
        config.validate()?;
        let custom = CustomLayout::load(&store);
        let vibration = VibrationWorker::spawn(haptics, config.vibration_duration())?;

        Ok(Self {
            bridge,
            store,
            custom,
            metrics: None,
            resolved: None,
            session: TouchSession::new(),
            edit: EditController::new(
                config.min_group_scale,
                config.max_group_scale,
                config.tablet_drag_gain,
            ),
            pinch: PinchDetector::new(config.min_pinch_span),
            osd: OsdTimer::new(config.osd_idle_timeout()),
            vibration: Some(vibration),
            config,
        })
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn custom_layout(&self) -> &CustomLayout {
        &self.custom
    }

    pub fn resolved(&self) -> Option<&ResolvedLayout> {
        self.resolved.as_ref()
    }

    pub fn metrics(&self) -> Option<ScreenMetrics> {
        self.metrics
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.metrics.map(|m| m.viewport())
    }

    pub fn session(&self) -> &TouchSession {
        &self.session
    }

    pub fn mode(&self) -> InputMode {
        InputMode::from_edit_flag(self.edit.is_enabled())
    }

    pub fn selected_group(&self) -> Option<Group> {
        self.edit.selected()
    }

    pub fn is_osd_visible(&self) -> bool {
        self.osd.is_visible()
    }

    pub fn controller_state(&self) -> ControllerState {
        match &self.resolved {
            Some(resolved) => self.session.controller_state(resolved),
            None => ControllerState::default(),
        }
    }

    /// Layout pass for a new screen size. Pushes every drawn rectangle to the bridge.
    pub fn layout(&mut self, metrics: ScreenMetrics) {
        self.metrics = Some(metrics);
        self.relayout();
    }

    fn relayout(&mut self) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let Some(resolved) = resolve(&metrics, Some(&self.custom)) else {
            debug!("custom layout not loaded, skipping layout pass");
            return;
        };

        for (index, rect) in resolved.drawn() {
            self.bridge.push_element_rect(index, rect);
        }
        self.resolved = Some(resolved);
        debug!(
            width = metrics.width,
            height = metrics.height,
            scale = metrics.control_scale(),
            "layout resolved"
        );
    }

    fn ensure_layout(&mut self, width: f32, height: f32) {
        let current = self.metrics;
        match current {
            Some(m) if m.width == width && m.height == height && self.resolved.is_some() => {}
            _ => {
                let (density, is_tablet) = current
                    .map(|m| (m.density, m.is_tablet))
                    .unwrap_or((self.config.density, self.config.is_tablet));
                self.layout(ScreenMetrics::new(width, height, density, is_tablet));
            }
        }
    }

    pub fn handle_touch_event(&mut self, event: &TouchEvent, width: f32, height: f32) -> bool {
        self.handle_touch_event_at(event, width, height, Instant::now())
    }

    /// Process one touch event. Returns whether it was consumed.
    pub fn handle_touch_event_at(
        &mut self,
        event: &TouchEvent,
        width: f32,
        height: f32,
        now: Instant,
    ) -> bool {
        if event.source != InputSource::Touchscreen {
            return false;
        }

        self.ensure_layout(width, height);
        let Some(metrics) = self.metrics.filter(|_| self.resolved.is_some()) else {
            return false;
        };
        let viewport = metrics.viewport();
        let mode = self.mode();

        if self.osd.touched(now, mode.is_edit()) {
            self.bridge.notify_osd_visible();
        }

        let gui_open = self.bridge.gui_is_open();

        if mode.is_edit() && !gui_open {
            match self.pinch.on_touch_event(event) {
                Some(PinchEvent::Scale(factor)) => self.on_scale(factor),
                Some(PinchEvent::End) => self.on_scale_end(),
                Some(PinchEvent::Begin) | None => {}
            }

            if self.edit.selected().is_some()
                && event.action == TouchAction::Move
                && !self.pinch.is_in_progress()
            {
                if let Some(pointer) = event.pointers.first() {
                    let (x, y) = viewport.to_virtual(pointer.x, pointer.y);
                    if self.edit.drag_to(x, y, &mut self.custom, metrics.is_tablet) {
                        self.persist_group_and_relayout();
                    }
                }
                return true;
            }
        }

        // edits above may have re-resolved the layout
        let Some(mut resolved) = self.resolved else {
            return false;
        };
        let opts = DispatchOptions {
            mode,
            hit_test: !gui_open,
            pressure_triggers: self.config.pressure_triggers,
        };
        let out = self.session.dispatch(event, &viewport, &mut resolved, opts);
        self.resolved = Some(resolved);

        if out.feedback && !mode.is_edit() {
            if let Some(vibration) = &self.vibration {
                vibration.vibrate();
            }
        }

        // the next move anchors the drag
        if let Some(group) = out.selected {
            if self.edit.selected() != Some(group) {
                self.edit.select(group);
            }
        }

        if let Some(nub) = out.nub {
            self.bridge
                .push_element_rect(ElementId::AnalogNub.index(), nub);
        }

        if out.released && mode.is_edit() {
            self.edit.deselect();
        }

        let state = self.session.controller_state(&resolved);
        self.bridge.push_controller_state(&state);

        if (!mode.is_edit() && state.is_idle()) || gui_open {
            let mouse = self.session.mouse();
            self.bridge.push_mouse_state(&mouse);
        }

        true
    }

    /// Host driven timer. Hides the OSD once the idle timeout passed.
    pub fn tick(&mut self, now: Instant) {
        if self.osd.tick(now) {
            self.bridge.notify_osd_hidden();
        }
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        if self.edit.is_enabled() == enabled {
            return;
        }
        info!(enabled, "edit mode");
        self.edit.set_enabled(enabled);
        if enabled {
            self.osd.cancel();
        }
        self.release_all();
    }

    /// Apply a pinch factor to the selected group.
    pub fn on_scale(&mut self, factor: f32) {
        if self.edit.scale_by(factor, &mut self.custom) {
            self.persist_group_and_relayout();
        }
    }

    pub fn on_scale_end(&mut self) {
        self.edit.on_scale_end();
    }

    /// Shift the selected group by a device-pixel delta.
    pub fn on_drag(&mut self, dx: f32, dy: f32) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let scale = metrics.viewport().scale;
        if self
            .edit
            .drag_by(dx / scale, dy / scale, &mut self.custom, metrics.is_tablet)
        {
            self.persist_group_and_relayout();
        }
    }

    /// Persist and apply a previously saved layout.
    pub fn restore_layout(&mut self, layout: CustomLayout) {
        self.custom = layout;
        if let Err(e) = self.custom.save(&mut self.store) {
            warn!("Failed to persist restored layout: {}", e);
        }
        self.edit.reset_drag();
        self.relayout();
    }

    /// Forget every customization.
    pub fn reset_layout(&mut self) {
        if let Err(e) = CustomLayout::clear(&mut self.store) {
            warn!("Failed to clear persisted layout: {}", e);
        }
        self.custom = CustomLayout::load(&self.store);
        self.edit.reset_drag();
        self.relayout();
    }

    /// View detached: drop every binding and stop the vibration worker.
    pub fn detach(&mut self) {
        self.release_all();
        self.osd.cancel();
        self.edit.set_enabled(false);
        if let Some(mut vibration) = self.vibration.take() {
            vibration.stop();
        }
        debug!("pad detached");
    }

    fn release_all(&mut self) {
        self.session.reset();
        if let Some(resolved) = self.resolved.as_mut() {
            let nub = resolved.reset_nub();
            self.bridge
                .push_element_rect(ElementId::AnalogNub.index(), nub);
        }
        let state = self.controller_state();
        self.bridge.push_controller_state(&state);
    }

    fn persist_group_and_relayout(&mut self) {
        if let Some(group) = self.edit.selected() {
            if let Err(e) = self.custom.save_group(group, &mut self.store) {
                warn!("Failed to persist layout for {}: {}", group.key(), e);
            }
            let t = self.custom.get(group);
            debug!(
                group = group.key(),
                x_shift = t.x_shift,
                y_shift = t.y_shift,
                scale = t.scale,
                "group edited"
            );
        }
        self.relayout();
    }
}
