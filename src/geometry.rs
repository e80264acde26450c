//! Geometry resolver: custom layout + screen metrics -> resolved element rectangles.
//!
//! Resolved rectangles live in "dc space": virtual units where the screen height is
//! always 480 and the width grows with the aspect ratio, centered on the 640-wide
//! virtual area. Touch coordinates are mapped into the same space with [`Viewport`].

use crate::layout::{CustomLayout, ELEMENT_COUNT, ELEMENTS, ElementId};
use crate::protocol::{
    AXIS_RESOLUTION, EDGE_MARGIN, PHONE_MAGIC, TABLET_MAGIC, VIRTUAL_HEIGHT, VIRTUAL_WIDTH,
};
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Left/top edges are exclusive, right/bottom inclusive.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x && x <= self.x + self.w && y > self.y && y <= self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn clamp_point(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(self.x, self.x + self.w), y.clamp(self.y, self.y + self.h))
    }

    /// Same size, moved so its center is at `(cx, cy)`.
    pub fn centered_at(&self, cx: f32, cy: f32) -> Rect {
        Rect::new(cx - self.w / 2.0, cy - self.h / 2.0, self.w, self.h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
    pub density: f32,
    pub is_tablet: bool,
}

impl ScreenMetrics {
    pub fn new(width: f32, height: f32, density: f32, is_tablet: bool) -> Self {
        Self {
            width,
            height,
            density,
            is_tablet,
        }
    }

    /// Control scale, chosen so controls keep a similar physical size across densities.
    pub fn control_scale(&self) -> f32 {
        let magic = if self.is_tablet { TABLET_MAGIC } else { PHONE_MAGIC };
        VIRTUAL_HEIGHT / self.height * self.density * magic
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

/// Mapping between device pixels and dc space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Device pixels per dc unit.
    pub scale: f32,
    /// Horizontal offset of the virtual area, in device pixels.
    pub tx: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let scale = height / VIRTUAL_HEIGHT;
        Self {
            scale,
            tx: (width - VIRTUAL_WIDTH * scale) / 2.0,
        }
    }

    #[inline]
    pub fn to_virtual(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.tx) / self.scale, y / self.scale)
    }

    #[inline]
    pub fn to_device(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.tx, y * self.scale)
    }

    pub fn rect_to_device(&self, rect: &Rect) -> Rect {
        let (x, y) = self.to_device(rect.x, rect.y);
        Rect::new(x, y, rect.w * self.scale, rect.h * self.scale)
    }
}

#[inline]
fn vbase(p: f32, scl: f32) -> f32 {
    (p * scl).trunc()
}

#[inline]
fn vbase_from(p: f32, m: f32, scl: f32) -> f32 {
    (m - (m - p) * scl).trunc()
}

/// Resolved rectangles for every element, plus the live analog nub position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLayout {
    rects: [Rect; ELEMENT_COUNT],
}

impl ResolvedLayout {
    pub fn rect(&self, id: ElementId) -> Rect {
        self.rects[id.index()]
    }

    pub fn rects(&self) -> &[Rect; ELEMENT_COUNT] {
        &self.rects
    }

    /// Rectangles that have artwork, with their bridge index.
    pub fn drawn(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        ELEMENTS
            .iter()
            .filter(|spec| spec.is_drawn())
            .map(|spec| (spec.id.index(), self.rects[spec.id.index()]))
    }

    /// The whole table as `[x, y, w, h, x, y, ...]`.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.rects)
    }

    /// First element (in declaration order) containing the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ElementId> {
        ELEMENTS
            .iter()
            .find(|spec| self.rects[spec.id.index()].contains(x, y))
            .map(|spec| spec.id)
    }

    /// Put the nub back at the ring center.
    pub fn reset_nub(&mut self) -> Rect {
        let (cx, cy) = self.rect(ElementId::AnalogRing).center();
        self.place_nub(cx, cy)
    }

    /// Center the nub on `(x, y)`, clamped to the ring bounds.
    pub fn move_nub(&mut self, x: f32, y: f32) -> Rect {
        let (cx, cy) = self.rect(ElementId::AnalogRing).clamp_point(x, y);
        self.place_nub(cx, cy)
    }

    fn place_nub(&mut self, cx: f32, cy: f32) -> Rect {
        let nub = self.rect(ElementId::AnalogNub).centered_at(cx, cy);
        self.rects[ElementId::AnalogNub.index()] = nub;
        nub
    }

    /// Stick position, truncated toward zero; about +-127 at the ring edge.
    pub fn analog_axes(&self) -> (i8, i8) {
        let ring = self.rect(ElementId::AnalogRing);
        let nub = self.rect(ElementId::AnalogNub);
        let axis = |nub_pos: f32, nub_len: f32, ring_pos: f32, ring_len: f32| -> i8 {
            if ring_len <= 0.0 {
                return 0;
            }
            let v = ((nub_pos + nub_len / 2.0) - ring_pos - ring_len / 2.0) * AXIS_RESOLUTION
                / ring_len;
            (v as i32).clamp(i8::MIN as i32, i8::MAX as i32) as i8
        };
        (
            axis(nub.x, nub.w, ring.x, ring.w),
            axis(nub.y, nub.h, ring.y, ring.h),
        )
    }
}

/// Resolve every element for the given screen.
///
/// Returns `None` when the custom layout has not been loaded yet; the caller skips the
/// pass. Left-side elements anchor to the left screen edge, right-side ones to the
/// right edge, centered groups to the center. The nub starts at the ring center.
pub fn resolve(metrics: &ScreenMetrics, custom: Option<&CustomLayout>) -> Option<ResolvedLayout> {
    let custom = custom?;

    let scl = metrics.control_scale();
    let scl_dc = metrics.height / VIRTUAL_HEIGHT;
    let tx = (metrics.width - VIRTUAL_WIDTH * scl_dc) / 2.0 / scl_dc;

    let a_x = -tx + EDGE_MARGIN * scl;
    let a_y = -EDGE_MARGIN * scl;

    let mut rects = [Rect::default(); ELEMENT_COUNT];
    for spec in &ELEMENTS {
        let t = custom.get(spec.group);
        let (x, y, w, h) = spec.customized_rect(&t);

        let rx = if spec.group.is_centered() {
            vbase_from(x + w / 2.0, VIRTUAL_WIDTH / 2.0, scl) - vbase(w, scl) / 2.0
        } else if x - t.x_shift < VIRTUAL_WIDTH / 2.0 {
            a_x + vbase(x, scl)
        } else {
            -a_x + vbase_from(x, VIRTUAL_WIDTH, scl)
        };
        let ry = a_y + vbase_from(y, VIRTUAL_HEIGHT, scl);

        rects[spec.id.index()] = Rect::new(rx, ry, vbase(w, scl), vbase(h, scl));
    }

    let mut resolved = ResolvedLayout { rects };
    resolved.reset_nub();
    Some(resolved)
}
