//! Two-finger pinch recognizer.
//!
//! Span is twice the mean distance of the active pointers from their centroid, which
//! for two fingers is simply their distance. The reference span is re-taken whenever
//! the pointer set changes so adding a finger never produces a jump.

use crate::touch::{TouchAction, TouchEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchEvent {
    Begin,
    /// Incremental factor since the previous event.
    Scale(f32),
    End,
}

#[derive(Debug, Clone)]
pub struct PinchDetector {
    min_span: f32,
    in_progress: bool,
    prev_span: f32,
}

impl PinchDetector {
    pub fn new(min_span: f32) -> Self {
        Self {
            min_span,
            in_progress: false,
            prev_span: 0.0,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn on_touch_event(&mut self, event: &TouchEvent) -> Option<PinchEvent> {
        let points: Vec<(f32, f32)> = event.active_pointers().map(|p| (p.x, p.y)).collect();

        if points.len() < 2 {
            return self.end();
        }

        let span = span_of(&points);
        if !self.in_progress {
            if span >= self.min_span {
                self.in_progress = true;
                self.prev_span = span;
                return Some(PinchEvent::Begin);
            }
            return None;
        }

        match event.action {
            TouchAction::PointerDown | TouchAction::PointerUp => {
                self.prev_span = span;
                None
            }
            _ => {
                if self.prev_span <= 0.0 || span <= 0.0 {
                    return None;
                }
                let factor = span / self.prev_span;
                self.prev_span = span;
                Some(PinchEvent::Scale(factor))
            }
        }
    }

    fn end(&mut self) -> Option<PinchEvent> {
        if self.in_progress {
            self.in_progress = false;
            self.prev_span = 0.0;
            Some(PinchEvent::End)
        } else {
            None
        }
    }
}

fn span_of(points: &[(f32, f32)]) -> f32 {
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0f32, 0.0f32), |(ax, ay), &(x, y)| (ax + x, ay + y));
    let (fx, fy) = (sx / n, sy / n);
    let mean = points
        .iter()
        .map(|&(x, y)| ((x - fx).powi(2) + (y - fy).powi(2)).sqrt())
        .sum::<f32>()
        / n;
    mean * 2.0
}
