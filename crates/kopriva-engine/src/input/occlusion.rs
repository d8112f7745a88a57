// input/occlusion.rs
//
// "Is this screen point over blocking UI?" kept separate from any UI toolkit.
// The host reports the screen rectangles of its interactive elements; world
// hit testing consults this before casting a single ray.

use std::collections::HashMap;
use glam::Vec2;
use crate::api::types::UiHandle;

/// Screen-space rectangle in pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let a = Vec2::new(x, y);
        let b = a + Vec2::new(width, height);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Predicate consulted before any world ray cast.
pub trait UiOcclusion {
    fn is_over_blocking_ui(&self, point: Vec2) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Blocker {
    rect: ScreenRect,
    active: bool,
}

/// Screen rectangles of UI elements that swallow presses.
#[derive(Debug, Default)]
pub struct UiBlockers {
    rects: HashMap<UiHandle, Blocker>,
}

impl UiBlockers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or move the rectangle of `handle`. New rectangles start active.
    pub fn set_rect(&mut self, handle: UiHandle, rect: ScreenRect) {
        self.rects
            .entry(handle)
            .and_modify(|b| b.rect = rect)
            .or_insert(Blocker { rect, active: true });
    }

    pub fn set_active(&mut self, handle: UiHandle, active: bool) {
        if let Some(b) = self.rects.get_mut(&handle) {
            b.active = active;
        }
    }

    pub fn remove(&mut self, handle: UiHandle) {
        self.rects.remove(&handle);
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Like [`UiOcclusion::is_over_blocking_ui`], but lets the caller veto
    /// rectangles by handle. `gate` returns `Some(false)` for an element that
    /// currently lets input through (e.g. a panel that is fading out) and
    /// `None` for elements it knows nothing about.
    pub fn blocks_with(&self, point: Vec2, gate: impl Fn(UiHandle) -> Option<bool>) -> bool {
        self.rects.iter().any(|(&handle, b)| {
            b.active && b.rect.contains(point) && gate(handle).unwrap_or(true)
        })
    }
}

impl UiOcclusion for UiBlockers {
    fn is_over_blocking_ui(&self, point: Vec2) -> bool {
        self.blocks_with(point, |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_rect_blocks() {
        let mut ui = UiBlockers::new();
        ui.set_rect(UiHandle(1), ScreenRect::new(0.0, 0.0, 100.0, 50.0));
        assert!(ui.is_over_blocking_ui(Vec2::new(10.0, 10.0)));
        assert!(!ui.is_over_blocking_ui(Vec2::new(10.0, 60.0)));

        ui.set_active(UiHandle(1), false);
        assert!(!ui.is_over_blocking_ui(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn gate_can_veto_a_rect() {
        let mut ui = UiBlockers::new();
        ui.set_rect(UiHandle(1), ScreenRect::new(0.0, 0.0, 100.0, 100.0));
        let p = Vec2::new(50.0, 50.0);
        assert!(!ui.blocks_with(p, |h| (h == UiHandle(1)).then_some(false)));
        assert!(ui.blocks_with(p, |_| None));
    }

    #[test]
    fn negative_size_is_normalized() {
        let rect = ScreenRect::new(100.0, 100.0, -20.0, -20.0);
        assert!(rect.contains(Vec2::new(90.0, 90.0)));
    }
}
