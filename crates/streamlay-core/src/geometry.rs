//! Overlay placement and multi-display geometry.
//!
//! All values are logical pixels with a top-left origin, the same space Tauri
//! uses for window positions.

use serde::{Deserialize, Serialize};

use crate::overlay::OverlayConfig;

/// Used when the toolkit reports no monitors at all.
pub const FALLBACK_SCREEN: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1920.0,
    height: 1080.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Snapshot of the attached displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayLayout {
    pub primary_work_area: Option<Rect>,
    pub monitors: Vec<Rect>,
}

impl DisplayLayout {
    pub fn work_area(&self) -> Rect {
        self.primary_work_area
            .or_else(|| self.monitors.first().copied())
            .unwrap_or(FALLBACK_SCREEN)
    }

    pub fn virtual_bounds(&self) -> Rect {
        virtual_bounds(&self.monitors).unwrap_or_else(|| self.work_area())
    }
}

/// Bounding rectangle spanning every given rectangle.
pub fn virtual_bounds(rects: &[Rect]) -> Option<Rect> {
    let (first, rest) = rects.split_first()?;

    let (mut left, mut top, mut right, mut bottom) =
        (first.x, first.y, first.right(), first.bottom());

    for rect in rest {
        left = left.min(rect.x);
        top = top.min(rect.y);
        right = right.max(rect.right());
        bottom = bottom.max(rect.bottom());
    }

    Some(Rect::new(left, top, right - left, bottom - top))
}

/// Top-left corner for a window parked left of the virtual desktop.
pub fn offscreen_origin(bounds: &Rect, window_width: f64, margin: f64) -> (f64, f64) {
    (bounds.x - window_width - margin, bounds.y)
}

/// Where a freshly created overlay goes: its own geometry when it carries a
/// usable size, otherwise the primary work area anchored at the origin.
pub fn placement(config: &OverlayConfig, work_area: &Rect) -> Rect {
    match config.custom_size() {
        Some((width, height)) => Rect::new(
            config.x.unwrap_or(0.0),
            config.y.unwrap_or(0.0),
            width,
            height,
        ),
        None => Rect::new(0.0, 0.0, work_area.width, work_area.height),
    }
}
