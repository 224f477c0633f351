use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Full browser window extent, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowExtent {
    pub width: f32,
    pub height: f32,
}

impl WindowExtent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Screen space the UI keeps for itself around the swimming area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reservations {
    /// Gap on the left edge.
    pub left_margin: f32,
    /// Title strip at the top.
    pub top_reserve: f32,
    /// Info panel on the right.
    pub info_panel_width: f32,
    /// Gap below the swimming area, used for motion bounds.
    pub bottom_margin: f32,
    /// Smallest span (in either axis) the motion bounds may shrink to.
    pub min_span: f32,
    /// Gap below the drawn boundary frame.
    pub boundary_bottom: f32,
    /// Smallest width/height of the drawn boundary frame.
    pub boundary_floor: f32,
    /// Top limit while a creature is dragged by hand.
    pub drag_top: f32,
}

impl Default for Reservations {
    fn default() -> Self {
        Self {
            left_margin: 20.0,
            top_reserve: 120.0,
            info_panel_width: 370.0,
            bottom_margin: 100.0,
            min_span: 50.0,
            boundary_bottom: 120.0,
            boundary_floor: 100.0,
            drag_top: 100.0,
        }
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// The region a creature's origin (top-left corner) may occupy.
/// Always satisfies `max.x > min.x` and `max.y > min.y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Clamp a point into the bounds.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.min(self.max.x).max(self.min.x),
            p.y.min(self.max.y).max(self.min.y),
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn center_x(&self) -> f32 {
        self.min.x + (self.max.x - self.min.x) / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        self.min.y + (self.max.y - self.min.y) / 2.0
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// The swimming area: window extent minus UI reservations.
/// Re-queried by the shell on resize; bounds are derived per creature size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    window: WindowExtent,
    reservations: Reservations,
}

impl Viewport {
    pub fn new(window: WindowExtent, reservations: Reservations) -> Self {
        Self { window, reservations }
    }

    pub fn window(&self) -> WindowExtent {
        self.window
    }

    pub fn reservations(&self) -> &Reservations {
        &self.reservations
    }

    pub fn resize(&mut self, window: WindowExtent) {
        self.window = window;
    }

    /// Motion bounds for a creature of the given size.
    ///
    /// The far edges subtract the creature's own size so it stays fully visible;
    /// `render_offset_y` accounts for sprites drawn below their origin.
    /// Both spans are floored at `min_span`.
    pub fn bounds_for(&self, size: Vec2, render_offset_y: f32) -> Bounds {
        let r = &self.reservations;
        let min_x = r.left_margin;
        let min_y = r.top_reserve;
        let max_x = (self.window.width - r.info_panel_width - size.x).max(min_x + r.min_span);
        let max_y = (self.window.height - r.bottom_margin - size.y - render_offset_y)
            .max(min_y + r.min_span);
        Bounds::new(min_x, min_y, max_x, max_y)
    }

    /// The frame drawn around the swimming area.
    pub fn boundary_rect(&self) -> Rect {
        let r = &self.reservations;
        let x = r.left_margin;
        let y = r.top_reserve;
        let right = self.window.width - r.info_panel_width;
        let bottom = self.window.height - r.boundary_bottom;
        Rect {
            x,
            y,
            w: (right - x).max(r.boundary_floor),
            h: (bottom - y).max(r.boundary_floor),
        }
    }

    /// Clamp a dragged creature's origin into the full window.
    ///
    /// Looser than [`Viewport::bounds_for`]: a held creature may cover the
    /// info panel strip. The lower bound wins when the window is smaller than
    /// the creature.
    pub fn clamp_to_window(&self, pos: Vec2, size: Vec2) -> Vec2 {
        let top = self.reservations.drag_top;
        Vec2::new(
            pos.x.min(self.window.width - size.x).max(0.0),
            pos.y.min(self.window.height - size.y).max(top),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(WindowExtent::new(1280.0, 800.0), Reservations::default())
    }
}
