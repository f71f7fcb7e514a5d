//! Pointer state for picking and orbiting

use crate::foundation::math::Vec2;
use crate::input::SurfaceRect;

/// Pointer travel in pixels beyond which a press becomes a drag
pub const DRAG_THRESHOLD: f64 = 5.0;

/// How a primary-button press ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRelease {
    /// Pressed and released without dragging
    Click,
    /// The press turned into a drag
    DragEnd,
    /// There was no matching press
    Unpaired,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    start: (f64, f64),
    dragging: bool,
}

/// Tracked pointer position and press state
#[derive(Debug, Clone)]
pub struct PointerState {
    surface: SurfaceRect,
    position: Option<(f64, f64)>,
    press: Option<Press>,
}

impl PointerState {
    /// Pointer over `surface`, not yet seen
    pub fn new(surface: SurfaceRect) -> Self {
        Self {
            surface,
            position: None,
            press: None,
        }
    }

    /// Surface the pointer is normalized against
    pub fn surface(&self) -> SurfaceRect {
        self.surface
    }

    /// Update the surface rectangle after a resize or move
    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = surface;
    }

    /// Last known client position
    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    /// Pointer position in NDC, if the pointer is over the surface
    pub fn ndc(&self) -> Option<Vec2> {
        let (x, y) = self.position?;
        self.surface.to_ndc(x, y)
    }

    /// Track a move; returns the drag delta in pixels while dragging
    pub fn move_to(&mut self, x: f64, y: f64) -> Option<(f32, f32)> {
        let previous = self.position.replace((x, y));
        let press = self.press.as_mut()?;

        if !press.dragging {
            let (start_x, start_y) = press.start;
            let travel = ((x - start_x).powi(2) + (y - start_y).powi(2)).sqrt();
            if travel <= DRAG_THRESHOLD {
                return None;
            }
            press.dragging = true;
            // The first drag step covers the whole travel so far
            return Some(((x - start_x) as f32, (y - start_y) as f32));
        }

        let (last_x, last_y) = previous.unwrap_or(press.start);
        Some(((x - last_x) as f32, (y - last_y) as f32))
    }

    /// Primary button went down
    pub fn press(&mut self, x: f64, y: f64) {
        self.position = Some((x, y));
        self.press = Some(Press {
            start: (x, y),
            dragging: false,
        });
    }

    /// Primary button went up
    pub fn release(&mut self, x: f64, y: f64) -> PointerRelease {
        let drag = self.move_to(x, y);
        match self.press.take() {
            Some(press) if press.dragging || drag.is_some() => PointerRelease::DragEnd,
            Some(_) => PointerRelease::Click,
            None => PointerRelease::Unpaired,
        }
    }

    /// Pointer left the surface; any press is abandoned
    pub fn leave(&mut self) {
        self.position = None;
        self.press = None;
    }

    /// Whether a press has turned into a drag
    pub fn is_dragging(&self) -> bool {
        self.press.map_or(false, |press| press.dragging)
    }
}
