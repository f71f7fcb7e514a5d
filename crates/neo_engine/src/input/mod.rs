//! Input handling
//!
//! Host events arrive as [`HostEvent`] values, usually over a channel from
//! whichever thread owns the window. Pointer positions are client pixels;
//! [`SurfaceRect`] maps them into normalized device coordinates.

pub mod picking;

pub use picking::{PointerRelease, PointerState, DRAG_THRESHOLD};

use std::sync::Arc;

use crate::data::{DateSelection, NeoFeed};
use crate::foundation::math::Vec2;

/// Bounding rectangle of the render surface in client pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl SurfaceRect {
    /// Rectangle at the client origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// Width over height, or `None` for an empty rectangle
    pub fn aspect_ratio(&self) -> Option<f32> {
        (self.width > 0.0 && self.height > 0.0).then(|| (self.width / self.height) as f32)
    }

    /// Whole-pixel extent for the backend surface
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round().max(0.0) as u32, self.height.round().max(0.0) as u32)
    }

    /// Whether a client position lies on the rectangle, edges included
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.left..=self.left + self.width).contains(&x) && (self.top..=self.top + self.height).contains(&y)
    }

    /// Normalize a client position to NDC
    ///
    /// X runs -1 (left edge) to +1 (right edge), Y runs +1 (top edge) to -1
    /// (bottom edge). Returns `None` for an empty rectangle and for positions
    /// outside it.
    pub fn to_ndc(&self, x: f64, y: f64) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 || !self.contains(x, y) {
            return None;
        }
        let ndc_x = (x - self.left) / self.width * 2.0 - 1.0;
        let ndc_y = -((y - self.top) / self.height * 2.0 - 1.0);
        Some(Vec2::new(ndc_x as f32, ndc_y as f32))
    }
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button or touch
    Primary,
    /// Right button
    Secondary,
    /// Wheel button
    Middle,
}

/// Events delivered by the host container
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Pointer moved to a client position
    PointerMoved {
        /// Client X in pixels
        x: f64,
        /// Client Y in pixels
        y: f64,
    },
    /// Pointer button went down
    PointerPressed {
        /// Client X in pixels
        x: f64,
        /// Client Y in pixels
        y: f64,
        /// Button pressed
        button: MouseButton,
    },
    /// Pointer button went up
    PointerReleased {
        /// Client X in pixels
        x: f64,
        /// Client Y in pixels
        y: f64,
        /// Button released
        button: MouseButton,
    },
    /// Wheel scrolled; positive moves away from the scene
    Wheel {
        /// Scroll amount in notches
        delta: f32,
    },
    /// Pointer left the render surface
    PointerLeft,
    /// Render surface moved or changed size
    Resized(SurfaceRect),
    /// Replace the displayed dataset
    LoadDataset {
        /// Feed to display
        feed: Arc<NeoFeed>,
        /// Which date of the feed becomes the scene
        selection: DateSelection,
    },
    /// Tear the visualizer down and stop the render loop
    Teardown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_surface_center_is_ndc_origin() {
        let rect = SurfaceRect {
            left: 100.0,
            top: 50.0,
            width: 1280.0,
            height: 500.0,
        };
        assert_relative_eq!(rect.to_ndc(740.0, 300.0).unwrap(), Vec2::zeros());
    }

    #[test]
    fn test_ndc_y_is_inverted() {
        let rect = SurfaceRect::from_size(200, 100);

        assert_relative_eq!(rect.to_ndc(0.0, 0.0).unwrap(), Vec2::new(-1.0, 1.0));
        assert_relative_eq!(rect.to_ndc(200.0, 100.0).unwrap(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_positions_off_the_surface_have_no_ndc() {
        let rect = SurfaceRect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        };

        assert!(SurfaceRect::from_size(1280, 500).to_ndc(-640.0, 250.0).is_none());
        assert!(rect.to_ndc(99.0, 100.0).is_none());
        assert!(rect.to_ndc(200.0, 151.0).is_none());
        assert_relative_eq!(rect.to_ndc(300.0, 50.0).unwrap(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_empty_surface_has_no_ndc() {
        let rect = SurfaceRect::from_size(0, 100);
        assert!(rect.to_ndc(0.0, 0.0).is_none());
        assert!(rect.aspect_ratio().is_none());
    }
}
