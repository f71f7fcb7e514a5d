//! Hover highlight state

use crate::scene::{Color, NeoKey};

/// Which object, if any, is highlighted under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    /// Nothing hovered; every body shows its original color
    #[default]
    Idle,
    /// One object carries the highlight color
    Hovering {
        /// The hovered object
        object: NeoKey,
        /// Its color before highlighting
        original_color: Color,
    },
}

impl HighlightState {
    /// The hovered object
    pub fn hovered(&self) -> Option<NeoKey> {
        match self {
            Self::Idle => None,
            Self::Hovering { object, .. } => Some(*object),
        }
    }
}

/// Result of one hover resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    /// Nothing changed
    Unchanged,
    /// The pointer moved onto an object from empty space
    Entered(NeoKey),
    /// The pointer moved from one object to another
    Changed {
        /// Previously hovered
        from: NeoKey,
        /// Now hovered
        to: NeoKey,
    },
    /// The pointer moved off an object into empty space
    Left(NeoKey),
}
