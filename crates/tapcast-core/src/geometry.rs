//! Geometry primitives shared by the host dispatcher and the wire protocol.
//!
//! All touch positions on the wire are expressed relative to the device
//! *frame* (the video frame the host renders), not the host window.  The
//! viewport collaborator owns the window-to-frame conversion; this module
//! only provides the value types.

use serde::{Deserialize, Serialize};

/// A point in device-frame coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translates the point by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Point-reflects `self` through the center of a frame of the given
    /// size: `(w - x, h - y)`.
    ///
    /// Used to derive the mirrored pinch pointer from the primary pointer.
    pub fn mirrored_in(self, size: Size) -> Self {
        Self {
            x: i32::from(size.width) - self.x,
            y: i32::from(size.height) - self.y,
        }
    }
}

/// The size of the device frame in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A point qualified by the frame size it was computed against.
///
/// The device needs the frame size to rescale the point if its own screen
/// resolution differs from the streamed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub screen_size: Size,
    pub point: Point,
}
