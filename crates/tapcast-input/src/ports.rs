//! Capability traits for the dispatcher's collaborators.
//!
//! The dispatcher depends only on these traits; infrastructure
//! implementations are injected at construction time, and tests substitute
//! recording doubles. All methods take `&self` because the dispatcher owns
//! the only mutable state in this layer.

use tapcast_core::geometry::{Point, Size};
use tapcast_core::protocol::ControlMessage;

use crate::event::{KeyEvent, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent, TextEvent, TouchEvent};

/// Outbound control-message channel.
///
/// Implementations must never block: a full or closed channel reports
/// failure immediately and the message is dropped by the caller.
pub trait ControlChannel: Send + Sync {
    /// Enqueues one message. Returns `false` when the channel is full or
    /// closed; the message is lost in that case.
    fn push(&self, msg: ControlMessage) -> bool;
}

/// Pass-through processor for key and text events the dispatcher does not
/// translate itself.
pub trait KeyProcessor: Send + Sync {
    /// Whether this processor can defer a paste keystroke until a clipboard
    /// acknowledgment with a matching sequence arrives from the device.
    fn async_paste(&self) -> bool;

    /// Forwards a key event.
    ///
    /// `ack_to_wait` is [`SEQUENCE_INVALID`](tapcast_core::SEQUENCE_INVALID)
    /// unless the event must be held back until the clipboard sync with that
    /// sequence is acknowledged.
    fn process_key(&self, event: &KeyEvent, ack_to_wait: u64);

    /// Forwards composed text input.
    fn process_text(&self, event: &TextEvent);
}

/// Pass-through processor for mouse and touch events.
pub trait MouseProcessor: Send + Sync {
    fn process_motion(&self, event: &MouseMotionEvent);
    fn process_button(&self, event: &MouseButtonEvent);
    fn process_wheel(&self, event: &MouseWheelEvent);
    fn process_touch(&self, event: &TouchEvent);
}

/// The rendering viewport: owns coordinate mapping and window policy.
pub trait Viewport: Send + Sync {
    /// Size of the currently streamed device frame.
    fn frame_size(&self) -> Size;

    /// Converts window coordinates to device-frame coordinates.
    fn window_to_frame(&self, x: i32, y: i32) -> Point;

    fn rotate_client_left(&self);
    fn rotate_client_right(&self);
    fn toggle_fullscreen(&self);
    fn resize_to_fit(&self);
    fn resize_to_pixel_perfect(&self);
    fn toggle_fps_counter(&self);

    /// Captures or releases the host pointer (relative-motion mode).
    fn set_pointer_capture(&self, captured: bool);
}

/// Read access to the host clipboard.
pub trait HostClipboard: Send + Sync {
    /// Current clipboard text; `None` when unavailable or empty.
    fn text(&self) -> Option<String>;
}
