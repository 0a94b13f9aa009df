//! Host input events as delivered to the dispatcher.
//!
//! These mirror what a windowing layer reports, already translated into the
//! crate's own key/button types so the dispatcher stays independent of any
//! particular event library.

use tapcast_core::{Keycode, Modifiers, MouseButton};

/// Origin of a mouse-shaped event.
///
/// Windowing layers synthesize mouse events from touch input; those must be
/// dropped by the dispatcher because the real touch event is forwarded
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    Mouse,
    SyntheticTouch,
}

/// Phase of a host touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Up,
    Motion,
}

#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub keycode: Keycode,
    pub mods: Modifiers,
    pub down: bool,
    /// True when generated by host key autorepeat rather than a new press.
    pub repeat: bool,
}

/// Composed text input (IME or plain typing).
#[derive(Debug, Clone)]
pub struct TextEvent {
    pub text: String,
    /// Modifier state at the time the text was composed.
    pub mods: Modifiers,
}

#[derive(Debug, Clone)]
pub struct MouseMotionEvent {
    /// Absolute position in window coordinates.
    pub x: i32,
    pub y: i32,
    /// Relative motion since the previous event.
    pub xrel: i32,
    pub yrel: i32,
    /// Currently-pressed buttons, as [`MouseButton::mask`] bits.
    pub buttons: u32,
    pub source: EventSource,
}

#[derive(Debug, Clone)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub down: bool,
    /// Position in window coordinates.
    pub x: i32,
    pub y: i32,
    /// Consecutive-click count (1 for single click, 2 for double click).
    pub clicks: u8,
    pub mods: Modifiers,
    pub source: EventSource,
}

#[derive(Debug, Clone)]
pub struct MouseWheelEvent {
    pub dx: i32,
    pub dy: i32,
    /// Position in window coordinates.
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Position in window coordinates.
    pub x: i32,
    pub y: i32,
    /// Host-assigned finger id.
    pub finger_id: u64,
}

/// One host input event, tagged by kind.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Text(TextEvent),
    MouseMotion(MouseMotionEvent),
    MouseButton(MouseButtonEvent),
    MouseWheel(MouseWheelEvent),
    Touch(TouchEvent),
}
