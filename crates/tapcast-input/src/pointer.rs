//! Virtual pointer engine: turns slot press/release transitions into touch
//! messages.
//!
//! The engine owns one pressed boolean per slot and nothing else; positions
//! are supplied by the caller on every transition. Pointer ids stay stable
//! across a contact's whole DOWN/MOVE/UP lifecycle because they come from
//! [`VirtualPointer::wire_id`].

use tracing::{debug, warn};

use tapcast_core::geometry::{Point, Position, Size};
use tapcast_core::pointer::VirtualPointer;
use tapcast_core::protocol::messages::{ControlMessage, TouchAction};

use crate::layout::ButtonLayout;
use crate::ports::ControlChannel;

#[derive(Debug, Default)]
pub struct PointerEngine {
    pressed: [bool; VirtualPointer::COUNT],
}

impl PointerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, pointer: VirtualPointer) -> bool {
        self.pressed[pointer.index()]
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }

    /// Builds and enqueues one touch message for a slot.
    ///
    /// Pressure is 1.0 for DOWN and MOVE, 0.0 for UP; the button mask is
    /// always empty for synthetic fingers. Returns the channel result; a
    /// failed enqueue is logged and dropped, never retried.
    pub fn emit(
        &self,
        channel: &dyn ControlChannel,
        frame_size: Size,
        pointer: VirtualPointer,
        action: TouchAction,
        point: Point,
    ) -> bool {
        let msg = ControlMessage::InjectTouch {
            action,
            pointer_id: pointer.wire_id(),
            position: Position {
                screen_size: frame_size,
                point,
            },
            pressure: if action == TouchAction::Up { 0.0 } else { 1.0 },
            buttons: 0,
        };

        let ok = channel.push(msg);
        if !ok {
            warn!(?pointer, ?action, "could not request touch injection");
        }
        ok
    }

    /// Presses a slot: emits DOWN and marks it pressed.
    ///
    /// A press of an already-pressed slot is a no-op, which also swallows
    /// host key autorepeat for held emulated buttons.
    pub fn press(
        &mut self,
        channel: &dyn ControlChannel,
        frame_size: Size,
        pointer: VirtualPointer,
        point: Point,
    ) {
        if self.pressed[pointer.index()] {
            return;
        }
        debug!(?pointer, ?point, "slot down");
        self.emit(channel, frame_size, pointer, TouchAction::Down, point);
        self.pressed[pointer.index()] = true;
    }

    /// Releases a slot: emits UP and clears the pressed mark.
    ///
    /// A release of a slot that is not pressed is a no-op.
    pub fn release(
        &mut self,
        channel: &dyn ControlChannel,
        frame_size: Size,
        pointer: VirtualPointer,
        point: Point,
    ) {
        if !self.pressed[pointer.index()] {
            return;
        }
        debug!(?pointer, ?point, "slot up");
        self.emit(channel, frame_size, pointer, TouchAction::Up, point);
        self.pressed[pointer.index()] = false;
    }

    /// Releases every pressed slot at its layout position.
    ///
    /// Run when emulation mode is exited so no synthetic finger is ever
    /// left down across a mode change.
    pub fn release_all(
        &mut self,
        channel: &dyn ControlChannel,
        frame_size: Size,
        layout: &ButtonLayout,
    ) {
        for pointer in VirtualPointer::ALL {
            if !self.pressed[pointer.index()] {
                continue;
            }
            if let Some(point) = layout.position_of(pointer) {
                self.release(channel, frame_size, pointer, point);
            } else {
                self.pressed[pointer.index()] = false;
            }
        }
    }
}
