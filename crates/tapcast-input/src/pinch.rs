//! Mirrored-pointer pinch emulation.
//!
//! While Ctrl is held and the primary button goes down, a second synthetic
//! finger is placed at the point reflection of the mouse through the frame
//! center, so dragging the mouse pinches or rotates around the center.

use tapcast_core::pointer::VirtualPointer;
use tapcast_core::protocol::messages::TouchAction;

use crate::event::{MouseButtonEvent, MouseMotionEvent};
use crate::pointer::PointerEngine;
use crate::ports::{ControlChannel, Viewport};

/// State of the mirrored pinch pointer.
///
/// The down flag is the sole gate: DOWN requires the modifier at press
/// time, but UP fires on any primary-button release while the flag is set,
/// so releasing the modifier first can never leave the finger stuck.
#[derive(Debug, Default)]
pub struct MirrorPointer {
    down: bool,
}

impl MirrorPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Handles a primary-button transition in normal mode.
    pub fn handle_button(
        &mut self,
        engine: &PointerEngine,
        channel: &dyn ControlChannel,
        viewport: &dyn Viewport,
        event: &MouseButtonEvent,
    ) {
        let activate = event.down && !self.down && event.mods.ctrl();
        let deactivate = !event.down && self.down;
        if !activate && !deactivate {
            return;
        }

        let frame_size = viewport.frame_size();
        let mirrored = viewport
            .window_to_frame(event.x, event.y)
            .mirrored_in(frame_size);
        let action = if event.down {
            TouchAction::Down
        } else {
            TouchAction::Up
        };

        // Flag follows the button only when the message actually went out,
        // keeping the remote contact and local state in step.
        if engine.emit(channel, frame_size, VirtualPointer::Pinch, action, mirrored) {
            self.down = event.down;
        }
    }

    /// Emits a mirrored MOVE tracking the mouse while the pinch is active.
    pub fn handle_motion(
        &self,
        engine: &PointerEngine,
        channel: &dyn ControlChannel,
        viewport: &dyn Viewport,
        event: &MouseMotionEvent,
    ) {
        if !self.down {
            return;
        }
        let frame_size = viewport.frame_size();
        let mirrored = viewport
            .window_to_frame(event.x, event.y)
            .mirrored_in(frame_size);
        engine.emit(
            channel,
            frame_size,
            VirtualPointer::Pinch,
            TouchAction::Move,
            mirrored,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventSource;
    use std::sync::Mutex;
    use tapcast_core::geometry::{Point, Size};
    use tapcast_core::pointer::PINCH_POINTER_ID;
    use tapcast_core::protocol::messages::ControlMessage;
    use tapcast_core::{Modifiers, MouseButton};

    struct RecordingChannel {
        messages: Mutex<Vec<ControlMessage>>,
        accept: bool,
    }

    impl RecordingChannel {
        fn new(accept: bool) -> Self {
            Self {
                messages: Mutex::new(Vec::new()),
                accept,
            }
        }

        fn pinch_events(&self) -> Vec<(TouchAction, Point)> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .filter_map(|msg| match msg {
                    ControlMessage::InjectTouch {
                        pointer_id,
                        action,
                        position,
                        ..
                    } if *pointer_id == PINCH_POINTER_ID => Some((*action, position.point)),
                    _ => None,
                })
                .collect()
        }
    }

    impl ControlChannel for RecordingChannel {
        fn push(&self, msg: ControlMessage) -> bool {
            if !self.accept {
                return false;
            }
            self.messages.lock().unwrap().push(msg);
            true
        }
    }

    /// Window coordinates map 1:1 to a 1920x1080 frame.
    struct IdentityViewport;

    impl Viewport for IdentityViewport {
        fn frame_size(&self) -> Size {
            Size::new(1920, 1080)
        }

        fn window_to_frame(&self, x: i32, y: i32) -> Point {
            Point::new(x, y)
        }

        fn rotate_client_left(&self) {}
        fn rotate_client_right(&self) {}
        fn toggle_fullscreen(&self) {}
        fn resize_to_fit(&self) {}
        fn resize_to_pixel_perfect(&self) {}
        fn toggle_fps_counter(&self) {}
        fn set_pointer_capture(&self, _captured: bool) {}
    }

    fn button(down: bool, mods: Modifiers, x: i32, y: i32) -> MouseButtonEvent {
        MouseButtonEvent {
            button: MouseButton::Left,
            down,
            x,
            y,
            clicks: 1,
            mods,
            source: EventSource::Mouse,
        }
    }

    const CTRL: Modifiers = Modifiers(Modifiers::LCTRL);

    #[test]
    fn test_ctrl_click_places_mirrored_down() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let engine = PointerEngine::new();
        let mut mirror = MirrorPointer::new();

        // Act: primary pointer at (100, 50) with Ctrl held.
        mirror.handle_button(&engine, &channel, &IdentityViewport, &button(true, CTRL, 100, 50));

        // Assert
        assert_eq!(
            channel.pinch_events(),
            vec![(TouchAction::Down, Point::new(1820, 1030))]
        );
        assert!(mirror.is_down());
    }

    #[test]
    fn test_click_without_ctrl_does_nothing() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let engine = PointerEngine::new();
        let mut mirror = MirrorPointer::new();

        // Act
        mirror.handle_button(
            &engine,
            &channel,
            &IdentityViewport,
            &button(true, Modifiers::empty(), 100, 50),
        );

        // Assert
        assert!(channel.pinch_events().is_empty());
        assert!(!mirror.is_down());
    }

    #[test]
    fn test_release_lifts_even_after_modifier_released() {
        // Arrange: pinch activated with Ctrl, then Ctrl released before the button.
        let channel = RecordingChannel::new(true);
        let engine = PointerEngine::new();
        let mut mirror = MirrorPointer::new();
        mirror.handle_button(&engine, &channel, &IdentityViewport, &button(true, CTRL, 100, 50));

        // Act
        mirror.handle_button(
            &engine,
            &channel,
            &IdentityViewport,
            &button(false, Modifiers::empty(), 100, 50),
        );

        // Assert: exactly one UP, at the mirrored position, flag cleared.
        let events = channel.pinch_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], (TouchAction::Up, Point::new(1820, 1030)));
        assert!(!mirror.is_down());
    }

    #[test]
    fn test_motion_tracks_mirrored_position_while_down() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let engine = PointerEngine::new();
        let mut mirror = MirrorPointer::new();
        mirror.handle_button(&engine, &channel, &IdentityViewport, &button(true, CTRL, 960, 540));

        // Act
        mirror.handle_motion(
            &engine,
            &channel,
            &IdentityViewport,
            &MouseMotionEvent {
                x: 1000,
                y: 500,
                xrel: 40,
                yrel: -40,
                buttons: MouseButton::Left.mask(),
                source: EventSource::Mouse,
            },
        );

        // Assert
        assert_eq!(
            channel.pinch_events()[1],
            (TouchAction::Move, Point::new(920, 580))
        );
    }

    #[test]
    fn test_flag_unchanged_when_channel_rejects() {
        // Arrange
        let channel = RecordingChannel::new(false);
        let engine = PointerEngine::new();
        let mut mirror = MirrorPointer::new();

        // Act
        mirror.handle_button(&engine, &channel, &IdentityViewport, &button(true, CTRL, 100, 50));

        // Assert: the DOWN never went out, so the flag must stay clear.
        assert!(!mirror.is_down());
    }
}
