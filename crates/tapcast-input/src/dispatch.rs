//! Top-level input dispatcher.
//!
//! Receives every host input event, decides whether it produces a remote
//! action, and routes it: shortcut-modifier chords go to the fixed shortcut
//! table, gamepad-emulation mode drives the virtual pointer engine, and
//! everything else is forwarded to the pass-through processors.
//!
//! All collaborators are injected as trait objects at construction; the
//! dispatcher owns the only mutable state and is driven from a single
//! thread, one event at a time.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use tapcast_core::geometry::Point;
use tapcast_core::pointer::VirtualPointer;
use tapcast_core::protocol::messages::{
    ControlMessage, CopyKey, DeviceKeycode, KeyAction, PowerMode, TouchAction,
};
use tapcast_core::{Keycode, MouseButton, SEQUENCE_INVALID};

use crate::clipboard::ClipboardSync;
use crate::event::{
    EventSource, InputEvent, KeyEvent, MouseButtonEvent, MouseMotionEvent, TextEvent,
};
use crate::joystick::{Direction, DirectionalPad};
use crate::layout::ButtonLayout;
use crate::options::SessionOptions;
use crate::pinch::MirrorPointer;
use crate::pointer::PointerEngine;
use crate::ports::{ControlChannel, HostClipboard, KeyProcessor, MouseProcessor, Viewport};
use crate::shortcut::KeyRepeatTracker;

/// Pause between the joystick DOWN and its first MOVE so the device does
/// not coalesce them into one event.
const FIRST_MOVE_DELAY: Duration = Duration::from_millis(35);
/// Pause after toggling the camera contact on a mode change.
const MODE_TOGGLE_SETTLE: Duration = Duration::from_millis(50);
/// Pause before lifting the fire contact, for the same coalescing reason.
const FIRE_RELEASE_DELAY: Duration = Duration::from_millis(25);

/// Which routing table keyboard and mouse events currently go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Events are forwarded to the device mostly verbatim.
    Normal,
    /// Keyboard and mouse drive the on-screen gamepad layout.
    Emulation,
}

pub struct InputDispatcher {
    channel: Arc<dyn ControlChannel>,
    key_processor: Arc<dyn KeyProcessor>,
    mouse_processor: Arc<dyn MouseProcessor>,
    viewport: Arc<dyn Viewport>,
    host_clipboard: Arc<dyn HostClipboard>,
    options: SessionOptions,
    layout: ButtonLayout,

    mode: DispatchMode,
    engine: PointerEngine,
    pad: DirectionalPad,
    camera_pos: Point,
    /// True while the fire contact is held; raises camera sensitivity.
    firing: bool,
    mirror: MirrorPointer,
    tracker: KeyRepeatTracker,
    clipboard: ClipboardSync,
}

impl InputDispatcher {
    pub fn new(
        channel: Arc<dyn ControlChannel>,
        key_processor: Arc<dyn KeyProcessor>,
        mouse_processor: Arc<dyn MouseProcessor>,
        viewport: Arc<dyn Viewport>,
        host_clipboard: Arc<dyn HostClipboard>,
        layout: ButtonLayout,
        options: SessionOptions,
    ) -> Self {
        let pad = DirectionalPad::new(layout.joystick_rest, layout.move_offset, FIRST_MOVE_DELAY);
        let camera_pos = layout.camera_rest;
        Self {
            channel,
            key_processor,
            mouse_processor,
            viewport,
            host_clipboard,
            options,
            layout,
            mode: DispatchMode::Normal,
            engine: PointerEngine::new(),
            pad,
            camera_pos,
            firing: false,
            mirror: MirrorPointer::new(),
            tracker: KeyRepeatTracker::new(),
            clipboard: ClipboardSync::new(),
        }
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Whether any synthetic pointer slot is currently down.
    pub fn any_pointer_pressed(&self) -> bool {
        self.engine.any_pressed()
    }

    /// Routes one host event. Returns `true` when the event was consumed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Text(e) => {
                if !self.options.control {
                    return true;
                }
                self.process_text(e);
                true
            }
            // Some key events act locally, so keys are processed even when
            // control is disabled.
            InputEvent::Key(e) => {
                self.process_key(e);
                true
            }
            InputEvent::MouseMotion(e) => {
                if !self.options.control {
                    return false;
                }
                self.process_motion(e);
                true
            }
            InputEvent::MouseWheel(e) => {
                if !self.options.control {
                    return false;
                }
                self.mouse_processor.process_wheel(e);
                true
            }
            InputEvent::MouseButton(e) => {
                self.process_button(e);
                true
            }
            InputEvent::Touch(e) => {
                self.mouse_processor.process_touch(e);
                true
            }
        }
    }

    // ── Keyboard routing ──────────────────────────────────────────────────────

    fn process_text(&mut self, event: &TextEvent) {
        if self.options.shortcut_mods.matches(event.mods) {
            // A shortcut must never generate text events.
            return;
        }
        self.key_processor.process_text(event);
    }

    fn process_key(&mut self, event: &KeyEvent) {
        let smod = self.options.shortcut_mods.matches(event.mods);

        if event.down && !event.repeat {
            self.tracker.observe(event.keycode, event.mods);
        }

        if smod {
            self.process_shortcut(event);
            return;
        }

        if self.mode == DispatchMode::Emulation && self.process_emulation_key(event) {
            return;
        }

        if !self.options.control {
            return;
        }

        let mut ack_to_wait = SEQUENCE_INVALID;
        let is_paste_chord = event.mods.ctrl()
            && !event.mods.shift()
            && event.keycode == Keycode::V
            && event.down
            && !event.repeat;
        if self.options.clipboard_autosync && is_paste_chord {
            if self.options.legacy_paste {
                self.clipboard
                    .paste_as_text(&*self.channel, &*self.host_clipboard);
                return;
            }
            // Commit the host clipboard to the device before the paste
            // keystroke, so the paste sees the fresh content.
            let async_paste = self.key_processor.async_paste();
            match self
                .clipboard
                .sync_for_paste(&*self.channel, &*self.host_clipboard, async_paste)
            {
                Some(sequence) => ack_to_wait = sequence,
                None => return,
            }
        }

        self.key_processor.process_key(event, ack_to_wait);
    }

    fn process_shortcut(&mut self, event: &KeyEvent) {
        let control = self.options.control;
        let down = event.down;
        let shift = event.mods.shift();
        let repeat = event.repeat;
        let action = if down { KeyAction::Down } else { KeyAction::Up };

        match event.keycode {
            Keycode::Q => {
                if down && control && !shift && !repeat {
                    self.toggle_emulation_mode();
                }
            }
            Keycode::H => {
                if control && !shift && !repeat {
                    self.send_keycode(DeviceKeycode::Home, action, "HOME");
                }
            }
            Keycode::B | Keycode::Backspace => {
                if control && !shift && !repeat {
                    self.send_keycode(DeviceKeycode::Back, action, "BACK");
                }
            }
            Keycode::S => {
                if control && !shift && !repeat {
                    self.send_keycode(DeviceKeycode::AppSwitch, action, "APP_SWITCH");
                }
            }
            Keycode::M => {
                if control && !shift && !repeat {
                    self.send_keycode(DeviceKeycode::Menu, action, "MENU");
                }
            }
            Keycode::P => {
                if control && !shift && !repeat {
                    self.send_keycode(DeviceKeycode::Power, action, "POWER");
                }
            }
            Keycode::O => {
                if control && !repeat && down {
                    let mode = if shift {
                        PowerMode::Normal
                    } else {
                        PowerMode::Off
                    };
                    self.push_msg(
                        ControlMessage::SetScreenPowerMode { mode },
                        "set screen power mode",
                    );
                }
            }
            // Volume keys forward autorepeat so holding them keeps stepping.
            Keycode::Down => {
                if control && !shift {
                    self.send_keycode(DeviceKeycode::VolumeDown, action, "VOLUME_DOWN");
                }
            }
            Keycode::Up => {
                if control && !shift {
                    self.send_keycode(DeviceKeycode::VolumeUp, action, "VOLUME_UP");
                }
            }
            Keycode::Left => {
                if !shift && !repeat && down {
                    self.viewport.rotate_client_left();
                }
            }
            Keycode::Right => {
                if !shift && !repeat && down {
                    self.viewport.rotate_client_right();
                }
            }
            Keycode::C => {
                if control && !shift && !repeat && down {
                    self.clipboard
                        .get_device_clipboard(&*self.channel, CopyKey::Copy);
                }
            }
            Keycode::X => {
                if control && !shift && !repeat && down {
                    self.clipboard
                        .get_device_clipboard(&*self.channel, CopyKey::Cut);
                }
            }
            Keycode::V => {
                if control && !repeat && down {
                    if shift || self.options.legacy_paste {
                        self.clipboard
                            .paste_as_text(&*self.channel, &*self.host_clipboard);
                    } else {
                        self.clipboard
                            .set_and_paste(&*self.channel, &*self.host_clipboard);
                    }
                }
            }
            Keycode::F => {
                if !shift && !repeat && down {
                    self.viewport.toggle_fullscreen();
                }
            }
            Keycode::W => {
                if !shift && !repeat && down {
                    self.viewport.resize_to_fit();
                }
            }
            Keycode::G => {
                if !shift && !repeat && down {
                    self.viewport.resize_to_pixel_perfect();
                }
            }
            Keycode::I => {
                if !shift && !repeat && down {
                    self.viewport.toggle_fps_counter();
                }
            }
            Keycode::N => {
                if control && !repeat && down {
                    if shift {
                        self.push_msg(ControlMessage::CollapsePanels, "collapse panels");
                    } else if self.tracker.count() == 0 {
                        self.push_msg(
                            ControlMessage::ExpandNotificationPanel,
                            "expand notification panel",
                        );
                    } else {
                        // Second press of the same chord opens settings.
                        self.push_msg(
                            ControlMessage::ExpandSettingsPanel,
                            "expand settings panel",
                        );
                    }
                }
            }
            Keycode::R => {
                if control && !shift && !repeat && down {
                    self.push_msg(ControlMessage::RotateDevice, "rotate device");
                }
            }
            _ => {}
        }
    }

    /// Handles a key in emulation mode. Returns `false` for keys outside
    /// the gamepad table, which then fall through to pass-through routing.
    fn process_emulation_key(&mut self, event: &KeyEvent) -> bool {
        let down = event.down;
        match event.keycode {
            Keycode::Escape => {
                if down {
                    self.pad.recenter();
                }
                true
            }
            Keycode::LeftShift => self.emulated_button(VirtualPointer::Crouch, down),
            Keycode::Space => self.emulated_button(VirtualPointer::Jump, down),
            Keycode::R => self.emulated_button(VirtualPointer::Reload, down),
            Keycode::E => self.emulated_button(VirtualPointer::WeaponSwitch, down),
            Keycode::Digit1 => self.emulated_button(VirtualPointer::Scorestreak, down),
            Keycode::Digit2 => self.emulated_button(VirtualPointer::ScorestreakAlt1, down),
            Keycode::Digit3 => self.emulated_button(VirtualPointer::ScorestreakAlt2, down),
            Keycode::Q => self.emulated_button(VirtualPointer::Skill, down),
            Keycode::F => self.emulated_button(VirtualPointer::Throwable, down),
            Keycode::C => self.emulated_button(VirtualPointer::Chat, down),
            Keycode::W => self.direction_key(Direction::Forward, down),
            Keycode::A => self.direction_key(Direction::Left, down),
            Keycode::S => self.direction_key(Direction::Backward, down),
            Keycode::D => self.direction_key(Direction::Right, down),
            _ => false,
        }
    }

    fn emulated_button(&mut self, pointer: VirtualPointer, down: bool) -> bool {
        if let Some(point) = self.layout.position_of(pointer) {
            let frame_size = self.viewport.frame_size();
            if down {
                self.engine.press(&*self.channel, frame_size, pointer, point);
            } else {
                self.engine.release(&*self.channel, frame_size, pointer, point);
            }
        }
        true
    }

    fn direction_key(&mut self, direction: Direction, down: bool) -> bool {
        let frame_size = self.viewport.frame_size();
        self.pad
            .handle_key(&mut self.engine, &*self.channel, frame_size, direction, down);
        true
    }

    fn toggle_emulation_mode(&mut self) {
        let frame_size = self.viewport.frame_size();
        match self.mode {
            DispatchMode::Normal => {
                self.mode = DispatchMode::Emulation;
                self.pad.reset();
                self.camera_pos = self.layout.camera_rest;
                // Plant the camera contact; mouse motion will drag it.
                self.engine.press(
                    &*self.channel,
                    frame_size,
                    VirtualPointer::Camera,
                    self.camera_pos,
                );
            }
            DispatchMode::Emulation => {
                self.mode = DispatchMode::Normal;
                self.engine.release(
                    &*self.channel,
                    frame_size,
                    VirtualPointer::Camera,
                    self.camera_pos,
                );
                // Lift anything the user still holds so no contact survives
                // the mode change.
                self.engine
                    .release_all(&*self.channel, frame_size, &self.layout);
                self.pad.reset();
                self.camera_pos = self.layout.camera_rest;
                self.firing = false;
            }
        }

        thread::sleep(MODE_TOGGLE_SETTLE);
        let emulation = self.mode == DispatchMode::Emulation;
        self.viewport.set_pointer_capture(emulation);
        info!(
            "gamepad emulation {}",
            if emulation { "enabled" } else { "disabled" }
        );
    }

    // ── Mouse routing ─────────────────────────────────────────────────────────

    fn process_motion(&mut self, event: &MouseMotionEvent) {
        if self.mode == DispatchMode::Emulation {
            let sensitivity = if self.firing {
                self.layout.camera_sensitivity_firing
            } else {
                self.layout.camera_sensitivity_normal
            };
            self.camera_pos = self.camera_pos.offset(
                (event.xrel as f32 * sensitivity) as i32,
                (event.yrel as f32 * sensitivity) as i32,
            );
            let frame_size = self.viewport.frame_size();
            self.engine.emit(
                &*self.channel,
                frame_size,
                VirtualPointer::Camera,
                TouchAction::Move,
                self.camera_pos,
            );
            return;
        }

        let mut mask = MouseButton::Left.mask();
        if self.options.forward_all_clicks {
            mask |= MouseButton::Middle.mask() | MouseButton::Right.mask();
        }
        if event.buttons & mask == 0 {
            // No pressed button: nothing to drag.
            return;
        }
        if event.source == EventSource::SyntheticTouch {
            // Synthesized from a touch event we already forward.
            return;
        }

        self.mouse_processor.process_motion(event);
        self.mirror
            .handle_motion(&self.engine, &*self.channel, &*self.viewport, event);
    }

    fn process_button(&mut self, event: &MouseButtonEvent) {
        if event.source == EventSource::SyntheticTouch {
            return;
        }

        if self.mode == DispatchMode::Emulation {
            if event.button != MouseButton::Left {
                return;
            }
            let frame_size = self.viewport.frame_size();
            let fire = self.layout.fire;
            if event.down {
                debug!("fire down");
                self.engine
                    .press(&*self.channel, frame_size, VirtualPointer::Fire, fire);
                self.firing = true;
            } else {
                thread::sleep(FIRE_RELEASE_DELAY);
                self.engine
                    .release(&*self.channel, frame_size, VirtualPointer::Fire, fire);
                self.firing = false;
            }
            return;
        }

        let control = self.options.control;

        if !self.options.forward_all_clicks {
            let action = if event.down {
                KeyAction::Down
            } else {
                KeyAction::Up
            };
            match event.button {
                MouseButton::X1 if control => {
                    self.send_keycode(DeviceKeycode::AppSwitch, action, "APP_SWITCH");
                    return;
                }
                MouseButton::X2 if control => {
                    if event.down {
                        if event.clicks < 2 {
                            self.push_msg(
                                ControlMessage::ExpandNotificationPanel,
                                "expand notification panel",
                            );
                        } else {
                            self.push_msg(
                                ControlMessage::ExpandSettingsPanel,
                                "expand settings panel",
                            );
                        }
                    }
                    return;
                }
                MouseButton::Right if control => {
                    self.push_msg(
                        ControlMessage::BackOrScreenOn { action },
                        "press back or turn screen on",
                    );
                    return;
                }
                MouseButton::Middle if control => {
                    self.send_keycode(DeviceKeycode::Home, action, "HOME");
                    return;
                }
                _ => {}
            }
        }

        if !control {
            return;
        }

        self.mouse_processor.process_button(event);

        if event.button == MouseButton::Left {
            self.mirror
                .handle_button(&self.engine, &*self.channel, &*self.viewport, event);
        }
    }

    // ── Message helpers ───────────────────────────────────────────────────────

    fn send_keycode(&self, keycode: DeviceKeycode, action: KeyAction, name: &str) {
        let msg = ControlMessage::InjectKeycode {
            action,
            keycode,
            repeat: 0,
            metastate: 0,
        };
        if !self.channel.push(msg) {
            warn!(name, ?action, "could not request keycode injection");
        }
    }

    fn push_msg(&self, msg: ControlMessage, request: &str) {
        if !self.channel.push(msg) {
            warn!(request, "could not request control action");
        }
    }
}
