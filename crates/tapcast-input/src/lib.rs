//! Input translation core.
//!
//! Turns host keyboard/mouse/touch events into control messages for a
//! remote touch device. The [`dispatch::InputDispatcher`] is the entry
//! point: feed it [`event::InputEvent`]s and it routes them through the
//! shortcut table, the gamepad-emulation engine, or the injected
//! pass-through processors.
//!
//! # Module layout
//!
//! - [`event`] – host input event types
//! - [`ports`] – capability traits for all collaborators
//! - [`channel`] – tokio-mpsc implementation of the control channel
//! - [`shortcut`] – modifier classification and repeat tracking
//! - [`layout`] – TOML-loadable on-screen button layout
//! - [`options`] – per-session flags
//! - [`pointer`] – virtual pointer engine (slot press/release state)
//! - [`joystick`] – directional combination state machine
//! - [`pinch`] – mirrored-pointer pinch emulation
//! - [`clipboard`] – sequence-numbered clipboard sync
//! - [`dispatch`] – the top-level router

pub mod channel;
pub mod clipboard;
pub mod dispatch;
pub mod event;
pub mod joystick;
pub mod layout;
pub mod options;
pub mod pinch;
pub mod pointer;
pub mod ports;
pub mod shortcut;

pub use channel::BoundedControlChannel;
pub use dispatch::{DispatchMode, InputDispatcher};
pub use event::InputEvent;
pub use layout::{ButtonLayout, LayoutError};
pub use options::SessionOptions;
pub use ports::{ControlChannel, HostClipboard, KeyProcessor, MouseProcessor, Viewport};
pub use shortcut::ShortcutMods;
