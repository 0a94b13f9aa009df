//! # tapcast-core
//!
//! Shared library for Tapcast containing the control-message protocol, its
//! binary codec, and the input primitives used on the host side.
//!
//! Tapcast mirrors and controls a remote, touch-capable device: the host
//! captures keyboard/mouse/touch events, translates them into
//! [`ControlMessage`]s, and streams them to the device, which injects them
//! into its own input stack.  This crate defines:
//!
//! - **`geometry`** – points, frame sizes, and frame-relative positions.
//!
//! - **`keys`** – host-side keycodes, the modifier bitmask (with the
//!   canonical shortcut-relevant subset), and host mouse buttons.
//!
//! - **`pointer`** – the closed set of synthetic touch-pointer identities
//!   used to emulate an on-screen gamepad and the pinch gesture.
//!
//! - **`protocol`** – the [`ControlMessage`] enum and a compact big-endian
//!   binary codec (`encode_message` / `decode_message`).
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or network
//! sockets; it is shared by the host dispatcher and any device-side decoder.

pub mod geometry;
pub mod keys;
pub mod pointer;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `tapcast_core::ControlMessage` instead of the full module path.
pub use geometry::{Point, Position, Size};
pub use keys::{Keycode, Modifiers, MouseButton};
pub use pointer::VirtualPointer;
pub use protocol::codec::{decode_message, encode_message, ProtocolError};
pub use protocol::messages::{ControlMessage, SEQUENCE_INVALID};
