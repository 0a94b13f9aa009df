//! Binary codec for control messages.
//!
//! Wire format: a single type byte followed by a fixed or length-prefixed
//! payload.  All multi-byte integers are big-endian; strings are UTF-8 with
//! a `u32` byte-length prefix; touch pressure travels as 16-bit fixed point
//! (`0x0000` = 0.0, `0xFFFF` = 1.0).

use crate::geometry::{Point, Position, Size};
use crate::protocol::messages::{
    ControlMessage, CopyKey, DeviceKeycode, KeyAction, MessageType, PowerMode, TouchAction,
};
use thiserror::Error;

/// Errors that can occur during message encoding or decoding.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the encoded message requires.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// The leading type byte is not a recognized value.
    #[error("unknown message type: 0x{0:02X}")]
    UnknownMessageType(u8),

    /// A payload field holds a value outside its domain (bad enum code,
    /// invalid UTF-8, ...).
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`ControlMessage`] into a byte vector.
///
/// # Examples
///
/// ```rust
/// use tapcast_core::protocol::{decode_message, encode_message, ControlMessage};
///
/// let msg = ControlMessage::RotateDevice;
/// let bytes = encode_message(&msg);
/// let (decoded, consumed) = decode_message(&bytes).unwrap();
/// assert_eq!(decoded, msg);
/// assert_eq!(consumed, bytes.len());
/// ```
pub fn encode_message(msg: &ControlMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(32);
    buf.push(msg.message_type() as u8);

    match msg {
        ControlMessage::InjectKeycode {
            action,
            keycode,
            repeat,
            metastate,
        } => {
            buf.push(*action as u8);
            buf.extend_from_slice(&(*keycode as u16).to_be_bytes());
            buf.extend_from_slice(&repeat.to_be_bytes());
            buf.extend_from_slice(&metastate.to_be_bytes());
        }
        ControlMessage::InjectText { text } => encode_string(&mut buf, text),
        ControlMessage::InjectTouch {
            action,
            pointer_id,
            position,
            pressure,
            buttons,
        } => {
            buf.push(*action as u8);
            buf.extend_from_slice(&pointer_id.to_be_bytes());
            encode_position(&mut buf, position);
            buf.extend_from_slice(&pressure_to_u16fp(*pressure).to_be_bytes());
            buf.extend_from_slice(&buttons.to_be_bytes());
        }
        ControlMessage::BackOrScreenOn { action } => buf.push(*action as u8),
        ControlMessage::ExpandNotificationPanel
        | ControlMessage::ExpandSettingsPanel
        | ControlMessage::CollapsePanels
        | ControlMessage::RotateDevice => {} // type byte only
        ControlMessage::GetClipboard { copy_key } => buf.push(*copy_key as u8),
        ControlMessage::SetClipboard {
            sequence,
            paste,
            text,
        } => {
            buf.extend_from_slice(&sequence.to_be_bytes());
            buf.push(u8::from(*paste));
            encode_string(&mut buf, text);
        }
        ControlMessage::SetScreenPowerMode { mode } => buf.push(*mode as u8),
    }

    buf
}

/// Decodes one [`ControlMessage`] from the beginning of `bytes`.
///
/// Returns the decoded message and the number of bytes consumed, so a
/// stream reader can advance its cursor.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the bytes are truncated or malformed.
pub fn decode_message(bytes: &[u8]) -> Result<(ControlMessage, usize), ProtocolError> {
    let mut r = Reader::new(bytes);

    let type_byte = r.u8()?;
    let msg_type =
        MessageType::try_from(type_byte).map_err(|_| ProtocolError::UnknownMessageType(type_byte))?;

    let msg = match msg_type {
        MessageType::InjectKeycode => {
            let action = key_action(r.u8()?)?;
            let keycode_raw = r.u16()?;
            let keycode = DeviceKeycode::try_from(keycode_raw).map_err(|_| {
                ProtocolError::MalformedPayload(format!("unknown device keycode {keycode_raw}"))
            })?;
            let repeat = r.u32()?;
            let metastate = r.u32()?;
            ControlMessage::InjectKeycode {
                action,
                keycode,
                repeat,
                metastate,
            }
        }
        MessageType::InjectText => ControlMessage::InjectText { text: r.string()? },
        MessageType::InjectTouch => {
            let action_raw = r.u8()?;
            let action = TouchAction::try_from(action_raw).map_err(|_| {
                ProtocolError::MalformedPayload(format!("unknown touch action {action_raw}"))
            })?;
            let pointer_id = r.u64()?;
            let position = r.position()?;
            let pressure = u16fp_to_pressure(r.u16()?);
            let buttons = r.u32()?;
            ControlMessage::InjectTouch {
                action,
                pointer_id,
                position,
                pressure,
                buttons,
            }
        }
        MessageType::BackOrScreenOn => ControlMessage::BackOrScreenOn {
            action: key_action(r.u8()?)?,
        },
        MessageType::ExpandNotificationPanel => ControlMessage::ExpandNotificationPanel,
        MessageType::ExpandSettingsPanel => ControlMessage::ExpandSettingsPanel,
        MessageType::CollapsePanels => ControlMessage::CollapsePanels,
        MessageType::GetClipboard => {
            let raw = r.u8()?;
            let copy_key = CopyKey::try_from(raw).map_err(|_| {
                ProtocolError::MalformedPayload(format!("unknown copy key {raw}"))
            })?;
            ControlMessage::GetClipboard { copy_key }
        }
        MessageType::SetClipboard => {
            let sequence = r.u64()?;
            let paste = match r.u8()? {
                0 => false,
                1 => true,
                other => {
                    return Err(ProtocolError::MalformedPayload(format!(
                        "paste flag must be 0 or 1, got {other}"
                    )))
                }
            };
            let text = r.string()?;
            ControlMessage::SetClipboard {
                sequence,
                paste,
                text,
            }
        }
        MessageType::SetScreenPowerMode => {
            let raw = r.u8()?;
            let mode = PowerMode::try_from(raw).map_err(|_| {
                ProtocolError::MalformedPayload(format!("unknown power mode {raw}"))
            })?;
            ControlMessage::SetScreenPowerMode { mode }
        }
        MessageType::RotateDevice => ControlMessage::RotateDevice,
    };

    Ok((msg, r.consumed()))
}

// ── Field helpers ─────────────────────────────────────────────────────────────

fn key_action(raw: u8) -> Result<KeyAction, ProtocolError> {
    KeyAction::try_from(raw)
        .map_err(|_| ProtocolError::MalformedPayload(format!("unknown key action {raw}")))
}

fn encode_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn encode_position(buf: &mut Vec<u8>, position: &Position) {
    buf.extend_from_slice(&position.point.x.to_be_bytes());
    buf.extend_from_slice(&position.point.y.to_be_bytes());
    buf.extend_from_slice(&position.screen_size.width.to_be_bytes());
    buf.extend_from_slice(&position.screen_size.height.to_be_bytes());
}

/// Converts a pressure in `[0.0, 1.0]` to 16-bit fixed point.
fn pressure_to_u16fp(pressure: f32) -> u16 {
    (pressure.clamp(0.0, 1.0) * f32::from(u16::MAX)).round() as u16
}

fn u16fp_to_pressure(raw: u16) -> f32 {
    f32::from(raw) / f32::from(u16::MAX)
}

// ── Byte reader ───────────────────────────────────────────────────────────────

/// Cursor over the input slice; every read checks the remaining length.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn consumed(&self) -> usize {
        self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ProtocolError> {
        if self.buf.len() - self.pos < n {
            return Err(ProtocolError::InsufficientData {
                needed: self.pos + n,
                available: self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ProtocolError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ProtocolError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> Result<i32, ProtocolError> {
        let b = self.take(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Result<u64, ProtocolError> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn string(&mut self) -> Result<String, ProtocolError> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ProtocolError::MalformedPayload(format!("invalid UTF-8 string: {e}")))
    }

    fn position(&mut self) -> Result<Position, ProtocolError> {
        let x = self.i32()?;
        let y = self.i32()?;
        let width = self.u16()?;
        let height = self.u16()?;
        Ok(Position {
            screen_size: Size { width, height },
            point: Point { x, y },
        })
    }
}
