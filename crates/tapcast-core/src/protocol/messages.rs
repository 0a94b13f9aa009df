//! All Tapcast control-message types.
//!
//! A [`ControlMessage`] is a self-contained request the host pushes onto the
//! control channel; the device injects it into its input stack or acts on it
//! directly (panel expansion, rotation, power mode).  Messages are immutable
//! once constructed; the host never retains them after handoff.

use crate::geometry::Position;
use serde::{Deserialize, Serialize};

/// Clipboard sequence value meaning "no acknowledgment requested".
///
/// Real sequences start at 1; 0 is never handed to the key processor as an
/// ack-to-wait token.
pub const SEQUENCE_INVALID: u64 = 0;

// ── Message type codes ────────────────────────────────────────────────────────

/// Wire type codes, one per [`ControlMessage`] variant.
///
/// Code `0x03` is reserved for scroll injection, which is owned by the
/// pass-through mouse processor rather than this protocol layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    InjectKeycode = 0x00,
    InjectText = 0x01,
    InjectTouch = 0x02,
    BackOrScreenOn = 0x04,
    ExpandNotificationPanel = 0x05,
    ExpandSettingsPanel = 0x06,
    CollapsePanels = 0x07,
    GetClipboard = 0x08,
    SetClipboard = 0x09,
    SetScreenPowerMode = 0x0A,
    RotateDevice = 0x0B,
}

impl TryFrom<u8> for MessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x00 => Ok(MessageType::InjectKeycode),
            0x01 => Ok(MessageType::InjectText),
            0x02 => Ok(MessageType::InjectTouch),
            0x04 => Ok(MessageType::BackOrScreenOn),
            0x05 => Ok(MessageType::ExpandNotificationPanel),
            0x06 => Ok(MessageType::ExpandSettingsPanel),
            0x07 => Ok(MessageType::CollapsePanels),
            0x08 => Ok(MessageType::GetClipboard),
            0x09 => Ok(MessageType::SetClipboard),
            0x0A => Ok(MessageType::SetScreenPowerMode),
            0x0B => Ok(MessageType::RotateDevice),
            _ => Err(()),
        }
    }
}

// ── Field enums ───────────────────────────────────────────────────────────────

/// Key event action, matching the device's key-event action codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyAction {
    Down = 0,
    Up = 1,
}

impl TryFrom<u8> for KeyAction {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(KeyAction::Down),
            1 => Ok(KeyAction::Up),
            _ => Err(()),
        }
    }
}

/// Touch event action, matching the device's motion-event action codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TouchAction {
    Down = 0,
    Up = 1,
    Move = 2,
}

impl TryFrom<u8> for TouchAction {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TouchAction::Down),
            1 => Ok(TouchAction::Up),
            2 => Ok(TouchAction::Move),
            _ => Err(()),
        }
    }
}

/// Device keycode injected by shortcut actions.
///
/// Values are the device's native keycodes so the injector forwards them
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum DeviceKeycode {
    Home = 3,
    Back = 4,
    VolumeUp = 24,
    VolumeDown = 25,
    Power = 26,
    Menu = 82,
    AppSwitch = 187,
}

impl TryFrom<u16> for DeviceKeycode {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(DeviceKeycode::Home),
            4 => Ok(DeviceKeycode::Back),
            24 => Ok(DeviceKeycode::VolumeUp),
            25 => Ok(DeviceKeycode::VolumeDown),
            26 => Ok(DeviceKeycode::Power),
            82 => Ok(DeviceKeycode::Menu),
            187 => Ok(DeviceKeycode::AppSwitch),
            _ => Err(()),
        }
    }
}

/// Which key the device should press after copying its selection to the
/// clipboard, for `GetClipboard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CopyKey {
    None = 0,
    Copy = 1,
    Cut = 2,
}

impl TryFrom<u8> for CopyKey {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CopyKey::None),
            1 => Ok(CopyKey::Copy),
            2 => Ok(CopyKey::Cut),
            _ => Err(()),
        }
    }
}

/// Device screen power mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PowerMode {
    Off = 0,
    Normal = 2,
}

impl TryFrom<u8> for PowerMode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PowerMode::Off),
            2 => Ok(PowerMode::Normal),
            _ => Err(()),
        }
    }
}

// ── Top-level message enum ────────────────────────────────────────────────────

/// All valid control messages, discriminated by type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlMessage {
    /// Inject a key press or release.
    InjectKeycode {
        action: KeyAction,
        keycode: DeviceKeycode,
        /// Autorepeat count forwarded from the host event.
        repeat: u32,
        /// Device meta-state bitmask; 0 when the host handles modifiers itself.
        metastate: u32,
    },
    /// Inject a composed text string.
    InjectText { text: String },
    /// Inject one synthetic touch contact event.
    InjectTouch {
        action: TouchAction,
        /// Stable id of the contact across its DOWN→MOVE*→UP lifecycle.
        pointer_id: u64,
        position: Position,
        /// 1.0 while the contact is down, 0.0 on release.
        pressure: f32,
        /// Pressed-buttons mask; always 0 for synthetic fingers.
        buttons: u32,
    },
    /// Press Back, or wake the screen if it is off.
    BackOrScreenOn { action: KeyAction },
    ExpandNotificationPanel,
    ExpandSettingsPanel,
    CollapsePanels,
    /// Ask the device to send its clipboard content back to the host.
    GetClipboard { copy_key: CopyKey },
    /// Replace the device clipboard, optionally pasting immediately.
    SetClipboard {
        /// Correlates the device's acknowledgment with this request;
        /// [`SEQUENCE_INVALID`] when no acknowledgment is wanted.
        sequence: u64,
        paste: bool,
        text: String,
    },
    SetScreenPowerMode { mode: PowerMode },
    /// Rotate the device screen by 90 degrees.
    RotateDevice,
}

impl ControlMessage {
    /// Returns the [`MessageType`] discriminant for this message.
    pub fn message_type(&self) -> MessageType {
        match self {
            ControlMessage::InjectKeycode { .. } => MessageType::InjectKeycode,
            ControlMessage::InjectText { .. } => MessageType::InjectText,
            ControlMessage::InjectTouch { .. } => MessageType::InjectTouch,
            ControlMessage::BackOrScreenOn { .. } => MessageType::BackOrScreenOn,
            ControlMessage::ExpandNotificationPanel => MessageType::ExpandNotificationPanel,
            ControlMessage::ExpandSettingsPanel => MessageType::ExpandSettingsPanel,
            ControlMessage::CollapsePanels => MessageType::CollapsePanels,
            ControlMessage::GetClipboard { .. } => MessageType::GetClipboard,
            ControlMessage::SetClipboard { .. } => MessageType::SetClipboard,
            ControlMessage::SetScreenPowerMode { .. } => MessageType::SetScreenPowerMode,
            ControlMessage::RotateDevice => MessageType::RotateDevice,
        }
    }
}
