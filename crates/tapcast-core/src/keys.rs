//! Host-side key and mouse-button primitives.
//!
//! These types describe events as delivered by the host windowing layer,
//! before any routing decision.  They are deliberately distinct from the
//! device keycodes in [`crate::protocol::messages`]: a host key may map to
//! a device key, a synthetic touch pointer, or a purely local action
//! depending on the dispatcher's mode.

use serde::{Deserialize, Serialize};

/// Host keyboard keycode.
///
/// Only the keys the dispatcher can act on are enumerated; everything else
/// arrives as [`Keycode::Unknown`] and is forwarded verbatim to the
/// pass-through key processor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keycode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Space,
    Escape,
    Return,
    Backspace,
    Tab,
    LeftShift,
    RightShift,
    Up,
    Down,
    Left,
    Right,
    #[default]
    Unknown,
}

/// Modifier-key bitmask attached to host key and button events.
///
/// Bit layout:
/// - Bit 0: Left Ctrl
/// - Bit 1: Right Ctrl
/// - Bit 2: Left Shift
/// - Bit 3: Right Shift
/// - Bit 4: Left Alt
/// - Bit 5: Right Alt
/// - Bit 6: Left Super (Windows/Command)
/// - Bit 7: Right Super
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers(pub u16);

impl Modifiers {
    pub const LCTRL: u16 = 1 << 0;
    pub const RCTRL: u16 = 1 << 1;
    pub const LSHIFT: u16 = 1 << 2;
    pub const RSHIFT: u16 = 1 << 3;
    pub const LALT: u16 = 1 << 4;
    pub const RALT: u16 = 1 << 5;
    pub const LSUPER: u16 = 1 << 6;
    pub const RSUPER: u16 = 1 << 7;

    /// Bits that may participate in a shortcut modifier combination.
    /// Shift is excluded: it selects shortcut *variants*, never gates them.
    pub const SHORTCUT_MASK: u16 =
        Self::LCTRL | Self::RCTRL | Self::LALT | Self::RALT | Self::LSUPER | Self::RSUPER;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if either Ctrl modifier is active.
    pub fn ctrl(self) -> bool {
        self.0 & (Self::LCTRL | Self::RCTRL) != 0
    }

    /// Returns `true` if either Shift modifier is active.
    pub fn shift(self) -> bool {
        self.0 & (Self::LSHIFT | Self::RSHIFT) != 0
    }

    /// Returns `true` if either Alt modifier is active.
    pub fn alt(self) -> bool {
        self.0 & (Self::LALT | Self::RALT) != 0
    }

    /// Returns `true` if either Super (Win/Cmd) modifier is active.
    pub fn sup(self) -> bool {
        self.0 & (Self::LSUPER | Self::RSUPER) != 0
    }

    /// Canonical form for shortcut matching: every bit outside
    /// [`Self::SHORTCUT_MASK`] is dropped.
    pub fn shortcut_relevant(self) -> Self {
        Self(self.0 & Self::SHORTCUT_MASK)
    }

    /// Parses a `+`-separated combination such as `"lctrl+lalt"`.
    ///
    /// Returns `None` if any token is not a known modifier name.
    pub fn parse_combo(combo: &str) -> Option<Self> {
        let mut mods = 0u16;
        for token in combo.split('+') {
            mods |= match token.trim().to_ascii_lowercase().as_str() {
                "lctrl" => Self::LCTRL,
                "rctrl" => Self::RCTRL,
                "ctrl" => Self::LCTRL | Self::RCTRL,
                "lshift" => Self::LSHIFT,
                "rshift" => Self::RSHIFT,
                "lalt" => Self::LALT,
                "ralt" => Self::RALT,
                "lsuper" => Self::LSUPER,
                "rsuper" => Self::RSUPER,
                _ => return None,
            };
        }
        Some(Self(mods))
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Host mouse button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// First extra button (typically "back" on the mouse side).
    X1,
    /// Second extra button (typically "forward").
    X2,
}

impl MouseButton {
    /// Bit for this button in a pressed-buttons mask.
    pub const fn mask(self) -> u32 {
        match self {
            MouseButton::Left => 1 << 0,
            MouseButton::Right => 1 << 1,
            MouseButton::Middle => 1 << 2,
            MouseButton::X1 => 1 << 3,
            MouseButton::X2 => 1 << 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_relevant_drops_shift_bits() {
        let mods = Modifiers(Modifiers::LCTRL | Modifiers::LSHIFT | Modifiers::RALT);

        let canonical = mods.shortcut_relevant();

        assert_eq!(canonical, Modifiers(Modifiers::LCTRL | Modifiers::RALT));
    }

    #[test]
    fn test_ctrl_matches_either_side() {
        assert!(Modifiers(Modifiers::LCTRL).ctrl());
        assert!(Modifiers(Modifiers::RCTRL).ctrl());
        assert!(!Modifiers(Modifiers::LALT).ctrl());
    }

    #[test]
    fn test_parse_combo_accepts_known_names() {
        let parsed = Modifiers::parse_combo("lctrl+lalt").unwrap();

        assert_eq!(parsed, Modifiers(Modifiers::LCTRL | Modifiers::LALT));
    }

    #[test]
    fn test_parse_combo_ctrl_means_both_sides() {
        let parsed = Modifiers::parse_combo("ctrl").unwrap();

        assert!(parsed.ctrl());
        assert_eq!(parsed, Modifiers(Modifiers::LCTRL | Modifiers::RCTRL));
    }

    #[test]
    fn test_parse_combo_rejects_unknown_token() {
        assert_eq!(Modifiers::parse_combo("lctrl+hyper"), None);
    }

    #[test]
    fn test_button_masks_are_distinct() {
        let all = [
            MouseButton::Left,
            MouseButton::Right,
            MouseButton::Middle,
            MouseButton::X1,
            MouseButton::X2,
        ];
        let mut seen = 0u32;
        for b in all {
            assert_eq!(seen & b.mask(), 0, "mask overlap for {b:?}");
            seen |= b.mask();
        }
    }
}
