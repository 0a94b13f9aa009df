//! Synthetic touch-pointer identities.
//!
//! Every synthetic touch contact keeps a stable pointer id across its
//! DOWN → MOVE* → UP lifecycle so the device can track it as one finger.
//! The gamepad emulation uses a fixed table of slots, one per on-screen
//! control; the pinch emulator uses a dedicated reserved id so it can
//! never collide with a gamepad slot.

use serde::{Deserialize, Serialize};

/// Wire pointer id reserved for the mirrored pinch pointer.
///
/// Kept at the top of the id space, far away from the gamepad slots, so a
/// device-side injector treating ids as array indices fails loudly rather
/// than silently merging fingers.
pub const PINCH_POINTER_ID: u64 = u64::MAX - 1;

/// Identity of one synthetic touch-pointer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VirtualPointer {
    /// Movement joystick, shared by all four direction keys.
    Joystick,
    /// Camera/look drag, driven by relative mouse motion.
    Camera,
    Crouch,
    Jump,
    Reload,
    WeaponSwitch,
    /// Scorestreak button at its base position.
    Scorestreak,
    /// Scorestreak variant shifted by one offset step.
    ScorestreakAlt1,
    /// Scorestreak variant shifted by two offset steps.
    ScorestreakAlt2,
    Skill,
    Throwable,
    Chat,
    /// Aim-down-sights / shoot, driven by the primary mouse button.
    Fire,
    /// Mirrored pinch pointer (reserved id).
    Pinch,
}

impl VirtualPointer {
    /// Every slot, in wire-id order.  Used for release sweeps.
    pub const ALL: [VirtualPointer; 14] = [
        VirtualPointer::Joystick,
        VirtualPointer::Camera,
        VirtualPointer::Crouch,
        VirtualPointer::Jump,
        VirtualPointer::Reload,
        VirtualPointer::WeaponSwitch,
        VirtualPointer::Scorestreak,
        VirtualPointer::ScorestreakAlt1,
        VirtualPointer::ScorestreakAlt2,
        VirtualPointer::Skill,
        VirtualPointer::Throwable,
        VirtualPointer::Chat,
        VirtualPointer::Fire,
        VirtualPointer::Pinch,
    ];

    /// Number of slots, for fixed-size state tables.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index for per-slot state tables.
    pub const fn index(self) -> usize {
        match self {
            VirtualPointer::Joystick => 0,
            VirtualPointer::Camera => 1,
            VirtualPointer::Crouch => 2,
            VirtualPointer::Jump => 3,
            VirtualPointer::Reload => 4,
            VirtualPointer::WeaponSwitch => 5,
            VirtualPointer::Scorestreak => 6,
            VirtualPointer::ScorestreakAlt1 => 7,
            VirtualPointer::ScorestreakAlt2 => 8,
            VirtualPointer::Skill => 9,
            VirtualPointer::Throwable => 10,
            VirtualPointer::Chat => 11,
            VirtualPointer::Fire => 12,
            VirtualPointer::Pinch => 13,
        }
    }

    /// Stable pointer id sent on the wire.
    pub const fn wire_id(self) -> u64 {
        match self {
            VirtualPointer::Pinch => PINCH_POINTER_ID,
            // Gamepad slots occupy ids 1..=13; id 0 is left for the real
            // mouse pointer of the pass-through processor.
            _ => self.index() as u64 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_ids_are_unique() {
        let mut ids: Vec<u64> = VirtualPointer::ALL.iter().map(|p| p.wire_id()).collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), VirtualPointer::COUNT);
    }

    #[test]
    fn test_indices_are_dense() {
        for (expected, pointer) in VirtualPointer::ALL.iter().enumerate() {
            assert_eq!(pointer.index(), expected);
        }
    }

    #[test]
    fn test_pinch_uses_reserved_id() {
        assert_eq!(VirtualPointer::Pinch.wire_id(), PINCH_POINTER_ID);
        assert_eq!(VirtualPointer::Fire.wire_id(), 13);
    }
}
