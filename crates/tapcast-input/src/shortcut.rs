//! Shortcut-modifier classification and same-key repeat tracking.

use tapcast_core::{Keycode, Modifiers};

/// Upper bound on configured shortcut-modifier combinations.
pub const MAX_SHORTCUT_MODS: usize = 8;

/// The session's accepted shortcut-modifier combinations.
///
/// Immutable after construction; membership is a linear scan since the set
/// is tiny. An empty or oversized set is a configuration bug, so the
/// constructor asserts rather than returning an error.
#[derive(Debug, Clone)]
pub struct ShortcutMods {
    accepted: Vec<Modifiers>,
}

impl ShortcutMods {
    /// # Panics
    ///
    /// Panics if `accepted` is empty, holds more than [`MAX_SHORTCUT_MODS`]
    /// entries, or contains a combination with no shortcut-relevant bits.
    pub fn new(accepted: Vec<Modifiers>) -> Self {
        assert!(!accepted.is_empty(), "shortcut modifier set must not be empty");
        assert!(
            accepted.len() <= MAX_SHORTCUT_MODS,
            "shortcut modifier set holds at most {MAX_SHORTCUT_MODS} entries"
        );
        for mods in &accepted {
            assert!(
                !mods.shortcut_relevant().is_empty(),
                "shortcut modifier combination must contain ctrl, alt or super"
            );
        }
        Self { accepted }
    }

    /// Whether the given raw modifier state exactly matches one of the
    /// configured combinations, after masking out irrelevant bits.
    pub fn matches(&self, mods: Modifiers) -> bool {
        let canonical = mods.shortcut_relevant();
        self.accepted.iter().any(|accepted| *accepted == canonical)
    }
}

impl Default for ShortcutMods {
    /// Left Alt or Left Super, the conventional defaults.
    fn default() -> Self {
        Self::new(vec![
            Modifiers(Modifiers::LALT),
            Modifiers(Modifiers::LSUPER),
        ])
    }
}

/// Distinguishes genuine repeated presses of the same key+modifier pair
/// from presses of anything else.
///
/// Host autorepeat events must not be fed to [`observe`](Self::observe);
/// the counter is reset by any different key or modifier, never by time.
#[derive(Debug, Default)]
pub struct KeyRepeatTracker {
    last_keycode: Keycode,
    last_mods: Modifiers,
    count: u32,
}

impl KeyRepeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a non-autorepeat key-down and returns the updated count:
    /// 0 for a first press, 1 for the second press of the same pair, etc.
    pub fn observe(&mut self, keycode: Keycode, mods: Modifiers) -> u32 {
        if keycode == self.last_keycode && mods == self.last_mods {
            self.count += 1;
        } else {
            self.count = 0;
            self.last_keycode = keycode;
            self.last_mods = mods;
        }
        self.count
    }

    /// Count as of the most recent [`observe`](Self::observe).
    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_accepts_only_configured_combinations() {
        let mods = ShortcutMods::new(vec![Modifiers(Modifiers::LALT)]);

        assert!(mods.matches(Modifiers(Modifiers::LALT)));
        assert!(!mods.matches(Modifiers(Modifiers::RALT)));
        assert!(!mods.matches(Modifiers(Modifiers::LALT | Modifiers::LCTRL)));
        assert!(!mods.matches(Modifiers::empty()));
    }

    #[test]
    fn test_matches_ignores_shift_bits() {
        let mods = ShortcutMods::new(vec![Modifiers(Modifiers::LALT)]);

        assert!(mods.matches(Modifiers(Modifiers::LALT | Modifiers::LSHIFT)));
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn test_empty_set_panics() {
        let _ = ShortcutMods::new(vec![]);
    }

    #[test]
    #[should_panic(expected = "ctrl, alt or super")]
    fn test_shift_only_combination_panics() {
        let _ = ShortcutMods::new(vec![Modifiers(Modifiers::LSHIFT)]);
    }

    #[test]
    fn test_repeat_counter_increments_on_same_pair() {
        let mut tracker = KeyRepeatTracker::new();

        assert_eq!(tracker.observe(Keycode::N, Modifiers(Modifiers::LALT)), 0);
        assert_eq!(tracker.observe(Keycode::N, Modifiers(Modifiers::LALT)), 1);
        assert_eq!(tracker.observe(Keycode::N, Modifiers(Modifiers::LALT)), 2);
    }

    #[test]
    fn test_repeat_counter_resets_on_different_key() {
        let mut tracker = KeyRepeatTracker::new();
        tracker.observe(Keycode::N, Modifiers(Modifiers::LALT));
        tracker.observe(Keycode::N, Modifiers(Modifiers::LALT));

        assert_eq!(tracker.observe(Keycode::M, Modifiers(Modifiers::LALT)), 0);
    }

    #[test]
    fn test_repeat_counter_resets_on_different_modifiers() {
        let mut tracker = KeyRepeatTracker::new();
        tracker.observe(Keycode::N, Modifiers(Modifiers::LALT));

        assert_eq!(
            tracker.observe(Keycode::N, Modifiers(Modifiers::LALT | Modifiers::LSHIFT)),
            0
        );
    }
}
