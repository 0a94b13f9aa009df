//! Per-session dispatcher options.

use crate::shortcut::ShortcutMods;

/// Session flags handed to the dispatcher at construction.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Whether the session may control the device at all. When false the
    /// dispatcher still handles local actions (fullscreen, rotation) but
    /// never produces remote messages.
    pub control: bool,
    /// Forward middle/right/extra clicks to the device instead of mapping
    /// them to system actions.
    pub forward_all_clicks: bool,
    /// Paste by injecting the clipboard text as key events instead of
    /// setting the device clipboard.
    pub legacy_paste: bool,
    /// Synchronize the host clipboard to the device before forwarding a
    /// paste chord.
    pub clipboard_autosync: bool,
    pub shortcut_mods: ShortcutMods,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            control: true,
            forward_all_clicks: false,
            legacy_paste: false,
            clipboard_autosync: true,
            shortcut_mods: ShortcutMods::default(),
        }
    }
}
