//! Sequence-numbered clipboard synchronization.
//!
//! Setting the device clipboard can carry a sequence number; the device
//! acknowledges it once the content is committed, and the key processor
//! holds the dependent paste keystroke until that acknowledgment arrives.
//! This component never waits itself; it only assigns sequences and tells
//! the router which one to hand downstream.

use tracing::warn;

use tapcast_core::protocol::messages::{ControlMessage, CopyKey};
use tapcast_core::SEQUENCE_INVALID;

use crate::ports::{ControlChannel, HostClipboard};

#[derive(Debug)]
pub struct ClipboardSync {
    next_sequence: u64,
}

impl Default for ClipboardSync {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSync {
    pub fn new() -> Self {
        // 0 is SEQUENCE_INVALID, so real sequences start at 1.
        Self { next_sequence: 1 }
    }

    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    fn read_host_text(host: &dyn HostClipboard) -> Option<String> {
        match host.text() {
            Some(text) if !text.is_empty() => Some(text),
            _ => {
                warn!("host clipboard is empty or unavailable");
                None
            }
        }
    }

    /// Requests the device clipboard content, to be sent back to the host.
    pub fn get_device_clipboard(&self, channel: &dyn ControlChannel, copy_key: CopyKey) {
        if !channel.push(ControlMessage::GetClipboard { copy_key }) {
            warn!("could not request device clipboard");
        }
    }

    /// Sets the device clipboard and pastes immediately, without any
    /// acknowledgment. Used by the explicit paste shortcut.
    pub fn set_and_paste(&self, channel: &dyn ControlChannel, host: &dyn HostClipboard) {
        let Some(text) = Self::read_host_text(host) else {
            return;
        };
        let msg = ControlMessage::SetClipboard {
            sequence: SEQUENCE_INVALID,
            paste: true,
            text,
        };
        if !channel.push(msg) {
            warn!("could not request device clipboard set");
        }
    }

    /// Synchronizes the host clipboard to the device ahead of a paste
    /// keystroke.
    ///
    /// Returns the acknowledgment token the router must hand to the key
    /// processor: `Some(SEQUENCE_INVALID)` when no acknowledgment is needed
    /// (the processor cannot defer pastes), `Some(sequence)` when the
    /// processor must wait, or `None` when the sync failed and the paste
    /// keystroke must not be forwarded at all.
    ///
    /// The sequence counter advances only when a numbered request was
    /// actually enqueued, so it always matches the requests on the wire.
    pub fn sync_for_paste(
        &mut self,
        channel: &dyn ControlChannel,
        host: &dyn HostClipboard,
        async_paste: bool,
    ) -> Option<u64> {
        let text = Self::read_host_text(host)?;

        let sequence = if async_paste {
            self.next_sequence
        } else {
            SEQUENCE_INVALID
        };

        let msg = ControlMessage::SetClipboard {
            sequence,
            paste: false,
            text,
        };
        if !channel.push(msg) {
            warn!("clipboard could not be synchronized, paste not injected");
            return None;
        }

        if async_paste {
            self.next_sequence += 1;
        }
        Some(sequence)
    }

    /// Legacy paste: injects the host clipboard content as a text event
    /// instead of touching the device clipboard.
    pub fn paste_as_text(&self, channel: &dyn ControlChannel, host: &dyn HostClipboard) {
        let Some(text) = Self::read_host_text(host) else {
            return;
        };
        if !channel.push(ControlMessage::InjectText { text }) {
            warn!("could not request clipboard text injection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

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

    struct FixedClipboard(Option<String>);

    impl HostClipboard for FixedClipboard {
        fn text(&self) -> Option<String> {
            self.0.clone()
        }
    }

    #[test]
    fn test_sequence_advances_once_per_successful_numbered_sync() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let host = FixedClipboard(Some("copied".to_string()));
        let mut sync = ClipboardSync::new();

        // Act
        let first = sync.sync_for_paste(&channel, &host, true);
        let second = sync.sync_for_paste(&channel, &host, true);

        // Assert
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        assert_eq!(sync.next_sequence(), 3);
    }

    #[test]
    fn test_sequence_frozen_on_rejected_enqueue() {
        // Arrange
        let channel = RecordingChannel::new(false);
        let host = FixedClipboard(Some("copied".to_string()));
        let mut sync = ClipboardSync::new();

        // Act
        let token = sync.sync_for_paste(&channel, &host, true);

        // Assert
        assert_eq!(token, None);
        assert_eq!(sync.next_sequence(), 1);
    }

    #[test]
    fn test_no_ack_token_without_async_paste_support() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let host = FixedClipboard(Some("copied".to_string()));
        let mut sync = ClipboardSync::new();

        // Act
        let token = sync.sync_for_paste(&channel, &host, false);

        // Assert: sync happened, but unnumbered and without advancing.
        assert_eq!(token, Some(SEQUENCE_INVALID));
        assert_eq!(sync.next_sequence(), 1);
        let messages = channel.messages.lock().unwrap();
        match &messages[0] {
            ControlMessage::SetClipboard { sequence, paste, .. } => {
                assert_eq!(*sequence, SEQUENCE_INVALID);
                assert!(!paste);
            }
            other => panic!("expected SetClipboard, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_clipboard_aborts_before_any_message() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let host = FixedClipboard(Some(String::new()));
        let mut sync = ClipboardSync::new();

        // Act
        let token = sync.sync_for_paste(&channel, &host, true);
        sync.set_and_paste(&channel, &host);
        sync.paste_as_text(&channel, &host);

        // Assert
        assert_eq!(token, None);
        assert!(channel.messages.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_and_paste_is_unnumbered_and_pastes() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let host = FixedClipboard(Some("hello".to_string()));
        let sync = ClipboardSync::new();

        // Act
        sync.set_and_paste(&channel, &host);

        // Assert
        let messages = channel.messages.lock().unwrap();
        match &messages[0] {
            ControlMessage::SetClipboard {
                sequence,
                paste,
                text,
            } => {
                assert_eq!(*sequence, SEQUENCE_INVALID);
                assert!(paste);
                assert_eq!(text, "hello");
            }
            other => panic!("expected SetClipboard, got {other:?}"),
        }
    }

    #[test]
    fn test_paste_as_text_injects_text_event() {
        // Arrange
        let channel = RecordingChannel::new(true);
        let host = FixedClipboard(Some("legacy".to_string()));
        let sync = ClipboardSync::new();

        // Act
        sync.paste_as_text(&channel, &host);

        // Assert
        assert_eq!(
            channel.messages.lock().unwrap()[0],
            ControlMessage::InjectText {
                text: "legacy".to_string()
            }
        );
    }
}
