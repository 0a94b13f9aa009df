//! End-to-end codec checks over realistic message streams.

use tapcast_core::geometry::{Point, Position, Size};
use tapcast_core::pointer::VirtualPointer;
use tapcast_core::protocol::messages::{CopyKey, KeyAction, TouchAction};
use tapcast_core::protocol::{decode_message, encode_message, ControlMessage, ProtocolError};

const FRAME: Size = Size {
    width: 2340,
    height: 1080,
};

fn touch(action: TouchAction, pointer: VirtualPointer, x: i32, y: i32) -> ControlMessage {
    ControlMessage::InjectTouch {
        action,
        pointer_id: pointer.wire_id(),
        position: Position {
            screen_size: FRAME,
            point: Point::new(x, y),
        },
        pressure: if action == TouchAction::Up { 0.0 } else { 1.0 },
        buttons: 0,
    }
}

#[test]
fn test_gamepad_session_stream_decodes_in_order() {
    // Arrange: the message burst of a short emulated-gamepad session.
    let session = vec![
        touch(TouchAction::Down, VirtualPointer::Joystick, 340, 865),
        touch(TouchAction::Move, VirtualPointer::Joystick, 340, 615),
        touch(TouchAction::Down, VirtualPointer::Fire, 2000, 790),
        touch(TouchAction::Up, VirtualPointer::Fire, 2000, 790),
        touch(TouchAction::Up, VirtualPointer::Joystick, 340, 615),
        ControlMessage::SetClipboard {
            sequence: 1,
            paste: false,
            text: "gg".to_string(),
        },
    ];

    // Act: concatenate every encoded message into one stream, then decode it
    // back message by message.
    let mut stream = Vec::new();
    for msg in &session {
        stream.extend_from_slice(&encode_message(msg));
    }

    let mut decoded = Vec::new();
    let mut offset = 0;
    while offset < stream.len() {
        let (msg, consumed) = decode_message(&stream[offset..]).expect("stream must decode");
        decoded.push(msg);
        offset += consumed;
    }

    // Assert
    assert_eq!(decoded, session);
    assert_eq!(offset, stream.len());
}

#[test]
fn test_decode_of_partial_stream_reports_missing_bytes() {
    // Arrange
    let bytes = encode_message(&ControlMessage::SetClipboard {
        sequence: 9,
        paste: true,
        text: "clipboard payload".to_string(),
    });

    // Act: cut the stream in the middle of the text field.
    let result = decode_message(&bytes[..bytes.len() / 2]);

    // Assert
    match result {
        Err(ProtocolError::InsufficientData { needed, available }) => {
            assert!(needed > available);
        }
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn test_every_variant_roundtrips() {
    let messages = vec![
        ControlMessage::InjectKeycode {
            action: KeyAction::Down,
            keycode: tapcast_core::protocol::messages::DeviceKeycode::Back,
            repeat: 0,
            metastate: 0,
        },
        ControlMessage::InjectText {
            text: "multi byte: 漢字".to_string(),
        },
        touch(TouchAction::Move, VirtualPointer::Camera, 1250, 542),
        ControlMessage::BackOrScreenOn {
            action: KeyAction::Up,
        },
        ControlMessage::ExpandNotificationPanel,
        ControlMessage::ExpandSettingsPanel,
        ControlMessage::CollapsePanels,
        ControlMessage::GetClipboard {
            copy_key: CopyKey::Copy,
        },
        ControlMessage::SetClipboard {
            sequence: 3,
            paste: true,
            text: String::new(),
        },
        ControlMessage::SetScreenPowerMode {
            mode: tapcast_core::protocol::messages::PowerMode::Off,
        },
        ControlMessage::RotateDevice,
    ];

    for msg in messages {
        let bytes = encode_message(&msg);
        let (decoded, consumed) = decode_message(&bytes).expect("roundtrip must succeed");
        assert_eq!(decoded, msg);
        assert_eq!(consumed, bytes.len());
    }
}
