//! Criterion benchmarks for the control-message codec.
//!
//! Touch injection dominates traffic during emulated-gamepad play (camera
//! MOVE messages arrive at mouse-motion rate), so the round-trip group
//! focuses on the hot path.
//!
//! Run with:
//! ```bash
//! cargo bench --package tapcast-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tapcast_core::geometry::{Point, Position, Size};
use tapcast_core::pointer::VirtualPointer;
use tapcast_core::protocol::codec::{decode_message, encode_message};
use tapcast_core::protocol::messages::{
    ControlMessage, CopyKey, DeviceKeycode, KeyAction, PowerMode, TouchAction,
};

// ── Message fixtures ──────────────────────────────────────────────────────────

fn make_inject_keycode() -> ControlMessage {
    ControlMessage::InjectKeycode {
        action: KeyAction::Down,
        keycode: DeviceKeycode::Back,
        repeat: 0,
        metastate: 0,
    }
}

fn make_inject_text() -> ControlMessage {
    ControlMessage::InjectText {
        text: "benchmark text payload".to_string(),
    }
}

fn make_inject_touch() -> ControlMessage {
    ControlMessage::InjectTouch {
        action: TouchAction::Move,
        pointer_id: VirtualPointer::Camera.wire_id(),
        position: Position {
            screen_size: Size::new(2340, 1080),
            point: Point::new(1250, 542),
        },
        pressure: 1.0,
        buttons: 0,
    }
}

fn make_set_clipboard() -> ControlMessage {
    ControlMessage::SetClipboard {
        sequence: 7,
        paste: true,
        text: "clipboard content for benchmarking".to_string(),
    }
}

fn all_messages() -> Vec<(&'static str, ControlMessage)> {
    vec![
        ("InjectKeycode", make_inject_keycode()),
        ("InjectText", make_inject_text()),
        ("InjectTouch", make_inject_touch()),
        (
            "BackOrScreenOn",
            ControlMessage::BackOrScreenOn {
                action: KeyAction::Down,
            },
        ),
        (
            "ExpandNotificationPanel",
            ControlMessage::ExpandNotificationPanel,
        ),
        ("ExpandSettingsPanel", ControlMessage::ExpandSettingsPanel),
        ("CollapsePanels", ControlMessage::CollapsePanels),
        (
            "GetClipboard",
            ControlMessage::GetClipboard {
                copy_key: CopyKey::Copy,
            },
        ),
        ("SetClipboard", make_set_clipboard()),
        (
            "SetScreenPowerMode",
            ControlMessage::SetScreenPowerMode {
                mode: PowerMode::Off,
            },
        ),
        ("RotateDevice", ControlMessage::RotateDevice),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `encode_message` for every message type.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_message");
    for (name, msg) in all_messages() {
        group.bench_with_input(BenchmarkId::new("msg", name), &msg, |b, msg| {
            b.iter(|| encode_message(black_box(msg)))
        });
    }
    group.finish();
}

/// Benchmarks `decode_message` for every message type from pre-encoded bytes.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_message");
    for (name, msg) in all_messages() {
        let bytes = encode_message(&msg);
        group.bench_with_input(BenchmarkId::new("msg", name), &bytes, |b, bytes| {
            b.iter(|| decode_message(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks a full encode+decode round-trip for the highest-frequency messages.
fn bench_roundtrip_hot_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_decode_roundtrip");

    // InjectTouch: one message per camera mouse-motion event
    let touch_msg = make_inject_touch();
    group.bench_function("InjectTouch", |b| {
        b.iter(|| {
            let bytes = encode_message(black_box(&touch_msg));
            decode_message(black_box(&bytes)).unwrap()
        })
    });

    // InjectKeycode: pass-through typing
    let key_msg = make_inject_keycode();
    group.bench_function("InjectKeycode", |b| {
        b.iter(|| {
            let bytes = encode_message(black_box(&key_msg));
            decode_message(black_box(&bytes)).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_roundtrip_hot_path);
criterion_main!(benches);
