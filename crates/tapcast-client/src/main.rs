//! Tapcast demo client entry point.
//!
//! Wires the input dispatcher to logging stand-ins for the real
//! collaborators, spawns a drain task that encodes outbound control
//! messages, and replays a short scripted input session so the whole stack
//! can be exercised end to end.
//!
//! In a production build the stand-ins are replaced by:
//! - a windowing-layer event loop feeding real `InputEvent`s
//! - a transport writing encoded messages to the device socket
//! - a renderer-backed `Viewport`
//! - the OS clipboard behind `HostClipboard`

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tapcast_core::geometry::{Point, Size};
use tapcast_core::protocol::encode_message;
use tapcast_core::{Keycode, Modifiers, MouseButton};
use tapcast_input::event::{
    EventSource, InputEvent, KeyEvent, MouseButtonEvent, MouseMotionEvent,
};
use tapcast_input::ports::{HostClipboard, KeyProcessor, MouseProcessor, Viewport};
use tapcast_input::{
    BoundedControlChannel, ButtonLayout, ControlChannel, InputDispatcher, SessionOptions,
    ShortcutMods,
};

/// Tapcast demo client.
#[derive(Debug, Parser)]
#[command(name = "tapcast-client", version, about)]
struct Cli {
    /// Disable device control (view-only session).
    #[arg(long)]
    no_control: bool,

    /// Forward middle/right/extra clicks to the device instead of mapping
    /// them to system actions.
    #[arg(long)]
    forward_all_clicks: bool,

    /// Paste by injecting text events instead of setting the device
    /// clipboard.
    #[arg(long)]
    legacy_paste: bool,

    /// Do not synchronize the host clipboard before a paste chord.
    #[arg(long)]
    no_clipboard_autosync: bool,

    /// Shortcut modifier combination, e.g. "lalt" or "lctrl+lalt".
    /// May be given multiple times.
    #[arg(long = "shortcut-mod", value_name = "COMBO")]
    shortcut_mods: Vec<String>,

    /// Button layout TOML file; defaults apply for absent fields.
    #[arg(long, value_name = "FILE")]
    layout: Option<std::path::PathBuf>,

    /// Outbound control channel capacity.
    #[arg(long, env = "TAPCAST_CHANNEL_CAPACITY", default_value_t = 64)]
    channel_capacity: usize,
}

// ── Demo collaborators ────────────────────────────────────────────────────────

/// Logs pass-through key events instead of injecting them.
struct LogKeyProcessor;

impl KeyProcessor for LogKeyProcessor {
    fn async_paste(&self) -> bool {
        true
    }

    fn process_key(&self, event: &KeyEvent, ack_to_wait: u64) {
        info!(keycode = ?event.keycode, down = event.down, ack_to_wait, "pass-through key");
    }

    fn process_text(&self, event: &tapcast_input::event::TextEvent) {
        info!(text = %event.text, "pass-through text");
    }
}

/// Logs pass-through mouse events instead of injecting them.
struct LogMouseProcessor;

impl MouseProcessor for LogMouseProcessor {
    fn process_motion(&self, event: &MouseMotionEvent) {
        debug!(x = event.x, y = event.y, "pass-through motion");
    }

    fn process_button(&self, event: &MouseButtonEvent) {
        info!(button = ?event.button, down = event.down, "pass-through button");
    }

    fn process_wheel(&self, event: &tapcast_input::event::MouseWheelEvent) {
        debug!(dx = event.dx, dy = event.dy, "pass-through wheel");
    }

    fn process_touch(&self, event: &tapcast_input::event::TouchEvent) {
        debug!(phase = ?event.phase, "pass-through touch");
    }
}

/// Fixed 2340x1080 frame with a 1:1 window mapping.
struct StaticViewport;

impl Viewport for StaticViewport {
    fn frame_size(&self) -> Size {
        Size::new(2340, 1080)
    }

    fn window_to_frame(&self, x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn rotate_client_left(&self) {
        info!("viewport: rotate left");
    }

    fn rotate_client_right(&self) {
        info!("viewport: rotate right");
    }

    fn toggle_fullscreen(&self) {
        info!("viewport: toggle fullscreen");
    }

    fn resize_to_fit(&self) {
        info!("viewport: resize to fit");
    }

    fn resize_to_pixel_perfect(&self) {
        info!("viewport: resize to pixel perfect");
    }

    fn toggle_fps_counter(&self) {
        info!("viewport: toggle fps counter");
    }

    fn set_pointer_capture(&self, captured: bool) {
        info!(captured, "viewport: pointer capture");
    }
}

struct DemoClipboard;

impl HostClipboard for DemoClipboard {
    fn text(&self) -> Option<String> {
        Some("tapcast demo clipboard".to_string())
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

fn build_options(cli: &Cli) -> anyhow::Result<SessionOptions> {
    let shortcut_mods = if cli.shortcut_mods.is_empty() {
        ShortcutMods::default()
    } else {
        let combos = cli
            .shortcut_mods
            .iter()
            .map(|combo| {
                Modifiers::parse_combo(combo)
                    .with_context(|| format!("invalid shortcut modifier combo: {combo}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        ShortcutMods::new(combos)
    };

    Ok(SessionOptions {
        control: !cli.no_control,
        forward_all_clicks: cli.forward_all_clicks,
        legacy_paste: cli.legacy_paste,
        clipboard_autosync: !cli.no_clipboard_autosync,
        shortcut_mods,
    })
}

fn load_layout(cli: &Cli) -> anyhow::Result<ButtonLayout> {
    match &cli.layout {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read layout file {}", path.display()))?;
            Ok(ButtonLayout::from_toml_str(&text)?)
        }
        None => Ok(ButtonLayout::default()),
    }
}

/// A short scripted session: toggle emulation mode, run diagonally, jump,
/// fire, leave emulation, then pinch-zoom and paste.
fn demo_script(shortcut: Modifiers) -> Vec<InputEvent> {
    let key = |keycode, mods, down| {
        InputEvent::Key(KeyEvent {
            keycode,
            mods,
            down,
            repeat: false,
        })
    };
    let click = |down, mods, x, y| {
        InputEvent::MouseButton(MouseButtonEvent {
            button: MouseButton::Left,
            down,
            x,
            y,
            clicks: 1,
            mods,
            source: EventSource::Mouse,
        })
    };
    let none = Modifiers::empty();
    let ctrl = Modifiers(Modifiers::LCTRL);

    vec![
        key(Keycode::Q, shortcut, true),
        key(Keycode::Q, shortcut, false),
        key(Keycode::W, none, true),
        key(Keycode::A, none, true),
        InputEvent::MouseMotion(MouseMotionEvent {
            x: 0,
            y: 0,
            xrel: 24,
            yrel: -6,
            buttons: 0,
            source: EventSource::Mouse,
        }),
        key(Keycode::Space, none, true),
        key(Keycode::Space, none, false),
        click(true, none, 0, 0),
        click(false, none, 0, 0),
        key(Keycode::A, none, false),
        key(Keycode::W, none, false),
        key(Keycode::Q, shortcut, true),
        key(Keycode::Q, shortcut, false),
        click(true, ctrl, 100, 50),
        click(false, none, 100, 50),
        key(Keycode::V, ctrl, true),
        key(Keycode::V, ctrl, false),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let options = build_options(&cli)?;
    let layout = load_layout(&cli)?;
    let shortcut = Modifiers(Modifiers::LALT);

    info!("tapcast demo client starting");

    let (channel, mut rx) = BoundedControlChannel::new(cli.channel_capacity);

    // Drain task: in production this writes to the device socket.
    let drain = tokio::spawn(async move {
        let mut count = 0u64;
        while let Some(msg) = rx.recv().await {
            let bytes = encode_message(&msg);
            count += 1;
            info!(bytes = bytes.len(), "control message: {msg:?}");
        }
        count
    });

    let mut dispatcher = InputDispatcher::new(
        Arc::new(channel) as Arc<dyn ControlChannel>,
        Arc::new(LogKeyProcessor),
        Arc::new(LogMouseProcessor),
        Arc::new(StaticViewport),
        Arc::new(DemoClipboard),
        layout,
        options,
    );

    // The dispatcher is synchronous; drive it on a blocking thread so its
    // coalescing sleeps stay off the runtime.
    let sent = tokio::task::spawn_blocking(move || {
        for event in demo_script(shortcut) {
            dispatcher.handle_event(&event);
        }
    });
    sent.await.context("dispatch task panicked")?;

    // Closing the channel ends the drain task.
    let delivered = drain.await.context("drain task panicked")?;
    info!(delivered, "tapcast demo client stopped");
    Ok(())
}
