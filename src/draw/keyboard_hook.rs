use crate::draw::messages::OverlayEvent;
use crate::draw::model::Millis;
use anyhow::Result;
use std::sync::mpsc::Sender;

/// uiohook virtual key codes for the two Ctrl keys.
pub const VC_CONTROL_L: u32 = 29;
pub const VC_CONTROL_R: u32 = 3613;
pub const VC_UNDEFINED: u32 = 0;

pub const DOUBLE_TAP_WINDOW_MS: Millis = 300;

pub fn is_toggle_key(keycode: u32) -> bool {
    matches!(keycode, VC_CONTROL_L | VC_CONTROL_R)
}

/// Detects two presses of the toggle key less than `window_ms` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleTapDetector {
    last_press: Option<Millis>,
    window_ms: Millis,
}

impl Default for DoubleTapDetector {
    fn default() -> Self {
        Self::new(DOUBLE_TAP_WINDOW_MS)
    }
}

impl DoubleTapDetector {
    pub fn new(window_ms: Millis) -> Self {
        Self {
            last_press: None,
            window_ms,
        }
    }

    /// Returns `true` when this press completes a double tap. A completed
    /// double tap is consumed, so a third quick press starts a new pair.
    pub fn register(&mut self, keycode: u32, now: Millis) -> bool {
        if !is_toggle_key(keycode) {
            return false;
        }
        let hit = self
            .last_press
            .is_some_and(|last| now >= last && now - last < self.window_ms);
        self.last_press = if hit { None } else { Some(now) };
        hit
    }
}

/// Process-wide keyboard/mouse listener feeding [`OverlayEvent`]s into the
/// controller's queue. Backed by `rdev`, so it works on Windows, X11 and
/// macOS. A listener that fails to start is logged from its own thread.
#[derive(Debug, Default)]
pub struct GlobalHook {
    active: bool,
}

impl GlobalHook {
    pub fn activate(&mut self, sink: Sender<OverlayEvent>) -> Result<()> {
        if self.active {
            return Ok(());
        }

        platform::install(sink)?;

        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }

        platform::detach();

        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for GlobalHook {
    fn drop(&mut self) {
        self.deactivate();
    }
}

mod platform {
    use super::{OverlayEvent, VC_CONTROL_L, VC_CONTROL_R, VC_UNDEFINED};
    use crate::draw::input::ScreenPoint;
    use anyhow::{anyhow, Result};
    use once_cell::sync::Lazy;
    use rdev::{listen, EventType, Key};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc::Sender;
    use std::sync::Mutex;

    static EVENT_SINK: Lazy<Mutex<Option<Sender<OverlayEvent>>>> = Lazy::new(|| Mutex::new(None));
    static LISTENER_STARTED: AtomicBool = AtomicBool::new(false);

    /// `rdev::listen` cannot be stopped, so the listener thread is started
    /// once and detaching only drops the sink.
    pub fn install(sink: Sender<OverlayEvent>) -> Result<()> {
        {
            let mut guard = EVENT_SINK
                .lock()
                .map_err(|_| anyhow!("global hook sink poisoned"))?;
            *guard = Some(sink);
        }

        if LISTENER_STARTED.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        std::thread::Builder::new()
            .name("global-input-hook".into())
            .spawn(|| {
                let mut cursor = ScreenPoint::default();
                if let Err(err) = listen(move |event| {
                    if let Some(event) = translate(&event.event_type, &mut cursor) {
                        send(event);
                    }
                }) {
                    tracing::warn!(?err, "global input listener stopped");
                    LISTENER_STARTED.store(false, Ordering::SeqCst);
                }
            })?;
        Ok(())
    }

    pub fn detach() {
        if let Ok(mut guard) = EVENT_SINK.lock() {
            *guard = None;
        }
    }

    fn send(event: OverlayEvent) {
        if let Ok(guard) = EVENT_SINK.lock() {
            if let Some(sink) = guard.as_ref() {
                let _ = sink.send(event);
            }
        }
    }

    /// Maps a raw `rdev` event to an overlay event. Mouse moves only update
    /// `cursor`, since button presses carry no position.
    pub(super) fn translate(event: &EventType, cursor: &mut ScreenPoint) -> Option<OverlayEvent> {
        match *event {
            EventType::MouseMove { x, y } => {
                *cursor = ScreenPoint::new(x as f32, y as f32);
                None
            }
            EventType::ButtonPress(_) => Some(OverlayEvent::GlobalMouseDown(*cursor)),
            EventType::KeyPress(key) => Some(OverlayEvent::GlobalKeyDown {
                keycode: map_key(key),
            }),
            _ => None,
        }
    }

    fn map_key(key: Key) -> u32 {
        match key {
            Key::ControlLeft => VC_CONTROL_L,
            Key::ControlRight => VC_CONTROL_R,
            _ => VC_UNDEFINED,
        }
    }
}
