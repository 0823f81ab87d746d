use crate::draw::config::ConfigChange;
use crate::draw::input::{OverlayBounds, ScreenPoint, WindowPoint};
use crate::draw::state::{ModeDescription, Tool};

/// Everything the engine reacts to. Producers on other threads send these
/// over a channel; the controller drains it on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    GlobalKeyDown { keycode: u32 },
    GlobalMouseDown(ScreenPoint),
    LocalPointerDown(WindowPoint),
    LocalPointerMove(WindowPoint),
    LocalPointerUp(WindowPoint),
    LocalTextCommit(String),
    ConfigChanged(ConfigChange),
    Clear,
    SelectTool(Tool),
    SelectStamp(String),
    ToggleSentence,
    ToggleWhiteboard,
    ToggleCapture,
    SetEraserRadius(f32),
    SetBounds(OverlayBounds),
}

/// Sent to registered observers after a mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayNotice {
    /// The host must toggle click-through and, when `capture` is set, move
    /// keyboard focus to the overlay.
    CaptureChanged { capture: bool },
    ModeChanged(ModeDescription),
}
